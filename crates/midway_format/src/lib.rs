//! Midway string formatting engine
//!
//! This crate turns a format string (literal UI text or a language-pack
//! entry) plus typed arguments into final localized text:
//!
//! - **Tokenizer**: lazy, restartable token stream over the `{NAME}`
//!   mini-language (`fmt`, `token`)
//! - **Legacy decoder**: replays a token stream against a flat byte buffer
//!   to recover a typed argument list (`legacy`)
//! - **Renderer**: recursive string-id expansion with locale-aware value
//!   formatting (`render`, `num`)
//! - **Locale configuration**: currency, measurement system, separators and
//!   localized sub-templates (`locale`)
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use midway_format::{fmt_args, FmtString, LocaleConfig, Renderer};
//!
//! let mut strings: HashMap<u16, String> = HashMap::new();
//! strings.insert(1, "Hello {STRINGID}".to_string());
//! strings.insert(2, "World".to_string());
//!
//! let locale = LocaleConfig::default();
//! let renderer = Renderer::new(&strings, &locale);
//! let text = renderer
//!     .render(&FmtString::new("{STRINGID}"), &fmt_args![1u16, 2u16])
//!     .unwrap();
//! assert_eq!(text, "Hello World");
//! ```

pub mod arg;
pub mod fmt;
pub mod legacy;
pub mod locale;
mod names;
mod num;
pub mod render;
pub mod token;

pub use arg::{Argument, Arguments};
pub use fmt::{FmtString, Tokens};
pub use legacy::{decode_args, ArgBuffer, DecodeError};
pub use locale::{
    Affix, CurrencyDescriptor, LocaleConfig, MeasurementSystem, MONTH_COUNT,
};
pub use render::{Error, FormatError, Renderer, StringSource};
pub use token::{real_name_index, Kind, StringId, Token, REAL_NAME_END, REAL_NAME_START, STR_NONE};

/// Maximum nesting of string-id references.
///
/// The string-id graph is assumed acyclic; this bound turns an accidental
/// cycle into an explicit error instead of unbounded recursion.
pub const MAX_STRING_DEPTH: usize = 32;
