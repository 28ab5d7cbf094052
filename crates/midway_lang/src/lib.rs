//! Midway language packs
//!
//! Goals:
//! - Id-keyed catalogs of format strings with a YAML mapping shape (and a
//!   legacy `id = value` fallback)
//! - A process-wide language/locale state with runtime switching
//! - Convenience entry points combining pack lookup, legacy argument
//!   decoding, and rendering via `midway_format`

mod catalog;
mod state;

use thiserror::Error;

pub use catalog::{CatalogParseError, LanguagePack};
pub use state::{format_string, LangState};

// The engine types callers need alongside the pack.
pub use midway_format::{
    fmt_args, ArgBuffer, Argument, Arguments, Error as FormatEngineError, FmtString, LocaleConfig,
    Renderer, StringId, StringSource,
};

#[derive(Debug, Error)]
pub enum LangError {
    #[error(transparent)]
    CatalogParse(#[from] CatalogParseError),
}
