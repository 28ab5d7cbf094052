//! Token vocabulary for the format-string mini-language.
//!
//! A format string is plain text interleaved with `{NAME}` control tokens,
//! `{{`/`}}` brace escapes and raw newline characters. Each token is an
//! immutable view over the source text; concatenating `raw` in stream order
//! reconstructs the source exactly.

/// Numeric key into the loaded language pack.
pub type StringId = u16;

/// Sentinel id that renders as empty text.
pub const STR_NONE: StringId = 0xFFFF;

/// Reserved id range resolving to the built-in name tables instead of the
/// language pack.
pub const REAL_NAME_START: StringId = 0xA000;
pub const REAL_NAME_END: StringId = 0xDFFF;

/// Index into the name tables for a real-name id, or `None` for ordinary ids.
pub fn real_name_index(id: StringId) -> Option<u16> {
    if (REAL_NAME_START..=REAL_NAME_END).contains(&id) {
        Some(id - REAL_NAME_START)
    } else {
        None
    }
}

/// Classification of one span of a format string.
///
/// The kind, never the argument's tag, selects the rendering rule; several
/// kinds consume the same argument representation (`Comma32` and `Int32` both
/// take a 32-bit value, one grouped and one plain).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Verbatim text between control tokens.
    Literal,
    /// A raw `\n` or `\r` character, kept as literal content.
    Newline,
    /// `{{` or `}}`, rendering the single escaped brace.
    Escaped,
    /// `{MOVE_X}{n}` - horizontal cursor move, consumed by the glyph layer.
    Move,
    /// `{INLINE_SPRITE}{a}{b}{c}{d}` - inline image, consumed by the glyph
    /// layer. The four byte literals pack little-endian into `param`.
    InlineSprite,
    /// `{STRINGID}` - consumes an id argument and expands that string.
    StringId,
    /// `{PUSH16}` - legacy cursor rewind, no visible output.
    Push16,
    /// `{POP16}` - legacy cursor skip, no visible output.
    Pop16,
    /// `{COMMA32}` - grouped 32-bit integer.
    Comma32,
    /// `{INT32}` - plain 32-bit integer.
    Int32,
    /// `{COMMA2DP32}` - grouped fixed-point, two decimal places.
    Comma2dp32,
    /// `{COMMA16}` - grouped 16-bit integer.
    Comma16,
    /// `{UINT16}` - plain unsigned 16-bit integer.
    UInt16,
    /// `{COMMA1DP16}` - grouped fixed-point, one decimal place.
    Comma1dp16,
    /// `{CURRENCY}` - whole-unit currency amount.
    Currency,
    /// `{CURRENCY2DP}` - currency amount with minor units.
    Currency2dp,
    /// `{VELOCITY}` - speed in the configured measurement system.
    Velocity,
    /// `{LENGTH}` - length in the configured measurement system.
    Length,
    /// `{DURATION}` - minutes and seconds.
    Duration,
    /// `{REALTIME}` - hours and minutes.
    Realtime,
    /// `{MONTHYEAR}` - calendar month name plus year.
    MonthYear,
    /// `{MONTH}` - calendar month name.
    Month,
    /// `{STRING}` - caller-supplied text.
    String,
    /// `{SPRITE}` - image index argument, no text output.
    Sprite,
    /// `{REALNAME}` - procedurally selected name/initial pair.
    RealName,
    /// Unrecognized `{...}` name; renders nothing, consumes nothing.
    Unknown,
}

impl Kind {
    /// Map a token name (the text between braces) to its kind.
    pub fn from_name(name: &str) -> Kind {
        match name {
            "MOVE_X" => Kind::Move,
            "INLINE_SPRITE" => Kind::InlineSprite,
            "STRINGID" | "STRINGID2" => Kind::StringId,
            "PUSH16" => Kind::Push16,
            "POP16" => Kind::Pop16,
            "COMMA32" => Kind::Comma32,
            "INT32" => Kind::Int32,
            "COMMA2DP32" => Kind::Comma2dp32,
            "COMMA16" => Kind::Comma16,
            "UINT16" => Kind::UInt16,
            "COMMA1DP16" => Kind::Comma1dp16,
            "CURRENCY" => Kind::Currency,
            "CURRENCY2DP" => Kind::Currency2dp,
            "VELOCITY" => Kind::Velocity,
            "LENGTH" => Kind::Length,
            "DURATION" => Kind::Duration,
            "REALTIME" => Kind::Realtime,
            "MONTHYEAR" => Kind::MonthYear,
            "MONTH" => Kind::Month,
            "STRING" => Kind::String,
            "SPRITE" => Kind::Sprite,
            "REALNAME" => Kind::RealName,
            _ => Kind::Unknown,
        }
    }

    /// Number of trailing `{n}` integer literals the tokenizer consumes as
    /// inline parameters.
    pub(crate) fn inline_params(self) -> usize {
        match self {
            Kind::Move => 1,
            Kind::InlineSprite => 4,
            _ => 0,
        }
    }

    /// Bytes this kind reads from a legacy argument buffer.
    ///
    /// `StringId` and `String` are special-cased by the decoder (the id
    /// triggers recursion, the text handle resolves against the attached
    /// table); their widths here describe the raw read only.
    pub fn legacy_width(self) -> usize {
        match self {
            Kind::Comma32 | Kind::Int32 | Kind::Comma2dp32 | Kind::Sprite => 4,
            Kind::Currency | Kind::Currency2dp | Kind::String => 8,
            Kind::Comma16
            | Kind::UInt16
            | Kind::Comma1dp16
            | Kind::Velocity
            | Kind::Length
            | Kind::Duration
            | Kind::Realtime
            | Kind::MonthYear
            | Kind::Month
            | Kind::RealName
            | Kind::StringId => 2,
            _ => 0,
        }
    }
}

/// One classified, positionally located fragment of a format string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: Kind,
    /// The exact source span this token covers, inline parameters included.
    pub raw: &'a str,
    /// Packed inline parameter for `Move` and `InlineSprite`.
    pub param: Option<u32>,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: Kind, raw: &'a str) -> Self {
        Self {
            kind,
            raw,
            param: None,
        }
    }
}
