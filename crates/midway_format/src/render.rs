//! Token-stream rendering.
//!
//! The renderer walks a format string's tokens against one shared argument
//! index, appending final text. String-id tokens expand recursively via the
//! [`StringSource`] seam using the *same* argument list and index, so
//! arguments are consumed depth-first, left-to-right across the whole
//! expansion tree. Soft conditions (unknown tokens, argument underflow,
//! kind/tag mismatch) render nothing and are never fatal; only runaway
//! recursion is an error.

use thiserror::Error;
use tracing::{debug, warn};

use crate::arg::{Argument, Arguments};
use crate::fmt::FmtString;
use crate::legacy::{decode_args, ArgBuffer, DecodeError};
use crate::locale::{
    date_month, date_year, metres_to_feet, mph_to_dmps, mph_to_kmph, LocaleConfig,
    MeasurementSystem,
};
use crate::names::append_real_name;
use crate::num::{append_currency, append_number};
use crate::token::{real_name_index, Kind, StringId, STR_NONE};
use crate::MAX_STRING_DEPTH;

/// Resolves a string id to its format string.
///
/// Implemented by the language pack; plain hash maps work for tests and
/// small embedders.
pub trait StringSource {
    fn lookup(&self, id: StringId) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> StringSource for std::collections::HashMap<StringId, String, S> {
    fn lookup(&self, id: StringId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl<T: StringSource + ?Sized> StringSource for &T {
    fn lookup(&self, id: StringId) -> Option<&str> {
        (**self).lookup(id)
    }
}

/// Render failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("string expansion exceeded {MAX_STRING_DEPTH} nested references")]
    DepthExceeded,
}

/// Combined failure for decode-and-render operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Renders format strings under one string source and locale configuration.
///
/// A renderer is a pair of borrows and is free to construct per call; the
/// shared resources it reads are never mutated during a render.
pub struct Renderer<'a, S: StringSource + ?Sized> {
    strings: &'a S,
    locale: &'a LocaleConfig,
}

impl<'a, S: StringSource + ?Sized> Renderer<'a, S> {
    pub fn new(strings: &'a S, locale: &'a LocaleConfig) -> Self {
        Self { strings, locale }
    }

    /// Render to an owned string.
    pub fn render(&self, fmt: &FmtString<'_>, args: &Arguments) -> Result<String, FormatError> {
        let mut out = String::new();
        self.render_to(&mut out, fmt, args)?;
        Ok(out)
    }

    /// Render appending into a caller-owned scratch buffer.
    ///
    /// Reusing one buffer per calling thread keeps the steady state free of
    /// allocation without any hidden thread-local state.
    pub fn render_to(
        &self,
        out: &mut String,
        fmt: &FmtString<'_>,
        args: &Arguments,
    ) -> Result<(), FormatError> {
        let mut index = 0;
        self.walk(out, fmt, args, &mut index, 0)
    }

    /// Resolve a string id and render it. Unresolvable ids render as empty
    /// text; real-name ids render from the fixed tables.
    pub fn render_id(&self, id: StringId, args: &Arguments) -> Result<String, FormatError> {
        let mut out = String::new();
        let mut index = 0;
        self.append_string_id(&mut out, id, args, &mut index, 0)?;
        Ok(out)
    }

    /// Bounded render: writes at most `dest.len()` bytes including a NUL
    /// terminator, truncating on a UTF-8 boundary, and returns the
    /// untruncated logical byte length.
    pub fn render_into(
        &self,
        dest: &mut [u8],
        fmt: &FmtString<'_>,
        args: &Arguments,
    ) -> Result<usize, FormatError> {
        let text = self.render(fmt, args)?;
        let logical = text.len();
        if dest.is_empty() {
            return Ok(logical);
        }

        let mut end = logical.min(dest.len() - 1);
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        dest[..end].copy_from_slice(&text.as_bytes()[..end]);
        dest[end] = 0;
        if end < logical {
            debug!(logical, copied = end, "truncated bounded render");
        }
        Ok(logical)
    }

    /// Decode a legacy argument buffer for `id` and render the result in one
    /// call.
    pub fn render_legacy(&self, id: StringId, cursor: &mut ArgBuffer<'_>) -> Result<String, Error> {
        if id == STR_NONE {
            return Ok(String::new());
        }
        if let Some(index) = real_name_index(id) {
            let mut out = String::new();
            append_real_name(&mut out, index);
            return Ok(out);
        }
        match self.strings.lookup(id) {
            Some(text) => {
                let fmt = FmtString::new(text);
                let args = decode_args(&fmt, cursor, self.strings)?;
                Ok(self.render(&fmt, &args)?)
            }
            None => Ok(String::new()),
        }
    }

    fn walk(
        &self,
        out: &mut String,
        fmt: &FmtString<'_>,
        args: &Arguments,
        index: &mut usize,
        depth: usize,
    ) -> Result<(), FormatError> {
        if depth > MAX_STRING_DEPTH {
            warn!(depth, "aborting string expansion; reference cycle likely");
            return Err(FormatError::DepthExceeded);
        }

        for token in fmt.tokens() {
            match token.kind {
                Kind::Literal | Kind::Newline => out.push_str(token.raw),
                Kind::Escaped => out.push_str(&token.raw[..1]),
                // Positioning and inline images pass through for the glyph
                // renderer, raw text unchanged.
                Kind::Move | Kind::InlineSprite => out.push_str(token.raw),
                Kind::Push16 | Kind::Pop16 | Kind::Unknown => {}
                Kind::StringId => {
                    if let Some(&Argument::U16(id)) = take(args, index) {
                        self.append_string_id(out, id, args, index, depth)?;
                    }
                }
                Kind::RealName => {
                    if let Some(&Argument::U16(table_index)) = take(args, index) {
                        append_real_name(out, table_index);
                    }
                }
                Kind::String => {
                    if let Some(Argument::Text(text)) = take(args, index) {
                        out.push_str(text);
                    }
                }
                // The image index is the glyph renderer's concern; text
                // output carries nothing for it.
                Kind::Sprite => {
                    take(args, index);
                }
                Kind::Comma32 => {
                    if let Some(&Argument::I32(v)) = take(args, index) {
                        append_number(out, v as i64, 0, true, self.locale);
                    }
                }
                Kind::Int32 => {
                    if let Some(&Argument::I32(v)) = take(args, index) {
                        append_number(out, v as i64, 0, false, self.locale);
                    }
                }
                Kind::Comma2dp32 => {
                    if let Some(&Argument::I32(v)) = take(args, index) {
                        append_number(out, v as i64, 2, true, self.locale);
                    }
                }
                Kind::Comma16 => {
                    if let Some(&Argument::U16(v)) = take(args, index) {
                        append_number(out, (v as i16) as i64, 0, true, self.locale);
                    }
                }
                Kind::UInt16 => {
                    if let Some(&Argument::U16(v)) = take(args, index) {
                        append_number(out, v as i64, 0, false, self.locale);
                    }
                }
                Kind::Comma1dp16 => {
                    if let Some(&Argument::U16(v)) = take(args, index) {
                        append_number(out, (v as i16) as i64, 1, true, self.locale);
                    }
                }
                Kind::Currency => {
                    if let Some(&Argument::I64(v)) = take(args, index) {
                        append_currency(out, v, false, self.locale);
                    }
                }
                Kind::Currency2dp => {
                    if let Some(&Argument::I64(v)) = take(args, index) {
                        append_currency(out, v, true, self.locale);
                    }
                }
                Kind::Velocity => {
                    if let Some(&Argument::U16(mph)) = take(args, index) {
                        self.append_velocity(out, mph, depth)?;
                    }
                }
                Kind::Length => {
                    if let Some(&Argument::U16(raw)) = take(args, index) {
                        self.append_length(out, raw as i16, depth)?;
                    }
                }
                Kind::Duration => {
                    if let Some(&Argument::U16(seconds)) = take(args, index) {
                        self.append_duration(out, seconds, depth)?;
                    }
                }
                Kind::Realtime => {
                    if let Some(&Argument::U16(minutes)) = take(args, index) {
                        self.append_realtime(out, minutes, depth)?;
                    }
                }
                Kind::MonthYear => {
                    if let Some(&Argument::U16(date)) = take(args, index) {
                        let mut sub = Arguments::new();
                        sub.push(date_month(date));
                        sub.push(date_year(date));
                        self.render_template(out, &self.locale.month_year, &sub, depth)?;
                    }
                }
                Kind::Month => {
                    if let Some(&Argument::U16(date)) = take(args, index) {
                        out.push_str(&self.locale.month_names[date_month(date) as usize]);
                    }
                }
            }
        }
        Ok(())
    }

    fn append_string_id(
        &self,
        out: &mut String,
        id: StringId,
        args: &Arguments,
        index: &mut usize,
        depth: usize,
    ) -> Result<(), FormatError> {
        if id == STR_NONE {
            return Ok(());
        }
        if let Some(table_index) = real_name_index(id) {
            append_real_name(out, table_index);
            return Ok(());
        }
        if let Some(text) = self.strings.lookup(id) {
            let nested = FmtString::new(text);
            self.walk(out, &nested, args, index, depth + 1)?;
        }
        Ok(())
    }

    fn render_template(
        &self,
        out: &mut String,
        template: &str,
        args: &Arguments,
        depth: usize,
    ) -> Result<(), FormatError> {
        let fmt = FmtString::new(template);
        let mut index = 0;
        self.walk(out, &fmt, args, &mut index, depth + 1)
    }

    fn append_velocity(&self, out: &mut String, mph: u16, depth: usize) -> Result<(), FormatError> {
        let (template, value) = match self.locale.measurement {
            MeasurementSystem::Imperial => (&self.locale.velocity_mph, mph),
            MeasurementSystem::Metric => (&self.locale.velocity_kmph, mph_to_kmph(mph)),
            MeasurementSystem::Si => (&self.locale.velocity_mps, mph_to_dmps(mph)),
        };
        let mut sub = Arguments::new();
        sub.push(value);
        self.render_template(out, template, &sub, depth)
    }

    fn append_length(
        &self,
        out: &mut String,
        metres: i16,
        depth: usize,
    ) -> Result<(), FormatError> {
        let (template, value) = match self.locale.measurement {
            MeasurementSystem::Imperial => (&self.locale.length_feet, metres_to_feet(metres)),
            MeasurementSystem::Metric | MeasurementSystem::Si => {
                (&self.locale.length_metres, metres)
            }
        };
        let mut sub = Arguments::new();
        sub.push(value);
        self.render_template(out, template, &sub, depth)
    }

    fn append_duration(
        &self,
        out: &mut String,
        total_seconds: u16,
        depth: usize,
    ) -> Result<(), FormatError> {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        let minute_index = match minutes {
            0 => 0,
            1 => 1,
            _ => 2,
        };
        let second_plural = usize::from(seconds != 1);

        let mut sub = Arguments::new();
        if minutes > 0 {
            sub.push(minutes);
        }
        sub.push(seconds);

        self.render_template(out, &self.locale.duration[minute_index][second_plural], &sub, depth)
    }

    fn append_realtime(
        &self,
        out: &mut String,
        total_minutes: u16,
        depth: usize,
    ) -> Result<(), FormatError> {
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;

        let hour_index = match hours {
            0 => 0,
            1 => 1,
            _ => 2,
        };
        let minute_plural = usize::from(minutes != 1);

        let mut sub = Arguments::new();
        if hours > 0 {
            sub.push(hours);
        }
        sub.push(minutes);

        self.render_template(out, &self.locale.realtime[hour_index][minute_plural], &sub, depth)
    }
}

/// Pull the next argument, advancing the shared index even when the list has
/// run out - under-supply skips the token but keeps later positions stable.
fn take<'x>(args: &'x Arguments, index: &mut usize) -> Option<&'x Argument> {
    let arg = args.get(*index);
    *index += 1;
    arg
}
