//! Format-string tokenizer.
//!
//! `FmtString` wraps a borrowed span of source text; `tokens()` yields a
//! lazy, restartable token stream. Tokenization never fails: malformed input
//! degrades to literal or best-effort tokens so that concatenating every
//! token's raw text always reproduces the source.

use crate::token::{Kind, Token};

/// A named, immutable format string producing a token sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FmtString<'a> {
    text: &'a str,
}

impl<'a> FmtString<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Start (or restart) tokenization from the beginning of the text.
    pub fn tokens(&self) -> Tokens<'a> {
        Tokens {
            text: self.text,
            pos: 0,
        }
    }
}

impl<'a> From<&'a str> for FmtString<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

/// Lazy token iterator over a format string.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Consume a `{n}` integer literal at `pos`, returning the value and the
    /// position past the closing brace.
    fn scan_int_literal(&self, pos: usize) -> Option<(u32, usize)> {
        let bytes = self.text.as_bytes();
        if bytes.get(pos) != Some(&b'{') {
            return None;
        }
        let mut end = pos + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == pos + 1 || bytes.get(end) != Some(&b'}') {
            return None;
        }
        let value = self.text[pos + 1..end].parse::<u32>().ok()?;
        Some((value, end + 1))
    }

    /// Tokenize a `{...}` control sequence starting at `pos` (which holds a
    /// `{` not followed by another `{`).
    fn scan_control(&mut self, start: usize) -> Token<'a> {
        let close = match self.text[start + 1..].find('}') {
            Some(off) => start + 1 + off,
            None => {
                // Unterminated sequence: classify what we have and emit the
                // rest of the text as one best-effort token.
                let kind = Kind::from_name(&self.text[start + 1..]);
                self.pos = self.text.len();
                return Token::new(kind, &self.text[start..]);
            }
        };

        let name = &self.text[start + 1..close];
        let kind = Kind::from_name(name);
        let mut end = close + 1;

        let mut param = None;
        let wanted = kind.inline_params();
        if wanted > 0 {
            // MOVE_X takes one trailing {n}; INLINE_SPRITE takes four,
            // packed little-endian (first literal = byte 0).
            let mut packed = 0u32;
            for i in 0..wanted {
                let Some((value, next)) = self.scan_int_literal(end) else {
                    break;
                };
                if wanted == 1 {
                    packed = value;
                } else {
                    packed |= (value & 0xFF) << (8 * i as u32);
                }
                end = next;
            }
            param = Some(packed);
        }

        self.pos = end;
        Token {
            kind,
            raw: &self.text[start..end],
            param,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        match bytes[start] {
            b'\n' | b'\r' => {
                self.pos = start + 1;
                Some(Token::new(Kind::Newline, &self.text[start..start + 1]))
            }
            b'{' if bytes.get(start + 1) == Some(&b'{') => {
                self.pos = start + 2;
                Some(Token::new(Kind::Escaped, &self.text[start..start + 2]))
            }
            b'}' if bytes.get(start + 1) == Some(&b'}') => {
                self.pos = start + 2;
                Some(Token::new(Kind::Escaped, &self.text[start..start + 2]))
            }
            b'{' => Some(self.scan_control(start)),
            b'}' => {
                // A stray closing brace is plain text.
                self.pos = start + 1;
                Some(Token::new(Kind::Literal, &self.text[start..start + 1]))
            }
            _ => {
                let mut end = start + 1;
                while end < bytes.len() && !matches!(bytes[end], b'{' | b'}' | b'\n' | b'\r') {
                    end += 1;
                }
                self.pos = end;
                Some(Token::new(Kind::Literal, &self.text[start..end]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<Kind> {
        FmtString::new(text).tokens().map(|t| t.kind).collect()
    }

    #[test]
    fn raw_text_reconstructs_source() {
        let samples = [
            "",
            "plain text",
            "Guests: {COMMA16}",
            "{{literal}} braces }}{{",
            "line one\nline two\rline three",
            "{MOVE_X}{12}indent",
            "{INLINE_SPRITE}{1}{2}{3}{4}",
            "{STRINGID} of {STRINGID}",
            "unterminated {COMMA1",
            "stray } brace",
            "{UNKNOWN_CODE} tail",
            "mixed {CURRENCY2DP}\n{{x}} {MOVE_X}{7}{POP16}",
            "unicode héllo {COMMA32} themê",
        ];
        for src in samples {
            let rebuilt: String = FmtString::new(src).tokens().map(|t| t.raw).collect();
            assert_eq!(rebuilt, src, "roundtrip failed for {src:?}");
        }
    }

    #[test]
    fn classifies_basic_stream() {
        assert_eq!(
            kinds("Guests: {COMMA16}\n{{ok}}"),
            vec![
                Kind::Literal,
                Kind::Comma16,
                Kind::Newline,
                Kind::Escaped,
                Kind::Literal,
                Kind::Escaped,
            ]
        );
    }

    #[test]
    fn tokenizer_is_restartable() {
        let fmt = FmtString::new("a{COMMA32}b");
        let first: Vec<_> = fmt.tokens().collect();
        let second: Vec<_> = fmt.tokens().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn move_takes_one_parameter() {
        let toks: Vec<_> = FmtString::new("{MOVE_X}{24}rest").tokens().collect();
        assert_eq!(toks[0].kind, Kind::Move);
        assert_eq!(toks[0].raw, "{MOVE_X}{24}");
        assert_eq!(toks[0].param, Some(24));
        assert_eq!(toks[1].raw, "rest");
    }

    #[test]
    fn inline_sprite_packs_four_bytes_little_endian() {
        let toks: Vec<_> = FmtString::new("{INLINE_SPRITE}{1}{2}{3}{4}").tokens().collect();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, Kind::InlineSprite);
        assert_eq!(toks[0].param, Some(0x04030201));
    }

    #[test]
    fn inline_sprite_partial_parameters() {
        // Missing trailing literals stop consumption; collected bytes keep
        // their positions.
        let toks: Vec<_> = FmtString::new("{INLINE_SPRITE}{9}{8}x").tokens().collect();
        assert_eq!(toks[0].raw, "{INLINE_SPRITE}{9}{8}");
        assert_eq!(toks[0].param, Some(0x0809));
        assert_eq!(toks[1].kind, Kind::Literal);
    }

    #[test]
    fn move_without_parameter_keeps_raw_short() {
        let toks: Vec<_> = FmtString::new("{MOVE_X}next").tokens().collect();
        assert_eq!(toks[0].raw, "{MOVE_X}");
        assert_eq!(toks[0].param, Some(0));
    }

    #[test]
    fn unterminated_control_is_best_effort() {
        // A trailing name with no closing brace still classifies.
        let toks: Vec<_> = FmtString::new("end {COMMA16").tokens().collect();
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1].raw, "{COMMA16");
        assert_eq!(toks[1].kind, Kind::Comma16);

        let toks: Vec<_> = FmtString::new("end {COMMA1").tokens().collect();
        assert_eq!(toks[1].kind, Kind::Unknown);
    }

    #[test]
    fn unknown_names_are_preserved() {
        let toks: Vec<_> = FmtString::new("{BIGFONT}hello").tokens().collect();
        assert_eq!(toks[0].kind, Kind::Unknown);
        assert_eq!(toks[0].raw, "{BIGFONT}");
    }

    #[test]
    fn empty_string_yields_no_tokens() {
        assert_eq!(FmtString::new("").tokens().count(), 0);
    }
}
