//! Language-pack catalogs.
//!
//! A pack maps numeric string ids to format strings. The on-disk shape is a
//! YAML mapping (preferred) or the legacy line format:
//! - One entry per line: `id = value`
//! - Ids: decimal or `0x` hex
//! - Comments: `# ...` or `// ...`
//! - Optional quoting: `"..."` or `'...'` (supports a few escapes)

use rustc_hash::FxHashMap;
use thiserror::Error;

use midway_format::{StringId, StringSource};

const MAX_PACK_ENTRIES: usize = 10_000;
const MAX_VALUE_BYTES: usize = 16 * 1024;

fn parse_id(key: &str) -> Option<StringId> {
    let key = key.trim();
    if let Some(hex) = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        StringId::from_str_radix(hex, 16).ok()
    } else {
        key.parse::<StringId>().ok()
    }
}

fn looks_like_yaml_mapping(src: &str) -> bool {
    for raw in src.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        // YAML entries separate id and value with `:`; the legacy format
        // uses `=`. Whichever appears first on the first real line decides.
        if let Some(colon) = line.find(':') {
            match line.find('=') {
                Some(eq) if eq < colon => {}
                _ => return true,
            }
        }
        if line.contains('=') {
            return false;
        }
    }
    false
}

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("catalog syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },
}

fn try_parse_yaml(src: &str) -> Result<Option<FxHashMap<StringId, String>>, CatalogParseError> {
    match serde_yaml::from_str::<serde_yaml::Value>(src) {
        Ok(serde_yaml::Value::Mapping(raw)) => {
            if raw.len() > MAX_PACK_ENTRIES {
                return Err(CatalogParseError::Yaml(format!(
                    "too many entries (max {MAX_PACK_ENTRIES})"
                )));
            }
            let mut out = FxHashMap::default();
            out.reserve(raw.len());
            for (k, v) in raw {
                let id = match &k {
                    serde_yaml::Value::Number(n) => n
                        .as_u64()
                        .and_then(|n| StringId::try_from(n).ok()),
                    serde_yaml::Value::String(s) => parse_id(s),
                    _ => None,
                };
                let Some(id) = id else {
                    return Err(CatalogParseError::Yaml(format!(
                        "key {k:?} is not a string id (expected decimal or 0x hex, 0..=65535)"
                    )));
                };
                let Some(value) = v.as_str() else {
                    return Err(CatalogParseError::Yaml(format!(
                        "value for id {id} must be a string"
                    )));
                };
                if value.len() > MAX_VALUE_BYTES {
                    return Err(CatalogParseError::Yaml(format!(
                        "value for id {id} is too long (max {MAX_VALUE_BYTES} bytes)"
                    )));
                }
                out.insert(id, value.to_string());
            }
            Ok(Some(out))
        }
        Ok(_) => Ok(None),
        Err(e) => Err(CatalogParseError::Yaml(format!("yaml parse error: {e}"))),
    }
}

fn unquote_and_unescape(s: &str) -> Result<String, String> {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        return unescape(&s[1..s.len() - 1]);
    }
    Ok(s.to_string())
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(n) = it.next() else {
            return Err("dangling escape".to_string());
        };
        match n {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            // Keep unknown escapes as-is.
            _ => out.push(n),
        }
    }
    Ok(out)
}

/// An id-keyed catalog of format strings for one language.
#[derive(Clone, Debug, Default)]
pub struct LanguagePack {
    entries: FxHashMap<StringId, String>,
}

impl LanguagePack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: StringId, value: impl Into<String>) {
        self.entries.insert(id, value.into());
    }

    pub fn get(&self, id: StringId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a YAML mapping (preferred) or the legacy `id = value` format.
    pub fn parse(src: &str) -> Result<Self, CatalogParseError> {
        if looks_like_yaml_mapping(src) {
            if let Some(entries) = try_parse_yaml(src)? {
                return Ok(Self { entries });
            }
        }

        let mut pack = Self::new();
        for (idx, raw_line) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }

            let Some(eq) = line.find('=') else {
                return Err(CatalogParseError::Syntax {
                    line: line_no,
                    msg: "expected `id = value`".to_string(),
                });
            };

            let key = line[..eq].trim();
            let Some(id) = parse_id(key) else {
                return Err(CatalogParseError::Syntax {
                    line: line_no,
                    msg: format!("invalid id `{key}` (expected decimal or 0x hex, 0..=65535)"),
                });
            };

            let mut value = line[eq + 1..].trim().to_string();

            // Strip inline comments (only if preceded by whitespace).
            if let Some(pos) = value.find(" #") {
                value.truncate(pos);
            }
            if let Some(pos) = value.find(" //") {
                value.truncate(pos);
            }

            let value = unquote_and_unescape(value.trim()).map_err(|msg| {
                CatalogParseError::Syntax { line: line_no, msg }
            })?;

            if value.len() > MAX_VALUE_BYTES {
                return Err(CatalogParseError::Syntax {
                    line: line_no,
                    msg: format!("value for id {id} is too long (max {MAX_VALUE_BYTES} bytes)"),
                });
            }
            if pack.entries.len() >= MAX_PACK_ENTRIES && !pack.entries.contains_key(&id) {
                return Err(CatalogParseError::Syntax {
                    line: line_no,
                    msg: format!("too many entries (max {MAX_PACK_ENTRIES})"),
                });
            }

            pack.insert(id, value);
        }
        Ok(pack)
    }
}

impl StringSource for LanguagePack {
    fn lookup(&self, id: StringId) -> Option<&str> {
        self.get(id)
    }
}

impl FromIterator<(StringId, String)> for LanguagePack {
    fn from_iter<T: IntoIterator<Item = (StringId, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_yaml_pack() {
        let src = r#"
1: "Guests: {COMMA16}"
0x0A: "Cost: {CURRENCY2DP}"
"#;
        let pack = LanguagePack::parse(src).unwrap();
        assert_eq!(pack.get(1), Some("Guests: {COMMA16}"));
        assert_eq!(pack.get(10), Some("Cost: {CURRENCY2DP}"));
        assert_eq!(pack.get(2), None);
    }

    #[test]
    fn parse_legacy_lines() {
        let src = r#"
        # park strings
        1 = Guests: {COMMA16}
        2 = "Welcome to {STRING}!"  # inline comment
        0x10 = 'quoted \'value\''
        "#;
        let pack = LanguagePack::parse(src).unwrap();
        assert_eq!(pack.get(1), Some("Guests: {COMMA16}"));
        assert_eq!(pack.get(2), Some("Welcome to {STRING}!"));
        assert_eq!(pack.get(0x10), Some("quoted 'value'"));
    }

    #[test]
    fn escapes_expand_in_quoted_values() {
        let pack = LanguagePack::parse("1 = \"line\\nbreak\"").unwrap();
        assert_eq!(pack.get(1), Some("line\nbreak"));
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        let err = LanguagePack::parse("title = nope").unwrap_err();
        assert!(matches!(err, CatalogParseError::Syntax { line: 1, .. }));

        let err = LanguagePack::parse("title: nope").unwrap_err();
        assert!(matches!(err, CatalogParseError::Yaml(_)));
    }

    #[test]
    fn yaml_requires_string_values() {
        let err = LanguagePack::parse("1: 456").unwrap_err();
        assert!(matches!(err, CatalogParseError::Yaml(_)));
    }

    #[test]
    fn string_source_lookup() {
        let pack = LanguagePack::parse("7 = seven").unwrap();
        assert_eq!(StringSource::lookup(&pack, 7), Some("seven"));
        assert_eq!(StringSource::lookup(&pack, 8), None);
    }
}
