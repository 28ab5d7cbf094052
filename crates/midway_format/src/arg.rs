//! Typed render arguments.
//!
//! A closed sum over the four representations the engine ever consumes.
//! Distinct token kinds may share one representation; the kind alone decides
//! how the value is rendered.

use smallvec::SmallVec;

/// One typed render argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    U16(u16),
    I32(i32),
    I64(i64),
    Text(String),
}

impl From<u16> for Argument {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<i16> for Argument {
    fn from(v: i16) -> Self {
        Self::U16(v as u16)
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// An ordered argument list, consumed left to right across the whole
/// expansion tree of a render.
///
/// Argument lists are almost always tiny; the inline capacity keeps the
/// steady state allocation-free.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    items: SmallVec<[Argument; 8]>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: impl Into<Argument>) {
        self.items.push(arg.into());
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.items.iter()
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<T: IntoIterator<Item = Argument>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Build an [`Arguments`] list from values convertible into [`Argument`].
///
/// Examples:
/// - `fmt_args![]`
/// - `fmt_args![1234i32, "Dinghy Slide", 65u16]`
#[macro_export]
macro_rules! fmt_args {
    () => { $crate::Arguments::new() };
    ($($value:expr),+ $(,)?) => {{
        let mut args = $crate::Arguments::new();
        $( args.push($crate::Argument::from($value)); )+
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_conversions() {
        assert_eq!(Argument::from(5u16), Argument::U16(5));
        assert_eq!(Argument::from(-1i16), Argument::U16(0xFFFF));
        assert_eq!(Argument::from(-7i32), Argument::I32(-7));
        assert_eq!(Argument::from(9i64), Argument::I64(9));
        assert_eq!(Argument::from("hi"), Argument::Text("hi".to_string()));
    }

    #[test]
    fn macro_builds_in_order() {
        let args = fmt_args![3u16, "x", -2i32];
        assert_eq!(args.len(), 3);
        assert_eq!(args.get(0), Some(&Argument::U16(3)));
        assert_eq!(args.get(1), Some(&Argument::Text("x".to_string())));
        assert_eq!(args.get(2), Some(&Argument::I32(-2)));
        assert_eq!(args.get(3), None);
    }
}
