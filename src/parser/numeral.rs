//! Dotted section numerals such as `2.1.3`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A section numeral: a dotted sequence of integers.
///
/// Ordering is lexicographic on the integer tuple, so `2 < 2.1 < 2.2 < 3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeral(Vec<u32>);

impl Numeral {
    /// Create a numeral from its components.
    ///
    /// Returns `None` for an empty component list.
    pub fn new(parts: Vec<u32>) -> Option<Self> {
        if parts.is_empty() {
            None
        } else {
            Some(Self(parts))
        }
    }

    /// Numeral components.
    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Nesting depth (1 for top-level sections).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Top-level component.
    pub fn top(&self) -> u32 {
        self.0[0]
    }
}

impl FromStr for Numeral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().trim_end_matches('.');
        let parts = s
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidNumeral(s.to_string()))?;
        Numeral::new(parts).ok_or_else(|| Error::InvalidNumeral(s.to_string()))
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> Numeral {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(n("2.1.3").parts(), &[2, 1, 3]);
        assert_eq!(n("2.1.3").to_string(), "2.1.3");
        assert_eq!(n("4.").to_string(), "4");
        assert_eq!(n("2.1").depth(), 2);
        assert_eq!(n("2.1").top(), 2);
    }

    #[test]
    fn test_invalid_numerals() {
        assert!("".parse::<Numeral>().is_err());
        assert!("1..2".parse::<Numeral>().is_err());
        assert!("1.a".parse::<Numeral>().is_err());
        assert!("99999999999".parse::<Numeral>().is_err());
        assert!(Numeral::new(vec![]).is_none());
    }

    #[test]
    fn test_tuple_ordering() {
        let mut numerals = vec![n("3"), n("2.1"), n("10"), n("2"), n("2.10"), n("2.2")];
        numerals.sort();
        let rendered: Vec<_> = numerals.iter().map(Numeral::to_string).collect();
        assert_eq!(rendered, vec!["2", "2.1", "2.2", "2.10", "3", "10"]);
    }
}
