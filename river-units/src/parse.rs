//! Text forms built on top of unit strings: "ft->in" and "5 ft"

use crate::error::ParseError;
use crate::{Quantity, Unit};

const CONVERSION_FORM: &str = "a conversion of the form 'unit->unit'";

fn malformed(text: &str, expected: &'static str) -> ParseError {
    ParseError::Malformed { text: text.to_string(), expected }
}

/// Parse a conversion specification like "ft->in", "ft→in" or "ft to in"
pub fn parse_conversion(s: &str) -> Result<(Unit, Unit), ParseError> {
    let s = s.trim();

    let parts: Vec<&str> = if s.contains("->") {
        s.split("->").collect()
    } else if s.contains('→') {
        s.split('→').collect()
    } else if s.contains(" to ") {
        s.split(" to ").collect()
    } else {
        return Err(malformed(s, CONVERSION_FORM));
    };

    if parts.len() != 2 {
        return Err(malformed(s, CONVERSION_FORM));
    }

    let from = Unit::from_string(parts[0].trim())?;
    let to = Unit::from_string(parts[1].trim())?;

    Ok((from, to))
}

/// Parse a quantity string like "5 ft", "100kg" or "-3.5e2 M/s"
///
/// A missing unit means unitless.
pub fn parse_quantity(s: &str) -> Result<Quantity, ParseError> {
    let s = s.trim();

    let mut split_pos = 0;
    let mut prev = None;
    for (i, c) in s.char_indices() {
        let numeric = c.is_ascii_digit()
            || c == '.'
            || ((c == '-' || c == '+') && matches!(prev, None | Some('e') | Some('E')))
            || ((c == 'e' || c == 'E') && matches!(prev, Some(p) if p.is_ascii_digit() || p == '.'));
        if !numeric {
            break;
        }
        split_pos = i + c.len_utf8();
        prev = Some(c);
    }

    let num_str = &s[..split_pos];
    let unit_str = s[split_pos..].trim();

    let value: f64 = num_str
        .parse()
        .map_err(|_| malformed(s, "a number followed by a unit"))?;

    let unit = if unit_str.is_empty() {
        Unit::default()
    } else {
        Unit::from_string(unit_str)?
    };

    Ok(Quantity::new(value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversion() {
        let (from, to) = parse_conversion("ft->in").unwrap();
        assert_eq!(from.name(), "ft");
        assert_eq!(to.name(), "in");
    }

    #[test]
    fn test_parse_conversion_arrow_and_words() {
        let (from, to) = parse_conversion("M/s → ft/s").unwrap();
        assert_eq!(from.name(), "M/s");
        assert_eq!(to.name(), "ft/s");

        let (from, to) = parse_conversion("kg to lbm").unwrap();
        assert_eq!(from.name(), "kg");
        assert_eq!(to.name(), "lbm");
    }

    #[test]
    fn test_parse_conversion_rejects() {
        assert!(matches!(parse_conversion("ft"), Err(ParseError::Malformed { .. })));
        assert!(parse_conversion("ft->in->mi").is_err());
        assert!(parse_conversion("ft->in*").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        let q = parse_quantity("5 ft").unwrap();
        assert_eq!(q.value, 5.0);
        assert_eq!(q.unit.name(), "ft");

        let q = parse_quantity("100kg").unwrap();
        assert_eq!(q.value, 100.0);
        assert_eq!(q.unit.name(), "kg");

        let q = parse_quantity("-3.5e2 M/s").unwrap();
        assert_eq!(q.value, -350.0);
        assert_eq!(q.unit.name(), "M/s");
    }

    #[test]
    fn test_parse_quantity_without_unit() {
        let q = parse_quantity("42").unwrap();
        assert_eq!(q.value, 42.0);
        assert!(q.unit.is_unitless());
    }

    #[test]
    fn test_parse_quantity_rejects() {
        assert!(parse_quantity("ft").is_err());
        assert!(parse_quantity("5 ft//s").is_err());
    }
}
