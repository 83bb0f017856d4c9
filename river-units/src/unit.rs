//! Unit value object

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::convert::{compare, scale_factor};
use crate::error::{ConvertError, ParseError};
use crate::token::{tokenize, Token, Tokens};
use crate::validate::validate;

/// The unitless symbol, also the default unit
pub const UNITLESS: &str = "--";

/// A validated compound unit such as `"kgM/s2"`
///
/// Only the original text is stored. Tokens are recomputed on demand, so a
/// `Unit` can be shared between threads and traversed concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit {
    name: String,
}

impl Unit {
    /// Validate `text` and build a unit from it
    pub fn from_string(text: &str) -> Result<Self, ParseError> {
        validate(text)?;
        tracing::debug!(unit = text, "unit accepted");
        Ok(Unit { name: text.to_string() })
    }

    /// The original unit text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the literal unitless symbol `--`
    pub fn is_unitless(&self) -> bool {
        self.name == UNITLESS
    }

    /// Fresh token stream over this unit
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.name)
    }

    /// The full token sequence
    pub fn expression(&self) -> Result<Vec<Token>, ParseError> {
        tokenize(&self.name)
    }

    /// Do both units share an operator skeleton and per-position families
    pub fn same_family(&self, other: &Unit) -> bool {
        match compare(&self.name, &other.name) {
            Ok(same) => same,
            Err(e) => {
                tracing::error!(error = %e, "stored unit failed to tokenize");
                false
            }
        }
    }

    /// Scale factor converting a value in `self` into `other`
    pub fn convert_to(&self, other: &Unit) -> Result<f64, ConvertError> {
        scale_factor(self, other)
    }

    /// Like `convert_to`, validating `other` first
    pub fn convert_to_str(&self, other: &str) -> Result<f64, ConvertError> {
        let other = Unit::from_string(other)?;
        self.convert_to(&other)
    }

    /// Convert `value` from `self` into `other`
    pub fn convert_value(&self, value: f64, other: &Unit) -> Result<f64, ConvertError> {
        Ok(value * self.convert_to(other)?)
    }

    pub fn convert_value_str(&self, value: f64, other: &str) -> Result<f64, ConvertError> {
        Ok(value * self.convert_to_str(other)?)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit { name: UNITLESS.to_string() }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Unit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_string(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Unit { name: value })
    }
}

impl TryFrom<&str> for Unit {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Unit::from_string(value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;

    #[test]
    fn test_default_is_unitless() {
        let unit = Unit::default();
        assert_eq!(unit.name(), "--");
        assert!(unit.is_unitless());
    }

    #[test]
    fn test_name_round_trip() {
        for s in ["NMs2/ft", "kgM/s2", "NMs2*slkvrev", "dB", "--"] {
            assert_eq!(Unit::from_string(s).unwrap().name(), s);
        }
    }

    #[test]
    fn test_rejects_invalid() {
        let err = Unit::from_string("NM/2").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidUnitString {
                text: "NM/2".to_string(),
                reason: Rejection::ExponentWithoutPrimitive { position: 3 },
            }
        );
    }

    #[test]
    fn test_from_str() {
        let unit: Unit = "ft/s".parse().unwrap();
        assert_eq!(unit.to_string(), "ft/s");
        assert!("ft//s".parse::<Unit>().is_err());
    }

    #[test]
    fn test_expression() {
        let unit = Unit::from_string("NM/s2").unwrap();
        let texts: Vec<String> = unit.expression().unwrap().iter().map(|t| t.to_string()).collect();
        assert_eq!(texts, vec!["N", "M", "/", "s", "2"]);
        assert_eq!(unit.tokens().count(), 5);
    }

    #[test]
    fn test_convert_value() {
        let ft = Unit::from_string("ft").unwrap();
        let inch = Unit::from_string("in").unwrap();
        let value = ft.convert_value(3.0, &inch).unwrap();
        assert!((value - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_value_str_validates() {
        let ft = Unit::from_string("ft").unwrap();
        assert!((ft.convert_value_str(3.0, "in").unwrap() - 36.0).abs() < 1e-9);
        assert!(matches!(ft.convert_value_str(3.0, "in*"), Err(ConvertError::Parse(_))));
        assert!(matches!(
            ft.convert_to_str("s"),
            Err(ConvertError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_same_family() {
        let a = Unit::from_string("kgNM/s2").unwrap();
        let b = Unit::from_string("gkNcm/hr2").unwrap();
        let c = Unit::from_string("gNM/s3").unwrap();
        assert!(a.same_family(&b));
        assert!(!a.same_family(&c));
    }

    #[test]
    fn test_serde_as_string() {
        let unit = Unit::from_string("M/s2").unwrap();
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, "\"M/s2\"");
        let back: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unit);
        assert!(serde_json::from_str::<Unit>("\"M//s\"").is_err());
    }
}
