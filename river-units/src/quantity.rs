//! Quantity type - a value with an associated unit

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::error::{ConvertError, ParseError};
use crate::parse::parse_quantity;
use crate::Unit;

/// A numeric value annotated with a compound unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// A value with the unitless `--` unit
    pub fn unitless(value: f64) -> Self {
        Quantity { value, unit: Unit::default() }
    }

    /// Can this quantity be expressed in `target`
    pub fn is_compatible(&self, target: &Unit) -> bool {
        self.unit.is_unitless() || target.is_unitless() || self.unit.same_family(target)
    }

    /// Express this quantity in another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConvertError> {
        let value = self.unit.convert_value(self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Add another quantity, converted into this quantity's unit
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConvertError> {
        let other_value = other.unit.convert_value(other.value, &self.unit)?;
        Ok(Quantity::new(self.value + other_value, self.unit.clone()))
    }

    /// Subtract another quantity, converted into this quantity's unit
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ConvertError> {
        let other_value = other.unit.convert_value(other.value, &self.unit)?;
        Ok(Quantity::new(self.value - other_value, self.unit.clone()))
    }

    /// Scale by a plain number
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.value * factor, self.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for Quantity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_quantity(s)
    }
}
