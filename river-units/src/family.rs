//! Physical families
//!
//! Every primitive symbol belongs to exactly one family. Two primitives can
//! only be converted into each other when their families match.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A group of mutually convertible primitive units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalFamily {
    Time,
    Length,
    Angle,
    Mass,
    Force,
    Voltage,
    Current,
    Resistance,
    Temperature,
    Sound,
    Unitless,
}

impl PhysicalFamily {
    /// All families in table order
    pub const ALL: [PhysicalFamily; 11] = [
        PhysicalFamily::Time,
        PhysicalFamily::Length,
        PhysicalFamily::Angle,
        PhysicalFamily::Mass,
        PhysicalFamily::Force,
        PhysicalFamily::Voltage,
        PhysicalFamily::Current,
        PhysicalFamily::Resistance,
        PhysicalFamily::Temperature,
        PhysicalFamily::Sound,
        PhysicalFamily::Unitless,
    ];

    /// Lowercase display name
    pub fn name(&self) -> &'static str {
        match self {
            PhysicalFamily::Time => "time",
            PhysicalFamily::Length => "length",
            PhysicalFamily::Angle => "angle",
            PhysicalFamily::Mass => "mass",
            PhysicalFamily::Force => "force",
            PhysicalFamily::Voltage => "voltage",
            PhysicalFamily::Current => "current",
            PhysicalFamily::Resistance => "resistance",
            PhysicalFamily::Temperature => "temperature",
            PhysicalFamily::Sound => "sound",
            PhysicalFamily::Unitless => "unitless",
        }
    }

    /// Symbol of the base unit (factor 1.0)
    pub fn base_symbol(&self) -> &'static str {
        match self {
            PhysicalFamily::Time => "s",
            PhysicalFamily::Length => "M",
            PhysicalFamily::Angle => "r",
            PhysicalFamily::Mass => "kg",
            PhysicalFamily::Force => "N",
            PhysicalFamily::Voltage => "v",
            PhysicalFamily::Current => "amp",
            PhysicalFamily::Resistance => "ohm",
            PhysicalFamily::Temperature => "C",
            PhysicalFamily::Sound => "dB",
            PhysicalFamily::Unitless => "--",
        }
    }
}

impl fmt::Display for PhysicalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PhysicalFamily::Length), "length");
        assert_eq!(format!("{}", PhysicalFamily::Unitless), "unitless");
    }

    #[test]
    fn test_all_is_distinct() {
        for (i, a) in PhysicalFamily::ALL.iter().enumerate() {
            for b in &PhysicalFamily::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&PhysicalFamily::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }
}
