//! River Units - compound unit parsing and conversion
//!
//! Unit strings are written in a compact notation without separators:
//! `"NMs2/ft"`, `"kgM/s2"`, `"ft/s"`. Primitives from a fixed table are
//! joined by `*`, `/` or plain juxtaposition, and may be squared (`2`) or
//! cubed (`3`).
//!
//! Families:
//! - Time (s, min, hr, day)
//! - Length (M, ft, in, mm, cm, km, yd, mi, nm, kft)
//! - Angle (r, d, as, am, rev, mr)
//! - Mass (kg, sl, lbm, g, mt)
//! - Force (N, kN, oz, lbf)
//! - Voltage (v, kv), Current (amp, mamp), Resistance (ohm)
//! - Temperature (C, K, R, F)
//! - Sound (dB)
//! - Unitless (--, cnt, one)
//!
//! Two units convert into each other when they share an operator skeleton
//! and each primitive pair belongs to the same family:
//!
//! ```
//! use river_units::Unit;
//!
//! let from = Unit::from_string("ft/s").unwrap();
//! let to = Unit::from_string("in/hr").unwrap();
//! let scale = from.convert_to(&to).unwrap();
//! assert!((scale - 43200.0).abs() < 1e-6);
//! ```
//!
//! Temperature factors are multiplicative only and do not apply offsets.
//! See [`table::TEMPERATURE_ROW`].

mod convert;
mod error;
mod family;
mod parse;
mod quantity;
pub mod table;
mod token;
mod unit;
mod validate;

pub use convert::Conversion;
pub use error::{ConvertError, ParseError, Rejection};
pub use family::PhysicalFamily;
pub use parse::{parse_conversion, parse_quantity};
pub use quantity::Quantity;
pub use table::{is_operand_char, UnitSymbol, UnitTable, UNITS};
pub use token::{tokenize, Operator, Token, Tokens};
pub use unit::{Unit, UNITLESS};
pub use validate::{is_unit, validate, MAX_UNIT_LEN};
