//! Unit table - the eleven physical families and their symbols
//!
//! Each family lists its symbols in a fixed order. The first symbol is the
//! family base and carries factor 1.0; every other factor converts a value
//! in that symbol to the base.

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use crate::PhysicalFamily;

/// Global unit table, built once on first use and never mutated
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// Temperature row as stored in the original data files.
///
/// The row mixes offsets and scales (`K`, then `R` as offset/scale, then `F`
/// as offset/scale) but is read positionally by symbol index like every other
/// family. Conversions between temperature symbols are therefore purely
/// multiplicative and physically wrong; they are kept for compatibility with
/// existing plot configurations.
pub const TEMPERATURE_ROW: [f64; 6] = [
    1.0,
    -273.15,
    -273.15,
    0.555555555555556,
    -17.7777777777778,
    0.555555555555556,
];

/// A registered primitive symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitSymbol {
    pub family: PhysicalFamily,
    pub text: &'static str,
    /// Multiply a value in this symbol by `factor` to get the family base
    pub factor: f64,
}

/// Registry of every primitive symbol
pub struct UnitTable {
    symbols: HashMap<&'static str, UnitSymbol>,
    families: Vec<(PhysicalFamily, Vec<UnitSymbol>)>,
}

impl UnitTable {
    fn new() -> Self {
        let mut table = UnitTable {
            symbols: HashMap::new(),
            families: Vec::with_capacity(PhysicalFamily::ALL.len()),
        };
        table.register_all_units();
        table
    }

    /// Exact, case-sensitive lookup across all families
    pub fn lookup(&self, text: &str) -> Option<&UnitSymbol> {
        self.symbols.get(text)
    }

    /// Symbols of a family, base first
    pub fn symbols_of(&self, family: PhysicalFamily) -> &[UnitSymbol] {
        self.families
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, symbols)| symbols.as_slice())
            .unwrap_or(&[])
    }

    /// Families with their symbols, in table order
    pub fn families(&self) -> impl Iterator<Item = (PhysicalFamily, &[UnitSymbol])> {
        self.families.iter().map(|(f, s)| (*f, s.as_slice()))
    }

    /// Every registered symbol, in table order
    pub fn iter(&self) -> impl Iterator<Item = &UnitSymbol> {
        self.families.iter().flat_map(|(_, s)| s.iter())
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn register(&mut self, family: PhysicalFamily, entries: &[(&'static str, f64)]) {
        let mut symbols = Vec::with_capacity(entries.len());
        for &(text, factor) in entries {
            let symbol = UnitSymbol { family, text, factor };
            debug_assert!(!self.symbols.contains_key(text), "duplicate symbol {}", text);
            self.symbols.insert(text, symbol);
            symbols.push(symbol);
        }
        self.families.push((family, symbols));
    }

    fn register_all_units(&mut self) {
        self.register(PhysicalFamily::Time, &[
            ("s", 1.0),
            ("min", 60.0),
            ("hr", 3600.0),
            ("day", 86400.0),
        ]);

        // Bare "m" is not registered: under first-match scanning it would
        // shadow mm, mi, min, mr, mt and mamp.
        self.register(PhysicalFamily::Length, &[
            ("M", 1.0),
            ("ft", 0.3048),
            ("in", 0.0254),
            ("mm", 0.001),
            ("cm", 0.01),
            ("km", 1000.0),
            ("yd", 0.9143999999999998),
            ("mi", 1609.344),
            ("nm", 1852.0),
            ("kft", 304.8),
        ]);

        self.register(PhysicalFamily::Angle, &[
            ("r", 1.0),
            ("d", 0.0174532925199433),
            ("as", 4.848136811095362e-06),
            ("am", 0.0002908882086657216),
            ("rev", 6.28318530717958647),
            ("mr", 0.001),
        ]);

        self.register(PhysicalFamily::Mass, &[
            ("kg", 1.0),
            ("sl", 14.5939029300),
            ("lbm", 0.4535923697760192),
            ("g", 0.001),
            ("mt", 1000.0),
        ]);

        self.register(PhysicalFamily::Force, &[
            ("N", 1.0),
            ("kN", 1000.0),
            ("oz", 0.2780138509537812),
            ("lbf", 4.4482216152605),
        ]);

        self.register(PhysicalFamily::Voltage, &[("v", 1.0), ("kv", 1000.0)]);
        self.register(PhysicalFamily::Current, &[("amp", 1.0), ("mamp", 0.001)]);
        self.register(PhysicalFamily::Resistance, &[("ohm", 1.0)]);

        self.register(PhysicalFamily::Temperature, &[
            ("C", TEMPERATURE_ROW[0]),
            ("K", TEMPERATURE_ROW[1]),
            ("R", TEMPERATURE_ROW[2]),
            ("F", TEMPERATURE_ROW[3]),
        ]);

        self.register(PhysicalFamily::Sound, &[("dB", 1.0)]);

        self.register(PhysicalFamily::Unitless, &[
            ("--", 1.0),
            ("cnt", 1.0),
            ("one", 1.0),
        ]);
    }
}

/// Is `c` one of the operator characters `*`, `/`, `2`, `3`
pub fn is_operand_char(c: u8) -> bool {
    matches!(c, b'*' | b'/' | b'2' | b'3')
}
