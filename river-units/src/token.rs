//! Tokenizer for compound unit strings
//!
//! Scans left to right and yields primitives and operators, e.g.
//! `NM/s2` -> `N`, `M`, `/`, `s`, `2`.
//!
//! A primitive is the shortest prefix that matches a registered symbol,
//! unless one of the overrides below extends it. The cursor lives in the
//! iterator value, so every traversal starts from a fresh `Tokens`.

use std::fmt;
use crate::error::ParseError;
use crate::table::{is_operand_char, UnitSymbol, UNITS};

/// Symbols that are prefixes of other symbols.
///
/// When `matched` is found and the following bytes are `follows`, the match
/// is extended to `extended`. Checked in order; first hit wins.
const OVERRIDES: [(&str, &str, &str); 6] = [
    ("s", "l", "sl"),     // slug over second
    ("r", "ev", "rev"),   // revolution over radian
    ("d", "B", "dB"),     // decibel over degree
    ("d", "ay", "day"),   // day over degree
    ("mi", "n", "min"),   // minute over mile
    ("am", "p", "amp"),   // amp over arc minute
];

/// Operators that join or raise primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Multiply,
    Divide,
    Square,
    Cube,
}

impl Operator {
    pub fn from_byte(c: u8) -> Option<Operator> {
        match c {
            b'*' => Some(Operator::Multiply),
            b'/' => Some(Operator::Divide),
            b'2' => Some(Operator::Square),
            b'3' => Some(Operator::Cube),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Square => '2',
            Operator::Cube => '3',
        }
    }

    /// `2` or `3`
    pub fn is_exponent(&self) -> bool {
        matches!(self, Operator::Square | Operator::Cube)
    }
}

/// One element of a unit expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Primitive(UnitSymbol),
    Operator(Operator),
}

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    /// Textual identity: same symbol text or same operator
    pub fn same_text(&self, other: &Token) -> bool {
        match (self, other) {
            (Token::Primitive(a), Token::Primitive(b)) => a.text == b.text,
            (Token::Operator(a), Token::Operator(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Primitive(symbol) => write!(f, "{}", symbol.text),
            Token::Operator(op) => write!(f, "{}", op.as_char()),
        }
    }
}

/// Lazy token stream over a unit string
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokens { text, cursor: 0 }
    }

    /// Byte offset of the next token
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn fail(&mut self, start: usize, end: usize) -> ParseError {
        let bytes = self.text.as_bytes();
        self.cursor = bytes.len();
        ParseError::UnknownPrimitive {
            text: self.text.to_string(),
            primitive: String::from_utf8_lossy(&bytes[start..end]).into_owned(),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        let start = self.cursor;
        if start >= bytes.len() {
            return None;
        }

        if let Some(op) = Operator::from_byte(bytes[start]) {
            self.cursor = start + 1;
            return Some(Ok(Token::Operator(op)));
        }

        for end in start + 1..=bytes.len() {
            // A candidate never spans an operator
            if is_operand_char(bytes[end - 1]) {
                return Some(Err(self.fail(start, end - 1)));
            }

            let Ok(candidate) = std::str::from_utf8(&bytes[start..end]) else {
                continue;
            };
            let Some(symbol) = UNITS.lookup(candidate) else {
                continue;
            };

            let rest = &bytes[end..];
            let (symbol, consumed) = OVERRIDES
                .iter()
                .find(|(matched, follows, _)| {
                    *matched == candidate && rest.starts_with(follows.as_bytes())
                })
                .and_then(|(_, follows, extended)| {
                    UNITS.lookup(extended).map(|s| (*s, end - start + follows.len()))
                })
                .unwrap_or((*symbol, end - start));

            self.cursor = start + consumed;
            tracing::trace!(unit = self.text, token = symbol.text, at = start, "primitive");
            return Some(Ok(Token::Primitive(symbol)));
        }

        Some(Err(self.fail(start, bytes.len())))
    }
}

/// Tokenize a whole string
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    Tokens::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicalFamily;

    fn texts(s: &str) -> Vec<String> {
        tokenize(s).unwrap().iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_compound_split() {
        assert_eq!(texts("NM/s2"), vec!["N", "M", "/", "s", "2"]);
        assert_eq!(texts("kgM/s2"), vec!["kg", "M", "/", "s", "2"]);
        assert_eq!(texts("NMs2*slkvrev"), vec!["N", "M", "s", "2", "*", "sl", "kv", "rev"]);
    }

    #[test]
    fn test_operator_kinds() {
        let kinds: Vec<bool> = tokenize("kg/s2").unwrap().iter().map(Token::is_operator).collect();
        assert_eq!(kinds, vec![false, true, false, true]);
    }

    #[test]
    fn test_overrides() {
        assert_eq!(texts("sl"), vec!["sl"]);
        assert_eq!(texts("rev"), vec!["rev"]);
        assert_eq!(texts("dB"), vec!["dB"]);
        assert_eq!(texts("day"), vec!["day"]);
        assert_eq!(texts("min"), vec!["min"]);
        assert_eq!(texts("amp"), vec!["amp"]);
    }

    #[test]
    fn test_short_symbols_without_extension() {
        assert_eq!(texts("s"), vec!["s"]);
        assert_eq!(texts("r"), vec!["r"]);
        assert_eq!(texts("d"), vec!["d"]);
        assert_eq!(texts("mi"), vec!["mi"]);
        assert_eq!(texts("am"), vec!["am"]);
        // "re" is not followed by "v", so radian then unknown "e"
        assert!(tokenize("re").is_err());
    }

    #[test]
    fn test_override_families() {
        let tokens = tokenize("sl").unwrap();
        match tokens[0] {
            Token::Primitive(s) => assert_eq!(s.family, PhysicalFamily::Mass),
            _ => panic!("expected primitive"),
        }
        let tokens = tokenize("dB").unwrap();
        match tokens[0] {
            Token::Primitive(s) => assert_eq!(s.family, PhysicalFamily::Sound),
            _ => panic!("expected primitive"),
        }
    }

    #[test]
    fn test_unknown_primitive() {
        let err = tokenize("NM&3").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownPrimitive { text: "NM&3".to_string(), primitive: "&".to_string() }
        );
    }

    #[test]
    fn test_candidate_does_not_span_operator() {
        // "k*g" must not be read as "kg"
        let err = tokenize("k*g").unwrap_err();
        assert!(matches!(err, ParseError::UnknownPrimitive { ref primitive, .. } if primitive == "k"));
    }

    #[test]
    fn test_stream_is_fused_after_error() {
        let mut tokens = Tokens::new("xN");
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_restartable() {
        let first: Vec<String> = Tokens::new("ft/s").map(|t| t.unwrap().to_string()).collect();
        let second: Vec<String> = Tokens::new("ft/s").map(|t| t.unwrap().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_ascii_does_not_panic() {
        assert!(tokenize("µs").is_err());
        assert!(tokenize("N°").is_err());
    }
}
