//! Compound unit grammar
//!
//! ```text
//! unit     := term (join? term)*
//! term     := primitive exponent?
//! join     := '*' | '/'
//! exponent := '2' | '3'
//! ```
//!
//! A string such as `NMs2*slkvrev` is valid. `NM**`, `NM/2`, `2NM` and
//! `NM*` are not.

use crate::error::{ParseError, Rejection};
use crate::token::{Token, Tokens};

/// Unit strings must be shorter than this many bytes
pub const MAX_UNIT_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AfterPrimitive,
    AfterExponent,
    AfterJoin,
}

/// Check a unit string against the grammar
pub fn validate(text: &str) -> Result<(), ParseError> {
    if text.is_empty() {
        return Err(ParseError::invalid(text, Rejection::Empty));
    }
    if text.len() >= MAX_UNIT_LEN {
        return Err(ParseError::invalid(
            text,
            Rejection::TooLong { len: text.len(), max: MAX_UNIT_LEN - 1 },
        ));
    }

    let mut tokens = Tokens::new(text);
    let mut state = State::Start;

    loop {
        let position = tokens.position();
        let token = match tokens.next() {
            None => break,
            Some(Ok(token)) => token,
            Some(Err(_)) => {
                return Err(ParseError::invalid(text, Rejection::UnrecognizedSymbol { position }));
            }
        };

        state = match token {
            Token::Primitive(_) => State::AfterPrimitive,
            Token::Operator(op) => match state {
                State::Start => {
                    return Err(ParseError::invalid(text, Rejection::LeadingOperator));
                }
                State::AfterPrimitive if op.is_exponent() => State::AfterExponent,
                _ if op.is_exponent() => {
                    return Err(ParseError::invalid(
                        text,
                        Rejection::ExponentWithoutPrimitive { position },
                    ));
                }
                State::AfterJoin => {
                    return Err(ParseError::invalid(
                        text,
                        Rejection::OperatorAfterOperator { position },
                    ));
                }
                State::AfterPrimitive | State::AfterExponent => State::AfterJoin,
            },
        };
    }

    match state {
        State::AfterPrimitive | State::AfterExponent => Ok(()),
        State::AfterJoin => Err(ParseError::invalid(text, Rejection::TrailingOperator)),
        State::Start => Err(ParseError::invalid(text, Rejection::Empty)),
    }
}

/// Is `text` a valid compound unit
pub fn is_unit(text: &str) -> bool {
    validate(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(text: &str) -> Rejection {
        match validate(text).unwrap_err() {
            ParseError::InvalidUnitString { reason, .. } => reason,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_valid_strings() {
        for s in ["NM2/s", "NMs2*slkvrev", "kgM/s2", "ft/s", "in/hr", "M3", "s2kg", "N2*M", "--"] {
            assert!(is_unit(s), "{} should be valid", s);
        }
    }

    #[test]
    fn test_invalid_strings() {
        for s in ["NM**", "NM*/", "NM/2", "NM&3", "2NM", "NM*3", "NM22", "NM*", "N2*", ""] {
            assert!(!is_unit(s), "{} should be invalid", s);
        }
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(reason("2NM"), Rejection::LeadingOperator);
        assert_eq!(reason("/s"), Rejection::LeadingOperator);
        assert_eq!(reason("NM**"), Rejection::OperatorAfterOperator { position: 3 });
        assert_eq!(reason("NM*/"), Rejection::OperatorAfterOperator { position: 3 });
        assert_eq!(reason("NM/2"), Rejection::ExponentWithoutPrimitive { position: 3 });
        assert_eq!(reason("NM22"), Rejection::ExponentWithoutPrimitive { position: 3 });
        assert_eq!(reason("NM&3"), Rejection::UnrecognizedSymbol { position: 2 });
        assert_eq!(reason("NM*"), Rejection::TrailingOperator);
        assert_eq!(reason(""), Rejection::Empty);
    }

    #[test]
    fn test_exponent_then_join_is_fine() {
        assert!(is_unit("NM2/s"));
        assert!(is_unit("NM3*s"));
    }

    #[test]
    fn test_length_limit() {
        let long = "kg".repeat(16);
        assert_eq!(long.len(), 32);
        assert_eq!(reason(&long), Rejection::TooLong { len: 32, max: 31 });

        let fits = format!("{}N", "kg".repeat(15));
        assert!(is_unit(&fits));
    }

    #[test]
    fn test_every_symbol_is_valid() {
        for symbol in crate::UNITS.iter() {
            assert!(is_unit(symbol.text), "{} should be valid", symbol.text);
        }
    }
}
