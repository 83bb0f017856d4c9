//! Family comparison and scale factor computation
//!
//! Both walks run two fresh token streams in lock-step. Compatible units
//! share the same operator skeleton and have primitives of the same family
//! at every position, e.g. `kgNM/s2` and `gkNcm/hr2`.

use crate::error::{ConvertError, ParseError};
use crate::token::{Operator, Token, Tokens};
use crate::Unit;

/// Walk two unit strings and decide whether they can be converted
pub(crate) fn compare(a: &str, b: &str) -> Result<bool, ParseError> {
    let mut left = Tokens::new(a);
    let mut right = Tokens::new(b);

    loop {
        match (left.next().transpose()?, right.next().transpose()?) {
            (None, None) => return Ok(true),
            (Some(_), None) | (None, Some(_)) => return Ok(false),
            (Some(x), Some(y)) => {
                if x.same_text(&y) {
                    continue;
                }
                if x.is_operator() || y.is_operator() {
                    return Ok(false);
                }
                match (x, y) {
                    (Token::Primitive(p), Token::Primitive(q)) if p.family == q.family => continue,
                    _ => return Ok(false),
                }
            }
        }
    }
}

/// Scale factor that turns a value in `from` into a value in `to`
pub(crate) fn scale_factor(from: &Unit, to: &Unit) -> Result<f64, ConvertError> {
    if from.is_unitless() || to.is_unitless() {
        tracing::debug!(from = from.name(), to = to.name(), "unitless operand, no conversion");
        return Ok(1.0);
    }

    if !compare(from.name(), to.name())? {
        return Err(ConvertError::IncompatibleUnits {
            from: from.name().to_string(),
            to: to.name().to_string(),
        });
    }

    let mut to_tokens = Tokens::new(to.name());
    let mut from_tokens = Tokens::new(from.name());

    let mut scale = 1.0;
    let mut last_ratio: Option<f64> = None;
    let mut last_op = Operator::Multiply;
    let mut after_operator = false;

    // The target stream governs the loop
    while let Some(target) = to_tokens.next().transpose()? {
        let source = from_tokens.next().transpose()?;

        match target {
            Token::Operator(op) => {
                after_operator = true;
                let ratio = match op {
                    Operator::Multiply | Operator::Divide => {
                        last_op = op;
                        continue;
                    }
                    _ => last_ratio.ok_or_else(|| ConvertError::DanglingExponent {
                        unit: to.name().to_string(),
                    })?,
                };
                if op == Operator::Square {
                    scale *= ratio;
                } else {
                    scale *= ratio * ratio;
                }
                last_op = Operator::Multiply;
            }
            Token::Primitive(to_symbol) => {
                let Some(Token::Primitive(from_symbol)) = source else {
                    tracing::error!(from = from.name(), to = to.name(), "token streams out of step");
                    return Err(ConvertError::IncompatibleUnits {
                        from: from.name().to_string(),
                        to: to.name().to_string(),
                    });
                };

                // Juxtaposed primitives (NMs) multiply
                if !after_operator {
                    last_op = Operator::Multiply;
                }
                after_operator = false;

                let ratio = if last_op == Operator::Divide {
                    to_symbol.factor / from_symbol.factor
                } else {
                    from_symbol.factor / to_symbol.factor
                };
                last_ratio = Some(ratio);
                scale *= ratio;
            }
        }
    }

    tracing::debug!(from = from.name(), to = to.name(), scale, "computed scale factor");
    Ok(scale)
}

/// A precomputed conversion between two compatible units
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    from: Unit,
    to: Unit,
    scale: f64,
}

impl Conversion {
    pub fn new(from: &Unit, to: &Unit) -> Result<Self, ConvertError> {
        let scale = scale_factor(from, to)?;
        Ok(Conversion { from: from.clone(), to: to.clone(), scale })
    }

    pub fn from(&self) -> &Unit {
        &self.from
    }

    pub fn to(&self) -> &Unit {
        &self.to
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Convert a column of samples in place
    pub fn apply_slice(&self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v *= self.scale;
        }
    }
}
