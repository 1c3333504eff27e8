//! Rule AST and parsing.
//!
//! A rule is authored as JSON data in the usual JSON-logic shape: an object
//! with a single operator key whose value holds the operands. Anything that
//! is not an object is a literal. Operators outside the supported set are
//! rejected up front so a typo in a declaration surfaces as a configuration
//! error rather than silently changing which files get generated.

use serde_json::Value;

use crate::error::{LogicError, LogicResult};
use crate::eval::{lookup, truthy};

/// A parsed rule expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Literal value.
    Value(Value),
    /// Context lookup by dotted path, with an optional default.
    Var {
        path: String,
        default: Option<Value>,
    },
    And(Vec<Rule>),
    Or(Vec<Rule>),
    Eq(Box<Rule>, Box<Rule>),
    Gt(Box<Rule>, Box<Rule>),
}

impl Rule {
    /// Parse a rule from its JSON representation.
    pub fn parse(value: &Value) -> LogicResult<Rule> {
        let map = match value {
            Value::Object(map) => map,
            other => return Ok(Rule::Value(other.clone())),
        };

        if map.len() != 1 {
            return Err(LogicError::MalformedRule {
                message: format!(
                    "expected an object with a single operator key, found {} keys",
                    map.len()
                ),
            });
        }

        let (operator, args) = match map.iter().next() {
            Some(entry) => entry,
            None => {
                return Err(LogicError::MalformedRule {
                    message: "empty rule object".to_string(),
                })
            }
        };

        match operator.as_str() {
            "var" => Self::parse_var(args),
            "and" => Ok(Rule::And(Self::parse_operands(operator, args)?)),
            "or" => Ok(Rule::Or(Self::parse_operands(operator, args)?)),
            "==" => {
                let (lhs, rhs) = Self::parse_pair(operator, args)?;
                Ok(Rule::Eq(Box::new(lhs), Box::new(rhs)))
            }
            ">" => {
                let (lhs, rhs) = Self::parse_pair(operator, args)?;
                Ok(Rule::Gt(Box::new(lhs), Box::new(rhs)))
            }
            other => Err(LogicError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }

    fn parse_var(args: &Value) -> LogicResult<Rule> {
        match args {
            Value::String(path) => Ok(Rule::Var {
                path: path.clone(),
                default: None,
            }),
            Value::Array(items) => {
                let path = items.first().and_then(Value::as_str).ok_or_else(|| {
                    LogicError::MalformedRule {
                        message: "var expects a string path".to_string(),
                    }
                })?;
                if items.len() > 2 {
                    return Err(LogicError::MalformedRule {
                        message: "var takes at most a path and a default".to_string(),
                    });
                }
                Ok(Rule::Var {
                    path: path.to_string(),
                    default: items.get(1).cloned(),
                })
            }
            _ => Err(LogicError::MalformedRule {
                message: "var expects a string path".to_string(),
            }),
        }
    }

    fn parse_operands(operator: &str, args: &Value) -> LogicResult<Vec<Rule>> {
        let items = args.as_array().ok_or_else(|| LogicError::MalformedRule {
            message: format!("{} expects an array of operands", operator),
        })?;
        items.iter().map(Rule::parse).collect()
    }

    fn parse_pair(operator: &str, args: &Value) -> LogicResult<(Rule, Rule)> {
        let items = args.as_array().ok_or_else(|| LogicError::MalformedRule {
            message: format!("{} expects two operands", operator),
        })?;
        if items.len() != 2 {
            return Err(LogicError::MalformedRule {
                message: format!("{} expects two operands, found {}", operator, items.len()),
            });
        }
        Ok((Rule::parse(&items[0])?, Rule::parse(&items[1])?))
    }

    /// Evaluate the rule against a context.
    ///
    /// Evaluation is infallible: a missing `var` resolves to null and type
    /// mismatches in comparisons evaluate to false.
    pub fn evaluate(&self, ctx: &Value) -> Value {
        match self {
            Rule::Value(value) => value.clone(),
            Rule::Var { path, default } => lookup(ctx, path)
                .or_else(|| default.clone())
                .unwrap_or(Value::Null),
            Rule::And(rules) => {
                let mut last = Value::Bool(true);
                for rule in rules {
                    last = rule.evaluate(ctx);
                    if !truthy(&last) {
                        return last;
                    }
                }
                last
            }
            Rule::Or(rules) => {
                let mut last = Value::Bool(false);
                for rule in rules {
                    last = rule.evaluate(ctx);
                    if truthy(&last) {
                        return last;
                    }
                }
                last
            }
            Rule::Eq(lhs, rhs) => {
                Value::Bool(values_equal(&lhs.evaluate(ctx), &rhs.evaluate(ctx)))
            }
            Rule::Gt(lhs, rhs) => {
                let lhs = lhs.evaluate(ctx);
                let rhs = rhs.evaluate(ctx);
                let result = match (lhs.as_f64(), rhs.as_f64()) {
                    (Some(lhs), Some(rhs)) => lhs > rhs,
                    _ => {
                        tracing::warn!(?lhs, ?rhs, "non-numeric operands to >, evaluating to false");
                        false
                    }
                };
                Value::Bool(result)
            }
        }
    }

    /// Evaluate the rule and reduce the result to a boolean.
    pub fn evaluate_bool(&self, ctx: &Value) -> bool {
        truthy(&self.evaluate(ctx))
    }
}

/// Strict equality with numeric cross-representation tolerance (1 == 1.0).
fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => lhs == rhs,
        },
        _ => lhs == rhs,
    }
}
