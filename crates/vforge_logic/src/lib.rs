//! # vforge_logic
//!
//! JSON-logic rule parsing and evaluation for VForge.
//!
//! Template targets are gated by small boolean expressions authored as JSON
//! data (`and`, `or`, `==`, `>`, `var`, literals). This crate parses such
//! expressions into a [`Rule`] AST and evaluates them against a context
//! object. Unsupported operators are rejected at parse time; evaluation
//! itself never fails — type mismatches degrade to falsy results so that a
//! misconfigured rule skips a target instead of regenerating files.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use vforge_logic::Rule;
//!
//! let rule = Rule::parse(&json!({">": [{"var": "components.sprites.length"}, 0]})).unwrap();
//! let ctx = json!({"components": {"sprites": []}});
//! assert!(!rule.evaluate_bool(&ctx));
//! ```

pub mod error;
pub mod eval;
pub mod rule;

pub use error::{LogicError, LogicResult};
pub use eval::{lookup, truthy};
pub use rule::Rule;
