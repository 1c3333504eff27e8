//! Target expansion.
//!
//! The expander turns one [`TemplateTarget`] plus a context into zero or
//! more concrete (path, renderContext) pairs: conditions gate each output,
//! `for_each_of` fans a target out over an array or a folder listing, and
//! `${key}` tokens in the path pattern are substituted from the
//! per-iteration context. Iteration order follows the underlying array or
//! listing; nothing is sorted here.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use vforge_logic::{lookup, Rule};

use crate::error::{TemplateError, TemplateResult};
use crate::manifest::{ForEachOf, TemplateTarget};

/// One concrete output: where to write and what to render with.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedTarget {
    pub path: PathBuf,
    pub context: Value,
}

/// Expands template targets into concrete outputs.
pub struct TargetExpander {
    token_pattern: Regex,
}

impl Default for TargetExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetExpander {
    pub fn new() -> Self {
        Self {
            // Match ${dotted.path} tokens
            token_pattern: Regex::new(r"\$\{([A-Za-z0-9_.]+)\}").unwrap(),
        }
    }

    /// Expand a target against a context.
    ///
    /// `base_dir` anchors `file_in_folder` globs (the workspace root or the
    /// owning item's folder, per the target's root). A condition that fails
    /// to parse is logged and treated as false; an unresolved placeholder
    /// fails the whole target.
    pub fn expand(
        &self,
        target: &TemplateTarget,
        ctx: &Value,
        base_dir: &Path,
    ) -> TemplateResult<Vec<ExpandedTarget>> {
        let conditions = match &target.conditions {
            Some(raw) => match Rule::parse(raw) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("Skipping target '{}': invalid condition: {}", target.path, e);
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        match &target.for_each_of {
            None => {
                if !passes(&conditions, ctx) {
                    debug!("Condition false for target '{}'", target.path);
                    return Ok(Vec::new());
                }
                Ok(vec![ExpandedTarget {
                    path: self.resolve_path(&target.path, ctx)?,
                    context: ctx.clone(),
                }])
            }
            Some(ForEachOf::Var { var }) => self.expand_var(target, &conditions, ctx, var),
            Some(ForEachOf::FileInFolder { file_in_folder }) => self.expand_files(
                target,
                &conditions,
                ctx,
                file_in_folder.as_slice(),
                base_dir,
            ),
        }
    }

    fn expand_var(
        &self,
        target: &TemplateTarget,
        conditions: &Option<Rule>,
        ctx: &Value,
        var: &str,
    ) -> TemplateResult<Vec<ExpandedTarget>> {
        let items = match lookup(ctx, var) {
            Some(Value::Array(items)) => items,
            other => {
                warn!(
                    "Skipping target '{}': '{}' is not an array ({})",
                    target.path,
                    var,
                    if other.is_some() { "wrong type" } else { "missing" }
                );
                return Ok(Vec::new());
            }
        };

        let mut expanded = Vec::new();
        for element in &items {
            let iteration_ctx = iteration_context(ctx, element);
            if !passes(conditions, &iteration_ctx) {
                continue;
            }
            expanded.push(ExpandedTarget {
                path: self.resolve_path(&target.path, &iteration_ctx)?,
                context: iteration_ctx,
            });
        }
        Ok(expanded)
    }

    fn expand_files(
        &self,
        target: &TemplateTarget,
        conditions: &Option<Rule>,
        ctx: &Value,
        patterns: &[String],
        base_dir: &Path,
    ) -> TemplateResult<Vec<ExpandedTarget>> {
        let mut expanded = Vec::new();

        for pattern in patterns {
            let full_pattern = base_dir.join(pattern);
            let matches = glob::glob(&full_pattern.to_string_lossy())?;

            for path in matches.filter_map(|entry| entry.ok()) {
                let basename = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let relative = path.strip_prefix(base_dir).unwrap_or(&path);

                let mut iteration_ctx = ensure_object(ctx);
                insert(
                    &mut iteration_ctx,
                    "_forEachOfBasename",
                    Value::String(basename),
                );
                insert(
                    &mut iteration_ctx,
                    "_forEachOfPath",
                    Value::String(relative.to_string_lossy().into_owned()),
                );

                if !passes(conditions, &iteration_ctx) {
                    continue;
                }
                expanded.push(ExpandedTarget {
                    path: self.resolve_path(&target.path, &iteration_ctx)?,
                    context: iteration_ctx,
                });
            }
        }
        Ok(expanded)
    }

    /// Substitute `${key}` tokens in a path pattern.
    ///
    /// Tokens resolve against the context by dotted path; string and number
    /// values substitute, anything else leaves the token in place. Any token
    /// left after substitution is an error — a file must never be written
    /// with a literal `${...}` in its name.
    fn resolve_path(&self, pattern: &str, ctx: &Value) -> TemplateResult<PathBuf> {
        let resolved = self
            .token_pattern
            .replace_all(pattern, |caps: &regex::Captures| {
                match lookup(ctx, &caps[1]) {
                    Some(Value::String(text)) => text,
                    Some(Value::Number(number)) => number.to_string(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();

        if let Some(position) = resolved.find("${") {
            let token: String = resolved[position..]
                .chars()
                .take_while(|c| *c != '}')
                .chain(std::iter::once('}'))
                .collect();
            return Err(TemplateError::UnresolvedPlaceholder {
                pattern: pattern.to_string(),
                token,
            });
        }

        Ok(PathBuf::from(resolved))
    }
}

fn passes(conditions: &Option<Rule>, ctx: &Value) -> bool {
    conditions
        .as_ref()
        .map(|rule| rule.evaluate_bool(ctx))
        .unwrap_or(true)
}

/// Per-iteration context for one array element.
///
/// Object elements merge field-wise over the parent context; scalar elements
/// are exposed as `_forEachOf`. `_forEachOfBasename` is the file stem of a
/// string element, or of the element's `name`/`file` field for objects.
/// `_filename` (set by the caller from the parent item) survives untouched
/// unless the element itself shadows it.
fn iteration_context(ctx: &Value, element: &Value) -> Value {
    let mut merged = ensure_object(ctx);

    let basename = match element {
        Value::Object(fields) => {
            let basename = fields
                .get("name")
                .or_else(|| fields.get("file"))
                .and_then(Value::as_str)
                .map(stem);
            for (key, value) in fields {
                insert(&mut merged, key, value.clone());
            }
            basename
        }
        Value::String(text) => {
            let basename = Some(stem(text));
            insert(&mut merged, "_forEachOf", element.clone());
            basename
        }
        other => {
            insert(&mut merged, "_forEachOf", other.clone());
            None
        }
    };

    if let Some(basename) = basename {
        insert(&mut merged, "_forEachOfBasename", Value::String(basename));
    }

    merged
}

fn ensure_object(ctx: &Value) -> Value {
    match ctx {
        Value::Object(_) => ctx.clone(),
        _ => Value::Object(Map::new()),
    }
}

fn insert(ctx: &mut Value, key: &str, value: Value) {
    if let Value::Object(map) = ctx {
        map.insert(key.to_string(), value);
    }
}

/// File stem of a path-like string.
fn stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}
