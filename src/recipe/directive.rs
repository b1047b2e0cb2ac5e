// cook-rs: recipe-driven staging installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `[[install]]` directives and `%(var)s` expansion.
//!
//! ```text
//! { kind = "copy-tree", source = "admin", dest = "%(lib)s/pulp/admin" }
//!        |  substitute(dest, layout + metadata)
//!        v
//! InstallRule::copy_tree("admin", "/usr/lib/pulp/admin")
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::metadata::invalid;
use crate::error::RecipeError;
use crate::install::{InstallRule, RuleKind};
use crate::install::rule::is_contained;

fn variable_pattern() -> Result<&'static Regex, RecipeError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"%\(([^)]*)\)s"))
        .as_ref()
        .map_err(|e| invalid("install.dest", format!("variable pattern failed to compile: {e}")))
}

/// Expands every `%(name)s` token in `template` from `vars`.
///
/// # Errors
///
/// `RecipeError::UnknownVariable` for the first token with no value.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use cook_rs::recipe::directive::substitute;
///
/// let vars = BTreeMap::from([("lib", "/usr/lib")]);
/// assert_eq!(substitute("%(lib)s/pulp", &vars)?, "/usr/lib/pulp");
/// # Ok::<(), cook_rs::error::RecipeError>(())
/// ```
pub fn substitute(template: &str, vars: &BTreeMap<&str, &str>) -> Result<String, RecipeError> {
    let pattern = variable_pattern()?;
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in pattern.captures_iter(template) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = vars
            .get(name.as_str())
            .ok_or_else(|| RecipeError::UnknownVariable {
                name: name.as_str().to_string(),
                template: template.to_string(),
            })?;
        out.push_str(&template[last..token.start()]);
        out.push_str(value);
        last = token.end();
    }
    out.push_str(&template[last..]);

    Ok(out)
}

/// One `[[install]]` entry as written in the recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Directive {
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub dest: String,
}

impl Directive {
    /// Checks the fields that do not depend on the layout.
    ///
    /// `index` is the directive's position, used in error messages.
    ///
    /// # Errors
    ///
    /// `RecipeError::InvalidField` when a copy directive has no source, a
    /// `mkdir` directive has one, the source is absolute or uses `..`, or
    /// `dest` is empty.
    pub fn validate(&self, index: usize) -> Result<(), RecipeError> {
        let field = |name: &str| format!("install[{index}].{name}");

        match (&self.source, self.kind.needs_source()) {
            (None, true) => {
                return Err(invalid(
                    &field("source"),
                    format!("'{}' needs a source", self.kind),
                ));
            }
            (Some(_), false) => {
                return Err(invalid(
                    &field("source"),
                    format!("'{}' takes no source", self.kind),
                ));
            }
            (Some(source), true) => {
                let path = Path::new(source);
                if source.is_empty() || path.is_absolute() || !is_contained(path) {
                    return Err(invalid(
                        &field("source"),
                        format!("'{source}' must be a relative path inside the checkout"),
                    ));
                }
            }
            (None, false) => {}
        }

        if self.dest.trim().is_empty() {
            return Err(invalid(&field("dest"), "must not be empty"));
        }
        if !is_contained(Path::new(&self.dest)) {
            return Err(invalid(
                &field("dest"),
                format!("'{}' must not contain '..'", self.dest),
            ));
        }
        Ok(())
    }

    /// Builds the install rule with `dest` expanded from `vars`.
    ///
    /// # Errors
    ///
    /// `RecipeError::UnknownVariable` when `dest` names an undefined variable.
    pub fn to_rule(&self, vars: &BTreeMap<&str, &str>) -> Result<InstallRule, RecipeError> {
        let dest = substitute(&self.dest, vars)?;
        Ok(match (self.kind, &self.source) {
            (RuleKind::CopyTree, Some(source)) => InstallRule::copy_tree(source, dest),
            (RuleKind::CopyFile, Some(source)) => InstallRule::copy_file(source, dest),
            (RuleKind::CreateEmptyDir, _) => InstallRule::create_empty_dir(dest),
            (kind, None) => {
                return Err(invalid("install.source", format!("'{kind}' needs a source")));
            }
        })
    }
}
