//! Construction-time validation of builder and catcher options
//!
//! Every rule reports a [`ValidationFailure`] with a path into the options
//! and a keyword naming the rule. Validation collects all failures instead
//! of stopping at the first one.

use crate::core_types::enum_tree::{EnumNode, Status};
use crate::error::ValidationFailure;
use crate::registry::Registration;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Allowed shape of enum node names and registration keys.
pub const NAME_PATTERN: &str = r"^[A-Z0-9_]+$";

static NAME_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(NAME_PATTERN).ok());

/// Whether `name` is usable as an enum node name or registration key.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.as_ref().is_some_and(|regex| regex.is_match(name))
}

/// Status codes accepted on enum nodes.
pub const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

const LEVELS: [&str; 3] = ["category", "subcategory", "detail"];

/// Validate the custom `types` option.
pub fn validate_types(types: Option<&[Registration]>) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let Some(types) = types else {
        return failures;
    };
    if types.is_empty() {
        failures.push(ValidationFailure::new(
            ".types",
            "minItems",
            "types must contain at least one registration",
        ));
        return failures;
    }

    let mut seen = HashSet::new();
    for (i, registration) in types.iter().enumerate() {
        let key = registration.key();
        let path = format!(".types[{i}].key");
        if !is_valid_name(key) {
            failures.push(ValidationFailure::new(
                path,
                "pattern",
                format!("key \"{key}\" must match {}", NAME_PATTERN),
            ));
        } else if !seen.insert(key) {
            failures.push(ValidationFailure::new(
                path,
                "uniqueKey",
                format!("key \"{key}\" is registered more than once"),
            ));
        }
    }
    failures
}

/// Validate the custom `enum` option.
pub fn validate_enum(nodes: Option<&[EnumNode]>) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let Some(nodes) = nodes else {
        return failures;
    };
    if nodes.is_empty() {
        failures.push(ValidationFailure::new(
            ".enum",
            "minItems",
            "enum must contain at least one category",
        ));
        return failures;
    }
    validate_level(nodes, ".enum", 0, &mut failures);
    failures
}

fn validate_level(
    nodes: &[EnumNode],
    parent_path: &str,
    depth: usize,
    failures: &mut Vec<ValidationFailure>,
) {
    let level = LEVELS[depth];
    let mut seen = HashSet::new();

    for (i, node) in nodes.iter().enumerate() {
        let path = format!("{parent_path}[{i}]");

        if !is_valid_name(&node.name) {
            failures.push(ValidationFailure::new(
                format!("{path}.name"),
                "pattern",
                format!("{level} name \"{}\" must match {}", node.name, NAME_PATTERN),
            ));
        } else if !seen.insert(node.name.as_str()) {
            failures.push(ValidationFailure::new(
                format!("{path}.name"),
                "uniqueName",
                format!("{level} name \"{}\" is used by a sibling", node.name),
            ));
        }

        match node.status {
            Status::Code(code) if !STATUS_RANGE.contains(&code) => {
                failures.push(ValidationFailure::new(
                    format!("{path}.status"),
                    "status",
                    format!("status {code} is outside {STATUS_RANGE:?}"),
                ));
            }
            Status::Inherit if depth == 0 => {
                failures.push(ValidationFailure::new(
                    format!("{path}.status"),
                    "inherit",
                    "a category has no parent to inherit a status from",
                ));
            }
            _ => {}
        }

        let children_path = format!("{path}.children");
        if depth + 1 < LEVELS.len() {
            if node.children.is_empty() {
                failures.push(ValidationFailure::new(
                    children_path,
                    "minItems",
                    format!("{level} \"{}\" must have at least one child", node.name),
                ));
            } else {
                validate_level(&node.children, &children_path, depth + 1, failures);
            }
        } else if !node.children.is_empty() {
            failures.push(ValidationFailure::new(
                children_path,
                "maxItems",
                format!("detail \"{}\" cannot have children", node.name),
            ));
        }
    }
}

/// Validate the custom `catchers` option.
pub fn validate_catcher_names(names: Option<&[&str]>) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let Some(names) = names else {
        return failures;
    };
    if names.is_empty() {
        failures.push(ValidationFailure::new(
            ".catchers",
            "minProperties",
            "catchers must contain at least one strategy",
        ));
        return failures;
    }
    for name in names {
        if name.trim().is_empty() {
            failures.push(ValidationFailure::new(
                format!(".catchers['{name}']"),
                "minLength",
                "strategy names cannot be blank",
            ));
        }
    }
    failures
}
