//! Type string resolution against the enum tree
//!
//! A type string has up to three colon-separated segments,
//! `CATEGORY:SUBCATEGORY:DETAIL`. Resolution walks the tree one level at a
//! time and stops at the first segment that does not match:
//!
//! 1. Segment 0 is looked up among the top-level categories
//! 2. Segment 1 among the matched category's children
//! 3. Segment 2 among the matched subcategory's children
//!
//! Status is chained root to leaf: a node marked `inherit` keeps whatever was
//! resolved above it, any other node overrides it. A category marked
//! `inherit` has nothing above it and resolves no status.

use crate::core_types::enum_tree::{EnumNode, EnumTree, Status};
use crate::logging::log_trace;
use serde::{Deserialize, Serialize};

/// Segment separator in type strings.
pub const TYPE_SEPARATOR: char = ':';

/// Name and description of one matched level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLevel {
    pub name: String,
    pub description: String,
}

impl From<&EnumNode> for ResolvedLevel {
    fn from(node: &EnumNode) -> Self {
        Self {
            name: node.name.clone(),
            description: node.description.clone(),
        }
    }
}

/// Result of matching a type string against the enum tree.
///
/// `valid` is true only when all three levels matched. Partial resolutions
/// keep the levels that did match so callers can degrade gracefully.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ResolvedLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<ResolvedLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed: Option<ResolvedLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl Resolution {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// `CATEGORY[:SUBCATEGORY[:DETAIL]]` for the levels that matched.
    pub fn qualified_type(&self) -> Option<String> {
        let category = self.category.as_ref()?;
        let mut qualified = category.name.clone();
        for level in [&self.subcategory, &self.detailed].into_iter().flatten() {
            qualified.push(TYPE_SEPARATOR);
            qualified.push_str(&level.name);
        }
        Some(qualified)
    }

    /// Description of the deepest matched level.
    pub fn deepest_description(&self) -> Option<&str> {
        self.detailed
            .as_ref()
            .or(self.subcategory.as_ref())
            .or(self.category.as_ref())
            .map(|level| level.description.as_str())
    }
}

/// First segment of a type string, if non-empty.
pub fn attempted_category(type_string: &str) -> Option<&str> {
    type_string
        .split(TYPE_SEPARATOR)
        .next()
        .filter(|segment| !segment.is_empty())
}

fn chain_status(resolved: Option<u16>, status: Status) -> Option<u16> {
    match status {
        Status::Inherit => resolved,
        Status::Code(code) => Some(code),
    }
}

impl EnumTree {
    /// Resolve a type string. Never fails; misses leave levels unset.
    pub fn resolve(&self, type_string: &str) -> Resolution {
        let mut segments = type_string.split(TYPE_SEPARATOR);
        let mut resolution = Resolution::default();

        let Some(category) = segments.next().and_then(|name| self.find(name)) else {
            log_trace!(type_string = %type_string, "No enum category matched");
            return resolution;
        };
        resolution.category = Some(category.into());
        resolution.status = chain_status(None, category.status);

        let Some(subcategory) = segments.next().and_then(|name| category.find_child(name)) else {
            return resolution;
        };
        resolution.subcategory = Some(subcategory.into());
        resolution.status = chain_status(resolution.status, subcategory.status);

        let Some(detailed) = segments.next().and_then(|name| subcategory.find_child(name)) else {
            return resolution;
        };
        resolution.detailed = Some(detailed.into());
        resolution.status = chain_status(resolution.status, detailed.status);
        resolution.valid = true;

        log_trace!(
            type_string = %type_string,
            status = ?resolution.status,
            "Resolved complete error type"
        );
        resolution
    }
}
