//! Three-level error enumeration tree (category → subcategory → detail)

use crate::error::{MisstepError, MisstepResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status carried by an enum node.
///
/// Serialized as a JSON number or as the string `"inherit"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StatusRepr", into = "StatusRepr")]
pub enum Status {
    /// HTTP-like status code.
    Code(u16),
    /// Use the parent's resolved status.
    Inherit,
}

impl Status {
    pub const INHERIT_MARKER: &'static str = "inherit";

    pub fn code(self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(code),
            Self::Inherit => None,
        }
    }

    pub fn is_inherit(self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Inherit => f.write_str(Self::INHERIT_MARKER),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Code(u16),
    Marker(String),
}

impl TryFrom<StatusRepr> for Status {
    type Error = String;

    fn try_from(repr: StatusRepr) -> Result<Self, Self::Error> {
        match repr {
            StatusRepr::Code(code) => Ok(Self::Code(code)),
            StatusRepr::Marker(marker) if marker == Self::INHERIT_MARKER => Ok(Self::Inherit),
            StatusRepr::Marker(other) => Err(format!(
                "status must be a number or \"inherit\", got \"{other}\""
            )),
        }
    }
}

impl From<Status> for StatusRepr {
    fn from(status: Status) -> Self {
        match status {
            Status::Code(code) => Self::Code(code),
            Status::Inherit => Self::Marker(Status::INHERIT_MARKER.to_string()),
        }
    }
}

/// A node of the enum tree.
///
/// Categories and subcategories carry children; detail nodes do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumNode {
    pub name: String,
    pub description: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EnumNode>,
}

impl EnumNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status,
            children: Vec::new(),
        }
    }

    /// Append a child node (builder style).
    pub fn child(mut self, child: EnumNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<EnumNode>) -> Self {
        self.children = children;
        self
    }

    /// First child with the given name.
    pub fn find_child(&self, name: &str) -> Option<&EnumNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// The configured set of top-level categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumTree {
    categories: Vec<EnumNode>,
}

impl EnumTree {
    pub fn new(categories: Vec<EnumNode>) -> Self {
        Self { categories }
    }

    /// Merge custom categories into a base tree.
    ///
    /// A custom category named like a base category replaces it in place;
    /// the rest are appended in order.
    pub fn merged(base: Vec<EnumNode>, custom: Vec<EnumNode>) -> Self {
        let mut categories = base;
        for node in custom {
            match categories.iter_mut().find(|c| c.name == node.name) {
                Some(existing) => {
                    log_debug!(category = %node.name, "Custom enum category replaces default");
                    *existing = node;
                }
                None => categories.push(node),
            }
        }
        Self { categories }
    }

    /// Parse a JSON array of enum nodes.
    pub fn nodes_from_json(json: &str) -> MisstepResult<Vec<EnumNode>> {
        serde_json::from_str(json).map_err(MisstepError::invalid_enum_document)
    }

    pub fn categories(&self) -> &[EnumNode] {
        &self.categories
    }

    /// First category with the given name.
    pub fn find(&self, name: &str) -> Option<&EnumNode> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
