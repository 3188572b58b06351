//! Arena-backed edit model for JSON documents.
//!
//! The tree view used for editing addresses nodes by stable [`NodeId`]
//! indices instead of parent pointers. A node's label is owned by its parent
//! edge: object children carry their key, array children are labeled by
//! position as `[i]`, so array labels stay contiguous across insertions and
//! removals without a renumbering pass. Removed nodes are detached from their
//! parent; arena slots are not reused.

use serde_json::Number;

use crate::error::{Result, TabulaError};
use crate::json::JsonValue;

/// Stable handle to a node in a [`JsonTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Discriminant of a tree node, for display and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

#[derive(Debug, Clone)]
enum Payload {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object,
    Array,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    /// Edge label under an object parent; `None` for array children and root.
    key: Option<String>,
    payload: Payload,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct JsonTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl JsonTree {
    /// Build the edit tree for a parsed document.
    pub fn from_value(value: &JsonValue) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc(value, None, None);
        tree
    }

    fn alloc(&mut self, value: &JsonValue, parent: Option<NodeId>, key: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let payload = match value {
            JsonValue::Null => Payload::Null,
            JsonValue::Bool(b) => Payload::Bool(*b),
            JsonValue::Number(n) => Payload::Number(n.clone()),
            JsonValue::String(s) => Payload::String(s.clone()),
            JsonValue::Object(_) => Payload::Object,
            JsonValue::Array(_) => Payload::Array,
        };
        self.nodes.push(Node {
            parent,
            key,
            payload,
            children: Vec::new(),
        });
        match value {
            JsonValue::Object(entries) => {
                for (entry_key, entry_value) in entries {
                    let child = self.alloc(entry_value, Some(id), Some(entry_key.clone()));
                    self.nodes[id.0].children.push(child);
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    let child = self.alloc(item, Some(id), None);
                    self.nodes[id.0].children.push(child);
                }
            }
            _ => {}
        }
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        match self.nodes[id.0].payload {
            Payload::Null => NodeKind::Null,
            Payload::Bool(_) => NodeKind::Bool,
            Payload::Number(_) => NodeKind::Number,
            Payload::String(_) => NodeKind::String,
            Payload::Object => NodeKind::Object,
            Payload::Array => NodeKind::Array,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The node's label under its parent: the object key, or the positional
    /// `[i]` form for array children. The root is labeled `$`.
    pub fn label(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        match (node.parent, &node.key) {
            (None, _) => "$".to_string(),
            (Some(_), Some(key)) => key.clone(),
            (Some(parent), None) => self.nodes[parent.0]
                .children
                .iter()
                .position(|child| *child == id)
                .map_or(String::new(), |index| format!("[{index}]")),
        }
    }

    /// Display text for scalar nodes; `None` for objects and arrays.
    pub fn scalar_text(&self, id: NodeId) -> Option<String> {
        match &self.nodes[id.0].payload {
            Payload::Null => Some("null".to_string()),
            Payload::Bool(b) => Some(b.to_string()),
            Payload::Number(n) => Some(n.to_string()),
            Payload::String(s) => Some(s.clone()),
            Payload::Object | Payload::Array => None,
        }
    }

    /// Insert a value under `parent`.
    ///
    /// Object parents require a non-empty key; an existing key is overwritten
    /// in place, a new key is appended. Array parents append and ignore the
    /// key, the new element's label being its position.
    pub fn insert(&mut self, parent: NodeId, key: Option<&str>, value: &JsonValue) -> Result<NodeId> {
        match self.nodes[parent.0].payload {
            Payload::Object => {
                let key = key.unwrap_or("").trim();
                if key.is_empty() {
                    return Err(TabulaError::EmptyKey);
                }
                let existing = self.nodes[parent.0]
                    .children
                    .iter()
                    .position(|child| self.nodes[child.0].key.as_deref() == Some(key));
                let id = self.alloc(value, Some(parent), Some(key.to_string()));
                match existing {
                    Some(position) => self.nodes[parent.0].children[position] = id,
                    None => self.nodes[parent.0].children.push(id),
                }
                Ok(id)
            }
            Payload::Array => {
                let id = self.alloc(value, Some(parent), None);
                self.nodes[parent.0].children.push(id);
                Ok(id)
            }
            _ => Err(TabulaError::InvalidTarget),
        }
    }

    pub fn insert_object(&mut self, parent: NodeId, key: Option<&str>) -> Result<NodeId> {
        self.insert(parent, key, &JsonValue::Object(indexmap::IndexMap::new()))
    }

    pub fn insert_array(&mut self, parent: NodeId, key: Option<&str>) -> Result<NodeId> {
        self.insert(parent, key, &JsonValue::Array(Vec::new()))
    }

    /// Replace a scalar node's value from edited text.
    ///
    /// Re-typing follows the replaced value's original type: booleans parse
    /// `"true"` case-insensitively, numbers parse as f64 and fail with
    /// `NumberFormat` leaving the value unchanged, strings and nulls store
    /// the text as a string.
    pub fn edit_value(&mut self, id: NodeId, text: &str) -> Result<()> {
        let payload = match &self.nodes[id.0].payload {
            Payload::Object | Payload::Array => return Err(TabulaError::NotPrimitive),
            Payload::Bool(_) => Payload::Bool(text.trim().eq_ignore_ascii_case("true")),
            Payload::Number(_) => {
                let parsed: f64 = text
                    .trim()
                    .parse()
                    .map_err(|_| TabulaError::NumberFormat(text.to_string()))?;
                let number = Number::from_f64(parsed)
                    .ok_or_else(|| TabulaError::NumberFormat(text.to_string()))?;
                Payload::Number(number)
            }
            Payload::String(_) | Payload::Null => Payload::String(text.to_string()),
        };
        self.nodes[id.0].payload = payload;
        Ok(())
    }

    /// Detach a node from its parent. Sibling array labels remain contiguous
    /// because labels are positional.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.nodes[id.0].parent else {
            return Err(TabulaError::CannotRemoveRoot);
        };
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|child| *child == id)
            .ok_or_else(|| TabulaError::NodeNotFound(self.label(id)))?;
        self.nodes[parent.0].children.remove(position);
        self.nodes[id.0].parent = None;
        Ok(())
    }

    /// Rebuild the document value from the current tree state.
    pub fn to_value(&self) -> JsonValue {
        self.value_of(self.root)
    }

    fn value_of(&self, id: NodeId) -> JsonValue {
        let node = &self.nodes[id.0];
        match &node.payload {
            Payload::Null => JsonValue::Null,
            Payload::Bool(b) => JsonValue::Bool(*b),
            Payload::Number(n) => JsonValue::Number(n.clone()),
            Payload::String(s) => JsonValue::String(s.clone()),
            Payload::Object => JsonValue::Object(
                node.children
                    .iter()
                    .map(|child| {
                        let key = self.nodes[child.0].key.clone().unwrap_or_default();
                        (key, self.value_of(*child))
                    })
                    .collect(),
            ),
            Payload::Array => JsonValue::Array(
                node.children.iter().map(|child| self.value_of(*child)).collect(),
            ),
        }
    }
}
