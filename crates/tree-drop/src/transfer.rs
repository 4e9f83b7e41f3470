//! Drag payload exchanged with the tree-view host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// MIME type under which dragged tree node ids travel.
pub const SOLUTION_EXPLORER_MIME_TYPE: &str = "application/vnd.code.tree.solutionExplorer";

/// One entry of a drag payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DataTransferItem(Value);

impl DataTransferItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An item holding a list of node ids.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self(Value::Array(ids.iter().map(|id| Value::String(id.as_ref().to_string())).collect()))
    }

    /// The node ids in the item. Anything that isn't a string is ignored.
    pub fn as_ids(&self) -> Vec<String> {
        match &self.0 {
            Value::Array(values) => values.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
            Value::String(id) => vec![id.clone()],
            _ => Vec::new(),
        }
    }
}

/// Drag payload, keyed by MIME type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DataTransfer {
    items: BTreeMap<String, DataTransferItem>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mime_type: &str) -> Option<&DataTransferItem> {
        self.items.get(mime_type)
    }

    /// Sets the item for `mime_type`, replacing any earlier one.
    pub fn set(&mut self, mime_type: impl Into<String>, item: DataTransferItem) {
        self.items.insert(mime_type.into(), item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
