//! Frontend Models
//!
//! Data structures matching the `/items` wire format.

use serde::{Deserialize, Serialize};

/// Normal priority flag
pub const PRIORITY_NORMAL: i64 = 0;
/// High priority flag
pub const PRIORITY_HIGH: i64 = 1;

/// ID sent on creation; the backend assigns the real one
pub const PLACEHOLDER_ID: &str = "newitem";

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ID")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub priority: i64,
}

impl Item {
    pub fn is_high_priority(&self) -> bool {
        self.priority == PRIORITY_HIGH
    }

    /// Panel class for this item's priority
    pub fn panel_class(&self) -> &'static str {
        panel_class(self.priority)
    }
}

/// Anything other than [`PRIORITY_HIGH`] gets the normal panel.
pub fn panel_class(priority: i64) -> &'static str {
    match priority {
        PRIORITY_HIGH => "panel prioritypanel",
        _ => "panel normalpanel",
    }
}

/// A not-yet-created item as entered in the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub text: String,
    pub priority: i64,
}

impl NewItem {
    pub fn new(text: impl Into<String>, priority: i64) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }

    /// Wire payload for `POST /items/new`
    pub fn to_payload(&self) -> Item {
        Item {
            id: PLACEHOLDER_ID.to_string(),
            text: self.text.clone(),
            priority: self.priority,
        }
    }
}
