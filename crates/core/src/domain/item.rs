// Item Domain Model

use serde::{Deserialize, Serialize};

/// Item ID (assigned by the store on insert, never reused)
pub type ItemId = i64;

/// A single shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Product label (empty names are allowed)
    pub name: String,
    pub purchased: bool,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, purchased: bool) -> Self {
        Self {
            id,
            name: name.into(),
            purchased,
        }
    }

    /// Same item with the purchased flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            purchased: !self.purchased,
        }
    }

    /// Status label used by front ends
    pub fn status(&self) -> &'static str {
        if self.purchased {
            "PURCHASED"
        } else {
            "PENDING"
        }
    }
}
