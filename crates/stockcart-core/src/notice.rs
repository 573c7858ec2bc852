//! # Notices
//!
//! User-visible messages the cart emits when an operation is rejected.
//!
//! ```text
//! CartError::StockExceeded ──────────────► Notice::StockExceeded
//! CartError::Lookup { operation: Add } ──► Notice::AddFailed
//! CartError::Lookup { operation: Remove } ► Notice::RemoveFailed
//! CartError::Lookup { operation: Update } ► Notice::UpdateFailed
//! CartError::FloorGuard / AbsentItem ────► (nothing)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CartError, Operation};

/// A user-visible warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    /// The notice a rejected operation should raise, if any.
    pub fn for_error(err: &CartError) -> Option<Notice> {
        match err {
            CartError::StockExceeded { .. } => Some(Notice::StockExceeded),
            CartError::Lookup { operation, .. } => Some(Notice::lookup_failed(*operation)),
            CartError::FloorGuard { .. } | CartError::AbsentItem { .. } => None,
        }
    }

    pub fn lookup_failed(operation: Operation) -> Notice {
        match operation {
            Operation::Add => Notice::AddFailed,
            Operation::Remove => Notice::RemoveFailed,
            Operation::Update => Notice::UpdateFailed,
        }
    }
}

/// Texts shown for each notice. Overridable from configuration so the
/// storefront can localise them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeMessages {
    #[serde(default = "default_stock_exceeded")]
    pub stock_exceeded: String,

    #[serde(default = "default_add_failed")]
    pub add_failed: String,

    #[serde(default = "default_remove_failed")]
    pub remove_failed: String,

    #[serde(default = "default_update_failed")]
    pub update_failed: String,
}

fn default_stock_exceeded() -> String {
    "Requested quantity is out of stock".to_string()
}

fn default_add_failed() -> String {
    "Failed to add product".to_string()
}

fn default_remove_failed() -> String {
    "Failed to remove product".to_string()
}

fn default_update_failed() -> String {
    "Failed to update product amount".to_string()
}

impl Default for NoticeMessages {
    fn default() -> Self {
        NoticeMessages {
            stock_exceeded: default_stock_exceeded(),
            add_failed: default_add_failed(),
            remove_failed: default_remove_failed(),
            update_failed: default_update_failed(),
        }
    }
}

impl NoticeMessages {
    pub fn text(&self, notice: Notice) -> &str {
        match notice {
            Notice::StockExceeded => &self.stock_exceeded,
            Notice::AddFailed => &self.add_failed,
            Notice::RemoveFailed => &self.remove_failed,
            Notice::UpdateFailed => &self.update_failed,
        }
    }
}
