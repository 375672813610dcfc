//! Read models for user administration

use kernel::id::ItemId;

use crate::domain::entity::user::User;

/// A user row in the admin listing
#[derive(Debug, Clone)]
pub struct UserListing {
    pub user: User,
    pub item_count: i64,
}

/// One of a user's submitted items, as shown on the admin user page.
/// Status and result are the lowercase codes stored by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedItemSummary {
    pub item_id: ItemId,
    pub title: String,
    pub status: String,
    pub evaluation_result: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub admins: i64,
    pub regular: i64,
}
