//! Item Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ItemId, UserId};

use crate::domain::value_object::{
    image_record::ImageRecord,
    item_fields::{Brand, ModelName, Price, Title},
    item_status::ItemStatus,
};

/// A submitted good awaiting or holding a verdict
#[derive(Debug, Clone)]
pub struct Item {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub title: Title,
    pub description: Option<String>,
    pub brand: Brand,
    pub model: ModelName,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_price: Option<Price>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_location: Option<String>,
    /// Upload order is preserved; updates only append
    pub images: Vec<ImageRecord>,
    /// Written only by the evaluation workflow
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a new item
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: Title,
    pub brand: Brand,
    pub model: ModelName,
    pub description: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_price: Option<Price>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_location: Option<String>,
}

/// Partial update. `None` keeps the current value; for optional fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<Title>,
    pub brand: Option<Brand>,
    pub model: Option<ModelName>,
    pub description: Option<Option<String>>,
    pub size: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub purchase_price: Option<Option<Price>>,
    pub purchase_date: Option<Option<NaiveDate>>,
    pub purchase_location: Option<Option<String>>,
}

impl Item {
    /// New pending item
    pub fn new(owner_id: UserId, draft: ItemDraft, images: Vec<ImageRecord>) -> Self {
        let now = Utc::now();

        Self {
            item_id: ItemId::new(),
            owner_id,
            title: draft.title,
            description: draft.description,
            brand: draft.brand,
            model: draft.model,
            size: draft.size,
            color: draft.color,
            purchase_price: draft.purchase_price,
            purchase_date: draft.purchase_date,
            purchase_location: draft.purchase_location,
            images,
            status: ItemStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(price) = patch.purchase_price {
            self.purchase_price = price;
        }
        if let Some(date) = patch.purchase_date {
            self.purchase_date = date;
        }
        if let Some(location) = patch.purchase_location {
            self.purchase_location = location;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ItemDraft {
        ItemDraft {
            title: Title::new("Air Jordan 1").unwrap(),
            brand: Brand::new("Nike").unwrap(),
            model: ModelName::new("AJ1").unwrap(),
            description: None,
            size: Some("42".into()),
            color: Some("Red".into()),
            purchase_price: None,
            purchase_date: None,
            purchase_location: None,
        }
    }

    fn image(name: &str) -> ImageRecord {
        ImageRecord {
            filename: name.into(),
            original_name: name.into(),
            path: format!("/uploads/{name}"),
            size: 1,
        }
    }

    #[test]
    fn test_new_item_is_pending() {
        let item = Item::new(UserId::new(), draft(), vec![image("a.png")]);
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.images.len(), 1);
    }

    #[test]
    fn test_patch_keeps_clears_and_sets() {
        let mut item = Item::new(UserId::new(), draft(), vec![]);
        item.apply(ItemPatch {
            title: Some(Title::new("Air Jordan 1 Chicago").unwrap()),
            color: Some(None),
            ..Default::default()
        });

        assert_eq!(item.title.as_str(), "Air Jordan 1 Chicago");
        assert_eq!(item.brand.as_str(), "Nike");
        assert_eq!(item.size.as_deref(), Some("42"));
        assert_eq!(item.color, None);
    }
}
