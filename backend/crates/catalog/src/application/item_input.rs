//! Raw item fields as received from a form or JSON body

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entity::item::{ItemDraft, ItemPatch};
use crate::domain::value_object::item_fields::{
    Brand, ModelName, Price, Title, optional_short_text, optional_text, parse_purchase_date,
};

/// Unvalidated item fields. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_price: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_location: Option<String>,
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| AppError::bad_request(format!("{field} is required")))
}

fn price(raw: &str) -> AppResult<Option<Price>> {
    optional_text(raw).map(|v| Price::parse(&v)).transpose()
}

fn date(raw: &str) -> AppResult<Option<chrono::NaiveDate>> {
    optional_text(raw)
        .map(|v| parse_purchase_date(&v))
        .transpose()
}

impl ItemFields {
    /// Validate for creation; title, brand and model are required
    pub fn into_draft(self) -> AppResult<ItemDraft> {
        Ok(ItemDraft {
            title: Title::new(&required("Title", self.title)?)?,
            brand: Brand::new(&required("Brand", self.brand)?)?,
            model: ModelName::new(&required("Model", self.model)?)?,
            description: self.description.as_deref().and_then(optional_text),
            size: self
                .size
                .as_deref()
                .map(|v| optional_short_text("Size", v))
                .transpose()?
                .flatten(),
            color: self
                .color
                .as_deref()
                .map(|v| optional_short_text("Color", v))
                .transpose()?
                .flatten(),
            purchase_price: self.purchase_price.as_deref().map(price).transpose()?.flatten(),
            purchase_date: self.purchase_date.as_deref().map(date).transpose()?.flatten(),
            purchase_location: self
                .purchase_location
                .as_deref()
                .map(|v| optional_short_text("Purchase location", v))
                .transpose()?
                .flatten(),
        })
    }

    /// Validate for a partial update. An empty string clears an optional field.
    pub fn into_patch(self) -> AppResult<ItemPatch> {
        Ok(ItemPatch {
            title: self.title.as_deref().map(Title::new).transpose()?,
            brand: self.brand.as_deref().map(Brand::new).transpose()?,
            model: self.model.as_deref().map(ModelName::new).transpose()?,
            description: self.description.as_deref().map(optional_text),
            size: self
                .size
                .as_deref()
                .map(|v| optional_short_text("Size", v))
                .transpose()?,
            color: self
                .color
                .as_deref()
                .map(|v| optional_short_text("Color", v))
                .transpose()?,
            purchase_price: self.purchase_price.as_deref().map(price).transpose()?,
            purchase_date: self.purchase_date.as_deref().map(date).transpose()?,
            purchase_location: self
                .purchase_location
                .as_deref()
                .map(|v| optional_short_text("Purchase location", v))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ItemFields {
        ItemFields {
            title: Some("Air Jordan 1".into()),
            brand: Some("Nike".into()),
            model: Some("AJ1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_requires_core_fields() {
        assert!(fields().into_draft().is_ok());

        let err = ItemFields {
            brand: None,
            ..fields()
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(err.message(), "Brand is required");
    }

    #[test]
    fn test_draft_blank_optionals_are_absent() {
        let draft = ItemFields {
            color: Some("  ".into()),
            purchase_price: Some("".into()),
            purchase_date: Some("2024-01-02".into()),
            ..fields()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.color, None);
        assert_eq!(draft.purchase_price, None);
        assert!(draft.purchase_date.is_some());
    }

    #[test]
    fn test_patch_distinguishes_keep_and_clear() {
        let patch = ItemFields {
            description: Some(String::new()),
            purchase_price: Some("89.5".into()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();

        assert!(patch.title.is_none());
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.purchase_price, Some(Some(Price::from_cents(8950))));
        assert!(patch.size.is_none());
    }

    #[test]
    fn test_patch_validates_supplied_fields() {
        let err = ItemFields {
            title: Some("ab".into()),
            ..Default::default()
        }
        .into_patch()
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
