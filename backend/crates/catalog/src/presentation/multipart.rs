//! Item form extractor
//!
//! Create and update accept either `multipart/form-data` (text fields plus
//! repeatable `images` files) or a JSON body without files.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use kernel::error::{app_error::AppError, kind::ErrorKind};

use crate::application::item_input::ItemFields;
use crate::application::upload::{IMAGE_FIELD, IncomingImage};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::ItemFieldsRequest;

#[derive(Debug, Default)]
pub struct ItemForm {
    pub fields: ItemFields,
    pub images: Vec<IncomingImage>,
}

impl<S> FromRequest<S> for ItemForm
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
                let kind = match rejection.status().as_u16() {
                    413 => ErrorKind::PayloadTooLarge,
                    _ => ErrorKind::BadRequest,
                };
                CatalogError::Validation(AppError::new(kind, rejection.body_text()))
            })?;
            read_multipart(multipart).await
        } else {
            let Json(body) = Json::<ItemFieldsRequest>::from_request(req, state).await?;
            Ok(Self {
                fields: body.into_fields()?,
                images: Vec::new(),
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> CatalogResult<ItemForm> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let original_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;

            form.images.push(IncomingImage {
                original_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        if field.file_name().is_some() {
            return Err(CatalogError::Validation(AppError::bad_request(format!(
                "Unexpected file field: {name}"
            ))));
        }

        let value = field.text().await?;
        let fields = &mut form.fields;
        match name.as_str() {
            "title" => fields.title = Some(value),
            "description" => fields.description = Some(value),
            "brand" => fields.brand = Some(value),
            "model" => fields.model = Some(value),
            "size" => fields.size = Some(value),
            "color" => fields.color = Some(value),
            "purchasePrice" => fields.purchase_price = Some(value),
            "purchaseDate" => fields.purchase_date = Some(value),
            "purchaseLocation" => fields.purchase_location = Some(value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}
