//! Multipart product forms.
//!
//! Text parts carry the product fields and the optional `image` part carries
//! the file. Image size and type are checked while reading, but a rejected
//! image is only reported once the form is converted, after the route id has
//! been matched, and it never reaches the storage gateway.

use axum::extract::{FromRequest, Multipart, Request};
use axum_helpers::AppError;
use bytes::Bytes;
use rust_decimal::Decimal;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::categories::service::ID_MISMATCH;
use crate::error::{CatalogError, CatalogResult};
use crate::products::models::{CreateProduct, ProductFields, UpdateProduct};
use crate::storage::ImageUpload;

pub const MAX_IMAGE_BYTES: usize = 5_000_000;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];
pub const FILE_TOO_LARGE: &str = "File too large";
pub const INVALID_FILE_TYPE: &str = "Invalid file type";

/// Every field a product form may carry, before create/update defaults apply.
#[derive(Debug, Default, Validate)]
pub struct ProductForm {
    pub id: Option<Uuid>,
    #[validate(length(max = 150))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_active: Option<bool>,
    pub category_id: Uuid,
    pub remove_image: bool,
    pub image: Option<ImageUpload>,
    /// Why the `image` part was refused, if it was.
    pub rejected_image: Option<&'static str>,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ProductForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                match checked_image(bytes, file_name, content_type) {
                    Ok(image) => form.image = image,
                    Err(reason) => form.rejected_image = Some(reason),
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;

            match name.as_str() {
                "id" => form.id = Some(parse(&name, &value)?),
                "name" => form.name = value,
                "description" => form.description = Some(value),
                "price" => form.price = parse(&name, &value)?,
                "stockQuantity" => form.stock_quantity = parse(&name, &value)?,
                "isActive" => form.is_active = Some(parse_bool(&name, &value)?),
                "categoryId" => form.category_id = parse(&name, &value)?,
                "removeImage" => form.remove_image = parse_bool(&name, &value)?,
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn fields(&mut self, default_active: bool) -> ProductFields {
        ProductFields {
            name: std::mem::take(&mut self.name),
            description: self.description.take(),
            price: self.price,
            stock_quantity: self.stock_quantity,
            is_active: self.is_active.unwrap_or(default_active),
            category_id: self.category_id,
        }
    }

    fn image_accepted(&self) -> CatalogResult<()> {
        match self.rejected_image {
            Some(reason) => Err(CatalogError::BadRequest(reason.to_string())),
            None => Ok(()),
        }
    }

    /// New products are active unless `isActive` says otherwise.
    pub fn into_create(mut self) -> CatalogResult<CreateProduct> {
        self.image_accepted()?;
        Ok(CreateProduct {
            fields: self.fields(true),
            image: self.image,
        })
    }

    /// Updates treat a missing `isActive` as `false`. A body id that differs
    /// from `route_id` is reported before any image problem.
    pub fn into_update(mut self, route_id: Uuid) -> CatalogResult<UpdateProduct> {
        let id = self.id.unwrap_or_else(Uuid::nil);
        if id != route_id {
            return Err(CatalogError::BadRequest(ID_MISMATCH.to_string()));
        }
        self.image_accepted()?;

        Ok(UpdateProduct {
            id,
            fields: self.fields(false),
            remove_image: self.remove_image,
            image: self.image,
        })
    }
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        let form = ProductForm::read(multipart).await?;
        form.validate()?;
        Ok(form)
    }
}

/// An image part with a blank file name is an empty file input, not an upload.
fn checked_image(
    bytes: Bytes,
    file_name: String,
    content_type: Option<String>,
) -> Result<Option<ImageUpload>, &'static str> {
    if file_name.trim().is_empty() {
        return Ok(None);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(FILE_TOO_LARGE);
    }

    let allowed = content_type
        .as_deref()
        .is_some_and(|ct| ALLOWED_IMAGE_TYPES.iter().any(|t| t.eq_ignore_ascii_case(ct)));
    if !allowed {
        return Err(INVALID_FILE_TYPE);
    }

    Ok(Some(ImageUpload {
        bytes,
        file_name,
        content_type,
    }))
}

fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for '{}'.", field)))
}

fn parse_bool(field: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" => Ok(true),
        "false" | "off" | "" => Ok(false),
        _ => Err(AppError::BadRequest(format!("Invalid value for '{}'.", field))),
    }
}

/// OpenAPI shape of the create form.
#[allow(dead_code)]
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateProductForm {
    #[schema(max_length = 150)]
    name: String,
    description: Option<String>,
    #[schema(example = 15.0)]
    price: f64,
    stock_quantity: i32,
    /// Defaults to `true`
    is_active: Option<bool>,
    category_id: Uuid,
    /// jpeg or png, at most 5 MB
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

/// OpenAPI shape of the update form.
#[allow(dead_code)]
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateProductForm {
    /// Must match the route id
    id: Uuid,
    #[schema(max_length = 150)]
    name: String,
    description: Option<String>,
    #[schema(example = 15.0)]
    price: f64,
    stock_quantity: i32,
    /// Defaults to `false`
    is_active: Option<bool>,
    category_id: Uuid,
    /// Clears the stored image unless a new one is sent
    remove_image: Option<bool>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}
