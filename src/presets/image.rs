//! Timestamped test image with a URL and a rating.

use crate::schema::{
    Edit, EditBuilder, EntityDecl, PropertyDecl, PropertyValue, SchemaResult, TypeDecl, ValueType,
};

pub const SPACE_ID: &str = "MucL11M5HLWvLSVryrNKPB";

const IMAGE_URL: &str = "https://example.com/image.jpg";

/// `timestamp` makes entity and edit names unique per run.
pub fn build(mut builder: EditBuilder, timestamp: &str) -> SchemaResult<Edit> {
    let image_url = builder.create_property(PropertyDecl::new("ImageUrl", ValueType::Url))?;
    tracing::info!(image_url = %image_url, "Image URL property created");

    let rating = builder.create_property(PropertyDecl::new("Rating", ValueType::Number))?;
    tracing::info!(rating = %rating, "Rating property created");

    let image_type = builder.create_type(
        TypeDecl::new("Image").with_properties([image_url.clone(), rating.clone()]),
    )?;
    tracing::info!(image_type = %image_type, "Image type created");

    let image = builder.create_entity(
        EntityDecl::new(format!("Test Image {}", timestamp))
            .with_type(image_type)
            .with_value(image_url, PropertyValue::url(IMAGE_URL))
            .with_value(rating, PropertyValue::number("5")),
    )?;
    tracing::info!(image = %image, "Image entity created");

    Ok(builder.into_edit(format!("Create Test Image {}", timestamp), Some(image)))
}
