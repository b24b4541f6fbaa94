//! Camera ownership schema: the properties and types needed to say who
//! owns which camera.

use crate::schema::{Edit, EditBuilder, Id, PropertyDecl, SchemaResult, TypeDecl, ValueType};

pub const SPACE_ID: &str = "FuvKkspixpHymrWbrRZDfc";

/// Ids assigned by [`define_schema`].
#[derive(Debug, Clone)]
pub struct CameraSchema {
    pub brand: Id,
    pub model: Id,
    pub color: Id,
    pub megapixels: Id,
    pub purchase_date: Id,
    pub person: Id,
    pub camera: Id,
    pub owns: Id,
}

/// Add the camera properties and types to `builder`.
pub fn define_schema(builder: &mut EditBuilder) -> SchemaResult<CameraSchema> {
    let brand = builder.create_property(PropertyDecl::new("Brand", ValueType::Text))?;
    let model = builder.create_property(PropertyDecl::new("Model", ValueType::Text))?;
    let color = builder.create_property(PropertyDecl::new("Color", ValueType::Text))?;
    let megapixels = builder.create_property(PropertyDecl::new("Megapixels", ValueType::Number))?;
    let purchase_date = builder.create_property(PropertyDecl::new("Purchase Date", ValueType::Time))?;

    tracing::info!(
        brand = %brand,
        model = %model,
        color = %color,
        megapixels = %megapixels,
        purchase_date = %purchase_date,
        "Created properties"
    );

    let person = builder.create_type(TypeDecl::new("Person"))?;
    let camera = builder.create_type(TypeDecl::new("Camera").with_properties([
        brand.clone(),
        model.clone(),
        color.clone(),
        megapixels.clone(),
    ]))?;
    let owns = builder.create_type(
        TypeDecl::new("Owns")
            .with_description("Defines ownership relationships")
            .with_properties([purchase_date.clone()]),
    )?;

    tracing::info!(person = %person, camera = %camera, owns = %owns, "Created types");

    Ok(CameraSchema {
        brand,
        model,
        color,
        megapixels,
        purchase_date,
        person,
        camera,
        owns,
    })
}

pub fn build(mut builder: EditBuilder) -> SchemaResult<Edit> {
    define_schema(&mut builder)?;
    Ok(builder.into_edit("Create Properties and Types", None))
}
