//! Schema declarations and error definitions.

use thiserror::Error;

use crate::schema::id::Id;
use crate::schema::value::{PropertyValue, ValueType};

/// Errors raised while building an edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A property, type or entity was declared without a name.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// An op referenced an id that was never created or imported.
    #[error("Unknown {expected} id: {id}")]
    UnknownId { id: Id, expected: &'static str },

    /// A value's type tag disagrees with its property's declared type.
    #[error("Property {property} expects {expected} values, got {actual}")]
    ValueTypeMismatch {
        property: Id,
        expected: ValueType,
        actual: ValueType,
    },

    /// A scalar literal does not parse as its declared type.
    #[error("Invalid {value_type} value '{value}': {reason}")]
    InvalidValue {
        value_type: ValueType,
        value: String,
        reason: String,
    },

    /// An externally supplied id is not base58.
    #[error("Invalid id '{0}'")]
    InvalidId(String),
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A property to create: a name and the type of values it holds.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: String,
    pub value_type: ValueType,
    pub description: Option<String>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A type to create, listing the properties its instances carry.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub description: Option<String>,
    pub properties: Vec<Id>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Id>) -> Self {
        self.properties.extend(properties);
        self
    }
}

/// An entity to create. Values are keyed by property id; setting the same
/// property twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct EntityDecl {
    pub name: Option<String>,
    pub description: Option<String>,
    pub types: Vec<Id>,
    pub values: Vec<(Id, PropertyValue)>,
}

impl EntityDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An entity with no name triple.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, type_id: Id) -> Self {
        self.types.push(type_id);
        self
    }

    pub fn with_value(mut self, property: Id, value: PropertyValue) -> Self {
        upsert(&mut self.values, property, value);
        self
    }
}

/// A typed relation between two existing entities. The relation is itself an
/// entity and may carry scalar values (e.g. a purchase date).
#[derive(Debug, Clone)]
pub struct RelationDecl {
    pub from: Id,
    pub to: Id,
    pub relation_type: Id,
    pub values: Vec<(Id, PropertyValue)>,
}

impl RelationDecl {
    pub fn new(from: Id, relation_type: Id, to: Id) -> Self {
        Self {
            from,
            to,
            relation_type,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, property: Id, value: PropertyValue) -> Self {
        upsert(&mut self.values, property, value);
        self
    }
}

fn upsert(values: &mut Vec<(Id, PropertyValue)>, property: Id, value: PropertyValue) {
    match values.iter_mut().find(|(p, _)| *p == property) {
        Some(slot) => slot.1 = value,
        None => values.push((property, value)),
    }
}
