//! Edit builder: assigns ids and accumulates ops in dependency order.
//!
//! # Responsibilities
//! - Expand property/type/entity/relation declarations into primitive ops
//! - Reject references to ids that do not exist yet
//! - Check scalar values against their property's declared type
//!
//! # Design Decisions
//! - Each create validates fully before emitting, so a failed create leaves
//!   the builder unchanged
//! - The builder is consumed by `into_edit`; an edit cannot grow afterwards

use std::collections::HashMap;

use crate::schema::edit::Edit;
use crate::schema::id::Id;
use crate::schema::ops::{Op, Relation, INITIAL_INDEX};
use crate::schema::system_ids;
use crate::schema::types::{
    EntityDecl, PropertyDecl, RelationDecl, SchemaError, SchemaResult, TypeDecl,
};
use crate::schema::value::{PropertyValue, Value, ValueType};

/// What a known id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Known {
    Property(ValueType),
    Type,
    Entity,
}

/// Exclusively owned accumulator of graph operations.
#[derive(Debug, Default)]
pub struct EditBuilder {
    ops: Vec<Op>,
    known: HashMap<Id, Known>,
}

impl EditBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property and return its id.
    pub fn create_property(&mut self, decl: PropertyDecl) -> SchemaResult<Id> {
        let name = require_name(&decl.name, "property")?;
        let id = Id::generate();

        let mut ops = describe(&id, name, decl.description.as_deref());
        ops.push(Op::create_relation(
            id.clone(),
            Id::system(system_ids::TYPES_ATTRIBUTE),
            Id::system(system_ids::PROPERTY),
        ));
        ops.push(Op::create_relation(
            id.clone(),
            Id::system(system_ids::VALUE_TYPE_ATTRIBUTE),
            decl.value_type.type_id(),
        ));

        tracing::debug!(id = %id, name = name, value_type = %decl.value_type, "Property created");
        self.commit(id.clone(), Known::Property(decl.value_type), ops);
        Ok(id)
    }

    /// Create a type whose instances carry `decl.properties`.
    pub fn create_type(&mut self, decl: TypeDecl) -> SchemaResult<Id> {
        let name = require_name(&decl.name, "type")?;
        for property in &decl.properties {
            self.expect_property(property)?;
        }
        let id = Id::generate();

        let mut ops = describe(&id, name, decl.description.as_deref());
        ops.push(Op::create_relation(
            id.clone(),
            Id::system(system_ids::TYPES_ATTRIBUTE),
            Id::system(system_ids::SCHEMA_TYPE),
        ));
        for property in decl.properties {
            ops.push(Op::create_relation(
                id.clone(),
                Id::system(system_ids::PROPERTIES),
                property,
            ));
        }

        tracing::debug!(id = %id, name = name, "Type created");
        self.commit(id.clone(), Known::Type, ops);
        Ok(id)
    }

    /// Create an entity with the given types and property values.
    pub fn create_entity(&mut self, decl: EntityDecl) -> SchemaResult<Id> {
        let name = match &decl.name {
            Some(name) => Some(require_name(name, "entity")?),
            None => None,
        };
        for type_id in &decl.types {
            self.expect_type(type_id)?;
        }
        self.check_values(&decl.values)?;
        let id = Id::generate();

        let mut ops = match name {
            Some(name) => describe(&id, name, decl.description.as_deref()),
            None => Vec::new(),
        };
        for type_id in decl.types {
            ops.push(Op::create_relation(
                id.clone(),
                Id::system(system_ids::TYPES_ATTRIBUTE),
                type_id,
            ));
        }
        ops.extend(value_ops(&id, decl.values));

        tracing::debug!(id = %id, ops = ops.len(), "Entity created");
        self.commit(id.clone(), Known::Entity, ops);
        Ok(id)
    }

    /// Link two existing entities. Returns the id of the relation entity.
    pub fn create_relation(&mut self, decl: RelationDecl) -> SchemaResult<Id> {
        self.expect_entity(&decl.from)?;
        self.expect_entity(&decl.to)?;
        self.expect_relation_type(&decl.relation_type)?;
        self.check_values(&decl.values)?;

        let id = Id::generate();
        let mut ops = vec![Op::CreateRelation {
            relation: Relation {
                id: id.clone(),
                relation_type: decl.relation_type,
                from_entity: decl.from,
                to_entity: decl.to,
                index: INITIAL_INDEX.to_string(),
            },
        }];
        ops.extend(value_ops(&id, decl.values));

        tracing::debug!(id = %id, "Relation created");
        self.commit(id.clone(), Known::Entity, ops);
        Ok(id)
    }

    /// Make an entity created in an earlier edit referenceable.
    pub fn import_entity(&mut self, id: Id) {
        self.known.entry(id).or_insert(Known::Entity);
    }

    /// Make a type created in an earlier edit referenceable.
    pub fn import_type(&mut self, id: Id) {
        self.known.insert(id, Known::Type);
    }

    /// Make a property created in an earlier edit referenceable.
    pub fn import_property(&mut self, id: Id, value_type: ValueType) {
        self.known.insert(id, Known::Property(value_type));
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Finish the batch.
    pub fn into_edit(self, name: impl Into<String>, author: Option<Id>) -> Edit {
        Edit::new(name, author, self.ops)
    }

    fn commit(&mut self, id: Id, kind: Known, ops: Vec<Op>) {
        self.ops.extend(ops);
        self.known.insert(id, kind);
    }

    /// Returns the declared value type, or `None` for system attributes.
    fn expect_property(&self, id: &Id) -> SchemaResult<Option<ValueType>> {
        match self.known.get(id) {
            Some(Known::Property(value_type)) => Ok(Some(*value_type)),
            None if system_ids::is_system(id) => Ok(None),
            _ => Err(unknown(id, "property")),
        }
    }

    fn expect_type(&self, id: &Id) -> SchemaResult<()> {
        match self.known.get(id) {
            Some(Known::Type) => Ok(()),
            None if system_ids::is_system(id) => Ok(()),
            _ => Err(unknown(id, "type")),
        }
    }

    fn expect_entity(&self, id: &Id) -> SchemaResult<()> {
        if self.known.contains_key(id) || system_ids::is_system(id) {
            Ok(())
        } else {
            Err(unknown(id, "entity"))
        }
    }

    fn expect_relation_type(&self, id: &Id) -> SchemaResult<()> {
        match self.known.get(id) {
            Some(Known::Type) | Some(Known::Property(ValueType::Relation)) => Ok(()),
            None if system_ids::is_system(id) => Ok(()),
            _ => Err(unknown(id, "relation type")),
        }
    }

    fn check_values(&self, values: &[(Id, PropertyValue)]) -> SchemaResult<()> {
        for (property, value) in values {
            let declared = self.expect_property(property)?;
            if let Some(expected) = declared {
                if expected != value.value_type() {
                    return Err(SchemaError::ValueTypeMismatch {
                        property: property.clone(),
                        expected,
                        actual: value.value_type(),
                    });
                }
            }
            match value {
                PropertyValue::Scalar(v) => v.value_type.validate_literal(&v.value)?,
                PropertyValue::Relation(target) => self.expect_entity(target)?,
            }
        }
        Ok(())
    }
}

fn require_name<'a>(name: &'a str, kind: &'static str) -> SchemaResult<&'a str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::EmptyName { kind });
    }
    Ok(trimmed)
}

fn unknown(id: &Id, expected: &'static str) -> SchemaError {
    SchemaError::UnknownId {
        id: id.clone(),
        expected,
    }
}

fn describe(id: &Id, name: &str, description: Option<&str>) -> Vec<Op> {
    let mut ops = vec![Op::set_triple(
        id.clone(),
        Id::system(system_ids::NAME_ATTRIBUTE),
        Value::text(name),
    )];
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        ops.push(Op::set_triple(
            id.clone(),
            Id::system(system_ids::DESCRIPTION_ATTRIBUTE),
            Value::text(description),
        ));
    }
    ops
}

fn value_ops(subject: &Id, values: Vec<(Id, PropertyValue)>) -> Vec<Op> {
    values
        .into_iter()
        .map(|(property, value)| match value {
            PropertyValue::Scalar(value) => Op::set_triple(subject.clone(), property, value),
            PropertyValue::Relation(target) => Op::create_relation(subject.clone(), property, target),
        })
        .collect()
}
