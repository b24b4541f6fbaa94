//! Graph mutation primitives.
//!
//! Every higher-level create (property, type, entity, relation) expands into
//! a sequence of these two ops.

use serde::{Deserialize, Serialize};

use crate::schema::id::Id;
use crate::schema::value::Value;

/// Fractional ordering key given to every new relation.
pub const INITIAL_INDEX: &str = "a0";

/// A single graph-mutation instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Op {
    /// Set `attribute` of `entity` to a scalar value.
    SetTriple { triple: Triple },
    /// Link two entities through a typed relation entity.
    CreateRelation { relation: Relation },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub entity: Id,
    pub attribute: Id,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: Id,
    #[serde(rename = "type")]
    pub relation_type: Id,
    pub from_entity: Id,
    pub to_entity: Id,
    /// Position among relations of the same type from the same entity.
    pub index: String,
}

impl Op {
    pub fn set_triple(entity: Id, attribute: Id, value: Value) -> Self {
        Op::SetTriple {
            triple: Triple {
                entity,
                attribute,
                value,
            },
        }
    }

    pub fn create_relation(from_entity: Id, relation_type: Id, to_entity: Id) -> Self {
        Op::CreateRelation {
            relation: Relation {
                id: Id::generate(),
                relation_type,
                from_entity,
                to_entity,
                index: INITIAL_INDEX.to_string(),
            },
        }
    }

    /// The entity this op writes to.
    pub fn subject(&self) -> &Id {
        match self {
            Op::SetTriple { triple } => &triple.entity,
            Op::CreateRelation { relation } => &relation.from_entity,
        }
    }

    /// Ids this op depends on besides its subject.
    pub fn references(&self) -> Vec<&Id> {
        match self {
            Op::SetTriple { triple } => vec![&triple.attribute],
            Op::CreateRelation { relation } => {
                vec![&relation.relation_type, &relation.to_entity]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::system_ids;

    #[test]
    fn test_set_triple_json_shape() {
        let entity = Id::generate();
        let op = Op::set_triple(
            entity.clone(),
            Id::system(system_ids::NAME_ATTRIBUTE),
            Value::text("Brand"),
        );
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "SET_TRIPLE");
        assert_eq!(json["triple"]["entity"], entity.as_str());
        assert_eq!(json["triple"]["attribute"], system_ids::NAME_ATTRIBUTE);
        assert_eq!(json["triple"]["value"]["type"], "TEXT");
        assert_eq!(json["triple"]["value"]["value"], "Brand");
    }

    #[test]
    fn test_create_relation_json_shape() {
        let from = Id::generate();
        let to = Id::generate();
        let op = Op::create_relation(from.clone(), Id::system(system_ids::TYPES_ATTRIBUTE), to.clone());
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "CREATE_RELATION");
        assert_eq!(json["relation"]["type"], system_ids::TYPES_ATTRIBUTE);
        assert_eq!(json["relation"]["fromEntity"], from.as_str());
        assert_eq!(json["relation"]["toEntity"], to.as_str());
        assert_eq!(json["relation"]["index"], INITIAL_INDEX);
    }

    #[test]
    fn test_subject_and_references() {
        let from = Id::generate();
        let to = Id::generate();
        let kind = Id::generate();
        let op = Op::create_relation(from.clone(), kind.clone(), to.clone());
        assert_eq!(op.subject(), &from);
        assert_eq!(op.references(), vec![&kind, &to]);
    }
}
