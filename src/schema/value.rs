//! Typed property values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::id::Id;
use crate::schema::system_ids;
use crate::schema::types::{SchemaError, SchemaResult};

/// The value type a property is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Text,
    Number,
    Checkbox,
    Url,
    Time,
    Point,
    Relation,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "TEXT",
            ValueType::Number => "NUMBER",
            ValueType::Checkbox => "CHECKBOX",
            ValueType::Url => "URL",
            ValueType::Time => "TIME",
            ValueType::Point => "POINT",
            ValueType::Relation => "RELATION",
        }
    }

    /// The system entity this value type is represented by in the graph.
    pub fn type_id(&self) -> Id {
        Id::system(match self {
            ValueType::Text => system_ids::TEXT,
            ValueType::Number => system_ids::NUMBER,
            ValueType::Checkbox => system_ids::CHECKBOX,
            ValueType::Url => system_ids::URL,
            ValueType::Time => system_ids::TIME,
            ValueType::Point => system_ids::POINT,
            ValueType::Relation => system_ids::RELATION,
        })
    }

    /// Check that `literal` is a well-formed value of this type.
    pub fn validate_literal(&self, literal: &str) -> SchemaResult<()> {
        let invalid = |reason: String| SchemaError::InvalidValue {
            value_type: *self,
            value: literal.to_string(),
            reason,
        };

        match self {
            ValueType::Text => Ok(()),
            ValueType::Number => match literal.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(()),
                Ok(_) => Err(invalid("not a finite number".into())),
                Err(e) => Err(invalid(e.to_string())),
            },
            ValueType::Checkbox => match literal {
                "true" | "false" => Ok(()),
                _ => Err(invalid("expected 'true' or 'false'".into())),
            },
            ValueType::Url => url::Url::parse(literal)
                .map(|_| ())
                .map_err(|e| invalid(e.to_string())),
            ValueType::Time => chrono::DateTime::parse_from_rfc3339(literal)
                .map(|_| ())
                .map_err(|e| invalid(e.to_string())),
            ValueType::Point => {
                let coords: Vec<&str> = literal.split(',').collect();
                if coords.len() != 2 || coords.iter().any(|c| c.trim().parse::<f64>().is_err()) {
                    return Err(invalid("expected 'lat,lon'".into()));
                }
                Ok(())
            }
            ValueType::Relation => Err(invalid("relations are not scalar values".into())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar value with its type tag, as it appears inside a triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub value: String,
}

impl Value {
    pub fn new(value_type: ValueType, value: impl Into<String>) -> Self {
        Self {
            value_type,
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(ValueType::Text, value)
    }
}

/// A value assigned to an entity property: either a typed scalar or a link
/// to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Scalar(Value),
    Relation(Id),
}

impl PropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Value::new(ValueType::Text, value))
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::Scalar(Value::new(ValueType::Number, value))
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self::Scalar(Value::new(ValueType::Url, value))
    }

    pub fn time(value: impl Into<String>) -> Self {
        Self::Scalar(Value::new(ValueType::Time, value))
    }

    pub fn checkbox(value: bool) -> Self {
        Self::Scalar(Value::new(ValueType::Checkbox, value.to_string()))
    }

    pub fn relation(target: Id) -> Self {
        Self::Relation(target)
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            PropertyValue::Scalar(v) => v.value_type,
            PropertyValue::Relation(_) => ValueType::Relation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serialization_shape() {
        let value = Value::new(ValueType::Url, "https://example.com/image.jpg");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "URL");
        assert_eq!(json["value"], "https://example.com/image.jpg");
    }

    #[test]
    fn test_number_literals() {
        assert!(ValueType::Number.validate_literal("5").is_ok());
        assert!(ValueType::Number.validate_literal("24.2").is_ok());
        assert!(ValueType::Number.validate_literal("five").is_err());
        assert!(ValueType::Number.validate_literal("inf").is_err());
    }

    #[test]
    fn test_url_and_time_literals() {
        assert!(ValueType::Url.validate_literal("https://example.com").is_ok());
        assert!(ValueType::Url.validate_literal("example.com").is_err());
        assert!(ValueType::Time.validate_literal("2024-01-15T00:00:00Z").is_ok());
        assert!(ValueType::Time.validate_literal("yesterday").is_err());
    }

    #[test]
    fn test_checkbox_and_point_literals() {
        assert!(ValueType::Checkbox.validate_literal("true").is_ok());
        assert!(ValueType::Checkbox.validate_literal("yes").is_err());
        assert!(ValueType::Point.validate_literal("52.52, 13.40").is_ok());
        assert!(ValueType::Point.validate_literal("52.52").is_err());
    }

    #[test]
    fn test_relation_is_not_a_scalar() {
        let err = ValueType::Relation.validate_literal("anything").unwrap_err();
        assert!(err.to_string().contains("RELATION"));
    }

    #[test]
    fn test_type_ids_are_distinct() {
        let all = [
            ValueType::Text,
            ValueType::Number,
            ValueType::Checkbox,
            ValueType::Url,
            ValueType::Time,
            ValueType::Point,
            ValueType::Relation,
        ];
        let ids: std::collections::HashSet<Id> = all.iter().map(|t| t.type_id()).collect();
        assert_eq!(ids.len(), all.len());
    }
}
