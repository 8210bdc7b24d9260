//! Per-instance field state.
//!
//! Every node instance owns one record mapping field name to current
//! value. The record is type-blind string storage: validation (if any)
//! belongs to the widget rendering the field, never to the store, so
//! transiently invalid input (an empty string mid-edit of a number) is
//! representable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{FieldDefault, NodeSchema};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    /// Builds the record for a freshly placed or reloaded node: for each
    /// schema field, a non-empty persisted value wins, then the schema
    /// default, then the empty string. Keys in `persisted` that no schema
    /// field declares are dropped.
    pub fn initialize(
        schema: &NodeSchema,
        node_id: Uuid,
        persisted: Option<&HashMap<String, String>>,
    ) -> Self {
        let mut values = HashMap::new();
        for field in &schema.fields {
            let stored = persisted
                .and_then(|data| data.get(field.name))
                .filter(|v| !v.is_empty());
            let value = match stored {
                Some(v) => v.clone(),
                None => match field.default {
                    FieldDefault::Literal(text) => text.to_string(),
                    FieldDefault::FromNodeId { prefix } => {
                        format!("{prefix}{}", short_id(node_id))
                    }
                },
            };
            values.insert(field.name.to_string(), value);
        }
        Self { values }
    }

    /// Replaces the value of exactly one field. Other keys are untouched.
    pub fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// First segment of the uuid, enough to tell instances apart in a
/// suggested field value.
fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema_for;
    use crate::node_kind::NodeKind;

    #[test]
    fn defaults_seed_missing_values() {
        let schema = schema_for(NodeKind::ApiCall);
        let values = FieldValues::initialize(&schema, Uuid::new_v4(), None);
        assert_eq!(values.get("url"), "https://api.example.com");
        assert_eq!(values.get("method"), "GET");
    }

    #[test]
    fn persisted_values_override_defaults() {
        let schema = schema_for(NodeKind::ApiCall);
        let mut persisted = HashMap::new();
        persisted.insert("method".to_string(), "POST".to_string());
        let values = FieldValues::initialize(&schema, Uuid::new_v4(), Some(&persisted));
        assert_eq!(values.get("method"), "POST");
        assert_eq!(values.get("url"), "https://api.example.com");
    }

    #[test]
    fn empty_persisted_values_fall_back_to_defaults() {
        let schema = schema_for(NodeKind::Transform);
        let mut persisted = HashMap::new();
        persisted.insert("operation".to_string(), String::new());
        let values = FieldValues::initialize(&schema, Uuid::new_v4(), Some(&persisted));
        assert_eq!(values.get("operation"), "Uppercase");
    }

    #[test]
    fn name_fields_derive_from_the_node_id() {
        let id = Uuid::new_v4();
        let schema = schema_for(NodeKind::Input);
        let values = FieldValues::initialize(&schema, id, None);
        assert_eq!(values.get("inputName"), format!("input_{}", &id.to_string()[..8]));
    }

    #[test]
    fn set_touches_exactly_one_key() {
        let schema = schema_for(NodeKind::Aggregator);
        let mut values = FieldValues::initialize(&schema, Uuid::new_v4(), None);
        let before = values.clone();

        values.set("method", "Join".to_string());
        assert_eq!(values.get("method"), "Join");
        assert_eq!(values.get("separator"), before.get("separator"));

        // Reverting the change restores the original record exactly.
        values.set("method", before.get("method").to_string());
        assert_eq!(values, before);
    }

    #[test]
    fn store_performs_no_validation() {
        let schema = schema_for(NodeKind::Transform);
        let mut values = FieldValues::initialize(&schema, Uuid::new_v4(), None);
        // Not in the option list; the store records it anyway.
        values.set("operation", "Rot13".to_string());
        assert_eq!(values.get("operation"), "Rot13");
    }
}
