//! Declarative node configuration.
//!
//! A [`NodeSchema`] is the complete description of one node variant: its
//! title, editable fields, static ports, whether it derives extra input
//! ports from template variables, and its visual overrides. The generic
//! renderer interprets these descriptions; no node variant has code of
//! its own.

use egui::Color32;
use thiserror::Error;

/// Which input control a field renders as.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input. The first field of this kind drives dynamic
    /// port derivation and adaptive sizing.
    TextArea,
    /// Dropdown over a fixed option list.
    Select { options: &'static [&'static str] },
    /// Numeric input with range and step.
    Number { min: f64, max: f64, step: f64 },
}

/// Default value for a field when no persisted value is supplied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldDefault {
    /// Fixed literal.
    Literal(&'static str),
    /// Derived from the node instance id: `<prefix><short-id>`.
    /// Used by the Input/Output name fields so every placed node gets a
    /// distinct suggested name.
    FromNodeId { prefix: &'static str },
}

#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// Key into the node's field state record. Unique within a schema.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            default: FieldDefault::Literal(""),
        }
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = FieldDefault::Literal(value);
        self
    }

    pub fn default_from_id(mut self, prefix: &'static str) -> Self {
        self.default = FieldDefault::FromNodeId { prefix };
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// Which node edge a port sits on. By convention inputs sit on the left
/// edge and outputs on the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
pub struct PortSpec {
    /// Port id, unique within the node once namespaced as
    /// `"{node_id}-{port_id}"`.
    pub id: &'static str,
    pub direction: PortDirection,
    pub side: PortSide,
    /// Fractional vertical offset along the edge, in (0, 1). `None` means
    /// the even-spacing rule decides.
    pub position_hint: Option<f32>,
}

impl PortSpec {
    pub fn input(id: &'static str) -> Self {
        Self {
            id,
            direction: PortDirection::Input,
            side: PortSide::Left,
            position_hint: None,
        }
    }

    pub fn output(id: &'static str) -> Self {
        Self {
            id,
            direction: PortDirection::Output,
            side: PortSide::Right,
            position_hint: None,
        }
    }

    pub fn at(mut self, hint: f32) -> Self {
        self.position_hint = Some(hint);
        self
    }
}

/// Per-variant visual overrides. Anything left `None` falls back to the
/// editor defaults in [`crate::editor::style`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeStyle {
    pub fill: Option<Color32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// The declarative description of one node variant. Immutable once built;
/// shared (by reconstruction) across every instance of the variant.
#[derive(Clone, Debug)]
pub struct NodeSchema {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    pub ports: Vec<PortSpec>,
    /// If set, one extra input port is derived per distinct `{{variable}}`
    /// in the designated text field, and the node sizes itself to its text.
    pub dynamic_ports: bool,
    /// Optional descriptive line rendered under the title.
    pub content: Option<&'static str>,
    pub style: NodeStyle,
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("schema '{0}': duplicate field name '{1}'")]
    DuplicateField(&'static str, &'static str),
    #[error("schema '{0}': duplicate port id '{1}'")]
    DuplicatePort(&'static str, &'static str),
    #[error("schema '{0}': position hint {1} for port '{2}' outside (0, 1)")]
    HintOutOfRange(&'static str, f32, &'static str),
    #[error("schema '{0}': dynamic ports enabled but no text field present")]
    NoTextField(&'static str),
}

impl NodeSchema {
    /// The field that drives dynamic-port derivation and size estimation:
    /// the first multi-line field, falling back to the first single-line
    /// field. `None` for schemas with no text-bearing field at all.
    pub fn text_field(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::TextArea)
            .or_else(|| self.fields.iter().find(|f| f.kind == FieldKind::Text))
    }

    pub fn inputs(&self) -> impl Iterator<Item = &PortSpec> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::Input)
    }

    /// Checks the structural invariants a schema must uphold. Violations
    /// are programming errors in the catalog, caught by tests rather than
    /// handled at render time.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField(self.title, field.name));
            }
        }
        for (i, port) in self.ports.iter().enumerate() {
            if self.ports[..i].iter().any(|p| p.id == port.id) {
                return Err(SchemaError::DuplicatePort(self.title, port.id));
            }
            if let Some(hint) = port.position_hint {
                if hint <= 0.0 || hint >= 1.0 {
                    return Err(SchemaError::HintOutOfRange(self.title, hint, port.id));
                }
            }
        }
        if self.dynamic_ports && self.text_field().is_none() {
            return Err(SchemaError::NoTextField(self.title));
        }
        Ok(())
    }
}
