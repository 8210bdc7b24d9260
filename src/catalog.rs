//! Node variant catalog.
//!
//! This module contains the `schema_for` function which defines the
//! complete configuration for each node variant in the pipeline editor.
//! Every variant is pure data; the renderer in [`crate::editor`] is the
//! only code that interprets it.

use egui::Color32;

use crate::node_kind::NodeKind;
use crate::schema::{FieldKind, FieldSpec, NodeSchema, NodeStyle, PortSpec};

fn fill(r: u8, g: u8, b: u8) -> NodeStyle {
    NodeStyle {
        fill: Some(Color32::from_rgb(r, g, b)),
        ..NodeStyle::default()
    }
}

/// Returns the configuration schema for a node variant.
///
/// The schema is logically a per-variant constant: two calls with the
/// same kind always produce the same description, and all instances of a
/// variant share it.
pub fn schema_for(kind: NodeKind) -> NodeSchema {
    match kind {
        NodeKind::Input => NodeSchema {
            title: "Input",
            fields: vec![
                FieldSpec::new("inputName", "Name", FieldKind::Text).default_from_id("input_"),
                FieldSpec::new(
                    "inputType",
                    "Type",
                    FieldKind::Select {
                        options: &["Text", "File"],
                    },
                )
                .default_value("Text"),
            ],
            ports: vec![PortSpec::output("value")],
            dynamic_ports: false,
            content: None,
            style: fill(102, 126, 234),
        },
        NodeKind::Output => NodeSchema {
            title: "Output",
            fields: vec![
                FieldSpec::new("outputName", "Name", FieldKind::Text).default_from_id("output_"),
                FieldSpec::new(
                    "outputType",
                    "Type",
                    FieldKind::Select {
                        options: &["Text", "Image"],
                    },
                )
                .default_value("Text"),
            ],
            ports: vec![PortSpec::input("value")],
            dynamic_ports: false,
            content: None,
            style: fill(240, 147, 251),
        },
        NodeKind::Llm => NodeSchema {
            title: "LLM",
            fields: vec![],
            ports: vec![
                PortSpec::input("system").at(0.33),
                PortSpec::input("prompt").at(0.66),
                PortSpec::output("response"),
            ],
            dynamic_ports: false,
            content: Some("This is a LLM."),
            style: fill(79, 172, 254),
        },
        NodeKind::Text => NodeSchema {
            title: "Text",
            fields: vec![
                FieldSpec::new("text", "Text", FieldKind::TextArea).default_value("{{input}}"),
            ],
            ports: vec![PortSpec::output("output")],
            dynamic_ports: true,
            content: None,
            style: fill(250, 112, 154),
        },
        NodeKind::Transform => NodeSchema {
            title: "Transform",
            fields: vec![
                FieldSpec::new(
                    "operation",
                    "Operation",
                    FieldKind::Select {
                        options: &["Uppercase", "Lowercase", "Trim", "Reverse"],
                    },
                )
                .default_value("Uppercase"),
            ],
            ports: vec![PortSpec::input("input"), PortSpec::output("output")],
            dynamic_ports: false,
            content: Some("Transform text data"),
            style: fill(168, 237, 234),
        },
        NodeKind::Filter => NodeSchema {
            title: "Filter",
            fields: vec![
                FieldSpec::new("condition", "Condition", FieldKind::Text)
                    .default_value("length > 10"),
            ],
            ports: vec![
                PortSpec::input("input"),
                PortSpec::output("passed").at(0.4),
                PortSpec::output("failed").at(0.6),
            ],
            dynamic_ports: false,
            content: Some("Filter data based on condition"),
            style: fill(255, 236, 210),
        },
        NodeKind::Delay => NodeSchema {
            title: "Delay",
            fields: vec![
                FieldSpec::new(
                    "duration",
                    "Duration (ms)",
                    FieldKind::Number {
                        min: 0.0,
                        max: 10000.0,
                        step: 100.0,
                    },
                )
                .default_value("1000"),
            ],
            ports: vec![PortSpec::input("input"), PortSpec::output("output")],
            dynamic_ports: false,
            content: Some("Add delay to pipeline"),
            style: fill(255, 154, 158),
        },
        NodeKind::Aggregator => NodeSchema {
            title: "Aggregator",
            fields: vec![
                FieldSpec::new(
                    "method",
                    "Method",
                    FieldKind::Select {
                        options: &["Concatenate", "Merge", "Join"],
                    },
                )
                .default_value("Concatenate"),
                FieldSpec::new("separator", "Separator", FieldKind::Text).default_value(", "),
            ],
            ports: vec![
                PortSpec::input("input1").at(0.33),
                PortSpec::input("input2").at(0.5),
                PortSpec::input("input3").at(0.67),
                PortSpec::output("output"),
            ],
            dynamic_ports: false,
            content: Some("Combine multiple inputs"),
            style: fill(161, 196, 253),
        },
        NodeKind::ApiCall => NodeSchema {
            title: "API Call",
            fields: vec![
                FieldSpec::new("url", "URL", FieldKind::Text)
                    .default_value("https://api.example.com"),
                FieldSpec::new(
                    "method",
                    "Method",
                    FieldKind::Select {
                        options: &["GET", "POST", "PUT", "DELETE"],
                    },
                )
                .default_value("GET"),
            ],
            ports: vec![
                PortSpec::input("body").at(0.4),
                PortSpec::input("headers").at(0.6),
                PortSpec::output("response"),
            ],
            dynamic_ports: false,
            content: Some("Make HTTP API calls"),
            style: fill(210, 153, 194),
        },
        NodeKind::Math => NodeSchema {
            title: "Math",
            fields: vec![
                FieldSpec::new(
                    "operation",
                    "Operation",
                    FieldKind::Select {
                        options: &["Add", "Subtract", "Multiply", "Divide"],
                    },
                )
                .default_value("Add"),
            ],
            ports: vec![
                PortSpec::input("a").at(0.4),
                PortSpec::input("b").at(0.6),
                PortSpec::output("result"),
            ],
            dynamic_ports: false,
            content: Some("Apply arithmetic to inputs"),
            style: fill(94, 186, 125),
        },
        NodeKind::Note => NodeSchema {
            title: "Note",
            fields: vec![FieldSpec::new("note", "Note", FieldKind::TextArea)],
            ports: vec![],
            dynamic_ports: false,
            content: None,
            style: fill(255, 224, 130),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PortDirection, PortSide};

    #[test]
    fn every_catalog_schema_is_valid() {
        for kind in NodeKind::ALL {
            let schema = schema_for(kind);
            assert_eq!(schema.validate(), Ok(()), "schema for {kind:?}");
        }
    }

    #[test]
    fn text_is_the_only_dynamic_variant() {
        for kind in NodeKind::ALL {
            let schema = schema_for(kind);
            assert_eq!(schema.dynamic_ports, kind == NodeKind::Text, "{kind:?}");
        }
    }

    #[test]
    fn dynamic_variants_have_a_designated_text_field() {
        let schema = schema_for(NodeKind::Text);
        assert_eq!(schema.text_field().unwrap().name, "text");
    }

    #[test]
    fn inputs_sit_left_and_outputs_right() {
        for kind in NodeKind::ALL {
            for port in schema_for(kind).ports {
                match port.direction {
                    PortDirection::Input => assert_eq!(port.side, PortSide::Left),
                    PortDirection::Output => assert_eq!(port.side, PortSide::Right),
                }
            }
        }
    }

    #[test]
    fn api_call_keeps_its_explicit_hints() {
        let schema = schema_for(NodeKind::ApiCall);
        let hints: Vec<Option<f32>> = schema.inputs().map(|p| p.position_hint).collect();
        assert_eq!(hints, vec![Some(0.4), Some(0.6)]);
    }

    #[test]
    fn schema_for_is_stable_across_calls() {
        let a = schema_for(NodeKind::Aggregator);
        let b = schema_for(NodeKind::Aggregator);
        assert_eq!(a.title, b.title);
        assert_eq!(a.fields.len(), b.fields.len());
        assert_eq!(a.ports.len(), b.ports.len());
    }
}
