//! Per-render node plan.
//!
//! One render pass resolves a node's current field values into everything
//! the canvas needs to draw it: final dimensions, the derived variable
//! list, and the placed static and dynamic ports. The plan is a pure
//! function of schema plus field state, recomputed from scratch every
//! pass -- derived state is never patched incrementally, which is what
//! keeps dynamic-port ordering and dedup correct as the user types.

use egui::Vec2;
use uuid::Uuid;

use crate::fields::FieldValues;
use crate::schema::{NodeSchema, PortDirection, PortSide};
use crate::{layout, sizing, vars};

/// Vertical room for title bar and padding above a dynamic node's text
/// area.
const DYNAMIC_CHROME: f32 = 60.0;

/// Default width for fixed-size nodes without a style override.
const FIXED_WIDTH: f32 = 200.0;

/// One port with its final position resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPort {
    /// Canvas-wide unique id: `"{node_id}-{port_id}"`.
    pub id: String,
    /// Bare port id within the node (edge endpoints use this).
    pub port: String,
    pub direction: PortDirection,
    pub side: PortSide,
    /// Fractional vertical offset along the node edge, in (0, 1).
    pub offset: f32,
    /// True for ports derived from template variables.
    pub dynamic: bool,
}

/// Everything the renderer needs to draw one node.
#[derive(Clone, Debug)]
pub struct NodePlan {
    pub size: Vec2,
    /// Distinct template variables of the designated text field, in
    /// first-occurrence order. Empty for non-dynamic schemas.
    pub variables: Vec<String>,
    /// Static ports first, then dynamic ports, in render order.
    pub ports: Vec<PlacedPort>,
}

/// Resolves a node's render plan from its schema and current field state.
pub fn plan_node(node_id: Uuid, schema: &NodeSchema, values: &FieldValues) -> NodePlan {
    let text = schema
        .text_field()
        .map(|f| values.get(f.name))
        .unwrap_or("");

    let variables = if schema.dynamic_ports {
        vars::scan(text)
    } else {
        Vec::new()
    };

    // Dynamic-port nodes are size-adaptive by convention; everything else
    // takes its dimensions from the schema.
    let size = if schema.dynamic_ports {
        let body = sizing::estimate(text);
        Vec2::new(body.x, body.y + DYNAMIC_CHROME)
    } else {
        Vec2::new(
            schema.style.width.unwrap_or(FIXED_WIDTH),
            schema.style.height.unwrap_or_else(|| natural_height(schema)),
        )
    };

    let mut ports = Vec::new();

    // Static ports: hinted positions win, the rest take their slot in the
    // even spacing of their edge.
    for side in [PortSide::Left, PortSide::Right] {
        let on_side: Vec<_> = schema.ports.iter().filter(|p| p.side == side).collect();
        for (index, spec) in on_side.iter().enumerate() {
            ports.push(PlacedPort {
                id: format!("{node_id}-{}", spec.id),
                port: spec.id.to_string(),
                direction: spec.direction,
                side,
                offset: layout::static_offset(spec.position_hint, index, on_side.len()),
                dynamic: false,
            });
        }
    }

    // Dynamic ports: always inputs on the left edge, evenly spaced as one
    // set. Recomputed wholesale, so a variable removed from the middle
    // shifts every port below it. A variable that shares a name with a
    // static port yields two placed ports with the same id; edge lookup
    // resolves to the static one (first in the list).
    let offsets = layout::even_offsets(variables.len());
    for (variable, offset) in variables.iter().zip(offsets) {
        ports.push(PlacedPort {
            id: format!("{node_id}-{variable}"),
            port: variable.clone(),
            direction: PortDirection::Input,
            side: PortSide::Left,
            offset,
            dynamic: true,
        });
    }

    NodePlan {
        size,
        variables,
        ports,
    }
}

/// Height for fixed-size nodes that let content flow: title bar plus a
/// row per field, plus the auxiliary line if present.
fn natural_height(schema: &NodeSchema) -> f32 {
    let mut height = 42.0;
    if schema.content.is_some() {
        height += 20.0;
    }
    height += schema.fields.len() as f32 * 46.0;
    height.max(sizing::MIN_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema_for;
    use crate::node_kind::NodeKind;

    const EPS: f32 = 1e-5;

    fn dynamic_ports(plan: &NodePlan) -> Vec<&PlacedPort> {
        plan.ports.iter().filter(|p| p.dynamic).collect()
    }

    #[test]
    fn text_node_exposes_one_port_per_distinct_variable() {
        let schema = schema_for(NodeKind::Text);
        let id = Uuid::new_v4();
        let mut values = FieldValues::initialize(&schema, id, None);
        values.set(
            "text",
            "Hello {{name}}, your {{item}} is ready. {{name}}".to_string(),
        );

        let plan = plan_node(id, &schema, &values);
        let dynamic = dynamic_ports(&plan);
        assert_eq!(dynamic.len(), 2);
        assert!(dynamic[0].id.ends_with("name"));
        assert!(dynamic[1].id.ends_with("item"));
        assert!((dynamic[0].offset - 1.0 / 3.0).abs() < EPS);
        assert!((dynamic[1].offset - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn removing_a_variable_relayouts_the_remaining_ports() {
        let schema = schema_for(NodeKind::Text);
        let id = Uuid::new_v4();
        let mut values = FieldValues::initialize(&schema, id, None);
        values.set(
            "text",
            "Hello {{name}}, your {{item}} is ready. {{name}}".to_string(),
        );
        values.set("text", "Hello {{name}}, your order is ready. {{name}}".to_string());

        let plan = plan_node(id, &schema, &values);
        let dynamic = dynamic_ports(&plan);
        assert_eq!(dynamic.len(), 1);
        assert_eq!(dynamic[0].port, "name");
        assert!((dynamic[0].offset - 0.5).abs() < EPS);
    }

    #[test]
    fn port_ids_are_namespaced_by_node_id() {
        let schema = schema_for(NodeKind::Llm);
        let id = Uuid::new_v4();
        let values = FieldValues::initialize(&schema, id, None);
        let plan = plan_node(id, &schema, &values);
        for port in &plan.ports {
            assert_eq!(port.id, format!("{id}-{}", port.port));
        }
    }

    #[test]
    fn static_hints_are_untouched_by_dynamic_logic() {
        let schema = schema_for(NodeKind::ApiCall);
        let id = Uuid::new_v4();
        let mut values = FieldValues::initialize(&schema, id, None);
        // Template syntax in a non-dynamic schema derives nothing.
        values.set("url", "https://{{host}}/v1".to_string());

        let plan = plan_node(id, &schema, &values);
        assert!(plan.variables.is_empty());
        assert!(dynamic_ports(&plan).is_empty());

        let inputs: Vec<f32> = plan
            .ports
            .iter()
            .filter(|p| p.direction == PortDirection::Input)
            .map(|p| p.offset)
            .collect();
        assert_eq!(inputs, vec![0.4, 0.6]);
    }

    #[test]
    fn lone_unhinted_output_sits_at_the_middle() {
        let schema = schema_for(NodeKind::Aggregator);
        let id = Uuid::new_v4();
        let values = FieldValues::initialize(&schema, id, None);
        let plan = plan_node(id, &schema, &values);
        let output = plan
            .ports
            .iter()
            .find(|p| p.direction == PortDirection::Output)
            .unwrap();
        assert!((output.offset - 0.5).abs() < EPS);
    }

    #[test]
    fn dynamic_nodes_size_to_their_text() {
        let schema = schema_for(NodeKind::Text);
        let id = Uuid::new_v4();
        let mut values = FieldValues::initialize(&schema, id, None);
        values.set("text", String::new());
        let empty = plan_node(id, &schema, &values);
        assert_eq!(empty.size, Vec2::new(200.0, 60.0 + DYNAMIC_CHROME));

        let long_line = "z".repeat(40);
        values.set("text", vec![long_line.as_str(); 5].join("\n"));
        let grown = plan_node(id, &schema, &values);
        assert!(grown.size.x > empty.size.x);
        assert!(grown.size.y > empty.size.y);
    }

    #[test]
    fn fixed_nodes_use_schema_dimensions() {
        let schema = schema_for(NodeKind::Llm);
        let id = Uuid::new_v4();
        let values = FieldValues::initialize(&schema, id, None);
        let plan = plan_node(id, &schema, &values);
        assert_eq!(plan.size.x, FIXED_WIDTH);
        // Texty field edits on other nodes never affect a fixed node.
        assert!(plan.variables.is_empty());
    }
}
