//! The pipeline graph store.
//!
//! Holds the canonical node and edge lists plus each node's position and
//! field data record. The rendering core reads a node's record at
//! initialization and writes edits back one key at a time; everything
//! else about ownership and lifecycle lives here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::schema_for;
use crate::fields::FieldValues;
use crate::node_kind::NodeKind;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineGraph {
    pub nodes: HashMap<Uuid, Node>,
    pub edges: Vec<Edge>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub kind: NodeKind,
    pub position: (f32, f32),
    pub values: FieldValues,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub from_node: Uuid,
    pub from_port: String,
    pub to_node: Uuid,
    pub to_port: String,
}

impl Node {
    /// A freshly placed node, field record seeded from schema defaults.
    pub fn new(kind: NodeKind, position: (f32, f32)) -> Self {
        let id = Uuid::new_v4();
        let values = FieldValues::initialize(&schema_for(kind), id, None);
        Self {
            id,
            kind,
            position,
            values,
        }
    }

    /// A node reloaded from externally persisted data. Persisted values
    /// win over schema defaults; the record is read once here and never
    /// written back to.
    pub fn from_persisted(
        kind: NodeKind,
        position: (f32, f32),
        data: &HashMap<String, String>,
    ) -> Self {
        let id = Uuid::new_v4();
        let values = FieldValues::initialize(&schema_for(kind), id, Some(data));
        Self {
            id,
            kind,
            position,
            values,
        }
    }
}

impl PipelineGraph {
    pub fn add_node(&mut self, kind: NodeKind, position: (f32, f32)) -> Uuid {
        let node = Node::new(kind, position);
        let id = node.id;
        log::info!("add node {:?} ({})", kind, id);
        self.nodes.insert(id, node);
        id
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: Uuid) {
        if self.nodes.remove(&id).is_some() {
            self.edges.retain(|e| e.from_node != id && e.to_node != id);
            log::info!("remove node {}", id);
        }
    }

    /// Connects an output port to an input port. Rejects self-loops and
    /// duplicate edges; port existence is the caller's concern since
    /// dynamic ports come and go with the node's text.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.from_node == edge.to_node || self.edges.contains(&edge) {
            return false;
        }
        log::info!(
            "connect {}:{} -> {}:{}",
            edge.from_node,
            edge.from_port,
            edge.to_node,
            edge.to_port
        );
        self.edges.push(edge);
        true
    }

    pub fn remove_edge(&mut self, index: usize) {
        if index < self.edges.len() {
            let edge = self.edges.remove(index);
            log::info!(
                "disconnect {}:{} -> {}:{}",
                edge.from_node,
                edge.from_port,
                edge.to_node,
                edge.to_port
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: Uuid, to: Uuid) -> Edge {
        Edge {
            from_node: from,
            from_port: "output".to_string(),
            to_node: to,
            to_port: "input".to_string(),
        }
    }

    #[test]
    fn removing_a_node_drops_its_edges() {
        let mut graph = PipelineGraph::default();
        let a = graph.add_node(NodeKind::Input, (0.0, 0.0));
        let b = graph.add_node(NodeKind::Output, (100.0, 0.0));
        let c = graph.add_node(NodeKind::Llm, (200.0, 0.0));
        assert!(graph.add_edge(edge(a, b)));
        assert!(graph.add_edge(edge(b, c)));

        graph.remove_node(b);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn self_loops_and_duplicates_are_rejected() {
        let mut graph = PipelineGraph::default();
        let a = graph.add_node(NodeKind::Input, (0.0, 0.0));
        let b = graph.add_node(NodeKind::Output, (100.0, 0.0));

        assert!(!graph.add_edge(edge(a, a)));
        assert!(graph.add_edge(edge(a, b)));
        assert!(!graph.add_edge(edge(a, b)));
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn new_nodes_are_seeded_from_schema_defaults() {
        let node = Node::new(NodeKind::Text, (0.0, 0.0));
        assert_eq!(node.values.get("text"), "{{input}}");
    }

    #[test]
    fn persisted_data_survives_a_reload() {
        let mut data = HashMap::new();
        data.insert("text".to_string(), "{{a}} and {{b}}".to_string());
        let node = Node::from_persisted(NodeKind::Text, (0.0, 0.0), &data);
        assert_eq!(node.values.get("text"), "{{a}} and {{b}}");
    }
}
