//! # Pipeline Editor
//!
//! The visual canvas hosting the pipeline nodes.
//!
//! ## Submodules
//! - [`node_renderer`]: the generic schema-driven node renderer
//! - [`connection_renderer`]: bezier edge drawing and hit testing
//! - [`style`]: shared styling defaults
//!
//! The canvas itself stays deliberately small: place nodes, drag them,
//! connect ports, delete edges and nodes. Panning, zooming and undo are
//! out of scope.

pub mod connection_renderer;
pub mod node_renderer;
pub mod style;

use std::collections::HashMap;

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use uuid::Uuid;

use crate::catalog::schema_for;
use crate::graph::{Edge, PipelineGraph};
use crate::plan::{NodePlan, plan_node};
use node_renderer::{PortClick, draw_node, port_pos};
pub use style::EditorStyle;

#[derive(Default)]
pub struct PipelineEditor {
    pub style: EditorStyle,
    /// First endpoint of a connection in progress.
    pub pending_connection: Option<PortClick>,
}

impl PipelineEditor {
    pub fn show(&mut self, ui: &mut egui::Ui, graph: &mut PipelineGraph) {
        let canvas_rect = ui.max_rect();
        let origin = canvas_rect.min;
        ui.painter()
            .rect_filled(canvas_rect, 0.0, self.style.background);

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.pending_connection = None;
        }

        // Plan every node up front; edge endpoints need port positions
        // before any node is drawn.
        let plans: HashMap<Uuid, NodePlan> = graph
            .nodes
            .iter()
            .map(|(id, node)| (*id, plan_node(*id, &schema_for(node.kind), &node.values)))
            .collect();

        // Edges whose port vanished (a template variable deleted from the
        // text) are dropped here; the rendered ports are always exactly
        // the current plan's.
        graph.edges.retain(|edge| {
            let has_port = |node_id: Uuid, port: &str| {
                plans
                    .get(&node_id)
                    .is_some_and(|p| p.ports.iter().any(|pp| pp.port == port))
            };
            let keep = has_port(edge.from_node, &edge.from_port)
                && has_port(edge.to_node, &edge.to_port);
            if !keep {
                log::debug!(
                    "drop dangling edge {}:{} -> {}:{}",
                    edge.from_node,
                    edge.from_port,
                    edge.to_node,
                    edge.to_port
                );
            }
            keep
        });

        // Draw edges under the nodes, remembering their geometry for the
        // click-to-delete pass.
        let mut edge_geometry = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let from = self.endpoint(graph, &plans, origin, edge.from_node, &edge.from_port);
            let to = self.endpoint(graph, &plans, origin, edge.to_node, &edge.to_port);
            if let (Some(from), Some(to)) = (from, to) {
                connection_renderer::draw_bezier(ui.painter(), from.0, to.0, from.1, to.1);
                edge_geometry.push((from.0, to.0));
            }
        }

        // Nodes, in a stable order so interaction ids do not jump around.
        let mut ids: Vec<Uuid> = graph.nodes.keys().copied().collect();
        ids.sort();

        let mut port_click = None;
        let mut remove_node = None;
        let mut consumed = false;
        for id in ids {
            let plan = &plans[&id];
            let node = graph.nodes.get_mut(&id).expect("planned node exists");
            let connecting = self.pending_connection.is_some();

            // Each node gets a fresh child ui so layout cursors do not
            // accumulate between nodes.
            let mut child_ui = ui.new_child(egui::UiBuilder::new().max_rect(canvas_rect));
            let response = draw_node(&mut child_ui, &self.style, node, plan, origin, connecting);

            if response.drag_delta != Vec2::ZERO {
                node.position.0 += response.drag_delta.x;
                node.position.1 += response.drag_delta.y;
            }
            if let Some(click) = response.port_clicked {
                port_click = Some(click);
            }
            if response.remove_requested {
                remove_node = Some(id);
            }
            if response.changed {
                log::trace!("node {id} field edit");
            }
            consumed |= response.consumed;
        }

        if let Some(click) = port_click {
            self.handle_port_click(graph, click);
        }
        if let Some(id) = remove_node {
            graph.remove_node(id);
            self.pending_connection = None;
        }

        // A click on empty canvas deletes the edge under the pointer, or
        // cancels a pending connection. Skipped on a node-removal frame:
        // the edge list has shifted under `edge_geometry`.
        let clicked_empty = !consumed
            && remove_node.is_none()
            && ui.input(|i| i.pointer.primary_clicked())
            && ui.rect_contains_pointer(canvas_rect);
        if clicked_empty {
            if self.pending_connection.take().is_none() {
                if let Some(pos) = ui.ctx().pointer_interact_pos() {
                    let hit = edge_geometry
                        .iter()
                        .position(|(p1, p2)| {
                            connection_renderer::hit_test_bezier(pos, *p1, *p2, 8.0)
                        });
                    if let Some(index) = hit {
                        graph.remove_edge(index);
                    }
                }
            }
        }

        // Preview for the connection in progress.
        if let Some(pending) = &self.pending_connection {
            let anchor = self.endpoint(graph, &plans, origin, pending.node, &pending.port);
            let pointer = ui.ctx().pointer_latest_pos();
            if let (Some((anchor, _)), Some(pointer)) = (anchor, pointer) {
                connection_renderer::draw_dashed_line(
                    ui.painter(),
                    anchor,
                    pointer,
                    8.0,
                    4.0,
                    Stroke::new(1.5, Color32::from_gray(200)),
                );
                ui.ctx().request_repaint();
            }
        }
    }

    /// Screen position and node fill color of one port, if it exists in
    /// the current plan.
    fn endpoint(
        &self,
        graph: &PipelineGraph,
        plans: &HashMap<Uuid, NodePlan>,
        origin: Pos2,
        node_id: Uuid,
        port: &str,
    ) -> Option<(Pos2, Color32)> {
        let node = graph.nodes.get(&node_id)?;
        let plan = plans.get(&node_id)?;
        let placed = plan.ports.iter().find(|p| p.port == port)?;
        let rect = Rect::from_min_size(
            origin + Vec2::new(node.position.0, node.position.1),
            plan.size,
        );
        let fill = schema_for(node.kind).style.fill.unwrap_or(self.style.node_fill);
        Some((port_pos(rect, placed), fill))
    }

    /// First click arms a connection, second click on a compatible port
    /// completes it. Clicking a port of the same direction re-arms from
    /// there instead.
    fn handle_port_click(&mut self, graph: &mut PipelineGraph, click: PortClick) {
        match self.pending_connection.take() {
            None => self.pending_connection = Some(click),
            Some(pending) if pending.is_input == click.is_input || pending.node == click.node => {
                self.pending_connection = Some(click);
            }
            Some(pending) => {
                let (from, to) = if pending.is_input {
                    (click, pending)
                } else {
                    (pending, click)
                };
                graph.add_edge(Edge {
                    from_node: from.node,
                    from_port: from.port,
                    to_node: to.node,
                    to_port: to.port,
                });
            }
        }
    }
}
