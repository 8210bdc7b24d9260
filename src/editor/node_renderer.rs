//! The generic node renderer.
//!
//! One function draws every node variant: the schema says what to show,
//! the plan says where ports go and how big the node is, and the node's
//! field record supplies the current values. A render pass draws static
//! ports, dynamic ports, title, auxiliary content, then one input control
//! per field; edits write back through `FieldValues::set` and the next
//! frame re-plans from the updated record.

use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use uuid::Uuid;

use super::style::EditorStyle;
use crate::catalog::schema_for;
use crate::graph::Node;
use crate::plan::{NodePlan, PlacedPort};
use crate::schema::{FieldKind, PortSide};

/// A click on a port, reported so the editor can start or complete a
/// connection.
#[derive(Clone, Debug)]
pub struct PortClick {
    pub node: Uuid,
    pub port: String,
    pub is_input: bool,
}

#[derive(Default)]
pub struct NodeResponse {
    pub drag_delta: Vec2,
    pub port_clicked: Option<PortClick>,
    pub remove_requested: bool,
    /// A field value changed this frame.
    pub changed: bool,
    /// The pointer pressed somewhere on this node.
    pub consumed: bool,
}

/// Screen position of a placed port on a node rect.
pub fn port_pos(rect: Rect, port: &PlacedPort) -> Pos2 {
    let x = match port.side {
        PortSide::Left => rect.left(),
        PortSide::Right => rect.right(),
    };
    Pos2::new(x, rect.top() + port.offset * rect.height())
}

pub fn draw_node(
    ui: &mut egui::Ui,
    style: &EditorStyle,
    node: &mut Node,
    plan: &NodePlan,
    origin: Pos2,
    connecting: bool,
) -> NodeResponse {
    let schema = schema_for(node.kind);
    let rect = Rect::from_min_size(
        origin + Vec2::new(node.position.0, node.position.1),
        plan.size,
    );
    let mut response = NodeResponse::default();

    // Ports interact first so their clicks win over the node background.
    let mut hovered_ports: Vec<(Pos2, bool)> = Vec::new();
    for placed in &plan.ports {
        let pos = port_pos(rect, placed);
        // Enlarged hitbox while a connection is being dragged.
        let hitbox = if connecting { 26.0 } else { 18.0 };
        let port_rect = Rect::from_center_size(pos, Vec2::splat(hitbox));
        let port_response = ui
            .interact(port_rect, ui.id().with(&placed.id), Sense::click())
            .on_hover_text(&placed.port);

        if port_response.clicked() {
            response.port_clicked = Some(PortClick {
                node: node.id,
                port: placed.port.clone(),
                is_input: placed.side == PortSide::Left,
            });
            response.consumed = true;
        }
        hovered_ports.push((pos, port_response.hovered()));
    }

    // Node background interaction, inset so port hitboxes stay reachable.
    let port_zone = 12.0;
    let body_rect = Rect::from_min_max(
        rect.min + Vec2::new(port_zone, 0.0),
        rect.max - Vec2::new(port_zone, 0.0),
    );
    let bg_response = ui.interact(
        body_rect,
        ui.id().with(node.id).with("node_bg"),
        Sense::click_and_drag(),
    );
    if bg_response.dragged() {
        response.drag_delta = bg_response.drag_delta();
    }
    if bg_response.drag_started() || bg_response.clicked() || bg_response.secondary_clicked() {
        response.consumed = true;
    }
    bg_response.context_menu(|ui| {
        if ui.button("Remove node").clicked() {
            response.remove_requested = true;
            ui.close();
        }
    });

    // Background and outline.
    let fill = schema.style.fill.unwrap_or(style.node_fill);
    ui.painter().rect_filled(rect, 8.0, fill);
    ui.painter().rect_stroke(
        rect,
        8.0,
        Stroke::new(1.0, style.node_outline),
        StrokeKind::Middle,
    );

    // Port circles, dynamic ones in the accent color.
    for (placed, (pos, hovered)) in plan.ports.iter().zip(&hovered_ports) {
        let fill = if placed.dynamic {
            style.dynamic_port_fill
        } else {
            style.port_fill
        };
        ui.painter().circle_filled(*pos, style.port_radius, fill);
        let outline = if *hovered {
            Stroke::new(2.0, Color32::WHITE)
        } else {
            Stroke::new(1.0, style.node_outline)
        };
        ui.painter().circle_stroke(*pos, style.port_radius, outline);
    }

    // Title with a separator line under it.
    let title_galley = ui.painter().layout(
        schema.title.to_string(),
        FontId::proportional(style.font_size),
        style.title_color,
        f32::INFINITY,
    );
    let title_pos = Pos2::new(
        rect.center().x - title_galley.rect.width() / 2.0,
        rect.top() + 6.0,
    );
    let title_bottom = rect.top() + 8.0 + title_galley.rect.height();
    ui.painter().galley(title_pos, title_galley, style.title_color);
    ui.painter().line_segment(
        [
            Pos2::new(body_rect.left() + 4.0, title_bottom),
            Pos2::new(body_rect.right() - 4.0, title_bottom),
        ],
        Stroke::new(1.0, Color32::from_white_alpha(60)),
    );

    // Auxiliary content and field controls flow below the title.
    let inner_rect = Rect::from_min_max(
        Pos2::new(body_rect.left() + 4.0, title_bottom + 6.0),
        Pos2::new(body_rect.right() - 4.0, rect.bottom() - 6.0),
    );
    ui.scope_builder(egui::UiBuilder::new().max_rect(inner_rect), |ui| {
        ui.spacing_mut().item_spacing.y = 4.0;

        if let Some(content) = schema.content {
            ui.label(
                egui::RichText::new(content)
                    .size(style.font_size - 3.0)
                    .color(style.label_color),
            );
        }

        for field in &schema.fields {
            ui.label(
                egui::RichText::new(format!("{}:", field.label))
                    .size(style.font_size - 4.0)
                    .color(style.label_color),
            );
            match field.kind {
                FieldKind::Text => {
                    let mut buf = node.values.get(field.name).to_string();
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut buf).desired_width(ui.available_width()),
                    );
                    if edit.changed() {
                        node.values.set(field.name, buf);
                        response.changed = true;
                    }
                }
                FieldKind::TextArea => {
                    let mut buf = node.values.get(field.name).to_string();
                    let edit = ui.add_sized(
                        Vec2::new(ui.available_width(), ui.available_height().max(40.0)),
                        egui::TextEdit::multiline(&mut buf)
                            .font(egui::TextStyle::Monospace),
                    );
                    if edit.changed() {
                        node.values.set(field.name, buf);
                        response.changed = true;
                    }
                }
                FieldKind::Select { options } => {
                    let current = node.values.get(field.name).to_string();
                    egui::ComboBox::from_id_salt((node.id, field.name))
                        .selected_text(&current)
                        .width(ui.available_width())
                        .show_ui(ui, |ui| {
                            for &option in options {
                                if ui.selectable_label(current == option, option).clicked() {
                                    node.values.set(field.name, option.to_string());
                                    response.changed = true;
                                }
                            }
                        });
                }
                FieldKind::Number { min, max, step } => {
                    // The store keeps the raw string; parse for display,
                    // write back on change.
                    let mut value: f64 = node.values.get(field.name).parse().unwrap_or(min);
                    let drag = ui.add(
                        egui::DragValue::new(&mut value)
                            .range(min..=max)
                            .speed(step),
                    );
                    if drag.changed() {
                        let text = if value.fract() == 0.0 {
                            format!("{}", value as i64)
                        } else {
                            value.to_string()
                        };
                        node.values.set(field.name, text);
                        response.changed = true;
                    }
                }
            }
        }
    });

    response
}
