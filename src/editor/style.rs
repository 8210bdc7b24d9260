//! Editor styling and constants.
//!
//! Per-variant fill colors live in the schema catalog; this module holds
//! the shared defaults every node falls back to.

use egui::Color32;

/// Visual styling configuration for the pipeline editor.
#[derive(Clone)]
pub struct EditorStyle {
    pub background: Color32,
    pub node_fill: Color32,
    pub node_outline: Color32,
    pub title_color: Color32,
    pub label_color: Color32,
    pub port_fill: Color32,
    /// Dynamic (variable-derived) ports get a gold accent so they read
    /// differently from schema-declared ports.
    pub dynamic_port_fill: Color32,
    pub port_radius: f32,
    pub font_size: f32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(32),
            node_fill: Color32::from_gray(64),
            node_outline: Color32::BLACK,
            title_color: Color32::WHITE,
            label_color: Color32::from_gray(230),
            port_fill: Color32::from_gray(200),
            dynamic_port_fill: Color32::from_rgb(255, 215, 0),
            port_radius: 5.0,
            font_size: 14.0,
        }
    }
}
