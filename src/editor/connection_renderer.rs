//! Connection rendering utilities.
//!
//! Handles drawing bezier curves between node ports and hit-testing for
//! edge deletion.

use egui::{Color32, Pos2, Stroke};

/// Sample points along the cubic bezier connecting two ports. Control
/// points extend horizontally so curves leave the right edge of one node
/// and enter the left edge of the other.
fn sample_bezier(p1: Pos2, p2: Pos2, steps: usize) -> Vec<Pos2> {
    let control_offset = ((p2.x - p1.x).abs() * 0.5).max(50.0);
    let cp1 = Pos2::new(p1.x + control_offset, p1.y);
    let cp2 = Pos2::new(p2.x - control_offset, p2.y);

    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let it = 1.0 - t;
            let x = it.powi(3) * p1.x
                + 3.0 * it.powi(2) * t * cp1.x
                + 3.0 * it * t.powi(2) * cp2.x
                + t.powi(3) * p2.x;
            let y = it.powi(3) * p1.y
                + 3.0 * it.powi(2) * t * cp1.y
                + 3.0 * it * t.powi(2) * cp2.y
                + t.powi(3) * p2.y;
            Pos2::new(x, y)
        })
        .collect()
}

/// Draw an edge as a bezier curve, color fading from the source node's
/// fill to the target node's.
pub fn draw_bezier(painter: &egui::Painter, p1: Pos2, p2: Pos2, c1: Color32, c2: Color32) {
    let points = sample_bezier(p1, p2, 30);
    for i in 0..points.len() - 1 {
        let t = i as f32 / (points.len() - 1) as f32;
        let r = (c1.r() as f32 * (1.0 - t) + c2.r() as f32 * t) as u8;
        let g = (c1.g() as f32 * (1.0 - t) + c2.g() as f32 * t) as u8;
        let b = (c1.b() as f32 * (1.0 - t) + c2.b() as f32 * t) as u8;
        painter.line_segment(
            [points[i], points[i + 1]],
            Stroke::new(2.0, Color32::from_rgb(r, g, b)),
        );
    }
}

/// Test if a point is within `threshold` of the curve between two ports.
pub fn hit_test_bezier(pos: Pos2, p1: Pos2, p2: Pos2, threshold: f32) -> bool {
    let points = sample_bezier(p1, p2, 20);
    points
        .windows(2)
        .any(|pair| distance_to_segment(pos, pair[0], pair[1]) < threshold)
}

/// Calculate distance from a point to a line segment.
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    if ab.length_sq() < 1e-6 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / ab.length_sq()).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Draw a dashed line, used for the in-progress connection preview.
pub fn draw_dashed_line(
    painter: &egui::Painter,
    start: Pos2,
    end: Pos2,
    dash_length: f32,
    gap_length: f32,
    stroke: Stroke,
) {
    let dir = end - start;
    let total_length = dir.length();
    if total_length < 0.001 {
        return;
    }

    let unit = dir / total_length;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < total_length {
        let segment_end = (pos + if drawing { dash_length } else { gap_length }).min(total_length);
        if drawing {
            painter.line_segment([start + unit * pos, start + unit * segment_end], stroke);
        }
        pos = segment_end;
        drawing = !drawing;
    }
}
