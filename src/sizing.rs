//! Adaptive node sizing for text-bearing nodes.
//!
//! Fixed-size nodes take their dimensions from the schema; nodes with
//! dynamic ports grow and shrink with their text, bounded so they stay
//! legible on the canvas.

use egui::Vec2;

pub const MIN_WIDTH: f32 = 200.0;
pub const MAX_WIDTH: f32 = 500.0;
pub const MIN_HEIGHT: f32 = 60.0;
pub const MAX_HEIGHT: f32 = 300.0;

/// Estimates the display size of a node from its text content.
///
/// Height grows with line count and total character count; width grows
/// with the longest line. Both are clamped to the module constants: the
/// result never shrinks below the floor or exceeds the ceiling regardless
/// of input.
pub fn estimate(text: &str) -> Vec2 {
    let line_count = text.split('\n').count();
    let char_count = text.chars().count();
    let max_line_len = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);

    let height = (line_count as f32 * 20.0 + (char_count / 30) as f32 * 10.0)
        .clamp(MIN_HEIGHT, MAX_HEIGHT);
    let width = (max_line_len as f32 * 8.0 + 50.0).clamp(MIN_WIDTH, MAX_WIDTH);

    Vec2::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gets_the_floor_size() {
        assert_eq!(estimate(""), Vec2::new(200.0, 60.0));
    }

    #[test]
    fn short_single_line_stays_on_the_floor() {
        assert_eq!(estimate("0123456789").y, 60.0);
    }

    #[test]
    fn height_grows_with_lines_and_characters() {
        // 5 lines of 30 chars: 5*20 + floor(154/30)*10 = 150.
        let text = vec!["x".repeat(30); 5].join("\n");
        assert_eq!(estimate(&text).y, 150.0);
    }

    #[test]
    fn width_grows_with_the_longest_line() {
        // 40-char line: 40*8 + 50 = 370.
        let text = format!("short\n{}", "y".repeat(40));
        assert_eq!(estimate(&text).x, 370.0);
    }

    #[test]
    fn size_is_monotonic_and_bounded() {
        let mut prev = estimate("");
        let mut text = String::new();
        for _ in 0..2000 {
            text.push('a');
            let size = estimate(&text);
            assert!(size.x >= prev.x && size.y >= prev.y);
            assert!(size.x <= MAX_WIDTH && size.y <= MAX_HEIGHT);
            prev = size;
        }
        // Long enough input pins both dimensions at the ceiling.
        assert_eq!(prev, Vec2::new(MAX_WIDTH, MAX_HEIGHT));
    }
}
