use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Line, Rectangle};

// Opta pitch coordinates: both axes run 0-100 regardless of the real
// pitch dimensions.
pub const PITCH_MIN: f64 = 0.0;
pub const PITCH_MAX: f64 = 100.0;

pub const LINE_COLOR: Color = Color::DarkGray;

const PENALTY_AREA_DEPTH: f64 = 17.0;
const PENALTY_AREA_LOW: f64 = 21.1;
const PENALTY_AREA_HIGH: f64 = 78.9;
const SIX_YARD_DEPTH: f64 = 5.8;
const SIX_YARD_LOW: f64 = 36.8;
const SIX_YARD_HIGH: f64 = 63.2;
const PENALTY_SPOT: f64 = 11.5;
const CENTER_CIRCLE_RADIUS: f64 = 8.7;

/// Paint the pitch markings. Everything else renders on layers above.
pub fn draw_pitch(ctx: &mut Context) {
    ctx.draw(&Rectangle {
        x: PITCH_MIN,
        y: PITCH_MIN,
        width: PITCH_MAX,
        height: PITCH_MAX,
        color: LINE_COLOR,
    });
    ctx.draw(&Line {
        x1: 50.0,
        y1: PITCH_MIN,
        x2: 50.0,
        y2: PITCH_MAX,
        color: LINE_COLOR,
    });
    ctx.draw(&Circle {
        x: 50.0,
        y: 50.0,
        radius: CENTER_CIRCLE_RADIUS,
        color: LINE_COLOR,
    });

    for side in [Side::Left, Side::Right] {
        ctx.draw(&Rectangle {
            x: side.box_x(PENALTY_AREA_DEPTH),
            y: PENALTY_AREA_LOW,
            width: PENALTY_AREA_DEPTH,
            height: PENALTY_AREA_HIGH - PENALTY_AREA_LOW,
            color: LINE_COLOR,
        });
        ctx.draw(&Rectangle {
            x: side.box_x(SIX_YARD_DEPTH),
            y: SIX_YARD_LOW,
            width: SIX_YARD_DEPTH,
            height: SIX_YARD_HIGH - SIX_YARD_LOW,
            color: LINE_COLOR,
        });
        let spot = side.spot_x();
        ctx.draw(&Line {
            x1: spot,
            y1: 50.0,
            x2: spot,
            y2: 50.0,
            color: LINE_COLOR,
        });
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn box_x(self, depth: f64) -> f64 {
        match self {
            Side::Left => PITCH_MIN,
            Side::Right => PITCH_MAX - depth,
        }
    }

    fn spot_x(self) -> f64 {
        match self {
            Side::Left => PENALTY_SPOT,
            Side::Right => PITCH_MAX - PENALTY_SPOT,
        }
    }
}

// Braille cells have no stroke width; fan the line out into parallel
// strands instead. Width is the encoder's [2,8] scale.
const STRAND_SPACING: f64 = 0.45;

pub fn strand_count(width: f64) -> usize {
    ((width / 2.0).round() as usize).clamp(1, 4)
}

pub fn draw_weighted_segment(
    ctx: &mut Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    width: f64,
    color: Color,
) {
    let strands = strand_count(width);
    let Some((nx, ny)) = unit_normal(x1, y1, x2, y2) else {
        return;
    };
    for i in 0..strands {
        let offset = (i as f64 - (strands as f64 - 1.0) / 2.0) * STRAND_SPACING;
        ctx.draw(&Line {
            x1: x1 + nx * offset,
            y1: y1 + ny * offset,
            x2: x2 + nx * offset,
            y2: y2 + ny * offset,
            color,
        });
    }
}

const ARROW_HEAD_LENGTH: f64 = 2.5;
const ARROW_HEAD_ANGLE: f64 = 0.45;

pub fn draw_arrow(ctx: &mut Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
    ctx.draw(&Line { x1, y1, x2, y2, color });
    for (hx, hy) in arrow_head(x1, y1, x2, y2) {
        ctx.draw(&Line {
            x1: x2,
            y1: y2,
            x2: hx,
            y2: hy,
            color,
        });
    }
}

/// Endpoints of the two head strokes, angled back from the arrow tip.
/// Zero-length arrows get no head.
pub fn arrow_head(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(f64, f64)> {
    if unit_normal(x1, y1, x2, y2).is_none() {
        return Vec::new();
    }
    let theta = (y2 - y1).atan2(x2 - x1);
    [theta + ARROW_HEAD_ANGLE, theta - ARROW_HEAD_ANGLE]
        .into_iter()
        .map(|angle| {
            (
                x2 - ARROW_HEAD_LENGTH * angle.cos(),
                y2 - ARROW_HEAD_LENGTH * angle.sin(),
            )
        })
        .collect()
}

fn unit_normal(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<(f64, f64)> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return None;
    }
    Some((-dy / len, dx / len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_count_tracks_encoder_width_range() {
        assert_eq!(strand_count(2.0), 1);
        assert_eq!(strand_count(4.0), 2);
        assert_eq!(strand_count(8.0), 4);
        assert_eq!(strand_count(100.0), 4);
    }

    #[test]
    fn arrow_head_points_back_from_tip() {
        let head = arrow_head(0.0, 50.0, 10.0, 50.0);
        assert_eq!(head.len(), 2);
        for (hx, _) in &head {
            assert!(*hx < 10.0);
        }
        // Strokes flare to opposite sides of the shaft.
        assert!(head[0].1 < 50.0);
        assert!(head[1].1 > 50.0);
    }

    #[test]
    fn zero_length_arrow_has_no_head() {
        assert!(arrow_head(5.0, 5.0, 5.0, 5.0).is_empty());
    }
}
