use ratatui::style::Color;

use crate::pass_network::Edge;

pub const MIN_EDGE_WIDTH: f64 = 2.0;
pub const MAX_EDGE_WIDTH: f64 = 8.0;
pub const MIN_EDGE_ALPHA: f64 = 0.4;
pub const MAX_EDGE_ALPHA: f64 = 1.0;

/// Rendering parameters for one network edge. Width and alpha scale
/// linearly with pass count, anchored at a fixed floor so the rarest
/// connection stays visible instead of fading to nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub width: f64,
    pub alpha: f64,
}

pub fn edge_style(count: u32, max_count: u32) -> EdgeStyle {
    let ratio = f64::from(count) / f64::from(max_count.max(1));
    EdgeStyle {
        width: MIN_EDGE_WIDTH + ratio * (MAX_EDGE_WIDTH - MIN_EDGE_WIDTH),
        alpha: MIN_EDGE_ALPHA + ratio * (MAX_EDGE_ALPHA - MIN_EDGE_ALPHA),
    }
}

/// One style per edge, scaled against the set's maximum count. An empty
/// edge set produces an empty style set; no division ever happens.
pub fn edge_styles(edges: &[Edge]) -> Vec<EdgeStyle> {
    let Some(max_count) = edges.iter().map(|e| e.count).max() else {
        return Vec::new();
    };
    edges
        .iter()
        .map(|edge| edge_style(edge.count, max_count))
        .collect()
}

/// Edge opacity mapped onto a gray level; cell canvases have no true
/// alpha channel.
pub fn alpha_gray(alpha: f64) -> Color {
    let level = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(level, level, level)
}

/// Fixed pass-map arrow styling: color keyed by outcome, constant width,
/// no count scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub color: Color,
    pub width: f64,
}

pub const COMPLETED_ARROW: ArrowStyle = ArrowStyle {
    color: Color::White,
    width: 3.0,
};

pub const FAILED_ARROW: ArrowStyle = ArrowStyle {
    color: Color::Red,
    width: 2.5,
};
