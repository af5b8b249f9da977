//! Link geometry.
//!
//! A link is drawn as a short straight stub leaving the source band, a cubic curve, and a short
//! straight stub entering the target band. The stubs are one node width long.
//!
//! ```text
//!  (x0,y0)──(x1,y1)╮
//!                  ╰─ curve with controls (x2,y2), (x3,y3) ─╮
//!                                                 (x4,y4)──(x5,y5)
//! ```
//!
//! When the target is a vertical-entry node the curve bends down (or up) and the final stub enters
//! the target through its top (or bottom) edge instead of its left side.

use crate::model::{EdgeId, Layout};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePath {
    pub commands: Vec<PathCommand>,
}

impl EdgePath {
    fn from_points(p: [Point; 6]) -> Self {
        Self {
            commands: vec![
                PathCommand::MoveTo { to: p[0] },
                PathCommand::LineTo { to: p[1] },
                PathCommand::CubicTo {
                    ctrl1: p[2],
                    ctrl2: p[3],
                    to: p[4],
                },
                PathCommand::LineTo { to: p[5] },
            ],
        }
    }

    pub fn start(&self) -> Option<Point> {
        match self.commands.first() {
            Some(PathCommand::MoveTo { to }) => Some(*to),
            _ => None,
        }
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(|c| match c {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => *to,
            PathCommand::CubicTo { to, .. } => *to,
        })
    }

    /// SVG `d` attribute text, e.g. `M0,5L20,5C100,5 100,45 180,45L200,45`.
    pub fn to_svg_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EdgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.commands {
            match c {
                PathCommand::MoveTo { to } => write!(f, "M{}", FmtPoint(*to))?,
                PathCommand::LineTo { to } => write!(f, "L{}", FmtPoint(*to))?,
                PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                    f,
                    "C{} {} {}",
                    FmtPoint(*ctrl1),
                    FmtPoint(*ctrl2),
                    FmtPoint(*to)
                )?,
            }
        }
        Ok(())
    }
}

struct FmtPoint(Point);

impl fmt::Display for FmtPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", fmt_coord(self.0.x), fmt_coord(self.0.y))
    }
}

/// Three fractional digits, trailing zeros trimmed, no `-0`.
pub(crate) fn fmt_coord(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Exact at both ends: `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Path for edge `id` of a finished layout. `curvature` is clamped into `[0, 1]`.
pub fn edge_path(layout: &Layout, id: EdgeId, curvature: f64) -> EdgePath {
    let c = curvature.clamp(0.0, 1.0);
    let edge = layout.edge(id);
    let source = layout.node(edge.source);
    let target = layout.node(edge.target);
    let thickness = edge.thickness;

    let x0 = source.right();
    let x1 = x0 + source.column_width;
    let y0 = source.depth + edge.source_offset + thickness / 2.0;
    let y1 = y0;
    let y2 = y0;
    let target_band = target.depth + edge.target_offset + thickness / 2.0;

    if target.vertical_entry {
        let x5 = target.column + thickness / 2.0;
        let x4 = x5;
        let x3 = x5;
        let x2 = lerp(x1, x4, c).max(x1);
        let (y3, y4, y5) = if target_band - y0 > 0.0 {
            // Target is below: come down onto its top edge.
            let y5 = target.depth;
            let y4 = y5 - target.column_width;
            (lerp(y1, y4, 1.0 - c).min(y4 - 2.0 * thickness), y4, y5)
        } else {
            // Target is above: come up into its bottom edge.
            let y5 = target.bottom();
            let y4 = y5 + target.column_width;
            (lerp(y1, y4, 1.0 - c).max(y4 + 2.0 * thickness), y4, y5)
        };
        return EdgePath::from_points([
            Point::new(x0, y0),
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
            Point::new(x4, y4),
            Point::new(x5, y5),
        ]);
    }

    let x5 = target.column;
    let x4 = x5 - target.column_width;
    let x2 = lerp(x1, x4, c).max(x1);
    let x3 = lerp(x1, x4, 1.0 - c).min(x4);
    let y5 = target_band;
    EdgePath::from_points([
        Point::new(x0, y0),
        Point::new(x1, y1),
        Point::new(x2, y2),
        Point::new(x3, y5),
        Point::new(x4, y5),
        Point::new(x5, y5),
    ])
}
