//! Polygon corner smoothing.
//!
//! Expands a polygon's vertex list, with per-vertex corner tags, into a flat
//! sequence of path operations in which tagged corners become rounded or
//! eased transitions instead of hard joins. The output is pure data so it can
//! be replayed onto any backend (raster canvas or page device) and inspected
//! directly by tests.

use thiserror::Error;

/// Controls how a polygon corner is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CornerType {
    /// Hard corner; the path passes straight through the vertex.
    #[default]
    Straight,
    /// The corner is replaced by a curve whose extent is balanced against the
    /// shorter adjacent edge.
    Rounded,
    /// A gentler transition using control points between the edge midpoints
    /// and the vertex.
    BezierEase,
}

/// A polygon vertex in device coordinates plus its corner tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonVertex {
    pub x: i32,
    pub y: i32,
    pub corner: CornerType,
}

impl PolygonVertex {
    pub fn new(x: i32, y: i32, corner: CornerType) -> Self {
        Self { x, y, corner }
    }

    /// A vertex with a hard corner.
    pub fn sharp(x: i32, y: i32) -> Self {
        Self::new(x, y, CornerType::Straight)
    }
}

/// One operation of an expanded path. Coordinates are pixel-center snapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Cubic segment: two control points, then the end point.
    CurveTo(f64, f64, f64, f64, f64, f64),
}

impl PathOp {
    /// The end point this operation leaves the pen at.
    pub fn end_point(&self) -> (f64, f64) {
        match *self {
            PathOp::MoveTo(x, y) | PathOp::LineTo(x, y) => (x, y),
            PathOp::CurveTo(_, _, _, _, x, y) => (x, y),
        }
    }
}

/// Errors from path expansion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Corner smoothing needs a predecessor and successor for every vertex,
    /// so a polygon must carry at least two of them.
    #[error("polygon needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),
}

/// Snaps a coordinate to the nearest device-pixel center.
fn snap(v: f64) -> f64 {
    v.round() + 0.5
}

/// Expands a polygon into a smoothed path.
///
/// For each vertex the incoming and outgoing edge midpoints bracket the
/// corner. A `Straight` vertex emits a plain line through the vertex; a
/// `Rounded` vertex emits a cubic with both control points at the vertex
/// (after rebalancing the midpoints toward the shorter edge, so the curve
/// cannot overshoot it); a `BezierEase` vertex emits a cubic whose control
/// points sit halfway between each midpoint and the vertex.
///
/// `open` suppresses smoothing at the endpoints and leaves the path
/// unclosed. For a closed outline that will be stroked rather than filled,
/// an explicit segment back to the start point is appended so the stroke has
/// no gap.
pub fn smooth_polygon(
    vertices: &[PolygonVertex],
    open: bool,
    fill: bool,
) -> Result<Vec<PathOp>, PathError> {
    let n = vertices.len();
    if n < 2 {
        return Err(PathError::TooFewVertices(n));
    }

    let mut ops = Vec::with_capacity(2 * n + 1);
    let mut start = (0.0, 0.0);

    for i in 0..n {
        let j = (i + n - 1) % n;
        let k = (i + 1) % n;

        let px = vertices[i].x as f64;
        let py = vertices[i].y as f64;
        let d0x = px - vertices[j].x as f64;
        let d0y = py - vertices[j].y as f64;
        let d1x = vertices[k].x as f64 - px;
        let d1y = vertices[k].y as f64 - py;
        let len0 = d0x * d0x + d0y * d0y;
        let len1 = d1x * d1x + d1y * d1y;

        let mut mid0 = (vertices[j].x as f64 + d0x / 2.0, vertices[j].y as f64 + d0y / 2.0);
        let mut mid1 = (px + d1x / 2.0, py + d1y / 2.0);

        // Pull the curve extent in toward the shorter edge so a rounded
        // corner cannot overshoot it.
        if vertices[i].corner == CornerType::Rounded && len0 > 0.0 && len1 > 0.0 {
            let ratio = (len0 / len1).sqrt();
            if len0 < len1 {
                mid1 = (px + d1x * ratio / 2.0, py + d1y * ratio / 2.0);
            } else {
                mid0 = (px - d0x / (2.0 * ratio), py - d0y / (2.0 * ratio));
            }
        }

        let mid3 = (mid0.0 + (px - mid0.0) / 2.0, mid0.1 + (py - mid0.1) / 2.0);
        let mid4 = (px + (mid1.0 - px) / 2.0, py + (mid1.1 - py) / 2.0);

        let p = (snap(px), snap(py));
        let mid0 = (snap(mid0.0), snap(mid0.1));
        let mid1 = (snap(mid1.0), snap(mid1.1));
        let mid3 = (snap(mid3.0), snap(mid3.1));
        let mid4 = (snap(mid4.0), snap(mid4.1));

        let curve = |ops: &mut Vec<PathOp>| match vertices[i].corner {
            CornerType::Rounded => {
                ops.push(PathOp::CurveTo(p.0, p.1, p.0, p.1, mid1.0, mid1.1));
            }
            CornerType::BezierEase => {
                ops.push(PathOp::CurveTo(mid3.0, mid3.1, mid4.0, mid4.1, mid1.0, mid1.1));
            }
            CornerType::Straight => unreachable!(),
        };

        if i == 0 {
            if vertices[i].corner == CornerType::Straight || open {
                ops.push(PathOp::MoveTo(p.0, p.1));
                start = p;
            } else {
                ops.push(PathOp::MoveTo(mid0.0, mid0.1));
                curve(&mut ops);
                start = mid0;
            }
        } else if vertices[i].corner == CornerType::Straight || (open && i == n - 1) {
            ops.push(PathOp::LineTo(p.0, p.1));
        } else {
            ops.push(PathOp::LineTo(mid0.0, mid0.1));
            curve(&mut ops);
        }

        if i == n - 1 && !fill && !open {
            ops.push(PathOp::LineTo(start.0, start.1));
        }
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(corner: CornerType) -> Vec<PolygonVertex> {
        [(0, 0), (100, 0), (100, 100), (0, 100)]
            .map(|(x, y)| PolygonVertex::new(x, y, corner))
            .to_vec()
    }

    fn curve_count(ops: &[PathOp]) -> usize {
        ops.iter()
            .filter(|op| matches!(op, PathOp::CurveTo(..)))
            .count()
    }

    #[test]
    fn too_few_vertices_fails_fast() {
        assert_eq!(
            smooth_polygon(&[], false, false),
            Err(PathError::TooFewVertices(0))
        );
        assert_eq!(
            smooth_polygon(&[PolygonVertex::sharp(5, 5)], false, false),
            Err(PathError::TooFewVertices(1))
        );
    }

    #[test]
    fn all_sharp_polygon_is_plain_lines() {
        let ops = smooth_polygon(&square(CornerType::Straight), false, false).unwrap();
        assert_eq!(curve_count(&ops), 0);
        assert!(matches!(ops[0], PathOp::MoveTo(..)));
        // move-to, three line-tos through the vertices, one closing line-to
        assert_eq!(ops.len(), 5);
        for op in &ops[1..] {
            assert!(matches!(op, PathOp::LineTo(..)));
        }
    }

    #[test]
    fn sharp_open_polyline_has_no_closing_segment() {
        let ops = smooth_polygon(&square(CornerType::Straight), true, false).unwrap();
        assert_eq!(ops.len(), 4);
        let (end_x, end_y) = ops.last().unwrap().end_point();
        assert_eq!((end_x, end_y), (0.5, 100.5));
    }

    #[test]
    fn rounded_square_emits_four_curves_and_closes() {
        let ops = smooth_polygon(&square(CornerType::Rounded), false, false).unwrap();
        assert_eq!(curve_count(&ops), 4);

        // The path starts at the midpoint of the incoming edge of vertex 0
        // and the explicit closing segment returns exactly there.
        let first = ops[0].end_point();
        let last = ops.last().unwrap().end_point();
        assert_eq!(first, last);
        assert_eq!(first, (0.5, 50.5));
    }

    #[test]
    fn rounded_square_closure_holds_when_filled() {
        // A filled path closes implicitly; the expansion must still succeed
        // and emit the same number of curves.
        let ops = smooth_polygon(&square(CornerType::Rounded), false, true).unwrap();
        assert_eq!(curve_count(&ops), 4);
    }

    #[test]
    fn rounded_corner_rebalances_toward_shorter_outgoing_edge() {
        // Incoming edge length 40, outgoing length 10. The curve take-off on
        // the long side shrinks to min(a,b)/2 = 5 from the vertex; the short
        // side keeps its midpoint, also 5 from the vertex.
        let vertices = [
            PolygonVertex::sharp(0, 0),
            PolygonVertex::new(40, 0, CornerType::Rounded),
            PolygonVertex::sharp(40, 10),
        ];
        let ops = smooth_polygon(&vertices, true, false).unwrap();

        let PathOp::LineTo(m0x, m0y) = ops[1] else {
            panic!("expected line-to entry point, got {:?}", ops[1]);
        };
        assert_eq!((m0x, m0y), (35.5, 0.5));

        let PathOp::CurveTo(c0x, c0y, c1x, c1y, m1x, m1y) = ops[2] else {
            panic!("expected curve at rounded vertex, got {:?}", ops[2]);
        };
        // Both control points sit on the vertex itself.
        assert_eq!((c0x, c0y), (40.5, 0.5));
        assert_eq!((c1x, c1y), (40.5, 0.5));
        assert_eq!((m1x, m1y), (40.5, 5.5));
    }

    #[test]
    fn rounded_corner_rebalances_toward_shorter_incoming_edge() {
        // Incoming edge length 10, outgoing length 40; the outgoing take-off
        // point pulls in to 5 device units from the vertex.
        let vertices = [
            PolygonVertex::sharp(30, 0),
            PolygonVertex::new(40, 0, CornerType::Rounded),
            PolygonVertex::sharp(40, 40),
        ];
        let ops = smooth_polygon(&vertices, true, false).unwrap();

        let PathOp::LineTo(m0x, m0y) = ops[1] else {
            panic!("expected line-to entry point, got {:?}", ops[1]);
        };
        assert_eq!((m0x, m0y), (35.5, 0.5));

        let PathOp::CurveTo(_, _, _, _, m1x, m1y) = ops[2] else {
            panic!("expected curve at rounded vertex, got {:?}", ops[2]);
        };
        assert_eq!((m1x, m1y), (40.5, 5.5));
    }

    #[test]
    fn zero_length_edges_do_not_divide_by_zero() {
        let vertices = [
            PolygonVertex::new(10, 10, CornerType::Rounded),
            PolygonVertex::new(10, 10, CornerType::Rounded),
            PolygonVertex::new(20, 10, CornerType::Rounded),
        ];
        let ops = smooth_polygon(&vertices, false, false).unwrap();
        for op in ops {
            let (x, y) = op.end_point();
            assert!(x.is_finite() && y.is_finite());
        }
    }

    #[test]
    fn bezier_ease_control_points_are_midway() {
        let vertices = [
            PolygonVertex::sharp(0, 0),
            PolygonVertex::new(40, 0, CornerType::BezierEase),
            PolygonVertex::sharp(40, 40),
        ];
        let ops = smooth_polygon(&vertices, true, false).unwrap();

        let PathOp::CurveTo(c0x, c0y, c1x, c1y, _, _) = ops[2] else {
            panic!("expected curve at eased vertex, got {:?}", ops[2]);
        };
        // mid0 = (20,0), vertex = (40,0): control halfway at (30,0).
        assert_eq!((c0x, c0y), (30.5, 0.5));
        // vertex = (40,0), mid1 = (40,20): control halfway at (40,10).
        assert_eq!((c1x, c1y), (40.5, 10.5));
    }

    #[test]
    fn open_path_starts_on_first_vertex_even_when_tagged() {
        let ops = smooth_polygon(&square(CornerType::Rounded), true, false).unwrap();
        assert_eq!(ops[0], PathOp::MoveTo(0.5, 0.5));
    }
}
