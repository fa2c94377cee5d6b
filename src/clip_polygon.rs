//! Polygon clipping: Sutherland–Hodgman and Weiler–Atherton.
//!
//! Both clippers work on copies normalised to non-negative
//! `Polygon::signed_area2`, so "inside" a window edge always means
//! `PointSide::Left` of it. Results merge repeated consecutive vertices and
//! are `None` when fewer than 3 vertices remain. The clipped polygon keeps
//! the subject's colour.

use crate::basics::round_half_up;
use crate::point::Point;
use crate::polygon::Polygon;

/// Signed side value of `(x, y)` against the directed line `a → b`;
/// positive on the left.
#[inline]
fn side(a: &Point, b: &Point, (x, y): (f64, f64)) -> f64 {
    (b.xf() - a.xf()) * (y - a.yf()) - (b.yf() - a.yf()) * (x - a.xf())
}

#[inline]
fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Drop repeated consecutive vertices (including a repeated closing vertex)
/// and rebuild a polygon with `template`'s colour.
fn finish(template: &Polygon, vertices: Vec<Point>) -> Option<Polygon> {
    let mut out: Vec<Point> = Vec::with_capacity(vertices.len());
    for p in vertices {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    let mut polygon = Polygon::new(out).ok()?;
    polygon.color = template.color;
    Some(polygon)
}

// ============================================================================
// Sutherland–Hodgman
// ============================================================================

/// Clip `polygon` against a convex `window` one window edge at a time.
///
/// For every edge `sp → ep` of the working polygon: inside → inside emits
/// `ep`, inside → outside emits the crossing, outside → inside emits the
/// crossing and then `ep`. A working list that empties ends the clip.
/// Crossings stay unrounded until the last window edge is done.
pub fn sutherland_hodgman(polygon: &Polygon, window: &Polygon) -> Option<Polygon> {
    let window = window.normalized();
    let w = window.vertices();
    let mut output: Vec<(f64, f64)> = polygon
        .normalized()
        .vertices()
        .iter()
        .map(|p| (p.xf(), p.yf()))
        .collect();

    for j in 0..w.len() {
        let a = w[(j + w.len() - 1) % w.len()];
        let b = w[j];
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };

        let mut sp = last;
        let mut s_side = side(&a, &b, sp);
        for &ep in &input {
            let e_side = side(&a, &b, ep);
            let (s_in, e_in) = (s_side > 0.0, e_side > 0.0);
            if s_in != e_in {
                output.push(crossing(sp, s_side, ep, e_side));
            }
            if e_in {
                output.push(ep);
            }
            sp = ep;
            s_side = e_side;
        }
        log::trace!("sutherland_hodgman: edge {j} leaves {} vertices", output.len());
    }

    if output.is_empty() {
        return None;
    }
    let vertices = output
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    finish(polygon, vertices)
}

/// Point where `sp → ep` crosses the window edge line, given both side
/// values. The sides have opposite signs, so `t` lies in `[0, 1]`.
fn crossing(sp: (f64, f64), s_side: f64, ep: (f64, f64), e_side: f64) -> (f64, f64) {
    let t = s_side / (s_side - e_side);
    (sp.0 + t * (ep.0 - sp.0), sp.1 + t * (ep.1 - sp.1))
}

// ============================================================================
// Weiler–Atherton
// ============================================================================

/// Intersection of subject edge `edge` (at parameter `t`) with window edge
/// `window_edge` (at parameter `u`).
#[derive(Debug, Clone, Copy)]
struct Crossing {
    point: Point,
    edge: usize,
    t: f64,
    window_edge: usize,
    u: f64,
    entering: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Vertex(usize),
    Crossing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Track {
    Subject,
    Window,
}

/// The two interleaved vertex/crossing sequences walked by Weiler–Atherton.
struct Graph {
    subject: Vec<Point>,
    window: Vec<Point>,
    crossings: Vec<Crossing>,
    subject_nodes: Vec<Node>,
    window_nodes: Vec<Node>,
    subject_pos: Vec<usize>,
    window_pos: Vec<usize>,
}

impl Graph {
    fn build(subject: Vec<Point>, window: Vec<Point>) -> Self {
        let crossings = find_crossings(&subject, &inset(&window));

        let interleave = |len: usize, key: fn(&Crossing) -> (usize, f64)| -> Vec<Node> {
            let mut nodes = Vec::with_capacity(len + crossings.len());
            for i in 0..len {
                nodes.push(Node::Vertex(i));
                let mut on_edge: Vec<usize> =
                    (0..crossings.len()).filter(|&k| key(&crossings[k]).0 == i).collect();
                on_edge.sort_by(|&a, &b| key(&crossings[a]).1.total_cmp(&key(&crossings[b]).1));
                nodes.extend(on_edge.into_iter().map(Node::Crossing));
            }
            nodes
        };
        let subject_nodes = interleave(subject.len(), |c| (c.edge, c.t));
        let window_nodes = interleave(window.len(), |c| (c.window_edge, c.u));

        let positions = |nodes: &[Node]| -> Vec<usize> {
            let mut pos = vec![0; crossings.len()];
            for (i, node) in nodes.iter().enumerate() {
                if let Node::Crossing(k) = *node {
                    pos[k] = i;
                }
            }
            pos
        };
        let subject_pos = positions(&subject_nodes);
        let window_pos = positions(&window_nodes);

        Self {
            subject,
            window,
            crossings,
            subject_nodes,
            window_nodes,
            subject_pos,
            window_pos,
        }
    }

    fn nodes(&self, track: Track) -> &[Node] {
        match track {
            Track::Subject => &self.subject_nodes,
            Track::Window => &self.window_nodes,
        }
    }

    fn point(&self, track: Track, node: Node) -> Point {
        match (node, track) {
            (Node::Crossing(k), _) => self.crossings[k].point,
            (Node::Vertex(i), Track::Subject) => self.subject[i],
            (Node::Vertex(i), Track::Window) => self.window[i],
        }
    }

    /// Subject-list indices of entering crossings, in subject order.
    fn entering(&self) -> impl Iterator<Item = usize> + '_ {
        self.subject_nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n, Node::Crossing(k) if self.crossings[*k].entering))
            .map(|(i, _)| i)
    }

    /// Walk one output loop from subject-list index `start`.
    ///
    /// Leaving crossings switch from the subject to the window sequence,
    /// entering crossings switch back. The walk ends on returning to the
    /// start node. Entering crossings passed on the way are marked in
    /// `visited`.
    fn walk(&self, start: usize, visited: &mut [bool]) -> Option<Vec<Point>> {
        let start_node = self.subject_nodes[start];
        if let Node::Crossing(k) = start_node {
            visited[k] = true;
        }
        let mut out = vec![self.point(Track::Subject, start_node)];
        let mut track = Track::Subject;
        let mut idx = start;
        let limit = self.subject_nodes.len() + self.window_nodes.len() + 2;

        for _ in 0..=limit {
            let nodes = self.nodes(track);
            idx = (idx + 1) % nodes.len();
            let node = nodes[idx];

            let back_at_start = match start_node {
                Node::Crossing(_) => node == start_node,
                Node::Vertex(_) => track == Track::Subject && idx == start,
            };
            if back_at_start {
                return Some(out);
            }

            out.push(self.point(track, node));
            if let Node::Crossing(k) = node {
                let entering = self.crossings[k].entering;
                if entering {
                    visited[k] = true;
                }
                match track {
                    Track::Subject if !entering => {
                        track = Track::Window;
                        idx = self.window_pos[k];
                    }
                    Track::Window if entering => {
                        track = Track::Subject;
                        idx = self.subject_pos[k];
                    }
                    _ => {}
                }
            }
        }

        log::warn!("weiler_atherton: walk did not close after {limit} steps");
        None
    }
}

/// Distance window vertices are pulled inward before crossings are searched.
/// Lattice points off a window edge lie at least `1 / length` from it.
const INSET: f64 = 1e-6;

/// Window vertices moved inward by `INSET` along the sum of the two
/// adjacent inward edge normals, turned by a small fixed angle.
///
/// Points on the window boundary then count as outside, as they do in
/// `sutherland_hodgman`, and no subject vertex or edge can run exactly
/// through a window corner or along a window edge.
fn inset(window: &[Point]) -> Vec<(f64, f64)> {
    let n = window.len();
    let normal = |a: &Point, b: &Point| {
        let (dx, dy) = (b.xf() - a.xf(), b.yf() - a.yf());
        let len = dx.hypot(dy);
        if len == 0.0 {
            (0.0, 0.0)
        } else {
            (-dy / len, dx / len)
        }
    };
    let (sin, cos) = 0.2f64.sin_cos();

    (0..n)
        .map(|i| {
            let p = &window[i];
            let (ax, ay) = normal(&window[(i + n - 1) % n], p);
            let (bx, by) = normal(p, &window[(i + 1) % n]);
            let (dx, dy) = (ax + bx, ay + by);
            (
                p.xf() + INSET * (cos * dx - sin * dy),
                p.yf() + INSET * (sin * dx + cos * dy),
            )
        })
        .collect()
}

/// Pairwise crossings of subject edges with the inset window edges.
///
/// Parameters are half-open, `t, u ∈ [0, 1)`. A crossing enters the window
/// when the subject edge points to the left of the window edge.
fn find_crossings(subject: &[Point], window: &[(f64, f64)]) -> Vec<Crossing> {
    let mut crossings = Vec::new();
    for i in 0..subject.len() {
        let a = subject[i];
        let b = subject[(i + 1) % subject.len()];
        let (rx, ry) = (b.xf() - a.xf(), b.yf() - a.yf());

        for j in 0..window.len() {
            let (cx, cy) = window[j];
            let (dx, dy) = window[(j + 1) % window.len()];
            let (sx, sy) = (dx - cx, dy - cy);

            let rxs = cross(rx, ry, sx, sy);
            if rxs == 0.0 {
                continue;
            }
            let (cax, cay) = (cx - a.xf(), cy - a.yf());
            let t = cross(cax, cay, sx, sy) / rxs;
            let u = cross(cax, cay, rx, ry) / rxs;
            if !((0.0..1.0).contains(&t) && (0.0..1.0).contains(&u)) {
                continue;
            }
            let Ok(point) = Point::new(round_half_up(a.xf() + t * rx), round_half_up(a.yf() + t * ry))
            else {
                continue;
            };
            crossings.push(Crossing {
                point,
                edge: i,
                t,
                window_edge: j,
                u,
                entering: cross(sx, sy, rx, ry) > 0.0,
            });
        }
    }
    crossings
}

/// Result when the outlines never cross: the window if it lies inside the
/// polygon, the polygon if it lies inside the window, otherwise nothing.
fn containment(polygon: &Polygon, subject: &Polygon, window: &Polygon) -> Option<Polygon> {
    if window.vertices().iter().all(|v| subject.contains(v)) {
        return finish(polygon, window.vertices().to_vec());
    }
    if subject.vertices().iter().all(|v| window.contains(v)) {
        return finish(polygon, subject.vertices().to_vec());
    }
    None
}

/// Weiler–Atherton clip producing a single output loop.
///
/// The walk starts at the first entering crossing in subject order, or at
/// the first subject vertex inside the window when there is none. Subjects
/// that the window cuts into several pieces yield only the first piece; see
/// `weiler_atherton_all`.
pub fn weiler_atherton(polygon: &Polygon, window: &Polygon) -> Option<Polygon> {
    let subject = polygon.normalized();
    let window = window.normalized();
    let graph = Graph::build(subject.vertices().to_vec(), window.vertices().to_vec());
    log::trace!("weiler_atherton: {} crossings", graph.crossings.len());

    if graph.crossings.is_empty() {
        return containment(polygon, &subject, &window);
    }

    let mut visited = vec![false; graph.crossings.len()];
    let start = match graph.entering().next() {
        Some(i) => i,
        None => graph.subject_nodes.iter().position(|n| match *n {
            Node::Vertex(i) => window.contains(&graph.subject[i]),
            Node::Crossing(_) => false,
        })?,
    };
    finish(polygon, graph.walk(start, &mut visited)?)
}

/// Weiler–Atherton clip returning every output loop.
///
/// Walks again from each entering crossing not yet passed by an earlier
/// loop. Empty when the polygon and window are disjoint.
pub fn weiler_atherton_all(polygon: &Polygon, window: &Polygon) -> Vec<Polygon> {
    let subject = polygon.normalized();
    let window = window.normalized();
    let graph = Graph::build(subject.vertices().to_vec(), window.vertices().to_vec());

    if graph.crossings.is_empty() {
        return containment(polygon, &subject, &window).into_iter().collect();
    }

    let mut visited = vec![false; graph.crossings.len()];
    let mut loops = Vec::new();
    let starts: Vec<usize> = graph.entering().collect();
    for start in starts {
        if let Node::Crossing(k) = graph.subject_nodes[start] {
            if visited[k] {
                continue;
            }
        }
        if let Some(p) = graph.walk(start, &mut visited).and_then(|v| finish(polygon, v)) {
            loops.push(p);
        }
    }
    log::debug!("weiler_atherton_all: {} loops", loops.len());
    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn window() -> Polygon {
        Polygon::from_coords(&[(100, 100), (300, 100), (300, 300), (100, 300)]).unwrap()
    }

    fn poly(coords: &[(i32, i32)]) -> Polygon {
        Polygon::from_coords(coords).unwrap()
    }

    fn coords(p: &Polygon) -> Vec<(i32, i32)> {
        p.vertices().iter().map(|v| (v.x, v.y)).collect()
    }

    fn u_shape() -> Polygon {
        poly(&[
            (120, 350),
            (120, 250),
            (160, 250),
            (160, 330),
            (240, 330),
            (240, 250),
            (280, 250),
            (280, 350),
        ])
    }

    #[test]
    fn test_sutherland_hodgman_window_by_itself() {
        let out = sutherland_hodgman(&window(), &window()).unwrap();
        assert_eq!(coords(&out), vec![(100, 300), (100, 100), (300, 100), (300, 300)]);
    }

    #[test]
    fn test_sutherland_hodgman_inside_and_outside() {
        let tri = poly(&[(150, 150), (250, 150), (200, 250)]);
        assert_eq!(coords(&sutherland_hodgman(&tri, &window()).unwrap()), coords(&tri));

        let far = poly(&[(500, 500), (600, 500), (550, 600)]);
        assert_eq!(sutherland_hodgman(&far, &window()), None);

        let big = poly(&[(0, 0), (400, 0), (400, 400), (0, 400)]);
        let out = sutherland_hodgman(&big, &window()).unwrap();
        assert_eq!(coords(&out), vec![(100, 300), (100, 100), (300, 100), (300, 300)]);
    }

    #[test]
    fn test_sutherland_hodgman_cut_corners() {
        let tri = poly(&[(50, 200), (200, 50), (350, 200)]);
        let out = sutherland_hodgman(&tri, &window()).unwrap();
        assert_eq!(
            coords(&out),
            vec![(300, 200), (100, 200), (100, 150), (150, 100), (250, 100), (300, 150)]
        );
    }

    #[test]
    fn test_sutherland_hodgman_concave_keeps_both_arms() {
        let out = sutherland_hodgman(&u_shape(), &window()).unwrap();
        assert_eq!(
            coords(&out),
            vec![
                (120, 300),
                (120, 250),
                (160, 250),
                (160, 300),
                (240, 300),
                (240, 250),
                (280, 250),
                (280, 300)
            ]
        );
    }

    #[test]
    fn test_sutherland_hodgman_winding_independent() {
        let mut rev = window().vertices().to_vec();
        rev.reverse();
        let rev = Polygon::new(rev).unwrap();
        assert_eq!(sutherland_hodgman(&rev, &window()), sutherland_hodgman(&window(), &window()));
        assert_eq!(sutherland_hodgman(&window(), &rev), sutherland_hodgman(&window(), &window()));
    }

    #[test]
    fn test_weiler_atherton_single_loop() {
        let out = weiler_atherton(&u_shape(), &window()).unwrap();
        assert_eq!(coords(&out), vec![(120, 300), (120, 250), (160, 250), (160, 300)]);
    }

    #[test]
    fn test_weiler_atherton_all_loops() {
        let loops = weiler_atherton_all(&u_shape(), &window());
        assert_eq!(loops.len(), 2);
        assert_eq!(coords(&loops[0]), vec![(120, 300), (120, 250), (160, 250), (160, 300)]);
        assert_eq!(coords(&loops[1]), vec![(240, 300), (240, 250), (280, 250), (280, 300)]);
    }

    #[test]
    fn test_weiler_atherton_cut_corners() {
        let tri = poly(&[(50, 200), (200, 50), (350, 200)]);
        let out = weiler_atherton(&tri, &window()).unwrap();
        assert_eq!(
            coords(&out),
            vec![(100, 150), (150, 100), (250, 100), (300, 150), (300, 200), (100, 200)]
        );
    }

    #[test]
    fn test_weiler_atherton_containment() {
        let tri = poly(&[(150, 150), (250, 150), (200, 250)]).with_color(Color::RED);
        let out = weiler_atherton(&tri, &window()).unwrap();
        assert_eq!(coords(&out), coords(&tri));
        assert_eq!(out.color, Some(Color::RED));

        let big = poly(&[(0, 0), (400, 0), (400, 400), (0, 400)]);
        assert_eq!(coords(&weiler_atherton(&big, &window()).unwrap()), coords(&window()));

        let far = poly(&[(500, 500), (600, 500), (550, 600)]);
        assert_eq!(weiler_atherton(&far, &window()), None);
        assert!(weiler_atherton_all(&far, &window()).is_empty());
    }

    #[test]
    fn test_weiler_atherton_corner_graze_is_empty() {
        // Passes through (300, 100) without entering the window.
        let tri = poly(&[(310, 200), (290, 0), (370, 320)]);
        assert_eq!(weiler_atherton(&tri, &window()), None);
        assert!(weiler_atherton_all(&tri, &window()).is_empty());
        assert_eq!(sutherland_hodgman(&tri, &window()), None);
    }

    #[test]
    fn test_weiler_atherton_boundary_contact_only() {
        for pts in [
            [(100, 100), (27, 99), (100, 398)],
            [(100, 100), (300, 100), (200, 40)],
            [(300, 100), (400, 50), (400, 150)],
        ] {
            let tri = poly(&pts);
            assert_eq!(weiler_atherton(&tri, &window()), None, "{pts:?}");
            assert_eq!(sutherland_hodgman(&tri, &window()), None, "{pts:?}");
        }
    }

    #[test]
    fn test_weiler_atherton_vertex_on_corner() {
        let tri = poly(&[(300, 100), (200, 250), (150, 150)]);
        let wa = weiler_atherton(&tri, &window()).unwrap();
        assert_eq!(coords(&wa), vec![(300, 100), (200, 250), (150, 150)]);
        let sh = sutherland_hodgman(&tri, &window()).unwrap();
        assert_eq!(coords(&sh), coords(&wa));
    }

    #[test]
    fn test_weiler_atherton_identical_outlines() {
        let mut rev = window().vertices().to_vec();
        rev.reverse();
        let rev = Polygon::new(rev).unwrap();
        assert_eq!(coords(&weiler_atherton(&rev, &window()).unwrap()), coords(&window()));
        assert_eq!(weiler_atherton_all(&window(), &window()).len(), 1);
    }
}
