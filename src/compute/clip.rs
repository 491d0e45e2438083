//! Polygon clipping.
//!
//! Two strategies:
//!
//! - **Sutherland–Hodgman** when both polygons are convex and hole-free.
//!   Exact for that case and cheap.
//! - **Edge classification** for everything else. Every ring edge of one
//!   polygon is split where it meets the other polygon's boundary. Pieces
//!   of A lying inside B and pieces of B lying inside A form the boundary
//!   of `A ∩ B`. The pieces are linked back into loops through a shared
//!   vertex table, then sorted into exterior rings (counter-clockwise) and
//!   holes (clockwise).
//!
//! Rings are assumed simple. Self-intersecting input produces a result,
//! but not necessarily a meaningful one.

use crate::compute::area::{exterior_bbox, signed_ring_area};
use geo::{Coord, LineString, Polygon};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::f64::consts::PI;

/// Vertex merge distance as a fraction of the smaller polygon's extent.
const RELATIVE_SNAP: f64 = 1e-10;

/// Lower bound on the merge distance, in ulps of the largest coordinate.
const ULP_SNAP: f64 = 16.0 * f64::EPSILON;

/// Parametric slack when testing whether a hit lies on a segment.
const PARAM_EPSILON: f64 = 1e-10;

/// Relative tolerance for the parallel and collinear tests.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Smallest kept area as a fraction of the smaller polygon's squared extent.
const RELATIVE_AREA: f64 = 1e-12;

/// Distances and areas below which geometry is treated as degenerate.
///
/// Both scale with the inputs: the snap distance follows the smaller
/// polygon's extent but never drops below a few ulps of the coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tolerance {
    snap: f64,
    area: f64,
}

impl Tolerance {
    fn for_pair(a: &Polygon, b: &Polygon) -> Option<Self> {
        let a = exterior_bbox(a)?;
        let b = exterior_bbox(b)?;

        let extent = a.width().max(a.height()).min(b.width().max(b.height()));
        let magnitude = [a, b]
            .iter()
            .flat_map(|bbox| [bbox.min_x(), bbox.min_y(), bbox.max_x(), bbox.max_y()])
            .fold(0.0_f64, |m, v| m.max(v.abs()));

        let snap = (extent * RELATIVE_SNAP)
            .max(magnitude * ULP_SNAP)
            .max(f64::MIN_POSITIVE);
        let area = (extent * extent * RELATIVE_AREA).max(extent * snap);
        Some(Self { snap, area })
    }

    #[inline]
    fn near(&self, a: Coord, b: Coord) -> bool {
        length(sub(a, b)) <= self.snap
    }
}

#[inline]
fn sub(a: Coord, b: Coord) -> Coord {
    Coord {
        x: a.x - b.x,
        y: a.y - b.y,
    }
}

#[inline]
fn cross(a: Coord, b: Coord) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
fn dot(a: Coord, b: Coord) -> f64 {
    a.x * b.x + a.y * b.y
}

#[inline]
fn length(a: Coord) -> f64 {
    a.x.hypot(a.y)
}

#[inline]
fn lerp(a: Coord, b: Coord, t: f64) -> Coord {
    Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Even-odd test of a point against a vertex loop (open or closed).
///
/// Points exactly on the boundary may land on either side.
pub fn point_in_ring(point: Coord, ring: &[Coord]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when the loop is convex and winds exactly once.
///
/// Collinear vertices are tolerated; a pentagram is not convex even though
/// it always turns the same way.
pub fn is_convex(ring: &[Coord]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0.0;
    let mut turning = 0.0;
    for i in 0..n {
        let d1 = sub(ring[(i + 1) % n], ring[i]);
        let d2 = sub(ring[(i + 2) % n], ring[(i + 1) % n]);
        let c = cross(d1, d2);
        if c.abs() > PARALLEL_EPSILON * length(d1) * length(d2) {
            if sign == 0.0 {
                sign = c.signum();
            } else if c.signum() != sign {
                return false;
            }
        }
        turning += c.atan2(dot(d1, d2));
    }

    sign != 0.0 && (turning.abs() - 2.0 * PI).abs() < 1e-6
}

/// Clips `subject` against a convex, counter-clockwise `clip` loop.
///
/// Both loops are open (no closing vertex). The result is open as well and
/// empty when nothing of the subject survives. Points on the clip boundary
/// count as inside, so touching polygons yield a zero-area sliver that the
/// caller has to discard.
pub fn sutherland_hodgman(subject: &[Coord], clip: &[Coord]) -> Vec<Coord> {
    let mut output = subject.to_vec();

    let clip_n = clip.len();
    for i in 0..clip_n {
        if output.is_empty() {
            break;
        }

        let edge_start = clip[i];
        let edge_end = clip[(i + 1) % clip_n];
        let edge = sub(edge_end, edge_start);
        let inside = |p: Coord| cross(edge, sub(p, edge_start)) >= 0.0;

        let input = std::mem::take(&mut output);
        let input_n = input.len();
        for j in 0..input_n {
            let current = input[j];
            let next = input[(j + 1) % input_n];

            match (inside(current), inside(next)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(current);
                    output.extend(line_intersection(current, next, edge_start, edge_end));
                }
                (false, true) => {
                    output.extend(line_intersection(current, next, edge_start, edge_end));
                }
                (false, false) => {}
            }
        }
    }

    output
}

/// Intersection of segment `p1`-`p2` with the infinite line through `p3`-`p4`.
fn line_intersection(p1: Coord, p2: Coord, p3: Coord, p4: Coord) -> Option<Coord> {
    let d1 = sub(p2, p1);
    let d2 = sub(p4, p3);
    let denom = cross(d1, d2);
    if denom.abs() <= PARALLEL_EPSILON * length(d1) * length(d2) {
        return None;
    }
    let t = cross(sub(p3, p1), d2) / denom;
    Some(lerp(p1, p2, t))
}

/// Drops the closing vertex and consecutive duplicates.
fn clean_ring(coords: &[Coord], tol: &Tolerance) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last().is_none_or(|&last| !tol.near(last, c)) {
            out.push(c);
        }
    }
    while out.len() > 1 && tol.near(out[0], out[out.len() - 1]) {
        out.pop();
    }
    out
}

/// A polygon prepared for clipping: open loops, exterior first and
/// counter-clockwise, holes clockwise, degenerate rings removed.
#[derive(Debug, Clone)]
struct Shape {
    rings: Vec<Vec<Coord>>,
}

impl Shape {
    fn new(polygon: &Polygon, tol: &Tolerance) -> Option<Self> {
        let mut exterior = clean_ring(&polygon.exterior().0, tol);
        let area = signed_ring_area(&exterior);
        if exterior.len() < 3 || area.abs() <= tol.area {
            return None;
        }
        if area < 0.0 {
            exterior.reverse();
        }

        let mut rings = vec![exterior];
        for interior in polygon.interiors() {
            let mut hole = clean_ring(&interior.0, tol);
            let area = signed_ring_area(&hole);
            if hole.len() < 3 || area.abs() <= tol.area {
                continue;
            }
            if area > 0.0 {
                hole.reverse();
            }
            rings.push(hole);
        }

        Some(Self { rings })
    }

    fn exterior(&self) -> &[Coord] {
        &self.rings[0]
    }

    fn has_holes(&self) -> bool {
        self.rings.len() > 1
    }

    fn contains(&self, point: Coord) -> bool {
        self.rings
            .iter()
            .filter(|ring| point_in_ring(point, ring))
            .count()
            % 2
            == 1
    }

    fn segments(&self) -> Vec<(Coord, Coord)> {
        self.rings
            .iter()
            .flat_map(|ring| (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()])))
            .collect()
    }
}

/// A point where two segments meet: parameter along each and the location.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    t: f64,
    u: f64,
    at: Coord,
}

#[inline]
fn on_segment(t: f64) -> bool {
    (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&t)
}

/// All points shared by segments `a0`-`a1` and `b0`-`b1`.
///
/// A proper crossing yields one point. Collinear overlapping segments yield
/// the endpoints of each segment that lie on the other.
fn segment_crossings(a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> SmallVec<[Crossing; 2]> {
    let mut hits = SmallVec::new();

    let r = sub(a1, a0);
    let s = sub(b1, b0);
    let qp = sub(b0, a0);
    let (len_r, len_s) = (length(r), length(s));
    let denom = cross(r, s);

    if denom.abs() > PARALLEL_EPSILON * len_r * len_s {
        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        if on_segment(t) && on_segment(u) {
            let t = t.clamp(0.0, 1.0);
            let u = u.clamp(0.0, 1.0);
            // Reuse an existing vertex when the hit lands on one.
            let at = if t <= PARAM_EPSILON {
                a0
            } else if t >= 1.0 - PARAM_EPSILON {
                a1
            } else if u <= PARAM_EPSILON {
                b0
            } else if u >= 1.0 - PARAM_EPSILON {
                b1
            } else {
                lerp(a0, a1, t)
            };
            hits.push(Crossing { t, u, at });
        }
        return hits;
    }

    // Parallel. Only collinear segments can share points.
    if cross(qp, r).abs() > PARALLEL_EPSILON * len_r * length(qp).max(len_s) {
        return hits;
    }

    let (rr, ss) = (dot(r, r), dot(s, s));
    for (u, at) in [(0.0, b0), (1.0, b1)] {
        let t = dot(sub(at, a0), r) / rr;
        if on_segment(t) {
            hits.push(Crossing {
                t: t.clamp(0.0, 1.0),
                u,
                at,
            });
        }
    }
    for (t, at) in [(0.0, a0), (1.0, a1)] {
        let u = dot(sub(at, b0), s) / ss;
        if on_segment(u) {
            hits.push(Crossing {
                t,
                u: u.clamp(0.0, 1.0),
                at,
            });
        }
    }
    hits
}

/// Vertices shared by both polygons' pieces, merged within the snap
/// distance on a grid of snap-sized cells.
#[derive(Debug)]
struct VertexTable {
    tol: Tolerance,
    coords: Vec<Coord>,
    cells: FxHashMap<(i64, i64), SmallVec<[usize; 2]>>,
}

impl VertexTable {
    fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            coords: Vec::new(),
            cells: FxHashMap::default(),
        }
    }

    fn cell(&self, coord: Coord) -> (i64, i64) {
        (
            (coord.x / self.tol.snap).floor() as i64,
            (coord.y / self.tol.snap).floor() as i64,
        )
    }

    fn insert(&mut self, coord: Coord) -> usize {
        let (cx, cy) = self.cell(coord);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.cells.get(&(cx + dx, cy + dy))
                    && let Some(&id) = ids
                        .iter()
                        .find(|&&id| self.tol.near(self.coords[id], coord))
                {
                    return id;
                }
            }
        }

        let id = self.coords.len();
        self.coords.push(coord);
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }

    fn get(&self, id: usize) -> Coord {
        self.coords[id]
    }
}

/// Directed edge between two vertex-table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    from: usize,
    to: usize,
}

/// Splits every segment at its crossings and appends the pieces to `edges`.
fn split_segments(
    segments: &[(Coord, Coord)],
    mut splits: Vec<Vec<(f64, Coord)>>,
    table: &mut VertexTable,
) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(segments.len());

    for (&(start, end), cuts) in segments.iter().zip(splits.iter_mut()) {
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut prev = table.insert(start);
        for &(_, at) in cuts.iter().chain(std::iter::once(&(1.0, end))) {
            let next = table.insert(at);
            if next != prev {
                edges.push(Edge {
                    from: prev,
                    to: next,
                });
                prev = next;
            }
        }
    }

    edges
}

fn midpoint(table: &VertexTable, edge: &Edge) -> Coord {
    lerp(table.get(edge.from), table.get(edge.to), 0.5)
}

/// Boundary pieces of `A ∩ B`.
///
/// Shared pieces running the same way bound both interiors on the same side
/// and are kept once. Shared pieces running opposite ways separate the
/// polygons and are dropped.
fn classify_edges(
    a: &Shape,
    b: &Shape,
    edges_a: &[Edge],
    edges_b: &[Edge],
    table: &VertexTable,
) -> Vec<Edge> {
    let by_ends: FxHashMap<(usize, usize), usize> = edges_b
        .iter()
        .enumerate()
        .map(|(k, e)| ((e.from, e.to), k))
        .collect();
    let mut shared_b = vec![false; edges_b.len()];
    let mut kept = Vec::new();

    for edge in edges_a {
        if let Some(&k) = by_ends.get(&(edge.from, edge.to)) {
            shared_b[k] = true;
            kept.push(*edge);
        } else if let Some(&k) = by_ends.get(&(edge.to, edge.from)) {
            shared_b[k] = true;
        } else if b.contains(midpoint(table, edge)) {
            kept.push(*edge);
        }
    }

    for (edge, shared) in edges_b.iter().zip(shared_b) {
        if !shared && a.contains(midpoint(table, edge)) {
            kept.push(*edge);
        }
    }

    kept
}

/// Picks the edge leaving `edge.to` that turns furthest left.
///
/// Going straight back along `edge` is a last resort.
fn next_edge(
    edge: &Edge,
    edges: &[Edge],
    outgoing: &FxHashMap<usize, SmallVec<[usize; 2]>>,
    used: &[bool],
    table: &VertexTable,
) -> Option<usize> {
    let candidates = outgoing.get(&edge.to)?;
    let incoming = sub(table.get(edge.to), table.get(edge.from));

    let mut best: Option<(usize, f64)> = None;
    for &k in candidates.iter().filter(|&&k| !used[k]) {
        let candidate = edges[k];
        let turn = if candidate.to == edge.from {
            f64::NEG_INFINITY
        } else {
            let outgoing = sub(table.get(candidate.to), table.get(candidate.from));
            cross(incoming, outgoing).atan2(dot(incoming, outgoing))
        };
        if best.is_none_or(|(_, best_turn)| turn > best_turn) {
            best = Some((k, turn));
        }
    }
    best.map(|(k, _)| k)
}

/// Splits a vertex cycle wherever it passes through the same vertex twice.
fn split_cycle(cycle: Vec<usize>) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(cycle.len());

    for id in cycle {
        if let Some(pos) = stack.iter().rposition(|&v| v == id) {
            loops.push(stack.split_off(pos));
        }
        stack.push(id);
    }
    loops.push(stack);

    loops.retain(|l| l.len() >= 3);
    loops
}

/// Links directed edges into closed vertex loops.
fn trace_loops(edges: &[Edge], table: &VertexTable) -> Vec<Vec<Coord>> {
    let mut outgoing: FxHashMap<usize, SmallVec<[usize; 2]>> = FxHashMap::default();
    for (k, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.from).or_default().push(k);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        let origin = edges[start].from;
        let mut cycle = Vec::new();
        let mut current = start;
        let closed = loop {
            used[current] = true;
            let edge = edges[current];
            cycle.push(edge.from);
            if edge.to == origin {
                break true;
            }
            match next_edge(&edge, edges, &outgoing, &used, table) {
                Some(next) => current = next,
                None => break false,
            }
        };

        if !closed {
            log::warn!(
                "Discarding open chain of {} clipped edges starting at {:?}",
                cycle.len(),
                table.get(origin)
            );
            continue;
        }

        for ids in split_cycle(cycle) {
            loops.push(ids.into_iter().map(|id| table.get(id)).collect());
        }
    }

    loops
}

/// A point just left of the loop's first edge.
///
/// For a hole that is inside the polygon's material, and therefore inside
/// the exterior ring the hole belongs to.
fn point_beside(ring: &[Coord]) -> Coord {
    let (a, b) = (ring[0], ring[1]);
    let d = sub(b, a);
    let offset = 1e-6;
    let mid = lerp(a, b, 0.5);
    Coord {
        x: mid.x - d.y * offset,
        y: mid.y + d.x * offset,
    }
}

/// Groups traced loops into polygons: counter-clockwise loops become
/// exteriors, clockwise loops become holes of the smallest exterior
/// containing them.
fn assemble(loops: Vec<Vec<Coord>>, tol: &Tolerance) -> Vec<Polygon> {
    let mut exteriors: Vec<(Vec<Coord>, f64, Vec<LineString>)> = Vec::new();
    let mut holes: Vec<Vec<Coord>> = Vec::new();

    for ring in loops {
        let area = signed_ring_area(&ring);
        if area > tol.area {
            exteriors.push((ring, area, Vec::new()));
        } else if area < -tol.area {
            holes.push(ring);
        }
    }

    for hole in holes {
        let probe = point_beside(&hole);
        let owner = exteriors
            .iter_mut()
            .filter(|(ring, _, _)| point_in_ring(probe, ring))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        match owner {
            Some((_, _, interiors)) => interiors.push(LineString::from(hole)),
            None => log::trace!("Dropping clipped hole with no enclosing ring"),
        }
    }

    exteriors
        .into_iter()
        .map(|(ring, _, interiors)| Polygon::new(LineString::from(ring), interiors))
        .collect()
}

fn bounds_overlap(a0: Coord, a1: Coord, b0: Coord, b1: Coord, snap: f64) -> bool {
    !(a0.x.max(a1.x) + snap < b0.x.min(b1.x)
        || b0.x.max(b1.x) + snap < a0.x.min(a1.x)
        || a0.y.max(a1.y) + snap < b0.y.min(b1.y)
        || b0.y.max(b1.y) + snap < a0.y.min(a1.y))
}

fn general_intersection(a: &Shape, b: &Shape, tol: Tolerance) -> Vec<Polygon> {
    let segments_a = a.segments();
    let segments_b = b.segments();
    let mut splits_a: Vec<Vec<(f64, Coord)>> = vec![Vec::new(); segments_a.len()];
    let mut splits_b: Vec<Vec<(f64, Coord)>> = vec![Vec::new(); segments_b.len()];

    for (i, &(a0, a1)) in segments_a.iter().enumerate() {
        for (j, &(b0, b1)) in segments_b.iter().enumerate() {
            if !bounds_overlap(a0, a1, b0, b1, tol.snap) {
                continue;
            }
            for hit in segment_crossings(a0, a1, b0, b1) {
                splits_a[i].push((hit.t, hit.at));
                splits_b[j].push((hit.u, hit.at));
            }
        }
    }

    let mut table = VertexTable::new(tol);
    let edges_a = split_segments(&segments_a, splits_a, &mut table);
    let edges_b = split_segments(&segments_b, splits_b, &mut table);
    let kept = classify_edges(a, b, &edges_a, &edges_b, &table);

    log::trace!(
        "Clipping {} + {} pieces over {} vertices, keeping {}",
        edges_a.len(),
        edges_b.len(),
        table.coords.len(),
        kept.len()
    );

    assemble(trace_loops(&kept, &table), &tol)
}

/// Computes the region shared by two polygons, holes included.
///
/// Returns zero, one, or several polygons. Exteriors come back
/// counter-clockwise and holes clockwise. Polygons touching only along an
/// edge or at a point share no area and give an empty result.
///
/// # Examples
///
/// ```
/// use spatio_transform::compute::clip::polygon_intersection;
/// use spatio_transform::compute::area::polygon_area;
/// use geo::polygon;
///
/// let a = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)];
/// let b = polygon![(x: 5.0, y: 5.0), (x: 15.0, y: 5.0), (x: 15.0, y: 15.0), (x: 5.0, y: 15.0)];
///
/// let result = polygon_intersection(&a, &b);
/// assert_eq!(result.len(), 1);
/// assert!((polygon_area(&result[0]) - 25.0).abs() < 1e-9);
/// ```
pub fn polygon_intersection(a: &Polygon, b: &Polygon) -> Vec<Polygon> {
    let Some(tol) = Tolerance::for_pair(a, b) else {
        return Vec::new();
    };
    let (Some(a), Some(b)) = (Shape::new(a, &tol), Shape::new(b, &tol)) else {
        return Vec::new();
    };

    if !a.has_holes() && !b.has_holes() && is_convex(a.exterior()) && is_convex(b.exterior()) {
        log::trace!("Both polygons convex, using Sutherland-Hodgman");
        let ring = clean_ring(&sutherland_hodgman(a.exterior(), b.exterior()), &tol);
        if ring.len() < 3 || signed_ring_area(&ring) <= tol.area {
            return Vec::new();
        }
        return vec![Polygon::new(LineString::from(ring), Vec::new())];
    }

    general_intersection(&a, &b, tol)
}
