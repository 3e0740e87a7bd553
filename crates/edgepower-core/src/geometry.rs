//! Points and convex regions in the active/reactive power plane.
//!
//! A [`ConvexRegion`] stores its vertices counter-clockwise without repeating the
//! first one; [`ConvexRegion::ring`] produces the closed form. Every constructor
//! funnels through a monotone-chain hull, so a region has exactly one vertex order
//! for a given point set: it starts at the vertex with the smallest `p` (then `q`)
//! and drops duplicate and collinear vertices. Regions built from the same
//! constraints in a different order therefore compare equal with
//! [`ConvexRegion::approx_eq`].
//!
//! Degenerate regions are allowed. A single vertex is a point, two vertices a
//! segment. They have no interior, so [`ConvexRegion::is_empty`] reports them as
//! empty, while [`ConvexRegion::has_points`] still sees them.
//!
//! Intersection clips the subject against the half-planes of the other region
//! (Sutherland–Hodgman). That is exact for the convex shapes this crate builds.

use crate::units::{Vars, VoltAmperes, Watts};
use serde::{Deserialize, Serialize};

/// Absolute tolerance for coordinates and areas (W, var, W·var).
pub const EPS: f64 = 1e-6;

/// Relative tolerance for collinearity in the hull (sine of the turn angle).
const COLLINEAR_EPS: f64 = 1e-9;

/// An operating point: active power `p` in W and reactive power `q` in var.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub p: f64,
    pub q: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { p: 0.0, q: 0.0 };

    #[inline]
    pub const fn new(p: f64, q: f64) -> Self {
        Self { p, q }
    }

    #[inline]
    pub fn from_units(p: Watts, q: Vars) -> Self {
        Self::new(p.value(), q.value())
    }

    #[inline]
    pub fn active_power(self) -> Watts {
        Watts(self.p)
    }

    #[inline]
    pub fn reactive_power(self) -> Vars {
        Vars(self.q)
    }

    #[inline]
    pub fn apparent_power(self) -> VoltAmperes {
        self.active_power().apparent_power(self.reactive_power())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.p.is_finite() && self.q.is_finite()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.p - other.p).hypot(self.q - other.q)
    }

    #[inline]
    pub fn approx_eq(self, other: Point, tol: f64) -> bool {
        (self.p - other.p).abs() <= tol && (self.q - other.q).abs() <= tol
    }

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.p - other.p, self.q - other.q)
    }

    #[inline]
    fn dot(self, other: Point) -> f64 {
        self.p * other.p + self.q * other.q
    }

    #[inline]
    fn cross(self, other: Point) -> f64 {
        self.p * other.q - self.q * other.p
    }

    #[inline]
    fn norm(self) -> f64 {
        self.p.hypot(self.q)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(P={}, Q={})", self.p, self.q)
    }
}

/// Closed half-plane `n · x <= c`.
#[derive(Debug, Clone, Copy)]
struct HalfPlane {
    n: Point,
    c: f64,
}

impl HalfPlane {
    /// Everything on or left of the directed line `a -> b`.
    fn left_of(a: Point, b: Point) -> Self {
        let d = b.sub(a);
        let n = Point::new(d.q, -d.p);
        Self { n, c: n.dot(a) }
    }

    /// Everything on the `toward` side of the line through `at` normal to `toward - at`.
    fn facing(at: Point, toward: Point) -> Self {
        let n = at.sub(toward);
        Self { n, c: n.dot(at) }
    }

    fn contains(&self, x: Point) -> bool {
        self.n.dot(x) <= self.c + EPS * self.n.norm().max(1.0)
    }

    fn crossing(&self, from: Point, to: Point) -> Point {
        let denom = self.n.dot(to.sub(from));
        if denom.abs() < f64::MIN_POSITIVE {
            return from;
        }
        let t = ((self.c - self.n.dot(from)) / denom).clamp(0.0, 1.0);
        Point::new(from.p + t * (to.p - from.p), from.q + t * (to.q - from.q))
    }

    fn clip(&self, subject: &[Point]) -> Vec<Point> {
        let n = subject.len();
        let mut out = Vec::with_capacity(n + 2);
        for i in 0..n {
            let cur = subject[i];
            let prev = subject[(i + n - 1) % n];
            let cur_in = self.contains(cur);
            let prev_in = self.contains(prev);
            if cur_in {
                if !prev_in {
                    out.push(self.crossing(prev, cur));
                }
                out.push(cur);
            } else if prev_in {
                out.push(self.crossing(prev, cur));
            }
        }
        out
    }
}

/// A convex polygon in the P/Q plane, possibly degenerate or empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvexRegion {
    vertices: Vec<Point>,
}

impl ConvexRegion {
    /// The region without any point.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A degenerate region holding one operating point.
    pub fn point(point: Point) -> Self {
        Self {
            vertices: vec![point],
        }
    }

    /// Convex hull of the given points. A closing vertex equal to the first is ignored.
    pub fn from_vertices<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self {
            vertices: canonical_hull(points.into_iter().collect()),
        }
    }

    /// Axis-aligned rectangle `[p_min, p_max] × [q_min, q_max]`; empty if either range is inverted.
    pub fn rectangle(p_min: f64, p_max: f64, q_min: f64, q_max: f64) -> Self {
        if p_min > p_max || q_min > q_max {
            return Self::empty();
        }
        Self::from_vertices([
            Point::new(p_min, q_max),
            Point::new(p_min, q_min),
            Point::new(p_max, q_min),
            Point::new(p_max, q_max),
        ])
    }

    /// The square `[-half, half]²`.
    pub fn square(half: f64) -> Self {
        Self::rectangle(-half, half, -half, half)
    }

    /// Regular polygon inscribed in the circle of `radius` around the origin.
    pub fn regular_polygon(radius: f64, segments: usize) -> Self {
        if radius.is_nan() || radius < 0.0 || segments < 3 {
            return Self::empty();
        }
        let step = std::f64::consts::TAU / segments as f64;
        Self::from_vertices((0..segments).map(|k| {
            let angle = step * k as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        }))
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices with the first one repeated at the end.
    pub fn ring(&self) -> Vec<Point> {
        let mut ring = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            ring.push(*first);
        }
        ring
    }

    /// True if the region has no vertices or no interior.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3 || self.area() <= EPS
    }

    /// True if at least one point remains, interior or not.
    pub fn has_points(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| self.vertices[i].cross(self.vertices[(i + 1) % n]))
            .sum();
        twice.abs() / 2.0
    }

    /// `(p_min, p_max, q_min, q_max)`, or `None` for the empty region.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().fold(
            (first.p, first.p, first.q, first.q),
            |(p_lo, p_hi, q_lo, q_hi), v| {
                (p_lo.min(v.p), p_hi.max(v.p), q_lo.min(v.q), q_hi.max(v.q))
            },
        ))
    }

    pub fn contains(&self, point: Point) -> bool {
        self.has_points() && self.half_planes().iter().all(|hp| hp.contains(point))
    }

    /// Intersection of two regions. Empty when they do not overlap.
    pub fn intersect(&self, other: &ConvexRegion) -> ConvexRegion {
        if !self.has_points() || !other.has_points() {
            return Self::empty();
        }
        let mut clipped = self.vertices.clone();
        for half_plane in other.half_planes() {
            clipped = half_plane.clip(&clipped);
            if clipped.is_empty() {
                return Self::empty();
            }
        }
        Self::from_vertices(clipped)
    }

    /// The point of this region closest to `point`; `point` itself if it lies inside
    /// or if the region holds no points.
    pub fn nearest_point(&self, point: Point) -> Point {
        if !self.has_points() || self.contains(point) {
            return point;
        }
        let n = self.vertices.len();
        if n == 1 {
            return self.vertices[0];
        }
        let edges = if n == 2 { 1 } else { n };
        (0..edges)
            .map(|i| closest_on_segment(self.vertices[i], self.vertices[(i + 1) % n], point))
            .min_by(|a, b| a.distance(point).total_cmp(&b.distance(point)))
            .unwrap_or(point)
    }

    /// Same vertex cycle within `tol`, regardless of which vertex comes first.
    pub fn approx_eq(&self, other: &ConvexRegion, tol: f64) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        (0..n).any(|offset| {
            (0..n).all(|i| {
                self.vertices[i].approx_eq(other.vertices[(i + offset) % n], tol)
            })
        })
    }

    fn half_planes(&self) -> Vec<HalfPlane> {
        match self.vertices.as_slice() {
            [] => Vec::new(),
            [a] => vec![
                HalfPlane { n: Point::new(1.0, 0.0), c: a.p },
                HalfPlane { n: Point::new(-1.0, 0.0), c: -a.p },
                HalfPlane { n: Point::new(0.0, 1.0), c: a.q },
                HalfPlane { n: Point::new(0.0, -1.0), c: -a.q },
            ],
            [a, b] => vec![
                HalfPlane::left_of(*a, *b),
                HalfPlane::left_of(*b, *a),
                HalfPlane::facing(*a, *b),
                HalfPlane::facing(*b, *a),
            ],
            vertices => {
                let n = vertices.len();
                (0..n)
                    .map(|i| HalfPlane::left_of(vertices[i], vertices[(i + 1) % n]))
                    .collect()
            }
        }
    }
}

fn closest_on_segment(a: Point, b: Point, x: Point) -> Point {
    let d = b.sub(a);
    let len2 = d.dot(d);
    if len2 <= f64::MIN_POSITIVE {
        return a;
    }
    let t = (x.sub(a).dot(d) / len2).clamp(0.0, 1.0);
    Point::new(a.p + t * d.p, a.q + t * d.q)
}

/// Andrew's monotone chain, counter-clockwise, collinear and duplicate points removed.
fn canonical_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.retain(|pt| pt.is_finite());
    points.sort_by(|a, b| a.p.total_cmp(&b.p).then(a.q.total_cmp(&b.q)));
    points.dedup_by(|a, b| a.approx_eq(*b, EPS));
    if points.len() <= 2 {
        if let [a, b] = points.as_slice() {
            if a.approx_eq(*b, EPS) {
                points.truncate(1);
            }
        }
        return points;
    }

    let turns_left = |o: Point, a: Point, b: Point| {
        let u = a.sub(o);
        let v = b.sub(o);
        u.cross(v) > COLLINEAR_EPS * u.norm() * v.norm()
    };

    let mut hull: Vec<Point> = Vec::with_capacity(points.len() + 1);
    for &pt in &points {
        while hull.len() >= 2 && !turns_left(hull[hull.len() - 2], hull[hull.len() - 1], pt) {
            hull.pop();
        }
        hull.push(pt);
    }
    let lower_len = hull.len() + 1;
    for &pt in points.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && !turns_left(hull[hull.len() - 2], hull[hull.len() - 1], pt)
        {
            hull.pop();
        }
        hull.push(pt);
    }
    hull.pop();
    hull.dedup_by(|a, b| a.approx_eq(*b, EPS));
    if hull.len() > 1 && hull[0].approx_eq(hull[hull.len() - 1], EPS) {
        hull.pop();
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(p_min: f64, p_max: f64, q_min: f64, q_max: f64) -> ConvexRegion {
        ConvexRegion::rectangle(p_min, p_max, q_min, q_max)
    }

    #[test]
    fn test_rectangle_is_counter_clockwise_from_lowest_corner() {
        let r = rect(-1.0, 2.0, -3.0, 4.0);
        assert_eq!(
            r.vertices(),
            &[
                Point::new(-1.0, -3.0),
                Point::new(2.0, -3.0),
                Point::new(2.0, 4.0),
                Point::new(-1.0, 4.0),
            ]
        );
        assert_eq!(r.area(), 21.0);
        assert_eq!(r.ring().len(), 5);
        assert_eq!(r.ring()[0], r.ring()[4]);
    }

    #[test]
    fn test_inverted_rectangle_is_empty() {
        let r = rect(5.0, -5.0, 0.0, 1.0);
        assert!(r.is_empty());
        assert!(!r.has_points());
    }

    #[test]
    fn test_closing_vertex_and_collinear_points_are_dropped() {
        let r = ConvexRegion::from_vertices([
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(r.vertices().len(), 4);
    }

    #[test]
    fn test_intersect_axis_aligned_rectangles_exactly() {
        let a = rect(-10.0, 10.0, -10.0, 10.0);
        let b = rect(-20.0, 5.0, -20.0, 20.0);
        let c = a.intersect(&b);
        assert!(c.approx_eq(&rect(-10.0, 5.0, -10.0, 10.0), 1e-9));
        assert!((c.area() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersect_is_commutative() {
        let a = rect(-10.0, 10.0, -10.0, 10.0);
        let b = ConvexRegion::regular_polygon(12.0, 32);
        assert!(a.intersect(&b).approx_eq(&b.intersect(&a), 1e-6));
    }

    #[test]
    fn test_disjoint_regions_intersect_to_empty() {
        let a = rect(0.0, 1.0, 0.0, 1.0);
        let b = rect(2.0, 3.0, 0.0, 1.0);
        let c = a.intersect(&b);
        assert!(c.is_empty());
        assert!(!c.has_points());
    }

    #[test]
    fn test_touching_regions_leave_a_degenerate_segment() {
        let a = rect(0.0, 1.0, 0.0, 1.0);
        let b = rect(1.0, 2.0, 0.0, 1.0);
        let c = a.intersect(&b);
        assert!(c.is_empty());
        assert!(c.has_points());
        assert_eq!(c.vertices().len(), 2);
    }

    #[test]
    fn test_point_region_clips_by_containment() {
        let square = ConvexRegion::square(10.0);
        let inside = ConvexRegion::point(Point::new(3.0, -4.0));
        let outside = ConvexRegion::point(Point::new(30.0, 0.0));

        assert_eq!(inside.intersect(&square).vertices(), &[Point::new(3.0, -4.0)]);
        assert!(square.intersect(&inside).approx_eq(&inside, 1e-9));
        assert!(!outside.intersect(&square).has_points());
    }

    #[test]
    fn test_segment_clip_is_bounded_by_its_endpoints() {
        let segment = ConvexRegion::from_vertices([Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        let square = ConvexRegion::square(10.0);
        let c = square.intersect(&segment);
        assert!(c.approx_eq(&segment, 1e-9));
    }

    #[test]
    fn test_regular_polygon_is_inscribed() {
        let circle = ConvexRegion::regular_polygon(100.0, 32);
        assert_eq!(circle.vertices().len(), 32);
        assert!(circle
            .vertices()
            .iter()
            .all(|v| (v.p.hypot(v.q) - 100.0).abs() < 1e-9));
        assert!(circle.area() < std::f64::consts::PI * 100.0 * 100.0);
        assert!(ConvexRegion::regular_polygon(-1.0, 32).vertices().is_empty());
    }

    #[test]
    fn test_contains_and_nearest_point() {
        let r = rect(-5.0, 5.0, -2.0, 2.0);
        assert!(r.contains(Point::new(5.0, 2.0)));
        assert!(!r.contains(Point::new(6.0, 0.0)));
        assert_eq!(r.nearest_point(Point::new(1.0, 1.0)), Point::new(1.0, 1.0));
        assert!(r
            .nearest_point(Point::new(9.0, 0.5))
            .approx_eq(Point::new(5.0, 0.5), 1e-12));
        assert!(r
            .nearest_point(Point::new(9.0, 9.0))
            .approx_eq(Point::new(5.0, 2.0), 1e-12));
    }

    #[test]
    fn test_bounds() {
        let r = rect(-5.0, 5.0, -2.0, 2.0);
        assert_eq!(r.bounds(), Some((-5.0, 5.0, -2.0, 2.0)));
        assert_eq!(ConvexRegion::empty().bounds(), None);
    }
}
