//! Polygon geometry for collision outlines
//!
//! Outlines are hand-authored and may be concave, so the overlap test cannot
//! rely on separating axes. Instead two clipped polygons overlap when any of
//! their edges cross or when one contains a vertex of the other. The same
//! candidate points bound the intersection region exactly, since every corner
//! of that region is either an edge crossing or a vertex of one polygon lying
//! inside the other.

use glam::Vec2;

use crate::consts::{CLIP_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Region used to clip outlines before testing them: the screen grown by
    /// `CLIP_MARGIN` on every side so entities wrapping across an edge still collide
    pub fn collision_clip() -> Self {
        let margin = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) * CLIP_MARGIN;
        Self {
            min: -margin,
            max: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) + margin,
        }
    }

    /// Smallest rectangle containing every point (None for an empty slice)
    pub fn bounding(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Cheap rejection: true when the rectangles share no area
    pub fn disjoint(&self, other: &Rect) -> bool {
        self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y
    }
}

/// Clip a polygon against an axis-aligned rectangle (Sutherland-Hodgman)
///
/// The subject may be concave; the result can contain degenerate edges along
/// the rectangle border, which the overlap test tolerates.
pub fn clip_to_rect(polygon: &[Vec2], rect: &Rect) -> Vec<Vec2> {
    let mut output = polygon.to_vec();

    for boundary in Boundary::of(rect) {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &current in &input {
            match (boundary.keeps(prev), boundary.keeps(current)) {
                (true, true) => output.push(current),
                (false, true) => {
                    output.push(boundary.cross(prev, current));
                    output.push(current);
                }
                (true, false) => output.push(boundary.cross(prev, current)),
                (false, false) => {}
            }
            prev = current;
        }
    }

    output
}

/// One edge of the clip rectangle and the half-plane it keeps
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl Boundary {
    fn of(rect: &Rect) -> [Boundary; 4] {
        [
            Boundary::Left(rect.min.x),
            Boundary::Right(rect.max.x),
            Boundary::Top(rect.min.y),
            Boundary::Bottom(rect.max.y),
        ]
    }

    fn keeps(self, p: Vec2) -> bool {
        match self {
            Boundary::Left(x) => p.x >= x,
            Boundary::Right(x) => p.x <= x,
            Boundary::Top(y) => p.y >= y,
            Boundary::Bottom(y) => p.y <= y,
        }
    }

    /// Point where segment `a-b` crosses this boundary
    fn cross(self, a: Vec2, b: Vec2) -> Vec2 {
        match self {
            Boundary::Left(x) | Boundary::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Vec2::new(x, a.y + (b.y - a.y) * t)
            }
            Boundary::Top(y) | Boundary::Bottom(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Vec2::new(a.x + (b.x - a.x) * t, y)
            }
        }
    }
}

/// Even-odd point-in-polygon test
pub fn contains_point(polygon: &[Vec2], point: Vec2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Proper intersection point of segments `a1-a2` and `b1-b2`, if any
///
/// Parallel and collinear segments report no crossing.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom.abs() < f32::EPSILON {
        return None;
    }

    let qp = b1 - a1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Iterate the closed edges of a polygon
fn edges(polygon: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    polygon
        .iter()
        .copied()
        .zip(polygon.iter().copied().cycle().skip(1))
}

/// Bounding box of the region where two polygons overlap
///
/// Returns None when the polygons do not overlap, only touch at a vertex or
/// along an edge, or either has fewer than three vertices.
pub fn intersection_bounds(a: &[Vec2], b: &[Vec2]) -> Option<Rect> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let (bounds_a, bounds_b) = (Rect::bounding(a)?, Rect::bounding(b)?);
    if bounds_a.disjoint(&bounds_b) {
        return None;
    }

    let mut corners: Vec<Vec2> = Vec::new();

    for (a1, a2) in edges(a) {
        for (b1, b2) in edges(b) {
            if let Some(p) = segment_intersection(a1, a2, b1, b2) {
                corners.push(p);
            }
        }
    }
    corners.extend(a.iter().copied().filter(|p| contains_point(b, *p)));
    corners.extend(b.iter().copied().filter(|p| contains_point(a, *p)));

    // Touching outlines share no area
    Rect::bounding(&corners).filter(|r| r.width() > 0.0 && r.height() > 0.0)
}
