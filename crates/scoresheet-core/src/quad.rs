//! The quadrilateral shape: click-constructed, convex by construction and
//! by edit-time validation.

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{is_convex, manhattan_dist};
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Number of corners in a quadrilateral.
pub const NB_SIDES: usize = 4;

/// Manhattan-distance threshold below which two corners count as the same
/// point, in image units.
pub const CLOSE_POINT_DISTANCE: f64 = 10.0;

/// Semantic corner positions, derived from geometry rather than click order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerRole {
    fn index(self) -> usize {
        match self {
            CornerRole::TopLeft => 0,
            CornerRole::TopRight => 1,
            CornerRole::BottomLeft => 2,
            CornerRole::BottomRight => 3,
        }
    }
}

/// Axis of an internal grid subdivision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridAxis {
    /// Horizontal-ish dividers between rows.
    Rows,
    /// Vertical-ish dividers between columns.
    Columns,
}

/// A user-drawn 4-corner region over the score sheet image.
///
/// Points are stored in click order, not geometric order; the convexity gate
/// interprets that order as the cycle p0→p1→p2→p3→p0. Semantic corners
/// (top-left etc.) are derived once the shape is complete and recomputed
/// after every successful mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quadrilateral {
    /// Corner points in click order (0..=4 entries).
    points: Vec<Point>,
    /// True iff exactly 4 points have been accepted.
    complete: bool,
    /// UI selection flag, mutually exclusive across a collection.
    pub(crate) selected: bool,
    /// Dense id assigned by the owning collection; shown to the user as id+1.
    pub(crate) id: Option<usize>,
    /// Index into `points` for each corner role, in
    /// [TopLeft, TopRight, BottomLeft, BottomRight] order. Defined only
    /// while `complete`.
    corner_roles: Option<[usize; NB_SIDES]>,
}

impl Quadrilateral {
    /// Create an empty quadrilateral ready for point-by-point construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Corner points in click order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True iff the quadrilateral has all 4 points.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Selection flag.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Collection-assigned dense id, if any.
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    /// Find the first corner within [`CLOSE_POINT_DISTANCE`] (Manhattan
    /// metric) of `point`. Works on partial shapes during construction and
    /// on complete shapes during editing.
    pub fn find_close_corner(&self, point: Point) -> Option<usize> {
        self.points
            .iter()
            .position(|&corner| manhattan_dist(point, corner) < CLOSE_POINT_DISTANCE)
    }

    /// Try to accept the next construction point.
    ///
    /// Rejected when the shape is already complete, when `new_point` is too
    /// close to an existing corner, or when a 4th point would make the cycle
    /// non-convex. On rejection the point set is unchanged; a shape stuck at
    /// 3 points stays drawable with a different 4th point. Accepting the 4th
    /// point marks the shape complete and derives the corner roles.
    pub fn append_point(&mut self, new_point: Point) -> GeometryResult<()> {
        if self.complete {
            return Err(GeometryError::InvalidState);
        }
        if self.find_close_corner(new_point).is_some() {
            return Err(GeometryError::TooClose);
        }
        if self.points.len() == NB_SIDES - 1 {
            let candidate = [self.points[0], self.points[1], self.points[2], new_point];
            if !is_convex(&candidate) {
                return Err(GeometryError::NotConvex);
            }
        }

        self.points.push(new_point);
        if self.points.len() == NB_SIDES {
            self.complete = true;
            self.recompute_corner_roles();
        }
        Ok(())
    }

    /// Move one corner of a complete quadrilateral, keeping it convex.
    ///
    /// Corner separation is only enforced during construction; a drag may
    /// bring two corners closer than [`CLOSE_POINT_DISTANCE`].
    pub fn update_point(&mut self, index: usize, new_point: Point) -> GeometryResult<()> {
        if !self.complete {
            return Err(GeometryError::InvalidState);
        }
        if index >= NB_SIDES {
            return Err(GeometryError::BadIndex);
        }

        let mut candidate = [self.points[0], self.points[1], self.points[2], self.points[3]];
        candidate[index] = new_point;
        if !is_convex(&candidate) {
            return Err(GeometryError::NotConvex);
        }

        self.points[index] = new_point;
        self.recompute_corner_roles();
        Ok(())
    }

    /// Translate the whole quadrilateral by `delta`, all-or-nothing.
    ///
    /// The translated point set is convexity-checked once before any corner
    /// is touched, so a rejection leaves every corner in place.
    pub fn move_by(&mut self, delta: Vec2) -> GeometryResult<()> {
        if !self.complete {
            return Err(GeometryError::InvalidState);
        }

        let candidate = [
            self.points[0] + delta,
            self.points[1] + delta,
            self.points[2] + delta,
            self.points[3] + delta,
        ];
        if !is_convex(&candidate) {
            return Err(GeometryError::NotConvex);
        }

        self.points.copy_from_slice(&candidate);
        self.recompute_corner_roles();
        Ok(())
    }

    /// Even-odd ray-casting point-in-polygon test over the 4-edge cycle.
    ///
    /// False while the shape is incomplete. Boundary points follow the
    /// x-intersection formula as-is; the resulting classification is pinned
    /// by tests rather than normalized.
    pub fn contains_point(&self, point: Point) -> bool {
        if !self.complete {
            return false;
        }

        let (x, y) = (point.x, point.y);
        let mut inside = false;
        let mut p1 = self.points[0];
        for i in 1..=NB_SIDES {
            let p2 = self.points[i % NB_SIDES];
            if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
                // y > min and y <= max rule out horizontal edges here, so
                // the denominator is never zero.
                let x_inters = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                if p1.x == p2.x || x <= x_inters {
                    inside = !inside;
                }
            }
            p1 = p2;
        }
        inside
    }

    /// Arithmetic mean of the 4 corners, once complete.
    pub fn centroid(&self) -> Option<Point> {
        if !self.complete {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        Some((sum / NB_SIDES as f64).to_point())
    }

    /// The corner holding the given semantic role, once complete.
    pub fn corner(&self, role: CornerRole) -> Option<Point> {
        let roles = self.corner_roles?;
        Some(self.points[roles[role.index()]])
    }

    /// Internal subdivision lines along one axis.
    ///
    /// `count` is the number of cells along that axis: `None` when the shape
    /// is incomplete or `count == 0`, an empty list for a single cell, and
    /// otherwise `count - 1` divider segments in increasing interpolation
    /// order. The outer boundary edges are never included.
    pub fn grid_lines(&self, axis: GridAxis, count: u32) -> Option<Vec<Line>> {
        if count < 1 {
            return None;
        }
        let tl = self.corner(CornerRole::TopLeft)?;
        let tr = self.corner(CornerRole::TopRight)?;
        let bl = self.corner(CornerRole::BottomLeft)?;
        let br = self.corner(CornerRole::BottomRight)?;

        let mut lines = Vec::with_capacity(count as usize - 1);
        for r in 1..count {
            let t = f64::from(r) / f64::from(count);
            let line = match axis {
                GridAxis::Rows => Line::new(tl.lerp(bl, t), tr.lerp(br, t)),
                GridAxis::Columns => Line::new(tl.lerp(tr, t), bl.lerp(br, t)),
            };
            lines.push(line);
        }
        Some(lines)
    }

    /// Re-derive the role-to-index map from the current corner positions.
    ///
    /// The two points with the smallest y values form the top pair, the
    /// other two the bottom pair; within each pair the smaller x is left.
    fn recompute_corner_roles(&mut self) {
        debug_assert!(self.complete);

        let mut by_y: [usize; NB_SIDES] = [0, 1, 2, 3];
        by_y.sort_by(|&a, &b| self.points[a].y.total_cmp(&self.points[b].y));

        let (mut top, mut bottom) = ([by_y[0], by_y[1]], [by_y[2], by_y[3]]);
        if self.points[top[0]].x > self.points[top[1]].x {
            top.swap(0, 1);
        }
        if self.points[bottom[0]].x > self.points[bottom[1]].x {
            bottom.swap(0, 1);
        }

        self.corner_roles = Some([top[0], top[1], bottom[0], bottom[1]]);
    }
}
