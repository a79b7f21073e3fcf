// File: crates/perfchart-core/src/geometry.rs
// Summary: Point-space geometry helpers for layout and bounding boxes.

/// A position in points, origin at the top-left of the figure, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Smallest rectangle holding all `points`, or `None` when there are none.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Rect>, p| {
            let r = Rect::from_ltrb(p.x, p.y, p.x, p.y);
            Some(acc.map_or(r, |a| a.union(&r)))
        })
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn outset(&self, d: f32) -> Rect {
        Rect::from_ltrb(self.left - d, self.top - d, self.right + d, self.bottom + d)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_and_union() {
        let r = Rect::bounding([Point::new(3.0, 4.0), Point::new(-1.0, 9.0)]).unwrap();
        assert_eq!(r, Rect::from_ltrb(-1.0, 4.0, 3.0, 9.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
        let u = r.union(&Rect::from_ltwh(0.0, 0.0, 1.0, 1.0));
        assert_eq!(u, Rect::from_ltrb(-1.0, 0.0, 3.0, 9.0));
        assert_eq!(u.outset(1.0).width(), u.width() + 2.0);
        assert!(u.contains(Point::new(0.5, 0.5)));
    }
}
