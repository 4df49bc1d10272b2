use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel-space rectangle helpers used by hit testing.
impl Rect<f32> {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// `true` if the rect has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive containment test (points on the border are inside).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Inclusive overlap test; rects that share only an edge intersect.
    pub fn intersects(&self, other: &Rect<f32>) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Grow the rect by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Rect::new(
            self.x - dx,
            self.y - dy,
            (self.width + dx * 2.0).max(0.0),
            (self.height + dy * 2.0).max(0.0),
        )
    }

    /// A square of side `2 * radius` centred on `point`.
    pub fn around(point: Vec2, radius: f32) -> Self {
        Rect::new(point.x - radius, point.y - radius, radius * 2.0, radius * 2.0)
    }
}
