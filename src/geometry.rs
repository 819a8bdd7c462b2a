use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates.
///
/// The y axis grows upward (bottom-left origin), matching page-description
/// coordinate systems and most text-recognition engines. Callers that hold
/// top-left-origin boxes must convert them with [`Rect::flipped_within`]
/// before handing them to the layout code.
///
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawRect")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Deserialize)]
struct RawRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The normalized page, `(0, 0)`–`(1, 1)`.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Builds a rect from its edges, swapping them if given out of order.
    pub fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        let (left, right) = if left <= right { (left, right) } else { (right, left) };
        let (bottom, top) = if bottom <= top { (bottom, top) } else { (top, bottom) };
        Self::new(left, bottom, right - left, top - bottom)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.bottom() && y <= self.top()
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.left().min(other.left()),
            self.bottom().min(other.bottom()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }

    /// Overlap of both rects. Disjoint rects yield a zero-sized rect anchored
    /// at the clamped corner rather than an error.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left().max(other.left());
        let bottom = self.bottom().max(other.bottom());
        let right = self.right().min(other.right()).max(left);
        let top = self.top().min(other.top()).max(bottom);
        Rect::from_edges(left, bottom, right, top)
    }

    /// Grows the rect by `fraction` of its own size on every side, then clamps
    /// the result to `container`.
    pub fn expanded(&self, fraction: f64, container: &Rect) -> Rect {
        let dx = self.width * fraction;
        let dy = self.height * fraction;
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2.0,
            self.height + dy * 2.0,
        )
        .intersection(container)
    }

    /// Horizontal distance from this rect's right edge to `next`'s left edge.
    /// Negative when they overlap.
    pub fn horizontal_gap(&self, next: &Rect) -> f64 {
        next.left() - self.right()
    }

    /// Vertical distance from this rect's bottom edge down to `below`'s top.
    pub fn vertical_gap(&self, below: &Rect) -> f64 {
        self.bottom() - below.top()
    }

    /// Converts between y-down and y-up conventions inside `page`.
    pub fn flipped_within(&self, page: &Rect) -> Rect {
        let y = page.top() - (self.y - page.bottom()) - self.height;
        Rect::new(self.x, y, self.width, self.height)
    }

    /// Maps this rect from `page` coordinates into the normalized unit square.
    pub fn normalized_within(&self, page: &Rect) -> Rect {
        if page.is_empty() {
            return *self;
        }
        Rect::new(
            (self.x - page.x) / page.width,
            (self.y - page.y) / page.height,
            self.width / page.width,
            self.height / page.height,
        )
    }
}

/// Union of all rects, or `None` for an empty input.
pub fn bounding_rect<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, rect| match acc {
            Some(bounds) => Some(bounds.union(rect)),
            None => Some(*rect),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_size_is_clamped() {
        let rect = Rect::new(0.0, 0.0, -3.0, -1.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_derived_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 20.0);
        assert_eq!(rect.top(), 60.0);
        assert_eq!(rect.center_x(), 25.0);
        assert_eq!(rect.center_y(), 40.0);
    }

    #[test]
    fn test_union_and_bounding_rect() {
        let a = Rect::new(0.125, 0.125, 0.25, 0.125);
        let b = Rect::new(0.5, 0.5, 0.125, 0.25);
        let union = a.union(&b);
        assert_eq!(union, Rect::from_edges(0.125, 0.125, 0.625, 0.75));
        assert_eq!(bounding_rect([&a, &b]), Some(union));
        assert_eq!(bounding_rect(std::iter::empty()), None);
    }

    #[test]
    fn test_disjoint_intersection_is_empty_not_error() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 2.0, 1.0, 1.0);
        let overlap = a.intersection(&b);
        assert!(overlap.is_empty());
    }

    #[test]
    fn test_expanded_is_clamped_to_container() {
        let rect = Rect::new(0.0, 0.5, 1.0, 0.5);
        let expanded = rect.expanded(0.05, &Rect::unit());
        assert_eq!(expanded.left(), 0.0);
        assert_eq!(expanded.right(), 1.0);
        assert!((expanded.bottom() - 0.475).abs() < 1e-9);
        assert_eq!(expanded.top(), 1.0);
    }

    #[test]
    fn test_horizontal_gap() {
        let a = Rect::new(0.0, 0.0, 10.0, 5.0);
        let b = Rect::new(41.0, 0.0, 10.0, 5.0);
        assert_eq!(a.horizontal_gap(&b), 31.0);
        let overlapping = Rect::new(5.0, 0.0, 10.0, 5.0);
        assert!(a.horizontal_gap(&overlapping) < 0.0);
    }

    #[test]
    fn test_flip_round_trip() {
        let page = Rect::new(0.0, 0.0, 100.0, 200.0);
        let top_left_origin = Rect::new(10.0, 0.0, 20.0, 30.0);
        let flipped = top_left_origin.flipped_within(&page);
        assert_eq!(flipped.top(), 200.0);
        assert_eq!(flipped.flipped_within(&page), top_left_origin);
    }

    #[test]
    fn test_normalized_within() {
        let page = Rect::new(0.0, 0.0, 200.0, 400.0);
        let rect = Rect::new(50.0, 100.0, 100.0, 40.0);
        let normalized = rect.normalized_within(&page);
        assert_eq!(normalized, Rect::new(0.25, 0.25, 0.5, 0.1));
    }
}
