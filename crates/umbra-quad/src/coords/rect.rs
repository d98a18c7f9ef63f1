use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
///
/// Holds logical pixels on the descriptor side and device pixels after the
/// geometry stage has scaled it; the struct itself is unit-agnostic.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Uniformly scales origin and size. Used for the logical→device conversion.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Rect::from_origin_size(self.origin * factor, self.size * factor)
    }

    /// Grows the rectangle by independent top-left and bottom-right margins.
    ///
    /// `before` moves the origin up/left; `after` extends the far corner.
    /// Either margin may be zero. Used for shadow footprint expansion.
    #[inline]
    pub fn expanded(self, before: Vec2, after: Vec2) -> Self {
        Rect::from_origin_size(self.origin - before, self.size + before + after)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let lo = a.min().max(b.min());
        let hi = a.max().min(b.max());

        let size = hi - lo;
        if size.x <= 0.0 || size.y <= 0.0 {
            None
        } else {
            Some(Rect::from_origin_size(lo, size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extents() {
        let n = r(10.0, 10.0, -4.0, -6.0).normalized();
        assert_eq!(n, r(6.0, 4.0, 4.0, 6.0));
    }

    // ── scaled / expanded ─────────────────────────────────────────────────

    #[test]
    fn scaled_multiplies_origin_and_size() {
        assert_eq!(r(1.0, 2.0, 3.0, 4.0).scaled(2.0), r(2.0, 4.0, 6.0, 8.0));
    }

    #[test]
    fn expanded_moves_both_corners() {
        let e = r(10.0, 10.0, 20.0, 20.0).expanded(Vec2::new(5.0, 5.0), Vec2::new(1.0, 2.0));
        assert_eq!(e.min(), Vec2::new(5.0, 5.0));
        assert_eq!(e.max(), Vec2::new(31.0, 32.0));
    }

    #[test]
    fn expanded_zero_margins_is_identity() {
        let rect = r(3.0, 4.0, 5.0, 6.0);
        assert_eq!(rect.expanded(Vec2::zero(), Vec2::zero()), rect);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b).unwrap(), r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn intersect_contained() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        let inner = r(10.0, 10.0, 20.0, 20.0);
        assert_eq!(outer.intersect(inner).unwrap(), inner);
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        // Zero-width overlap is not a valid intersection.
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }
}
