use super::{Vec2, Viewport};

/// 2D affine transform.
///
/// Maps `p` to `(a·x + c·y + tx, b·x + d·y + ty)`. The geometry stage composes
/// this (as the global camera/projection) with each quad's local unit-square
/// placement to produce clip-space vertex positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform2 {
    pub const IDENTITY: Transform2 = Transform2 {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, tx: 0.0, ty: 0.0 }
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx, ty }
    }

    /// Projection from device pixels to clip space for the given viewport:
    /// x ∈ [0, w·scale] → [-1, 1], y ∈ [0, h·scale] → [1, -1] (y flips; screen
    /// space grows downward, clip space grows upward).
    #[inline]
    pub fn orthographic(viewport: Viewport, scale: f32) -> Self {
        let (w, h) = viewport.device_extent(scale);
        Self {
            a: 2.0 / w as f32,
            b: 0.0,
            c: 0.0,
            d: -2.0 / h as f32,
            tx: -1.0,
            ty: 1.0,
        }
    }

    /// Applies `self` after `other` (i.e. `self · other` as matrices).
    #[inline]
    pub fn compose(self, other: Transform2) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }
}

impl Default for Transform2 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let p = Vec2::new(3.5, -7.25);
        assert_eq!(Transform2::IDENTITY.apply(p), p);
    }

    #[test]
    fn orthographic_maps_viewport_corners_to_clip() {
        let t = Transform2::orthographic(Viewport::new(800.0, 600.0), 1.0);
        assert_eq!(t.apply(Vec2::zero()), Vec2::new(-1.0, 1.0));
        assert_eq!(t.apply(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(t.apply(Vec2::new(400.0, 300.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn compose_applies_right_then_left() {
        let scale = Transform2::scale(2.0, 2.0);
        let translate = Transform2::translation(10.0, 0.0);
        // translate, then scale: (1, 0) → (11, 0) → (22, 0)
        let combined = scale.compose(translate);
        assert_eq!(combined.apply(Vec2::new(1.0, 0.0)), Vec2::new(22.0, 0.0));
    }
}
