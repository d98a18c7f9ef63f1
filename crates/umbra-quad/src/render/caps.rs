/// Capability ceiling of a render target.
///
/// Historically the draw layer shipped near-duplicate shader variants per
/// target class; the only real differences were the number of gradient stops
/// an interpolator budget could carry and which features were compiled in.
/// One pipeline parameterized by `Caps` replaces those variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Caps {
    /// Gradient stop ceiling. Stops past this index are dropped at resolve /
    /// pack time; descriptors keep their stops pre-sorted, so the surviving
    /// prefix remains a valid gradient.
    pub max_stops: usize,
    /// Whether conic gradients are evaluated. Without it a conic fill
    /// degrades to its first stop color.
    pub conic: bool,
    /// Whether the border-only fill mode is honored.
    pub border_only: bool,
}

impl Caps {
    /// Full-featured target: 8 stops, all gradient kinds, border-only fills.
    pub const NATIVE: Caps = Caps {
        max_stops: 8,
        conic: true,
        border_only: true,
    };

    /// Constrained target with a small interpolator budget: 4 stops.
    pub const REDUCED: Caps = Caps {
        max_stops: 4,
        conic: true,
        border_only: true,
    };
}

impl Default for Caps {
    #[inline]
    fn default() -> Self {
        Self::NATIVE
    }
}
