//=========================================================================
// Video Mode
//
// (width, height, bits-per-pixel) display configuration and the rule used
// to pick a fullscreen mode among the ones a display supports.
//
//=========================================================================

//=== VideoMode ===========================================================

/// A display configuration: size in pixels and color depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
}

impl VideoMode {
    /// Default color depth when none is given.
    pub const DEFAULT_BPP: u32 = 32;

    /// Size differences count this many times more than depth differences.
    const SIZE_WEIGHT: u64 = 16;

    pub const fn new(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        Self { width, height, bits_per_pixel }
    }

    /// Mode with the default 32-bit color depth.
    pub const fn with_size(width: u32, height: u32) -> Self {
        Self::new(width, height, Self::DEFAULT_BPP)
    }

    /// Distance used for fullscreen fallback:
    /// `16 * (|dw| + |dh|) + |dbpp|`.
    pub fn distance(&self, other: &VideoMode) -> u64 {
        let dw = u64::from(self.width.abs_diff(other.width));
        let dh = u64::from(self.height.abs_diff(other.height));
        let dbpp = u64::from(self.bits_per_pixel.abs_diff(other.bits_per_pixel));
        Self::SIZE_WEIGHT * (dw + dh) + dbpp
    }

    /// Picks the supported mode for a fullscreen request.
    ///
    /// Returns `self` when it is listed; otherwise the listed mode closest
    /// by [`VideoMode::distance`] (first one wins on ties). `None` only
    /// when `available` is empty.
    pub fn best_match(&self, available: &[VideoMode]) -> Option<VideoMode> {
        if available.contains(self) {
            return Some(*self);
        }
        available
            .iter()
            .copied()
            .min_by_key(|mode| self.distance(mode))
    }

    /// Whether the mode has a usable size and depth.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.bits_per_pixel > 0
    }
}

impl Default for VideoMode {
    fn default() -> Self {
        Self::with_size(800, 600)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
