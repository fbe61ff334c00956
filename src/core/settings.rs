//=========================================================================
// Window Settings
//
// Creation-time configuration: rendering context attributes and the
// decoration style. Both are fixed for the lifetime of a window.
//
//=========================================================================

//=== External Crates =====================================================
use bitflags::bitflags;

//=== WindowSettings ======================================================

/// Rendering context attributes requested at creation.
///
/// Recorded on the window's [`RenderContext`] so the rendering
/// collaborator can honour them when it builds its surface.
///
/// [`RenderContext`]: crate::core::context::RenderContext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSettings {
    /// Bits of the depth buffer.
    pub depth_bits: u32,

    /// Bits of the stencil buffer.
    pub stencil_bits: u32,

    /// Multisampling level (0 = disabled).
    pub antialiasing_level: u32,

    /// Requested context version as (major, minor).
    pub context_version: (u32, u32),
}

impl WindowSettings {
    pub const fn new(depth_bits: u32, stencil_bits: u32, antialiasing_level: u32) -> Self {
        Self {
            depth_bits,
            stencil_bits,
            antialiasing_level,
            context_version: (2, 0),
        }
    }

    pub const fn with_context_version(mut self, major: u32, minor: u32) -> Self {
        self.context_version = (major, minor);
        self
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new(24, 8, 0)
    }
}

//=== WindowStyle =========================================================

bitflags! {
    /// Window decoration flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        /// Title bar with a fixed border.
        const TITLEBAR   = 1 << 0;
        /// Resizable border and maximize button.
        const RESIZE     = 1 << 1;
        /// Close button.
        const CLOSE      = 1 << 2;
        /// Exclusive fullscreen; other flags are ignored.
        const FULLSCREEN = 1 << 3;
    }
}

impl WindowStyle {
    /// Borderless window.
    pub const NONE: Self = Self::empty();

    /// Titlebar, resizable border and close button.
    pub const DEFAULT: Self = Self::TITLEBAR.union(Self::RESIZE).union(Self::CLOSE);

    /// Whether the platform should draw decorations at all.
    pub fn has_decorations(&self) -> bool {
        !self.contains(Self::FULLSCREEN) && self.intersects(Self::TITLEBAR | Self::RESIZE | Self::CLOSE)
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = WindowSettings::default();
        assert_eq!(settings.depth_bits, 24);
        assert_eq!(settings.stencil_bits, 8);
        assert_eq!(settings.antialiasing_level, 0);
        assert_eq!(settings.context_version, (2, 0));
    }

    #[test]
    fn context_version_override() {
        let settings = WindowSettings::new(32, 0, 4).with_context_version(3, 3);
        assert_eq!(settings.context_version, (3, 3));
        assert_eq!(settings.antialiasing_level, 4);
    }

    #[test]
    fn default_style_is_decorated() {
        let style = WindowStyle::default();
        assert!(style.contains(WindowStyle::TITLEBAR | WindowStyle::RESIZE | WindowStyle::CLOSE));
        assert!(style.has_decorations());
    }

    #[test]
    fn fullscreen_and_none_have_no_decorations() {
        assert!(!WindowStyle::NONE.has_decorations());
        assert!(!(WindowStyle::DEFAULT | WindowStyle::FULLSCREEN).has_decorations());
    }
}
