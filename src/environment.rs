//! Host environment queries used by the street component.

/// What the component needs to know about the window it lives in.
pub trait Environment {
    /// Whether the display has a hovering (non-touch) pointer. Read once when
    /// the component is constructed.
    fn is_pointer_device(&self) -> bool;

    /// Current width of the containing window in logical pixels.
    fn viewport_width(&self) -> f32;
}

/// Environment with fixed answers, for headless hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEnvironment {
    pub pointer_device: bool,
    pub viewport_width: f32,
}

impl FixedEnvironment {
    pub fn desktop(viewport_width: f32) -> Self {
        Self {
            pointer_device: true,
            viewport_width,
        }
    }

    pub fn touch(viewport_width: f32) -> Self {
        Self {
            pointer_device: false,
            viewport_width,
        }
    }
}

impl Environment for FixedEnvironment {
    fn is_pointer_device(&self) -> bool {
        self.pointer_device
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}
