//! Viewport size source

/// Anything that can report the current drawable size in pixels
///
/// The scene polls this once per frame to compute the aspect ratio.
pub trait Viewport {
    /// Current size as `(width, height)` in pixels
    fn size(&self) -> (u32, u32);

    /// Width divided by height, or 1.0 while the surface has no height
    fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.size();
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}

/// Viewport with an explicitly set size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    width: u32,
    height: u32,
}

impl FixedViewport {
    /// Create a viewport of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Change the size, e.g. after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aspect_ratio() {
        let mut viewport = FixedViewport::new(1920, 1080);
        assert_relative_eq!(viewport.aspect_ratio(), 16.0 / 9.0);
        viewport.resize(800, 800);
        assert_relative_eq!(viewport.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_zero_height_does_not_divide() {
        assert_relative_eq!(FixedViewport::new(640, 0).aspect_ratio(), 1.0);
    }
}
