use crate::field::ParticleField;
use crate::render::RenderTarget;
use tracing::debug;

/// The drawable region: current dimensions plus the target drawn into
pub struct Surface<T> {
    width: f32,
    height: f32,
    target: T,
}

impl<T: RenderTarget> Surface<T> {
    /// Zero-sized until the first resize
    pub fn new(target: T) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            target,
        }
    }

    /// Adopt new viewport dimensions and rebuild the field to match
    pub fn resize(&mut self, width: f32, height: f32, field: &mut ParticleField) {
        let width = width.max(0.0);
        let height = height.max(0.0);

        self.width = width;
        self.height = height;
        debug!(width, height, area = self.area(), "surface resized");
        self.target.resize(width, height);
        field.initialize(width, height);
    }

    /// Erase everything drawn so far
    pub fn clear(&mut self) {
        self.target.clear();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}
