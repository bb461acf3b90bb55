use crate::color::Rgba;
use crate::render::RenderTarget;
use crate::surface::Surface;

/// A single moving point of the network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity in pixels per tick
    pub dx: f32,
    /// Vertical velocity in pixels per tick
    pub dy: f32,
    pub radius: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> Self {
        Self { x, y, dx, dy, radius }
    }

    /// Reflect off the surface edges, then advance one tick.
    ///
    /// The edge test uses the position from before the move, so a particle
    /// may sit up to one velocity step outside the bounds for a tick before
    /// it turns around.
    pub fn step(&mut self, width: f32, height: f32) {
        if self.x > width || self.x < 0.0 {
            self.dx = -self.dx;
        }
        if self.y > height || self.y < 0.0 {
            self.dy = -self.dy;
        }
        self.x += self.dx;
        self.y += self.dy;
    }

    /// Advance one tick against the surface bounds and draw the result
    pub fn update<T: RenderTarget>(&mut self, surface: &mut Surface<T>, color: Rgba) {
        self.step(surface.width(), surface.height());
        self.draw(surface.target_mut(), color);
    }

    pub fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T, color: Rgba) {
        target.fill_circle(self.x, self.y, self.radius, color);
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
