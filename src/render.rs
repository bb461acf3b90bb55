use crate::color::Rgba;

/// Drawing primitives the animation core renders through.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
pub trait RenderTarget {
    /// Match the drawable region to new surface dimensions
    fn resize(&mut self, width: f32, height: f32);

    /// Erase the whole drawable region
    fn clear(&mut self);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba, width: f32);
}
