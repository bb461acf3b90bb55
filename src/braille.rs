use crate::color::Rgba;
use crate::render::RenderTarget;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Render target that rasterizes into a grid of Braille cells.
///
/// Every cell keeps the most opaque color drawn into it, so a bright
/// particle wins over a faint line passing through the same cell.
pub struct BrailleCanvas {
    pixels_per_dot: f32,
    cols: u16,
    rows: u16,
    dots_wide: i64,
    dots_high: i64,
    patterns: Vec<u8>,
    ink: Vec<Option<Rgba>>,
}

impl BrailleCanvas {
    pub fn new(pixels_per_dot: f32) -> Self {
        Self {
            pixels_per_dot: pixels_per_dot.max(f32::EPSILON),
            cols: 0,
            rows: 0,
            dots_wide: 0,
            dots_high: 0,
            patterns: Vec::new(),
            ink: Vec::new(),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Map a surface coordinate to its dot index
    fn to_dot(&self, v: f32) -> i64 {
        (v / self.pixels_per_dot).floor() as i64
    }

    fn plot(&mut self, dot_x: i64, dot_y: i64, color: Rgba) {
        if dot_x < 0 || dot_y < 0 || dot_x >= self.dots_wide || dot_y >= self.dots_high {
            return;
        }
        let cx = (dot_x / 2) as usize;
        let cy = (dot_y / 4) as usize;
        let idx = cy * self.cols as usize + cx;

        self.patterns[idx] |= BRAILLE_DOTS[(dot_x % 2) as usize][(dot_y % 4) as usize];
        let stronger = match self.ink[idx] {
            Some(existing) => color.a >= existing.a,
            None => true,
        };
        if stronger {
            self.ink[idx] = Some(color);
        }
    }

    /// Plot a square of `thickness` dots centred on a dot
    fn plot_thick(&mut self, dot_x: i64, dot_y: i64, thickness: i64, color: Rgba) {
        let before = (thickness - 1) / 2;
        for oy in 0..thickness {
            for ox in 0..thickness {
                self.plot(dot_x - before + ox, dot_y - before + oy, color);
            }
        }
    }

    /// Every non-empty cell, colored by compositing its ink over `background`
    pub fn cells(&self, background: Rgba) -> impl Iterator<Item = BrailleCell> + '_ {
        let cols = self.cols.max(1) as usize;
        self.patterns
            .iter()
            .zip(self.ink.iter())
            .enumerate()
            .filter(|(_, (pattern, _))| **pattern != 0)
            .map(move |(idx, (pattern, ink))| {
                let color = ink.map_or(Color::White, |ink| ink.over(background));
                BrailleCell {
                    x: (idx % cols) as u16,
                    y: (idx / cols) as u16,
                    char: char::from_u32(BRAILLE_BASE + *pattern as u32).unwrap_or(' '),
                    color,
                }
            })
    }
}

impl RenderTarget for BrailleCanvas {
    fn resize(&mut self, width: f32, height: f32) {
        self.dots_wide = (width / self.pixels_per_dot).ceil().max(0.0) as i64;
        self.dots_high = (height / self.pixels_per_dot).ceil().max(0.0) as i64;
        self.cols = ((self.dots_wide + 1) / 2).min(u16::MAX as i64) as u16;
        self.rows = ((self.dots_high + 3) / 4).min(u16::MAX as i64) as u16;

        let len = self.cols as usize * self.rows as usize;
        self.patterns = vec![0; len];
        self.ink = vec![None; len];
    }

    fn clear(&mut self) {
        self.patterns.fill(0);
        self.ink.fill(None);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        let cx = x / self.pixels_per_dot;
        let cy = y / self.pixels_per_dot;
        let r = radius / self.pixels_per_dot;

        // Sub-dot particles still light the dot they sit in
        self.plot(cx.floor() as i64, cy.floor() as i64, color);

        let r_sq = r * r;
        for dy in (cy - r).floor() as i64..=(cy + r).ceil() as i64 {
            for dx in (cx - r).floor() as i64..=(cx + r).ceil() as i64 {
                let ox = dx as f32 + 0.5 - cx;
                let oy = dy as f32 + 0.5 - cy;
                if ox * ox + oy * oy <= r_sq {
                    self.plot(dx, dy, color);
                }
            }
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba, width: f32) {
        let (x1, y1) = (self.to_dot(from.0), self.to_dot(from.1));
        let (x2, y2) = (self.to_dot(to.0), self.to_dot(to.1));
        let thickness = ((width / self.pixels_per_dot).round() as i64).max(1);

        // Bresenham
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        let mut x = x1;
        let mut y = y1;

        loop {
            self.plot_thick(x, y, thickness, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Surface size in pixels for a terminal area of `cols` x `rows` cells
pub fn viewport_pixels(cols: u16, rows: u16, pixels_per_dot: f32) -> (f32, f32) {
    // Braille gives 2x4 resolution per character
    (
        cols as f32 * 2.0 * pixels_per_dot,
        rows as f32 * 4.0 * pixels_per_dot,
    )
}
