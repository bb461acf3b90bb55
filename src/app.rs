use crate::animation::{AnimationLoop, FrameStats};
use crate::braille::{self, BrailleCanvas};
use crate::field::ParticleField;
use crate::settings::NetworkSettings;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// Number of recent frame durations averaged for the FPS readout
const FPS_WINDOW: usize = 30;

/// Main application state
pub struct App {
    pub animation: AnimationLoop<BrailleCanvas>,
    pub settings: NetworkSettings,
    pub show_stats: bool,
    pub last_stats: FrameStats,
    frame_times: VecDeque<Duration>,
    last_frame: Option<Instant>,
}

impl App {
    /// Create the app; `seed` fixes the particle layout for reproducible runs
    pub fn new(settings: NetworkSettings, seed: Option<u64>, show_stats: bool) -> Self {
        let field = match seed {
            Some(seed) => ParticleField::with_seed(&settings, seed),
            None => ParticleField::from_entropy(&settings),
        };
        let canvas = BrailleCanvas::new(settings.pixels_per_dot);
        Self {
            animation: AnimationLoop::new(canvas, field, &settings),
            settings,
            show_stats,
            last_stats: FrameStats::default(),
            frame_times: VecDeque::with_capacity(FPS_WINDOW),
            last_frame: None,
        }
    }

    /// Begin animating on a canvas of `cols` x `rows` terminal cells
    pub fn start(&mut self, cols: u16, rows: u16) {
        let (width, height) = braille::viewport_pixels(cols, rows, self.settings.pixels_per_dot);
        self.animation.start(width, height);
    }

    /// Resize the surface to match a new terminal size
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (width, height) = braille::viewport_pixels(cols, rows, self.settings.pixels_per_dot);
        self.animation.resize(width, height);

        let canvas = self.animation.surface().target();
        debug!(
            cols,
            rows,
            canvas_cols = canvas.cols(),
            canvas_rows = canvas.rows(),
            particles = self.animation.field().len(),
            "terminal resized"
        );
    }

    /// Run one animation frame
    pub fn tick(&mut self) {
        if let Some(stats) = self.animation.tick() {
            self.last_stats = stats;
            self.record_frame_time(Instant::now());
        }
    }

    fn record_frame_time(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            if self.frame_times.len() == FPS_WINDOW {
                self.frame_times.pop_front();
            }
            self.frame_times.push_back(now.duration_since(last));
        }
        self.last_frame = Some(now);
    }

    /// Measured frames per second over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.frame_times.iter().sum();
        if self.frame_times.is_empty() || total.is_zero() {
            0.0
        } else {
            self.frame_times.len() as f32 / total.as_secs_f32()
        }
    }
}
