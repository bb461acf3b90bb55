use crate::color::Rgba;
use crate::particle::Particle;
use crate::render::RenderTarget;
use crate::settings::NetworkSettings;

/// Counters from one connection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectStats {
    pub pairs_evaluated: usize,
    pub lines_drawn: usize,
}

/// Joins every pair of particles closer than `distance` with a fading line
#[derive(Debug, Clone)]
pub struct ProximityConnector {
    distance: f32,
    color: Rgba,
    line_width: f32,
}

impl ProximityConnector {
    pub fn new(distance: f32, color: Rgba, line_width: f32) -> Self {
        Self {
            distance,
            color,
            line_width,
        }
    }

    pub fn from_settings(settings: &NetworkSettings) -> Self {
        Self::new(
            settings.connect_distance,
            settings.line_color,
            settings.line_width,
        )
    }

    /// Line opacity for two points `d` apart, `None` when too far to connect
    pub fn opacity(&self, d: f32) -> Option<f32> {
        (d < self.distance).then(|| 1.0 - d / self.distance)
    }

    /// Draw a line for every close pair.
    ///
    /// `b` starts at `a` itself, so `n` particles cost `n * (n + 1) / 2`
    /// evaluations; the `a == b` pairs never draw.
    pub fn connect_all<T: RenderTarget + ?Sized>(
        &self,
        particles: &[Particle],
        target: &mut T,
    ) -> ConnectStats {
        let mut stats = ConnectStats::default();

        for (a, pa) in particles.iter().enumerate() {
            for (b, pb) in particles.iter().enumerate().skip(a) {
                stats.pairs_evaluated += 1;
                if a == b {
                    continue;
                }

                if let Some(opacity) = self.opacity(pa.distance_to(pb)) {
                    target.draw_line(
                        (pa.x, pa.y),
                        (pb.x, pb.y),
                        self.color.with_alpha(opacity),
                        self.line_width,
                    );
                    stats.lines_drawn += 1;
                }
            }
        }

        stats
    }
}
