use crate::color::Rgba;
use crate::connector::ProximityConnector;
use crate::field::ParticleField;
use crate::render::RenderTarget;
use crate::settings::NetworkSettings;
use crate::surface::Surface;
use tracing::{info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, never started
    Idle,
    /// Started; ticks until the process exits
    Running,
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub particles: usize,
    pub pairs_evaluated: usize,
    pub lines_drawn: usize,
}

/// Per-frame driver that owns the surface, the field and the connector
pub struct AnimationLoop<T> {
    state: LoopState,
    surface: Surface<T>,
    field: ParticleField,
    connector: ProximityConnector,
    particle_color: Rgba,
    frames: u64,
}

impl<T: RenderTarget> AnimationLoop<T> {
    pub fn new(target: T, field: ParticleField, settings: &NetworkSettings) -> Self {
        Self {
            state: LoopState::Idle,
            surface: Surface::new(target),
            field,
            connector: ProximityConnector::from_settings(settings),
            particle_color: settings.particle_color,
            frames: 0,
        }
    }

    /// Size the surface, populate the field and begin ticking.
    ///
    /// Only the first call has any effect.
    pub fn start(&mut self, width: f32, height: f32) {
        if self.state == LoopState::Running {
            warn!("animation loop already running, ignoring start");
            return;
        }
        self.state = LoopState::Running;
        self.surface.resize(width, height, &mut self.field);
        info!(width, height, particles = self.field.len(), "animation loop started");
    }

    /// Viewport changed: resize the surface, which rebuilds the field
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height, &mut self.field);
    }

    /// Clear, move and draw every particle in order, then connect neighbours.
    ///
    /// Returns `None` before `start`.
    pub fn tick(&mut self) -> Option<FrameStats> {
        if self.state == LoopState::Idle {
            return None;
        }

        self.surface.clear();
        for particle in self.field.particles_mut() {
            particle.update(&mut self.surface, self.particle_color);
        }
        let connect = self
            .connector
            .connect_all(self.field.particles(), self.surface.target_mut());

        self.frames += 1;
        let stats = FrameStats {
            frame: self.frames,
            particles: self.field.len(),
            pairs_evaluated: connect.pairs_evaluated,
            lines_drawn: connect.lines_drawn,
        };
        trace!(?stats, "tick");
        Some(stats)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn surface(&self) -> &Surface<T> {
        &self.surface
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[cfg(test)]
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::render::recording::{DrawOp, RecordingTarget};

    fn new_loop(seed: u64) -> AnimationLoop<RecordingTarget> {
        let settings = NetworkSettings::default();
        let field = ParticleField::with_seed(&settings, seed);
        AnimationLoop::new(RecordingTarget::default(), field, &settings)
    }

    #[test]
    fn test_idle_until_started() {
        let mut anim = new_loop(1);
        assert_eq!(anim.state(), LoopState::Idle);
        assert_eq!(anim.tick(), None);
        assert!(anim.surface().target().ops.is_empty());

        anim.start(1200.0, 800.0);
        assert_eq!(anim.state(), LoopState::Running);
        assert_eq!(anim.field().len(), 80);
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut anim = new_loop(1);
        anim.start(1200.0, 800.0);
        let before = anim.field().particles().to_vec();
        anim.start(600.0, 400.0);
        assert_eq!(anim.surface().width(), 1200.0);
        assert_eq!(anim.field().particles(), before.as_slice());
    }

    #[test]
    fn test_tick_order_clear_circles_lines() {
        let mut anim = new_loop(2);
        anim.start(1200.0, 800.0);
        anim.field_mut().set_particles(vec![
            Particle::new(100.0, 100.0, 0.0, 0.0, 1.0),
            Particle::new(150.0, 100.0, 0.0, 0.0, 2.0),
            Particle::new(900.0, 700.0, 0.0, 0.0, 1.5),
        ]);

        let stats = anim.tick().unwrap();
        assert_eq!(stats.frame, 1);
        assert_eq!(stats.particles, 3);
        assert_eq!(stats.pairs_evaluated, 6);
        assert_eq!(stats.lines_drawn, 1);

        let ops = &anim.surface().target().ops;
        let tick_ops = &ops[ops.iter().rposition(|op| *op == DrawOp::Clear).unwrap()..];
        assert_eq!(tick_ops.len(), 1 + 3 + 1);
        assert_eq!(tick_ops[0], DrawOp::Clear);
        let radii: Vec<f32> = tick_ops[1..4]
            .iter()
            .map(|op| match op {
                DrawOp::Circle { radius, .. } => *radius,
                other => panic!("expected circle, got {:?}", other),
            })
            .collect();
        assert_eq!(radii, vec![1.0, 2.0, 1.5]);
        assert!(matches!(tick_ops[4], DrawOp::Line { .. }));
    }

    #[test]
    fn test_lines_use_post_update_positions() {
        let mut anim = new_loop(3);
        anim.start(1200.0, 800.0);
        // 119.9 apart before the move, 120.1 after
        anim.field_mut().set_particles(vec![
            Particle::new(100.0, 100.0, -0.1, 0.0, 1.0),
            Particle::new(219.9, 100.0, 0.1, 0.0, 1.0),
        ]);

        let stats = anim.tick().unwrap();
        assert_eq!(stats.lines_drawn, 0);
    }

    #[test]
    fn test_resize_to_zero_yields_empty_frames() {
        let mut anim = new_loop(4);
        anim.start(1200.0, 800.0);
        anim.resize(0.0, 0.0);

        let stats = anim.tick().unwrap();
        assert_eq!(stats.particles, 0);
        assert_eq!(stats.pairs_evaluated, 0);
        assert_eq!(stats.lines_drawn, 0);
    }

    #[test]
    fn test_frames_count_up() {
        let mut anim = new_loop(5);
        anim.start(640.0, 480.0);
        for expected in 1..=5 {
            assert_eq!(anim.tick().unwrap().frame, expected);
        }
    }

    #[test]
    fn test_default_field_pair_count_and_circle_count() {
        let mut anim = new_loop(6);
        anim.start(1200.0, 800.0);
        let stats = anim.tick().unwrap();
        assert_eq!(stats.pairs_evaluated, 80 * 81 / 2);
        assert_eq!(anim.surface().target().circles().len(), 80);
        assert_eq!(anim.surface().target().lines().len(), stats.lines_drawn);
    }
}
