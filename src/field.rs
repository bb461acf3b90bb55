use crate::particle::Particle;
use crate::settings::NetworkSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Upper bound on the population, whatever the surface size
pub const MAX_PARTICLES: usize = 5000;

/// The live particle collection, rebuilt whenever the surface changes size
pub struct ParticleField {
    particles: Vec<Particle>,
    area_per_particle: f32,
    radius_min: f32,
    radius_max: f32,
    max_speed: f32,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(settings: &NetworkSettings, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            area_per_particle: settings.area_per_particle,
            radius_min: settings.radius_min,
            radius_max: settings.radius_max,
            max_speed: settings.max_speed,
            rng,
        }
    }

    /// Field with a reproducible random sequence
    pub fn with_seed(settings: &NetworkSettings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    /// Field seeded from the operating system
    pub fn from_entropy(settings: &NetworkSettings) -> Self {
        Self::new(settings, StdRng::from_entropy())
    }

    /// Number of particles a surface of this size holds, capped at `MAX_PARTICLES`
    pub fn population(width: f32, height: f32, area_per_particle: f32) -> usize {
        let count = (width * height / area_per_particle).floor();
        if count.is_finite() && count > 0.0 {
            (count as usize).min(MAX_PARTICLES)
        } else {
            0
        }
    }

    /// Discard every particle and scatter a fresh population over the surface
    pub fn initialize(&mut self, width: f32, height: f32) {
        let count = Self::population(width, height, self.area_per_particle);
        if count == MAX_PARTICLES {
            warn!(width, height, max = MAX_PARTICLES, "particle population capped");
        }
        let mut particles = Vec::with_capacity(count);

        for _ in 0..count {
            let radius = sample(&mut self.rng, self.radius_min, self.radius_max);
            let inset = radius * 2.0;
            // Surfaces thinner than 4r pin the particle to the far edge
            let x = sample(&mut self.rng, inset, width - inset).min(width);
            let y = sample(&mut self.rng, inset, height - inset).min(height);
            let dx = sample(&mut self.rng, -self.max_speed, self.max_speed);
            let dy = sample(&mut self.rng, -self.max_speed, self.max_speed);
            particles.push(Particle::new(x, y, dx, dy, radius));
        }

        self.particles = particles;
        debug!(width, height, count, "particle field initialized");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}

/// Uniform draw from [low, high), or `low` when the range is empty
fn sample(rng: &mut StdRng, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
