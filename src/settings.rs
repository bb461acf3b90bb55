use crate::color::Rgba;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Densest allowed population, in surface pixels per particle
pub const MIN_AREA_PER_PARTICLE: f32 = 100.0;

/// All network animation settings consolidated into one struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    // === Population ===
    /// Surface area (in pixels) per particle
    pub area_per_particle: f32,
    /// Smallest particle radius (inclusive)
    pub radius_min: f32,
    /// Largest particle radius (exclusive)
    pub radius_max: f32,
    /// Velocity components are drawn from [-max_speed, max_speed)
    pub max_speed: f32,

    // === Connections ===
    /// Particles closer than this are joined by a line
    pub connect_distance: f32,
    /// Stroke width of connection lines, in pixels
    pub line_width: f32,

    // === Visual ===
    pub particle_color: Rgba,
    /// Alpha is replaced per line by the distance-weighted opacity
    pub line_color: Rgba,
    pub background: Rgba,

    // === Host ===
    /// Surface pixels covered by one braille dot (1.0-16.0)
    pub pixels_per_dot: f32,
    /// Target frames per second (1-240)
    pub frame_rate: u32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            area_per_particle: 12000.0,
            radius_min: 1.0,
            radius_max: 2.5,
            max_speed: 0.2,

            connect_distance: 120.0,
            line_width: 0.5,

            particle_color: Rgba::new(59, 130, 246, 0.5),
            line_color: Rgba::opaque(139, 92, 246),
            background: Rgba::opaque(17, 24, 39),

            pixels_per_dot: 4.0,
            frame_rate: 60,
        }
    }
}

impl NetworkSettings {
    /// Set area per particle, never denser than `MIN_AREA_PER_PARTICLE`
    pub fn set_area_per_particle(&mut self, value: f32) {
        self.area_per_particle = if value.is_nan() {
            MIN_AREA_PER_PARTICLE
        } else {
            value.max(MIN_AREA_PER_PARTICLE)
        };
    }

    /// Set pixels per dot within bounds
    pub fn set_pixels_per_dot(&mut self, value: f32) {
        self.pixels_per_dot = value.clamp(1.0, 16.0);
    }

    /// Set frame rate within bounds
    pub fn set_frame_rate(&mut self, value: u32) {
        self.frame_rate = value.clamp(1, 240);
    }

    /// Time budget for one frame
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    /// Check that every value is usable by the animation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(name: &'static str, value: f32, reason: &'static str) -> ConfigError {
            ConfigError::InvalidSetting {
                name,
                value: value.to_string(),
                reason,
            }
        }

        if !(self.area_per_particle.is_finite()
            && self.area_per_particle >= MIN_AREA_PER_PARTICLE)
        {
            return Err(invalid(
                "area_per_particle",
                self.area_per_particle,
                "must be at least 100",
            ));
        }
        if !(self.radius_min.is_finite() && self.radius_min > 0.0) {
            return Err(invalid("radius_min", self.radius_min, "must be positive"));
        }
        if !(self.radius_max.is_finite() && self.radius_max > self.radius_min) {
            return Err(invalid("radius_max", self.radius_max, "must exceed radius_min"));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(invalid("max_speed", self.max_speed, "must not be negative"));
        }
        if !(self.connect_distance.is_finite() && self.connect_distance > 0.0) {
            return Err(invalid("connect_distance", self.connect_distance, "must be positive"));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(invalid("line_width", self.line_width, "must be positive"));
        }
        if !(1.0..=16.0).contains(&self.pixels_per_dot) {
            return Err(invalid("pixels_per_dot", self.pixels_per_dot, "must be within 1-16"));
        }
        if !(1..=240).contains(&self.frame_rate) {
            return Err(invalid("frame_rate", self.frame_rate as f32, "must be within 1-240"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = NetworkSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.area_per_particle, 12000.0);
        assert_eq!(settings.connect_distance, 120.0);
        assert_eq!(settings.max_speed, 0.2);
    }

    #[test]
    fn test_particle_and_line_colors_differ() {
        let settings = NetworkSettings::default();
        assert_ne!(
            (settings.particle_color.r, settings.particle_color.g, settings.particle_color.b),
            (settings.line_color.r, settings.line_color.g, settings.line_color.b)
        );
    }

    #[test]
    fn test_validate_rejects_inverted_radius_range() {
        let settings = NetworkSettings {
            radius_min: 3.0,
            radius_max: 2.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::InvalidSetting { name, .. }) => assert_eq!(name, "radius_max"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_density() {
        let settings = NetworkSettings {
            area_per_particle: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_density() {
        let settings = NetworkSettings {
            area_per_particle: 0.000001,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::InvalidSetting { name, .. }) => assert_eq!(name, "area_per_particle"),
            other => panic!("unexpected result: {:?}", other),
        }

        let settings = NetworkSettings {
            area_per_particle: MIN_AREA_PER_PARTICLE,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = NetworkSettings::default();
        settings.set_area_per_particle(0.000001);
        assert_eq!(settings.area_per_particle, MIN_AREA_PER_PARTICLE);
        settings.set_area_per_particle(f32::NAN);
        assert_eq!(settings.area_per_particle, MIN_AREA_PER_PARTICLE);
        settings.set_area_per_particle(30000.0);
        assert_eq!(settings.area_per_particle, 30000.0);
        settings.set_pixels_per_dot(100.0);
        assert_eq!(settings.pixels_per_dot, 16.0);
        settings.set_frame_rate(0);
        assert_eq!(settings.frame_rate, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: NetworkSettings =
            serde_json::from_str(r#"{ "connect_distance": 80.0 }"#).unwrap();
        assert_eq!(settings.connect_distance, 80.0);
        assert_eq!(settings.area_per_particle, 12000.0);
    }
}
