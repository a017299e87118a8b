use rand::Rng;

/// Progress points a racer accumulates to cross the finish line.
pub const FULL_COURSE: f64 = 100.0;

/// Speed and jitter ranges bots draw from. The defaults complete a course in
/// roughly 330-1000 ticks, i.e. 33-100 simulated seconds at the 100 ms tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacingConfig {
    pub base_speed_min: f64,
    pub base_speed_max: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_speed_min: 0.1,
            base_speed_max: 0.3,
            jitter_min: 0.8,
            jitter_max: 1.2,
        }
    }
}

impl PacingConfig {
    /// Config with the jitter pinned at 1.0, for deterministic simulations.
    pub fn steady(base_speed_min: f64, base_speed_max: f64) -> Self {
        Self {
            base_speed_min,
            base_speed_max,
            jitter_min: 1.0,
            jitter_max: 1.0,
        }
    }
}

/// One bot's speed parameter, drawn once at race start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pace {
    pub base_speed: f64,
}

impl Pace {
    pub fn draw<R: Rng>(config: &PacingConfig, rng: &mut R) -> Self {
        Self {
            base_speed: rng.gen_range(config.base_speed_min..=config.base_speed_max),
        }
    }

    /// Progress increment for one tick: the base speed scaled by a fresh
    /// jitter sample.
    pub fn step<R: Rng>(&self, config: &PacingConfig, rng: &mut R) -> f64 {
        self.base_speed * rng.gen_range(config.jitter_min..=config.jitter_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_stays_within_configured_range() {
        let config = PacingConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let pace = Pace::draw(&config, &mut rng);
            assert!(pace.base_speed >= config.base_speed_min);
            assert!(pace.base_speed <= config.base_speed_max);
        }
    }

    #[test]
    fn test_step_stays_within_jitter_band() {
        let config = PacingConfig::default();
        let pace = Pace { base_speed: 0.2 };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let step = pace.step(&config, &mut rng);
            assert!(step >= 0.2 * config.jitter_min);
            assert!(step <= 0.2 * config.jitter_max);
        }
    }

    #[test]
    fn test_steady_config_makes_step_exact() {
        let config = PacingConfig::steady(0.1, 0.3);
        let pace = Pace { base_speed: 0.25 };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(pace.step(&config, &mut rng), 0.25);
        }
    }

    #[test]
    fn test_default_range_bounds_course_length() {
        let config = PacingConfig::default();

        let fastest_ticks = (FULL_COURSE / config.base_speed_max).ceil();
        let slowest_ticks = (FULL_COURSE / config.base_speed_min).ceil();

        assert_eq!(fastest_ticks, 334.0);
        assert_eq!(slowest_ticks, 1000.0);
    }
}
