use crate::config::{AcceptanceMode, RunConfig};

/// Owns the temperature and its cooling schedule.
///
/// Threshold mode cools linearly (`T -= δ`), probabilistic mode geometrically
/// (`T *= δ`). Cooling is skipped once `T` has reached the mode's floor and a
/// single step never takes `T` below it. With a positive reset interval the
/// temperature returns to `T0` at the end of every round divisible by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annealer {
    initial: f64,
    temperature: f64,
    delta: f64,
    mode: AcceptanceMode,
    reset_interval: usize,
}

impl Annealer {
    /// Creates a scheduler starting at the configured `T0`.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            initial: config.temperature,
            temperature: config.temperature,
            delta: config.delta,
            mode: config.acceptance,
            reset_interval: config.reset_interval,
        }
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Temperature below which no cooling happens.
    pub fn floor(&self) -> f64 {
        self.mode.temperature_floor()
    }

    /// Applies the end-of-round schedule for `round`: optional reset, then cooldown.
    pub fn end_of_round(&mut self, round: usize) {
        if self.reset_interval > 0 && round % self.reset_interval == 0 {
            self.temperature = self.initial;
        }
        self.cooldown();
    }

    /// Performs one cooling step unless the floor has been reached.
    pub fn cooldown(&mut self) {
        let floor = self.floor();
        if self.temperature <= floor {
            return;
        }
        let cooled = match self.mode {
            AcceptanceMode::Probabilistic => self.temperature * self.delta,
            AcceptanceMode::Threshold => self.temperature - self.delta,
        };
        self.temperature = cooled.max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annealer(mode: AcceptanceMode, temperature: f64, delta: f64, reset: usize) -> Annealer {
        Annealer::new(&RunConfig {
            acceptance: mode,
            temperature,
            delta,
            reset_interval: reset,
            ..RunConfig::default()
        })
    }

    #[test]
    fn threshold_cools_linearly_and_clamps() {
        let mut schedule = annealer(AcceptanceMode::Threshold, 2.0, 0.4, 0);
        schedule.cooldown();
        assert!((schedule.temperature() - 1.6).abs() < 1e-12);
        schedule.cooldown();
        schedule.cooldown();
        assert!((schedule.temperature() - 1.0).abs() < 1e-12);
        schedule.cooldown();
        assert_eq!(schedule.temperature(), 1.0);
    }

    #[test]
    fn probabilistic_cools_geometrically_to_floor() {
        let mut schedule = annealer(AcceptanceMode::Probabilistic, 1.0, 0.5, 0);
        schedule.cooldown();
        assert!((schedule.temperature() - 0.5).abs() < 1e-12);
        for _ in 0..100 {
            schedule.cooldown();
        }
        assert_eq!(schedule.temperature(), 1e-5);
    }

    #[test]
    fn reset_restores_initial_before_cooling() {
        let mut schedule = annealer(AcceptanceMode::Threshold, 3.0, 0.5, 3);
        schedule.end_of_round(0);
        assert!((schedule.temperature() - 2.5).abs() < 1e-12);
        schedule.end_of_round(1);
        schedule.end_of_round(2);
        assert!((schedule.temperature() - 1.5).abs() < 1e-12);
        schedule.end_of_round(3);
        assert!((schedule.temperature() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn start_below_floor_never_cools() {
        let mut schedule = annealer(AcceptanceMode::Threshold, 0.5, 0.1, 2);
        for round in 0..5 {
            schedule.end_of_round(round);
            assert_eq!(schedule.temperature(), 0.5);
        }
    }

    #[test]
    fn zero_delta_holds_temperature() {
        let mut schedule = annealer(AcceptanceMode::Threshold, 2.0, 0.0, 0);
        schedule.end_of_round(0);
        assert_eq!(schedule.temperature(), 2.0);
    }
}
