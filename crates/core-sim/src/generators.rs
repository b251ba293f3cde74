use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::config::MINUTES_IN_YEAR;

/// Geometric-Brownian-motion price stepper with an explicitly owned, seeded
/// RNG. One standard normal draw per call, no other side effects.
#[derive(Debug, Clone)]
pub struct PricePathGenerator {
    rng: StdRng,
    drift: f64,
    volatility: f64,
    dt_years: f64,
}

impl PricePathGenerator {
    pub fn new(seed: u64, drift: f64, volatility: f64, step_minutes: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drift,
            volatility,
            dt_years: step_minutes / MINUTES_IN_YEAR,
        }
    }

    /// `next = current * exp((drift - vol^2/2) * dt + vol * sqrt(dt) * Z)`.
    /// Strictly positive for finite inputs and a positive current price.
    pub fn next_price(&mut self, current_price: f64) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.rng);
        let exponent = (self.drift - 0.5 * self.volatility * self.volatility) * self.dt_years
            + self.volatility * self.dt_years.sqrt() * z;
        current_price * exponent.exp()
    }
}
