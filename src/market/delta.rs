use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the per-tick perturbations applied by the fast cadence.
pub trait DeltaSource {
    /// Absolute price move for one watchlist symbol.
    fn price_delta(&mut self, symbol: &str) -> f64;

    /// Percentage-point move for one index.
    fn index_delta(&mut self, name: &str) -> f64;
}

/// Uniform random walk: prices move within `±price_step`, indices within
/// `±index_step` percentage points.
pub struct RandomWalk {
    rng: StdRng,
    price_step: f64,
    index_step: f64,
}

impl RandomWalk {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            price_step: 1.0,
            index_step: 0.25,
        }
    }

    pub fn with_steps(mut self, price_step: f64, index_step: f64) -> Self {
        self.price_step = price_step.abs();
        self.index_step = index_step.abs();
        self
    }

    fn symmetric(&mut self, step: f64) -> f64 {
        if step == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-step..=step)
    }
}

impl DeltaSource for RandomWalk {
    fn price_delta(&mut self, _symbol: &str) -> f64 {
        self.symmetric(self.price_step)
    }

    fn index_delta(&mut self, _name: &str) -> f64 {
        self.symmetric(self.index_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_walk_stays_within_steps() {
        let mut walk = RandomWalk::new(Some(7));
        for _ in 0..500 {
            let p = walk.price_delta("AAPL");
            let i = walk.index_delta("SP500");
            assert!((-1.0..=1.0).contains(&p));
            assert!((-0.25..=0.25).contains(&i));
        }
    }

    #[test]
    fn zero_steps_stand_still() {
        let mut walk = RandomWalk::new(Some(3)).with_steps(0.0, -0.0);
        assert_eq!(walk.price_delta("AAPL"), 0.0);
        assert_eq!(walk.index_delta("VIX"), 0.0);
    }

    #[test]
    fn seeded_walks_repeat() {
        let mut a = RandomWalk::new(Some(42));
        let mut b = RandomWalk::new(Some(42));
        for _ in 0..10 {
            assert_eq!(a.price_delta("X"), b.price_delta("X"));
        }
    }
}
