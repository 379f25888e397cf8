use anyhow::{ensure, Context};
use matcore::Element;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seeded uniform fill for matrices declared without explicit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomFill {
    pub min: Element,
    pub max: Element,
    pub seed: u64,
}

impl Default for RandomFill {
    fn default() -> Self {
        Self {
            min: -9,
            max: 9,
            seed: 0,
        }
    }
}

impl RandomFill {
    /// Produces `rows * cols` values drawn from `[min, max]`.
    pub fn values(&self, rows: usize, cols: usize) -> anyhow::Result<Vec<Element>> {
        ensure!(
            self.min <= self.max,
            "random fill range is empty: min {} > max {}",
            self.min,
            self.max
        );
        let count = rows
            .checked_mul(cols)
            .context("overflow computing element count for random fill")?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..count)
            .map(|_| rng.gen_range(self.min..=self.max))
            .collect())
    }
}
