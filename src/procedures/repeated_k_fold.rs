use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::k_fold::fold_assignment;
use super::{seeded_rng, FoldSplits, KFold, Procedure, Splits};

/// Repeated K-Fold cross-validation
///
/// Runs shuffled K-Fold `n_repeats` times. Every repetition draws its own permutation from a
/// seed derived from `seed`. Splits are yielded repetition by repetition, `n_splits * n_repeats`
/// in total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedKFold {
    pub n_splits: usize,
    pub n_repeats: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RepeatedKFold {
    pub fn new(n_splits: usize, n_repeats: usize) -> Self {
        RepeatedKFold {
            n_splits,
            n_repeats,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check(&self, n_samples: usize) -> Result<()> {
        if self.n_repeats < 1 {
            return Err(Error::config("repeated k-fold needs at least one repetition"));
        }
        KFold::new(self.n_splits).check(n_samples)
    }
}

impl Procedure for RepeatedKFold {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.check(data.n_samples())?;
        self.n_splits
            .checked_mul(self.n_repeats)
            .ok_or_else(|| Error::config("too many repeated k-fold splits"))
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let n_total = self.n_splits(data)?;
        let n = data.n_samples();
        let k = self.n_splits;

        debug!(
            "repeated k-fold: {} x {} = {} splits over {} samples",
            self.n_repeats, k, n_total, n
        );

        let mut master = seeded_rng(self.seed);
        let iter = (0..self.n_repeats).flat_map(move |_| {
            let mut rng = ChaCha8Rng::seed_from_u64(master.next_u64());
            FoldSplits::new(fold_assignment(n, k, Some(&mut rng)), k)
        });

        Ok(Box::new(iter))
    }
}
