use rand::seq::SliceRandom;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{seeded_rng, Procedure, Split, Splits};

/// A single shuffled train/test split.
///
/// `ceil(test_fraction * n_samples)` samples are held out for testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holdout {
    pub test_fraction: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Holdout {
    pub fn new(test_fraction: f64) -> Self {
        Holdout {
            test_fraction,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// number of test samples out of `n_samples`
    fn n_test(&self, n_samples: usize) -> Result<usize> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(Error::config(format!(
                "test fraction must lie strictly between 0 and 1, got {}",
                self.test_fraction
            )));
        }

        let n_test = (self.test_fraction * n_samples as f64).ceil() as usize;
        if n_test >= n_samples {
            return Err(Error::config(format!(
                "holding out {} of {} samples leaves nothing to train on",
                n_test, n_samples
            )));
        }
        Ok(n_test)
    }

    /// draw the split right away
    pub fn split(&self, data: &DataSet) -> Result<Split> {
        let n = data.n_samples();
        let n_test = self.n_test(n)?;

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut seeded_rng(self.seed));

        let mut trainset = order.split_off(n_test);
        let mut testset = order;
        trainset.sort_unstable();
        testset.sort_unstable();

        Ok(Split { trainset, testset })
    }
}

impl Procedure for Holdout {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.n_test(data.n_samples()).map(|_| 1)
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let split = self.split(data)?;
        debug!(
            "holdout: {} train / {} test samples",
            split.trainset.len(),
            split.testset.len()
        );
        Ok(Box::new(Some(split).into_iter()))
    }
}
