use rand::seq::SliceRandom;
use rand::Rng;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{seeded_rng, FoldSplits, Procedure, Splits};

/// K-Fold cross-validation
///
/// The samples are divided into `n_splits` folds of (almost) equal size. Each fold is used
/// once as test set while the remaining folds form the training set. If `n_samples` is not
/// divisible by `n_splits`, the first `n_samples % n_splits` folds get one extra sample.
///
/// Without shuffling, folds are contiguous blocks of indices. With shuffling, the indices are
/// permuted first; a fixed `seed` makes the permutation reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KFold {
    pub n_splits: usize,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        KFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// shuffle before partitioning; `None` draws a new permutation on every pass
    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    pub(crate) fn check(&self, n_samples: usize) -> Result<()> {
        if self.n_splits < 2 {
            return Err(Error::config(format!(
                "k-fold needs at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if self.n_splits > n_samples {
            return Err(Error::config(format!(
                "cannot have {} folds with only {} samples",
                self.n_splits, n_samples
            )));
        }
        Ok(())
    }
}

impl Procedure for KFold {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.check(data.n_samples())?;
        Ok(self.n_splits)
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let n = data.n_samples();
        self.check(n)?;

        if !self.shuffle && self.seed.is_some() {
            warn!("k-fold seed is ignored because shuffling is disabled");
        }
        debug!("k-fold: {} splits over {} samples", self.n_splits, n);

        let assignment = if self.shuffle {
            fold_assignment(n, self.n_splits, Some(&mut seeded_rng(self.seed)))
        } else {
            fold_assignment::<rand_chacha::ChaCha8Rng>(n, self.n_splits, None)
        };

        Ok(Box::new(FoldSplits::new(assignment, self.n_splits)))
    }
}

/// Fold of each sample when `n` samples are cut into `k` blocks, after optionally shuffling
/// the sample order.
pub(crate) fn fold_assignment<R: Rng>(n: usize, k: usize, rng: Option<&mut R>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if let Some(rng) = rng {
        order.shuffle(rng);
    }

    let mut assignment = vec![0; n];
    let mut start = 0;
    for fold in 0..k {
        let size = n / k + if fold < n % k { 1 } else { 0 };
        for &i in &order[start..start + size] {
            assignment[i] = fold;
        }
        start += size;
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn unshuffled_folds_are_contiguous() {
        let splits = collect(&KFold::new(3), &samples(7));
        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0].testset, vec![0, 1, 2]);
        assert_eq!(splits[1].testset, vec![3, 4]);
        assert_eq!(splits[2].testset, vec![5, 6]);
        assert_eq!(splits[1].trainset, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn folds_partition_the_samples() {
        for n in 2..30 {
            for k in 2..=n.min(8) {
                let data = samples(n);
                let splits = collect(&KFold::new(k).with_shuffle(Some(n as u64)), &data);
                assert_eq!(splits.len(), k);
                assert_partition(&splits, n);

                let sizes: Vec<_> = splits.iter().map(|s| s.testset.len()).collect();
                let min = *sizes.iter().min().unwrap();
                let max = *sizes.iter().max().unwrap();
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn breast_cancer_sized_fold_sizes() {
        let splits = collect(&KFold::new(5).with_shuffle(Some(4)), &samples(569));
        let mut sizes: Vec<_> = splits.iter().map(|s| s.testset.len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 569);
        sizes.sort();
        assert_eq!(sizes, vec![113, 114, 114, 114, 114]);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let data = samples(50);
        let kf = KFold::new(5).with_shuffle(Some(4));
        assert_eq!(collect(&kf, &data), collect(&kf, &data));

        let other = KFold::new(5).with_shuffle(Some(5));
        assert_ne!(collect(&kf, &data), collect(&other, &data));
    }

    #[test]
    fn unseeded_shuffle_differs_between_passes() {
        let data = samples(200);
        let kf = KFold::new(4).with_shuffle(None);
        assert_ne!(collect(&kf, &data), collect(&kf, &data));
    }

    #[test]
    fn invalid_fold_counts() {
        let data = samples(4);
        assert!(KFold::new(1).splits(&data).is_err());
        assert!(KFold::new(5).splits(&data).is_err());
        assert!(KFold::new(4).splits(&data).is_ok());
        match KFold::new(0).n_splits(&data) {
            Err(Error::ConfigError(_)) => {}
            r => panic!("unexpected {:?}", r),
        }
    }
}
