//! Validation procedures

mod frozen_sets;
mod holdout;
mod k_fold;
mod leave_one_out;
mod leave_p_out;
mod plan;
mod repeated_k_fold;
mod stratified_k_fold;

pub use self::frozen_sets::FrozenSets;
pub use self::holdout::Holdout;
pub use self::k_fold::KFold;
pub use self::leave_one_out::LeaveOneOut;
pub use self::leave_p_out::{binomial, Combinations, LeavePOut};
pub use self::plan::{generate_splits, SplitPlan};
pub use self::repeated_k_fold::RepeatedKFold;
pub use self::stratified_k_fold::StratifiedKFold;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dataset::DataSet;
use crate::error::Result;

/// A lazy sequence of cross-validation splits
pub type Splits<'a> = Box<dyn Iterator<Item = Split> + 'a>;

/// Validation procedures support iteration over cross-validation splits.
///
/// Both methods check the procedure's parameters against the data set first, so an invalid
/// configuration fails before any split is produced.
pub trait Procedure {
    /// number of splits `splits` will yield for `data`
    fn n_splits(&self, data: &DataSet) -> Result<usize>;

    /// iterate over the splits of `data`. Every call starts a new sequence.
    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>>;
}

/// A single cross-validation split, consisting of a training set and a testing set.
///
/// Both sets hold sample indices in ascending order and never share an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub trainset: Vec<usize>,
    pub testset: Vec<usize>,
}

impl Split {
    pub fn new() -> Self {
        Split {
            trainset: Vec::new(),
            testset: Vec::new(),
        }
    }

    /// test on `testset` and train on every other index below `n`
    pub fn from_test(mut testset: Vec<usize>, n: usize) -> Self {
        testset.sort_unstable();

        let mut trainset = Vec::with_capacity(n.saturating_sub(testset.len()));
        let mut skip = testset.iter().peekable();
        for i in 0..n {
            if skip.peek() == Some(&&i) {
                skip.next();
            } else {
                trainset.push(i);
            }
        }

        Split { trainset, testset }
    }

    /// true if no index is both in the training and in the testing set
    pub fn is_disjoint(&self) -> bool {
        let mut test = self.testset.clone();
        test.sort_unstable();
        self.trainset.iter().all(|i| test.binary_search(i).is_err())
    }
}

impl Default for Split {
    fn default() -> Self {
        Split::new()
    }
}

/// Yields one split per fold, given the fold each sample belongs to.
pub(crate) struct FoldSplits {
    assignment: Vec<usize>,
    n_folds: usize,
    fold: usize,
}

impl FoldSplits {
    pub(crate) fn new(assignment: Vec<usize>, n_folds: usize) -> Self {
        FoldSplits {
            assignment,
            n_folds,
            fold: 0,
        }
    }
}

impl Iterator for FoldSplits {
    type Item = Split;

    fn next(&mut self) -> Option<Split> {
        if self.fold >= self.n_folds {
            return None;
        }

        let mut split = Split::new();
        for (i, &f) in self.assignment.iter().enumerate() {
            if f == self.fold {
                split.testset.push(i);
            } else {
                split.trainset.push(i);
            }
        }

        self.fold += 1;
        Some(split)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.n_folds.saturating_sub(self.fold);
        (n, Some(n))
    }
}

/// Random generator for one pass over the splits. Without a seed, a fresh one is drawn
/// from the thread-local generator.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}
