use rand::seq::SliceRandom;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{seeded_rng, FoldSplits, KFold, Procedure, Splits};

/// Stratified K-Fold cross-validation
///
/// Like `KFold`, but every fold receives (almost) the same share of each class as the whole
/// data set. Samples are ordered class by class and dealt out to the folds round-robin, so a
/// class with `c` members contributes `c / k` rounded up or down to every fold, and fold sizes
/// differ by at most one.
///
/// Requires labels, and every class present must have at least `n_splits` members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// shuffle within each class; `None` draws a new permutation on every pass
    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    fn check<'a>(&self, data: &'a DataSet) -> Result<&'a [usize]> {
        let labels = data.require_labels("stratified k-fold")?;
        KFold::new(self.n_splits).check(data.n_samples())?;

        let counts = data.class_counts().unwrap_or_default();
        let classes = data.classes().unwrap_or_default();
        for (name, &count) in classes.iter().zip(&counts) {
            if count > 0 && count < self.n_splits {
                return Err(Error::config(format!(
                    "class {:?} has {} members, fewer than {} folds",
                    name, count, self.n_splits
                )));
            }
        }

        Ok(labels)
    }
}

impl Procedure for StratifiedKFold {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.check(data)?;
        Ok(self.n_splits)
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let labels = self.check(data)?;
        let k = self.n_splits;

        if !self.shuffle && self.seed.is_some() {
            warn!("stratified k-fold seed is ignored because shuffling is disabled");
        }
        debug!(
            "stratified k-fold: {} splits over {} samples in {} classes",
            k,
            labels.len(),
            data.n_classes()
        );

        let mut by_class = vec![Vec::new(); data.n_classes()];
        for (i, &c) in labels.iter().enumerate() {
            by_class[c].push(i);
        }

        if self.shuffle {
            let mut rng = seeded_rng(self.seed);
            for members in &mut by_class {
                members.shuffle(&mut rng);
            }
        }

        let mut assignment = vec![0; labels.len()];
        for (pos, &i) in by_class.iter().flatten().enumerate() {
            assignment[i] = pos % k;
        }

        Ok(Box::new(FoldSplits::new(assignment, k)))
    }
}
