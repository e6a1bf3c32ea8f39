use std::fs;
use std::path::Path;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{Procedure, Split, Splits};

/// Predefined splits, grouped by repetition. Iteration is repetition-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenSets {
    pub folds: Vec<Vec<Split>>,
}

/// One row of an ARFF split file: sample `rowid` is in the `purpose` set of `fold` in
/// repetition `repeat`.
#[derive(Debug, Deserialize)]
struct CrossValItem {
    #[serde(rename = "type")]
    purpose: TrainTest,

    rowid: usize,

    repeat: usize,

    fold: usize,
}

#[derive(Debug, Deserialize)]
enum TrainTest {
    #[serde(rename = "TRAIN")]
    Train,

    #[serde(rename = "TEST")]
    Test,
}

impl FrozenSets {
    /// freeze the splits produced by another procedure
    pub fn capture<P: Procedure>(procedure: &P, data: &DataSet) -> Result<Self> {
        Ok(FrozenSets {
            folds: vec![procedure.splits(data)?.collect()],
        })
    }

    /// parse an ARFF split file with the attributes `type` (TRAIN/TEST), `rowid`, `repeat`
    /// and `fold`
    pub fn from_arff_str(input: &str) -> Result<Self> {
        let data: Vec<CrossValItem> = arff::from_str(input)?;

        let mut folds = vec![];
        for item in data {
            if item.repeat >= folds.len() {
                folds.resize(item.repeat + 1, vec![]);
            }
            let rep = &mut folds[item.repeat];

            if item.fold >= rep.len() {
                rep.resize(item.fold + 1, Split::new());
            }
            let fold = &mut rep[item.fold];

            match item.purpose {
                TrainTest::Train => fold.trainset.push(item.rowid),
                TrainTest::Test => fold.testset.push(item.rowid),
            }
        }

        for split in folds.iter_mut().flatten() {
            split.trainset.sort_unstable();
            split.testset.sort_unstable();
        }

        Ok(FrozenSets { folds })
    }

    pub fn from_arff_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading splits {}", path.as_ref().display());
        FrozenSets::from_arff_str(&fs::read_to_string(path)?)
    }

    fn check(&self, n_samples: usize) -> Result<()> {
        for (r, rep) in self.folds.iter().enumerate() {
            for (f, split) in rep.iter().enumerate() {
                let out_of_range = split
                    .trainset
                    .iter()
                    .chain(&split.testset)
                    .any(|&i| i >= n_samples);
                if out_of_range {
                    return Err(Error::config(format!(
                        "split {} of repetition {} refers to samples beyond {}",
                        f, r, n_samples
                    )));
                }
                if split.testset.is_empty() {
                    return Err(Error::config(format!(
                        "split {} of repetition {} has no test samples",
                        f, r
                    )));
                }
                if !split.is_disjoint() {
                    return Err(Error::config(format!(
                        "split {} of repetition {} trains on test samples",
                        f, r
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Procedure for FrozenSets {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.check(data.n_samples())?;
        Ok(self.folds.iter().map(Vec::len).sum())
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        self.check(data.n_samples())?;
        let iter = self.folds.iter().flat_map(|inner| inner.iter().cloned());
        Ok(Box::new(iter))
    }
}
