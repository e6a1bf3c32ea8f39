use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{Procedure, Split, Splits};

/// Leave-One-Out cross-validation
///
/// Each sample is the test set of exactly one split; the same as unshuffled K-Fold with as
/// many folds as samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveOneOut;

impl LeaveOneOut {
    fn check(n_samples: usize) -> Result<()> {
        if n_samples < 2 {
            return Err(Error::config(format!(
                "leave-one-out needs at least 2 samples, got {}",
                n_samples
            )));
        }
        Ok(())
    }
}

impl Procedure for LeaveOneOut {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        LeaveOneOut::check(data.n_samples())?;
        Ok(data.n_samples())
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let n = data.n_samples();
        LeaveOneOut::check(n)?;
        debug!("leave-one-out: {} splits", n);

        Ok(Box::new((0..n).map(move |i| Split {
            trainset: (0..n).filter(|&j| j != i).collect(),
            testset: vec![i],
        })))
    }
}
