use std::convert::TryFrom;

use crate::dataset::DataSet;
use crate::error::{Error, Result};

use super::{Procedure, Split, Splits};

/// enumerations larger than this are logged as a warning
const LARGE_ENUMERATION: usize = 100_000;

/// Leave-P-Out cross-validation
///
/// Every distinct set of `p` samples is used once as test set, in lexicographic order of the
/// index tuples. This yields `C(n_samples, p)` splits, which becomes very large quickly; run it
/// on a reduced sample of the data (see `DataSet::head`) for anything but small `p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePOut {
    pub p: usize,
}

impl LeavePOut {
    pub fn new(p: usize) -> Self {
        LeavePOut { p }
    }

    fn check(&self, n_samples: usize) -> Result<usize> {
        if self.p < 1 {
            return Err(Error::config("leave-p-out needs p >= 1"));
        }
        if self.p >= n_samples {
            return Err(Error::config(format!(
                "leave-p-out needs p < n_samples, got p={} with {} samples",
                self.p, n_samples
            )));
        }
        binomial(n_samples, self.p).ok_or_else(|| {
            Error::config(format!(
                "C({}, {}) leave-p-out splits cannot be enumerated",
                n_samples, self.p
            ))
        })
    }
}

impl Procedure for LeavePOut {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.check(data.n_samples())
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        let n = data.n_samples();
        let count = self.check(n)?;

        if count > LARGE_ENUMERATION {
            warn!(
                "leave-{}-out over {} samples enumerates {} splits; consider a smaller sample",
                self.p, n, count
            );
        }
        debug!("leave-{}-out: {} splits over {} samples", self.p, count, n);

        Ok(Box::new(
            Combinations::new(n, self.p).map(move |test| Split::from_test(test, n)),
        ))
    }
}

/// Number of ways to choose `k` out of `n` items, or `None` if it does not fit in `usize`.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);

    let mut result: u128 = 1;
    for i in 0..k {
        // exact: the product of i+1 consecutive integers is divisible by (i+1)!
        result = result.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }

    usize::try_from(result).ok()
}

/// All `k`-element subsets of `0..n`, as ascending index vectors in lexicographic order.
///
/// Only the current combination is kept in memory.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }

    /// advance `indices` to the next combination; false if there is none
    fn step(&mut self) -> bool {
        let k = self.indices.len();
        let n = self.n;

        let pivot = match (0..k).rev().find(|&i| self.indices[i] < n - k + i) {
            Some(i) => i,
            None => return false,
        };

        self.indices[pivot] += 1;
        for j in pivot + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();
        self.done = !self.step();
        Some(current)
    }
}
