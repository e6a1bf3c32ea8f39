//! Cross-validation splitting strategies for tabular data sets.
//!
//! A validation procedure (`KFold`, `RepeatedKFold`, `LeaveOneOut`, `LeavePOut`,
//! `StratifiedKFold`, ...) turns a `DataSet` into a lazy sequence of `Split`s, each a pair of
//! disjoint training and testing index sets. `cross_validate` fits a classifier on every split
//! and reports the training and testing accuracy.
//!
//! ```
//! use crossval::prelude::*;
//! use crossval::{DataSet, KFold};
//!
//! let data = DataSet::new((0..10).map(|i| i as f64).collect(), 1).unwrap();
//! let kfold = KFold::new(5).with_shuffle(Some(4));
//!
//! let mut n = 0;
//! for split in kfold.splits(&data).unwrap() {
//!     assert_eq!(split.testset.len(), 2);
//!     assert_eq!(split.trainset.len(), 8);
//!     n += 1;
//! }
//! assert_eq!(n, 5);
//! ```

extern crate arff;
#[macro_use]
extern crate log;
extern crate rand;
extern crate rand_chacha;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod baseline;
mod dataset;
mod error;
mod measure_accumulator;
pub mod procedures;
mod tasks;

pub use crate::dataset::DataSet;
pub use crate::error::{Error, Result};
pub use crate::measure_accumulator::{MeasureAccumulator, PredictiveAccuracy, ScoreSummary};
pub use crate::procedures::{
    generate_splits, FrozenSets, Holdout, KFold, LeaveOneOut, LeavePOut, RepeatedKFold, Split,
    SplitPlan, Splits, StratifiedKFold,
};
pub use crate::tasks::{cross_validate, CrossValScores, SupervisedClassification};

pub mod prelude {
    pub use crate::baseline::Classifier;
    pub use crate::measure_accumulator::MeasureAccumulator;
    pub use crate::procedures::Procedure;
}
