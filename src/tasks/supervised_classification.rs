use crate::baseline::Classifier;
use crate::dataset::DataSet;
use crate::error::Result;
use crate::procedures::{Procedure, SplitPlan};

use super::{cross_validate, CrossValScores};

/// A labeled data set together with the procedure used to estimate a classifier's accuracy
#[derive(Debug, Clone)]
pub struct SupervisedClassification {
    pub(crate) name: String,
    pub(crate) source_data: DataSet,
    pub(crate) estimation_procedure: SplitPlan,
}

impl SupervisedClassification {
    pub fn new<S: Into<String>>(
        name: S,
        source_data: DataSet,
        estimation_procedure: SplitPlan,
    ) -> Self {
        SupervisedClassification {
            name: name.into(),
            source_data,
            estimation_procedure,
        }
    }

    /// get task name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_data(&self) -> &DataSet {
        &self.source_data
    }

    pub fn estimation_procedure(&self) -> &SplitPlan {
        &self.estimation_procedure
    }

    /// number of scores `run` will produce
    pub fn n_splits(&self) -> Result<usize> {
        self.estimation_procedure.n_splits(&self.source_data)
    }

    /// run task: train a model with `flow` on every training set and score it on the
    /// training and on the testing set
    pub fn run<F, C>(&self, flow: F) -> Result<CrossValScores>
    where
        F: Fn(&mut dyn Iterator<Item = (&[f64], usize)>) -> C,
        C: Classifier,
    {
        info!(
            "Running {} with {} validation",
            self.name,
            self.estimation_procedure.name()
        );
        cross_validate(&self.source_data, &self.estimation_procedure, flow)
    }
}
