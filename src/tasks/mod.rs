//! Evaluation of classifiers over cross-validation splits.

mod supervised_classification;

pub use self::supervised_classification::SupervisedClassification;

use crate::baseline::Classifier;
use crate::dataset::DataSet;
use crate::error::Result;
use crate::measure_accumulator::{MeasureAccumulator, PredictiveAccuracy, ScoreSummary};
use crate::procedures::Procedure;

/// Training and testing accuracy of every split of a cross-validation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossValScores {
    pub train_scores: Vec<f64>,
    pub test_scores: Vec<f64>,
}

impl CrossValScores {
    pub fn n_splits(&self) -> usize {
        self.test_scores.len()
    }

    pub fn train_summary(&self) -> ScoreSummary {
        ScoreSummary::from_scores(&self.train_scores)
    }

    pub fn test_summary(&self) -> ScoreSummary {
        ScoreSummary::from_scores(&self.test_scores)
    }
}

/// Fit a model on the training set of every split and score it on both sets.
///
/// `fit` receives the training samples as `(features, class index)` pairs and returns the
/// trained model. The data set must be labeled.
pub fn cross_validate<P, F, C>(data: &DataSet, procedure: &P, fit: F) -> Result<CrossValScores>
where
    P: Procedure + ?Sized,
    F: Fn(&mut dyn Iterator<Item = (&[f64], usize)>) -> C,
    C: Classifier,
{
    let labels = data.require_labels("cross-validation")?;
    let splits = procedure.splits(data)?;

    let mut scores = CrossValScores::default();

    for split in splits {
        let mut train = split.trainset.iter().map(|&i| (data.row(i), labels[i]));
        let model = fit(&mut train);

        scores
            .train_scores
            .push(accuracy(&model, data, labels, &split.trainset));
        scores
            .test_scores
            .push(accuracy(&model, data, labels, &split.testset));
    }

    info!(
        "Cross-validated {} splits: train accuracy {}, test accuracy {}",
        scores.n_splits(),
        scores.train_summary(),
        scores.test_summary()
    );

    Ok(scores)
}

fn accuracy<C: Classifier>(model: &C, data: &DataSet, labels: &[usize], rows: &[usize]) -> f64 {
    let mut measure = PredictiveAccuracy::new();
    for &i in rows {
        measure.update_one(labels[i], model.predict(data.row(i)));
    }
    measure.result()
}
