//! Measure accumulators are summaries of model performance, such as classification accuracy.
//! `ScoreSummary` aggregates the per-split results of a cross-validation run.

use std::fmt;

/// Trait implemented by performance measures over class predictions
pub trait MeasureAccumulator {
    /// initialize new measure
    fn new() -> Self;

    /// update with one prediction
    fn update_one(&mut self, known: usize, pred: usize);

    /// get resulting performance
    fn result(&self) -> f64;

    /// update with multiple predictions
    fn update<I, J>(&mut self, known: I, predicted: J)
    where
        I: IntoIterator<Item = usize>,
        J: IntoIterator<Item = usize>,
    {
        for (k, p) in known.into_iter().zip(predicted) {
            self.update_one(k, p)
        }
    }
}

/// Classification Accuracy: relative amount of correctly classified labels.
///
/// The accuracy of zero predictions is NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictiveAccuracy {
    n_correct: usize,
    n_wrong: usize,
}

impl PredictiveAccuracy {
    /// number of predictions seen
    pub fn count(&self) -> usize {
        self.n_correct + self.n_wrong
    }
}

impl MeasureAccumulator for PredictiveAccuracy {
    fn new() -> Self {
        PredictiveAccuracy {
            n_correct: 0,
            n_wrong: 0,
        }
    }

    fn update_one(&mut self, known: usize, pred: usize) {
        if known == pred {
            self.n_correct += 1;
        } else {
            self.n_wrong += 1;
        }
    }

    fn result(&self) -> f64 {
        self.n_correct as f64 / self.count() as f64
    }
}

/// Mean and (population) standard deviation of a series of scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub mean: f64,
    pub std: f64,
}

impl ScoreSummary {
    /// summarize `scores`; both fields are NaN if there are none
    pub fn from_scores(scores: &[f64]) -> Self {
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let var = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        ScoreSummary {
            mean,
            std: var.sqrt(),
        }
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} +- {:.4}", self.mean, self.std)
    }
}

#[test]
fn accuracy() {
    let mut acc = PredictiveAccuracy::new();
    acc.update(vec![0, 1, 1, 0], vec![0, 1, 0, 0]);
    assert_eq!(acc.count(), 4);
    assert_eq!(acc.result(), 0.75);

    assert!(PredictiveAccuracy::new().result().is_nan());
}

#[test]
fn summary() {
    let s = ScoreSummary::from_scores(&[1.0, 0.5, 0.75, 0.75]);
    assert_eq!(s.mean, 0.75);
    assert!((s.std - 0.03125f64.sqrt()).abs() < 1e-12);
    assert_eq!(format!("{}", ScoreSummary { mean: 0.5, std: 0.25 }), "0.5000 +- 0.2500");

    let empty = ScoreSummary::from_scores(&[]);
    assert!(empty.mean.is_nan());
}
