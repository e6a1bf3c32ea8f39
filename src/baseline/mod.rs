//! Implementation of simple baseline classifiers, used for testing and demonstration.

mod logistic_regression;
mod naive_bayes_classifier;

pub use self::logistic_regression::{LogisticParams, LogisticRegression};
pub use self::naive_bayes_classifier::NaiveBayesClassifier;

/// A trained model that assigns a class index to a feature vector.
pub trait Classifier {
    fn predict(&self, x: &[f64]) -> usize;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, x: &[f64]) -> usize {
        (**self).predict(x)
    }
}
