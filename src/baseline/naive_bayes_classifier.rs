use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::f64;
use std::fmt;
use std::iter::FromIterator;

use super::Classifier;

/// Gaussian Naive Bayes over class indices.
///
/// Trained by collecting `(features, class)` pairs.
#[derive(Debug)]
pub struct NaiveBayesClassifier {
    class_distributions: BTreeMap<usize, FeatureDistribution>,
}

#[derive(Debug, Clone)]
struct FeatureDistribution {
    distributions: Vec<UniformNormalDistribution>,
}

#[derive(Copy, Clone)]
struct UniformNormalDistribution {
    sum: f64,
    sqsum: f64,
    n: usize,
}

/// keeps constant features from producing zero variance
const MIN_VARIANCE: f64 = 1e-9;

impl<'a, J> FromIterator<(J, usize)> for NaiveBayesClassifier
where
    J: IntoIterator<Item = &'a f64>,
{
    fn from_iter<I: IntoIterator<Item = (J, usize)>>(iter: I) -> Self {
        let mut class_distributions = BTreeMap::new();

        for (x, y) in iter {
            let distributions = &mut class_distributions
                .entry(y)
                .or_insert_with(FeatureDistribution::new)
                .distributions;

            for (i, &xi) in x.into_iter().enumerate() {
                if i >= distributions.len() {
                    distributions.resize(1 + i, UniformNormalDistribution::new());
                }

                distributions[i].update(xi);
            }
        }

        NaiveBayesClassifier {
            class_distributions,
        }
    }
}

impl Classifier for NaiveBayesClassifier {
    /// most likely class; class 0 if the model saw no training data
    fn predict(&self, x: &[f64]) -> usize {
        self.class_distributions
            .iter()
            .map(|(&c, dists)| {
                let lnprob: f64 = x
                    .iter()
                    .zip(dists.distributions.iter())
                    .map(|(&xi, dist)| dist.lnprob(xi))
                    .sum();
                (c, lnprob)
            })
            .max_by(|(_, lnp1), (_, lnp2)| lnp1.partial_cmp(lnp2).unwrap_or(Ordering::Equal))
            .map(|(c, _)| c)
            .unwrap_or(0)
    }
}

impl FeatureDistribution {
    fn new() -> Self {
        FeatureDistribution {
            distributions: Vec::new(),
        }
    }
}

impl UniformNormalDistribution {
    fn new() -> Self {
        UniformNormalDistribution {
            sum: 0.0,
            sqsum: 0.0,
            n: 0,
        }
    }

    fn update(&mut self, x: f64) {
        self.sum += x;
        self.sqsum += x * x;
        self.n += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }

    fn variance(&self) -> f64 {
        let n = self.n as f64;
        let v = (self.sqsum - (self.sum * self.sum) / n) / (n - 1.0).max(1.0);
        v.max(MIN_VARIANCE)
    }

    fn lnprob(&self, x: f64) -> f64 {
        let v = self.variance();
        let xm = x - self.mean();

        0.5 * ((1.0 / (2.0 * f64::consts::PI * v)).ln() - (xm * xm) / v)
    }
}

impl fmt::Debug for UniformNormalDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{{{}; {}}}", self.mean(), self.variance())
    }
}

#[test]
fn nbc() {
    let data = vec![
        (vec![1.0, 2.0], 0),
        (vec![2.0, 1.0], 0),
        (vec![1.0, 5.0], 1),
        (vec![2.0, 6.0], 1),
    ];

    let nbc: NaiveBayesClassifier = data.iter().map(|(x, y)| (x, *y)).collect();

    assert_eq!(nbc.predict(&[1.5, 1.5]), 0);
    assert_eq!(nbc.predict(&[5.5, 1.5]), 0);
    assert_eq!(nbc.predict(&[1.5, 5.5]), 1);
    assert_eq!(nbc.predict(&[5.5, 5.5]), 1);
}

#[test]
fn nbc_single_sample_classes() {
    let data = vec![(vec![0.0], 3), (vec![10.0], 7)];
    let nbc: NaiveBayesClassifier = data.iter().map(|(x, y)| (x, *y)).collect();

    assert_eq!(nbc.predict(&[0.1]), 3);
    assert_eq!(nbc.predict(&[9.0]), 7);
}

#[test]
fn nbc_untrained() {
    let nbc: NaiveBayesClassifier = Vec::<(Vec<f64>, usize)>::new()
        .iter()
        .map(|(x, y)| (x, *y))
        .collect();
    assert_eq!(nbc.predict(&[1.0]), 0);
}
