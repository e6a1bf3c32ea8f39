//! L2-regularized logistic regression

use std::iter::FromIterator;

use super::Classifier;

/// Training parameters of `LogisticRegression`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticParams {
    /// inverse regularization strength; smaller values mean stronger regularization
    pub c: f64,
    /// maximum number of Newton iterations per binary model
    pub max_iter: usize,
    /// stop once no parameter changes by more than this
    pub tol: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        LogisticParams {
            c: 1.0,
            max_iter: 10_000,
            tol: 1e-4,
        }
    }
}

/// Logistic regression classifier
///
/// Minimizes the logistic loss plus `|w|^2 / (2c)` with Newton's method on standardized
/// features. Two classes are separated by a single model; with more classes one model per class
/// is trained against all others and the most confident one wins.
///
/// ```
/// # use crossval::baseline::{Classifier, LogisticParams, LogisticRegression};
/// let data: Vec<(Vec<f64>, usize)> = vec![(vec![0.0], 0), (vec![1.0], 0), (vec![3.0], 1), (vec![4.0], 1)];
/// let model = LogisticRegression::fit(
///     &LogisticParams::default(),
///     data.iter().map(|(x, y)| (&x[..], *y)),
/// );
/// assert_eq!(model.predict(&[0.5]), 0);
/// assert_eq!(model.predict(&[3.5]), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    scaler: Standardizer,
    classes: Vec<usize>,
    models: Vec<BinaryModel>,
}

/// Per-feature mean and standard deviation of the training data
#[derive(Debug, Clone)]
struct Standardizer {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Weights of one binary problem, in standardized feature space
#[derive(Debug, Clone)]
struct BinaryModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    pub fn fit<'a, I>(params: &LogisticParams, rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a [f64], usize)>,
    {
        let (x, y): (Vec<&[f64]>, Vec<usize>) = rows.into_iter().unzip();

        let scaler = Standardizer::fit(&x);
        let z: Vec<Vec<f64>> = x.iter().map(|xi| scaler.transform(xi)).collect();

        let mut classes = y.clone();
        classes.sort_unstable();
        classes.dedup();

        let models = match classes.len() {
            0 | 1 => vec![],
            2 => vec![BinaryModel::fit(&z, &targets(&y, classes[1]), params)],
            _ => classes
                .iter()
                .map(|&c| BinaryModel::fit(&z, &targets(&y, c), params))
                .collect(),
        };

        LogisticRegression {
            scaler,
            classes,
            models,
        }
    }

    /// classes seen during training, in ascending order
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// probability that `x` belongs to the larger of two classes
    pub fn predict_proba(&self, x: &[f64]) -> Option<f64> {
        match self.models.len() {
            1 => Some(sigmoid(self.models[0].decision(&self.scaler.transform(x)))),
            _ => None,
        }
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, x: &[f64]) -> usize {
        let z = self.scaler.transform(x);
        match self.models.len() {
            0 => self.classes.first().copied().unwrap_or(0),
            1 => {
                if self.models[0].decision(&z) > 0.0 {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            }
            _ => {
                let mut best = (f64::NEG_INFINITY, self.classes[0]);
                for (model, &c) in self.models.iter().zip(&self.classes) {
                    let d = model.decision(&z);
                    if d > best.0 {
                        best = (d, c);
                    }
                }
                best.1
            }
        }
    }
}

impl<'a> FromIterator<(&'a [f64], usize)> for LogisticRegression {
    fn from_iter<I: IntoIterator<Item = (&'a [f64], usize)>>(iter: I) -> Self {
        LogisticRegression::fit(&LogisticParams::default(), iter)
    }
}

fn targets(y: &[usize], positive: usize) -> Vec<f64> {
    y.iter()
        .map(|&c| if c == positive { 1.0 } else { 0.0 })
        .collect()
}

fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

impl Standardizer {
    fn fit(x: &[&[f64]]) -> Self {
        let d = x.first().map_or(0, |xi| xi.len());
        let n = x.len() as f64;

        let mut mean = vec![0.0; d];
        for xi in x {
            for (m, v) in mean.iter_mut().zip(xi.iter()) {
                *m += v / n;
            }
        }

        let mut scale = vec![0.0; d];
        for xi in x {
            for ((s, m), v) in scale.iter_mut().zip(&mean).zip(xi.iter()) {
                *s += (v - m) * (v - m) / n;
            }
        }
        for s in &mut scale {
            *s = if *s > 0.0 { s.sqrt() } else { 1.0 };
        }

        Standardizer { mean, scale }
    }

    fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| (v - m) / s)
            .collect()
    }
}

impl BinaryModel {
    fn decision(&self, z: &[f64]) -> f64 {
        self.bias + self.weights.iter().zip(z).map(|(w, v)| w * v).sum::<f64>()
    }

    /// Newton's method on the penalized negative log-likelihood. The intercept is the last
    /// parameter and is not penalized.
    fn fit(z: &[Vec<f64>], y: &[f64], params: &LogisticParams) -> Self {
        let d = z.first().map_or(0, Vec::len);
        let mut theta = vec![0.0; d + 1];
        let penalty = 1.0 / params.c;

        let mut converged = false;
        for _ in 0..params.max_iter {
            let mut grad = vec![0.0; d + 1];
            let mut hess = vec![vec![0.0; d + 1]; d + 1];

            for (zi, &yi) in z.iter().zip(y) {
                let t = theta[d] + theta[..d].iter().zip(zi).map(|(w, v)| w * v).sum::<f64>();
                let p = sigmoid(t);
                let w = p * (1.0 - p);

                for j in 0..=d {
                    let aj = if j < d { zi[j] } else { 1.0 };
                    grad[j] += (p - yi) * aj;
                    for k in 0..=j {
                        let ak = if k < d { zi[k] } else { 1.0 };
                        hess[j][k] += w * aj * ak;
                    }
                }
            }

            for j in 0..d {
                grad[j] += penalty * theta[j];
                hess[j][j] += penalty;
            }
            hess[d][d] += 1e-10;
            for j in 0..=d {
                for k in j + 1..=d {
                    hess[j][k] = hess[k][j];
                }
            }

            let step = match solve(hess, grad.clone()) {
                Some(step) => step,
                None => break,
            };

            // backtrack until the objective decreases sufficiently
            let current = objective(z, y, &theta, penalty);
            let slope: f64 = grad.iter().zip(&step).map(|(g, s)| g * s).sum();
            let mut alpha = 1.0;
            let mut candidate: Vec<f64>;
            loop {
                candidate = theta.iter().zip(&step).map(|(t, s)| t - alpha * s).collect();
                if objective(z, y, &candidate, penalty) <= current - 1e-4 * alpha * slope
                    || alpha < 1e-10
                {
                    break;
                }
                alpha *= 0.5;
            }

            let largest = step.iter().fold(0.0f64, |m, s| m.max((alpha * s).abs()));
            theta = candidate;

            if largest < params.tol {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "logistic regression did not converge within {} iterations",
                params.max_iter
            );
        }

        let bias = theta[d];
        theta.truncate(d);
        BinaryModel {
            weights: theta,
            bias,
        }
    }
}

/// Penalized negative log-likelihood; the last entry of `theta` is the intercept
fn objective(z: &[Vec<f64>], y: &[f64], theta: &[f64], penalty: f64) -> f64 {
    let d = theta.len() - 1;
    let loss: f64 = z
        .iter()
        .zip(y)
        .map(|(zi, &yi)| {
            let t = theta[d] + theta[..d].iter().zip(zi).map(|(w, v)| w * v).sum::<f64>();
            // log(1 + e^t) - y t, computed without overflow
            t.max(0.0) + (-t.abs()).exp().ln_1p() - yi * t
        })
        .sum();
    let norm: f64 = theta[..d].iter().map(|w| w * w).sum();
    loss + 0.5 * penalty * norm
}

/// Solve `a x = b` by Gaussian elimination with partial pivoting. `None` if `a` is singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-300 || !a[pivot][col].is_finite() {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(data: &[(Vec<f64>, usize)], c: f64) -> LogisticRegression {
        let params = LogisticParams {
            c,
            ..LogisticParams::default()
        };
        LogisticRegression::fit(&params, data.iter().map(|(x, y)| (&x[..], *y)))
    }

    #[test]
    fn solves_linear_system() {
        let x = solve(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![3.0, 5.0]).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);

        assert!(solve(vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![1.0, 2.0]).is_none());
    }

    #[test]
    fn separates_two_classes() {
        let data = vec![
            (vec![1.0, 10.0], 0),
            (vec![2.0, 12.0], 0),
            (vec![1.5, 11.0], 0),
            (vec![6.0, 30.0], 1),
            (vec![7.0, 29.0], 1),
            (vec![6.5, 31.0], 1),
        ];
        let model = fit(&data, 10.0);

        assert_eq!(model.classes(), &[0, 1]);
        for (x, y) in &data {
            assert_eq!(model.predict(x), *y);
        }
        assert!(model.predict_proba(&[7.0, 30.0]).unwrap() > 0.5);
        assert!(model.predict_proba(&[1.0, 10.0]).unwrap() < 0.5);
    }

    #[test]
    fn one_vs_rest_for_three_classes() {
        let mut data = vec![];
        for i in 0..5 {
            let e = i as f64 * 0.1;
            data.push((vec![0.0 + e, 0.0], 0));
            data.push((vec![10.0 + e, 0.0], 1));
            data.push((vec![5.0 + e, 10.0], 2));
        }
        let model = fit(&data, 1.0);

        assert!(model.predict_proba(&[0.0, 0.0]).is_none());
        assert_eq!(model.predict(&[0.2, 0.1]), 0);
        assert_eq!(model.predict(&[10.2, 0.1]), 1);
        assert_eq!(model.predict(&[5.2, 9.9]), 2);
    }

    #[test]
    fn single_class_predicts_it() {
        let data = vec![(vec![1.0], 4), (vec![2.0], 4)];
        let model = fit(&data, 1.0);
        assert_eq!(model.predict(&[100.0]), 4);
    }

    #[test]
    fn constant_features_are_harmless() {
        let data = vec![
            (vec![1.0, 0.0], 0),
            (vec![1.0, 1.0], 0),
            (vec![1.0, 5.0], 1),
            (vec![1.0, 6.0], 1),
        ];
        let model = fit(&data, 1.0);
        assert_eq!(model.predict(&[1.0, 0.5]), 0);
        assert_eq!(model.predict(&[1.0, 5.5]), 1);
    }
}
