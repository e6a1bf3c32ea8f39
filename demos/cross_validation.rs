extern crate crossval;
extern crate log;
extern crate rand;
extern crate rand_chacha;
extern crate simple_logger;

use std::env;
use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crossval::baseline::{LogisticParams, LogisticRegression};
use crossval::prelude::*;
use crossval::{
    cross_validate, procedures::binomial, DataSet, Holdout, KFold, LeaveOneOut, LeavePOut,
    RepeatedKFold, StratifiedKFold,
};

/// Usage: cross_validation [file.arff target_column]
///
/// Without arguments a synthetic data set shaped like the breast cancer data set is used
/// (569 samples, 30 features, 212 positive).
fn main() -> crossval::Result<()> {
    simple_logger::init_with_level(log::Level::Warn).unwrap();

    let args: Vec<String> = env::args().collect();
    let data = match args.len() {
        3 => DataSet::from_arff_file(&args[1], Some(args[2].as_str()))?,
        _ => synthetic(569, 212, 30, 0)?,
    };

    println!("samples: {}, features: {}", data.n_samples(), data.n_features());
    if let (Some(classes), Some(counts)) = (data.classes(), data.class_counts()) {
        for (c, n) in classes.iter().zip(counts) {
            println!("  class {}: {:.3}", c, n as f64 / data.n_samples() as f64);
        }
    }

    // hold out 30% for final testing, cross-validate on the rest
    let split = Holdout::new(0.3).with_seed(0).split(&data)?;
    let train = data.subset(&split.trainset)?;
    println!("train: {}, test: {}", split.trainset.len(), split.testset.len());

    let logit = |c| LogisticParams {
        c,
        max_iter: 10_000,
        ..LogisticParams::default()
    };

    println!("\nK-Fold");
    let params = logit(10.0);
    let scores = cross_validate(&train, &KFold::new(5).with_shuffle(Some(4)), |rows| {
        LogisticRegression::fit(&params, rows)
    })?;
    println!("test scores: {:?}", scores.test_scores);
    report(&scores);

    println!("\nRepeated K-Fold");
    let params = logit(1.0);
    println!("expected: {} scores", 5 * 10);
    let scores = cross_validate(&train, &RepeatedKFold::new(5, 10).with_seed(4), |rows| {
        LogisticRegression::fit(&params, rows)
    })?;
    report(&scores);

    println!("\nLeave One Out");
    println!("expected: {} scores", train.n_samples());
    let scores = cross_validate(&train, &LeaveOneOut, |rows| {
        LogisticRegression::fit(&params, rows)
    })?;
    report(&scores);

    // leave-p-out grows combinatorially, so work on a smaller sample
    println!("\nLeave P Out");
    let small = train.head(100)?;
    println!(
        "expected: {} scores",
        binomial(small.n_samples(), 2).unwrap_or(0)
    );
    let scores = cross_validate(&small, &LeavePOut::new(2), |rows| {
        LogisticRegression::fit(&params, rows)
    })?;
    report(&scores);

    println!("\nStratified K-Fold");
    let skf = StratifiedKFold::new(5).with_shuffle(Some(4));
    println!("expected: {} scores", skf.n_splits(&train)?);
    let scores = cross_validate(&train, &skf, |rows| LogisticRegression::fit(&params, rows))?;
    report(&scores);

    Ok(())
}

fn report(scores: &crossval::CrossValScores) {
    println!("obtained: {} scores", scores.n_splits());
    println!("mean train set accuracy: {}", scores.train_summary());
    println!("mean test set accuracy: {}", scores.test_summary());
}

/// Two gaussian classes; the positive class is shifted in the first third of the features.
fn synthetic(n: usize, n_pos: usize, n_features: usize, seed: u64) -> crossval::Result<DataSet> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);

    for i in 0..n {
        let positive = i < n_pos;
        let row: Vec<f64> = (0..n_features)
            .map(|j| {
                let shift = if positive && j < n_features / 3 { 1.5 } else { 0.0 };
                shift + normal(&mut rng)
            })
            .collect();
        rows.push(row);
        labels.push(if positive { 1 } else { 0 });
    }

    DataSet::from_rows(rows)?.with_labels(labels)
}

/// standard normal sample (Box-Muller)
fn normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
