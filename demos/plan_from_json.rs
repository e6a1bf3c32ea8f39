extern crate crossval;
extern crate log;
extern crate simple_logger;

use std::env;

use crossval::prelude::*;
use crossval::{generate_splits, DataSet, SplitPlan};

/// Usage: plan_from_json [plan.json [n_samples]]
///
/// Prints the train/test sizes of every split a plan produces.
fn main() -> crossval::Result<()> {
    simple_logger::init_with_level(log::Level::Debug).unwrap();

    let args: Vec<String> = env::args().collect();

    let plan = match args.get(1) {
        Some(path) => SplitPlan::from_json_file(path)?,
        None => SplitPlan::from_json_str(
            r#"{"strategy": "repeated_k_fold", "n_splits": 5, "n_repeats": 2, "seed": 4}"#,
        )?,
    };
    let n: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    // every other sample is positive so that stratified plans work too
    let data = DataSet::new((0..n).map(|i| i as f64).collect(), 1)?
        .with_labels((0..n).map(|i| i % 2))?;

    println!("{} -> {} splits", plan.to_json_string()?, plan.n_splits(&data)?);
    for (i, split) in generate_splits(&data, &plan)?.enumerate() {
        println!(
            "split {:3}: train {:4}  test {:4}  {:?}",
            i,
            split.trainset.len(),
            split.testset.len(),
            split.testset
        );
    }

    Ok(())
}
