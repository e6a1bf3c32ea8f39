extern crate crossval;

use std::collections::HashSet;

use crossval::prelude::*;
use crossval::procedures::binomial;
use crossval::{
    generate_splits, DataSet, Error, FrozenSets, KFold, LeaveOneOut, LeavePOut, RepeatedKFold,
    Split, SplitPlan, StratifiedKFold,
};

fn samples(n: usize) -> DataSet {
    DataSet::new((0..n).map(|i| i as f64).collect(), 1).unwrap()
}

fn labeled(n: usize, n_pos: usize) -> DataSet {
    samples(n)
        .with_labels((0..n).map(|i| if i % 3 == 0 && i / 3 < n_pos { "malignant" } else { "benign" }))
        .unwrap()
}

fn test_coverage(splits: &[Split], n: usize) -> Vec<usize> {
    let mut seen = vec![0; n];
    for s in splits {
        for &i in &s.testset {
            seen[i] += 1;
        }
    }
    seen
}

#[test]
fn k_fold_partitions_for_all_valid_k() {
    for n in 2..25 {
        for k in 2..=n {
            let data = samples(n);
            let splits: Vec<_> = KFold::new(k).splits(&data).unwrap().collect();
            assert_eq!(splits.len(), k);
            assert!(test_coverage(&splits, n).iter().all(|&c| c == 1));
            assert!(splits.iter().all(Split::is_disjoint));
        }
    }
}

#[test]
fn breast_cancer_scenario() {
    let data = samples(569);
    let plan: SplitPlan = KFold::new(5).with_shuffle(Some(4)).into();

    let splits: Vec<_> = generate_splits(&data, &plan).unwrap().collect();
    let mut sizes: Vec<_> = splits.iter().map(|s| s.testset.len()).collect();
    sizes.sort();
    assert_eq!(sizes, vec![113, 114, 114, 114, 114]);

    let again: Vec<_> = generate_splits(&data, &plan).unwrap().collect();
    assert_eq!(splits, again);
}

#[test]
fn leave_one_out_on_the_training_part() {
    let data = samples(398);
    let splits: Vec<_> = LeaveOneOut.splits(&data).unwrap().collect();
    assert_eq!(splits.len(), 398);

    let tests: HashSet<_> = splits.iter().map(|s| s.testset.clone()).collect();
    assert_eq!(tests.len(), 398);
    assert!(splits.iter().all(|s| s.testset.len() == 1 && s.trainset.len() == 397));
}

#[test]
fn leave_p_out_counts() {
    let data = samples(100);
    assert_eq!(LeavePOut::new(2).n_splits(&data).unwrap(), 4950);
    assert_eq!(LeavePOut::new(2).splits(&data).unwrap().count(), 4950);

    let small = samples(9);
    for p in 1..9 {
        let tests: HashSet<_> = LeavePOut::new(p)
            .splits(&small)
            .unwrap()
            .map(|s| s.testset)
            .collect();
        assert_eq!(Some(tests.len()), binomial(9, p));
        assert!(tests.iter().all(|t| t.len() == p));
    }
}

#[test]
fn early_termination_is_cheap() {
    // C(200, 5) splits are never materialized
    let data = samples(200);
    let first: Vec<_> = LeavePOut::new(5).splits(&data).unwrap().take(3).collect();
    assert_eq!(first[0].testset, vec![0, 1, 2, 3, 4]);
    assert_eq!(first[1].testset, vec![0, 1, 2, 3, 5]);
    assert_eq!(first[2].testset, vec![0, 1, 2, 3, 6]);
}

#[test]
fn repeated_k_fold_counts() {
    for &(n, k, r) in &[(10, 2, 1), (50, 5, 10), (33, 3, 4)] {
        let rkf = RepeatedKFold::new(k, r).with_seed(4);
        assert_eq!(rkf.splits(&samples(n)).unwrap().count(), k * r);
    }
}

#[test]
fn stratified_proportions() {
    let data = labeled(300, 70);
    let counts = data.class_counts().unwrap();
    let classes = data.classes().unwrap().to_vec();
    let k = 5;

    let splits: Vec<_> = StratifiedKFold::new(k)
        .with_shuffle(Some(4))
        .splits(&data)
        .unwrap()
        .collect();
    assert!(test_coverage(&splits, 300).iter().all(|&c| c == 1));

    for split in &splits {
        for (c, &total) in counts.iter().enumerate() {
            let in_fold = split
                .testset
                .iter()
                .filter(|&&i| data.label(i) == Some(c))
                .count();
            let diff = (in_fold as f64 / split.testset.len() as f64 - total as f64 / 300.0).abs();
            assert!(diff <= 1.0 / k as f64, "class {} off by {}", classes[c], diff);
        }
    }
}

#[test]
fn configuration_errors_come_before_splits() {
    let data = samples(5);
    let plans = vec![
        SplitPlan::from(KFold::new(1)),
        SplitPlan::from(KFold::new(6)),
        SplitPlan::from(RepeatedKFold::new(2, 0)),
        SplitPlan::from(LeavePOut::new(0)),
        SplitPlan::from(LeavePOut::new(5)),
    ];
    for plan in &plans {
        match generate_splits(&data, plan) {
            Err(Error::ConfigError(_)) => {}
            Err(e) => panic!("{:?}: unexpected error {}", plan, e),
            Ok(_) => panic!("{:?} accepted", plan),
        }
    }

    let stratified = SplitPlan::from(StratifiedKFold::new(2));
    let result = generate_splits(&data, &stratified);
    match result {
        Err(Error::DataError(_)) => {}
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("stratified splits without labels"),
    };
}

#[test]
fn frozen_splits_from_arff() {
    let input = "@relation tiny_splits
@attribute type {TRAIN,TEST}
@attribute rowid numeric
@attribute repeat numeric
@attribute fold numeric
@data
TRAIN,0,0,0
TRAIN,1,0,0
TEST,2,0,0
TEST,0,0,1
TRAIN,2,0,1
TRAIN,1,0,1
TEST,1,1,0
TRAIN,0,1,0
";
    let frozen = FrozenSets::from_arff_str(input).unwrap();
    let data = samples(3);
    assert_eq!(frozen.n_splits(&data).unwrap(), 3);

    let splits: Vec<_> = frozen.splits(&data).unwrap().collect();
    assert_eq!(splits[0].trainset, vec![0, 1]);
    assert_eq!(splits[0].testset, vec![2]);
    assert_eq!(splits[1].trainset, vec![1, 2]);
    assert_eq!(splits[1].testset, vec![0]);
    assert_eq!(splits[2].trainset, vec![0]);
    assert_eq!(splits[2].testset, vec![1]);

    assert!(frozen.splits(&samples(2)).is_err());
}
