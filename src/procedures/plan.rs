//! Split plans: a serializable choice of validation procedure.

use std::fs;
use std::path::Path;

use crate::dataset::DataSet;
use crate::error::Result;

use super::{
    Holdout, KFold, LeaveOneOut, LeavePOut, Procedure, RepeatedKFold, Splits, StratifiedKFold,
};

/// Selects a splitting strategy together with its parameters.
///
/// In JSON the strategy is given by the `strategy` field:
/// ```
/// # use crossval::SplitPlan;
/// let plan = SplitPlan::from_json_str(
///     r#"{"strategy": "k_fold", "n_splits": 5, "shuffle": true, "seed": 4}"#,
/// ).unwrap();
/// assert_eq!(plan.name(), "k-fold");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SplitPlan {
    KFold(KFold),
    RepeatedKFold(RepeatedKFold),
    LeaveOneOut,
    LeavePOut(LeavePOut),
    StratifiedKFold(StratifiedKFold),
    Holdout(Holdout),
}

impl SplitPlan {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading split plan {}", path.as_ref().display());
        SplitPlan::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// human readable name of the strategy
    pub fn name(&self) -> &'static str {
        match *self {
            SplitPlan::KFold(_) => "k-fold",
            SplitPlan::RepeatedKFold(_) => "repeated k-fold",
            SplitPlan::LeaveOneOut => "leave-one-out",
            SplitPlan::LeavePOut(_) => "leave-p-out",
            SplitPlan::StratifiedKFold(_) => "stratified k-fold",
            SplitPlan::Holdout(_) => "holdout",
        }
    }

    fn procedure(&self) -> &dyn Procedure {
        match self {
            SplitPlan::KFold(p) => p,
            SplitPlan::RepeatedKFold(p) => p,
            SplitPlan::LeaveOneOut => &LeaveOneOut,
            SplitPlan::LeavePOut(p) => p,
            SplitPlan::StratifiedKFold(p) => p,
            SplitPlan::Holdout(p) => p,
        }
    }
}

impl Procedure for SplitPlan {
    fn n_splits(&self, data: &DataSet) -> Result<usize> {
        self.procedure().n_splits(data)
    }

    fn splits<'a>(&'a self, data: &'a DataSet) -> Result<Splits<'a>> {
        self.procedure().splits(data)
    }
}

impl From<KFold> for SplitPlan {
    fn from(p: KFold) -> Self {
        SplitPlan::KFold(p)
    }
}

impl From<RepeatedKFold> for SplitPlan {
    fn from(p: RepeatedKFold) -> Self {
        SplitPlan::RepeatedKFold(p)
    }
}

impl From<LeaveOneOut> for SplitPlan {
    fn from(_: LeaveOneOut) -> Self {
        SplitPlan::LeaveOneOut
    }
}

impl From<LeavePOut> for SplitPlan {
    fn from(p: LeavePOut) -> Self {
        SplitPlan::LeavePOut(p)
    }
}

impl From<StratifiedKFold> for SplitPlan {
    fn from(p: StratifiedKFold) -> Self {
        SplitPlan::StratifiedKFold(p)
    }
}

impl From<Holdout> for SplitPlan {
    fn from(p: Holdout) -> Self {
        SplitPlan::Holdout(p)
    }
}

/// Lazily generate the splits `plan` prescribes for `data`.
///
/// Fails before producing anything if the plan does not fit the data. Calling this again
/// restarts the sequence; the same sequence comes out if the plan does not shuffle or has a
/// fixed seed.
pub fn generate_splits<'a>(data: &'a DataSet, plan: &'a SplitPlan) -> Result<Splits<'a>> {
    plan.splits(data)
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::error::Error;

    #[test]
    fn parse_all_strategies() {
        let plans = [
            (r#"{"strategy":"k_fold","n_splits":5,"shuffle":true,"seed":4}"#, 5),
            (r#"{"strategy":"k_fold","n_splits":3}"#, 3),
            (r#"{"strategy":"repeated_k_fold","n_splits":5,"n_repeats":10,"seed":4}"#, 50),
            (r#"{"strategy":"leave_one_out"}"#, 12),
            (r#"{"strategy":"leave_p_out","p":2}"#, 66),
            (r#"{"strategy":"stratified_k_fold","n_splits":3,"shuffle":true,"seed":4}"#, 3),
            (r#"{"strategy":"holdout","test_fraction":0.3,"seed":0}"#, 1),
        ];

        let data = two_class(12, 4);
        for &(json, n) in &plans {
            let plan = SplitPlan::from_json_str(json).unwrap();
            assert_eq!(plan.n_splits(&data).unwrap(), n, "{}", json);
            assert_eq!(generate_splits(&data, &plan).unwrap().count(), n, "{}", json);
        }
    }

    #[test]
    fn defaults_do_not_shuffle() {
        let plan = SplitPlan::from_json_str(r#"{"strategy":"k_fold","n_splits":2}"#).unwrap();
        assert_eq!(plan, SplitPlan::KFold(KFold::new(2)));
    }

    #[test]
    fn json_round_trip() {
        let plan: SplitPlan = RepeatedKFold::new(5, 2).with_seed(9).into();
        let json = plan.to_json_string().unwrap();
        assert_eq!(SplitPlan::from_json_str(&json).unwrap(), plan);
    }

    #[test]
    fn unknown_strategy_is_a_json_error() {
        match SplitPlan::from_json_str(r#"{"strategy":"bootstrap"}"#) {
            Err(Error::JsonError(_)) => {}
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn invalid_plan_fails_before_splitting() {
        let plan: SplitPlan = KFold::new(20).into();
        assert!(generate_splits(&samples(10), &plan).is_err());
    }

    #[test]
    fn seeded_plans_restart_identically() {
        let data = two_class(40, 10);
        let plan: SplitPlan = StratifiedKFold::new(5).with_shuffle(Some(4)).into();
        let a: Vec<_> = generate_splits(&data, &plan).unwrap().collect();
        let b: Vec<_> = generate_splits(&data, &plan).unwrap().collect();
        assert_eq!(a, b);
    }
}
