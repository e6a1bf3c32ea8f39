//! In-memory tabular data sets with optional class labels.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use arff::dynamic::de::from_dataset;
use arff::dynamic::{DataSet as ArffDataSet, Value};

use crate::error::{Error, Result};

/// A table of `f64` features, stored row-major, with an optional class label per row.
///
/// A data set always holds at least one sample and every sample has the same number of
/// features.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    features: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
    labels: Option<Labels>,
}

/// Class labels, stored as indices into the sorted list of class names.
#[derive(Debug, Clone, PartialEq)]
struct Labels {
    classes: Vec<String>,
    index: Vec<usize>,
}

/// class name of one target value; integral numbers are printed without a fraction
fn class_name(value: Value) -> Result<String> {
    match value {
        Value::String(_) | Value::Nominal(..) => Ok(value.as_string()?),
        Value::Missing => Err(Error::data("missing class label")),
        _ => {
            let x = value.as_f64()?;
            if x.fract() == 0.0 {
                Ok(format!("{}", x as i64))
            } else {
                Ok(format!("{}", x))
            }
        }
    }
}

impl DataSet {
    /// create an unlabeled data set from a flat row-major feature buffer
    pub fn new(features: Vec<f64>, n_cols: usize) -> Result<Self> {
        if n_cols == 0 {
            return Err(Error::data("a data set needs at least one feature column"));
        }
        if features.is_empty() {
            return Err(Error::data("a data set needs at least one sample"));
        }
        if features.len() % n_cols != 0 {
            return Err(Error::data(format!(
                "{} feature values do not fill rows of {} columns",
                features.len(),
                n_cols
            )));
        }

        Ok(DataSet {
            n_rows: features.len() / n_cols,
            features,
            n_cols,
            labels: None,
        })
    }

    /// create an unlabeled data set from individual feature vectors
    pub fn from_rows<R>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<[f64]>,
    {
        let mut features = Vec::new();
        let mut n_cols = None;

        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match n_cols {
                None => n_cols = Some(row.len()),
                Some(n) if n != row.len() => {
                    return Err(Error::data(format!(
                        "row {} has {} features, expected {}",
                        i,
                        row.len(),
                        n
                    )))
                }
                Some(_) => {}
            }
            features.extend_from_slice(row);
        }

        match n_cols {
            None => Err(Error::data("a data set needs at least one sample")),
            Some(n) => DataSet::new(features, n),
        }
    }

    /// attach one class label per sample
    pub fn with_labels<I>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let names: Vec<String> = labels.into_iter().map(|l| l.to_string()).collect();

        if names.len() != self.n_rows {
            return Err(Error::data(format!(
                "got {} labels for {} samples",
                names.len(),
                self.n_rows
            )));
        }

        let classes: Vec<String> = names
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index = names
            .iter()
            .map(|name| classes.binary_search(name).unwrap_or_default())
            .collect();

        self.labels = Some(Labels { classes, index });
        Ok(self)
    }

    /// parse a data set from ARFF text. If `target` names a column, it is removed from the
    /// features and used as class label.
    pub fn from_arff_str(input: &str, target: Option<&str>) -> Result<Self> {
        let arff = ArffDataSet::from_str(input)?;

        match target {
            None => {
                let n_cols = arff.n_cols();
                let features: Vec<f64> = from_dataset(&arff)?;
                DataSet::new(features, n_cols)
            }
            Some(col) => {
                if !arff.col_names().any(|c| c == col) {
                    return Err(Error::data(format!("no column named {}", col)));
                }
                if arff.n_cols() < 2 {
                    return Err(Error::data(format!(
                        "no feature columns besides the target {}",
                        col
                    )));
                }

                let (dx, dy) = arff.split_one(col);
                let features: Vec<f64> = from_dataset(&dx)?;

                let target = dy.col(0);
                let names = (0..dy.n_rows())
                    .map(|i| class_name(target.item(i)))
                    .collect::<Result<Vec<_>>>()?;

                DataSet::new(features, dx.n_cols())?.with_labels(names)
            }
        }
    }

    /// load a data set from an ARFF file
    pub fn from_arff_file<P: AsRef<Path>>(path: P, target: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading data set {}", path.display());
        let text = fs::read_to_string(path)?;
        let data = DataSet::from_arff_str(&text, target)?;
        debug!(
            "Loaded {} samples with {} features from {}",
            data.n_samples(),
            data.n_features(),
            path.display()
        );
        Ok(data)
    }

    pub fn n_samples(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.n_cols
    }

    /// feature vector of sample `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.features[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows<'a>(&'a self) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.features.chunks(self.n_cols)
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// class index of sample `i`, if the data set is labeled
    pub fn label(&self, i: usize) -> Option<usize> {
        self.labels.as_ref().map(|l| l.index[i])
    }

    /// class index of every sample
    pub fn labels(&self) -> Option<&[usize]> {
        self.labels.as_ref().map(|l| &l.index[..])
    }

    /// class names, sorted; a class index refers into this list
    pub fn classes(&self) -> Option<&[String]> {
        self.labels.as_ref().map(|l| &l.classes[..])
    }

    pub fn n_classes(&self) -> usize {
        self.labels.as_ref().map_or(0, |l| l.classes.len())
    }

    /// number of samples in each class
    pub fn class_counts(&self) -> Option<Vec<usize>> {
        self.labels.as_ref().map(|l| {
            let mut counts = vec![0; l.classes.len()];
            for &c in &l.index {
                counts[c] += 1;
            }
            counts
        })
    }

    /// the labels, or a `DataError` naming the operation that needs them
    pub(crate) fn require_labels(&self, purpose: &str) -> Result<&[usize]> {
        self.labels()
            .ok_or_else(|| Error::data(format!("{} requires class labels", purpose)))
    }

    /// new data set made of the given samples, in the given order
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&i) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(Error::data(format!(
                "sample index {} out of range for {} samples",
                i, self.n_rows
            )));
        }

        let mut features = Vec::with_capacity(indices.len() * self.n_cols);
        for &i in indices {
            features.extend_from_slice(self.row(i));
        }

        let mut data = DataSet::new(features, self.n_cols)?;
        data.labels = self.labels.as_ref().map(|l| Labels {
            classes: l.classes.clone(),
            index: indices.iter().map(|&i| l.index[i]).collect(),
        });
        Ok(data)
    }

    /// the first `n` samples
    pub fn head(&self, n: usize) -> Result<Self> {
        let indices: Vec<usize> = (0..n.min(self.n_rows)).collect();
        self.subset(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> DataSet {
        DataSet::from_rows(vec![
            vec![0.0, 1.0],
            vec![2.0, 3.0],
            vec![4.0, 5.0],
            vec![6.0, 7.0],
        ])
        .unwrap()
    }

    #[test]
    fn rows_have_equal_length() {
        let err = DataSet::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        match err {
            Error::DataError(_) => {}
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(DataSet::from_rows(Vec::<Vec<f64>>::new()).is_err());
        assert!(DataSet::new(vec![], 3).is_err());
        assert!(DataSet::new(vec![1.0, 2.0, 3.0], 2).is_err());
    }

    #[test]
    fn shape_and_rows() {
        let data = grid();
        assert_eq!(data.n_samples(), 4);
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.row(2), &[4.0, 5.0]);
        assert_eq!(data.rows().count(), 4);
    }

    #[test]
    fn labels_are_indexed_by_sorted_class_name() {
        let data = grid().with_labels(vec!["b", "a", "b", "c"]).unwrap();
        assert_eq!(data.classes().unwrap(), &["a", "b", "c"]);
        assert_eq!(data.labels().unwrap(), &[1, 0, 1, 2]);
        assert_eq!(data.class_counts().unwrap(), vec![1, 2, 1]);
        assert_eq!(data.n_classes(), 3);
    }

    #[test]
    fn label_count_must_match() {
        assert!(grid().with_labels(vec![0, 1]).is_err());
    }

    #[test]
    fn unlabeled_data_reports_purpose() {
        let err = grid().require_labels("stratification").unwrap_err();
        assert_eq!(err.to_string(), "invalid data: stratification requires class labels");
    }

    #[test]
    fn subset_keeps_labels_and_order() {
        let data = grid().with_labels(vec![0, 1, 0, 1]).unwrap();
        let sub = data.subset(&[3, 0]).unwrap();
        assert_eq!(sub.n_samples(), 2);
        assert_eq!(sub.row(0), &[6.0, 7.0]);
        assert_eq!(sub.labels().unwrap(), &[1, 0]);
        assert_eq!(sub.classes(), data.classes());

        assert!(data.subset(&[4]).is_err());
    }

    const IRIS_LIKE: &str = "@RELATION flowers
@ATTRIBUTE width NUMERIC
@ATTRIBUTE species {setosa,virginica}
@ATTRIBUTE score NUMERIC
@DATA
1.5,virginica,0.5
0.2,setosa,2
1.8,virginica,1
";

    #[test]
    fn nominal_target_gives_category_names() {
        let data = DataSet::from_arff_str(IRIS_LIKE, Some("species")).unwrap();
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.row(0), &[1.5, 0.5]);
        assert_eq!(data.classes().unwrap(), &["setosa", "virginica"]);
        assert_eq!(data.labels().unwrap(), &[1, 0, 1]);
    }

    #[test]
    fn numeric_target_prints_integers_without_fraction() {
        let data = DataSet::from_arff_str(
            "@RELATION r\n@ATTRIBUTE x NUMERIC\n@ATTRIBUTE y NUMERIC\n@DATA\n1,0.5\n2,2\n3,2.0\n",
            Some("y"),
        )
        .unwrap();
        assert_eq!(data.classes().unwrap(), &["0.5", "2"]);
        assert_eq!(data.labels().unwrap(), &[0, 1, 1]);
    }

    #[test]
    fn unknown_target_column() {
        match DataSet::from_arff_str(IRIS_LIKE, Some("petal")) {
            Err(Error::DataError(msg)) => assert_eq!(msg, "no column named petal"),
            Err(e) => panic!("unexpected error {:?}", e),
            Ok(_) => panic!("loaded a data set without its target column"),
        }
    }

    #[test]
    fn head_truncates() {
        let data = grid();
        assert_eq!(data.head(2).unwrap().n_samples(), 2);
        assert_eq!(data.head(10).unwrap().n_samples(), 4);
    }
}
