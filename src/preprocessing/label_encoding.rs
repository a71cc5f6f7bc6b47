use crate::{Error, Result};
use ndarray::Array2;
use std::collections::HashMap;
use std::hash::Hash;

/// Dense class indices and one-hot targets for a list of labels.
///
/// Class order is the order in which labels first appear. That index is what the
/// model predicts, so anything mapping predictions back to labels (legends,
/// boundary colors) must go through `classes`.
#[derive(Clone, Debug)]
pub struct LabelEncoding<T> {
    classes: Vec<T>,
    index_of: HashMap<T, usize>,
    one_hot: Array2<f64>,
}

/// Encode `labels` into class indices and a `[labels.len(), classes]` one-hot matrix
pub fn encode_labels<T: Clone + Eq + Hash>(labels: &[T]) -> Result<LabelEncoding<T>> {
    if labels.is_empty() {
        return Err(Error::EmptyInput("no labels to encode".to_owned()));
    }

    let mut classes = vec![];
    let mut index_of = HashMap::new();

    for label in labels {
        if !index_of.contains_key(label) {
            index_of.insert(label.clone(), classes.len());
            classes.push(label.clone());
        }
    }

    let mut one_hot = Array2::zeros((labels.len(), classes.len()));
    for (row, label) in labels.iter().enumerate() {
        one_hot[[row, index_of[label]]] = 1f64;
    }

    Ok(LabelEncoding {
        classes,
        index_of,
        one_hot,
    })
}

impl<T: Eq + Hash> LabelEncoding<T> {
    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn one_hot(&self) -> &Array2<f64> {
        &self.one_hot
    }

    pub fn into_one_hot(self) -> Array2<f64> {
        self.one_hot
    }

    pub fn index_of(&self, label: &T) -> Option<usize> {
        self.index_of.get(label).copied()
    }

    /// The label behind a predicted class index
    pub fn class(&self, index: usize) -> Option<&T> {
        self.classes.get(index)
    }

    /// Map predicted class indices back to labels
    pub fn decode(&self, indices: &[usize]) -> Result<Vec<&T>> {
        indices
            .iter()
            .map(|&idx| {
                self.class(idx).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "class index {} out of range for {} classes",
                        idx,
                        self.classes.len()
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;

    #[test]
    fn classes_follow_first_appearance() {
        let encoding = encode_labels(&["Red", "Blue", "Red", "Green", "Blue"]).unwrap();

        assert_eq!(encoding.classes(), &["Red", "Blue", "Green"]);
        assert_eq!(encoding.index_of(&"Green"), Some(2));
        assert_eq!(encoding.index_of(&"Purple"), None);
    }

    #[test]
    fn one_hot_rows_point_back_at_their_label() {
        let labels = vec!["b", "a", "c", "a", "b", "b"];
        let encoding = encode_labels(&labels).unwrap();

        assert_eq!(encoding.one_hot().dim(), (6, 3));
        for (label, row) in labels.iter().zip(encoding.one_hot().axis_iter(Axis(0))) {
            let idx = encoding.index_of(label).unwrap();
            assert_eq!(encoding.class(idx), Some(label));
            assert_eq!(row.sum(), 1.0);
            assert_eq!(row[idx], 1.0);
        }
    }

    #[test]
    fn empty_string_is_a_class() {
        let encoding = encode_labels(&["", "x", ""]).unwrap();

        assert_eq!(encoding.num_classes(), 2);
        assert_eq!(encoding.index_of(&""), Some(0));
    }

    #[test]
    fn integer_labels_keep_their_order() {
        let encoding = encode_labels(&[1, 0, 0, 1]).unwrap();

        assert_eq!(encoding.classes(), &[1, 0]);
        assert_eq!(encoding.decode(&[1, 0]).unwrap(), vec![&0, &1]);
        assert!(encoding.decode(&[2]).is_err());
    }

    #[test]
    fn no_labels_is_an_error() {
        let labels: Vec<String> = vec![];

        assert!(matches!(encode_labels(&labels), Err(Error::EmptyInput(_))));
    }
}
