//! Categorical encoding of class labels.

/// The result of encoding a label sequence: the sorted vocabulary of
/// distinct classes and, for every input position, the index of its class
/// within that vocabulary.
///
/// Invariant: `classes[indices[p]] == labels[p]` for every position `p`,
/// and `classes` is sorted and duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoding<L> {
    pub classes: Vec<L>,
    pub indices: Vec<usize>,
}

/// Encodes raw class labels into a sorted vocabulary plus categorical
/// indices.
///
/// The vocabulary order is the natural order of the label type, so repeated
/// calls over the same multiset always produce the same encoding. An empty
/// input yields an empty encoding.
pub fn encode<L: Ord + Clone>(labels: &[L]) -> LabelEncoding<L> {
    let mut classes: Vec<L> = labels.to_vec();
    classes.sort();
    classes.dedup();

    let indices = labels
        .iter()
        .map(|label| {
            classes
                .binary_search(label)
                .unwrap_or_else(|_| unreachable!("label came from the same input slice"))
        })
        .collect();

    LabelEncoding { classes, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted_and_unique() {
        let encoding = encode(&["beta", "alpha", "beta", "gamma"]);
        assert_eq!(encoding.classes, vec!["alpha", "beta", "gamma"]);
        assert_eq!(encoding.indices, vec![1, 0, 1, 2]);
    }

    #[test]
    fn indices_recover_the_original_labels() {
        let labels = vec![7, 3, 7, 1, 3, 9];
        let encoding = encode(&labels);
        let decoded: Vec<i32> = encoding
            .indices
            .iter()
            .map(|&i| encoding.classes[i])
            .collect();
        assert_eq!(decoded, labels);
    }

    #[test]
    fn single_class_input_maps_everything_to_zero() {
        let encoding = encode(&["x", "x", "x"]);
        assert_eq!(encoding.classes, vec!["x"]);
        assert_eq!(encoding.indices, vec![0, 0, 0]);
    }

    #[test]
    fn empty_input_yields_empty_encoding() {
        let encoding = encode::<String>(&[]);
        assert!(encoding.classes.is_empty());
        assert!(encoding.indices.is_empty());
    }

    #[test]
    fn encoding_is_stable_across_input_orderings_of_the_same_multiset() {
        let a = encode(&["b", "a", "c"]);
        let b = encode(&["c", "b", "a"]);
        assert_eq!(a.classes, b.classes);
    }
}
