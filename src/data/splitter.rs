// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Randomly shuffles records and splits them into two sets:
//   - Training set: fits the tokenizer and the model weights
//   - Test set:     measures performance on unseen data
//
// Why shuffle before splitting?
//   Dataset dumps are often ordered (e.g. all spam rows
//   together). Without shuffling, the test set would contain
//   only one class. Shuffling gives both sets a representative
//   mix of the two classes.
//
// Split ratio: 90% training, 10% test (configurable)
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::seq::SliceRandom;

/// Randomly shuffle `records` and split into (train, test).
///
/// # Arguments
/// * `records`        - All available records (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.9 = 90%
///
/// # Returns
/// A tuple (train_records, test_records)
pub fn split_train_test<T>(mut records: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let mut rng = rand::thread_rng();

    // Fisher-Yates shuffle — every permutation is equally likely
    records.shuffle(&mut rng);

    // e.g. 100 records * 0.9 = 90 → first 90 are training.
    // round() so a 0.9 split of N rows yields round(0.1 N) test rows.
    let total    = records.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let test = records.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test",
        records.len(),
        test.len(),
    );

    (records, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ninety_ten_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.9);
        assert_eq!(train.len(), 90);
        assert_eq!(test.len(),  10);
    }

    #[test]
    fn test_rounding_on_awkward_sizes() {
        // 55 * 0.9 = 49.5 → rounds to 50 train, 5 test
        let items: Vec<usize> = (0..55).collect();
        let (train, test)     = split_train_test(items, 0.9);
        assert_eq!(train.len(), 50);
        assert_eq!(test.len(),  5);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..57).collect();
        let (train, test)     = split_train_test(items, 0.9);
        assert_eq!(train.len() + test.len(), 57);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.9);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 1.0);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
