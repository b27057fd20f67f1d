// ============================================================
// Layer 3 — Message Domain Types
// ============================================================
// The dataset is a flat list of (label, text) rows with exactly
// two label classes. One label string is designated the
// *sentinel* (e.g. "spam"); it maps to class 0 and every other
// label string maps to class 1. The model never sees label
// strings — only these class indices.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One labelled message from the dataset.
/// Ordered collection, no uniqueness constraint — duplicate
/// texts are legitimate training signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// The raw label string exactly as it appears in the CSV
    pub label: String,

    /// The free-text message body
    pub text: String,
}

impl MessageRecord {
    /// Create a new MessageRecord.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text:  text.into(),
        }
    }
}

/// Index of the sentinel class in the one-hot encoding
pub const SENTINEL_CLASS: usize = 0;

/// Index of the "everything else" class
pub const OTHER_CLASS: usize = 1;

// ─── LabelCodec ───────────────────────────────────────────────────────────────
/// Maps between label strings and the two model classes.
///
/// Binarisation rule: a label equal to the sentinel string is
/// class 0; ANY other label string is class 1. The `other`
/// string is only used for display when decoding predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCodec {
    /// The label string that maps to class 0 (e.g. "spam")
    pub sentinel: String,

    /// Display name for class 1 (e.g. "ham")
    pub other: String,
}

impl LabelCodec {
    pub fn new(sentinel: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            other:    other.into(),
        }
    }

    /// Class index for a label string.
    /// Exact match against the sentinel → class 0, else class 1.
    pub fn class_of(&self, label: &str) -> usize {
        if label == self.sentinel {
            SENTINEL_CLASS
        } else {
            OTHER_CLASS
        }
    }

    /// Two-element one-hot vector for a class index.
    /// Class 0 → [1, 0], class 1 → [0, 1].
    pub fn one_hot(&self, class: usize) -> [u32; 2] {
        if class == SENTINEL_CLASS {
            [1, 0]
        } else {
            [0, 1]
        }
    }

    /// Display label for a predicted class index
    pub fn label_of(&self, class: usize) -> &str {
        if class == SENTINEL_CLASS {
            &self.sentinel
        } else {
            &self.other
        }
    }
}

/// One fully tokenised and padded training sample.
/// All samples in a run share the same input_ids length
/// (the padded width fitted on the training partition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSample {
    pub input_ids: Vec<u32>,
    pub class:     usize,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_label_is_first_class() {
        let codec = LabelCodec::new("spam", "ham");
        let record = MessageRecord::new("spam", "hi");
        assert_eq!(codec.class_of(&record.label), SENTINEL_CLASS);
        assert_eq!(codec.one_hot(SENTINEL_CLASS), [1, 0]);
    }

    #[test]
    fn test_other_label_is_second_class() {
        let codec = LabelCodec::new("spam", "ham");
        assert_eq!(codec.class_of("ham"), OTHER_CLASS);
        assert_eq!(codec.one_hot(OTHER_CLASS), [0, 1]);
    }

    #[test]
    fn test_any_unknown_label_is_second_class() {
        // The rule is exact-match-or-not, not a two-way lookup:
        // every non-sentinel string lands in class 1
        let codec = LabelCodec::new("spam", "ham");
        assert_eq!(codec.class_of("SPAM"), OTHER_CLASS);
        assert_eq!(codec.class_of("unknown"), OTHER_CLASS);
        assert_eq!(codec.class_of(""), OTHER_CLASS);
    }

    #[test]
    fn test_label_of_round_trip() {
        let codec = LabelCodec::new("spam", "ham");
        assert_eq!(codec.label_of(codec.class_of("spam")), "spam");
        assert_eq!(codec.label_of(codec.class_of("ham")), "ham");
    }
}
