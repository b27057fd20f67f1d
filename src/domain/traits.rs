// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvLoader implements DatasetSource
//   - A future JsonLoader could also implement DatasetSource
//   - The application layer only sees DatasetSource
//     and works with both without any changes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::message::MessageRecord;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce the labelled message corpus.
///
/// Implementations:
///   - CsvLoader → loads from a local CSV, downloading it first
///                 if only a URL is configured
pub trait DatasetSource {
    /// Load all available records from this source.
    fn load_all(&self) -> Result<Vec<MessageRecord>>;
}

// ─── MessageClassifier ────────────────────────────────────────────────────────
/// The outcome of classifying one message.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Display label for the predicted class
    pub label: String,

    /// Predicted class index (0 = sentinel, 1 = other)
    pub class: usize,

    /// Softmax probability of the predicted class, in [0, 1]
    pub confidence: f32,
}

/// Any component that can classify a message into one of the
/// two label classes.
///
/// Implementations:
///   - Predictor → runs the local checkpointed model
pub trait MessageClassifier {
    /// Classify a single message text.
    fn classify(&self, message: &str) -> Result<Verdict>;
}
