// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Turns cleaned message text into fixed-width integer rows.
//
// Two responsibilities:
//   1. Tokenise: words → token IDs via the word-level
//      vocabulary built by the TokenizerStore (Layer 6).
//      Words outside the vocabulary map to [UNK].
//   2. Pad: right-pad every sequence with 0 ([PAD]) to a
//      common width. The width is fitted as the length of the
//      LONGEST sequence in the training partition, and the
//      same width is then applied to the test partition and
//      to every scoring request — the model only ever sees
//      rows of that exact width.
//
// Reference: tokenizers crate documentation
//            Rust Book §8 (Vectors)

use anyhow::Result;
use tokenizers::Tokenizer;

/// ID of the padding token — always 0 in our vocabulary
pub const PAD_ID: u32 = 0;

/// Wraps the fitted tokenizer and applies the padding rules.
pub struct Vectorizer {
    tokenizer: Tokenizer,
}

impl Vectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Tokenise one message into its (un-padded) ID sequence.
    pub fn sequence(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
        Ok(enc.get_ids().to_vec())
    }

    /// Tokenise a whole partition. One row per input text,
    /// variable length before padding.
    pub fn sequences(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.sequence(t)).collect()
    }

    /// Width to pad to: the longest sequence in the training
    /// partition. At least 1 so the model always has one column.
    pub fn fit_width(sequences: &[Vec<u32>]) -> usize {
        sequences.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }

    /// Right-pad with [PAD] (0) to `width`, truncating longer
    /// sequences. Test-partition rows longer than the fitted
    /// training width are truncated rather than widening the model.
    pub fn pad(sequence: &[u32], width: usize) -> Vec<u32> {
        let mut row: Vec<u32> = sequence.iter().copied().take(width).collect();
        row.resize(width, PAD_ID);
        row
    }

    /// Pad every row of a partition to `width`.
    pub fn pad_all(sequences: &[Vec<u32>], width: usize) -> Vec<Vec<u32>> {
        sequences.iter().map(|s| Self::pad(s, width)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::TokenizerStore;
    use tempfile::TempDir;

    fn fitted_vectorizer(texts: &[&str]) -> Vectorizer {
        let dir   = TempDir::new().unwrap();
        let texts: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tok   = store.load_or_build(&texts, 100).unwrap();
        Vectorizer::new(tok)
    }

    #[test]
    fn test_one_id_per_word() {
        let v   = fitted_vectorizer(&["free entry now", "see you at lunch"]);
        let seq = v.sequence("free entry now").unwrap();
        assert_eq!(seq.len(), 3);
        // No word in the training corpus maps to [PAD] or [UNK]
        assert!(seq.iter().all(|&id| id > 1));
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let v   = fitted_vectorizer(&["see you soon"]);
        let seq = v.sequence("see zzzunknown").unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[1], 1); // [UNK]
    }

    #[test]
    fn test_fit_width_is_longest_sequence() {
        let seqs = vec![vec![5, 6], vec![7, 8, 9, 10], vec![11]];
        assert_eq!(Vectorizer::fit_width(&seqs), 4);
    }

    #[test]
    fn test_fit_width_never_zero() {
        assert_eq!(Vectorizer::fit_width(&[]), 1);
    }

    #[test]
    fn test_pad_extends_with_zero() {
        assert_eq!(Vectorizer::pad(&[3, 4], 5), vec![3, 4, 0, 0, 0]);
    }

    #[test]
    fn test_pad_truncates_overlong_rows() {
        assert_eq!(Vectorizer::pad(&[3, 4, 5, 6], 2), vec![3, 4]);
    }

    #[test]
    fn test_train_width_applies_to_test_rows() {
        // The round-trip property: the width fitted on the training
        // partition is the width of every padded row, train or test
        let train = vec![vec![2, 3, 4], vec![5]];
        let test  = vec![vec![6], vec![7, 8, 9, 10, 11]];

        let width  = Vectorizer::fit_width(&train);
        let padded = Vectorizer::pad_all(&test, width);

        assert_eq!(width, 3);
        assert!(padded.iter().all(|row| row.len() == width));
    }
}
