// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Manages tokenizer building, saving, and loading.
//
// The vocabulary is word-level, ordered by descending corpus
// frequency, fitted on the TRAINING partition only. IDs:
//   0 = [PAD]  (the padding filler)
//   1 = [UNK]  (words never seen during fitting)
//   2.. = corpus words, most frequent first
//
// In tokenizers 0.15, train_from_files requires Trainer::Model
// to equal ModelWrapper, so rather than fight that type
// mismatch we build the tokenizer JSON directly and load it
// back through Tokenizer::from_file.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load an existing tokenizer or fit a new one on `texts`.
    /// `vocab_size` caps the vocabulary, special tokens included.
    pub fn load_or_build(
        &self,
        texts:      &[String],
        vocab_size: usize,
    ) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }

    /// Fit a word-level vocabulary on the given texts and write
    /// a valid tokenizer JSON.
    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir).ok();

        // ── Step 1: Count word frequencies ────────────────────────────────────
        use std::collections::HashMap;
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text.split_whitespace() {
                let w = word.to_lowercase();
                // Strip punctuation from edges
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // ── Step 2: Assign IDs by descending frequency ────────────────────────
        // Ties broken alphabetically so fitting is deterministic.
        // Reserve 2 slots for [PAD] and [UNK].
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let max_words = vocab_size.saturating_sub(2);
        words.truncate(max_words);

        let mut vocab = serde_json::json!({
            "[PAD]": 0,
            "[UNK]": 1,
        });

        let mut next_id = 2usize;
        for (word, _) in &words {
            if vocab.get(word).is_none() {
                vocab[word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: Write tokenizer JSON in HuggingFace format ────────────────
        // This format is what Tokenizer::from_file() expects.
        // The lowercase normalizer mirrors the lowercasing used
        // while counting, so fitting and encoding agree.
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(
            &tok_path,
            serde_json::to_string_pretty(&tokenizer_json)?,
        ).with_context(|| "Cannot write tokenizer JSON")?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            next_id,
            tok_path.display()
        );

        // Load back as a proper Tokenizer instance
        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn texts(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_frequent_word_gets_lowest_id() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tok   = store
            .load_or_build(&texts(&["spam spam spam ham", "spam ham lunch"]), 100)
            .unwrap();

        // spam (4 uses) → id 2, ham (2 uses) → id 3, lunch → id 4
        let enc = tok.encode("spam ham lunch", false).unwrap();
        assert_eq!(enc.get_ids(), &[2, 3, 4]);
    }

    #[test]
    fn test_vocab_size_caps_word_count() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        // Cap of 4 = [PAD] + [UNK] + the two most frequent words
        let tok = store
            .load_or_build(&texts(&["a a a b b c d e"]), 4)
            .unwrap();

        assert_eq!(tok.get_vocab_size(true), 4);
        // Rare words fall back to [UNK]
        let enc = tok.encode("d", false).unwrap();
        assert_eq!(enc.get_ids(), &[1]);
    }

    #[test]
    fn test_second_call_loads_the_saved_tokenizer() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        store.load_or_build(&texts(&["one two three"]), 100).unwrap();

        // A different corpus on the second call must NOT rebuild —
        // the fitted vocabulary is reused as-is
        let tok = store.load_or_build(&texts(&["other words"]), 100).unwrap();
        let enc = tok.encode("one other", false).unwrap();
        assert_eq!(enc.get_ids()[1], 1); // "other" was never fitted → [UNK]
    }

    #[test]
    fn test_encoding_is_lowercased() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tok   = store.load_or_build(&texts(&["winner prize"]), 100).unwrap();

        let upper = tok.encode("WINNER", false).unwrap();
        let lower = tok.encode("winner", false).unwrap();
        assert_eq!(upper.get_ids(), lower.get_ids());
    }
}
