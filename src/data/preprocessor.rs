// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw message text before tokenisation.
//
// SMS exports are messy:
//   - Non-breaking spaces (U+00A0) from spreadsheet round-trips
//   - Zero-width spaces (U+200B) from copy-pasting
//   - Carriage returns (\r) from Windows line endings
//   - Control characters from encoding mishaps
//   - Runs of consecutive spaces
//
// If we don't clean these, the tokenizer treats them as
// meaningful tokens and wastes vocabulary space on whitespace.
//
// Cleaning steps (applied in order):
//   1. Replace Unicode whitespace variants with plain space
//   2. Flatten \r and \n to spaces (messages are one line)
//   3. Remove invisible control characters
//   4. Collapse multiple spaces into one
//   5. Trim leading/trailing whitespace
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw message string for downstream tokenisation.
    /// Takes a &str and returns an owned String.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let normalised: String = text
            .chars()
            .map(|c| match c {
                '\t' => ' ',
                // Non-breaking space → regular space
                '\u{00A0}' => ' ',
                // Zero-width space → regular space
                '\u{200B}' => ' ',
                // Byte order mark → space
                '\u{FEFF}' => ' ',
                // Messages are one logical line — flatten breaks
                '\r' | '\n' => ' ',
                // Any other control character → space
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // ── Step 2: Collapse consecutive spaces ───────────────────────────────
        let mut out        = String::with_capacity(normalised.len());
        let mut last_space = false;

        for c in normalised.chars() {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("free   entry"), "free entry");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  see you soon  "), "see you soon");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_flattens_line_breaks() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("line1\r\nline2"), "line1 line2");
    }

    #[test]
    fn test_normalises_unicode_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("a\u{00A0}b\u{200B}c"), "a b c");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }
}
