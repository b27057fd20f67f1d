// ============================================================
// Layer 6 — Artifact Archiver
// ============================================================
// Packs the trained artifacts (latest weights, train config,
// tokenizer) into a single gzip-compressed tar archive — the
// one-file format the platform's model repository ingests.
//
// Re-running archiving always overwrites the previous archive:
// File::create truncates, so a stale half-written archive can
// never survive a re-run.

use anyhow::{bail, Context, Result};
use flate2::{write::GzEncoder, Compression};
use std::{fs::File, path::{Path, PathBuf}};

pub struct Archiver;

impl Archiver {
    /// Pack `members` into a tar.gz at `out_path`, storing each
    /// member under its bare file name.
    pub fn pack(members: &[PathBuf], out_path: &Path) -> Result<()> {
        if members.is_empty() {
            bail!("No artifact files to archive");
        }

        let file = File::create(out_path)
            .with_context(|| format!("Cannot create archive '{}'", out_path.display()))?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut tar = tar::Builder::new(encoder);

        for member in members {
            let name = member
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("Bad artifact path '{}'", member.display()))?;

            tar.append_path_with_name(member, name)
                .with_context(|| format!("Cannot add '{}' to archive", member.display()))?;
        }

        // finish() flushes the tar trailer, into_inner() the gzip stream
        tar.into_inner()
            .and_then(|gz| gz.finish())
            .with_context(|| "Cannot finalise archive")?;

        tracing::info!("Archived {} files into '{}'", members.len(), out_path.display());
        Ok(())
    }

    /// Member names inside an existing archive, for verification.
    pub fn list(path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open archive '{}'", path.display()))?;
        let decoder = flate2::read::GzDecoder::new(file);
        let mut tar = tar::Archive::new(decoder);

        let mut names = Vec::new();
        for entry in tar.entries()? {
            let entry = entry?;
            names.push(entry.path()?.to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn member(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_pack_and_list() {
        let dir = TempDir::new().unwrap();
        let members = vec![
            member(&dir, "weights.mpk", "fake weights"),
            member(&dir, "train_config.json", "{}"),
        ];
        let out = dir.path().join("model.tar.gz");

        Archiver::pack(&members, &out).unwrap();

        let names = Archiver::list(&out).unwrap();
        assert_eq!(names, vec!["weights.mpk", "train_config.json"]);
    }

    #[test]
    fn test_repacking_overwrites_cleanly() {
        // Idempotence: archiving twice produces a valid archive
        // each time, the second overwriting the first
        let dir = TempDir::new().unwrap();
        let members = vec![member(&dir, "a.json", "first")];
        let out = dir.path().join("model.tar.gz");

        Archiver::pack(&members, &out).unwrap();
        let first_size = fs::metadata(&out).unwrap().len();

        let members = vec![
            member(&dir, "a.json", "second, longer content this time"),
            member(&dir, "b.json", "and another file"),
        ];
        Archiver::pack(&members, &out).unwrap();

        let names = Archiver::list(&out).unwrap();
        assert_eq!(names.len(), 2);
        assert_ne!(fs::metadata(&out).unwrap().len(), first_size);
    }

    #[test]
    fn test_empty_member_list_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Archiver::pack(&[], &dir.path().join("model.tar.gz")).is_err());
    }
}
