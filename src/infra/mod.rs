// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   checkpoint.rs      — Saving and loading model weights
//                        Uses Burn's CompactRecorder to
//                        serialise model parameters to disk.
//                        Also saves/loads TrainConfig as JSON
//                        so inference and scoring can rebuild
//                        the model and the padded row width.
//
//   tokenizer_store.rs — Tokenizer persistence
//                        Builds a word-level vocabulary from the
//                        training partition if none exists, or
//                        loads a previously saved one. Ensures
//                        the same vocabulary is used for
//                        training, local inference and scoring.
//
//   metrics.rs         — Training metrics logging
//                        Writes epoch-level metrics (loss,
//                        accuracy) to a CSV file for later
//                        analysis and plotting.
//
//   archive.rs         — Artifact archiving
//                        Packs the trained artifacts into the
//                        single model.tar.gz the platform's
//                        model repository expects.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;

/// tar.gz packing of the trained artifacts
pub mod archive;
