// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV download
// all the way to tensor batches.
//
// The pipeline flows in this order:
//
//   labelled CSV (local file or remote URL)
//       │
//       ▼
//   CsvLoader         → downloads if needed, parses rows
//       │
//       ▼
//   Preprocessor      → cleans text (whitespace, encoding)
//       │
//       ▼
//   split_train_test  → shuffles and splits 90/10
//       │
//       ▼
//   Vectorizer        → words to token IDs, padded to a
//                       common width fitted on the train set
//       │
//       ▼
//   MessageDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   MessageBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Downloads and parses the labelled CSV dataset
pub mod loader;

/// Cleans and normalises raw message text
pub mod preprocessor;

/// Shuffles and splits data into train/test sets
pub mod splitter;

/// Tokenises messages and pads sequences to a fixed width
pub mod vectorizer;

/// Implements Burn's Dataset trait for message samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
