// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the thin Dataset/Batcher glue in Layer 4.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without tensors
//   - The model architecture is clearly separated from
//     data loading and application logic
//
// What's in this layer:
//
//   model.rs     — The classifier architecture:
//                  • Token embedding
//                  • Mean pooling over the sequence
//                  • Hidden dense layer (ReLU) with dropout
//                  • Two-class output head
//
//   trainer.rs   — The training loop
//                  Forward pass, cross-entropy loss, backward
//                  pass, Adam step, per-epoch test evaluation,
//                  metrics logging and checkpoint saving
//
//   predictor.rs — Local inference
//                  Loads a checkpoint, vectorises a message,
//                  runs the model, softmaxes the logits
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Embedding + dense classifier architecture
pub mod model;

/// Full training loop with evaluation and checkpointing
pub mod trainer;

/// Local inference against the latest checkpoint
pub mod predictor;
