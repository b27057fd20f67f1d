// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal per use case.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file/network mechanics (Layers 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow: dataset → trained, archived artifacts
pub mod train_use_case;

// The publishing workflow: archive → registered model → deployment
pub mod publish_use_case;

// The remote scoring workflow: messages → endpoint → labels
pub mod score_use_case;

// The local inference workflow against the saved checkpoint
pub mod predict_use_case;
