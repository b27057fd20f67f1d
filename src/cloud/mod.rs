// ============================================================
// Layer 6 — Cloud Platform Client
// ============================================================
// Talks to the remote ML platform's model repository and
// deployment APIs over HTTPS:
//
//   types.rs  — credentials plus the request/response bodies
//               for registration, deployment and scoring
//   client.rs — the blocking HTTP client: register a model
//               archive, create an online deployment, and
//               score padded rows against its endpoint
//
// The platform owns everything behind these calls — model
// storage, deployment lifecycle, scoring. A failed call
// surfaces the platform's error and aborts the run; there
// are no retries.

/// Credentials and wire types for the platform APIs
pub mod types;

/// Blocking HTTP client for registration, deployment, scoring
pub mod client;
