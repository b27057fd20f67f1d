// ============================================================
// Layer 6 — Platform Wire Types
// ============================================================
// The request and response bodies exchanged with the platform,
// plus the credential bundle every call needs. All are plain
// serde structs; the client owns the HTTP mechanics.

use serde::{Deserialize, Serialize};

/// Everything needed to authenticate against the platform.
/// Supplied on the command line or via MLHUB_* environment
/// variables; passed as plaintext configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// API key, sent as a bearer token
    pub api_key: String,

    /// Service instance identifier, sent as the ML-Instance-ID header
    pub instance_id: String,

    /// Base URL of the platform API, e.g. "https://mlhub.example.com"
    pub base_url: String,
}

/// Descriptive metadata stored alongside a registered model.
/// The platform matches framework name/version against what its
/// scoring runtime supports; we do no local validation of that
/// constraint — a mismatch comes back as a platform error.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub name:              String,
    pub framework_name:    String,
    pub framework_version: String,
}

impl ModelMetadata {
    /// Metadata describing what this pipeline actually trains with.
    pub fn for_this_crate(name: impl Into<String>) -> Self {
        Self {
            name:              name.into(),
            framework_name:    "burn".to_string(),
            framework_version: "0.15".to_string(),
        }
    }
}

/// Response from POST /v4/models — the opaque model identifier
/// the platform assigns to the registered artifact.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
}

/// Body for POST /v4/deployments
#[derive(Debug, Serialize)]
pub struct DeployRequest {
    pub model_id: String,
    pub name:     String,
    /// Always "online" — we only provision scored web endpoints
    pub kind:     String,
}

/// Response from POST /v4/deployments
#[derive(Debug, Deserialize)]
pub struct DeployResponse {
    pub id:          String,
    pub scoring_url: String,
}

/// Scoring payload: one row of padded token IDs per message.
/// Every row must have the padded width used at training time
/// or the platform rejects the request.
#[derive(Debug, Serialize)]
pub struct ScoringRequest {
    pub values: Vec<Vec<u32>>,
}

/// Scoring response: one [p_class0, p_class1] pair per input row.
#[derive(Debug, Deserialize)]
pub struct ScoringResponse {
    pub predictions: Vec<Vec<f32>>,
}

/// Platform error body, when the platform sends one
#[derive(Debug, Deserialize)]
pub struct PlatformError {
    pub error: String,
}

/// What `publish` persists locally so `score` can find the
/// endpoint later without re-asking the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub model_id:      String,
    pub deployment_id: String,
    pub scoring_url:   String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_request_shape() {
        let req = ScoringRequest { values: vec![vec![2, 3, 0], vec![4, 0, 0]] };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "values": [[2, 3, 0], [4, 0, 0]] }));
    }

    #[test]
    fn test_scoring_response_parses() {
        let resp: ScoringResponse = serde_json::from_str(
            r#"{ "predictions": [[0.91, 0.09], [0.12, 0.88]] }"#,
        ).unwrap();
        assert_eq!(resp.predictions.len(), 2);
        assert!(resp.predictions[0][0] > resp.predictions[0][1]);
    }

    #[test]
    fn test_deployment_record_round_trip() {
        let record = DeploymentRecord {
            model_id:      "model-123".to_string(),
            deployment_id: "deploy-456".to_string(),
            scoring_url:   "https://mlhub.example.com/v4/deployments/deploy-456/score".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: DeploymentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model_id, "model-123");
        assert_eq!(back.scoring_url, record.scoring_url);
    }

    #[test]
    fn test_default_metadata_names_the_framework() {
        let meta = ModelMetadata::for_this_crate("sms-spam");
        assert_eq!(meta.name, "sms-spam");
        assert_eq!(meta.framework_name, "burn");
    }
}
