// ============================================================
// Layer 6 — Platform Client
// ============================================================
// Blocking HTTP client for the platform's model-repository and
// deployment APIs. The pipeline is strictly sequential, so the
// blocking reqwest client fits — each call runs to completion
// before the next stage starts.
//
// Registration is two calls: POST the metadata to get a model
// id, then PUT the archive bytes under that id. Deployment is
// one POST returning the scoring URL. Scoring POSTs padded
// rows and gets one probability pair back per row.

use anyhow::{bail, Context, Result};
use std::{fs, path::Path, time::Duration};

use crate::cloud::types::{
    Credentials, DeployRequest, DeployResponse, ModelMetadata,
    PlatformError, RegisterResponse, ScoringRequest, ScoringResponse,
};

/// Instance header the platform uses to route requests
const INSTANCE_HEADER: &str = "ML-Instance-ID";

pub struct PlatformClient {
    http:  reqwest::blocking::Client,
    creds: Credentials,
}

impl PlatformClient {
    pub fn new(creds: Credentials) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .context("Cannot build HTTP client")?;
        Ok(Self { http, creds })
    }

    /// Register a model archive with the platform's repository.
    /// Returns the opaque model identifier the platform assigns.
    pub fn register_model(&self, archive: &Path, meta: &ModelMetadata) -> Result<String> {
        tracing::info!("Registering model '{}' with the platform", meta.name);

        let response = self.http
            .post(format!("{}/v4/models", self.creds.base_url))
            .bearer_auth(&self.creds.api_key)
            .header(INSTANCE_HEADER, &self.creds.instance_id)
            .json(meta)
            .send()
            .context("Model registration request failed")?;
        let registered: RegisterResponse = read_response(response, "model registration")?;

        // Second call: attach the archive bytes to the new model id
        let bytes = fs::read(archive)
            .with_context(|| format!("Cannot read archive '{}'", archive.display()))?;
        tracing::info!("Uploading archive ({} bytes)", bytes.len());

        let response = self.http
            .put(format!("{}/v4/models/{}/content", self.creds.base_url, registered.id))
            .bearer_auth(&self.creds.api_key)
            .header(INSTANCE_HEADER, &self.creds.instance_id)
            .header(reqwest::header::CONTENT_TYPE, "application/gzip")
            .body(bytes)
            .send()
            .context("Archive upload request failed")?;
        check_status(response, "archive upload")?;

        tracing::info!("Model registered: {}", registered.id);
        Ok(registered.id)
    }

    /// Provision an online scoring deployment for a registered
    /// model. Returns the deployment details, including the URL
    /// scoring requests go to.
    pub fn create_deployment(&self, model_id: &str, name: &str) -> Result<DeployResponse> {
        tracing::info!("Creating deployment '{}' for model {}", name, model_id);

        let request = DeployRequest {
            model_id: model_id.to_string(),
            name:     name.to_string(),
            kind:     "online".to_string(),
        };

        let response = self.http
            .post(format!("{}/v4/deployments", self.creds.base_url))
            .bearer_auth(&self.creds.api_key)
            .header(INSTANCE_HEADER, &self.creds.instance_id)
            .json(&request)
            .send()
            .context("Deployment request failed")?;
        let deployed: DeployResponse = read_response(response, "deployment")?;

        tracing::info!("Deployment ready: {} → {}", deployed.id, deployed.scoring_url);
        Ok(deployed)
    }

    /// Score padded token-ID rows against a deployment endpoint.
    /// Returns the predicted class index per row (argmax of the
    /// returned probability pair).
    pub fn score(&self, scoring_url: &str, rows: &[Vec<u32>]) -> Result<Vec<usize>> {
        // The endpoint rejects ragged input; fail fast locally
        // with a clearer message than the platform's
        validate_rows(rows)?;

        let request = ScoringRequest { values: rows.to_vec() };

        let response = self.http
            .post(scoring_url)
            .bearer_auth(&self.creds.api_key)
            .header(INSTANCE_HEADER, &self.creds.instance_id)
            .json(&request)
            .send()
            .context("Scoring request failed")?;
        let scored: ScoringResponse = read_response(response, "scoring")?;

        if scored.predictions.len() != rows.len() {
            bail!(
                "Platform returned {} predictions for {} rows",
                scored.predictions.len(),
                rows.len()
            );
        }

        Ok(scored.predictions.iter().map(|p| argmax(p)).collect())
    }
}

/// Every row must share one width — the padded width used at
/// training time.
fn validate_rows(rows: &[Vec<u32>]) -> Result<()> {
    let Some(first) = rows.first() else {
        bail!("Scoring payload is empty");
    };
    let width = first.len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            bail!(
                "Scoring row {} has width {} but row 0 has width {} — \
                 all rows must match the training pad width",
                i, row.len(), width
            );
        }
    }
    Ok(())
}

fn argmax(probs: &[f32]) -> usize {
    let mut best = 0;
    for (i, p) in probs.iter().enumerate() {
        if *p > probs[best] {
            best = i;
        }
    }
    best
}

/// Parse a successful JSON response, or surface the platform's
/// error body (falling back to the bare status code).
fn read_response<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
    what:     &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(platform_failure(response, what, status));
    }
    response
        .json::<T>()
        .with_context(|| format!("Cannot parse {what} response"))
}

/// Like read_response, for calls whose success body we ignore.
fn check_status(response: reqwest::blocking::Response, what: &str) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(platform_failure(response, what, status));
    }
    Ok(())
}

fn platform_failure(
    response: reqwest::blocking::Response,
    what:     &str,
    status:   reqwest::StatusCode,
) -> anyhow::Error {
    match response.json::<PlatformError>() {
        Ok(body) => anyhow::anyhow!("Platform rejected {what} ({status}): {}", body.error),
        Err(_)   => anyhow::anyhow!("Platform rejected {what} with HTTP {status}"),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_width_rows_pass_validation() {
        let rows = vec![vec![2, 3, 0], vec![4, 5, 6]];
        assert!(validate_rows(&rows).is_ok());
    }

    #[test]
    fn test_ragged_rows_fail_validation() {
        let rows = vec![vec![2, 3, 0], vec![4, 5]];
        assert!(validate_rows(&rows).is_err());
    }

    #[test]
    fn test_empty_payload_fails_validation() {
        assert!(validate_rows(&[]).is_err());
    }

    #[test]
    fn test_argmax_picks_the_larger_probability() {
        assert_eq!(argmax(&[0.9, 0.1]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
        // Ties keep the first class
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }
}
