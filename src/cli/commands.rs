// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands: `train`, `predict`, `publish`
// and `score`, and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//   - environment-variable fallbacks for the credentials
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::publish_use_case::PublishConfig;
use crate::application::score_use_case::ScoreConfig;
use crate::application::train_use_case::TrainConfig;
use crate::cloud::types::Credentials;

/// The four top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the spam classifier on a labelled message CSV
    Train(TrainArgs),

    /// Classify one message locally using the saved checkpoint
    Predict(PredictArgs),

    /// Register the trained archive and create an online deployment
    Publish(PublishArgs),

    /// Score messages against the remote deployment
    Score(ScoreArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path of the labelled CSV (first column label, second text)
    #[arg(long, default_value = "data/messages.csv")]
    pub data_path: String,

    /// URL to download the CSV from when the file is missing
    #[arg(long)]
    pub data_url: Option<String>,

    /// Directory for checkpoints, tokenizer, metrics, and the archive
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Proportion of records used for training (rest is the test set)
    #[arg(long, default_value_t = 0.9)]
    pub train_fraction: f64,

    /// Label string that maps to the first class; every other
    /// label maps to the second
    #[arg(long, default_value = "spam")]
    pub sentinel_label: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Size of the learned embedding vector per token
    #[arg(long, default_value_t = 32)]
    pub embed_dim: usize,

    /// Width of the hidden dense layer
    #[arg(long, default_value_t = 24)]
    pub hidden_dim: usize,

    /// Dropout probability on the hidden layer during training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Upper bound on vocabulary size, special tokens included
    #[arg(long, default_value_t = 10000)]
    pub vocab_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types. The fitted
/// fields (other_label, pad_width, final vocab size) are filled
/// in by the use case itself.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:      a.data_path,
            data_url:       a.data_url,
            artifacts_dir:  a.artifacts_dir,
            train_fraction: a.train_fraction,
            sentinel_label: a.sentinel_label,
            other_label:    "other".to_string(),
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            embed_dim:      a.embed_dim,
            hidden_dim:     a.hidden_dim,
            dropout:        a.dropout,
            vocab_size:     a.vocab_size,
            pad_width:      0,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The message text to classify
    #[arg(long)]
    pub message: String,

    /// Directory where the trained artifacts were saved
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}

/// Platform credentials, shared by `publish` and `score`.
/// Each flag falls back to an MLHUB_* environment variable so
/// the API key doesn't have to appear in shell history.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// API key for the platform
    #[arg(long, env = "MLHUB_API_KEY")]
    pub api_key: String,

    /// Service instance identifier
    #[arg(long, env = "MLHUB_INSTANCE_ID")]
    pub instance_id: String,

    /// Base URL of the platform API
    #[arg(long, env = "MLHUB_BASE_URL")]
    pub base_url: String,
}

impl From<CredentialArgs> for Credentials {
    fn from(a: CredentialArgs) -> Self {
        Credentials {
            api_key:     a.api_key,
            instance_id: a.instance_id,
            base_url:    a.base_url,
        }
    }
}

/// All arguments for the `publish` command
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Directory where the trained artifacts were saved
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Name the model is registered under
    #[arg(long, default_value = "sms-spam-classifier")]
    pub model_name: String,

    /// Human-readable name for the deployment
    #[arg(long, default_value = "sms-spam-scoring")]
    pub deployment_name: String,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

impl From<PublishArgs> for PublishConfig {
    fn from(a: PublishArgs) -> Self {
        PublishConfig {
            artifacts_dir:   a.artifacts_dir,
            model_name:      a.model_name,
            deployment_name: a.deployment_name,
            credentials:     a.credentials.into(),
        }
    }
}

/// All arguments for the `score` command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// One or more messages to score (repeat the flag)
    #[arg(long = "message", required = true)]
    pub messages: Vec<String>,

    /// Directory where the trained artifacts were saved
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

impl From<&ScoreArgs> for ScoreConfig {
    fn from(a: &ScoreArgs) -> Self {
        ScoreConfig {
            artifacts_dir: a.artifacts_dir.clone(),
            credentials:   Credentials {
                api_key:     a.credentials.api_key.clone(),
                instance_id: a.credentials.instance_id.clone(),
                base_url:    a.credentials.base_url.clone(),
            },
        }
    }
}
