// ============================================================
// Layer 5 — Predictor
// ============================================================
// Local inference: rebuilds the architecture from the saved
// training config, loads the latest checkpoint, and classifies
// one message at a time.

use anyhow::Result;
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::data::preprocessor::Preprocessor;
use crate::data::vectorizer::Vectorizer;
use crate::domain::message::LabelCodec;
use crate::domain::traits::{MessageClassifier, Verdict};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{SpamNet, SpamNetConfig};

type InferBackend = burn::backend::NdArray;

pub struct Predictor {
    model:        SpamNet<InferBackend>,
    vectorizer:   Vectorizer,
    preprocessor: Preprocessor,
    codec:        LabelCodec,
    pad_width:    usize,
    device:       burn::backend::ndarray::NdArrayDevice,
}

impl Predictor {
    /// Build a Predictor from the saved artifacts.
    /// Dropout is zeroed — inference is deterministic.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        tokenizer:    Tokenizer,
    ) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::Cpu;
        let cfg    = ckpt_manager.load_config()?;

        let model_cfg = SpamNetConfig::new(
            cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim, 0.0,
        );
        let model: SpamNet<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self {
            model,
            vectorizer:   Vectorizer::new(tokenizer),
            preprocessor: Preprocessor::new(),
            codec:        LabelCodec::new(&cfg.sentinel_label, &cfg.other_label),
            pad_width:    cfg.pad_width,
            device,
        })
    }
}

impl MessageClassifier for Predictor {
    fn classify(&self, message: &str) -> Result<Verdict> {
        // Same clean → tokenise → pad path as training, so the
        // model sees exactly the row shape it was trained on
        let cleaned = self.preprocessor.clean(message);
        let seq     = self.vectorizer.sequence(&cleaned)?;
        let row     = Vectorizer::pad(&seq, self.pad_width);

        let input_flat: Vec<i32> = row.iter().map(|&x| x as i32).collect();
        let inputs = Tensor::<InferBackend, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([1, self.pad_width]);

        let logits = self.model.forward(inputs);
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read prediction tensor: {e:?}"))?;

        // Two classes → probs has exactly two entries
        let class = if probs[0] >= probs[1] { 0 } else { 1 };

        Ok(Verdict {
            label:      self.codec.label_of(class).to_string(),
            class,
            confidence: probs[class],
        })
    }
}
