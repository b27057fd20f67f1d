use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SpamNetConfig {
    pub vocab_size: usize,
    pub embed_dim:  usize,
    pub hidden_dim: usize,
    pub dropout:    f64,
}

impl SpamNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SpamNet<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device);
        let hidden    = LinearConfig::new(self.embed_dim, self.hidden_dim).init(device);
        let output    = LinearConfig::new(self.hidden_dim, 2).init(device);
        let dropout   = DropoutConfig::new(self.dropout).init();
        SpamNet { embedding, hidden, output, dropout }
    }
}

/// The classifier: embed each token, average the embeddings
/// over the sequence, then a small dense head down to two
/// class logits. Padding tokens (id 0) contribute their own
/// learned embedding to the average, matching the behaviour
/// of the unmasked pooling the network was designed around.
#[derive(Module, Debug)]
pub struct SpamNet<B: Backend> {
    pub embedding: Embedding<B>,
    pub hidden:    Linear<B>,
    pub output:    Linear<B>,
    pub dropout:   Dropout,
}

impl<B: Backend> SpamNet<B> {
    /// Forward pass.
    /// inputs: [batch, pad_width] token IDs → logits: [batch, 2]
    pub fn forward(&self, inputs: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        // [batch, width] → [batch, width, embed_dim]
        let embedded = self.embedding.forward(inputs);

        // Mean-pool the sequence dimension:
        // [batch, width, embed_dim] → [batch, 1, embed_dim] → [batch, embed_dim]
        let pooled = embedded.mean_dim(1).squeeze::<2>(1);

        let h = activation::relu(self.hidden.forward(pooled));
        let h = self.dropout.forward(h);

        self.output.forward(h)
    }

    /// Forward pass plus cross-entropy loss against class targets.
    /// Returns (loss, logits) so the caller can reuse the logits
    /// for accuracy bookkeeping.
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2, Int>,
        targets: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(inputs);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), targets);
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    #[test]
    fn test_forward_produces_two_logits_per_row() {
        let device = NdArrayDevice::Cpu;
        let model: SpamNet<NdArray> = SpamNetConfig::new(50, 8, 4, 0.0).init(&device);

        let inputs = Tensor::<NdArray, 1, Int>::from_ints(
            [2, 3, 4, 0, 0, 5, 6, 0, 0, 0].as_slice(), &device,
        ).reshape([2, 5]);

        let logits = model.forward(inputs);
        assert_eq!(logits.dims(), [2, 2]);
    }

    #[test]
    fn test_forward_loss_is_finite() {
        let device = NdArrayDevice::Cpu;
        let model: SpamNet<NdArray> = SpamNetConfig::new(50, 8, 4, 0.0).init(&device);

        let inputs = Tensor::<NdArray, 1, Int>::from_ints(
            [2, 3, 0, 4, 5, 6].as_slice(), &device,
        ).reshape([2, 3]);
        let targets = Tensor::<NdArray, 1, Int>::from_ints([0, 1].as_slice(), &device);

        let (loss, logits) = model.forward_loss(inputs, targets);
        assert_eq!(logits.dims(), [2, 2]);

        let loss_val: f32 = loss.into_scalar().elem();
        assert!(loss_val.is_finite());
    }
}
