// ============================================================
// Layer 4 — Message Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<MessageSample>
// into tensors for the model forward pass.
//
// Input:  Vec of N MessageSamples, each with input_ids of width W
// Output: MessageBatch with an inputs tensor of shape [N, W]
//         and a targets tensor of shape [N]
//
// All sequences were already padded to the same width by the
// Vectorizer, so batching is a flatten + reshape with no
// dynamic padding needed here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::message::MessageSample;

// ─── MessageBatch ─────────────────────────────────────────────────────────────
/// A batch of message samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct MessageBatch<B: Backend> {
    /// Token ID rows — shape: [batch_size, pad_width]
    pub inputs: Tensor<B, 2, Int>,

    /// Class indices — shape: [batch_size]
    /// 0 = sentinel class, 1 = other
    pub targets: Tensor<B, 1, Int>,
}

// ─── MessageBatcher ───────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the
/// right place.
#[derive(Clone, Debug)]
pub struct MessageBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> MessageBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<MessageSample, MessageBatch<B>> for MessageBatcher<B> {
    /// Convert a Vec of MessageSamples into a single MessageBatch.
    ///
    /// Steps:
    ///   1. Flatten all input_ids into one Vec<i32>
    ///   2. Create a 1D tensor and reshape to [batch, width]
    ///   3. Create a 1D tensor of class indices
    fn batch(&self, items: Vec<MessageSample>) -> MessageBatch<B> {
        let batch_size = items.len();
        // All rows were padded to the same width by the Vectorizer
        let width      = items[0].input_ids.len();

        // Burn uses i32 for Int tensor construction
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let targets: Vec<i32> = items
            .iter()
            .map(|s| s.class as i32)
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([batch_size, width]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            targets.as_slice(), &self.device,
        );

        MessageBatch { inputs, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    #[test]
    fn test_batch_shapes() {
        let batcher = MessageBatcher::<NdArray>::new(NdArrayDevice::Cpu);
        let batch = batcher.batch(vec![
            MessageSample { input_ids: vec![2, 3, 0, 0], class: 0 },
            MessageSample { input_ids: vec![4, 5, 6, 0], class: 1 },
            MessageSample { input_ids: vec![7, 0, 0, 0], class: 1 },
        ]);

        assert_eq!(batch.inputs.dims(), [3, 4]);
        assert_eq!(batch.targets.dims(), [3]);
    }

    #[test]
    fn test_batch_preserves_values() {
        let batcher = MessageBatcher::<NdArray>::new(NdArrayDevice::Cpu);
        let batch = batcher.batch(vec![
            MessageSample { input_ids: vec![9, 8], class: 1 },
        ]);

        // NdArray stores Int tensors as i64
        let ids: Vec<i64> = batch.inputs.into_data().to_vec().unwrap();
        assert_eq!(ids, vec![9, 8]);

        let classes: Vec<i64> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(classes, vec![1]);
    }
}
