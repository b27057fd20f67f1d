use burn::data::dataset::Dataset;

use crate::domain::message::MessageSample;

/// In-memory dataset of tokenised, padded message samples.
/// Row count always equals the label count — a sample carries
/// both its input_ids row and its class.
pub struct MessageDataset {
    samples: Vec<MessageSample>,
}

impl MessageDataset {
    pub fn new(samples: Vec<MessageSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<MessageSample> for MessageDataset {
    fn get(&self, index: usize) -> Option<MessageSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let dataset = MessageDataset::new(vec![
            MessageSample { input_ids: vec![2, 3, 0], class: 0 },
            MessageSample { input_ids: vec![4, 0, 0], class: 1 },
        ]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.sample_count(), 2);
        assert_eq!(dataset.get(0).unwrap().class, 0);
        assert!(dataset.get(2).is_none());
    }
}
