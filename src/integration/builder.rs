//! Builder for creating ClassificationTensor objects from raw model outputs.

use ndarray::Array1;

use crate::roi::ClassificationTensor;

/// Builder for creating `ClassificationTensor` objects from raw model outputs.
///
/// When label names are supplied, `build` selects the label with the
/// highest score and records its index and confidence.
#[derive(Debug, Clone, Default)]
pub struct TensorBuilder {
    name: String,
    model_name: Option<String>,
    layer_name: Option<String>,
    labels: Vec<String>,
    data: Vec<f32>,
}

impl TensorBuilder {
    /// Create a new builder for the output called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    pub fn layer(mut self, layer_name: impl Into<String>) -> Self {
        self.layer_name = Some(layer_name.into());
        self
    }

    /// Label names, indexed like the output values.
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Raw output values, e.g. softmax scores.
    pub fn data(mut self, data: &[f32]) -> Self {
        self.data = data.to_vec();
        self
    }

    /// Build the final `ClassificationTensor`.
    pub fn build(self) -> ClassificationTensor {
        let mut tensor = ClassificationTensor::new(self.name);
        tensor.model_name = self.model_name;
        tensor.layer_name = self.layer_name;
        tensor.data = Array1::from(self.data);

        if let Some((idx, score)) = tensor.argmax() {
            if let Some(label) = self.labels.get(idx) {
                tensor.label = Some(label.clone());
                tensor.label_id = Some(idx);
                tensor.confidence = score;
            }
        }
        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_builder() {
        let tensor = TensorBuilder::new("color")
            .model("vehicle-attributes")
            .layer("color")
            .labels(["white", "gray", "red"])
            .data(&[0.1, 0.2, 0.7])
            .build();

        assert_eq!(tensor.label.as_deref(), Some("red"));
        assert_eq!(tensor.label_id, Some(2));
        assert_eq!(tensor.confidence, 0.7);
        assert_eq!(tensor.data.len(), 3);
    }

    #[test]
    fn test_tensor_builder_without_labels() {
        let tensor = TensorBuilder::new("embedding").data(&[0.3, 0.9]).build();

        assert_eq!(tensor.label, None);
        assert_eq!(tensor.confidence, 0.0);
        assert_eq!(tensor.data.len(), 2);
    }
}
