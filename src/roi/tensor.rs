//! Classification result attached to a region.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One classification output for a region, e.g. the "color" head of a
/// vehicle attributes model.
///
/// The history treats it as opaque: it is stored, cloned and attached back
/// to regions, never interpreted. `name` identifies the output so the same
/// result is not attached twice to one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTensor {
    /// Output name, unique per region
    pub name: String,
    /// Model that produced the output
    pub model_name: Option<String>,
    /// Output layer of the model
    pub layer_name: Option<String>,
    /// Selected label, if the output was decoded
    pub label: Option<String>,
    /// Index of the selected label
    pub label_id: Option<usize>,
    /// Confidence of the selected label
    pub confidence: f32,
    /// Raw output values
    pub data: Array1<f32>,
}

impl ClassificationTensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_name: None,
            layer_name: None,
            label: None,
            label_id: None,
            confidence: 0.0,
            data: Array1::zeros(0),
        }
    }

    /// Index and value of the largest output, ignoring NaNs.
    pub fn argmax(&self) -> Option<(usize, f32)> {
        self.data
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best, (i, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((i, v)),
            })
    }
}
