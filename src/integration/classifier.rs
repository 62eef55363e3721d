//! Trait for classification inference backends.

use crate::roi::{ClassificationTensor, RegionOfInterest, VideoFrame};

/// Trait for classification inference backends.
///
/// Implement this trait to connect any classification model to the
/// classification history.
///
/// # Example
///
/// ```ignore
/// use classify_history::{Classifier, ClassificationTensor, RegionOfInterest, VideoFrame};
///
/// struct ColorModel {
///     // Your model here
/// }
///
/// impl Classifier for ColorModel {
///     type Error = std::io::Error;
///
///     fn classify(
///         &mut self,
///         frame: &VideoFrame,
///         roi: &RegionOfInterest,
///     ) -> Result<Vec<ClassificationTensor>, Self::Error> {
///         // Crop the region, run inference, decode outputs
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Classifier {
    /// Error type for inference failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Classify a single region of `frame`.
    ///
    /// # Returns
    /// The classification outputs for the region, or an error. An empty
    /// vector is a valid result and is cached like any other.
    fn classify(
        &mut self,
        frame: &VideoFrame,
        roi: &RegionOfInterest,
    ) -> Result<Vec<ClassificationTensor>, Self::Error>;
}
