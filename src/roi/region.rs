//! Region of interest as produced by detection and tracking.

use crate::roi::rect::Rect;
use crate::roi::tensor::ClassificationTensor;

/// Identifier assigned to a region by the upstream object tracker.
pub type TrackId = u64;

/// Candidate object in a frame.
#[derive(Debug, Clone, Default)]
pub struct RegionOfInterest {
    /// Region bounds
    pub rect: Rect,
    /// Detection confidence score
    pub confidence: f32,
    /// Tracker identifier, `None` for untracked regions
    pub track_id: Option<TrackId>,
    /// Set by the tracker on the first frame an identifier is (re-)assigned
    pub new_track: bool,
    /// Classification results attached to this region
    pub tensors: Vec<ClassificationTensor>,
}

impl RegionOfInterest {
    /// Create an untracked region.
    pub fn new(rect: Rect, confidence: f32) -> Self {
        Self {
            rect,
            confidence,
            ..Self::default()
        }
    }

    /// Create a region carrying a tracker identifier.
    pub fn tracked(track_id: TrackId, rect: Rect, confidence: f32) -> Self {
        Self {
            track_id: Some(track_id),
            ..Self::new(rect, confidence)
        }
    }

    /// Mark the identifier as freshly assigned by the tracker.
    pub fn with_new_track(mut self, new_track: bool) -> Self {
        self.new_track = new_track;
        self
    }

    pub fn has_tensor(&self, name: &str) -> bool {
        self.tensors.iter().any(|t| t.name == name)
    }

    pub fn tensor(&self, name: &str) -> Option<&ClassificationTensor> {
        self.tensors.iter().find(|t| t.name == name)
    }

    /// Attach a tensor unless one with the same name is already present.
    ///
    /// Returns whether the tensor was attached.
    pub fn add_tensor(&mut self, tensor: ClassificationTensor) -> bool {
        if self.has_tensor(&tensor.name) {
            return false;
        }
        self.tensors.push(tensor);
        true
    }
}
