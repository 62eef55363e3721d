//! Per-object classification result cache for tracked video analytics.
//!
//! For every tracked region in a frame, [`ClassificationHistory`] decides
//! whether a classification inference call is needed or whether the result
//! stored for the region's track identifier can be reused. The history is
//! bounded, evicts least-recently-seen tracks, expires results after a
//! configurable number of frames, detects identifiers recycled by the tracker,
//! and keeps at most one classification in flight per track.

pub mod error;
pub mod history;
pub mod integration;
pub mod roi;

pub use error::{HistoryError, PipelineError};
pub use history::{
    ClassificationHistory, Decision, Dispatch, EntryState, GapFrom, HistoryConfig, HistoryStats,
    LruCache, PendingPolicy, ReusePolicy, RoiHistory,
};
pub use integration::{Classifier, ClassifyPipeline, FrameReport, TensorBuilder};
pub use roi::{ClassificationTensor, Rect, RegionOfInterest, TrackId, VideoFrame};
