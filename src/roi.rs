//! Frame, region and classification-result types.
//!
//! These model the media buffer and its attached metadata just far enough
//! for the classification history to read track identifiers and attach
//! cached results.

mod frame;
mod rect;
mod region;
mod tensor;

pub use frame::VideoFrame;
pub use rect::Rect;
pub use region::{RegionOfInterest, TrackId};
pub use tensor::ClassificationTensor;
