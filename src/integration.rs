//! Integration module for connecting classification backends with the
//! classification history.
//!
//! This module provides the trait an inference backend implements, a builder
//! for its outputs, and a pipeline that drives both for whole frames.

mod builder;
mod classifier;
mod pipeline;

pub use builder::TensorBuilder;
pub use classifier::Classifier;
pub use pipeline::{ClassifyPipeline, FrameReport};
