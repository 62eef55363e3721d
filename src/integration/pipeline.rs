//! ClassifyPipeline for combining a classifier with the classification history.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::history::{ClassificationHistory, Decision, HistoryConfig};
use crate::roi::VideoFrame;

use super::Classifier;

/// Per-frame summary returned by [`ClassifyPipeline::process_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Regions sent to the classifier
    pub classified: usize,
    /// Regions filled from the history
    pub reused: usize,
    /// Regions left without a result because a classification is in flight
    pub pending: usize,
    /// Regions whose classification failed
    pub failed: usize,
}

/// Runs a `Classifier` over tracked regions, skipping regions whose
/// classification can be reused from the history.
///
/// The history is created on [`start`](Self::start) and discarded on
/// [`stop`](Self::stop), mirroring the lifetime of a media pipeline element.
pub struct ClassifyPipeline<C: Classifier> {
    classifier: C,
    config: HistoryConfig,
    history: Option<Arc<ClassificationHistory>>,
}

impl<C: Classifier> ClassifyPipeline<C> {
    /// Create a new classification pipeline with the given classifier and history config.
    pub fn new(classifier: C, config: HistoryConfig) -> Self {
        Self {
            classifier,
            config,
            history: None,
        }
    }

    /// Create a new classification pipeline with default history configuration.
    pub fn with_default_config(classifier: C) -> Self {
        Self::new(classifier, HistoryConfig::default())
    }

    /// Create the history. Starting an already started pipeline keeps the
    /// existing history.
    pub fn start(&mut self) -> Result<Arc<ClassificationHistory>, PipelineError> {
        if let Some(history) = &self.history {
            return Ok(Arc::clone(history));
        }
        let history = Arc::new(ClassificationHistory::new(self.config.clone())?);
        self.history = Some(Arc::clone(&history));
        info!("classification pipeline started");
        Ok(history)
    }

    /// Release the history and every entry in it.
    pub fn stop(&mut self) {
        if let Some(history) = self.history.take() {
            history.clear();
            info!("classification pipeline stopped");
        }
    }

    pub fn is_started(&self) -> bool {
        self.history.is_some()
    }

    /// Classify the regions of a frame.
    ///
    /// Each region is decided against the history; regions needing a result
    /// go through the classifier and their results are stored, the others
    /// get the cached result attached. A classifier failure is logged and
    /// counted, and the track is released for re-dispatch on a later frame.
    pub fn process_frame(&mut self, frame: &mut VideoFrame) -> Result<FrameReport, PipelineError> {
        let history = self.history.as_ref().ok_or(PipelineError::NotStarted)?;
        let mut report = FrameReport::default();

        for idx in 0..frame.regions.len() {
            let roi = &frame.regions[idx];
            let dispatch = match history.decide(roi, frame.number) {
                Decision::Reuse => continue,
                Decision::Pending => {
                    report.pending += 1;
                    continue;
                }
                Decision::Classify(dispatch) => dispatch,
            };

            let track_id = roi.track_id;
            match self.classifier.classify(frame, roi) {
                Ok(tensors) => {
                    if let Some(dispatch) = dispatch {
                        history.update_dispatched(dispatch, tensors.clone());
                    }
                    let roi = &mut frame.regions[idx];
                    for tensor in tensors {
                        roi.add_tensor(tensor);
                    }
                    report.classified += 1;
                }
                Err(err) => {
                    warn!(frame = frame.number, ?track_id, error = %err, "classification failed");
                    if let Some(dispatch) = dispatch {
                        history.abandon_dispatched(dispatch);
                    }
                    report.failed += 1;
                }
            }
        }

        report.reused = history.fill_roi_params(frame);
        Ok(report)
    }

    /// Get a reference to the history, if the pipeline is started.
    pub fn history(&self) -> Option<&Arc<ClassificationHistory>> {
        self.history.as_ref()
    }

    /// Get a reference to the underlying classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Get a mutable reference to the underlying classifier.
    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }
}
