//! Classification history configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::HistoryError;

/// Number of tracks remembered by default.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Frame the identifier-reuse gap is counted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapFrom {
    /// Last stored result, or the dispatch in flight if newer. A long-lived
    /// identifier is re-verified every `max_gap` frames even while visible.
    #[default]
    LastUpdate,
    /// Last decision call that saw the identifier. Only an identifier that
    /// disappears for `max_gap` frames is treated as reused.
    LastSighting,
}

/// How a track identifier is recognised as handed to a different object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReusePolicy {
    /// Frames past the `gap_from` anchor after which the identifier is
    /// treated as reused, 0 disables.
    pub max_gap: u64,
    pub gap_from: GapFrom,
    /// IoU between consecutive sightings below which the identifier is
    /// treated as reused, 0.0 disables.
    pub min_iou: f32,
    /// Trust the tracker's new-track flag on regions.
    pub honor_new_track_flag: bool,
}

impl Default for ReusePolicy {
    fn default() -> Self {
        Self {
            max_gap: 30,
            gap_from: GapFrom::LastUpdate,
            min_iou: 0.0,
            honor_new_track_flag: true,
        }
    }
}

/// What a decision does when the track already has a classification in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PendingPolicy {
    /// Block until the result lands. A dispatch older than `timeout_ms` is
    /// considered lost and the waiting caller takes it over.
    Wait { timeout_ms: u64 },
    /// Return immediately; the region gets no result this frame.
    Skip,
}

impl PendingPolicy {
    pub fn wait(timeout: Duration) -> Self {
        Self::Wait {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::Wait { timeout_ms } => Some(Duration::from_millis(*timeout_ms)),
            Self::Skip => None,
        }
    }
}

impl Default for PendingPolicy {
    fn default() -> Self {
        Self::Wait { timeout_ms: 5_000 }
    }
}

/// Configuration for the ClassificationHistory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of tracks remembered
    pub capacity: usize,
    /// Frames a result stays reusable, 0 classifies each track once
    pub reclassify_interval: u64,
    pub reuse: ReusePolicy,
    pub pending: PendingPolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_SIZE,
            reclassify_interval: 1,
            reuse: ReusePolicy::default(),
            pending: PendingPolicy::default(),
        }
    }
}

impl HistoryConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// ```toml
    /// capacity = 200
    /// reclassify_interval = 10
    ///
    /// [reuse]
    /// max_gap = 60
    ///
    /// [pending]
    /// mode = "skip"
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, HistoryError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_reclassify_interval(mut self, interval: u64) -> Self {
        self.reclassify_interval = interval;
        self
    }

    pub fn with_reuse_policy(mut self, reuse: ReusePolicy) -> Self {
        self.reuse = reuse;
        self
    }

    pub fn with_pending_policy(mut self, pending: PendingPolicy) -> Self {
        self.pending = pending;
        self
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        if !(0.0..=1.0).contains(&self.reuse.min_iou) {
            return Err(HistoryError::InvalidIou(self.reuse.min_iou));
        }
        if self.pending == (PendingPolicy::Wait { timeout_ms: 0 }) {
            return Err(HistoryError::ZeroWaitTimeout);
        }
        Ok(())
    }
}
