//! Per-track classification history entry.

use std::time::Instant;

use crate::history::config::GapFrom;
use crate::history::entry_state::EntryState;
use crate::roi::{ClassificationTensor, Rect, RegionOfInterest};

/// Outstanding classification dispatch for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    /// Identifier of the dispatch, unique within one history
    pub id: u64,
    /// Frame whose pixels are being classified
    pub frame: u64,
    /// When the dispatch was handed out
    pub since: Instant,
}

/// Classification history of a single tracked object.
#[derive(Debug, Clone)]
pub struct RoiHistory {
    /// Frame at which `tensors` were produced
    pub frame_of_last_update: u64,
    /// Last frame a decision call saw this identifier
    pub frame_of_last_sighting: u64,
    /// Whether a result was stored since the entry was (re)created
    pub updated: bool,
    /// Results of the last classification
    pub tensors: Vec<ClassificationTensor>,
    /// Region bounds at the last sighting
    pub last_rect: Option<Rect>,
    /// Dispatch awaiting its result
    pub in_flight: Option<InFlight>,
    /// Frame for which the last decision chose to reuse `tensors`
    pub reuse_frame: Option<u64>,
    /// Number of identity resets under this identifier
    pub epoch: u32,
}

impl RoiHistory {
    pub fn new(frame: u64) -> Self {
        Self {
            frame_of_last_update: frame,
            frame_of_last_sighting: frame,
            updated: false,
            tensors: Vec::new(),
            last_rect: None,
            in_flight: None,
            reuse_frame: None,
            epoch: 0,
        }
    }

    /// Fresh entry for an identifier the tracker handed to a new object.
    pub(crate) fn reassigned(&self, frame: u64) -> Self {
        Self {
            epoch: self.epoch.wrapping_add(1),
            ..Self::new(frame)
        }
    }

    /// Whether the stored result may be reused at `current_frame`.
    ///
    /// An interval of 0 means a result never expires.
    pub fn is_fresh(&self, current_frame: u64, reclassify_interval: u64) -> bool {
        if !self.updated {
            return false;
        }
        reclassify_interval == 0
            || current_frame.saturating_sub(self.frame_of_last_update) < reclassify_interval
    }

    pub fn state(&self, current_frame: u64, reclassify_interval: u64) -> EntryState {
        if !self.updated {
            EntryState::Pending
        } else if self.is_fresh(current_frame, reclassify_interval) {
            EntryState::Ready
        } else {
            EntryState::Stale
        }
    }

    /// Frame the identifier-reuse gap is counted from.
    pub fn gap_anchor(&self, gap_from: GapFrom) -> u64 {
        match gap_from {
            GapFrom::LastUpdate => self
                .in_flight
                .map_or(self.frame_of_last_update, |f| f.frame.max(self.frame_of_last_update)),
            GapFrom::LastSighting => self.frame_of_last_sighting,
        }
    }

    pub(crate) fn sight(&mut self, roi: &RegionOfInterest, frame: u64) {
        self.frame_of_last_sighting = self.frame_of_last_sighting.max(frame);
        self.last_rect = Some(roi.rect);
    }

    pub(crate) fn dispatch(&mut self, id: u64, frame: u64) {
        self.in_flight = Some(InFlight {
            id,
            frame,
            since: Instant::now(),
        });
        self.reuse_frame = None;
    }

    /// Store a classification result. The result is dated to the frame it was
    /// dispatched for, or `fallback_frame` when nothing was in flight.
    pub(crate) fn store(&mut self, tensors: Vec<ClassificationTensor>, fallback_frame: u64) {
        let frame = self.in_flight.take().map_or(fallback_frame, |f| f.frame);
        self.frame_of_last_update = frame;
        self.tensors = tensors;
        self.updated = true;
    }

    /// Store the result of dispatch `id`, made for `frame`.
    ///
    /// The tensors are written either way. Only the dispatch currently in
    /// flight is completed by it; a result from a dispatch that was taken
    /// over or reset leaves the newer one outstanding. Returns whether `id`
    /// was the dispatch in flight.
    pub(crate) fn store_dispatched(
        &mut self,
        id: u64,
        frame: u64,
        tensors: Vec<ClassificationTensor>,
    ) -> bool {
        let current = self.in_flight.is_some_and(|f| f.id == id);
        if current {
            self.in_flight = None;
        }
        self.frame_of_last_update = frame;
        self.tensors = tensors;
        self.updated = true;
        current
    }
}
