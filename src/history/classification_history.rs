//! Decides per tracked region whether classification must run, and keeps the
//! results that let it be skipped.

use std::ops::Deref;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::HistoryError;
use crate::history::config::{HistoryConfig, PendingPolicy};
use crate::history::entry::RoiHistory;
use crate::history::lru_cache::LruCache;
use crate::roi::{ClassificationTensor, RegionOfInterest, TrackId, VideoFrame};

/// Token for one classification handed out by [`ClassificationHistory::decide`].
///
/// Reporting a result through it only completes this dispatch, never a newer
/// one made for the same track after a timeout takeover or identity reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub track_id: TrackId,
    /// Unique within one history
    pub id: u64,
    /// Frame the classification runs on
    pub frame: u64,
}

impl Dispatch {
    fn issue(next_id: &mut u64, track_id: TrackId, entry: &mut RoiHistory, frame: u64) -> Self {
        *next_id += 1;
        entry.dispatch(*next_id, frame);
        Self {
            track_id,
            id: *next_id,
            frame,
        }
    }
}

/// Outcome of a classification decision for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run inference and report the result through `update_dispatched`.
    /// Untracked regions carry no dispatch.
    Classify(Option<Dispatch>),
    /// A cached result is attached by `fill_roi_params`.
    Reuse,
    /// Another dispatch for this track is in flight; nothing to do this frame.
    Pending,
}

impl Decision {
    pub fn is_needed(self) -> bool {
        matches!(self, Self::Classify(_))
    }

    pub fn dispatch(self) -> Option<Dispatch> {
        match self {
            Self::Classify(dispatch) => dispatch,
            _ => None,
        }
    }
}

/// Counters describing what the history decided so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Dispatches handed out, including untracked regions
    pub classified: u64,
    /// Decisions served from a cached result
    pub reused: u64,
    /// Decisions answered `Pending` under the skip policy
    pub skipped: u64,
    /// Entries reset because the tracker reused their identifier
    pub reassigned: u64,
    /// Entries dropped by capacity overflow
    pub evicted: u64,
    /// Dispatches taken over after the wait timeout
    pub timed_out: u64,
    /// Dispatches reported failed through `abandon`
    pub abandoned: u64,
}

struct State {
    cache: LruCache<TrackId, RoiHistory>,
    latest_frame: u64,
    next_dispatch: u64,
    stats: HistoryStats,
}

/// Read-only view of the underlying cache, holding the history lock.
pub struct HistoryView<'a>(MappedMutexGuard<'a, LruCache<TrackId, RoiHistory>>);

impl Deref for HistoryView<'_> {
    type Target = LruCache<TrackId, RoiHistory>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bounded, thread-safe classification history keyed by track identifier.
///
/// One lock guards the cache and its counters; it is never held while
/// inference runs. A condition variable wakes callers waiting on an
/// in-flight classification of the same track, so each track has at most
/// one classification outstanding at a time.
pub struct ClassificationHistory {
    config: HistoryConfig,
    state: Mutex<State>,
    landed: Condvar,
}

impl ClassificationHistory {
    pub fn new(config: HistoryConfig) -> Result<Self, HistoryError> {
        config.validate()?;
        info!(
            capacity = config.capacity,
            reclassify_interval = config.reclassify_interval,
            "classification history created"
        );
        Ok(Self::from_config(config))
    }

    pub fn with_default_config() -> Self {
        Self::from_config(HistoryConfig::default())
    }

    fn from_config(config: HistoryConfig) -> Self {
        Self {
            state: Mutex::new(State {
                cache: LruCache::new(config.capacity),
                latest_frame: 0,
                next_dispatch: 0,
                stats: HistoryStats::default(),
            }),
            landed: Condvar::new(),
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Whether `roi` must be classified at `current_frame`.
    ///
    /// `false` covers both a reusable cached result and a classification
    /// already in flight under [`PendingPolicy::Skip`].
    pub fn is_roi_classification_needed(&self, roi: &RegionOfInterest, current_frame: u64) -> bool {
        self.decide(roi, current_frame).is_needed()
    }

    /// Decide what to do with `roi` at `current_frame`.
    ///
    /// Untracked regions always classify and never touch the cache. For
    /// tracked regions the lookup refreshes recency, detects identifier
    /// reuse, then either hands out a dispatch, reuses the stored result, or
    /// handles an in-flight dispatch according to the pending policy. A
    /// `Classify` answer obliges the caller to report back through
    /// [`update_dispatched`](Self::update_dispatched) or
    /// [`abandon_dispatched`](Self::abandon_dispatched).
    pub fn decide(&self, roi: &RegionOfInterest, current_frame: u64) -> Decision {
        let Some(track_id) = roi.track_id else {
            self.state.lock().stats.classified += 1;
            return Decision::Classify(None);
        };

        let mut state = self.state.lock();
        state.latest_frame = state.latest_frame.max(current_frame);

        if !state.cache.contains(&track_id) {
            debug!(track_id, current_frame, "new track");
            return self.start_tracking(&mut state, track_id, roi, current_frame);
        }
        self.check_existing_and_readd_object_id(&mut state, track_id, roi, current_frame);

        loop {
            let st = &mut *state;
            let Some(entry) = st.cache.get_mut(&track_id) else {
                // evicted or cleared while waiting
                return self.start_tracking(st, track_id, roi, current_frame);
            };
            entry.sight(roi, current_frame);

            let deadline = match (entry.in_flight, self.config.pending) {
                (None, _) => {
                    if entry.is_fresh(current_frame, self.config.reclassify_interval) {
                        entry.reuse_frame = Some(current_frame);
                        st.stats.reused += 1;
                        return Decision::Reuse;
                    }
                    debug!(
                        track_id,
                        current_frame,
                        last_update = entry.frame_of_last_update,
                        "classification stale or missing"
                    );
                    let dispatch =
                        Dispatch::issue(&mut st.next_dispatch, track_id, entry, current_frame);
                    st.stats.classified += 1;
                    return Decision::Classify(Some(dispatch));
                }
                (Some(_), PendingPolicy::Skip) => {
                    st.stats.skipped += 1;
                    return Decision::Pending;
                }
                (Some(in_flight), PendingPolicy::Wait { timeout_ms }) => {
                    let deadline = in_flight
                        .since
                        .checked_add(Duration::from_millis(timeout_ms));
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        warn!(
                            track_id,
                            dispatched_for = in_flight.frame,
                            current_frame,
                            "classification result not delivered in time, re-dispatching"
                        );
                        let dispatch =
                            Dispatch::issue(&mut st.next_dispatch, track_id, entry, current_frame);
                        st.stats.timed_out += 1;
                        st.stats.classified += 1;
                        return Decision::Classify(Some(dispatch));
                    }
                    deadline
                }
            };

            debug!(track_id, current_frame, "waiting for in-flight classification");
            match deadline {
                Some(deadline) => {
                    self.landed.wait_until(&mut state, deadline);
                }
                None => self.landed.wait(&mut state),
            }
        }
    }

    /// Reset the entry for `track_id` if the tracker appears to have handed
    /// the identifier to a different object. Returns whether it did.
    ///
    /// Signals are only evaluated against sightings from earlier frames, so
    /// several regions or threads deciding the same frame never reset each
    /// other. The gap is counted from the anchor chosen by
    /// [`ReusePolicy::gap_from`](crate::history::ReusePolicy::gap_from).
    fn check_existing_and_readd_object_id(
        &self,
        state: &mut State,
        track_id: TrackId,
        roi: &RegionOfInterest,
        current_frame: u64,
    ) -> bool {
        let policy = self.config.reuse;
        let Some(entry) = state.cache.get_mut(&track_id) else {
            return false;
        };
        if current_frame <= entry.frame_of_last_sighting {
            return false;
        }

        let gap = current_frame.saturating_sub(entry.gap_anchor(policy.gap_from));
        let reason = if policy.honor_new_track_flag && roi.new_track {
            "tracker flagged new track"
        } else if policy.max_gap > 0 && gap > policy.max_gap {
            "identifier unseen too long"
        } else if policy.min_iou > 0.0
            && entry
                .last_rect
                .is_some_and(|rect| rect.iou(&roi.rect) < policy.min_iou)
        {
            "region jumped"
        } else {
            return false;
        };

        let was_in_flight = entry.in_flight.is_some();
        let fresh = entry.reassigned(current_frame);
        state.cache.remove(&track_id);
        state.cache.put(track_id, fresh);
        state.stats.reassigned += 1;
        debug!(track_id, gap, reason, "track identifier reused, history reset");

        if was_in_flight {
            self.landed.notify_all();
        }
        true
    }

    fn start_tracking(
        &self,
        state: &mut State,
        track_id: TrackId,
        roi: &RegionOfInterest,
        current_frame: u64,
    ) -> Decision {
        let mut entry = RoiHistory::new(current_frame);
        entry.sight(roi, current_frame);
        let dispatch = Dispatch::issue(&mut state.next_dispatch, track_id, &mut entry, current_frame);
        self.insert(state, track_id, entry);
        state.stats.classified += 1;
        Decision::Classify(Some(dispatch))
    }

    fn insert(&self, state: &mut State, track_id: TrackId, entry: RoiHistory) {
        let Some((evicted_id, evicted)) = state.cache.put(track_id, entry) else {
            return;
        };
        state.stats.evicted += 1;
        debug!(track_id = evicted_id, "evicted least recently used track");
        if evicted.in_flight.is_some() {
            // waiters on the evicted track must re-evaluate
            self.landed.notify_all();
        }
    }

    /// Store a fresh classification result for `track_id`.
    ///
    /// Creates the entry if it was evicted meanwhile. The result is dated to
    /// the frame of whatever dispatch is in flight and completes it; later
    /// writes win. Callers holding a [`Dispatch`] should prefer
    /// [`update_dispatched`](Self::update_dispatched).
    pub fn update_roi_params(&self, track_id: TrackId, tensors: Vec<ClassificationTensor>) {
        let mut state = self.state.lock();
        let st = &mut *state;
        let latest = st.latest_frame;

        match st.cache.get_mut(&track_id) {
            Some(entry) => entry.store(tensors, latest),
            None => {
                debug!(track_id, "result for untracked history entry, re-adding");
                let mut entry = RoiHistory::new(latest);
                entry.store(tensors, latest);
                self.insert(st, track_id, entry);
            }
        }
        drop(state);
        self.landed.notify_all();
    }

    /// Store the result of `dispatch`, dated to the frame it was made for.
    ///
    /// The tensors are written even when the dispatch was superseded by a
    /// timeout takeover or identity reset (last write wins), but only the
    /// dispatch still in flight is completed and its waiters woken.
    pub fn update_dispatched(&self, dispatch: Dispatch, tensors: Vec<ClassificationTensor>) {
        let Dispatch { track_id, id, frame } = dispatch;
        let mut state = self.state.lock();
        let st = &mut *state;

        let completed = match st.cache.get_mut(&track_id) {
            Some(entry) => entry.store_dispatched(id, frame, tensors),
            None => {
                debug!(track_id, "result for untracked history entry, re-adding");
                let mut entry = RoiHistory::new(frame);
                entry.store_dispatched(id, frame, tensors);
                self.insert(st, track_id, entry);
                true
            }
        };
        drop(state);

        if completed {
            self.landed.notify_all();
        } else {
            debug!(track_id, dispatched_for = frame, "result of a superseded dispatch stored");
        }
    }

    /// Report that `dispatch` failed. A superseded dispatch is ignored.
    pub fn abandon_dispatched(&self, dispatch: Dispatch) {
        let mut state = self.state.lock();
        let st = &mut *state;
        let Some(entry) = st.cache.peek_mut(&dispatch.track_id) else {
            return;
        };
        if !entry.in_flight.is_some_and(|f| f.id == dispatch.id) {
            return;
        }
        entry.in_flight = None;
        st.stats.abandoned += 1;
        debug!(track_id = dispatch.track_id, "classification abandoned");
        drop(state);
        self.landed.notify_all();
    }

    /// Report that the classification dispatched for `track_id` failed.
    ///
    /// The entry keeps its previous result but the next decision dispatches
    /// again; waiters are released to do so.
    pub fn abandon(&self, track_id: TrackId) {
        let mut state = self.state.lock();
        let st = &mut *state;
        if let Some(entry) = st.cache.peek_mut(&track_id) {
            if entry.in_flight.take().is_some() {
                st.stats.abandoned += 1;
                debug!(track_id, "classification abandoned");
            }
        }
        drop(state);
        self.landed.notify_all();
    }

    /// Attach cached results to every region of `frame` whose last decision
    /// for this frame was [`Decision::Reuse`]. Returns the number of regions
    /// filled.
    ///
    /// Tensors are cloned out; recency is not affected.
    pub fn fill_roi_params(&self, frame: &mut VideoFrame) -> usize {
        let number = frame.number;
        let state = self.state.lock();
        let mut filled = 0;

        for roi in &mut frame.regions {
            let Some(entry) = roi.track_id.and_then(|id| state.cache.peek(&id)) else {
                continue;
            };
            if !entry.updated || entry.reuse_frame != Some(number) {
                continue;
            }
            for tensor in &entry.tensors {
                roi.add_tensor(tensor.clone());
            }
            filled += 1;
        }
        filled
    }

    /// Locked view of the underlying cache, for diagnostics.
    pub fn history(&self) -> HistoryView<'_> {
        HistoryView(MutexGuard::map(self.state.lock(), |s| &mut s.cache))
    }

    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> HistoryStats {
        self.state.lock().stats
    }

    /// Drop every entry. Callers waiting on an in-flight classification
    /// re-evaluate and dispatch themselves.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.cache.len();
        state.cache.clear();
        state.latest_frame = 0;
        drop(state);
        self.landed.notify_all();
        info!(dropped, "classification history cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::config::{GapFrom, ReusePolicy};
    use crate::history::entry_state::EntryState;
    use crate::roi::Rect;

    fn roi(track_id: TrackId) -> RegionOfInterest {
        RegionOfInterest::tracked(track_id, Rect::new(10.0, 10.0, 50.0, 50.0), 0.9)
    }

    fn tensor(name: &str, label: &str) -> ClassificationTensor {
        let mut t = ClassificationTensor::new(name);
        t.label = Some(label.to_string());
        t
    }

    fn history(interval: u64) -> ClassificationHistory {
        ClassificationHistory::new(
            HistoryConfig::default()
                .with_reclassify_interval(interval)
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap()
    }

    #[test]
    fn test_untracked_always_classifies() {
        let history = history(10);
        let untracked = RegionOfInterest::new(Rect::default(), 0.5);

        for frame in 0..5 {
            assert_eq!(history.decide(&untracked, frame), Decision::Classify(None));
        }
        assert!(history.is_empty());
    }

    #[test]
    fn test_new_track_creates_pending_entry() {
        let history = history(10);
        assert!(history.is_roi_classification_needed(&roi(1), 1));
        assert_eq!(history.len(), 1);

        let view = history.history();
        let entry = view.peek(&1).unwrap();
        assert_eq!(entry.state(1, 10), EntryState::Pending);
        assert!(entry.in_flight.is_some());
    }

    #[test]
    fn test_reuse_within_interval() {
        let history = history(5);
        assert!(history.decide(&roi(1), 10).is_needed());
        history.update_roi_params(1, vec![tensor("color", "red")]);

        assert_eq!(history.decide(&roi(1), 11), Decision::Reuse);
        assert_eq!(history.decide(&roi(1), 14), Decision::Reuse);
        assert!(history.decide(&roi(1), 15).is_needed());
    }

    #[test]
    fn test_interval_zero_classifies_once() {
        let history = history(0);
        assert!(history.decide(&roi(1), 1).is_needed());
        history.update_roi_params(1, vec![tensor("color", "red")]);

        for frame in 2..20 {
            assert_eq!(history.decide(&roi(1), frame), Decision::Reuse);
        }
    }

    #[test]
    fn test_skip_policy_reports_pending() {
        let history = history(5);
        assert!(history.decide(&roi(1), 1).is_needed());
        assert_eq!(history.decide(&roi(1), 2), Decision::Pending);
        assert_eq!(history.stats().skipped, 1);

        history.update_roi_params(1, vec![tensor("color", "red")]);
        assert_eq!(history.decide(&roi(1), 3), Decision::Reuse);
    }

    #[test]
    fn test_abandon_allows_redispatch() {
        let history = history(5);
        assert!(history.decide(&roi(1), 1).is_needed());
        history.abandon(1);
        assert!(history.decide(&roi(1), 2).is_needed());
        assert_eq!(history.stats().abandoned, 1);
    }

    #[test]
    fn test_update_is_dated_to_dispatch_frame() {
        let history = history(3);
        assert!(history.decide(&roi(1), 10).is_needed());
        // result arrives while frame 12 is being decided for other tracks
        history.decide(&roi(2), 12);
        history.update_roi_params(1, vec![tensor("color", "red")]);

        let view = history.history();
        assert_eq!(view.peek(&1).unwrap().frame_of_last_update, 10);
    }

    #[test]
    fn test_update_recreates_evicted_entry() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_capacity(1)
                .with_reclassify_interval(5)
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(1), 1);
        history.decide(&roi(2), 1);
        assert_eq!(history.stats().evicted, 1);

        history.update_roi_params(1, vec![tensor("color", "red")]);
        assert_eq!(history.len(), 1);
        assert!(history.history().contains(&1));
        assert_eq!(history.decide(&roi(1), 2), Decision::Reuse);
    }

    #[test]
    fn test_new_track_flag_resets_entry() {
        let history = history(100);
        history.decide(&roi(4), 1);
        history.update_roi_params(4, vec![tensor("type", "truck")]);

        let reassigned = roi(4).with_new_track(true);
        assert!(history.decide(&reassigned, 2).is_needed());
        // same frame again does not reset a second time
        history.update_roi_params(4, vec![tensor("type", "bus")]);
        assert_eq!(history.decide(&reassigned, 2), Decision::Reuse);
        assert_eq!(history.stats().reassigned, 1);

        let view = history.history();
        assert_eq!(view.peek(&4).unwrap().epoch, 1);
    }

    #[test]
    fn test_result_of_reset_identity_does_not_complete_new_dispatch() {
        let history = history(100);
        let old = history.decide(&roi(3), 1).dispatch().unwrap();
        let new = history
            .decide(&roi(3).with_new_track(true), 2)
            .dispatch()
            .unwrap();
        assert_ne!(old, new);

        // the previous object's result lands late
        history.update_dispatched(old, vec![tensor("type", "old-object")]);
        assert_eq!(history.decide(&roi(3), 2), Decision::Pending);
        {
            let view = history.history();
            let entry = view.peek(&3).unwrap();
            assert_eq!(entry.in_flight.map(|f| f.frame), Some(2));
            assert_eq!(entry.frame_of_last_update, 1);
        }

        history.update_dispatched(new, vec![tensor("type", "new-object")]);
        let mut frame = VideoFrame::with_regions(3, vec![roi(3)]);
        assert_eq!(history.decide(&frame.regions[0], 3), Decision::Reuse);
        history.fill_roi_params(&mut frame);
        assert_eq!(frame.regions[0].tensors, vec![tensor("type", "new-object")]);
    }

    #[test]
    fn test_abandon_of_superseded_dispatch_is_ignored() {
        let history = history(100);
        let old = history.decide(&roi(3), 1).dispatch().unwrap();
        history.decide(&roi(3).with_new_track(true), 2);

        history.abandon_dispatched(old);
        assert_eq!(history.stats().abandoned, 0);
        assert_eq!(history.decide(&roi(3), 2), Decision::Pending);
    }

    #[test]
    fn test_gap_counts_from_last_update() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_reclassify_interval(0)
                .with_reuse_policy(ReusePolicy {
                    max_gap: 10,
                    ..ReusePolicy::default()
                })
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(1), 100);
        history.update_roi_params(1, vec![tensor("type", "car")]);
        assert_eq!(history.decide(&roi(1), 105), Decision::Reuse);
        assert_eq!(history.decide(&roi(1), 110), Decision::Reuse);
        // seen every few frames, but the result is 11 frames old
        assert!(history.decide(&roi(1), 111).is_needed());
        assert_eq!(history.stats().reassigned, 1);
    }

    #[test]
    fn test_gap_from_last_sighting_keeps_visible_track() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_reclassify_interval(0)
                .with_reuse_policy(ReusePolicy {
                    max_gap: 10,
                    gap_from: GapFrom::LastSighting,
                    ..ReusePolicy::default()
                })
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(1), 100);
        history.update_roi_params(1, vec![tensor("type", "car")]);
        for frame in (105..=150).step_by(5) {
            assert_eq!(history.decide(&roi(1), frame), Decision::Reuse);
        }
        assert!(history.decide(&roi(1), 161).is_needed());
        assert_eq!(history.stats().reassigned, 1);
    }

    #[test]
    fn test_in_flight_dispatch_anchors_gap() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_reclassify_interval(5)
                .with_reuse_policy(ReusePolicy {
                    max_gap: 10,
                    ..ReusePolicy::default()
                })
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(1), 1);
        history.update_roi_params(1, vec![tensor("type", "car")]);
        assert!(history.decide(&roi(1), 8).is_needed());
        // slow inference: still pending 5 frames after its dispatch
        assert_eq!(history.decide(&roi(1), 13), Decision::Pending);
        assert_eq!(history.stats().reassigned, 0);
    }

    #[test]
    fn test_spatial_jump_resets_entry() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_reclassify_interval(100)
                .with_reuse_policy(ReusePolicy {
                    min_iou: 0.3,
                    ..ReusePolicy::default()
                })
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(9), 1);
        history.update_roi_params(9, vec![tensor("type", "car")]);

        let moved_a_little = RegionOfInterest::tracked(9, Rect::new(12.0, 12.0, 50.0, 50.0), 0.9);
        assert_eq!(history.decide(&moved_a_little, 2), Decision::Reuse);

        let elsewhere = RegionOfInterest::tracked(9, Rect::new(400.0, 300.0, 50.0, 50.0), 0.9);
        assert!(history.decide(&elsewhere, 3).is_needed());
        assert_eq!(history.stats().reassigned, 1);
    }

    #[test]
    fn test_fill_only_for_reused_regions_of_that_frame() {
        let history = history(5);
        history.decide(&roi(1), 1);
        history.update_roi_params(1, vec![tensor("color", "red")]);

        let mut frame = VideoFrame::with_regions(2, vec![roi(1), roi(2)]);
        assert_eq!(history.decide(&frame.regions[0], 2), Decision::Reuse);
        assert!(history.decide(&frame.regions[1], 2).is_needed());

        assert_eq!(history.fill_roi_params(&mut frame), 1);
        assert_eq!(frame.regions[0].tensors, vec![tensor("color", "red")]);
        assert!(frame.regions[1].tensors.is_empty());

        // a frame the decision was not made for gets nothing
        let mut other = VideoFrame::with_regions(3, vec![roi(1)]);
        assert_eq!(history.fill_roi_params(&mut other), 0);
    }

    #[test]
    fn test_fill_does_not_touch_recency() {
        let history = ClassificationHistory::new(
            HistoryConfig::default()
                .with_capacity(2)
                .with_reclassify_interval(5)
                .with_pending_policy(PendingPolicy::Skip),
        )
        .unwrap();

        history.decide(&roi(1), 1);
        history.update_roi_params(1, vec![tensor("color", "red")]);
        history.decide(&roi(2), 1);
        assert_eq!(history.decide(&roi(1), 2), Decision::Reuse);
        history.decide(&roi(2), 2);

        let mut frame = VideoFrame::with_regions(2, vec![roi(1)]);
        history.fill_roi_params(&mut frame);

        history.decide(&roi(3), 3);
        let view = history.history();
        assert!(!view.contains(&1));
        assert!(view.contains(&2));
    }

    #[test]
    fn test_clear_drops_everything() {
        let history = history(5);
        history.decide(&roi(1), 1);
        history.decide(&roi(2), 1);
        history.clear();

        assert!(history.is_empty());
        assert!(history.decide(&roi(1), 2).is_needed());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = ClassificationHistory::new(HistoryConfig::default().with_capacity(0));
        assert!(matches!(result, Err(HistoryError::ZeroCapacity)));
    }
}
