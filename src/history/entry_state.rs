/// Lifecycle of a cached track entry.
///
/// Eviction and identifier reassignment are not states: an evicted entry is
/// simply gone, and a reassigned one starts over as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Created, no classification result stored yet
    #[default]
    Pending,
    /// Holds a result young enough to reuse
    Ready,
    /// Holds a result due for refresh
    Stale,
}
