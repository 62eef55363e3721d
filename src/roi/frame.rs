use crate::roi::region::RegionOfInterest;

/// A video frame reduced to what classification needs: its sequence number
/// and the regions detected in it.
#[derive(Debug, Clone, Default)]
pub struct VideoFrame {
    /// Monotonically increasing frame counter
    pub number: u64,
    /// Regions of interest in detection order
    pub regions: Vec<RegionOfInterest>,
}

impl VideoFrame {
    pub fn with_regions(number: u64, regions: Vec<RegionOfInterest>) -> Self {
        Self { number, regions }
    }
}
