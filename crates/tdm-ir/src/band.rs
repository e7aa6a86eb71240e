//! Spatial band specification and register slicing.
//!
//! A band spec `N = [n_0, n_1, ...]` lists how many concurrent modes each
//! spatial band (delay-line track) keeps alive. The register pool is the
//! concatenation of the bands, so band `i` owns the contiguous slice
//! starting at `n_0 + ... + n_{i-1}`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{IrError, IrResult};
use crate::mode::ModeId;

/// Concurrent-mode counts per spatial band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct BandSpec {
    sizes: Vec<u32>,
}

impl BandSpec {
    /// Create a band spec. Every band must hold at least one mode and the
    /// pool size must fit in a `u32`.
    pub fn new(sizes: impl Into<Vec<u32>>) -> IrResult<Self> {
        let sizes = sizes.into();
        if sizes.is_empty() {
            return Err(IrError::InvalidBandSpec(
                "at least one spatial band is required".into(),
            ));
        }
        if let Some(pos) = sizes.iter().position(|&n| n == 0) {
            return Err(IrError::InvalidBandSpec(format!(
                "band {pos} has no concurrent modes"
            )));
        }
        if sizes.iter().try_fold(0u32, |acc, &n| acc.checked_add(n)).is_none() {
            return Err(IrError::InvalidBandSpec(format!(
                "total of {} concurrent modes exceeds {}",
                sizes.iter().map(|&n| u64::from(n)).sum::<u64>(),
                u32::MAX
            )));
        }
        Ok(Self { sizes })
    }

    /// A single band with `n` concurrent modes.
    pub fn single(n: u32) -> IrResult<Self> {
        Self::new(vec![n])
    }

    /// Per-band sizes.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Number of spatial bands.
    pub fn num_bands(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of concurrent modes, i.e. the register pool size.
    pub fn concurrent_modes(&self) -> u32 {
        self.sizes.iter().sum()
    }

    /// Contiguous register index range of every band.
    pub fn slices(&self) -> Vec<Range<usize>> {
        let mut start = 0usize;
        self.sizes
            .iter()
            .map(|&n| {
                let range = start..start + n as usize;
                start = range.end;
                range
            })
            .collect()
    }

    /// Index of the band that owns `mode`, if it is inside the pool.
    pub fn band_of(&self, mode: ModeId) -> Option<usize> {
        self.slices()
            .iter()
            .position(|range| range.contains(&mode.index()))
    }
}

impl TryFrom<Vec<u32>> for BandSpec {
    type Error = IrError;

    fn try_from(sizes: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

impl From<BandSpec> for Vec<u32> {
    fn from(spec: BandSpec) -> Self {
        spec.sizes
    }
}
