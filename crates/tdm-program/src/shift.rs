//! Register shift policies and the logical-to-physical mode permutation.
//!
//! At the end of every time bin the program reassigns logical roles to the
//! physical registers of its pool instead of allocating fresh ones. A
//! measured mode's slot is vacated and refilled by a new input mode, which is
//! what a delay loop does physically.

use serde::{Deserialize, Serialize};
use std::fmt;

use tdm_ir::{BandSpec, ModeId};

/// How the register pool is shifted between time bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ShiftRepr", into = "ShiftRepr")]
pub enum ShiftPolicy {
    /// Rotate each spatial band's window left by one, independently per band.
    #[default]
    Default,
    /// Rotate the whole flat register list left by this many positions
    /// (negative values rotate right).
    By(i64),
}

impl fmt::Display for ShiftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftPolicy::Default => f.write_str("default"),
            ShiftPolicy::By(n) => write!(f, "{n}"),
        }
    }
}

/// Wire form: the string `"default"` or an integer.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ShiftRepr {
    Amount(i64),
    Name(String),
}

impl TryFrom<ShiftRepr> for ShiftPolicy {
    type Error = String;

    fn try_from(repr: ShiftRepr) -> Result<Self, Self::Error> {
        match repr {
            ShiftRepr::Amount(n) => Ok(ShiftPolicy::By(n)),
            ShiftRepr::Name(name) if name == "default" => Ok(ShiftPolicy::Default),
            ShiftRepr::Name(name) => Err(format!(
                "unknown shift policy '{name}', expected \"default\" or an integer"
            )),
        }
    }
}

impl From<ShiftPolicy> for ShiftRepr {
    fn from(policy: ShiftPolicy) -> Self {
        match policy {
            ShiftPolicy::Default => ShiftRepr::Name("default".into()),
            ShiftPolicy::By(n) => ShiftRepr::Amount(n),
        }
    }
}

/// Mapping from logical slot (the index used in the rolled circuit) to the
/// physical register that plays that role at a given time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModePermutation {
    slots: Vec<ModeId>,
}

impl ModePermutation {
    /// The identity permutation over `size` registers.
    pub fn identity(size: u32) -> Self {
        Self {
            slots: (0..size).map(ModeId).collect(),
        }
    }

    /// The permutation in effect during `time_step`.
    ///
    /// Equivalent to starting from the identity and applying the shift
    /// policy once per completed time bin, computed in closed form.
    pub fn at_step(time_step: usize, policy: ShiftPolicy, bands: &BandSpec) -> Self {
        let size = bands.concurrent_modes() as usize;
        let slots = match policy {
            ShiftPolicy::Default => bands
                .slices()
                .into_iter()
                .flat_map(|range| {
                    let (start, len) = (range.start, range.len());
                    range.map(move |slot| ModeId::from(start + (slot - start + time_step) % len))
                })
                .collect(),
            ShiftPolicy::By(n) => {
                let offset = rotation_offset(n, time_step, size);
                (0..size)
                    .map(|slot| ModeId::from((slot + offset) % size))
                    .collect()
            }
        };
        Self { slots }
    }

    /// Physical register for a logical slot.
    ///
    /// Panics if `logical` lies outside the pool; commands are range-checked
    /// when they are appended, so this only fires on a broken invariant.
    #[inline]
    pub fn apply(&self, logical: ModeId) -> ModeId {
        self.slots[logical.index()]
    }

    /// Map a command's logical modes to physical registers.
    pub fn map_modes(&self, logical: &[ModeId]) -> Vec<ModeId> {
        logical.iter().map(|&m| self.apply(m)).collect()
    }

    /// Apply one end-of-time-bin shift in place.
    pub fn advance(&mut self, policy: ShiftPolicy, bands: &BandSpec) {
        match policy {
            ShiftPolicy::Default => {
                for range in bands.slices() {
                    self.slots[range].rotate_left(1);
                }
            }
            ShiftPolicy::By(n) => {
                let offset = rotation_offset(n, 1, self.slots.len());
                self.slots.rotate_left(offset);
            }
        }
    }

    /// Slot-to-register table.
    pub fn as_slice(&self) -> &[ModeId] {
        &self.slots
    }

    /// Number of registers in the pool.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Left-rotation after `steps` shifts of `n`, reduced modulo the pool size.
fn rotation_offset(n: i64, steps: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let size_i = size as i128;
    let per_step = i128::from(n).rem_euclid(size_i);
    let steps = (steps as i128).rem_euclid(size_i);
    ((per_step * steps) % size_i) as usize
}
