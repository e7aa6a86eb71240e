//! Register (mode) identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one quantum-mode slot in a program's fixed register pool.
///
/// Modes are never allocated or released while a program runs; the
/// time-domain engine only changes which logical role a physical mode plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ModeId(pub u32);

impl ModeId {
    /// The mode index as a `usize`, for slice indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

impl From<u32> for ModeId {
    fn from(id: u32) -> Self {
        ModeId(id)
    }
}

impl From<usize> for ModeId {
    fn from(id: usize) -> Self {
        ModeId(u32::try_from(id).expect("ModeId overflow: exceeds u32::MAX"))
    }
}

/// Build the register pool `q[0] .. q[size - 1]`.
pub fn register_pool(size: u32) -> Vec<ModeId> {
    (0..size).map(ModeId).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(format!("{}", ModeId(3)), "q[3]");
    }

    #[test]
    fn test_register_pool() {
        let pool = register_pool(3);
        assert_eq!(pool, vec![ModeId(0), ModeId(1), ModeId(2)]);
        assert!(register_pool(0).is_empty());
    }

    #[test]
    fn test_mode_serde_is_plain_integer() {
        let json = serde_json::to_string(&ModeId(7)).unwrap();
        assert_eq!(json, "7");
        let back: ModeId = serde_json::from_str("7").unwrap();
        assert_eq!(back, ModeId(7));
    }
}
