//! Strongly typed identifier for villages.
//!
//! `VillageId` is `Copy + Ord + Hash` so it can key maps and sort without
//! ceremony.  The inner integer is `pub` to allow direct indexing into
//! per-village `Vec`s, but callers should prefer `.index()`.

use std::fmt;

/// Index of a village (barangay) in a `VillageTable`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VillageId(pub u32);

impl VillageId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: VillageId = VillageId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for VillageId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for VillageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VillageId({})", self.0)
    }
}

impl From<VillageId> for usize {
    #[inline(always)]
    fn from(id: VillageId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for VillageId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<VillageId, Self::Error> {
        u32::try_from(n).map(VillageId)
    }
}
