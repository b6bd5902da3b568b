use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity for button index sets. Puzzle buttons touch only a handful of positions.
const INLINE_INDICES: usize = 8;

/// One button: the set of light positions it toggles, which doubles as the set of
/// accumulator slots it increments.
///
/// Indices are kept sorted and unique, so two buttons with the same set compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct Button(SmallVec<[usize; INLINE_INDICES]>);

impl Button {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set: SmallVec<[usize; INLINE_INDICES]> = indices.into_iter().collect();
        set.sort_unstable();
        set.dedup();
        Self(set)
    }

    #[inline(always)]
    pub fn indices(&self) -> &[usize] { &self.0 }

    pub fn is_noop(&self) -> bool { self.0.is_empty() }

    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }

    /// Largest referenced position, if any.
    pub fn max_index(&self) -> Option<usize> { self.0.last().copied() }

    /// The toggle mask with bit `i` set for every position `i` of this button.
    /// Returns `None` when a position does not fit in 64 bits.
    pub fn toggle_mask(&self) -> Option<u64> {
        self.0.iter().try_fold(0u64, |mask, &i| {
            1u64.checked_shl(u32::try_from(i).ok()?).map(|bit| mask | bit)
        })
    }
}

impl From<Vec<usize>> for Button {
    fn from(indices: Vec<usize>) -> Self { Self::new(indices) }
}

impl From<Button> for Vec<usize> {
    fn from(button: Button) -> Self { button.0.into_vec() }
}
