//! Binary max-heap over indices into a caller-owned scalar slice.
//!
//! The heap never owns, moves or mutates the scalars it orders. Each slot of
//! the index slice refers to a position in the scalar slice and the slot's key
//! is the scalar currently stored there. The index slice length is the heap
//! length; a caller shrinks the heap by re-slicing.
//!
//! Equal scalars are ordered by their index: the smaller index ranks higher.
//! This makes every operation deterministic for a given input.
//!
//! Comparisons and swaps branch on scalar values, so nothing here runs in
//! constant time. Do not feed it secret scalars.

/// The two highest ranking indices of a heap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoMax {
    pub max1: usize,
    pub max2: Option<usize>,
}

/// Namespace for the heap operations.
///
/// All operations take the index slice and the scalar slice separately so
/// that the caller may mutate the scalars between calls.
pub struct IndexHeap;

impl IndexHeap {
    /// Rearranges `heap` so that it satisfies the max-heap invariant over the
    /// keys `scalars[heap[i]]`.
    pub fn init<K: Ord>(heap: &mut [usize], scalars: &[K]) {
        debug_assert!(heap.iter().all(|&index| index < scalars.len()));
        for pos in (0..heap.len() / 2).rev() {
            sift_down(heap, scalars, pos);
        }
        debug_assert!(Self::is_heap(heap, scalars));
    }

    /// Returns the index holding the largest scalar and, if the heap has at
    /// least two entries, the index holding the second largest one.
    ///
    /// The second largest entry is always a direct child of the root, so this
    /// never looks deeper than one level.
    pub fn get_two_max<K: Ord>(heap: &[usize], scalars: &[K]) -> Option<TwoMax> {
        debug_assert!(Self::is_heap(heap, scalars));
        let max1 = *heap.first()?;
        let max2 = match (heap.get(1), heap.get(2)) {
            (Some(&left), Some(&right)) => {
                if ranks_above(scalars, right, left) {
                    Some(right)
                } else {
                    Some(left)
                }
            }
            (Some(&left), None) => Some(left),
            _ => None,
        };
        Some(TwoMax { max1, max2 })
    }

    /// Restores the invariant after the scalar referenced by the root has been
    /// replaced by one that is not larger.
    pub fn root_replaced<K: Ord>(heap: &mut [usize], scalars: &[K]) {
        if heap.len() > 1 {
            sift_down(heap, scalars, 0);
        }
        debug_assert!(Self::is_heap(heap, scalars));
    }

    /// Checks the max-heap invariant, tie-break included.
    pub fn is_heap<K: Ord>(heap: &[usize], scalars: &[K]) -> bool {
        (1..heap.len()).all(|pos| !ranks_above(scalars, heap[pos], heap[(pos - 1) / 2]))
    }
}

#[inline(always)]
fn ranks_above<K: Ord>(scalars: &[K], a: usize, b: usize) -> bool {
    match scalars[a].cmp(&scalars[b]) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => a < b,
    }
}

fn sift_down<K: Ord>(heap: &mut [usize], scalars: &[K], mut pos: usize) {
    let moving = heap[pos];
    loop {
        let left = 2 * pos + 1;
        if left >= heap.len() {
            break;
        }
        let right = left + 1;

        let mut child = left;
        if right < heap.len() && ranks_above(scalars, heap[right], heap[left]) {
            child = right;
        }
        if !ranks_above(scalars, heap[child], moving) {
            break;
        }

        heap[pos] = heap[child];
        pos = child;
    }
    heap[pos] = moving;
}
