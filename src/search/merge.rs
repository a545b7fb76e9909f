//! K-way union of ascending entity-id streams.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::data::EntityId;
use crate::engine::PostingIter;

/// Merges ascending, duplicate-free id streams into one ascending,
/// duplicate-free stream containing every id of any input.
///
/// A min-heap holds the current head of each non-exhausted stream. Each step
/// pops the smallest head, advances every stream positioned on that id and
/// emits it once.
pub struct UnionMerger<'a> {
    sources: Vec<PostingIter<'a>>,
    heads: BinaryHeap<Reverse<(EntityId, usize)>>,
    #[cfg(debug_assertions)]
    last: Option<EntityId>,
}

impl<'a> UnionMerger<'a> {
    pub fn new(sources: Vec<PostingIter<'a>>) -> Self {
        let mut merger = Self {
            heads: BinaryHeap::with_capacity(sources.len()),
            sources,
            #[cfg(debug_assertions)]
            last: None,
        };
        for index in 0..merger.sources.len() {
            merger.advance(index);
        }
        merger
    }

    /// A merger over no streams.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn advance(&mut self, index: usize) {
        if let Some(id) = self.sources[index].next() {
            self.heads.push(Reverse((id, index)));
        }
    }
}

impl Iterator for UnionMerger<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let Reverse((id, index)) = self.heads.pop()?;
        self.advance(index);

        while let Some(&Reverse((head, other))) = self.heads.peek() {
            if head != id {
                break;
            }
            self.heads.pop();
            self.advance(other);
        }

        #[cfg(debug_assertions)]
        {
            debug_assert!(
                self.last.is_none_or(|last| last < id),
                "term postings must be strictly ascending"
            );
            self.last = Some(id);
        }
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(!self.heads.is_empty());
        (lower, None)
    }
}

impl std::fmt::Debug for UnionMerger<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionMerger")
            .field("sources", &self.sources.len())
            .field("live_heads", &self.heads.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(ids: Vec<EntityId>) -> PostingIter<'static> {
        Box::new(ids.into_iter())
    }

    fn merge(inputs: Vec<Vec<EntityId>>) -> Vec<EntityId> {
        UnionMerger::new(inputs.into_iter().map(stream).collect()).collect()
    }

    #[test]
    fn test_no_sources_is_empty() {
        assert!(UnionMerger::empty().next().is_none());
    }

    #[test]
    fn test_single_source_passes_through() {
        assert_eq!(merge(vec![vec![1, 4, 9]]), vec![1, 4, 9]);
    }

    #[test]
    fn test_union_interleaves_and_deduplicates() {
        assert_eq!(
            merge(vec![vec![0, 2, 4, 6], vec![1, 2, 3], vec![2, 6, 8]]),
            vec![0, 1, 2, 3, 4, 6, 8]
        );
    }

    #[test]
    fn test_empty_sources_never_contribute() {
        assert_eq!(merge(vec![vec![], vec![5], vec![]]), vec![5]);
        assert!(merge(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_identical_sources_collapse() {
        assert_eq!(merge(vec![vec![3, 7], vec![3, 7], vec![3, 7]]), vec![3, 7]);
    }

    #[test]
    fn test_output_strictly_ascending_for_many_sources() {
        let inputs: Vec<Vec<EntityId>> = (1..=12u64)
            .map(|step| (0..200u64).filter(|id| id % step == 0).collect())
            .collect();
        let merged = merge(inputs);
        assert!(merged.windows(2).all(|pair| pair[0] < pair[1]));
        // Every id is a multiple of 1, so the union is 0..200.
        assert_eq!(merged, (0..200u64).collect::<Vec<_>>());
    }
}
