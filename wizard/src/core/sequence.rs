//! Ordered, mode-scoped step sequences.
//!
//! A sequence is immutable once built. Modes build a fresh sequence on every
//! query, so a changed context yields a new sequence rather than a mutated one.

use crate::core::types::StepId;

/// Ordered list of steps belonging to one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<StepId>,
}

impl StepSequence {
    pub fn new(steps: Vec<StepId>) -> Self {
        Self { steps }
    }

    pub fn all_steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn first_step(&self) -> Option<StepId> {
        self.steps.first().copied()
    }

    pub fn contains(&self, step: StepId) -> bool {
        self.position(step).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Step declared right after `step`, or `None` at the end or when `step`
    /// is not part of this sequence.
    pub fn successor(&self, step: StepId) -> Option<StepId> {
        let pos = self.position(step)?;
        self.steps.get(pos + 1).copied()
    }

    /// Step declared right before `step`.
    pub fn predecessor(&self, step: StepId) -> Option<StepId> {
        let pos = self.position(step)?;
        pos.checked_sub(1).map(|prev| self.steps[prev])
    }

    /// First step (declared order) that is visible.
    pub fn first_visible<F>(&self, is_visible: F) -> Option<StepId>
    where
        F: Fn(StepId) -> bool,
    {
        self.steps.iter().copied().find(|&step| is_visible(step))
    }

    /// Walk successors of `step` until a visible one is found.
    pub fn next_visible<F>(&self, step: StepId, is_visible: F) -> Option<StepId>
    where
        F: Fn(StepId) -> bool,
    {
        let mut candidate = self.successor(step);
        while let Some(next) = candidate {
            if is_visible(next) {
                return Some(next);
            }
            candidate = self.successor(next);
        }
        None
    }

    /// Walk predecessors of `step` until a visible one is found.
    pub fn previous_visible<F>(&self, step: StepId, is_visible: F) -> Option<StepId>
    where
        F: Fn(StepId) -> bool,
    {
        let mut candidate = self.predecessor(step);
        while let Some(prev) = candidate {
            if is_visible(prev) {
                return Some(prev);
            }
            candidate = self.predecessor(prev);
        }
        None
    }

    fn position(&self, step: StepId) -> Option<usize> {
        self.steps.iter().position(|&candidate| candidate == step)
    }
}

impl FromIterator<StepId> for StepSequence {
    fn from_iter<I: IntoIterator<Item = StepId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(raw: &[usize]) -> StepSequence {
        raw.iter().copied().map(StepId).collect()
    }

    #[test]
    fn successor_and_predecessor_follow_declared_order() {
        let seq = ids(&[3, 1, 7]);
        assert_eq!(seq.successor(StepId(3)), Some(StepId(1)));
        assert_eq!(seq.successor(StepId(7)), None);
        assert_eq!(seq.predecessor(StepId(1)), Some(StepId(3)));
        assert_eq!(seq.predecessor(StepId(3)), None);
    }

    #[test]
    fn unknown_step_has_no_neighbours() {
        let seq = ids(&[1, 2]);
        assert_eq!(seq.successor(StepId(9)), None);
        assert_eq!(seq.predecessor(StepId(9)), None);
        assert!(!seq.contains(StepId(9)));
    }

    /// Order [A,B,C,D] with B and C hidden: A's visible successor is D.
    #[test]
    fn visibility_skipping_is_transitive() {
        let seq = ids(&[0, 1, 2, 3]);
        let visible = |id: StepId| !matches!(id.0, 1 | 2);
        assert_eq!(seq.next_visible(StepId(0), visible), Some(StepId(3)));
        assert_eq!(seq.previous_visible(StepId(3), visible), Some(StepId(0)));
    }

    #[test]
    fn trailing_hidden_steps_end_the_walk() {
        let seq = ids(&[0, 1, 2]);
        let visible = |id: StepId| id.0 == 0;
        assert_eq!(seq.next_visible(StepId(0), visible), None);
        assert_eq!(seq.first_visible(|id| id.0 == 2), Some(StepId(2)));
    }

    proptest! {
        /// Over the visible subsequence, visible successor and predecessor are inverses.
        #[test]
        fn visible_neighbours_are_inverses(visibility in proptest::collection::vec(any::<bool>(), 1..24)) {
            let seq: StepSequence = (0..visibility.len()).map(StepId).collect();
            let visible = |id: StepId| visibility[id.0];
            for &step in seq.all_steps().iter().filter(|&&id| visible(id)) {
                if let Some(next) = seq.next_visible(step, visible) {
                    prop_assert_eq!(seq.previous_visible(next, visible), Some(step));
                }
                if let Some(prev) = seq.previous_visible(step, visible) {
                    prop_assert_eq!(seq.next_visible(prev, visible), Some(step));
                }
            }
        }
    }
}
