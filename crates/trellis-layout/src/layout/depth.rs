//! Depth slots for z-ordering.
//!
//! Every element owns three consecutive slots (shadow, element, border).
//! Slots are handed out in pre-order with siblings visited by ascending
//! `zIndex`, so later slots draw on top. Each node of the document reserves
//! its three slots even when it is not displayed, which keeps a subtree's
//! slot range fixed and lets a refresh reuse it.

use trellis_types::config::DepthConfig;

/// Slots reserved per element.
pub const SLOTS_PER_ELEMENT: usize = 3;

/// The depth values of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepthSlots {
    /// Index of the element's first (shadow) slot.
    pub first_slot: usize,
    pub shadow: f32,
    pub element: f32,
    pub border: f32,
}

/// Hands out slots in traversal order.
#[derive(Debug, Clone)]
pub struct DepthAssigner {
    base: f32,
    step: f32,
    next: usize,
}

impl DepthAssigner {
    pub fn new(config: &DepthConfig) -> Self {
        Self::starting_at(config, 0)
    }

    /// An assigner whose next allocation starts at `slot`.
    pub fn starting_at(config: &DepthConfig, slot: usize) -> Self {
        Self {
            base: config.base,
            step: config.step,
            next: slot,
        }
    }

    pub fn depth_of(&self, slot: usize) -> f32 {
        self.base + slot as f32 * self.step
    }

    pub fn next_slot(&self) -> usize {
        self.next
    }

    /// Allocate the three slots of one element.
    pub fn allocate(&mut self) -> DepthSlots {
        let first = self.next;
        self.next += SLOTS_PER_ELEMENT;
        DepthSlots {
            first_slot: first,
            shadow: self.depth_of(first),
            element: self.depth_of(first + 1),
            border: self.depth_of(first + 2),
        }
    }

    /// Reserve slots for `elements` elements that are not drawn.
    pub fn skip(&mut self, elements: usize) {
        self.next += elements * SLOTS_PER_ELEMENT;
    }
}

/// Indices of `z_indices` in stacking order: ascending, ties keep their
/// original order.
pub fn stacking_order(z_indices: &[i32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..z_indices.len()).collect();
    order.sort_by_key(|&i| z_indices[i]);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_monotonic() {
        let cfg = DepthConfig {
            base: 1.0,
            step: 0.5,
        };
        let mut a = DepthAssigner::new(&cfg);
        let first = a.allocate();
        let second = a.allocate();
        assert_eq!(first.first_slot, 0);
        assert_eq!((first.shadow, first.element, first.border), (1.0, 1.5, 2.0));
        assert_eq!(second.first_slot, 3);
        assert!(second.shadow > first.border);
    }

    #[test]
    fn skip_reserves_whole_subtrees() {
        let mut a = DepthAssigner::new(&DepthConfig::default());
        a.allocate();
        a.skip(4);
        assert_eq!(a.next_slot(), 15);
        let resumed = DepthAssigner::starting_at(&DepthConfig::default(), 3);
        assert_eq!(resumed.next_slot(), 3);
    }

    #[test]
    fn stacking_order_is_stable() {
        assert_eq!(stacking_order(&[0, -1, 2, 0, -1]), vec![1, 4, 0, 3, 2]);
        assert!(stacking_order(&[]).is_empty());
    }
}
