// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selection rectangles and the pointer drag state machine.
//!
//! This module owns the ordered list of user-drawn selection rectangles
//! for the currently loaded image, plus the Idle -> Dragging -> Idle
//! transitions that build them. It has no UI or network dependencies,
//! so the whole state machine can be exercised headless in tests.

use serde::{Deserialize, Serialize};

/// A selection rectangle in image pixel coordinates.
///
/// Width and height keep the drag direction: dragging up or left
/// produces negative values, which are preserved verbatim all the way
/// through serialization (the server normalizes them when rasterizing
/// the mask).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    /// Build a rectangle spanning from a drag anchor to the pointer.
    pub fn from_drag(anchor: (f64, f64), pointer: (f64, f64)) -> Self {
        Self {
            x: anchor.0,
            y: anchor.1,
            width: pointer.0 - anchor.0,
            height: pointer.1 - anchor.1,
        }
    }
}

/// Drag state and the committed rectangle list for one loaded image.
///
/// Single-pointer assumption: a pointer-down while a drag is already in
/// progress is ignored, as are moves and releases while idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Committed rectangles in insertion order.
    rects: Vec<SelectionRect>,
    /// Anchor of the drag in progress, if any.
    drag_anchor: Option<(f64, f64)>,
    /// Last pointer position seen during the drag in progress.
    drag_pointer: Option<(f64, f64)>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed rectangles in insertion order.
    pub fn rects(&self) -> &[SelectionRect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// The candidate rectangle from the drag anchor to the last pointer
    /// position, if a drag is in progress. Not yet committed.
    pub fn in_progress(&self) -> Option<SelectionRect> {
        match (self.drag_anchor, self.drag_pointer) {
            (Some(anchor), Some(pointer)) => Some(SelectionRect::from_drag(anchor, pointer)),
            _ => None,
        }
    }

    /// Record the drag anchor and enter the Dragging state.
    pub fn pointer_down(&mut self, pos: (f64, f64)) {
        if self.drag_anchor.is_none() {
            self.drag_anchor = Some(pos);
            self.drag_pointer = Some(pos);
        }
    }

    /// Update the candidate rectangle endpoint. No-op while idle.
    pub fn pointer_moved(&mut self, pos: (f64, f64)) {
        if self.drag_anchor.is_some() {
            self.drag_pointer = Some(pos);
        }
    }

    /// Commit the candidate rectangle and return to Idle.
    ///
    /// Exactly one rectangle is committed per completed drag, whatever
    /// its direction or size. Returns the committed rectangle, or None
    /// if no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<SelectionRect> {
        let anchor = self.drag_anchor.take()?;
        let pointer = self.drag_pointer.take().unwrap_or(anchor);
        let rect = SelectionRect::from_drag(anchor, pointer);
        self.rects.push(rect);
        Some(rect)
    }

    /// Drop all committed rectangles and abandon any drag in progress.
    ///
    /// Called on explicit clear and whenever a new image replaces the
    /// canvas content (stale selections never outlive the image they
    /// were drawn on).
    pub fn clear(&mut self) {
        self.rects.clear();
        self.drag_anchor = None;
        self.drag_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(state: &mut SelectionState, from: (f64, f64), to: (f64, f64)) {
        state.pointer_down(from);
        state.pointer_moved(to);
        state.pointer_up();
    }

    #[test]
    fn test_completed_drag_commits_one_rect() {
        let mut state = SelectionState::new();
        drag(&mut state, (20.0, 20.0), (80.0, 80.0));
        assert_eq!(state.len(), 1);
        assert_eq!(
            state.rects()[0],
            SelectionRect { x: 20.0, y: 20.0, width: 60.0, height: 60.0 }
        );
    }

    #[test]
    fn test_reverse_drag_keeps_negative_size() {
        let mut state = SelectionState::new();
        drag(&mut state, (20.0, 20.0), (80.0, 80.0));
        drag(&mut state, (80.0, 80.0), (20.0, 20.0));

        // Both drags are valid, distinct entries, in insertion order.
        assert_eq!(state.len(), 2);
        assert_eq!(
            state.rects()[0],
            SelectionRect { x: 20.0, y: 20.0, width: 60.0, height: 60.0 }
        );
        assert_eq!(
            state.rects()[1],
            SelectionRect { x: 80.0, y: 80.0, width: -60.0, height: -60.0 }
        );
    }

    #[test]
    fn test_click_without_move_commits_zero_size_rect() {
        let mut state = SelectionState::new();
        state.pointer_down((5.0, 7.0));
        state.pointer_up();
        assert_eq!(state.len(), 1);
        assert_eq!(
            state.rects()[0],
            SelectionRect { x: 5.0, y: 7.0, width: 0.0, height: 0.0 }
        );
    }

    #[test]
    fn test_candidate_is_not_committed_until_release() {
        let mut state = SelectionState::new();
        state.pointer_down((10.0, 10.0));
        state.pointer_moved((40.0, 30.0));

        assert!(state.is_dragging());
        assert_eq!(
            state.in_progress(),
            Some(SelectionRect { x: 10.0, y: 10.0, width: 30.0, height: 20.0 })
        );
        // Pure redraw data only; the committed list is untouched.
        assert!(state.is_empty());

        state.pointer_up();
        assert!(!state.is_dragging());
        assert_eq!(state.in_progress(), None);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let mut state = SelectionState::new();
        state.pointer_moved((50.0, 50.0));
        assert_eq!(state.pointer_up(), None);
        assert!(state.is_empty());
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_second_pointer_down_is_ignored_while_dragging() {
        let mut state = SelectionState::new();
        state.pointer_down((10.0, 10.0));
        state.pointer_down((90.0, 90.0));
        state.pointer_moved((30.0, 30.0));
        let committed = state.pointer_up().unwrap();

        // The original anchor wins; no nested drag was started.
        assert_eq!(committed.x, 10.0);
        assert_eq!(committed.y, 10.0);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_clear_empties_list_and_cancels_drag() {
        let mut state = SelectionState::new();
        drag(&mut state, (0.0, 0.0), (10.0, 10.0));
        state.pointer_down((20.0, 20.0));

        state.clear();
        assert!(state.is_empty());
        assert!(!state.is_dragging());
        assert_eq!(state.in_progress(), None);

        // A release after clear commits nothing.
        assert_eq!(state.pointer_up(), None);
        assert!(state.is_empty());
    }

    #[test]
    fn test_many_drags_accumulate_in_order() {
        let mut state = SelectionState::new();
        for i in 0..5 {
            let offset = i as f64 * 10.0;
            drag(&mut state, (offset, offset), (offset + 5.0, offset + 5.0));
            assert_eq!(state.len(), i + 1);
        }
        assert_eq!(state.rects()[4].x, 40.0);
    }
}
