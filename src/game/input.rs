//! Per-Frame Input
//!
//! The input collaborator reduces pointer and keyboard activity to three
//! facts per frame: where the pointer is, whether (and where) a tap
//! landed, and whether the primary key fired. The primary key resolves
//! to a tap at the player's current position.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Input state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Continuous pointer position, for pointer-follow movement
    pub pointer: Option<Vec2>,

    /// Pointer-down position this frame, if any
    pub tap: Option<Vec2>,

    /// Primary key (space bar) pressed this frame
    pub primary: bool,
}

impl FrameInput {
    /// An idle frame: no pointer, no tap, no key.
    pub const fn idle() -> Self {
        Self {
            pointer: None,
            tap: None,
            primary: false,
        }
    }

    /// Frame with only a pointer position.
    pub const fn with_pointer(pointer: Vec2) -> Self {
        Self {
            pointer: Some(pointer),
            tap: None,
            primary: false,
        }
    }

    /// Frame with a tap at the given point.
    pub const fn with_tap(point: Vec2) -> Self {
        Self {
            pointer: None,
            tap: Some(point),
            primary: false,
        }
    }

    /// Frame with the primary key pressed.
    pub const fn with_primary() -> Self {
        Self {
            pointer: None,
            tap: None,
            primary: true,
        }
    }

    /// Check if this frame carries no input at all.
    pub fn is_idle(&self) -> bool {
        self.pointer.is_none() && self.tap.is_none() && !self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame() {
        assert!(FrameInput::idle().is_idle());
        assert!(FrameInput::default().is_idle());
    }

    #[test]
    fn test_constructors() {
        let p = Vec2::new(10.0, 20.0);
        assert_eq!(FrameInput::with_pointer(p).pointer, Some(p));
        assert_eq!(FrameInput::with_tap(p).tap, Some(p));
        assert!(FrameInput::with_primary().primary);
        assert!(!FrameInput::with_tap(p).is_idle());
    }
}
