//! Touch input handling
//!
//! Host touch batches arrive as a raw action code plus every pointer
//! currently on the surface.

use smallvec::SmallVec;

/// Touch pointer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    /// Pointer ID (for multi-touch)
    pub id: i32,
    /// X coordinate in view space
    pub x: f32,
    /// Y coordinate in view space
    pub y: f32,
}

impl TouchPointer {
    pub const fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Normalized motion actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum MotionAction {
    Down = 0,
    Up = 1,
    Move = 2,
    Cancel = 3,
    Outside = 4,
    PointerDown = 5,
    PointerUp = 6,
}

impl MotionAction {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::Move),
            3 => Some(Self::Cancel),
            4 => Some(Self::Outside),
            5 => Some(Self::PointerDown),
            6 => Some(Self::PointerUp),
            _ => None,
        }
    }
}

/// Fold a raw host action code onto the single-pointer action range.
///
/// Codes above 6 carry a pointer index in their upper byte; the low byte
/// minus 5 recovers DOWN/UP for secondary pointers. Codes `<= 6` pass
/// through, so raw POINTER_DOWN (5) and POINTER_UP (6) stay unmapped.
pub fn normalize_action(raw: i32) -> i32 {
    if raw > 6 {
        (raw % 256) - 5
    } else {
        raw
    }
}

/// One touch batch from the host
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    /// Raw host action code
    pub action: i32,
    pub pointers: SmallVec<[TouchPointer; 4]>,
}

impl MotionEvent {
    pub fn new(action: i32, pointers: impl IntoIterator<Item = TouchPointer>) -> Self {
        Self {
            action,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// A batch carrying a single pointer
    pub fn single(action: MotionAction, id: i32, x: f32, y: f32) -> Self {
        Self::new(action as i32, [TouchPointer::new(id, x, y)])
    }

    /// The normalized action applied to every pointer in the batch
    pub fn action(&self) -> Option<MotionAction> {
        MotionAction::from_code(normalize_action(self.action))
    }
}
