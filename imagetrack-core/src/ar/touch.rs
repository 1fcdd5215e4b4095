//! Per-frame touch input

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Touch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

/// One active contact as seen in a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Stable across the frames of one contact
    pub id: u64,
    /// Screen position, origin bottom-left
    pub position: Vec2,
    /// Movement since the previous frame
    #[serde(default)]
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl Touch {
    pub fn began(id: u64, position: Vec2) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Began,
        }
    }

    /// A contact that moved to `position` by `delta` this frame
    pub fn moved(id: u64, position: Vec2, delta: Vec2) -> Self {
        Self {
            id,
            position,
            delta,
            phase: TouchPhase::Moved,
        }
    }

    pub fn stationary(id: u64, position: Vec2) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Stationary,
        }
    }

    pub fn ended(id: u64, position: Vec2) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Ended,
        }
    }

    pub fn just_began(&self) -> bool {
        self.phase == TouchPhase::Began
    }

    pub fn just_moved(&self) -> bool {
        self.phase == TouchPhase::Moved
    }
}
