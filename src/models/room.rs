//! Room model.
//!
//! A room is one patient bed slot on the unit. Split-bed rooms carry a
//! letter suffix in their number (e.g. `605A`, `605B`).

use serde::{Deserialize, Serialize};

/// Care difficulty of the patient in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Weight 1.
    #[default]
    Easy,
    /// Weight 2.
    Medium,
    /// Weight 3.
    Hard,
}

impl Difficulty {
    /// Workload weight used for difficulty scores and room ordering.
    #[inline]
    pub fn weight(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// A room on the unit.
///
/// `assigned_nurse` is output: the engine clears and rewrites it on its own
/// working copy. `previous_nurse` is input from the continuity workflow and
/// is never touched by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Stable identifier.
    pub id: String,
    /// Room label as shown on the unit.
    pub number: String,
    /// Vacant rooms are skipped by every allocation pass.
    pub is_occupied: bool,
    /// Care difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Patient is receiving chemotherapy.
    #[serde(default)]
    pub is_chemo: bool,
    /// Nurse holding this room in the current assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_nurse: Option<String>,
    /// Nurse who held this room last shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_nurse: Option<String>,
}

impl Room {
    /// Creates an occupied, easy, non-chemo room.
    pub fn new(id: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            is_occupied: true,
            difficulty: Difficulty::Easy,
            is_chemo: false,
            assigned_nurse: None,
            previous_nurse: None,
        }
    }

    /// Creates a room whose id is its number.
    pub fn numbered(number: impl Into<String>) -> Self {
        let number = number.into();
        Self::new(number.clone(), number)
    }

    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Marks the room as a chemotherapy room.
    pub fn with_chemo(mut self) -> Self {
        self.is_chemo = true;
        self
    }

    /// Marks the room as vacant.
    pub fn vacant(mut self) -> Self {
        self.is_occupied = false;
        self
    }

    /// Sets the nurse who held this room last shift.
    pub fn with_previous_nurse(mut self, name: impl Into<String>) -> Self {
        self.previous_nurse = Some(name.into());
        self
    }

    /// Difficulty weight of this room.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.difficulty.weight()
    }
}
