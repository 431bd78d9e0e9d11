//! Assignment and result models.
//!
//! An [`Assignment`] is one nurse's share of the unit for a shift. A
//! [`SchedulingResult`] bundles every nurse's assignment with the run-level
//! warnings.

use serde::{Deserialize, Serialize};

use super::{NurseRole, Room, Roster};

/// Global warning emitted when there is nothing to allocate.
pub const NO_OCCUPIED_ROOMS: &str = "No occupied rooms to assign";

/// The rooms held by one nurse, with derived stats and policy warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Nurse and role.
    #[serde(flatten)]
    pub nurse: NurseRole,
    /// Rooms in the order they were assigned.
    pub rooms: Vec<Room>,
    /// Number of chemotherapy rooms held.
    pub chemo_count: usize,
    /// Sum of difficulty weights of held rooms.
    pub difficulty_score: u32,
    /// Nurse-scoped policy warnings.
    pub warnings: Vec<String>,
}

impl Assignment {
    /// Creates an empty assignment for a nurse.
    pub fn new(nurse: NurseRole) -> Self {
        Self {
            nurse,
            rooms: Vec::new(),
            chemo_count: 0,
            difficulty_score: 0,
            warnings: Vec::new(),
        }
    }

    /// Appends a room, stamping it with this nurse's name.
    pub fn push_room(&mut self, mut room: Room) {
        room.assigned_nurse = Some(self.nurse.name.clone());
        if room.is_chemo {
            self.chemo_count += 1;
        }
        self.rooms.push(room);
    }

    /// Nurse name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.nurse.name
    }

    /// Number of rooms held.
    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Room numbers in assignment order.
    pub fn room_numbers(&self) -> Vec<&str> {
        self.rooms.iter().map(|r| r.number.as_str()).collect()
    }

    /// Whether this nurse holds the given room number.
    pub fn holds(&self, room_number: &str) -> bool {
        self.rooms.iter().any(|r| r.number == room_number)
    }
}

/// Outcome of a scheduling or validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    /// One assignment per roster entry, in roster order.
    pub assignments: Vec<Assignment>,
    /// Run-scoped warnings.
    pub warnings: Vec<String>,
    /// Occupied rooms considered.
    pub total_rooms: usize,
    /// Occupied rooms nobody holds, by number.
    #[serde(default)]
    pub unassigned_rooms: Vec<String>,
    /// True iff `warnings` is empty. Per-nurse warnings do not affect it.
    pub success: bool,
}

impl SchedulingResult {
    /// Builds a result, deriving `success` from the global warnings.
    pub fn new(
        assignments: Vec<Assignment>,
        warnings: Vec<String>,
        total_rooms: usize,
        unassigned_rooms: Vec<String>,
    ) -> Self {
        let success = warnings.is_empty();
        Self {
            assignments,
            warnings,
            total_rooms,
            unassigned_rooms,
            success,
        }
    }

    /// Result for a floor with no occupied rooms.
    ///
    /// An empty floor is a valid configuration, so this counts as success
    /// even though it carries a warning.
    pub fn empty_floor(roster: &Roster) -> Self {
        Self {
            assignments: roster.nurses().iter().cloned().map(Assignment::new).collect(),
            warnings: vec![NO_OCCUPIED_ROOMS.to_string()],
            total_rooms: 0,
            unassigned_rooms: Vec::new(),
            success: true,
        }
    }

    /// Prepends warnings, recomputing `success`.
    pub fn prepend_warnings<I>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged: Vec<String> = warnings.into_iter().collect();
        merged.append(&mut self.warnings);
        self.warnings = merged;
        self.success = self.warnings.is_empty();
    }

    /// Finds the assignment for a nurse.
    pub fn assignment_for(&self, name: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.name() == name)
    }

    /// Finds the nurse holding a room.
    pub fn nurse_for_room(&self, room_number: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.holds(room_number))
            .map(Assignment::name)
    }

    /// Total rooms held across all nurses.
    pub fn assigned_room_count(&self) -> usize {
        self.assignments.iter().map(Assignment::room_count).sum()
    }

    /// Whether any nurse carries a warning.
    pub fn has_nurse_warnings(&self) -> bool {
        self.assignments.iter().any(|a| !a.warnings.is_empty())
    }
}
