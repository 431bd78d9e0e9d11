//! Nurse roster model.
//!
//! Roles are positional: with six nurses the first is the charge nurse, with
//! seven the first is off-care, with five nobody has a special role.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Room quota of a charge nurse.
pub const CHARGE_ROOM_COUNT: usize = 3;

/// One nurse on the roster and the role derived from their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseRole {
    /// Display name; assignments are keyed by it.
    pub name: String,
    /// Charge nurse (holds exactly three rooms).
    pub is_charge: bool,
    /// Off-care nurse (holds no rooms).
    pub is_off_care: bool,
}

impl NurseRole {
    /// Creates a nurse without a special role.
    pub fn staff(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_charge: false,
            is_off_care: false,
        }
    }

    /// Whether this nurse takes patients.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_off_care
    }
}

/// An ordered roster of 5, 6, or 7 nurses.
///
/// The size is checked at construction, so every `Roster` in hand is one the
/// engine can schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    nurses: Vec<NurseRole>,
}

impl Roster {
    /// Builds a roster from names in order, deriving roles from the size.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidRosterSize`] unless there are 5, 6, or 7 names.
    pub fn new<I, S>(names: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let size = names.len();
        if !(5..=7).contains(&size) {
            return Err(ScheduleError::InvalidRosterSize { size });
        }

        let nurses = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| NurseRole {
                name,
                is_charge: size == 6 && index == 0,
                is_off_care: size == 7 && index == 0,
            })
            .collect();

        Ok(Self { nurses })
    }

    /// Number of nurses, including an off-care nurse.
    pub fn size(&self) -> usize {
        self.nurses.len()
    }

    /// All nurses in roster order.
    pub fn nurses(&self) -> &[NurseRole] {
        &self.nurses
    }

    /// Nurses who take patients, in roster order.
    pub fn active(&self) -> impl Iterator<Item = &NurseRole> {
        self.nurses.iter().filter(|n| n.is_active())
    }

    /// Looks up a nurse by name.
    pub fn get(&self, name: &str) -> Option<&NurseRole> {
        self.nurses.iter().find(|n| n.name == name)
    }

    /// The charge nurse, if the roster has one.
    pub fn charge(&self) -> Option<&NurseRole> {
        self.nurses.iter().find(|n| n.is_charge)
    }

    /// Names in roster order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nurses.iter().map(|n| n.name.as_str())
    }
}
