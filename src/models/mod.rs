//! Nursing unit domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Room` | A bed slot with occupancy, difficulty, chemo flag |
//! | `NurseRole` | A roster entry and its positional role |
//! | `Roster` | 5, 6, or 7 nurses in order |
//! | `Assignment` | One nurse's rooms, stats, warnings |
//! | `SchedulingResult` | All assignments plus run-level warnings |

mod assignment;
mod nurse;
mod room;

pub use assignment::{Assignment, SchedulingResult, NO_OCCUPIED_ROOMS};
pub use nurse::{NurseRole, Roster, CHARGE_ROOM_COUNT};
pub use room::{Difficulty, Room};
