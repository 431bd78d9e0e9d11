//! Room-to-nurse assignment for a hospital nursing unit.
//!
//! Assigns the occupied rooms of one shift to the nurses on duty while
//! respecting unit staffing policy, and validates assignments proposed by an
//! outside source against the same policy.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `Difficulty`, `NurseRole`, `Roster`,
//!   `Assignment`, `SchedulingResult`
//! - **`proximity`**: Static catalog of contiguous room blocks
//! - **`scheduler`**: Greedy allocation engine and `WorkloadKpi`
//! - **`validation`**: Shared policy scoring, external proposal validation,
//!   and input integrity checks
//! - **`proposal`**: Prompt rendering, reply parsing, and validate-or-fall-back
//!   planning for external proposers
//! - **`config`**: TOML engine configuration
//! - **`demo_data`**: Default names and floors
//!
//! # Policies
//!
//! | Rule | Roster | Effect |
//! |------|--------|--------|
//! | Charge nurse | 6 nurses | first nurse holds exactly 3 rooms |
//! | Off-care nurse | 7 nurses | first nurse holds no rooms |
//! | Chemo cap | any | at most 1 chemo room per nurse |
//! | Locality | any | rooms kept within shared blocks |
//! | Continuity | any | rooms return to last shift's nurse when asked |
//!
//! Policy violations never fail a run. They are reported as warnings on the
//! nurse they concern or on the result as a whole.
//!
//! # Example
//!
//! ```
//! use ward_assign::demo_data;
//! use ward_assign::models::Roster;
//! use ward_assign::scheduler::generate;
//!
//! let roster = Roster::new(demo_data::default_nurse_names(6)).unwrap();
//! let result = generate(&roster, &demo_data::default_floor(), true);
//!
//! assert!(result.success);
//! assert_eq!(result.assignment_for("Nurse Adams").unwrap().room_count(), 3);
//! ```

pub mod config;
pub mod demo_data;
pub mod error;
pub mod models;
pub mod proposal;
pub mod proximity;
pub mod scheduler;
pub mod validation;
