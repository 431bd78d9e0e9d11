//! Assignment validation.
//!
//! - **`input`**: structural checks on a roster and room list before
//!   scheduling.
//! - **`policy`**: the per-nurse scoring core. Recomputes chemo count,
//!   difficulty score, and proximity score from held rooms and reports
//!   staffing-policy violations. Both the engine and the external path call
//!   it, so a room list is judged the same way whoever produced it.
//! - **`external`**: converts an untrusted room-number proposal into a
//!   scored result, rejecting unknown nurses, unknown rooms, and duplicate
//!   claims.

mod external;
mod input;
mod policy;

pub use external::{validate_external_proposal, Claim, ProposedAssignment};
pub use input::{validate_input, ValidationError, ValidationErrorKind, ValidationResult};
pub use policy::{
    annotate, proximity_score, score_and_warn, PolicyReport, MAX_CHEMO_PER_NURSE, SPREAD_WARNING,
};
