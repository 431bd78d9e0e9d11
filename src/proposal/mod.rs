//! Assignment proposals from outside the engine.
//!
//! An external proposer (for example a language model behind an HTTP call)
//! can suggest an assignment. Its reply is never trusted: it is parsed
//! leniently, checked by the validator, and replaced by the engine's own
//! result whenever it cannot be obtained or read.
//!
//! - **`ProposalPrompt`**: policy brief and per-shift request text
//! - **`ProposalDocument`**: the JSON found in a free-text reply
//! - **`ProposalSource`**: the transport seam, implemented by callers
//! - **`ProposalPlanner`**: prompt → reply → validated result or fallback

mod document;
mod planner;
mod prompt;

pub use document::ProposalDocument;
pub use planner::{ProposalPlanner, ProposalSource, FALLBACK_WARNING};
pub use prompt::ProposalPrompt;
