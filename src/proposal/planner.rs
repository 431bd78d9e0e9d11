//! Validate-or-fall-back planning with an external proposer.

use std::fmt::Display;

use tracing::{info, warn};

use super::{ProposalDocument, ProposalPrompt};
use crate::models::SchedulingResult;
use crate::scheduler::{NurseScheduler, ScheduleRequest};
use crate::validation::validate_external_proposal;

/// Warning added after the engine stands in for a failed proposer.
pub const FALLBACK_WARNING: &str = "Used fallback algorithm instead";

/// Something that can turn a prompt into a free-text assignment reply.
///
/// Implementations own transport concerns (timeouts, retries, auth). Any
/// error they return sends the planner to the deterministic engine.
pub trait ProposalSource {
    /// Transport or service error.
    type Error: Display;

    /// Asks for an assignment.
    fn propose(&self, prompt: &ProposalPrompt) -> Result<String, Self::Error>;
}

impl<F, E> ProposalSource for F
where
    F: Fn(&ProposalPrompt) -> Result<String, E>,
    E: Display,
{
    type Error = E;

    fn propose(&self, prompt: &ProposalPrompt) -> Result<String, E> {
        self(prompt)
    }
}

/// Plans a shift from an external proposal, falling back to the engine when
/// the proposal cannot be obtained or read.
#[derive(Debug, Clone, Default)]
pub struct ProposalPlanner {
    scheduler: NurseScheduler,
}

impl ProposalPlanner {
    /// Creates a planner that falls back to `scheduler`.
    pub fn new(scheduler: NurseScheduler) -> Self {
        Self { scheduler }
    }

    /// Asks `source` for a proposal and validates it.
    ///
    /// A floor with no occupied rooms never reaches the source.
    pub fn plan<S: ProposalSource>(
        &self,
        request: &ScheduleRequest,
        source: &S,
    ) -> SchedulingResult {
        if !request.rooms.iter().any(|r| r.is_occupied) {
            return SchedulingResult::empty_floor(&request.roster);
        }

        let prompt = ProposalPrompt::render(
            &request.roster,
            &request.rooms,
            request.prioritize_continuity,
        );
        self.assess_reply(request, source.propose(&prompt))
    }

    /// Validates a reply that was obtained elsewhere.
    ///
    /// `Ok` text is parsed and checked; the proposer's own warnings come
    /// first in the result. `Err`, or text that does not parse, yields the
    /// engine's result prefixed with the failure.
    pub fn assess_reply<E: Display>(
        &self,
        request: &ScheduleRequest,
        reply: Result<String, E>,
    ) -> SchedulingResult {
        let failure = match reply {
            Ok(text) => match ProposalDocument::from_reply(&text) {
                Ok(document) => {
                    let mut result = validate_external_proposal(
                        &request.roster,
                        &request.rooms,
                        &document.assignments,
                    );
                    if !document.warnings.is_empty() {
                        result.prepend_warnings(document.warnings);
                    }
                    info!(
                        warnings = result.warnings.len(),
                        success = result.success,
                        "external proposal validated"
                    );
                    return result;
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        warn!(error = %failure, "external proposal failed, using engine");
        let mut result = self.scheduler.schedule_request(request);
        result.prepend_warnings([
            format!("External proposal failed: {failure}"),
            FALLBACK_WARNING.to_string(),
        ]);
        result
    }
}
