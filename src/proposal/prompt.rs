//! Prompt rendering for an external assignment proposer.

use serde_json::{json, Value};
use std::fmt::Write;

use crate::models::{Room, Roster, CHARGE_ROOM_COUNT};
use crate::proximity;
use crate::validation::MAX_CHEMO_PER_NURSE;

/// Instructions for an external proposer: a fixed policy brief and a
/// per-shift request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalPrompt {
    /// Unit policies and room layout.
    pub system: String,
    /// Roster, occupied rooms, and the reply format.
    pub user: String,
}

impl ProposalPrompt {
    /// Renders the prompt for one shift. Only occupied rooms are listed.
    pub fn render(roster: &Roster, rooms: &[Room], prioritize_continuity: bool) -> Self {
        Self {
            system: system_brief(),
            user: shift_request(roster, rooms, prioritize_continuity),
        }
    }
}

fn system_brief() -> String {
    let mut text = String::from(
        "You are an expert hospital nurse assignment system. Create room assignments \
         that follow the unit's staffing policies exactly.\n\nPOLICIES:\n",
    );
    let _ = writeln!(
        text,
        "1. CHEMO SAFETY: at most {MAX_CHEMO_PER_NURSE} chemo patient per nurse"
    );
    let _ = writeln!(
        text,
        "2. CHARGE NURSE: with 6 nurses the first is charge nurse \
         with exactly {CHARGE_ROOM_COUNT} patients"
    );
    text.push_str("3. OFF-CARE NURSE: with 7 nurses the first is off-care with 0 patients\n");
    text.push_str("4. WORKLOAD BALANCE: spread difficulty evenly (easy=1, medium=2, hard=3)\n");
    text.push_str("5. PROXIMITY: keep each nurse's rooms within contiguous blocks\n");
    text.push_str("6. CONTINUITY: keep last shift's nurse-patient pairings when asked\n");
    text.push_str("\nROOM LAYOUT (contiguous blocks):\n");
    for block in proximity::blocks() {
        let _ = writeln!(text, "- Block {}: {}", block.index(), block.rooms().join(", "));
    }
    text.push_str("\nReply with a single JSON object in the format given by the user.");
    text
}

fn shift_request(roster: &Roster, rooms: &[Room], prioritize_continuity: bool) -> String {
    let occupied: Vec<&Room> = rooms.iter().filter(|r| r.is_occupied).collect();
    let room_data = Value::Array(
        occupied
            .iter()
            .map(|r| {
                json!({
                    "number": r.number,
                    "difficulty": r.difficulty,
                    "isChemo": r.is_chemo,
                    "previousNurse": r.previous_nurse,
                })
            })
            .collect(),
    );

    let mut text = String::new();
    let _ = writeln!(
        text,
        "Create nurse assignments for {} nurses managing {} occupied rooms.\n",
        roster.size(),
        occupied.len()
    );
    let _ = writeln!(text, "NURSES: {}\n", roster.names().collect::<Vec<_>>().join(", "));
    let _ = writeln!(text, "ROOMS DATA:\n{room_data:#}\n");

    text.push_str("ASSIGNMENT REQUIREMENTS:\n");
    for nurse in roster.nurses() {
        if nurse.is_charge {
            let _ = writeln!(
                text,
                "- {} is CHARGE NURSE (exactly {CHARGE_ROOM_COUNT} patients)",
                nurse.name
            );
        }
        if nurse.is_off_care {
            let _ = writeln!(text, "- {} is OFF-CARE (0 patients)", nurse.name);
        }
    }
    let _ = writeln!(text, "- Maximum {MAX_CHEMO_PER_NURSE} chemo patient per nurse");
    text.push_str("- Balance difficulty scores across nurses\n");
    text.push_str("- Keep rooms contiguous when possible\n");
    if prioritize_continuity {
        text.push_str("- Prioritize continuity from previous shifts\n");
    } else {
        text.push_str("- Ignore previous assignments\n");
    }

    text.push_str(
        "\nReturn ONLY valid JSON in this exact format:\n\
         {\n  \"assignments\": [\n    {\n      \"nurseName\": \"Nurse Name\",\n      \
         \"assignedRooms\": [\"600\", \"601\"],\n      \
         \"reasoning\": \"Brief explanation of assignment logic\"\n    }\n  ],\n  \
         \"warnings\": [\"Any policy violations or concerns\"]\n}",
    );
    text
}
