//! Validation of externally proposed assignments.
//!
//! Proposals come from outside the engine (for example a language-model
//! suggestion) and are untrusted: nurse names and room numbers may be
//! invented, repeated, missing, or not even strings. Bad entries are skipped
//! with a warning; whatever survives is scored with the same rules as engine
//! output. Hard-rule violations (chemo cap, charge and off-care counts) are
//! raised to run-level warnings, since nothing else checks this input.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::policy::{annotate, MAX_CHEMO_PER_NURSE};
use crate::models::{Assignment, Room, Roster, SchedulingResult, CHARGE_ROOM_COUNT};

/// A proposal field that should hold a string but may hold any JSON value.
///
/// Only [`Claim::Text`] can match a nurse or room; anything else is kept so
/// the warning can show what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Claim {
    /// A string value.
    Text(String),
    /// Any other JSON value, including `null` for a missing field.
    Other(Value),
}

impl Claim {
    /// The string value, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Claim::Text(s) => Some(s),
            Claim::Other(_) => None,
        }
    }
}

impl Default for Claim {
    fn default() -> Self {
        Claim::Other(Value::Null)
    }
}

impl From<Value> for Claim {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Claim::Text(s),
            other => Claim::Other(other),
        }
    }
}

impl From<&str> for Claim {
    fn from(s: &str) -> Self {
        Claim::Text(s.to_string())
    }
}

impl From<String> for Claim {
    fn from(s: String) -> Self {
        Claim::Text(s)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claim::Text(s) => f.write_str(s),
            Claim::Other(v) => write!(f, "{v}"),
        }
    }
}

impl<'de> Deserialize<'de> for Claim {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Value::deserialize(deserializer)?.into())
    }
}

/// One nurse's rooms as proposed by an external source.
///
/// Deserialization never fails on an object: a missing or non-string name
/// and non-string room entries become [`Claim::Other`], and a bare value in
/// place of the room list is read as a one-room list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAssignment {
    /// Nurse the rooms are proposed for.
    #[serde(default)]
    pub nurse_name: Claim,
    /// Proposed room numbers.
    #[serde(default, alias = "roomNumbers", deserialize_with = "loose_list")]
    pub assigned_rooms: Vec<Claim>,
    /// Free-text rationale; carried through, never interpreted.
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reasoning: Option<String>,
}

impl ProposedAssignment {
    /// Creates a proposal entry.
    pub fn new<I, S>(nurse_name: impl Into<String>, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nurse_name: Claim::Text(nurse_name.into()),
            assigned_rooms: rooms.into_iter().map(|r| Claim::Text(r.into())).collect(),
            reasoning: None,
        }
    }

    /// Reads one entry of a proposal list. A value that is not an entry at
    /// all becomes an entry whose nurse is that value and that has no rooms.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(entry) => entry,
            Err(_) => Self {
                nurse_name: Claim::Other(value),
                ..Self::default()
            },
        }
    }
}

fn loose_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Claim>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(Claim::from).collect(),
        other => vec![Claim::from(other)],
    })
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Converts an untrusted proposal into a scored [`SchedulingResult`].
///
/// Entries are consumed in order. An entry for a nurse not on the roster is
/// dropped whole. Within an entry, a room number that is not an occupied
/// room, or that an earlier entry already claimed, is skipped; the first
/// claim wins. Every skip adds a global warning. After scoring, each nurse
/// breaking a hard rule adds a global warning, and any occupied room left
/// unclaimed adds one more.
pub fn validate_external_proposal(
    roster: &Roster,
    rooms: &[Room],
    proposals: &[ProposedAssignment],
) -> SchedulingResult {
    let occupied: Vec<&Room> = rooms.iter().filter(|r| r.is_occupied).collect();
    if occupied.is_empty() {
        return SchedulingResult::empty_floor(roster);
    }

    let mut assignments: Vec<Assignment> = roster
        .nurses()
        .iter()
        .cloned()
        .map(Assignment::new)
        .collect();
    let mut warnings = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for proposal in proposals {
        let slot = proposal
            .nurse_name
            .as_text()
            .and_then(|name| assignments.iter().position(|a| a.name() == name));
        let Some(slot) = slot else {
            debug!(nurse = %proposal.nurse_name, "dropping proposal entry for unknown nurse");
            warnings.push(format!("Unknown nurse: {}", proposal.nurse_name));
            continue;
        };

        for number in &proposal.assigned_rooms {
            let room = number
                .as_text()
                .and_then(|n| occupied.iter().copied().find(|r| r.number == n));
            let Some(room) = room else {
                debug!(room = %number, "skipping unknown room");
                warnings.push(format!("Unknown room: {number}"));
                continue;
            };

            if !claimed.insert(room.number.as_str()) {
                debug!(room = %number, nurse = %proposal.nurse_name, "skipping duplicate claim");
                warnings.push(format!("Room {number} assigned to multiple nurses"));
                continue;
            }

            assignments[slot].push_room(room.clone());
        }
    }

    for assignment in &mut assignments {
        annotate(assignment);
        warnings.extend(hard_rule_warnings(assignment));
    }

    let unassigned: Vec<String> = occupied
        .iter()
        .filter(|r| !claimed.contains(r.number.as_str()))
        .map(|r| r.number.clone())
        .collect();
    if !unassigned.is_empty() {
        warnings.push(format!(
            "{} rooms left unassigned: {}",
            unassigned.len(),
            unassigned.join(", ")
        ));
    }

    SchedulingResult::new(assignments, warnings, occupied.len(), unassigned)
}

/// Run-level warnings for a scored nurse breaking the chemo cap or their
/// role's room count. Spread is left per-nurse.
fn hard_rule_warnings(assignment: &Assignment) -> Vec<String> {
    let name = assignment.name();
    let count = assignment.room_count();
    let mut warnings = Vec::new();

    if assignment.chemo_count > MAX_CHEMO_PER_NURSE {
        warnings.push(format!(
            "{name} assigned {} chemo patients",
            assignment.chemo_count
        ));
    }
    if assignment.nurse.is_charge && count != CHARGE_ROOM_COUNT {
        warnings.push(format!(
            "Charge nurse {name} has {count} patients instead of {CHARGE_ROOM_COUNT}"
        ));
    }
    if assignment.nurse.is_off_care && count > 0 {
        warnings.push(format!("Off-care nurse {name} assigned {count} patients"));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NO_OCCUPIED_ROOMS};
    use serde_json::json;

    fn roster() -> Roster {
        Roster::new(["Adams", "Brown", "Chen", "Davis", "Evans"]).unwrap()
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room::numbered("600").with_difficulty(Difficulty::Hard),
            Room::numbered("601").with_chemo(),
            Room::numbered("602"),
            Room::numbered("603").vacant(),
        ]
    }

    #[test]
    fn test_clean_proposal() {
        let proposals = vec![
            ProposedAssignment::new("Adams", ["600", "601"]),
            ProposedAssignment::new("Brown", ["602"]),
        ];
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);

        assert!(result.success, "{:?}", result.warnings);
        assert_eq!(result.total_rooms, 3);
        let adams = result.assignment_for("Adams").unwrap();
        assert_eq!(adams.room_numbers(), vec!["600", "601"]);
        assert_eq!(adams.chemo_count, 1);
        assert_eq!(adams.difficulty_score, 4);
        assert_eq!(adams.rooms[0].assigned_nurse.as_deref(), Some("Adams"));
        assert!(result.unassigned_rooms.is_empty());
    }

    #[test]
    fn test_duplicate_room_first_claim_wins() {
        let proposals = vec![
            ProposedAssignment::new("Adams", ["600", "601", "602"]),
            ProposedAssignment::new("Brown", ["601"]),
        ];
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);

        assert!(!result.success);
        assert_eq!(result.warnings, vec!["Room 601 assigned to multiple nurses"]);
        assert!(result.assignment_for("Adams").unwrap().holds("601"));
        assert_eq!(result.assignment_for("Brown").unwrap().room_count(), 0);
    }

    #[test]
    fn test_unknown_nurse_drops_entry() {
        let proposals = vec![
            ProposedAssignment::new("Zed", ["600"]),
            ProposedAssignment::new("Adams", ["600", "601", "602"]),
        ];
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);
        assert_eq!(result.warnings, vec!["Unknown nurse: Zed"]);
        assert_eq!(result.nurse_for_room("600"), Some("Adams"));
    }

    #[test]
    fn test_unknown_and_vacant_rooms() {
        let proposals = vec![ProposedAssignment::new(
            "Adams",
            ["600", "601", "602", "603", "999"],
        )];
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);
        assert_eq!(result.warnings, vec!["Unknown room: 603", "Unknown room: 999"]);
        assert_eq!(result.assignment_for("Adams").unwrap().room_count(), 3);
    }

    #[test]
    fn test_unclaimed_rooms_listed() {
        let proposals = vec![ProposedAssignment::new("Adams", ["601"])];
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);
        assert_eq!(result.warnings, vec!["2 rooms left unassigned: 600, 602"]);
        assert_eq!(result.unassigned_rooms, vec!["600", "602"]);
        assert_eq!(
            result.assigned_room_count() + result.unassigned_rooms.len(),
            result.total_rooms
        );
    }

    #[test]
    fn test_chemo_overload_is_global() {
        let rooms = vec![
            Room::numbered("600").with_chemo(),
            Room::numbered("620").with_chemo(),
        ];
        let proposals = vec![ProposedAssignment::new("Adams", ["600", "620"])];
        let result = validate_external_proposal(&roster(), &rooms, &proposals);

        let adams = result.assignment_for("Adams").unwrap();
        assert_eq!(adams.chemo_count, 2);
        assert_eq!(
            adams.warnings,
            vec![
                "Has 2 chemo patients (max 1 allowed)",
                "Rooms are spread across multiple areas"
            ]
        );
        assert_eq!(result.warnings, vec!["Adams assigned 2 chemo patients"]);
        assert!(!result.success);
    }

    #[test]
    fn test_spread_alone_stays_per_nurse() {
        let rooms = vec![Room::numbered("600"), Room::numbered("620")];
        let proposals = vec![ProposedAssignment::new("Adams", ["600", "620"])];
        let result = validate_external_proposal(&roster(), &rooms, &proposals);

        assert!(result.has_nurse_warnings());
        assert!(result.success, "{:?}", result.warnings);
    }

    #[test]
    fn test_charge_count_is_global() {
        let roster = Roster::new(["Lead", "B", "C", "D", "E", "F"]).unwrap();
        let proposals = vec![
            ProposedAssignment::new("Lead", ["600"]),
            ProposedAssignment::new("B", ["601", "602"]),
        ];
        let result = validate_external_proposal(&roster, &rooms(), &proposals);
        assert_eq!(result.warnings, vec!["Charge nurse Lead has 1 patients instead of 3"]);
    }

    #[test]
    fn test_off_care_flagged() {
        let roster = Roster::new(["Off", "B", "C", "D", "E", "F", "G"]).unwrap();
        let proposals = vec![ProposedAssignment::new("Off", ["600", "601", "602"])];
        let result = validate_external_proposal(&roster, &rooms(), &proposals);
        let off = result.assignment_for("Off").unwrap();
        assert!(off.nurse.is_off_care);
        assert_eq!(off.warnings, vec!["Off-care nurse should have 0 patients, has 3"]);
        assert_eq!(result.warnings, vec!["Off-care nurse Off assigned 3 patients"]);
        assert!(!result.success);
    }

    #[test]
    fn test_empty_floor() {
        let rooms = vec![Room::numbered("600").vacant()];
        let result = validate_external_proposal(&roster(), &rooms, &[]);
        assert!(result.success);
        assert_eq!(result.warnings, vec![NO_OCCUPIED_ROOMS]);
        assert_eq!(result.assignments.len(), 5);
    }

    #[test]
    fn test_proposal_json_aliases() {
        let p: ProposedAssignment =
            serde_json::from_str(r#"{"nurseName": "Adams", "roomNumbers": ["600"]}"#).unwrap();
        assert_eq!(p.assigned_rooms, vec![Claim::from("600")]);

        let p: ProposedAssignment = serde_json::from_str(r#"{"nurseName": "Adams"}"#).unwrap();
        assert!(p.assigned_rooms.is_empty());
    }

    #[test]
    fn test_loose_entry_fields() {
        let p = ProposedAssignment::from_value(json!({
            "assignedRooms": [604, "600", null],
            "reasoning": 3
        }));
        assert_eq!(p.nurse_name, Claim::Other(Value::Null));
        assert_eq!(
            p.assigned_rooms,
            vec![Claim::Other(json!(604)), Claim::from("600"), Claim::Other(Value::Null)]
        );
        assert_eq!(p.reasoning, None);

        let p =
            ProposedAssignment::from_value(json!({"nurseName": "Adams", "assignedRooms": "600"}));
        assert_eq!(p.assigned_rooms, vec![Claim::from("600")]);

        let p = ProposedAssignment::from_value(json!(5));
        assert_eq!(p.nurse_name, Claim::Other(json!(5)));
        assert!(p.assigned_rooms.is_empty());
    }

    #[test]
    fn test_non_string_values_are_skipped_with_warnings() {
        let proposals: Vec<ProposedAssignment> = [
            json!({"nurseName": "Adams", "assignedRooms": ["600"]}),
            json!({"nurseName": "Brown", "assignedRooms": [601, "602"]}),
            json!({"assignedRooms": ["601"]}),
            json!({"nurseName": 7, "assignedRooms": ["601"]}),
        ]
        .into_iter()
        .map(ProposedAssignment::from_value)
        .collect();
        let result = validate_external_proposal(&roster(), &rooms(), &proposals);

        assert_eq!(
            result.warnings,
            vec![
                "Unknown room: 601",
                "Unknown nurse: null",
                "Unknown nurse: 7",
                "1 rooms left unassigned: 601",
            ]
        );
        assert_eq!(result.nurse_for_room("600"), Some("Adams"));
        assert_eq!(result.nurse_for_room("602"), Some("Brown"));
    }
}
