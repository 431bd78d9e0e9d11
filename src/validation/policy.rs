//! Per-nurse policy rules.
//!
//! The single scoring core shared by engine output and external proposals:
//! given the rooms a nurse already holds, recompute their stats and list the
//! staffing policies they break.

use std::collections::HashMap;

use crate::models::{Assignment, Room, CHARGE_ROOM_COUNT};
use crate::proximity::{self, BlockId};

/// Most chemotherapy rooms a nurse may hold.
pub const MAX_CHEMO_PER_NURSE: usize = 1;

/// Per-nurse warning for rooms outside a single contiguous area.
pub const SPREAD_WARNING: &str = "Rooms are spread across multiple areas";

/// Stats and warnings recomputed from a nurse's rooms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyReport {
    /// Chemotherapy rooms held.
    pub chemo_count: usize,
    /// Sum of difficulty weights.
    pub difficulty_score: u32,
    /// Rooms sharing a block with at least one other held room.
    pub proximity_score: usize,
    /// Policy violations, in rule order.
    pub warnings: Vec<String>,
}

/// Counts rooms that sit in a block together with another of the same
/// nurse's rooms.
///
/// A nurse holding zero or one room scores their room count, so a single
/// room is never reported as spread out. Rooms outside the catalog never
/// contribute.
pub fn proximity_score(rooms: &[Room]) -> usize {
    if rooms.len() <= 1 {
        return rooms.len();
    }

    let mut per_block: HashMap<BlockId, usize> = HashMap::new();
    for room in rooms {
        if let Some(block) = proximity::block_of(&room.number) {
            *per_block.entry(block).or_insert(0) += 1;
        }
    }

    per_block.values().filter(|&&count| count >= 2).sum()
}

/// Recomputes a nurse's stats from their rooms and checks every rule.
///
/// Rules, in order:
/// 1. More than one chemo room.
/// 2. Charge nurse without exactly three rooms.
/// 3. Off-care nurse with any room.
/// 4. Rooms not grouped into shared blocks.
pub fn score_and_warn(assignment: &Assignment) -> PolicyReport {
    let rooms = &assignment.rooms;
    let count = rooms.len();
    let chemo_count = rooms.iter().filter(|r| r.is_chemo).count();
    let difficulty_score = rooms.iter().map(Room::weight).sum();
    let proximity_score = proximity_score(rooms);

    let mut warnings = Vec::new();

    if chemo_count > MAX_CHEMO_PER_NURSE {
        warnings.push(format!(
            "Has {chemo_count} chemo patients (max {MAX_CHEMO_PER_NURSE} allowed)"
        ));
    }

    if assignment.nurse.is_charge && count != CHARGE_ROOM_COUNT {
        warnings.push(format!(
            "Charge nurse should have {CHARGE_ROOM_COUNT} patients, has {count}"
        ));
    }

    if assignment.nurse.is_off_care && count > 0 {
        warnings.push(format!("Off-care nurse should have 0 patients, has {count}"));
    }

    if proximity_score < count {
        warnings.push(SPREAD_WARNING.to_string());
    }

    PolicyReport {
        chemo_count,
        difficulty_score,
        proximity_score,
        warnings,
    }
}

/// Writes a fresh [`PolicyReport`] back onto the assignment, replacing any
/// earlier stats and warnings.
pub fn annotate(assignment: &mut Assignment) {
    let report = score_and_warn(assignment);
    assignment.chemo_count = report.chemo_count;
    assignment.difficulty_score = report.difficulty_score;
    assignment.warnings = report.warnings;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NurseRole, Roster};

    fn nurse_with(role: NurseRole, rooms: Vec<Room>) -> Assignment {
        let mut a = Assignment::new(role);
        for r in rooms {
            a.push_room(r);
        }
        a
    }

    fn charge_role() -> NurseRole {
        Roster::new(["C", "B", "D", "E", "F", "G"]).unwrap().nurses()[0].clone()
    }

    fn off_care_role() -> NurseRole {
        Roster::new(["O", "B", "D", "E", "F", "G", "H"]).unwrap().nurses()[0].clone()
    }

    #[test]
    fn test_clean_assignment() {
        let a = nurse_with(
            NurseRole::staff("A"),
            vec![
                Room::numbered("600").with_difficulty(Difficulty::Hard),
                Room::numbered("601").with_chemo(),
                Room::numbered("602").with_difficulty(Difficulty::Medium),
            ],
        );
        let report = score_and_warn(&a);
        assert_eq!(report.chemo_count, 1);
        assert_eq!(report.difficulty_score, 6);
        assert_eq!(report.proximity_score, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_chemo_overflow() {
        let a = nurse_with(
            NurseRole::staff("A"),
            vec![Room::numbered("600").with_chemo(), Room::numbered("601").with_chemo()],
        );
        let report = score_and_warn(&a);
        assert_eq!(report.chemo_count, 2);
        assert_eq!(report.warnings, vec!["Has 2 chemo patients (max 1 allowed)"]);
    }

    #[test]
    fn test_charge_quota() {
        let a = nurse_with(charge_role(), vec![Room::numbered("600"), Room::numbered("601")]);
        let report = score_and_warn(&a);
        assert_eq!(report.warnings, vec!["Charge nurse should have 3 patients, has 2"]);

        let a = nurse_with(
            charge_role(),
            vec![Room::numbered("600"), Room::numbered("601"), Room::numbered("602")],
        );
        assert!(score_and_warn(&a).warnings.is_empty());
    }

    #[test]
    fn test_off_care_with_rooms() {
        let a = nurse_with(off_care_role(), vec![Room::numbered("600")]);
        let report = score_and_warn(&a);
        assert_eq!(report.warnings, vec!["Off-care nurse should have 0 patients, has 1"]);

        let idle = Assignment::new(off_care_role());
        assert!(score_and_warn(&idle).warnings.is_empty());
    }

    #[test]
    fn test_spread_rooms() {
        // 600/601 share block-1; 610 sits alone in block-3
        let a = nurse_with(
            NurseRole::staff("A"),
            vec![Room::numbered("600"), Room::numbered("601"), Room::numbered("610")],
        );
        let report = score_and_warn(&a);
        assert_eq!(report.proximity_score, 2);
        assert_eq!(report.warnings, vec![SPREAD_WARNING]);
    }

    #[test]
    fn test_proximity_edge_cases() {
        assert_eq!(proximity_score(&[]), 0);
        assert_eq!(proximity_score(&[Room::numbered("999")]), 1);
        // Two uncatalogued rooms never count as grouped
        assert_eq!(
            proximity_score(&[Room::numbered("998"), Room::numbered("999")]),
            0
        );
        assert_eq!(
            proximity_score(&[
                Room::numbered("615A"),
                Room::numbered("616B"),
                Room::numbered("617A"),
                Room::numbered("618B"),
            ]),
            4
        );
    }

    #[test]
    fn test_single_room_not_spread() {
        let a = nurse_with(NurseRole::staff("A"), vec![Room::numbered("623")]);
        assert!(score_and_warn(&a).warnings.is_empty());
    }

    #[test]
    fn test_annotate_overwrites() {
        let mut a = nurse_with(NurseRole::staff("A"), vec![Room::numbered("600").with_chemo()]);
        a.chemo_count = 7;
        a.difficulty_score = 99;
        a.warnings.push("stale".into());

        annotate(&mut a);
        assert_eq!(a.chemo_count, 1);
        assert_eq!(a.difficulty_score, 1);
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn test_rule_order() {
        let a = nurse_with(
            charge_role(),
            vec![
                Room::numbered("600").with_chemo(),
                Room::numbered("610").with_chemo(),
            ],
        );
        let report = score_and_warn(&a);
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings[0].starts_with("Has 2 chemo"));
        assert!(report.warnings[1].starts_with("Charge nurse"));
        assert_eq!(report.warnings[2], SPREAD_WARNING);
    }
}
