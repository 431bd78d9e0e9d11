//! Allocation state for one engine run.
//!
//! The context owns working copies of the rooms and one slot per roster
//! nurse. Each slot carries its own quota and counters, so passes never
//! juggle parallel arrays indexed by position.

use std::cmp::Reverse;

use crate::models::{Assignment, Room, Roster, CHARGE_ROOM_COUNT};

/// Per-nurse allocation state.
#[derive(Debug, Clone)]
pub(crate) struct NurseSlot {
    /// Rooms taken so far, in assignment order.
    pub assignment: Assignment,
    /// Soft target room count. Continuity may push a nurse past it.
    pub quota: usize,
    /// Took a chemo room during the chemo-cap pass.
    pub chemo_this_pass: bool,
}

impl NurseSlot {
    /// Quota minus rooms held. Negative once continuity overfills a nurse.
    #[inline]
    pub fn remaining(&self) -> isize {
        self.quota as isize - self.assignment.room_count() as isize
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.assignment.nurse.is_active()
    }
}

/// Working state threaded through the allocation passes.
#[derive(Debug, Clone)]
pub(crate) struct AllocationContext {
    rooms: Vec<Room>,
    slots: Vec<NurseSlot>,
}

impl AllocationContext {
    /// Copies the rooms (clearing any stale assignment) and sets up one slot
    /// per nurse with quotas sized to the occupied-room count.
    pub fn new(roster: &Roster, rooms: &[Room]) -> Self {
        let rooms: Vec<Room> = rooms
            .iter()
            .cloned()
            .map(|mut room| {
                room.assigned_nurse = None;
                room
            })
            .collect();
        let occupied = rooms.iter().filter(|r| r.is_occupied).count();

        let slots = roster
            .nurses()
            .iter()
            .cloned()
            .zip(room_quotas(roster, occupied))
            .map(|(nurse, quota)| NurseSlot {
                assignment: Assignment::new(nurse),
                quota,
                chemo_this_pass: false,
            })
            .collect();

        Self { rooms, slots }
    }

    /// Number of occupied rooms.
    pub fn occupied_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_occupied).count()
    }

    /// Indices of occupied rooms in input order.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_occupied)
            .map(|(i, _)| i)
    }

    /// Indices of occupied rooms, hardest first. Ties keep input order.
    pub fn occupied_by_difficulty(&self) -> Vec<usize> {
        let mut order: Vec<usize> = self.occupied().collect();
        order.sort_by_key(|&i| Reverse(self.rooms[i].weight()));
        order
    }

    #[inline]
    pub fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    #[inline]
    pub fn is_assigned(&self, index: usize) -> bool {
        self.rooms[index].assigned_nurse.is_some()
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut NurseSlot {
        &mut self.slots[slot]
    }

    /// Active slots in roster order, with their slot index.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &NurseSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    /// Index of the active nurse with this name.
    pub fn active_slot_named(&self, name: &str) -> Option<usize> {
        self.active_slots()
            .find(|(_, s)| s.assignment.name() == name)
            .map(|(i, _)| i)
    }

    /// The active nurse with the most remaining capacity, provided it is at
    /// least `min_capacity`. The earliest nurse in roster order wins ties.
    pub fn roomiest(&self, min_capacity: isize) -> Option<usize> {
        let mut best: Option<(usize, isize)> = None;
        for (i, slot) in self.active_slots() {
            let capacity = slot.remaining();
            if capacity < min_capacity {
                continue;
            }
            match best {
                Some((_, top)) if capacity <= top => {}
                _ => best = Some((i, capacity)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Gives a room to a nurse.
    pub fn assign(&mut self, slot: usize, room: usize) {
        let nurse = &mut self.slots[slot].assignment;
        self.rooms[room].assigned_nurse = Some(nurse.nurse.name.clone());
        nurse.push_room(self.rooms[room].clone());
    }

    /// Numbers of occupied rooms still without a nurse, in input order.
    pub fn unassigned_numbers(&self) -> Vec<String> {
        self.rooms
            .iter()
            .filter(|r| r.is_occupied && r.assigned_nurse.is_none())
            .map(|r| r.number.clone())
            .collect()
    }

    /// Consumes the context, yielding assignments in roster order.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.slots.into_iter().map(|s| s.assignment).collect()
    }
}

/// Soft room quotas, aligned with `roster.nurses()`.
///
/// A charge nurse is fixed at three rooms. The rest of the occupied rooms are
/// split evenly over the other active nurses, with the remainder handed out
/// one at a time in roster order. An off-care nurse gets zero.
pub(crate) fn room_quotas(roster: &Roster, occupied: usize) -> Vec<usize> {
    let fixed = if roster.charge().is_some() {
        CHARGE_ROOM_COUNT
    } else {
        0
    };
    let sharing = roster
        .nurses()
        .iter()
        .filter(|n| n.is_active() && !n.is_charge)
        .count();
    let pool = occupied.saturating_sub(fixed);
    let base = pool / sharing;
    let mut extra = pool % sharing;

    roster
        .nurses()
        .iter()
        .map(|nurse| {
            if nurse.is_charge {
                CHARGE_ROOM_COUNT
            } else if nurse.is_off_care {
                0
            } else if extra > 0 {
                extra -= 1;
                base + 1
            } else {
                base
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn roster(n: usize) -> Roster {
        Roster::new((0..n).map(|i| format!("N{i}"))).unwrap()
    }

    #[test]
    fn test_quotas_five() {
        assert_eq!(room_quotas(&roster(5), 23), vec![5, 5, 5, 4, 4]);
        assert_eq!(room_quotas(&roster(5), 0), vec![0; 5]);
    }

    #[test]
    fn test_quotas_six_with_charge() {
        assert_eq!(room_quotas(&roster(6), 30), vec![3, 6, 6, 5, 5, 5]);
        assert_eq!(room_quotas(&roster(6), 8), vec![3, 1, 1, 1, 1, 1]);
        // Fewer rooms than the charge quota: nobody else gets a share
        assert_eq!(room_quotas(&roster(6), 2), vec![3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_quotas_seven_with_off_care() {
        assert_eq!(room_quotas(&roster(7), 25), vec![0, 5, 4, 4, 4, 4, 4]);
        assert_eq!(room_quotas(&roster(7), 1), vec![0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_quota_sum_covers_floor() {
        for n in 5..=7 {
            for occupied in 3..40 {
                let total: usize = room_quotas(&roster(n), occupied).iter().sum();
                assert_eq!(total, occupied, "roster {n}, {occupied} rooms");
            }
        }
    }

    #[test]
    fn test_context_clears_stale_assignments() {
        let mut stale = Room::numbered("600");
        stale.assigned_nurse = Some("Ghost".into());
        let ctx = AllocationContext::new(&roster(5), &[stale, Room::numbered("601").vacant()]);
        assert!(!ctx.is_assigned(0));
        assert_eq!(ctx.occupied_count(), 1);
        assert_eq!(ctx.unassigned_numbers(), vec!["600"]);
    }

    #[test]
    fn test_difficulty_order_is_stable() {
        let rooms = vec![
            Room::numbered("600"),
            Room::numbered("601").with_difficulty(Difficulty::Hard),
            Room::numbered("602").with_difficulty(Difficulty::Medium),
            Room::numbered("603").with_difficulty(Difficulty::Hard),
            Room::numbered("604").vacant().with_difficulty(Difficulty::Hard),
        ];
        let ctx = AllocationContext::new(&roster(5), &rooms);
        assert_eq!(ctx.occupied_by_difficulty(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_roomiest_prefers_first_on_ties() {
        let rooms: Vec<Room> = (0..10).map(|i| Room::numbered(format!("{}", 600 + i))).collect();
        let mut ctx = AllocationContext::new(&roster(5), &rooms);
        // quotas: 2 each
        assert_eq!(ctx.roomiest(1), Some(0));
        ctx.assign(0, 0);
        assert_eq!(ctx.roomiest(2), Some(1));
        assert_eq!(ctx.roomiest(3), None);
    }

    #[test]
    fn test_off_care_never_offered() {
        let rooms: Vec<Room> = (0..12).map(|i| Room::numbered(format!("{}", 600 + i))).collect();
        let ctx = AllocationContext::new(&roster(7), &rooms);
        assert!(ctx.active_slots().all(|(i, _)| i != 0));
        assert_eq!(ctx.active_slot_named("N0"), None);
        assert_eq!(ctx.active_slot_named("N3"), Some(3));
    }

    #[test]
    fn test_assign_updates_both_sides() {
        let rooms = vec![Room::numbered("600").with_chemo()];
        let mut ctx = AllocationContext::new(&roster(5), &rooms);
        ctx.assign(2, 0);
        assert!(ctx.is_assigned(0));
        assert_eq!(ctx.room(0).assigned_nurse.as_deref(), Some("N2"));
        let assignments = ctx.into_assignments();
        assert_eq!(assignments[2].chemo_count, 1);
        assert_eq!(assignments[2].rooms[0].assigned_nurse.as_deref(), Some("N2"));
    }
}
