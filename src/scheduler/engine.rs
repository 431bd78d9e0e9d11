//! Greedy multi-pass room allocator.
//!
//! # Algorithm
//!
//! 1. Order occupied rooms hardest first (stable), split into chemo and
//!    non-chemo.
//! 2. Size a soft quota per active nurse (charge nurse fixed at three).
//! 3. Continuity: rooms go back to last shift's nurse, ignoring quota.
//! 4. Chemo cap: each remaining chemo room goes to the first nurse with
//!    spare quota who has not taken a chemo room in this pass.
//! 5. Locality: remaining rooms are grouped by block, largest group first.
//!    A group goes whole to the nurse with the most spare quota if it fits;
//!    otherwise it is split room by room, hardest first.
//! 6. Score and annotate every nurse, then add run-level warnings.
//!
//! The result is a heuristic, not an optimum. A chemo room held through
//! continuity does not block the chemo-cap pass, so a nurse can end with
//! two; the validator flags it.
//!
//! # Complexity
//! O(r log r + r * n) where r = rooms, n = nurses.

use std::cmp::Reverse;

use tracing::{debug, info, instrument, warn};

use super::context::AllocationContext;
use super::kpi::WorkloadKpi;
use crate::config::EngineConfig;
use crate::models::{Room, Roster, SchedulingResult};
use crate::proximity::{self, BlockId};
use crate::validation::{annotate, MAX_CHEMO_PER_NURSE};

/// Global warning when the difficulty spread exceeds the tolerance.
pub const UNBALANCED_WARNING: &str = "Difficulty distribution is unbalanced across nurses";

/// Input container for scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Nurses on shift.
    pub roster: Roster,
    /// Rooms on the unit, occupied or not.
    pub rooms: Vec<Room>,
    /// Keep rooms with last shift's nurse.
    pub prioritize_continuity: bool,
}

impl ScheduleRequest {
    /// Creates a request with continuity on.
    pub fn new(roster: Roster, rooms: Vec<Room>) -> Self {
        Self {
            roster,
            rooms,
            prioritize_continuity: true,
        }
    }

    /// Sets the continuity flag.
    pub fn with_continuity(mut self, prioritize_continuity: bool) -> Self {
        self.prioritize_continuity = prioritize_continuity;
        self
    }
}

/// Greedy room-to-nurse scheduler.
///
/// Never fails on a valid [`Roster`]: every policy problem comes back as a
/// warning on the result. Input rooms are not modified; the result carries
/// its own copies with `assigned_nurse` filled in.
///
/// # Example
///
/// ```
/// use ward_assign::models::{Room, Roster};
/// use ward_assign::scheduler::NurseScheduler;
///
/// let roster = Roster::new(["Adams", "Brown", "Chen", "Davis", "Evans"]).unwrap();
/// let rooms: Vec<Room> = ["600", "601", "602", "603", "604"]
///     .into_iter()
///     .map(Room::numbered)
///     .collect();
///
/// let result = NurseScheduler::new().schedule(&roster, &rooms);
/// assert_eq!(result.total_rooms, 5);
/// assert_eq!(result.assigned_room_count(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NurseScheduler {
    config: EngineConfig,
}

impl NurseScheduler {
    /// Creates a scheduler with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole config. An out-of-range balance tolerance is
    /// replaced by the default.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        let fallback = self.config.balance_tolerance;
        self.config = config;
        if let Err(e) = self.config.check() {
            warn!(error = %e, "keeping previous balance tolerance");
            self.config.balance_tolerance = fallback;
        }
        self
    }

    /// Sets the continuity flag.
    pub fn with_continuity(mut self, prioritize_continuity: bool) -> Self {
        self.config.prioritize_continuity = prioritize_continuity;
        self
    }

    /// Sets the difficulty balance tolerance. Negative or non-finite values
    /// are ignored.
    pub fn with_balance_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance >= 0.0 {
            self.config.balance_tolerance = tolerance;
        } else {
            warn!(tolerance, "ignoring invalid balance tolerance");
        }
        self
    }

    /// Active config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assigns occupied rooms to nurses.
    #[instrument(skip_all, fields(nurses = roster.size(), rooms = rooms.len()))]
    pub fn schedule(&self, roster: &Roster, rooms: &[Room]) -> SchedulingResult {
        let mut ctx = AllocationContext::new(roster, rooms);
        let total_rooms = ctx.occupied_count();
        if total_rooms == 0 {
            info!("no occupied rooms");
            return SchedulingResult::empty_floor(roster);
        }

        let (chemo, general): (Vec<usize>, Vec<usize>) = ctx
            .occupied_by_difficulty()
            .into_iter()
            .partition(|&i| ctx.room(i).is_chemo);

        if self.config.prioritize_continuity {
            let kept = continuity_pass(&mut ctx);
            debug!(kept, "continuity pass done");
        }

        let unplaced_chemo = chemo_pass(&mut ctx, &chemo);
        debug!(chemo = chemo.len(), unplaced_chemo, "chemo pass done");

        locality_pass(&mut ctx, &general);

        let unassigned_rooms = ctx.unassigned_numbers();
        let mut assignments = ctx.into_assignments();
        for assignment in &mut assignments {
            annotate(assignment);
        }

        let kpi = WorkloadKpi::calculate(&assignments);
        let mut warnings = Vec::new();
        if unplaced_chemo > 0 {
            warnings.push(format!(
                "{unplaced_chemo} chemo rooms could not be assigned \
                 (max {MAX_CHEMO_PER_NURSE} per nurse)"
            ));
        }
        if kpi.chemo_overflow_nurses > 0 {
            warnings.push(format!(
                "{} nurses have multiple chemo patients",
                kpi.chemo_overflow_nurses
            ));
        }
        if !kpi.is_balanced(self.config.balance_tolerance) {
            warnings.push(UNBALANCED_WARNING.to_string());
        }

        info!(
            total_rooms,
            unassigned = unassigned_rooms.len(),
            warnings = warnings.len(),
            max_deviation = kpi.max_deviation,
            "schedule generated"
        );

        SchedulingResult::new(assignments, warnings, total_rooms, unassigned_rooms)
    }

    /// Schedules from a request. The request's continuity flag wins over
    /// the configured one.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> SchedulingResult {
        self.clone()
            .with_continuity(request.prioritize_continuity)
            .schedule(&request.roster, &request.rooms)
    }
}

/// Runs the engine with the default policy.
pub fn generate(roster: &Roster, rooms: &[Room], prioritize_continuity: bool) -> SchedulingResult {
    NurseScheduler::new()
        .with_continuity(prioritize_continuity)
        .schedule(roster, rooms)
}

/// Hands each occupied room back to last shift's nurse when that nurse is
/// active today. Returns the number of rooms kept.
fn continuity_pass(ctx: &mut AllocationContext) -> usize {
    let occupied: Vec<usize> = ctx.occupied().collect();
    let mut kept = 0;
    for room in occupied {
        let Some(previous) = ctx.room(room).previous_nurse.as_deref() else {
            continue;
        };
        if let Some(slot) = ctx.active_slot_named(previous) {
            ctx.assign(slot, room);
            kept += 1;
        }
    }
    kept
}

/// Spreads chemo rooms one per nurse within quota. Returns how many could
/// not be placed.
fn chemo_pass(ctx: &mut AllocationContext, chemo: &[usize]) -> usize {
    let mut unplaced = 0;
    for &room in chemo {
        if ctx.is_assigned(room) {
            continue;
        }
        let taker = ctx
            .active_slots()
            .find(|(_, s)| !s.chemo_this_pass && s.remaining() > 0)
            .map(|(i, _)| i);
        match taker {
            Some(slot) => {
                ctx.assign(slot, room);
                ctx.slot_mut(slot).chemo_this_pass = true;
            }
            None => unplaced += 1,
        }
    }
    unplaced
}

/// Places the remaining non-chemo rooms block by block.
fn locality_pass(ctx: &mut AllocationContext, general: &[usize]) {
    let mut groups: Vec<(Option<BlockId>, Vec<usize>)> = Vec::new();
    for &room in general.iter().filter(|&&i| !ctx.is_assigned(i)) {
        let block = proximity::block_of(&ctx.room(room).number);
        match groups.iter_mut().find(|(b, _)| *b == block) {
            Some((_, members)) => members.push(room),
            None => groups.push((block, vec![room])),
        }
    }
    groups.sort_by_key(|(_, members)| Reverse(members.len()));

    for (block, mut members) in groups {
        if let Some(slot) = ctx.roomiest(members.len() as isize) {
            debug!(block = ?block, size = members.len(), slot, "block kept together");
            for room in members {
                ctx.assign(slot, room);
            }
            continue;
        }

        debug!(block = ?block, size = members.len(), "splitting block");
        members.sort_by_key(|&i| Reverse(ctx.room(i).weight()));
        for room in members {
            match ctx.roomiest(1) {
                Some(slot) => ctx.assign(slot, room),
                None => debug!(room = %ctx.room(room).number, "no capacity left"),
            }
        }
    }
}
