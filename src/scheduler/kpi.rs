//! Workload indicators.
//!
//! Summarizes how evenly a result spreads work across the nurses who take
//! patients. The engine's balance warning is driven by `max_deviation`.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Mean difficulty | Average difficulty score over active nurses |
//! | Max deviation | Largest \|score − mean\| |
//! | Room spread | Fewest and most rooms held |
//! | Chemo overflow | Nurses holding more than one chemo room |

use serde::Serialize;

use crate::models::Assignment;
use crate::validation::MAX_CHEMO_PER_NURSE;

/// Workload indicators over active (non off-care) nurses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadKpi {
    /// Nurses taking patients.
    pub active_nurses: usize,
    /// Rooms held across active nurses.
    pub rooms_assigned: usize,
    /// Mean difficulty score.
    pub mean_difficulty: f64,
    /// Largest absolute gap between a nurse's score and the mean.
    pub max_deviation: f64,
    /// Fewest rooms held by one nurse.
    pub min_rooms: usize,
    /// Most rooms held by one nurse.
    pub max_rooms: usize,
    /// Nurses above the chemo cap.
    pub chemo_overflow_nurses: usize,
}

impl WorkloadKpi {
    /// Computes indicators from assignments. Off-care nurses are ignored.
    ///
    /// Uses each assignment's stored `difficulty_score` and `chemo_count`,
    /// so call it after the assignments have been annotated.
    pub fn calculate(assignments: &[Assignment]) -> Self {
        let active: Vec<&Assignment> = assignments.iter().filter(|a| a.nurse.is_active()).collect();

        if active.is_empty() {
            return Self {
                active_nurses: 0,
                rooms_assigned: 0,
                mean_difficulty: 0.0,
                max_deviation: 0.0,
                min_rooms: 0,
                max_rooms: 0,
                chemo_overflow_nurses: 0,
            };
        }

        let mean = active.iter().map(|a| f64::from(a.difficulty_score)).sum::<f64>()
            / active.len() as f64;
        let max_deviation = active
            .iter()
            .map(|a| (f64::from(a.difficulty_score) - mean).abs())
            .fold(0.0, f64::max);

        Self {
            active_nurses: active.len(),
            rooms_assigned: active.iter().map(|a| a.room_count()).sum(),
            mean_difficulty: mean,
            max_deviation,
            min_rooms: active.iter().map(|a| a.room_count()).min().unwrap_or(0),
            max_rooms: active.iter().map(|a| a.room_count()).max().unwrap_or(0),
            chemo_overflow_nurses: active
                .iter()
                .filter(|a| a.chemo_count > MAX_CHEMO_PER_NURSE)
                .count(),
        }
    }

    /// Whether every nurse's difficulty score is within `tolerance` of the
    /// mean.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.max_deviation <= tolerance
    }
}
