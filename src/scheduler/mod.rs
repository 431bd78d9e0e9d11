//! Greedy room allocation and workload indicators.
//!
//! # Algorithm
//!
//! `NurseScheduler` runs a fixed sequence of greedy passes (continuity,
//! chemo cap, block locality) against soft per-nurse quotas, then scores the
//! draft with the shared validator. It is not optimal, but it is fast and
//! fully deterministic for a given room and roster order.
//!
//! # KPI
//!
//! `WorkloadKpi` summarizes difficulty balance, room spread, and chemo
//! overflow across the nurses taking patients.

mod context;
mod engine;
mod kpi;

pub use engine::{generate, NurseScheduler, ScheduleRequest, UNBALANCED_WARNING};
pub use kpi::WorkloadKpi;
