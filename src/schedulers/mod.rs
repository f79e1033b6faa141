//! The two scheduling engines and their shared outcome type.

use crate::process::ProcessRecord;

pub mod priority;
pub mod round_robin;

pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;

/// What a completed run hands back: the mutated records, in input
/// order, and the final value of the logical clock.
#[derive(Debug, Clone)]
pub struct SchedulerOutcome {
    pub processes: Vec<ProcessRecord>,
    pub total_time: usize,
}
