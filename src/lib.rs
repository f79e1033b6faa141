//! A discrete-time CPU scheduling simulator.
//!
//! Two engines share one process model: Round Robin with quantum
//! slicing and stochastic I/O blocking, and non-preemptive priority
//! scheduling. Each engine consumes its own copy of the workload,
//! advances a logical clock, and returns the mutated records plus the
//! total elapsed time; rendering is left to the caller.

pub mod error;
pub mod metrics;
pub mod process;
pub mod random;
pub mod schedulers;

pub use error::SimulationError;
pub use metrics::{MetricsReport, MetricsReporter, ProcessMetrics};
pub use process::{validate_workload, Pid, ProcessRecord, ProcessState};
pub use random::{DrawSource, EntropyDraws, FixedDraws, ScriptedDraws};
pub use schedulers::{PriorityScheduler, RoundRobinScheduler, SchedulerOutcome};
