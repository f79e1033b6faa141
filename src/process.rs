use std::collections::HashSet;
use std::fmt;

use crate::error::SimulationError;

/// Process identifier, caller-assigned, unique and non-zero within a
/// workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(u32);

impl Pid {
    pub fn new(raw: u32) -> Self {
        Pid(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Lifecycle of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Blocked,
    Finished,
}

/// One simulated process: the immutable inputs plus the bookkeeping a
/// scheduler mutates while driving it to completion.
///
/// A record is consumed by exactly one scheduler run. Callers that run
/// several engines over the same workload clone the records first; the
/// runs never share state.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pid: Pid,
    burst_time: usize,
    priority: i32,
    data_size: usize,
    state: ProcessState,
    remaining: usize,
    start_time: Option<usize>,
    finish_time: Option<usize>,
}

impl ProcessRecord {
    /// `priority`: lower value = more urgent. `data_size` is carried
    /// for display only; scheduling never reads it.
    pub fn new(pid: Pid, burst_time: usize, priority: i32, data_size: usize) -> Self {
        ProcessRecord {
            pid,
            burst_time,
            priority,
            data_size,
            state: ProcessState::New,
            remaining: burst_time,
            start_time: None,
            finish_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn burst_time(&self) -> usize {
        self.burst_time
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Logical time of first dispatch, once it happened.
    pub fn start_time(&self) -> Option<usize> {
        self.start_time
    }

    /// Logical time the burst ran out, once it did.
    pub fn finish_time(&self) -> Option<usize> {
        self.finish_time
    }

    /// `finish - start`, available once both timestamps exist.
    pub fn turnaround(&self) -> Option<usize> {
        Some(self.finish_time? - self.start_time?)
    }

    pub(crate) fn make_ready(&mut self) {
        self.state = ProcessState::Ready;
    }

    /// First dispatch records the start time; later dispatches keep it.
    pub(crate) fn dispatch(&mut self, now: usize) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.state = ProcessState::Running;
    }

    pub(crate) fn execute(&mut self, slice: usize) {
        debug_assert!(slice <= self.remaining);
        self.remaining -= slice;
    }

    pub(crate) fn block(&mut self) {
        self.state = ProcessState::Blocked;
    }

    pub(crate) fn finish(&mut self, now: usize) {
        self.state = ProcessState::Finished;
        self.finish_time = Some(now);
    }
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(t={}, prio={})", self.pid, self.remaining, self.priority)
    }
}

/// Preconditions shared by both schedulers: a non-empty workload,
/// positive bursts, unique non-zero pids. Checked before any clock tick.
pub fn validate_workload(workload: &[ProcessRecord]) -> Result<(), SimulationError> {
    if workload.is_empty() {
        return Err(SimulationError::invalid("workload is empty"));
    }

    let mut seen = HashSet::new();
    for process in workload {
        if process.pid().raw() == 0 {
            return Err(SimulationError::invalid("pid 0 is reserved"));
        }
        if process.burst_time() == 0 {
            return Err(SimulationError::invalid(format!(
                "{} has a zero burst time",
                process.pid()
            )));
        }
        if !seen.insert(process.pid()) {
            return Err(SimulationError::invalid(format!(
                "duplicate pid {}",
                process.pid()
            )));
        }
    }

    Ok(())
}
