use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::thread;
use std::time::Duration;

use super::SchedulerOutcome;
use crate::error::SimulationError;
use crate::process::{validate_workload, Pid, ProcessRecord};

/// Non-preemptive priority scheduling: lowest numeric priority first,
/// pid as the deterministic tie-break, every process runs to
/// completion in one dispatch.
///
/// All processes exist from clock 0, so a more urgent process can
/// never arrive mid-run and interrupt a less urgent one.
pub struct PriorityScheduler {
    pacing: Option<Duration>,
}

/// Heap entry keyed `(priority, pid)`. `BinaryHeap` is a max-heap, so
/// the comparison is reversed to pop the most urgent process first.
struct DispatchEntry {
    priority: i32,
    pid: Pid,
    slot: usize,
}

impl PartialEq for DispatchEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.pid == other.pid
    }
}

impl Eq for DispatchEntry {}

impl Ord for DispatchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.pid.cmp(&self.pid))
    }
}

impl PartialOrd for DispatchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self { pacing: None }
    }

    /// Sleeps this long between dispatch and clock advance, for
    /// human-paced display. No effect on scheduling decisions.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Runs the workload to completion. The returned records keep the
    /// input order; the clock value is the total simulated time.
    pub fn run(
        &self,
        mut workload: Vec<ProcessRecord>,
    ) -> Result<SchedulerOutcome, SimulationError> {
        validate_workload(&workload)?;

        let mut queue: BinaryHeap<DispatchEntry> = workload
            .iter()
            .enumerate()
            .map(|(slot, process)| DispatchEntry {
                priority: process.priority(),
                pid: process.pid(),
                slot,
            })
            .collect();
        let mut clock = 0;

        for process in &mut workload {
            process.make_ready();
        }

        while let Some(entry) = queue.pop() {
            let process = &mut workload[entry.slot];
            process.dispatch(clock);
            log::info!("t={}: {} running", clock, process);

            if let Some(pause) = self.pacing {
                thread::sleep(pause);
            }

            let burst = process.remaining();
            clock += burst;
            process.execute(burst);
            process.finish(clock);
            log::info!("t={}: {} finished", clock, process);
        }

        Ok(SchedulerOutcome {
            processes: workload,
            total_time: clock,
        })
    }
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;

    fn demo_workload() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(Pid::new(1), 5, 2, 100),
            ProcessRecord::new(Pid::new(2), 3, 1, 50),
            ProcessRecord::new(Pid::new(3), 7, 3, 200),
        ]
    }

    #[test]
    fn most_urgent_process_runs_first() {
        // Priorities 2/1/3 dispatch as P2, P1, P3: spans 0-3, 3-8,
        // 8-15, total 15, turnarounds 3/5/7.
        let outcome = PriorityScheduler::new().run(demo_workload()).unwrap();
        assert_eq!(outcome.total_time, 15);

        let processes = &outcome.processes;
        assert_eq!(processes[1].start_time(), Some(0));
        assert_eq!(processes[1].finish_time(), Some(3));
        assert_eq!(processes[0].start_time(), Some(3));
        assert_eq!(processes[0].finish_time(), Some(8));
        assert_eq!(processes[2].start_time(), Some(8));
        assert_eq!(processes[2].finish_time(), Some(15));

        assert_eq!(processes[1].turnaround(), Some(3));
        assert_eq!(processes[0].turnaround(), Some(5));
        assert_eq!(processes[2].turnaround(), Some(7));
    }

    #[test]
    fn average_turnaround_of_the_demo_is_five() {
        let outcome = PriorityScheduler::new().run(demo_workload()).unwrap();
        let report =
            crate::metrics::MetricsReport::new(&outcome.processes, outcome.total_time, "Priority")
                .unwrap();
        assert_eq!(format!("{:.2}", report.average_turnaround), "5.00");
    }

    #[test]
    fn equal_priorities_tie_break_by_pid() {
        // P5 is listed first, but P2 wins the tie on the smaller pid.
        let workload = vec![
            ProcessRecord::new(Pid::new(5), 4, 1, 0),
            ProcessRecord::new(Pid::new(2), 3, 1, 0),
        ];
        let outcome = PriorityScheduler::new().run(workload).unwrap();
        assert_eq!(outcome.processes[1].start_time(), Some(0));
        assert_eq!(outcome.processes[1].finish_time(), Some(3));
        assert_eq!(outcome.processes[0].start_time(), Some(3));
        assert_eq!(outcome.processes[0].finish_time(), Some(7));
    }

    #[test]
    fn every_process_runs_to_completion() {
        let outcome = PriorityScheduler::new().run(demo_workload()).unwrap();
        for process in &outcome.processes {
            assert_eq!(process.state(), ProcessState::Finished);
            assert_eq!(process.remaining(), 0);
            assert!(process.start_time().unwrap() <= process.finish_time().unwrap());
        }
    }

    #[test]
    fn invalid_workload_is_rejected_before_simulating() {
        assert!(matches!(
            PriorityScheduler::new().run(Vec::new()),
            Err(SimulationError::InvalidConfiguration { .. })
        ));
    }
}
