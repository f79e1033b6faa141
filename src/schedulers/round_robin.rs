use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use super::SchedulerOutcome;
use crate::error::SimulationError;
use crate::process::{validate_workload, ProcessRecord};
use crate::random::{DrawSource, EntropyDraws};

/// Probability that a process with work left blocks on simulated I/O
/// at the end of its slice.
const BLOCK_PROBABILITY: f64 = 0.2;
/// Probability that a blocked process becomes ready again, checked once
/// per dispatch cycle.
const UNBLOCK_PROBABILITY: f64 = 0.3;
/// Consecutive idle ticks tolerated while every process is blocked
/// before the scheduler force-unblocks all of them. Effectively
/// unreachable with an entropy source; bounds scripted sources that
/// never unblock.
const IDLE_TICK_LIMIT: usize = 64;

/// Round Robin with quantum slicing and stochastic I/O blocking.
///
/// Ready processes are served FIFO; a slice is `min(quantum,
/// remaining)`. After a slice that leaves work remaining the process
/// either blocks (one draw against [`BLOCK_PROBABILITY`]) or rejoins
/// the ready queue tail. Blocked processes get one unblock draw per
/// dispatch cycle, in insertion order.
pub struct RoundRobinScheduler {
    quantum: usize,
    draws: Box<dyn DrawSource>,
    pacing: Option<Duration>,
}

impl RoundRobinScheduler {
    /// Entropy-backed scheduler. Fails fast on a zero quantum.
    pub fn new(quantum: usize) -> Result<Self, SimulationError> {
        Self::with_draws(quantum, Box::new(EntropyDraws::new()))
    }

    /// Scheduler with an injected draw source.
    pub fn with_draws(
        quantum: usize,
        draws: Box<dyn DrawSource>,
    ) -> Result<Self, SimulationError> {
        if quantum == 0 {
            return Err(SimulationError::invalid("quantum must be positive"));
        }
        Ok(Self {
            quantum,
            draws,
            pacing: None,
        })
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
        &mut self,
        mut workload: Vec<ProcessRecord>,
    ) -> Result<SchedulerOutcome, SimulationError> {
        validate_workload(&workload)?;

        let mut ready: VecDeque<usize> = (0..workload.len()).collect();
        let mut blocked: Vec<usize> = Vec::new();
        let mut clock = 0;
        let mut idle_ticks = 0;

        for process in &mut workload {
            process.make_ready();
        }

        while !ready.is_empty() || !blocked.is_empty() {
            // One independent draw per blocked process, insertion order.
            for slot in std::mem::take(&mut blocked) {
                if self.draws.next_draw()? < UNBLOCK_PROBABILITY {
                    workload[slot].make_ready();
                    ready.push_back(slot);
                    log::info!("t={}: {} ready (unblocked)", clock, workload[slot]);
                } else {
                    blocked.push(slot);
                }
            }

            let slot = match ready.pop_front() {
                Some(slot) => slot,
                None => {
                    // Everything is blocked; the clock ticks anyway.
                    clock += 1;
                    idle_ticks += 1;
                    log::debug!("t={}: all processes blocked, idling", clock);
                    if idle_ticks >= IDLE_TICK_LIMIT {
                        log::warn!(
                            "t={}: {} idle ticks, force-unblocking {} process(es)",
                            clock,
                            idle_ticks,
                            blocked.len()
                        );
                        for slot in blocked.drain(..) {
                            workload[slot].make_ready();
                            ready.push_back(slot);
                        }
                    }
                    continue;
                }
            };
            idle_ticks = 0;

            let process = &mut workload[slot];
            process.dispatch(clock);
            log::info!("t={}: {} running", clock, process);

            if let Some(pause) = self.pacing {
                thread::sleep(pause);
            }

            let slice = self.quantum.min(process.remaining());
            clock += slice;
            process.execute(slice);

            if process.remaining() > 0 && self.draws.next_draw()? < BLOCK_PROBABILITY {
                process.block();
                log::info!("t={}: {} blocked on simulated I/O", clock, process);
                blocked.push(slot);
            } else if process.remaining() > 0 {
                process.make_ready();
                log::info!("t={}: {} ready (quantum expired)", clock, process);
                ready.push_back(slot);
            } else {
                process.finish(clock);
                log::info!("t={}: {} finished", clock, process);
            }
        }

        Ok(SchedulerOutcome {
            processes: workload,
            total_time: clock,
        })
    }
}
