use crate::error::SimulationError;
use crate::process::{Pid, ProcessRecord};

/// Final timing figures for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub start_time: usize,
    pub finish_time: usize,
    pub turnaround: usize,
}

/// Everything a presentation layer needs to render one finished run.
/// The core computes this structure; it never renders anything itself.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub algorithm: String,
    pub per_process: Vec<ProcessMetrics>,
    pub total_time: usize,
    pub average_turnaround: f64,
}

impl MetricsReport {
    /// Computes per-process turnaround and the arithmetic mean across
    /// the workload.
    ///
    /// Fails on an empty workload (the mean would divide by zero) and
    /// on records that never received both timestamps.
    pub fn new(
        processes: &[ProcessRecord],
        total_time: usize,
        algorithm: &str,
    ) -> Result<Self, SimulationError> {
        if processes.is_empty() {
            return Err(SimulationError::EmptyMetricsInput);
        }

        let mut per_process = Vec::with_capacity(processes.len());
        for process in processes {
            let (start_time, finish_time) = match (process.start_time(), process.finish_time()) {
                (Some(start), Some(finish)) => (start, finish),
                _ => {
                    return Err(SimulationError::UnfinishedProcess {
                        pid: process.pid(),
                    })
                }
            };
            per_process.push(ProcessMetrics {
                pid: process.pid(),
                start_time,
                finish_time,
                turnaround: finish_time - start_time,
            });
        }

        let total: usize = per_process.iter().map(|metrics| metrics.turnaround).sum();
        let average_turnaround = total as f64 / per_process.len() as f64;

        Ok(MetricsReport {
            algorithm: algorithm.to_owned(),
            per_process,
            total_time,
            average_turnaround,
        })
    }
}

/// Collaborator that consumes a finished run and renders it somewhere.
pub trait MetricsReporter {
    fn report(
        &mut self,
        processes: &[ProcessRecord],
        total_time: usize,
        algorithm: &str,
    ) -> Result<(), SimulationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(pid: u32, start: usize, finish: usize) -> ProcessRecord {
        let burst = finish - start;
        let mut process = ProcessRecord::new(Pid::new(pid), burst, 0, 0);
        process.dispatch(start);
        process.execute(burst);
        process.finish(finish);
        process
    }

    #[test]
    fn turnaround_is_finish_minus_start() {
        let report = MetricsReport::new(&[finished(1, 0, 7)], 7, "Round Robin").unwrap();
        assert_eq!(report.per_process[0].turnaround, 7);
    }

    #[test]
    fn average_rounds_to_expected_two_decimals() {
        let processes = vec![finished(1, 0, 7), finished(2, 0, 3), finished(3, 0, 12)];
        let report = MetricsReport::new(&processes, 12, "Priority").unwrap();
        assert_eq!(format!("{:.2}", report.average_turnaround), "7.33");
    }

    #[test]
    fn empty_input_is_an_explicit_error() {
        assert!(matches!(
            MetricsReport::new(&[], 0, "Round Robin"),
            Err(SimulationError::EmptyMetricsInput)
        ));
    }

    #[test]
    fn records_without_timestamps_are_rejected() {
        let never_ran = ProcessRecord::new(Pid::new(9), 4, 0, 0);
        assert!(matches!(
            MetricsReport::new(&[never_ran], 0, "Priority"),
            Err(SimulationError::UnfinishedProcess { pid }) if pid == Pid::new(9)
        ));
    }
}
