use log::LevelFilter;
use simple_logger::SimpleLogger;

use schedsim::{
    MetricsReport, MetricsReporter, Pid, PriorityScheduler, ProcessRecord, RoundRobinScheduler,
    SchedulerOutcome, SimulationError,
};

/// Renders a finished run as a pid/start/finish/turnaround table.
/// Lives in the binary; the library computes, the binary prints.
struct ConsoleReporter;

impl MetricsReporter for ConsoleReporter {
    fn report(
        &mut self,
        processes: &[ProcessRecord],
        total_time: usize,
        algorithm: &str,
    ) -> Result<(), SimulationError> {
        let report = MetricsReport::new(processes, total_time, algorithm)?;

        println!("\n--- {} metrics ---", report.algorithm);
        println!("{:<5}{:<10}{:<10}{:<12}", "PID", "Start", "Finish", "Turnaround");
        for metrics in &report.per_process {
            println!(
                "{:<5}{:<10}{:<10}{:<12}",
                metrics.pid.raw(),
                metrics.start_time,
                metrics.finish_time,
                metrics.turnaround
            );
        }
        println!("\nTotal time: {}", report.total_time);
        println!("Average turnaround: {:.2}", report.average_turnaround);

        Ok(())
    }
}

fn demo_workload() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::new(Pid::new(1), 5, 2, 100),
        ProcessRecord::new(Pid::new(2), 3, 1, 50),
        ProcessRecord::new(Pid::new(3), 7, 3, 200),
    ]
}

fn simulate() -> Result<(), SimulationError> {
    let workload = demo_workload();
    let mut reporter = ConsoleReporter;

    let mut round_robin = RoundRobinScheduler::new(2)?;
    let SchedulerOutcome {
        processes,
        total_time,
    } = round_robin.run(workload.clone())?;
    reporter.report(&processes, total_time, "Round Robin")?;

    let priority = PriorityScheduler::new();
    let SchedulerOutcome {
        processes,
        total_time,
    } = priority.run(workload)?;
    reporter.report(&processes, total_time, "Priority")?;

    log::info!("Simulation complete");
    Ok(())
}

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    if let Err(error) = simulate() {
        log::error!("Simulation failed: {}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim::validate_workload;

    #[test]
    fn demo_workload_passes_validation() {
        assert!(validate_workload(&demo_workload()).is_ok());
    }

    #[test]
    fn console_reporter_refuses_an_empty_run() {
        assert!(matches!(
            ConsoleReporter.report(&[], 0, "Round Robin"),
            Err(SimulationError::EmptyMetricsInput)
        ));
    }
}
