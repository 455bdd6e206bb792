//! Cycle loggers for curriculum training.
//!
//! Provides different logging backends for per-cycle curriculum
//! results: the current task, per-scenario aggregated scores, and
//! promotion events.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::driver::CycleResult;

/// Logger trait for different logging backends.
pub trait CycleLogger: Send {
    /// Log one decision-cycle result.
    fn log(&mut self, result: &CycleResult);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Console logger with pretty formatting.
pub struct ConsoleLogger {
    log_interval: usize,
    last_log_cycle: usize,
    start_time: Instant,
    show_header: bool,
}

impl ConsoleLogger {
    /// Create a new console logger.
    ///
    /// # Arguments
    ///
    /// * `log_interval` - Cycles between log entries; promotions are
    ///   always printed regardless of the interval.
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval,
            last_log_cycle: 0,
            start_time: Instant::now(),
            show_header: true,
        }
    }

    /// Reset the start time.
    pub fn reset_timer(&mut self) {
        self.start_time = Instant::now();
    }

    fn print_header(&self) {
        println!(
            "{:>8} {:>8} {:>6} {:>10} {:>9}  {}",
            "Cycle", "Task", "Promo", "Complete", "Elapsed", "Scores"
        );
        println!("{}", "-".repeat(78));
    }

    fn format_scores(result: &CycleResult) -> String {
        result
            .scores
            .iter()
            .map(|(key, score)| {
                if score.is_finite() {
                    format!("{}={:.3}", key, score)
                } else {
                    format!("{}=--", key)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl CycleLogger for ConsoleLogger {
    fn log(&mut self, result: &CycleResult) {
        let due = result.cycle >= self.last_log_cycle + self.log_interval;
        if !due && !result.promoted && !result.complete {
            return;
        }

        if self.show_header {
            self.print_header();
            self.show_header = false;
        }

        println!(
            "{:>8} {:>8} {:>6} {:>10} {:>8.1}s  {}",
            result.cycle,
            result.curriculum_task,
            if result.promoted { "yes" } else { "" },
            if result.complete { "yes" } else { "" },
            self.start_time.elapsed().as_secs_f32(),
            Self::format_scores(result),
        );

        self.last_log_cycle = result.cycle;
    }

    fn flush(&mut self) {
        // stdout is typically line-buffered, so nothing to do
    }
}

/// CSV file logger for analysis.
pub struct CSVLogger {
    writer: BufWriter<File>,
    start_time: Instant,
}

impl CSVLogger {
    /// Create a new CSV logger.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "cycle,task,promoted,complete,elapsed_secs,scores")?;

        Ok(Self {
            writer,
            start_time: Instant::now(),
        })
    }

    /// Reset the start time.
    pub fn reset_timer(&mut self) {
        self.start_time = Instant::now();
    }
}

impl CycleLogger for CSVLogger {
    fn log(&mut self, result: &CycleResult) {
        let scores = result
            .scores
            .iter()
            .map(|(key, score)| format!("{}={}", key, score))
            .collect::<Vec<_>>()
            .join(";");

        let _ = writeln!(
            self.writer,
            "{},{},{},{},{:.2},{}",
            result.cycle,
            result.curriculum_task,
            result.promoted,
            result.complete,
            self.start_time.elapsed().as_secs_f32(),
            scores,
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl Drop for CSVLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Multi-logger that writes to multiple backends.
pub struct MultiLogger {
    loggers: Vec<Box<dyn CycleLogger>>,
}

impl MultiLogger {
    /// Create a new multi-logger.
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
        }
    }

    /// Add a logger.
    pub fn add<L: CycleLogger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Box::new(logger));
        self
    }
}

impl Default for MultiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleLogger for MultiLogger {
    fn log(&mut self, result: &CycleResult) {
        for logger in &mut self.loggers {
            logger.log(result);
        }
    }

    fn flush(&mut self) {
        for logger in &mut self.loggers {
            logger.flush();
        }
    }
}
