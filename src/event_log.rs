use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::phase::Phase;

/// Engine milestones worth keeping a record of
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    /// The phase machine moved on
    PhaseChanged { from: Phase, to: Phase },
    /// Carving finished with this many passage cells
    GenerationFinished { passages: usize },
    /// Solve start point latched (x, y)
    StartSelected { x: i32, y: i32 },
    /// Solve end point latched (x, y)
    EndSelected { x: i32, y: i32 },
    /// The solver token reached the end cell
    SolveFinished { steps: u64, junctions: usize },
    /// Path reconstruction finished
    PathTraced { length: usize },
}

/// Logged event with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub event: Event,
}

/// Session event logger
pub struct EventLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    /// Log an event with the current timestamp
    pub fn log(&mut self, event: Event) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event,
        });
    }

    /// Get all logged events
    pub fn events(&self) -> &Vec<LoggedEvent> {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Event Log ({} events) ===", self.events.len());
        for (i, logged) in self.events.iter().enumerate() {
            println!(
                "[{:6}ms] #{:3} {:?}",
                logged.timestamp_ms,
                i + 1,
                logged.event
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut phase_changes = 0;
        let mut solves = 0;
        let mut total_steps = 0u64;
        let mut traced = 0;

        for logged in &self.events {
            match &logged.event {
                Event::PhaseChanged { .. } => phase_changes += 1,
                Event::SolveFinished { steps, .. } => {
                    solves += 1;
                    total_steps += steps;
                }
                Event::PathTraced { .. } => traced += 1,
                _ => {}
            }
        }

        let duration = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Phase Changes: {}\n\
             Solves: {} ({} solver steps), Paths Traced: {}",
            duration,
            self.events.len(),
            phase_changes,
            solves,
            total_steps,
            traced
        )
    }
}
