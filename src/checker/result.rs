// src/checker/result.rs
// =============================================================================
// The data produced by a run: one ResultSet per page, one LinkResult per link.
//
// Both are created fresh for each invocation and thrown away when the
// program exits. Nothing is persisted.
//
// Timing:
// - Wall-clock timestamps (chrono) are what the report prints
// - Elapsed time is measured with std::time::Instant, which is monotonic
// - The end timestamp is start + measured elapsed time, so end >= start
//   even if the system clock jumps while we wait on the network
// =============================================================================

use super::CheckError;
use chrono::{DateTime, Local, TimeDelta};
use std::time::{Duration, Instant};

/// Outcome of checking every link selected on one page
#[derive(Debug)]
pub struct ResultSet {
    /// Heading printed at the top of the report
    pub title: String,
    /// The page that holds the links
    pub url: String,
    /// The CSS selector used to pick link elements
    pub selector: String,
    /// One entry per extracted link, in document order
    pub results: Vec<LinkResult>,
    /// Set when the page itself could not be checked
    pub error: Option<CheckError>,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
}

impl ResultSet {
    pub fn elapsed(&self) -> Duration {
        elapsed_between(self.started_at, self.ended_at)
    }

    /// Number of links that answered with a 2xx or 3xx status
    pub fn ok_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.ok_count()
    }
}

/// Outcome of a single request against one extracted link
#[derive(Debug)]
pub struct LinkResult {
    /// The URL that was requested
    pub url: String,
    /// The text of the element the link came from
    pub caption: String,
    /// HTTP status code, absent when no response was received
    pub status: Option<u16>,
    pub error: Option<CheckError>,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
}

impl LinkResult {
    /// A link is OK when it answered without error with a 2xx or 3xx status
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && matches!(self.status, Some(code) if (200..400).contains(&code))
    }

    pub fn elapsed(&self) -> Duration {
        elapsed_between(self.started_at, self.ended_at)
    }
}

// Stopwatch pairing a wall-clock start time with a monotonic clock
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    started_at: DateTime<Local>,
    clock: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            clock: Instant::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Returns the wall-clock end time, never earlier than the start
    pub fn stop(&self) -> DateTime<Local> {
        let elapsed =
            TimeDelta::from_std(self.clock.elapsed()).unwrap_or_else(|_| TimeDelta::zero());
        self.started_at
            .checked_add_signed(elapsed)
            .unwrap_or(self.started_at)
    }
}

fn elapsed_between(start: DateTime<Local>, end: DateTime<Local>) -> Duration {
    // to_std() fails on negative deltas; clamp those to zero
    (end - start).to_std().unwrap_or_default()
}
