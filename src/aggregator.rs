// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Throughput aggregation. The aggregator is the only reader of the event
//! channel and the only owner of the counters.

use crate::worker::{CompletionEvent, Outcome};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Counters for the current window and the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateWindow {
    pub window_count: u64,
    pub total_count: u64,
    pub window_failed: u64,
    pub total_failed: u64,
    window_latency: Duration,
}

impl AggregateWindow {
    pub fn record(&mut self, event: &CompletionEvent) {
        self.window_count += 1;
        self.total_count += 1;
        self.window_latency += event.duration;
        if event.outcome == Outcome::Failed {
            self.window_failed += 1;
            self.total_failed += 1;
        }
    }

    /// Snapshot the window as a report over `elapsed` and start a new window
    pub fn close(&mut self, elapsed: Duration) -> ThroughputReport {
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            self.window_count as f64 / secs
        } else {
            0.0
        };
        let avg_latency = u32::try_from(self.window_count)
            .ok()
            .filter(|n| *n > 0)
            .map(|n| self.window_latency / n)
            .unwrap_or_default();

        let report = ThroughputReport {
            window_count: self.window_count,
            rate,
            total_count: self.total_count,
            window_failed: self.window_failed,
            total_failed: self.total_failed,
            avg_latency,
        };

        self.window_count = 0;
        self.window_failed = 0;
        self.window_latency = Duration::ZERO;
        report
    }
}

/// One report. Counts are attempts; the success/failure breakdown is kept
/// out of the headline line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputReport {
    pub window_count: u64,
    /// Attempts per second over the window
    pub rate: f64,
    pub total_count: u64,
    pub window_failed: u64,
    pub total_failed: u64,
    pub avg_latency: Duration,
}

impl fmt::Display for ThroughputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created {} objects ({:.6} objects/sec); {} objects so far",
            self.window_count, self.rate, self.total_count
        )
    }
}

/// Destination for throughput reports
pub trait ReportSink: Send {
    fn report(&mut self, report: &ThroughputReport);
}

/// Prints the headline to stdout and logs the breakdown
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn report(&mut self, report: &ThroughputReport) {
        println!("{}", report);
        info!(
            ok = report.window_count - report.window_failed,
            failed = report.window_failed,
            total_failed = report.total_failed,
            avg_ms = report.avg_latency.as_millis() as u64,
            "Window breakdown"
        );
    }
}

pub struct Aggregator<S> {
    events: mpsc::Receiver<CompletionEvent>,
    interval: Duration,
    sink: S,
    window: AggregateWindow,
}

impl<S: ReportSink> Aggregator<S> {
    pub fn new(events: mpsc::Receiver<CompletionEvent>, interval: Duration, sink: S) -> Self {
        Self {
            events,
            interval,
            sink,
            window: AggregateWindow::default(),
        }
    }

    /// Count events and report every interval until `shutdown` fires or every
    /// worker has dropped its sender. Events already queued are counted and a
    /// final report for the partial window is emitted before returning.
    pub async fn run(mut self, shutdown: CancellationToken) -> AggregateWindow {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut window_start = Instant::now();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("Shutdown requested, stopping aggregator");
                    break;
                }
                event = self.events.recv() => match event {
                    Some(event) => self.window.record(&event),
                    None => {
                        debug!("All workers stopped, stopping aggregator");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    let report = self.window.close(self.interval);
                    self.sink.report(&report);
                    window_start = Instant::now();
                }
            }
        }

        while let Ok(event) = self.events.try_recv() {
            self.window.record(&event);
        }
        let report = self.window.close(window_start.elapsed());
        self.sink.report(&report);
        info!(
            "Run finished: {} attempts, {} failed",
            self.window.total_count, self.window.total_failed
        );

        self.window
    }
}
