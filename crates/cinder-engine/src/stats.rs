//! Simulation statistics.
//!
//! Collects per-frame step times, particle counts and collision results
//! and condenses them into a summary for logging.

use std::collections::VecDeque;
use std::time::Instant;

use cinder_kernel::CollisionReport;

/// Rolling statistics collector.
#[derive(Debug)]
pub struct SimStats {
    /// Step times in seconds
    step_times: VecDeque<f32>,
    /// Live particle counts
    live_counts: VecDeque<usize>,
    /// History size for averaging
    history_size: usize,
    /// Frames recorded since the start
    frames: u64,
    /// Highest live particle count seen
    peak_live: usize,
    /// Collision results since the start
    collisions: CollisionReport,
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl SimStats {
    /// Create a new statistics collector.
    ///
    /// # Arguments
    /// * `history_size` - Number of samples to keep for averaging
    #[must_use]
    pub fn new(history_size: usize) -> Self {
        let history_size = history_size.max(1);
        Self {
            step_times: VecDeque::with_capacity(history_size),
            live_counts: VecDeque::with_capacity(history_size),
            history_size,
            frames: 0,
            peak_live: 0,
            collisions: CollisionReport::default(),
        }
    }

    /// Record one simulated frame.
    pub fn record_frame(&mut self, step_time: f32, live: usize, collisions: CollisionReport) {
        self.step_times.push_back(step_time);
        if self.step_times.len() > self.history_size {
            self.step_times.pop_front();
        }

        self.live_counts.push_back(live);
        if self.live_counts.len() > self.history_size {
            self.live_counts.pop_front();
        }

        self.frames += 1;
        self.peak_live = self.peak_live.max(live);
        self.collisions.merge(collisions);
    }

    /// Average step time in seconds.
    #[must_use]
    pub fn avg_step_time(&self) -> f32 {
        if self.step_times.is_empty() {
            return 0.0;
        }
        self.step_times.iter().sum::<f32>() / self.step_times.len() as f32
    }

    /// Average live particle count.
    #[must_use]
    pub fn avg_live(&self) -> f32 {
        if self.live_counts.is_empty() {
            return 0.0;
        }
        self.live_counts.iter().sum::<usize>() as f32 / self.live_counts.len() as f32
    }

    /// Get a summary of the recorded statistics.
    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            frames: self.frames,
            step_time_us: self.avg_step_time() * 1_000_000.0,
            live: self.live_counts.back().copied().unwrap_or(0),
            avg_live: self.avg_live(),
            peak_live: self.peak_live,
            collisions_resolved: self.collisions.resolved,
            collisions_embedded: self.collisions.embedded,
        }
    }
}

/// Summary of simulation statistics for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    /// Frames simulated
    pub frames: u64,
    /// Average step time in microseconds
    pub step_time_us: f32,
    /// Live particles in the latest frame
    pub live: usize,
    /// Average live particles over the history window
    pub avg_live: f32,
    /// Highest live particle count
    pub peak_live: usize,
    /// Velocities reflected off the obstacle
    pub collisions_resolved: usize,
    /// Particles found embedded in the obstacle
    pub collisions_embedded: usize,
}

impl StatsSummary {
    /// Format the summary as a single log line.
    #[must_use]
    pub fn format_line(&self) -> String {
        format!(
            "frame {} | live {} (avg {:.1}, peak {}) | step {:.1}us | bounces {} | embedded {}",
            self.frames,
            self.live,
            self.avg_live,
            self.peak_live,
            self.step_time_us,
            self.collisions_resolved,
            self.collisions_embedded,
        )
    }
}

/// Timer for measuring one simulation step.
pub struct StepTimer {
    start: Instant,
}

impl StepTimer {
    /// Start timing.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
