/// Context provided to scenes during the update phase.
pub struct UpdateContext {
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

impl UpdateContext {
    /// Frames longer than this are logged as slow.
    pub const SLOW_FRAME: f32 = 0.25;

    pub fn new(delta_time: f32) -> Self {
        Self { delta_time }
    }

    pub fn is_slow(&self) -> bool {
        self.delta_time > Self::SLOW_FRAME
    }
}

/// Accumulates frame times and reports them roughly once per second.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
}

/// Summary of the frames seen since the last report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub average_delta: f32,
}

impl FrameStats {
    /// Interval between reports, in seconds.
    pub const REPORT_INTERVAL: f32 = 1.0;

    /// Records one frame. Returns a report and starts over once a full interval has passed.
    pub fn record(&mut self, delta_time: f32) -> Option<FrameReport> {
        self.frames += 1;
        self.elapsed += delta_time;
        if self.elapsed < Self::REPORT_INTERVAL {
            return None;
        }
        let report = FrameReport {
            frames: self.frames,
            average_delta: self.elapsed / self.frames as f32,
        };
        *self = Self::default();
        Some(report)
    }
}
