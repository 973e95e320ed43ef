use web_time::Duration;

pub const VEO_POLL_INTERVAL: Duration = Duration::from_secs(10);
// 60 polls * 10 seconds = 10 minutes
pub const VEO_MAX_POLLS: u32 = 60;

/// Upper bound on a generated clip pulled through the server (100MB).
pub const MAX_VIDEO_BYTES: u64 = 100_000_000;

/// Upper bound on an uploaded start frame, before base64 (8MB).
pub const MAX_START_FRAME_BYTES: usize = 8 * 1024 * 1024;
