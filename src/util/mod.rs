//! Shared utilities.

/// Frame-to-frame elapsed time and FPS.
pub mod frame_clock;

pub use frame_clock::FrameClock;
