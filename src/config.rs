//! System configuration and constants
//!
//! Centralized constants for the radio core: memory geometry, tick
//! cadences, scan timing, and signaling tones. Hardware pin maps and
//! bus addresses live with the board support package, not here.

use crate::types::Frequency;

/// Number of memory channel slots
pub const CHANNEL_COUNT: usize = 200;

/// Number of scan lists a channel can belong to
pub const SCAN_LIST_COUNT: usize = 3;

/// Fast scheduler tick period in milliseconds
pub const TICK_MS: u32 = 10;

/// Slow housekeeping tick period in milliseconds
pub const SLOW_TICK_MS: u32 = 500;

/// Maximum user squelch level (0 = always open)
pub const SQUELCH_LEVEL_MAX: u8 = 9;

/// Ticks the channel scanner dwells on each position before moving on
pub const SCAN_DWELL_TICKS: u8 = 8;

/// Ticks the CSS scanner gives the tone decoder per candidate code
///
/// The decoder needs roughly two tone periods to declare a lock on the
/// slowest CTCSS tones, which bounds this from below.
pub const CSS_SCAN_DWELL_TICKS: u8 = 21;

/// CSS tail tone sent before dropping carrier, in 0.1 Hz units (55.2 Hz)
pub const CSS_TAIL_TONE_DHZ: u32 = 552;

/// CSS tail tone duration in milliseconds
pub const CSS_TAIL_MS: u16 = 200;

/// End-of-transmission burst tone in 0.1 Hz units
pub const EOT_TONE_DHZ: u32 = 6600;

/// End-of-transmission burst duration in milliseconds
pub const EOT_TONE_MS: u16 = 160;

/// Quindar-style end tone in 0.1 Hz units (2475 Hz)
pub const QUINDAR_TONE_DHZ: u32 = 24_750;

/// Quindar tone duration in milliseconds
pub const QUINDAR_TONE_MS: u16 = 250;

/// Default free-tuning frequency for a factory-fresh VFO
pub const DEFAULT_FREQUENCY: Frequency = Frequency::from_hz_const(145_500_000);

/// Default frequency for VFO B
pub const DEFAULT_FREQUENCY_B: Frequency = Frequency::from_hz_const(433_500_000);

/// Runtime capability set
///
/// The original firmware shaped its data model with compile-time
/// feature conditionals; here the optional behaviors are a plain value
/// resolved at the boundary so the core keeps one canonical shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Extend the modulation cycle through Bypass and Raw
    pub byp_raw_demodulators: bool,
    /// Permit TX on every band instead of the two duplex-service bands
    pub unlock_all_tx: bool,
    /// DTMF decoder fitted (the codec itself is outside this core)
    pub dtmf_decoding: bool,
}

impl Capabilities {
    /// Stock configuration
    #[must_use]
    pub const fn stock() -> Self {
        Self {
            byp_raw_demodulators: false,
            unlock_all_tx: false,
            dtmf_decoding: true,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::stock()
    }
}
