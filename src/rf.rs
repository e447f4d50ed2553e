//! RF driver seam
//!
//! This core does not speak the transceiver chip's bus protocol; it
//! produces logical register configuration and pushes it through the
//! [`RfDriver`] trait. The board support package implements the trait
//! over the real bus; tests implement it with a recorder.

use crate::css::CssCode;
use crate::types::{Bandwidth, Modulation};

/// Hardware squelch thresholds, open/close pairs per metric
///
/// Open thresholds are at least as strict as close thresholds so the
/// squelch has hysteresis: RSSI must rise above `open_rssi` to open
/// but only fall below `close_rssi` to close, and noise/glitch run the
/// opposite way (lower is better).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SquelchThresholds {
    /// RSSI level required to open
    pub open_rssi: u8,
    /// RSSI level at which to close
    pub close_rssi: u8,
    /// Noise metric ceiling to open
    pub open_noise: u8,
    /// Noise metric at which to close
    pub close_noise: u8,
    /// Glitch metric ceiling to open
    pub open_glitch: u8,
    /// Glitch metric at which to close
    pub close_glitch: u8,
}

impl SquelchThresholds {
    /// Fully open thresholds (squelch defeated, e.g. monitor mode or
    /// user level 0)
    #[must_use]
    pub const fn open() -> Self {
        Self {
            open_rssi: 0,
            close_rssi: 0,
            open_noise: 127,
            close_noise: 127,
            open_glitch: 255,
            close_glitch: 255,
        }
    }

    /// Whether the open side is at least as strict as the close side
    /// on every metric
    #[must_use]
    pub const fn has_hysteresis(&self) -> bool {
        self.open_rssi >= self.close_rssi
            && self.open_noise <= self.close_noise
            && self.open_glitch <= self.close_glitch
    }
}

/// AGC operating point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AgcSetting {
    /// Automatic gain, FM table
    #[default]
    Auto,
    /// Automatic gain, AM table (amplitude carries the signal, so the
    /// loop must be slower and shallower)
    AmSlow,
    /// Fixed gain for calibrated measurement; any loop movement would
    /// corrupt the reading
    Fixed,
}

/// Flattened register configuration for one receive setup
///
/// Everything the RF chip needs to sit on a frequency: built purely
/// from a VFO context, so pushing it twice is harmless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RfConfig {
    /// Tuned frequency in Hz
    pub frequency_hz: u32,
    /// Demodulator selection
    pub modulation: Modulation,
    /// IF bandwidth
    pub bandwidth: Bandwidth,
    /// Squelch thresholds
    pub squelch: SquelchThresholds,
    /// AGC operating point
    pub agc: AgcSetting,
    /// RX code squelch the decoder watches for
    pub rx_css: CssCode,
    /// PA bias setting for TX on this configuration
    pub power_setting: u8,
    /// Scrambler setting, 0 = off
    pub scramble: u8,
}

/// Write-only interface to the RF chip
///
/// Implementations translate these calls into bus traffic. The core
/// guarantees single-threaded, non-reentrant use.
pub trait RfDriver {
    /// Push a full receive configuration
    fn apply(&mut self, config: &RfConfig);

    /// Reprogram the RX code squelch decoder only (tone scan probing)
    fn set_tone_decoder(&mut self, css: CssCode);

    /// Program the TX code squelch encoder
    fn set_tone_encoder(&mut self, css: CssCode);

    /// Tune the transmit frequency and PA bias, then key the carrier
    fn enable_transmitter(&mut self, frequency_hz: u32, power_setting: u8);

    /// Unkey the carrier
    fn disable_transmitter(&mut self);

    /// Play a signaling tone on the carrier
    ///
    /// `frequency_dhz` is in 0.1 Hz units; the call covers the full
    /// burst, blocking is not implied (the chip times the burst).
    fn play_tone(&mut self, frequency_dhz: u32, duration_ms: u16);
}
