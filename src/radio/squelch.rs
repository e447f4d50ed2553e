//! Squelch & AGC Configurator
//!
//! Derives concrete hardware squelch thresholds from the per-band
//! calibration curves and the user's global squelch level, computes
//! the PA bias from the power tier and band calibration, and selects
//! the AGC operating point.
//!
//! The open/close threshold pairs implement hysteresis: the open side
//! is always at least as strict as the close side, so a signal sitting
//! on the noise-floor boundary cannot chatter the squelch.

use crate::config::SQUELCH_LEVEL_MAX;
use crate::rf::{AgcSetting, SquelchThresholds};
use crate::types::{Band, Frequency, TxPower};
use crate::radio::vfo::VfoContext;

/// Per-band squelch calibration bases
///
/// RSSI floors rise toward UHF while the noise and glitch metrics run
/// the other way; the level-dependent slopes are shared.
struct BandSquelchCal {
    rssi_base: u8,
    noise_base: u8,
    glitch_base: u8,
}

const SQUELCH_CAL: [BandSquelchCal; 7] = [
    // 50 MHz
    BandSquelchCal { rssi_base: 20, noise_base: 90, glitch_base: 110 },
    // 108 MHz
    BandSquelchCal { rssi_base: 24, noise_base: 84, glitch_base: 104 },
    // 136 MHz
    BandSquelchCal { rssi_base: 28, noise_base: 80, glitch_base: 100 },
    // 174 MHz
    BandSquelchCal { rssi_base: 30, noise_base: 76, glitch_base: 96 },
    // 350 MHz
    BandSquelchCal { rssi_base: 34, noise_base: 72, glitch_base: 92 },
    // 400 MHz
    BandSquelchCal { rssi_base: 36, noise_base: 70, glitch_base: 90 },
    // 470 MHz
    BandSquelchCal { rssi_base: 40, noise_base: 66, glitch_base: 86 },
];

/// Full-power PA bias calibration points per band: low edge, center,
/// high edge. The PA gain is not flat across a band, so the bias is
/// interpolated by frequency position between the three points.
const PA_BIAS_CAL: [[u8; 3]; 7] = [
    [102, 108, 116], // 50 MHz
    [96, 100, 106],  // 108 MHz
    [92, 96, 102],   // 136 MHz
    [98, 104, 112],  // 174 MHz
    [106, 112, 120], // 350 MHz
    [110, 118, 128], // 400 MHz
    [118, 128, 140], // 470 MHz
];

/// Bias scale per power tier, in percent of the full-power bias
const TIER_SCALE: [u8; 7] = [28, 36, 44, 52, 62, 78, 100];

/// Derive the six squelch thresholds for a band and user level
///
/// Level 0 defeats the squelch entirely. For levels 1-9 the open
/// thresholds tighten with the level and every close threshold is
/// derived from its open partner with a level-dependent margin, which
/// is what guarantees the hysteresis invariant for all inputs.
#[must_use]
pub fn squelch_thresholds(band: Band, level: u8) -> SquelchThresholds {
    let level = level.min(SQUELCH_LEVEL_MAX);
    if level == 0 {
        return SquelchThresholds::open();
    }

    let cal = &SQUELCH_CAL[band.index() as usize];
    let margin = 2 + level / 2;

    let open_rssi = cal.rssi_base.saturating_add(level * 6);
    let open_noise = cal.noise_base.saturating_sub(level * 4);
    let open_glitch = cal.glitch_base.saturating_sub(level * 4);

    SquelchThresholds {
        open_rssi,
        close_rssi: open_rssi.saturating_sub(margin),
        open_noise,
        close_noise: open_noise.saturating_add(margin).min(127),
        open_glitch,
        close_glitch: open_glitch.saturating_add(margin),
    }
}

/// Interpolate a three-point calibration curve by position in-band
fn interpolate_bias(points: [u8; 3], frequency: Frequency, band: Band) -> u8 {
    let start = band.start_hz();
    let end = band.end_hz();
    let hz = frequency.as_hz().clamp(start, end);
    let span = u64::from(end - start);
    if span == 0 {
        return points[1];
    }
    // Position scaled to 0..=2*span so each half of the band maps onto
    // one linear segment of the curve.
    let pos = u64::from(hz - start) * 2;
    let (a, b, seg_off) = if pos < span {
        (points[0], points[1], pos)
    } else {
        (points[1], points[2], pos - span)
    };
    let a64 = u64::from(a);
    let b64 = u64::from(b);
    let value = if b64 >= a64 {
        a64 + (b64 - a64) * seg_off / span
    } else {
        a64 - (a64 - b64) * seg_off / span
    };
    value as u8
}

/// PA bias for a power tier at a frequency
#[must_use]
pub fn calculated_power(band: Band, tier: TxPower, frequency: Frequency) -> u8 {
    let full = interpolate_bias(PA_BIAS_CAL[band.index() as usize], frequency, band);
    let scale = u16::from(TIER_SCALE[tier.tier() as usize]);
    ((u16::from(full) * scale) / 100) as u8
}

/// Derive and store a VFO's squelch thresholds and PA bias
///
/// Reads the global squelch level (0-9) and the VFO's band, TX power
/// tier, and active TX frequency. Call again after any change to
/// those inputs; nothing recomputes implicitly.
pub fn configure_squelch_and_power(vfo: &mut VfoContext, level: u8) {
    vfo.squelch = squelch_thresholds(vfo.band, level);
    vfo.calculated_power =
        calculated_power(vfo.band, vfo.tx_power, vfo.active_tx().frequency);
}

/// Select the AGC operating point
///
/// AM listening needs the AM gain table because the amplitude carries
/// the signal; `disable` forces fixed gain for calibrated
/// signal-strength measurement.
#[must_use]
pub fn agc_for(listening_am: bool, disable: bool) -> AgcSetting {
    if disable {
        AgcSetting::Fixed
    } else if listening_am {
        AgcSetting::AmSlow
    } else {
        AgcSetting::Auto
    }
}
