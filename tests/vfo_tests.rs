//! Tests for the VFO data model
//!
//! Covers factory init, the frequency-reverse selector, duplex offset
//! application, and channel load/store.

use ht_firmware::css::CssCode;
use ht_firmware::radio::channel::Channel;
use ht_firmware::radio::vfo::{FrequencyReverse, VfoContext};
use ht_firmware::types::{Band, Frequency, Modulation, OffsetDirection, Step};

fn freq(hz: u32) -> Frequency {
    Frequency::from_hz(hz).unwrap()
}

// ============================================================================
// Factory init
// ============================================================================

#[test]
fn init_selects_band_and_defaults() {
    let vfo = VfoContext::init(None, freq(145_500_000));
    assert_eq!(vfo.band, Band::Mhz136);
    assert_eq!(vfo.rx.frequency.as_hz(), 145_500_000);
    assert_eq!(vfo.tx.frequency.as_hz(), 145_500_000);
    assert_eq!(vfo.rx.css, CssCode::Off);
    assert_eq!(vfo.offset_direction, OffsetDirection::Off);
    assert_eq!(vfo.tx_offset_hz, 0);
    assert_eq!(vfo.step, Step::K12_5);
    assert_eq!(vfo.modulation, Modulation::Fm);
    assert_eq!(vfo.scramble, 0);
    assert_eq!(vfo.channel_slot, None);
    assert_eq!(vfo.reverse, FrequencyReverse::Normal);
}

#[test]
fn init_airband_defaults_am() {
    let vfo = VfoContext::init(None, freq(120_000_000));
    assert_eq!(vfo.band, Band::Mhz108);
    assert_eq!(vfo.modulation, Modulation::Am);
    assert_eq!(vfo.step, Step::K8_33);
}

#[test]
fn init_band_gap_falls_back_to_default() {
    // 90 MHz constructs as a Frequency but belongs to no band
    let vfo = VfoContext::init(None, freq(90_000_000));
    assert!(vfo.rx.frequency.band().is_some());
    assert_eq!(vfo.band, vfo.rx.frequency.band().unwrap());
}

// ============================================================================
// Frequency validation at the edit boundary
// ============================================================================

#[test]
fn rejected_rx_edit_leaves_vfo_unchanged() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    let before = vfo.clone();

    assert!(!vfo.set_rx_frequency(freq(90_000_000)));
    assert_eq!(vfo, before);
}

#[test]
fn accepted_rx_edit_recomputes_band() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    assert!(vfo.set_rx_frequency(freq(446_000_000)));
    assert_eq!(vfo.band, Band::Mhz400);
}

#[test]
fn off_grid_frequency_never_constructs() {
    assert!(Frequency::from_hz(145_500_005).is_none());
    assert!(Frequency::from_hz(145_500_001).is_none());
    assert!(Frequency::from_hz(145_500_010).is_some());
}

// ============================================================================
// Frequency reverse
// ============================================================================

#[test]
fn reverse_swaps_active_configs() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.set_tx_frequency(freq(146_100_000));

    assert_eq!(vfo.active_rx().frequency.as_hz(), 145_500_000);
    assert_eq!(vfo.active_tx().frequency.as_hz(), 146_100_000);

    vfo.toggle_reverse();
    assert_eq!(vfo.reverse, FrequencyReverse::Reversed);
    assert_eq!(vfo.active_rx().frequency.as_hz(), 146_100_000);
    assert_eq!(vfo.active_tx().frequency.as_hz(), 145_500_000);
}

#[test]
fn reverse_toggle_is_involutive() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.set_tx_frequency(freq(146_100_000));
    let rx_before = *vfo.active_rx();
    let tx_before = *vfo.active_tx();

    vfo.toggle_reverse();
    vfo.toggle_reverse();

    assert_eq!(vfo.reverse, FrequencyReverse::Normal);
    assert_eq!(*vfo.active_rx(), rx_before);
    assert_eq!(*vfo.active_tx(), tx_before);
}

#[test]
fn reverse_reflects_later_edits() {
    // The selector is indirection, not a copy: an edit to the base
    // config after reversing must show through the accessors
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.set_tx_frequency(freq(146_100_000));
    vfo.toggle_reverse();

    vfo.set_rx_frequency(freq(145_787_500));
    assert_eq!(vfo.active_tx().frequency.as_hz(), 145_787_500);
}

// ============================================================================
// Duplex offset
// ============================================================================

#[test]
fn apply_offset_add() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.tx_offset_hz = 600_000;
    vfo.offset_direction = OffsetDirection::Add;
    vfo.apply_offset();
    assert_eq!(vfo.tx.frequency.as_hz(), 146_100_000);
}

#[test]
fn apply_offset_sub() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.tx_offset_hz = 600_000;
    vfo.offset_direction = OffsetDirection::Sub;
    vfo.apply_offset();
    assert_eq!(vfo.tx.frequency.as_hz(), 144_900_000);
}

#[test]
fn apply_offset_off_is_a_noop() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.set_tx_frequency(freq(146_100_000));
    vfo.tx_offset_hz = 600_000;
    vfo.offset_direction = OffsetDirection::Off;
    vfo.apply_offset();
    // TX keeps its prior value
    assert_eq!(vfo.tx.frequency.as_hz(), 146_100_000);
}

#[test]
fn apply_offset_not_implicit_after_rx_edit() {
    let mut vfo = VfoContext::init(None, freq(145_500_000));
    vfo.tx_offset_hz = 600_000;
    vfo.offset_direction = OffsetDirection::Add;
    vfo.apply_offset();

    vfo.set_rx_frequency(freq(145_000_000));
    // Stale until the explicit recomputation
    assert_eq!(vfo.tx.frequency.as_hz(), 146_100_000);
    vfo.apply_offset();
    assert_eq!(vfo.tx.frequency.as_hz(), 145_600_000);
}

#[test]
fn apply_offset_out_of_band_degrades_to_simplex() {
    // 50.1 MHz - 1 MHz lands below every band
    let mut vfo = VfoContext::init(None, freq(50_100_000));
    vfo.tx_offset_hz = 1_000_000;
    vfo.offset_direction = OffsetDirection::Sub;
    vfo.apply_offset();
    assert_eq!(vfo.tx.frequency, vfo.rx.frequency);

    // 75 MHz + 5 MHz lands in the 76-108 MHz gap
    let mut vfo = VfoContext::init(None, freq(75_000_000));
    vfo.tx_offset_hz = 5_000_000;
    vfo.offset_direction = OffsetDirection::Add;
    vfo.apply_offset();
    assert_eq!(vfo.tx.frequency, vfo.rx.frequency);
}

// ============================================================================
// Channel load/store
// ============================================================================

#[test]
fn from_channel_applies_offset_and_band() {
    let mut ch = Channel::empty(12);
    ch.frequency = freq(438_700_000);
    ch.offset_hz = 7_600_000;
    ch.offset_direction = OffsetDirection::Sub;
    ch.rx_css = CssCode::Ctcss(8);
    ch.name.push_str("REPEATER").unwrap();

    let vfo = VfoContext::from_channel(&ch);
    assert_eq!(vfo.channel_slot, Some(12));
    assert_eq!(vfo.band, Band::Mhz400);
    assert_eq!(vfo.rx.frequency.as_hz(), 438_700_000);
    assert_eq!(vfo.tx.frequency.as_hz(), 431_100_000);
    assert_eq!(vfo.rx.css, CssCode::Ctcss(8));
    assert_eq!(vfo.name.as_str(), "REPEATER");
}

#[test]
fn to_channel_roundtrips_persistable_fields() {
    let mut ch = Channel::empty(30);
    ch.frequency = freq(145_712_500);
    ch.offset_hz = 600_000;
    ch.offset_direction = OffsetDirection::Sub;
    ch.tx_css = CssCode::Dcs {
        index: 3,
        inverted: true,
    };
    ch.busy_lock = true;

    let vfo = VfoContext::from_channel(&ch);
    let back = vfo.to_channel(30);

    assert_eq!(back.frequency, ch.frequency);
    assert_eq!(back.offset_hz, ch.offset_hz);
    assert_eq!(back.offset_direction, ch.offset_direction);
    assert_eq!(back.tx_css, ch.tx_css);
    assert!(back.busy_lock);
    assert!(back.in_use);
}
