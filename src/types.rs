//! Shared types used across the transceiver core
//!
//! Domain-specific types that enforce invariants at construction time:
//! frequencies are always on the 10 Hz grid and inside the supported
//! span, band membership is derived rather than trusted, and the
//! user-facing cycles (modulation, power) are closed enums.

use core::fmt;

use crate::config::Capabilities;

/// Frequency in Hertz with validation
///
/// The synthesizer tunes on a 10 Hz grid, so every stored frequency is
/// a multiple of 10 Hz inside the supported span. Construction returns
/// `None` for anything else.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Lowest tunable frequency (bottom of the 50 MHz band)
    pub const MIN_HZ: u32 = 50_000_000;

    /// Highest tunable frequency (top of the 470 MHz band)
    pub const MAX_HZ: u32 = 600_000_000;

    /// Synthesizer tuning grid
    pub const GRID_HZ: u32 = 10;

    /// Create a new Frequency from Hz
    ///
    /// Returns `None` if the value is outside the tunable span or not
    /// on the 10 Hz grid.
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ && hz % Self::GRID_HZ == 0 {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        Self::from_hz(khz * 1000)
    }

    /// Create a frequency at compile time (panics if invalid)
    #[must_use]
    pub const fn from_hz_const(hz: u32) -> Self {
        match Self::from_hz(hz) {
            Some(f) => f,
            None => panic!("Frequency out of range or off the 10 Hz grid"),
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Band containing this frequency, if any
    ///
    /// The tunable span has a gap between 76 and 108 MHz; frequencies
    /// there construct fine but belong to no band and fail validation
    /// at the VFO boundary.
    #[must_use]
    pub const fn band(self) -> Option<Band> {
        Band::from_frequency(self)
    }

    /// Step up, clamping at the top of the span
    #[must_use]
    pub fn step_up(self, step: Step) -> Self {
        let hz = self.0.saturating_add(step.as_hz());
        let hz = hz - hz % Self::GRID_HZ;
        Self::from_hz(hz).unwrap_or(Self(Self::MAX_HZ))
    }

    /// Step down, clamping at the bottom of the span
    #[must_use]
    pub fn step_down(self, step: Step) -> Self {
        let hz = self.0.saturating_sub(step.as_hz());
        let hz = hz - hz % Self::GRID_HZ;
        Self::from_hz(hz).unwrap_or(Self(Self::MIN_HZ))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Frequency band definition
///
/// The fixed ordered table of ranges the radio supports. Each range is
/// half-open (`start <= f < end`) except the last, which includes its
/// upper edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    /// 50 - 76 MHz
    Mhz50,
    /// 108 - 136 MHz (airband)
    Mhz108,
    /// 136 - 174 MHz (2 m amateur / commercial VHF)
    Mhz136,
    /// 174 - 350 MHz
    Mhz174,
    /// 350 - 400 MHz
    Mhz350,
    /// 400 - 470 MHz (70 cm amateur / commercial UHF)
    Mhz400,
    /// 470 - 600 MHz
    Mhz470,
}

impl Band {
    /// All bands in ascending frequency order
    pub const ALL: [Self; 7] = [
        Self::Mhz50,
        Self::Mhz108,
        Self::Mhz136,
        Self::Mhz174,
        Self::Mhz350,
        Self::Mhz400,
        Self::Mhz470,
    ];

    /// Get the band for a given frequency
    #[must_use]
    pub const fn from_frequency(freq: Frequency) -> Option<Self> {
        let hz = freq.as_hz();
        if hz >= 50_000_000 && hz < 76_000_000 {
            Some(Self::Mhz50)
        } else if hz >= 108_000_000 && hz < 136_000_000 {
            Some(Self::Mhz108)
        } else if hz >= 136_000_000 && hz < 174_000_000 {
            Some(Self::Mhz136)
        } else if hz >= 174_000_000 && hz < 350_000_000 {
            Some(Self::Mhz174)
        } else if hz >= 350_000_000 && hz < 400_000_000 {
            Some(Self::Mhz350)
        } else if hz >= 400_000_000 && hz < 470_000_000 {
            Some(Self::Mhz400)
        } else if hz >= 470_000_000 && hz <= 600_000_000 {
            Some(Self::Mhz470)
        } else {
            None
        }
    }

    /// Get the band start frequency
    #[must_use]
    pub const fn start_hz(self) -> u32 {
        match self {
            Self::Mhz50 => 50_000_000,
            Self::Mhz108 => 108_000_000,
            Self::Mhz136 => 136_000_000,
            Self::Mhz174 => 174_000_000,
            Self::Mhz350 => 350_000_000,
            Self::Mhz400 => 400_000_000,
            Self::Mhz470 => 470_000_000,
        }
    }

    /// Get the band end frequency (exclusive, except the last band)
    #[must_use]
    pub const fn end_hz(self) -> u32 {
        match self {
            Self::Mhz50 => 76_000_000,
            Self::Mhz108 => 136_000_000,
            Self::Mhz136 => 174_000_000,
            Self::Mhz174 => 350_000_000,
            Self::Mhz350 => 400_000_000,
            Self::Mhz400 => 470_000_000,
            Self::Mhz470 => 600_000_000,
        }
    }

    /// Table index of this band (cached in the VFO, never authoritative)
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Mhz50 => 0,
            Self::Mhz108 => 1,
            Self::Mhz136 => 2,
            Self::Mhz174 => 3,
            Self::Mhz350 => 4,
            Self::Mhz400 => 5,
            Self::Mhz470 => 6,
        }
    }

    /// Whether transmitting is permitted on this band
    ///
    /// Stock configuration allows TX only on the two duplex-service
    /// bands; `Capabilities::unlock_all_tx` widens this to the whole
    /// tunable span.
    #[must_use]
    pub const fn tx_allowed(self, caps: &Capabilities) -> bool {
        if caps.unlock_all_tx {
            return true;
        }
        matches!(self, Self::Mhz136 | Self::Mhz400)
    }

    /// Get the default modulation for this band
    #[must_use]
    pub const fn default_modulation(self) -> Modulation {
        match self {
            Self::Mhz108 => Modulation::Am,
            _ => Modulation::Fm,
        }
    }

    /// Get the default tuning step for this band
    #[must_use]
    pub const fn default_step(self) -> Step {
        match self {
            Self::Mhz108 => Step::K8_33,
            Self::Mhz50 | Self::Mhz174 | Self::Mhz350 | Self::Mhz470 => Step::K25,
            Self::Mhz136 | Self::Mhz400 => Step::K12_5,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}MHz", self.start_hz() / 1_000_000);
    }
}

/// Tuning step size (preset table)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Step {
    /// 2.5 kHz
    K2_5,
    /// 5 kHz
    K5,
    /// 6.25 kHz
    K6_25,
    /// 8.33 kHz (airband channel spacing)
    K8_33,
    /// 10 kHz
    K10,
    /// 12.5 kHz
    #[default]
    K12_5,
    /// 25 kHz
    K25,
}

impl Step {
    /// All steps in table order
    pub const ALL: [Self; 7] = [
        Self::K2_5,
        Self::K5,
        Self::K6_25,
        Self::K8_33,
        Self::K10,
        Self::K12_5,
        Self::K25,
    ];

    /// Get the step size in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        match self {
            Self::K2_5 => 2_500,
            Self::K5 => 5_000,
            Self::K6_25 => 6_250,
            Self::K8_33 => 8_330,
            Self::K10 => 10_000,
            Self::K12_5 => 12_500,
            Self::K25 => 25_000,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Step {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.as_hz());
    }
}

/// Demodulator mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Modulation {
    /// Frequency modulation
    #[default]
    Fm,
    /// Amplitude modulation (airband)
    Am,
    /// Upper sideband
    Usb,
    /// Filter bypass (wideband IF tap)
    Bypass,
    /// Raw demodulator output
    Raw,
}

impl Modulation {
    /// Next mode in the user cycle
    ///
    /// FM → AM → USB → FM, extended through Bypass and Raw when the
    /// capability set enables them. This is the only user-facing
    /// order; explicit sets bypass the cycle.
    #[must_use]
    pub const fn next_in_cycle(self, caps: &Capabilities) -> Self {
        match self {
            Self::Fm => Self::Am,
            Self::Am => Self::Usb,
            Self::Usb => {
                if caps.byp_raw_demodulators {
                    Self::Bypass
                } else {
                    Self::Fm
                }
            }
            Self::Bypass => Self::Raw,
            Self::Raw => Self::Fm,
        }
    }

    /// Whether this mode demodulates amplitude (drives AGC table choice)
    #[must_use]
    pub const fn is_am(self) -> bool {
        matches!(self, Self::Am)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Modulation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Fm => defmt::write!(f, "FM"),
            Self::Am => defmt::write!(f, "AM"),
            Self::Usb => defmt::write!(f, "USB"),
            Self::Bypass => defmt::write!(f, "BYP"),
            Self::Raw => defmt::write!(f, "RAW"),
        }
    }
}

/// Channel bandwidth
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Bandwidth {
    /// 25 kHz wide FM
    #[default]
    Wide,
    /// 12.5 kHz narrow FM
    Narrow,
}

impl Bandwidth {
    /// Flip wide/narrow
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Wide => Self::Narrow,
            Self::Narrow => Self::Wide,
        }
    }
}

/// TX output power tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TxPower {
    /// Lowest power
    Low1,
    /// Low power 2
    Low2,
    /// Low power 3
    Low3,
    /// Low power 4
    Low4,
    /// Low power 5
    Low5,
    /// Medium power
    #[default]
    Mid,
    /// Full power
    High,
}

impl TxPower {
    /// All tiers in ascending order
    pub const ALL: [Self; 7] = [
        Self::Low1,
        Self::Low2,
        Self::Low3,
        Self::Low4,
        Self::Low5,
        Self::Mid,
        Self::High,
    ];

    /// Tier index, 0 = lowest
    #[must_use]
    pub const fn tier(self) -> u8 {
        match self {
            Self::Low1 => 0,
            Self::Low2 => 1,
            Self::Low3 => 2,
            Self::Low4 => 3,
            Self::Low5 => 4,
            Self::Mid => 5,
            Self::High => 6,
        }
    }

    /// Next tier in the user cycle (L1 → … → H → L1)
    #[must_use]
    pub const fn next_in_cycle(self) -> Self {
        match self {
            Self::Low1 => Self::Low2,
            Self::Low2 => Self::Low3,
            Self::Low3 => Self::Low4,
            Self::Low4 => Self::Low5,
            Self::Low5 => Self::Mid,
            Self::Mid => Self::High,
            Self::High => Self::Low1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxPower {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low1 => defmt::write!(f, "L1"),
            Self::Low2 => defmt::write!(f, "L2"),
            Self::Low3 => defmt::write!(f, "L3"),
            Self::Low4 => defmt::write!(f, "L4"),
            Self::Low5 => defmt::write!(f, "L5"),
            Self::Mid => defmt::write!(f, "M"),
            Self::High => defmt::write!(f, "H"),
        }
    }
}

/// TX offset direction for duplex operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OffsetDirection {
    /// Simplex, TX frequency equals RX frequency
    #[default]
    Off,
    /// TX above RX
    Add,
    /// TX below RX
    Sub,
}

/// PTT-ID signaling mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PttId {
    /// No signaling
    #[default]
    Off,
    /// Identify at start of transmission
    TxUp,
    /// Identify at end of transmission
    TxDown,
    /// Identify at both ends
    Both,
    /// Quindar-style begin/end tones
    Apollo,
}

impl PttId {
    /// Whether this mode sends signaling when keying up
    #[must_use]
    pub const fn signals_begin(self) -> bool {
        matches!(self, Self::TxUp | Self::Both | Self::Apollo)
    }

    /// Whether this mode sends signaling when unkeying
    #[must_use]
    pub const fn signals_end(self) -> bool {
        matches!(self, Self::TxDown | Self::Both | Self::Apollo)
    }
}

/// Audio compander configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compander {
    /// Disabled
    #[default]
    Off,
    /// Compress TX audio only
    TxOnly,
    /// Expand RX audio only
    RxOnly,
    /// Both directions
    Both,
}

/// Latched per-radio status
///
/// Set by the orchestrator, cleared only by explicit reset or
/// re-selection. The caller refuses TX when the state does not permit
/// it; this core only records and exposes the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VfoState {
    /// Ready
    #[default]
    Normal,
    /// Channel busy (busy-channel lockout)
    Busy,
    /// Battery too low to transmit
    BatLow,
    /// Transmit disabled (band lock or TX lock)
    TxDisable,
    /// Transmit timeout elapsed
    Timeout,
    /// Alarm active
    Alarm,
    /// Supply voltage too high
    VoltageHigh,
}

impl VfoState {
    /// Whether the caller may key the transmitter in this state
    #[must_use]
    pub const fn permits_tx(self) -> bool {
        matches!(self, Self::Normal | Self::Busy)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VfoState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Normal => defmt::write!(f, "NORMAL"),
            Self::Busy => defmt::write!(f, "BUSY"),
            Self::BatLow => defmt::write!(f, "BAT-LOW"),
            Self::TxDisable => defmt::write!(f, "TX-DIS"),
            Self::Timeout => defmt::write!(f, "TIMEOUT"),
            Self::Alarm => defmt::write!(f, "ALARM"),
            Self::VoltageHigh => defmt::write!(f, "V-HIGH"),
        }
    }
}

/// Scan walk direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanDirection {
    /// Ascending channel numbers / frequency
    #[default]
    Up,
    /// Descending
    Down,
}

impl ScanDirection {
    /// Opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}
