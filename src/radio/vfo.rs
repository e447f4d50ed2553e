//! VFO Data Model
//!
//! The per-VFO configuration context: RX/TX frequency configs, the
//! frequency-reverse selector, duplex offset, and the per-VFO hardware
//! calibration the squelch configurator fills in.

use heapless::String;

use crate::css::CssCode;
use crate::radio::channel::{Channel, ScanLists};
use crate::rf::SquelchThresholds;
use crate::types::{
    Band, Bandwidth, Compander, Frequency, Modulation, OffsetDirection, PttId, Step, TxPower,
};

/// One direction's frequency and code squelch selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyConfig {
    /// Tuned frequency
    pub frequency: Frequency,
    /// Code squelch
    pub css: CssCode,
}

impl FrequencyConfig {
    /// Carrier-squelch config at a frequency
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            css: CssCode::Off,
        }
    }
}

/// Frequency-reverse selector
///
/// Replaces the original's swapped-pointer pair: which of `rx`/`tx`
/// the hardware RX and TX paths read is fully determined by this
/// two-valued selector, so the "never both the same field" invariant
/// holds by construction and later edits to either config are always
/// seen through the accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrequencyReverse {
    /// RX path reads `rx`, TX path reads `tx`
    #[default]
    Normal,
    /// Paths swapped, for repeater-input monitoring
    Reversed,
}

impl FrequencyReverse {
    /// The other selector value
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Reversed,
            Self::Reversed => Self::Normal,
        }
    }
}

/// One logical VFO's complete configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VfoContext {
    /// Base RX configuration
    pub rx: FrequencyConfig,
    /// Base TX configuration
    pub tx: FrequencyConfig,
    /// Frequency-reverse selector
    pub reverse: FrequencyReverse,
    /// Duplex offset amount in Hz
    pub tx_offset_hz: u32,
    /// Duplex offset direction
    pub offset_direction: OffsetDirection,
    /// Tuning step
    pub step: Step,
    /// Bound memory slot; `None` is free-frequency mode
    pub channel_slot: Option<u8>,
    /// Hardware squelch calibration, filled by the configurator
    pub squelch: SquelchThresholds,
    /// TX power tier
    pub tx_power: TxPower,
    /// PA bias derived from tier and band calibration, never user-set
    pub calculated_power: u8,
    /// Transmit locked out on this VFO
    pub tx_lock: bool,
    /// IF bandwidth
    pub bandwidth: Bandwidth,
    /// Demodulator mode
    pub modulation: Modulation,
    /// Compander setting
    pub compander: Compander,
    /// Scrambler setting, 0 = off
    pub scramble: u8,
    /// Scan-list membership
    pub scan_lists: ScanLists,
    /// Cached band of the RX frequency
    pub band: Band,
    /// DTMF decoder enabled on this VFO
    pub dtmf_decoding: bool,
    /// PTT-ID signaling mode
    pub ptt_id: PttId,
    /// Refuse TX while the channel is busy
    pub busy_lock: bool,
    /// Display name
    pub name: String<16>,
}

impl VfoContext {
    /// Reset to factory defaults at a frequency
    ///
    /// Clears tone, offset, and scrambler settings and selects the
    /// band matching the frequency, with the band's default step and
    /// modulation. A frequency outside every band falls back to the
    /// crate default; a VFO never holds an untunable configuration.
    #[must_use]
    pub fn init(channel_slot: Option<u8>, frequency: Frequency) -> Self {
        let (frequency, band) = match frequency.band() {
            Some(band) => (frequency, band),
            None => {
                let fallback = crate::config::DEFAULT_FREQUENCY;
                (fallback, fallback.band().unwrap_or(Band::Mhz136))
            }
        };
        Self {
            rx: FrequencyConfig::new(frequency),
            tx: FrequencyConfig::new(frequency),
            reverse: FrequencyReverse::Normal,
            tx_offset_hz: 0,
            offset_direction: OffsetDirection::Off,
            step: band.default_step(),
            channel_slot,
            squelch: SquelchThresholds::default(),
            tx_power: TxPower::default(),
            calculated_power: 0,
            tx_lock: false,
            bandwidth: Bandwidth::Wide,
            modulation: band.default_modulation(),
            compander: Compander::Off,
            scramble: 0,
            scan_lists: ScanLists::NONE,
            band,
            dtmf_decoding: false,
            ptt_id: PttId::Off,
            busy_lock: false,
            name: String::new(),
        }
    }

    /// Load a VFO from a memory channel
    ///
    /// Recomputes the band cache and TX config from the stored RX
    /// frequency and offset.
    #[must_use]
    pub fn from_channel(channel: &Channel) -> Self {
        let mut vfo = Self::init(Some(channel.number), channel.frequency);
        vfo.rx.css = channel.rx_css;
        vfo.tx.css = channel.tx_css;
        vfo.tx_offset_hz = channel.offset_hz;
        vfo.offset_direction = channel.offset_direction;
        vfo.step = channel.step;
        vfo.bandwidth = channel.bandwidth;
        vfo.modulation = channel.modulation;
        vfo.tx_power = channel.tx_power;
        vfo.scan_lists = channel.scan_lists;
        vfo.busy_lock = channel.busy_lock;
        vfo.ptt_id = channel.ptt_id;
        vfo.compander = channel.compander;
        vfo.scramble = channel.scramble;
        vfo.name = channel.name.clone();
        vfo.apply_offset();
        vfo
    }

    /// Snapshot the persistable subset into a channel payload
    #[must_use]
    pub fn to_channel(&self, number: u8) -> Channel {
        let mut channel = Channel::empty(number);
        channel.frequency = self.rx.frequency;
        channel.offset_hz = self.tx_offset_hz;
        channel.offset_direction = self.offset_direction;
        channel.rx_css = self.rx.css;
        channel.tx_css = self.tx.css;
        channel.step = self.step;
        channel.bandwidth = self.bandwidth;
        channel.modulation = self.modulation;
        channel.tx_power = self.tx_power;
        channel.scan_lists = self.scan_lists;
        channel.busy_lock = self.busy_lock;
        channel.ptt_id = self.ptt_id;
        channel.compander = self.compander;
        channel.scramble = self.scramble;
        channel.name = self.name.clone();
        channel.in_use = true;
        channel
    }

    /// Set the RX frequency
    ///
    /// Rejected (returns false, VFO untouched) when the frequency lies
    /// outside every supported band. On success the band cache is
    /// recomputed; the TX side is not touched — callers re-run
    /// [`apply_offset`](Self::apply_offset) afterwards, there is no
    /// implicit recomputation.
    pub fn set_rx_frequency(&mut self, frequency: Frequency) -> bool {
        let Some(band) = frequency.band() else {
            return false;
        };
        self.rx.frequency = frequency;
        self.band = band;
        true
    }

    /// Set the TX frequency directly (split operation)
    ///
    /// Rejected when outside every supported band.
    pub fn set_tx_frequency(&mut self, frequency: Frequency) -> bool {
        if frequency.band().is_none() {
            return false;
        }
        self.tx.frequency = frequency;
        true
    }

    /// Recompute the TX frequency from RX and the duplex offset
    ///
    /// `tx = rx + offset` or `rx - offset` per the direction; a no-op
    /// when the direction is Off. Must be called after any edit to the
    /// RX frequency, the offset amount, or the direction. An
    /// arithmetic result outside every band degrades to simplex.
    pub fn apply_offset(&mut self) {
        let rx_hz = self.rx.frequency.as_hz();
        let raw = match self.offset_direction {
            OffsetDirection::Off => return,
            OffsetDirection::Add => rx_hz.saturating_add(self.tx_offset_hz),
            OffsetDirection::Sub => rx_hz.saturating_sub(self.tx_offset_hz),
        };
        let aligned = raw - raw % Frequency::GRID_HZ;
        self.tx.frequency = Frequency::from_hz(aligned)
            .filter(|f| f.band().is_some())
            .unwrap_or(self.rx.frequency);
    }

    /// Flip the frequency-reverse selector
    pub fn toggle_reverse(&mut self) {
        self.reverse = self.reverse.toggled();
    }

    /// Config the RX hardware path reads
    #[must_use]
    pub const fn active_rx(&self) -> &FrequencyConfig {
        match self.reverse {
            FrequencyReverse::Normal => &self.rx,
            FrequencyReverse::Reversed => &self.tx,
        }
    }

    /// Config the TX hardware path reads
    #[must_use]
    pub const fn active_tx(&self) -> &FrequencyConfig {
        match self.reverse {
            FrequencyReverse::Normal => &self.tx,
            FrequencyReverse::Reversed => &self.rx,
        }
    }

    /// Whether the VFO is bound to a memory channel
    #[must_use]
    pub const fn is_channel_mode(&self) -> bool {
        self.channel_slot.is_some()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VfoContext {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "VFO({}, {}, {})",
            self.rx.frequency,
            self.modulation,
            self.bandwidth as u8
        );
    }
}
