//! Radio Orchestrator
//!
//! The owned aggregate tying the core together: both VFO contexts,
//! the channel bank, the selection state, the fault latches, and the
//! two scan sessions. Every mutation enters through a method here, in
//! direct response to a caller call, and register pushes always read
//! the state written earlier in the same tick.
//!
//! There are no process-wide statics; tests build as many radios as
//! they like.

use crate::config::{
    Capabilities, CSS_TAIL_MS, CSS_TAIL_TONE_DHZ, EOT_TONE_DHZ, EOT_TONE_MS, QUINDAR_TONE_DHZ,
    QUINDAR_TONE_MS, SQUELCH_LEVEL_MAX,
};
use crate::css::{CssCode, CssLock};
use crate::power::BatteryStatus;
use crate::radio::channel::{ChannelBank, ScanListId};
use crate::radio::scan::{
    CssScanContext, CssScanSession, CssScanState, CssScanTick, ScanSession, ScanState, ScanTick,
};
use crate::radio::squelch::{agc_for, configure_squelch_and_power};
use crate::radio::vfo::VfoContext;
use crate::rf::{RfConfig, RfDriver, SquelchThresholds};
use crate::types::{Frequency, Modulation, PttId, ScanDirection, VfoState};

/// Identity of one of the two logical VFOs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VfoIndex {
    /// VFO A
    #[default]
    A,
    /// VFO B
    B,
}

impl VfoIndex {
    /// The other VFO
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Array index
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VfoIndex {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "VFO-A"),
            Self::B => defmt::write!(f, "VFO-B"),
        }
    }
}

/// Where a VFO configuration comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelSource {
    /// A populated memory slot
    Slot(u8),
    /// Free-frequency entry
    Free(Frequency),
}

/// The complete radio state aggregate
pub struct RadioState {
    vfos: [VfoContext; 2],
    bank: ChannelBank,
    caps: Capabilities,

    /// User's main VFO choice
    user_tx_vfo: VfoIndex,
    dual_watch: bool,
    crossband: bool,
    /// Dual-watch incoming-signal redirect
    incoming: Option<VfoIndex>,

    /// Resolved by `select_vfos`, never cached by callers
    tx_vfo: VfoIndex,
    rx_vfo: VfoIndex,
    current: VfoIndex,

    vfo_state: [VfoState; 2],
    squelch_level: u8,
    monitor: bool,
    transmitting: bool,

    scan: ScanSession,
    css_scan: CssScanSession,
    /// What the tone decoder is currently programmed with
    tone_decoder: CssCode,
}

impl RadioState {
    /// Build a radio with factory-default VFOs
    #[must_use]
    pub fn new(caps: Capabilities) -> Self {
        let mut radio = Self {
            vfos: [
                VfoContext::init(None, crate::config::DEFAULT_FREQUENCY),
                VfoContext::init(None, crate::config::DEFAULT_FREQUENCY_B),
            ],
            bank: ChannelBank::new(),
            caps,
            user_tx_vfo: VfoIndex::A,
            dual_watch: false,
            crossband: false,
            incoming: None,
            tx_vfo: VfoIndex::A,
            rx_vfo: VfoIndex::A,
            current: VfoIndex::A,
            vfo_state: [VfoState::Normal; 2],
            squelch_level: 4,
            monitor: false,
            transmitting: false,
            scan: ScanSession::new(),
            css_scan: CssScanSession::new(),
            tone_decoder: CssCode::Off,
        };
        configure_squelch_and_power(&mut radio.vfos[0], radio.squelch_level);
        configure_squelch_and_power(&mut radio.vfos[1], radio.squelch_level);
        radio.select_vfos();
        radio
    }

    // -- accessors (the UI layer reads, never holds references) ------------

    /// A VFO's configuration
    #[must_use]
    pub fn vfo(&self, index: VfoIndex) -> &VfoContext {
        &self.vfos[index.index()]
    }

    /// The VFO the foreground configuration follows
    #[must_use]
    pub fn current_vfo(&self) -> &VfoContext {
        &self.vfos[self.current.index()]
    }

    /// Resolved current VFO index
    #[must_use]
    pub const fn current_index(&self) -> VfoIndex {
        self.current
    }

    /// Resolved TX target
    #[must_use]
    pub const fn tx_index(&self) -> VfoIndex {
        self.tx_vfo
    }

    /// Resolved RX target
    #[must_use]
    pub const fn rx_index(&self) -> VfoIndex {
        self.rx_vfo
    }

    /// Latched status for a radio index
    #[must_use]
    pub fn vfo_state(&self, index: VfoIndex) -> VfoState {
        self.vfo_state[index.index()]
    }

    /// Channel bank access for the persistence layer
    #[must_use]
    pub const fn bank(&self) -> &ChannelBank {
        &self.bank
    }

    /// Mutable channel bank access for the persistence layer (boot
    /// load)
    pub fn bank_mut(&mut self) -> &mut ChannelBank {
        &mut self.bank
    }

    /// Whether the carrier is keyed
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Channel scan state
    #[must_use]
    pub const fn scan_state(&self) -> ScanState {
        self.scan.state()
    }

    /// Tone scan state
    #[must_use]
    pub const fn css_scan_state(&self) -> CssScanState {
        self.css_scan.state()
    }

    /// Code latched by the tone scan
    #[must_use]
    pub const fn css_scan_found(&self) -> Option<CssCode> {
        self.css_scan.found_code()
    }

    /// What the tone decoder is currently programmed with
    #[must_use]
    pub const fn tone_decoder(&self) -> CssCode {
        self.tone_decoder
    }

    // -- selection ----------------------------------------------------------

    /// Resolve `tx_vfo`, `rx_vfo`, and `current` from the selection
    /// state
    ///
    /// Re-run on every change to dual-watch, crossband, or the user
    /// VFO choice; callers never cache the resolved indices across
    /// such a change. The dual-watch redirect only moves `current`
    /// (and `rx_vfo`); a PTT during redirect still keys the user's
    /// VFO.
    pub fn select_vfos(&mut self) {
        self.tx_vfo = self.user_tx_vfo;
        self.rx_vfo = if self.crossband {
            self.user_tx_vfo.other()
        } else {
            self.user_tx_vfo
        };
        if !self.crossband && self.dual_watch {
            if let Some(incoming) = self.incoming {
                self.rx_vfo = incoming;
                self.current = incoming;
                return;
            }
        }
        self.current = self.tx_vfo;
    }

    /// Select a VFO as the user's main VFO
    ///
    /// Re-selection clears the target's latched status.
    pub fn set_user_vfo(&mut self, index: VfoIndex) {
        self.user_tx_vfo = index;
        self.vfo_state[index.index()] = VfoState::Normal;
        self.incoming = None;
        self.select_vfos();
    }

    /// Toggle the user's main VFO
    pub fn toggle_user_vfo(&mut self) {
        self.set_user_vfo(self.user_tx_vfo.other());
    }

    /// Enable or disable dual watch
    pub fn set_dual_watch(&mut self, enabled: bool) {
        self.dual_watch = enabled;
        if !enabled {
            self.incoming = None;
        }
        self.select_vfos();
    }

    /// Enable or disable crossband operation
    pub fn set_crossband(&mut self, enabled: bool) {
        self.crossband = enabled;
        if enabled {
            self.incoming = None;
        }
        self.select_vfos();
    }

    /// Report an incoming-signal edge on a VFO (dual watch)
    ///
    /// While crossband is off and dual watch is on, an incoming signal
    /// redirects `current` to the receiving VFO until it clears.
    pub fn on_incoming_signal(&mut self, index: VfoIndex, present: bool) {
        if present {
            if self.dual_watch && !self.crossband {
                self.incoming = Some(index);
            }
        } else if self.incoming == Some(index) {
            self.incoming = None;
        }
        self.select_vfos();
    }

    // -- configuration ------------------------------------------------------

    /// Load a VFO from a memory channel or free-frequency input
    ///
    /// Returns false (VFO untouched) for an empty slot or an
    /// out-of-band frequency; the caller signals the rejection.
    pub fn configure_channel(&mut self, index: VfoIndex, source: ChannelSource) -> bool {
        let vfo = match source {
            ChannelSource::Slot(number) => match self.bank.get(number) {
                Some(channel) if channel.in_use => VfoContext::from_channel(channel),
                _ => return false,
            },
            ChannelSource::Free(frequency) => {
                if frequency.band().is_none() {
                    return false;
                }
                VfoContext::init(None, frequency)
            }
        };
        self.vfos[index.index()] = vfo;
        configure_squelch_and_power(&mut self.vfos[index.index()], self.squelch_level);
        true
    }

    /// Step the current VFO to the adjacent valid channel
    ///
    /// Free-frequency VFOs step by the tuning step instead. Returns
    /// false when nothing moved.
    pub fn channel_step(&mut self, direction: ScanDirection) -> bool {
        let index = self.current.index();
        if let Some(slot) = self.vfos[index].channel_slot {
            let from = ChannelBank::next_position(slot, direction);
            let next = self.bank.find_next(from, direction, false, ScanListId::List1);
            if next == slot || !self.bank.validate(next, false, ScanListId::List1) {
                return false;
            }
            if let Some(channel) = self.bank.get(next) {
                self.vfos[index] = VfoContext::from_channel(channel);
                configure_squelch_and_power(&mut self.vfos[index], self.squelch_level);
                return true;
            }
            false
        } else {
            let vfo = &mut self.vfos[index];
            let next = match direction {
                ScanDirection::Up => vfo.rx.frequency.step_up(vfo.step),
                ScanDirection::Down => vfo.rx.frequency.step_down(vfo.step),
            };
            if !vfo.set_rx_frequency(next) {
                return false;
            }
            vfo.apply_offset();
            configure_squelch_and_power(vfo, self.squelch_level);
            true
        }
    }

    /// Set the current VFO's RX frequency from direct entry
    ///
    /// Out-of-band input is rejected with no mutation.
    pub fn set_frequency(&mut self, frequency: Frequency) -> bool {
        let vfo = &mut self.vfos[self.current.index()];
        if !vfo.set_rx_frequency(frequency) {
            return false;
        }
        vfo.channel_slot = None;
        vfo.apply_offset();
        configure_squelch_and_power(vfo, self.squelch_level);
        true
    }

    /// Set the global squelch level (0-9) and re-derive both VFOs
    pub fn set_squelch_level(&mut self, level: u8) {
        self.squelch_level = level.min(SQUELCH_LEVEL_MAX);
        configure_squelch_and_power(&mut self.vfos[0], self.squelch_level);
        configure_squelch_and_power(&mut self.vfos[1], self.squelch_level);
    }

    /// Set the current VFO's modulation directly (bypasses the cycle)
    pub fn set_modulation(&mut self, modulation: Modulation) {
        self.vfos[self.current.index()].modulation = modulation;
    }

    /// Cycle the current VFO's modulation in the user order
    pub fn cycle_modulation(&mut self) {
        let vfo = &mut self.vfos[self.current.index()];
        vfo.modulation = vfo.modulation.next_in_cycle(&self.caps);
    }

    /// Cycle the current VFO's TX power tier (L1 → … → H → L1)
    pub fn cycle_tx_power(&mut self) {
        let vfo = &mut self.vfos[self.current.index()];
        vfo.tx_power = vfo.tx_power.next_in_cycle();
        configure_squelch_and_power(vfo, self.squelch_level);
    }

    /// Set the current VFO's RX code squelch
    ///
    /// Rejected when the code index is outside its table.
    pub fn set_rx_css(&mut self, code: CssCode) -> bool {
        if !code.is_valid() {
            return false;
        }
        self.vfos[self.current.index()].rx.css = code;
        true
    }

    /// Set the current VFO's TX code squelch
    pub fn set_tx_css(&mut self, code: CssCode) -> bool {
        if !code.is_valid() {
            return false;
        }
        self.vfos[self.current.index()].tx.css = code;
        true
    }

    /// Toggle the current VFO's bandwidth
    pub fn toggle_bandwidth(&mut self) {
        let vfo = &mut self.vfos[self.current.index()];
        vfo.bandwidth = vfo.bandwidth.toggled();
    }

    /// Toggle frequency reverse on the current VFO
    pub fn toggle_reverse(&mut self) {
        self.vfos[self.current.index()].toggle_reverse();
    }

    /// Enable or disable monitor (squelch defeated while on)
    pub fn set_monitor(&mut self, enabled: bool) {
        self.monitor = enabled;
    }

    /// Lock or unlock TX on the current VFO
    pub fn set_tx_lock(&mut self, locked: bool) {
        self.vfos[self.current.index()].tx_lock = locked;
    }

    /// Latch a status code on a radio index
    ///
    /// This core records and exposes the state; refusing TX on a
    /// non-permitting state is the caller's decision.
    pub fn set_vfo_state(&mut self, index: VfoIndex, state: VfoState) {
        self.vfo_state[index.index()] = state;
    }

    /// Clear a latched status back to Normal
    pub fn reset_vfo_state(&mut self, index: VfoIndex) {
        self.vfo_state[index.index()] = VfoState::Normal;
    }

    /// Fold a battery reading into the fault latches
    ///
    /// Low/critical charge latches `BatLow`, overvoltage latches
    /// `VoltageHigh`, on both radio indices. A normal reading does not
    /// clear an existing latch.
    pub fn apply_battery_status(&mut self, status: BatteryStatus) {
        let latched = match status {
            BatteryStatus::Low | BatteryStatus::Critical => VfoState::BatLow,
            BatteryStatus::Overvoltage => VfoState::VoltageHigh,
            BatteryStatus::Normal => return,
        };
        self.vfo_state = [latched; 2];
    }

    /// Snapshot the current VFO into a memory slot
    pub fn save_channel(&mut self, number: u8) -> bool {
        let channel = self.vfos[self.current.index()].to_channel(number);
        if self.bank.store(number, channel) {
            self.vfos[self.current.index()].channel_slot = Some(number);
            true
        } else {
            false
        }
    }

    /// Erase a memory slot
    pub fn erase_channel(&mut self, number: u8) {
        self.bank.erase(number);
        for vfo in &mut self.vfos {
            if vfo.channel_slot == Some(number) {
                vfo.channel_slot = None;
            }
        }
    }

    // -- register pushes ----------------------------------------------------

    /// Build the flattened register set for the current VFO
    ///
    /// Pure function of the state, which is what makes
    /// [`setup_registers`](Self::setup_registers) idempotent.
    #[must_use]
    pub fn build_rf_config(&self) -> RfConfig {
        let vfo = &self.vfos[self.current.index()];
        let rx = vfo.active_rx();
        let squelch = if self.monitor || self.squelch_level == 0 {
            SquelchThresholds::open()
        } else {
            vfo.squelch
        };
        RfConfig {
            frequency_hz: rx.frequency.as_hz(),
            modulation: vfo.modulation,
            bandwidth: vfo.bandwidth,
            squelch,
            agc: agc_for(vfo.modulation.is_am(), false),
            rx_css: rx.css,
            power_setting: vfo.calculated_power,
            scramble: vfo.scramble,
        }
    }

    /// Push the current VFO's full configuration to the RF driver
    ///
    /// `switch_to_foreground` re-derives squelch and power first, for
    /// returning from an activity that bypassed the normal edit paths
    /// (TX, tone scan). Idempotent: unchanged state pushes an
    /// identical configuration.
    pub fn setup_registers<D: RfDriver>(&mut self, driver: &mut D, switch_to_foreground: bool) {
        if switch_to_foreground {
            configure_squelch_and_power(&mut self.vfos[self.current.index()], self.squelch_level);
        }
        let config = self.build_rf_config();
        self.tone_decoder = config.rx_css;
        driver.apply(&config);
    }

    // -- transmit sequencing ------------------------------------------------

    /// Prepare and key the transmitter
    ///
    /// Latches the outcome on the TX radio index: `Busy` for a
    /// busy-channel lockout refusal, `TxDisable` for a TX lock or a
    /// band that does not permit TX, `Normal` when keyed. The carrier
    /// is keyed only on `Normal`; the returned state is the caller's
    /// user feedback.
    pub fn prepare_tx<D: RfDriver>(&mut self, driver: &mut D, channel_busy: bool) -> VfoState {
        let index = self.tx_vfo;
        configure_squelch_and_power(&mut self.vfos[index.index()], self.squelch_level);
        let vfo = &self.vfos[index.index()];
        let tx = vfo.active_tx();

        let state = if vfo.tx_lock {
            VfoState::TxDisable
        } else if !tx
            .frequency
            .band()
            .is_some_and(|band| band.tx_allowed(&self.caps))
        {
            VfoState::TxDisable
        } else if channel_busy && vfo.busy_lock && !self.monitor {
            VfoState::Busy
        } else {
            VfoState::Normal
        };

        self.vfo_state[index.index()] = state;
        if state == VfoState::Normal {
            driver.enable_transmitter(tx.frequency.as_hz(), vfo.calculated_power);
            self.transmitting = true;
        }
        state
    }

    /// Configure TX code squelch and start-of-transmission signaling
    ///
    /// Call after a successful [`prepare_tx`](Self::prepare_tx).
    pub fn prepare_css_tx<D: RfDriver>(&mut self, driver: &mut D) {
        let vfo = &self.vfos[self.tx_vfo.index()];
        driver.set_tone_encoder(vfo.active_tx().css);
        match vfo.ptt_id {
            PttId::Apollo => driver.play_tone(QUINDAR_TONE_DHZ, QUINDAR_TONE_MS),
            id if id.signals_begin() => driver.play_tone(EOT_TONE_DHZ, EOT_TONE_MS),
            _ => {}
        }
    }

    /// Send the squelch-tail elimination burst
    ///
    /// Must precede the transmitter-disable write; receivers use it to
    /// mute their own squelch tail.
    pub fn send_css_tail<D: RfDriver>(&mut self, driver: &mut D) {
        driver.play_tone(CSS_TAIL_TONE_DHZ, CSS_TAIL_MS);
    }

    /// Send end-of-transmission identification per the PTT-ID mode
    pub fn send_end_of_transmission<D: RfDriver>(&mut self, driver: &mut D) {
        let ptt_id = self.vfos[self.tx_vfo.index()].ptt_id;
        match ptt_id {
            PttId::Apollo => driver.play_tone(QUINDAR_TONE_DHZ, QUINDAR_TONE_MS),
            id if id.signals_end() => driver.play_tone(EOT_TONE_DHZ, EOT_TONE_MS),
            _ => {}
        }
    }

    /// Unkey with the fixed end-of-transmission order
    ///
    /// End-of-TX identification, then the CSS tail, then — and only
    /// then — the transmitter-disable write, then the RX configuration
    /// is restored. The tail-before-unkey order is what lets the far
    /// receiver suppress the keyup/keydown click.
    pub fn end_transmission<D: RfDriver>(&mut self, driver: &mut D) {
        let vfo = &self.vfos[self.tx_vfo.index()];
        let signals_end = vfo.ptt_id.signals_end();
        let sends_tail = signals_end || vfo.active_tx().css != CssCode::Off;
        if signals_end {
            self.send_end_of_transmission(driver);
        }
        if sends_tail {
            self.send_css_tail(driver);
        }
        driver.disable_transmitter();
        self.transmitting = false;
        self.setup_registers(driver, true);
    }

    // -- channel / frequency scan -------------------------------------------

    /// Start or restart a channel/frequency scan on the current VFO
    pub fn start_scan(
        &mut self,
        direction: ScanDirection,
        list_filter: Option<ScanListId>,
        restart: bool,
    ) {
        let index = self.current.index();
        self.scan
            .start(&self.vfos[index], direction, list_filter, restart);
    }

    /// Advance the scan by one scheduler tick
    ///
    /// `squelch_open` is the hardware squelch status; a move pushes the
    /// new position's registers before the tick returns.
    pub fn scan_tick<D: RfDriver>(&mut self, driver: &mut D, squelch_open: bool) -> ScanTick {
        let index = self.current.index();
        let result = self
            .scan
            .tick(&self.bank, &mut self.vfos[index], squelch_open);
        if result == ScanTick::Moved {
            self.setup_registers(driver, true);
        }
        result
    }

    /// Resume sweeping after a Found freeze
    pub fn resume_scan(&mut self) {
        self.scan.resume();
    }

    /// Stop the scan, restoring the pre-scan VFO configuration
    pub fn stop_scan<D: RfDriver>(&mut self, driver: &mut D) {
        let index = self.current.index();
        if self.scan.stop(&mut self.vfos[index]) {
            self.setup_registers(driver, true);
        }
    }

    // -- CSS tone scan ------------------------------------------------------

    /// Start a tone scan over the CTCSS+DCS code space
    ///
    /// Valid only from the RX CTCSS / RX DCS menu contexts; anything
    /// else is absorbed as a no-op returning false.
    pub fn start_css_scan(
        &mut self,
        context: Option<CssScanContext>,
        direction: ScanDirection,
    ) -> bool {
        self.css_scan.start(context, self.tone_decoder, direction)
    }

    /// Advance the tone scan by one scheduler tick
    ///
    /// `lock` is the decoder's report for the currently programmed
    /// candidate. A probe reprograms the decoder; a find latches the
    /// code for the menu layer, which commits it (or not) explicitly.
    pub fn css_scan_tick<D: RfDriver>(
        &mut self,
        driver: &mut D,
        lock: Option<CssLock>,
    ) -> CssScanTick {
        let result = self.css_scan.tick(lock);
        if let CssScanTick::Probe(code) = result {
            self.tone_decoder = code;
            driver.set_tone_decoder(code);
        }
        result
    }

    /// Stop the tone scan, restoring the pre-scan decoder programming
    pub fn stop_css_scan<D: RfDriver>(&mut self, driver: &mut D) {
        if let Some(saved) = self.css_scan.stop() {
            self.tone_decoder = saved;
            driver.set_tone_decoder(saved);
        }
    }

    /// Commit the found tone into the current VFO's RX config
    ///
    /// The explicit accept action; returns false when nothing was
    /// found.
    pub fn accept_css_scan<D: RfDriver>(&mut self, driver: &mut D) -> bool {
        let Some(code) = self.css_scan.found_code() else {
            return false;
        };
        self.vfos[self.current.index()].rx.css = code;
        self.css_scan.reset();
        self.setup_registers(driver, true);
        true
    }
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new(Capabilities::stock())
    }
}
