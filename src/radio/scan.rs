//! Scan Controller
//!
//! Two tick-driven state machines in the style of an action-returning
//! controller: the channel/frequency scanner and the CTCSS/DCS tone
//! scanner. Neither touches hardware; each tick returns what the
//! orchestrator should push, and stopping always restores the
//! configuration that was active before the scan started.

use crate::config::{CSS_SCAN_DWELL_TICKS, SCAN_DWELL_TICKS};
use crate::css::{self, CssCode, CssLock};
use crate::radio::channel::{ChannelBank, ScanListId};
use crate::radio::vfo::VfoContext;
use crate::types::{Frequency, ScanDirection};

// ---------------------------------------------------------------------------
// Channel / frequency scan
// ---------------------------------------------------------------------------

/// Channel scanner state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Not scanning
    #[default]
    Idle,
    /// Advancing through channels or frequencies
    Sweeping,
    /// Held by the user without abandoning the session
    Paused,
    /// Frozen on a position with signal present
    Found,
}

/// What a sweep walks over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanTarget {
    /// Memory channels, optionally restricted to one scan list
    Channels {
        /// Restrict to members of this list
        list_filter: Option<ScanListId>,
    },
    /// Free frequencies across the current band, wrapping at its edges
    Frequency,
}

/// Result of one scanner tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanTick {
    /// Nothing to do
    None,
    /// The VFO moved; push registers
    Moved,
    /// Signal present, sweep frozen
    Found,
}

/// Channel/frequency scan session
///
/// The session owns no hardware access: `tick` mutates the VFO it is
/// handed and reports whether a register push is due. The pre-scan VFO
/// is kept aside so a cancel never leaves the radio on an unconfirmed
/// position.
#[derive(Clone, Debug, Default)]
pub struct ScanSession {
    state: ScanState,
    direction: ScanDirection,
    target: Option<ScanTarget>,
    dwell: u8,
    saved_vfo: Option<VfoContext>,
}

impl ScanSession {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Whether a sweep session exists (in any non-idle state)
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, ScanState::Idle)
    }

    /// Start or restart a sweep
    ///
    /// `restart` re-anchors at the VFO's current position and snapshots
    /// it for the eventual stop-restore; `false` resumes from the last
    /// sweep position, keeping the original snapshot. The target is
    /// derived from the VFO: channel mode sweeps memory, free mode
    /// sweeps the band.
    pub fn start(
        &mut self,
        vfo: &VfoContext,
        direction: ScanDirection,
        list_filter: Option<ScanListId>,
        restart: bool,
    ) {
        self.direction = direction;
        if restart || self.saved_vfo.is_none() {
            self.saved_vfo = Some(vfo.clone());
            self.target = Some(if vfo.is_channel_mode() {
                ScanTarget::Channels { list_filter }
            } else {
                ScanTarget::Frequency
            });
        }
        self.dwell = SCAN_DWELL_TICKS;
        self.state = ScanState::Sweeping;
    }

    /// Hold the sweep without ending the session
    pub fn pause(&mut self) {
        if self.state == ScanState::Sweeping {
            self.state = ScanState::Paused;
        }
    }

    /// Resume sweeping from Found or Paused
    pub fn resume(&mut self) {
        if matches!(self.state, ScanState::Found | ScanState::Paused) {
            self.dwell = SCAN_DWELL_TICKS;
            self.state = ScanState::Sweeping;
        }
    }

    /// Stop and restore the pre-scan VFO configuration
    ///
    /// Returns true when a restore happened (the caller then re-pushes
    /// registers). Effective within the requesting tick.
    pub fn stop(&mut self, vfo: &mut VfoContext) -> bool {
        self.state = ScanState::Idle;
        self.target = None;
        if let Some(saved) = self.saved_vfo.take() {
            *vfo = saved;
            true
        } else {
            false
        }
    }

    /// Advance the sweep by one scheduler tick
    ///
    /// `signal_present` is the hardware squelch status for the current
    /// position; when set, the sweep freezes in `Found` until the
    /// caller resumes or stops.
    pub fn tick(
        &mut self,
        bank: &ChannelBank,
        vfo: &mut VfoContext,
        signal_present: bool,
    ) -> ScanTick {
        if self.state != ScanState::Sweeping {
            return ScanTick::None;
        }
        if signal_present {
            self.state = ScanState::Found;
            return ScanTick::Found;
        }
        if self.dwell > 0 {
            self.dwell -= 1;
            return ScanTick::None;
        }
        self.dwell = SCAN_DWELL_TICKS;

        match self.target {
            Some(ScanTarget::Channels { list_filter }) => {
                self.advance_channel(bank, vfo, list_filter)
            }
            Some(ScanTarget::Frequency) => Self::advance_frequency(vfo, self.direction),
            None => ScanTick::None,
        }
    }

    fn advance_channel(
        &mut self,
        bank: &ChannelBank,
        vfo: &mut VfoContext,
        list_filter: Option<ScanListId>,
    ) -> ScanTick {
        let current = vfo.channel_slot.unwrap_or(0);
        let from = ChannelBank::next_position(current, self.direction);
        let (check, list) = match list_filter {
            Some(list) => (true, list),
            None => (false, ScanListId::List1),
        };
        let next = bank.find_next(from, self.direction, check, list);
        if !bank.validate(next, check, list) {
            // No valid channel anywhere; stay put rather than spin.
            return ScanTick::None;
        }
        if let Some(channel) = bank.get(next) {
            *vfo = VfoContext::from_channel(channel);
            return ScanTick::Moved;
        }
        ScanTick::None
    }

    fn advance_frequency(vfo: &mut VfoContext, direction: ScanDirection) -> ScanTick {
        let band = vfo.band;
        let step = vfo.step;
        let current = vfo.rx.frequency;
        let next_hz = match direction {
            ScanDirection::Up => {
                let hz = current.as_hz().saturating_add(step.as_hz());
                if hz >= band.end_hz() {
                    band.start_hz()
                } else {
                    hz
                }
            }
            ScanDirection::Down => {
                let hz = current.as_hz().saturating_sub(step.as_hz());
                if hz < band.start_hz() {
                    // Wrap to the last step-aligned position below the top
                    let span = band.end_hz() - 1 - band.start_hz();
                    band.start_hz() + span / step.as_hz() * step.as_hz()
                } else {
                    hz
                }
            }
        };
        let aligned = next_hz - next_hz % Frequency::GRID_HZ;
        if let Some(freq) = Frequency::from_hz(aligned) {
            if vfo.set_rx_frequency(freq) {
                vfo.apply_offset();
                return ScanTick::Moved;
            }
        }
        ScanTick::None
    }
}

// ---------------------------------------------------------------------------
// CSS (CTCSS/DCS) tone scan
// ---------------------------------------------------------------------------

/// Tone scanner state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CssScanState {
    /// Not scanning
    #[default]
    Idle,
    /// Probing candidate codes
    Scanning,
    /// Decoder locked on a code
    Found,
    /// Cancelled by the user
    Stopped,
}

/// Menu context the tone scan is valid in
///
/// Tone scan only makes sense while editing the RX CTCSS or RX DCS
/// selection; the caller passes its context as proof. Anything else is
/// a precondition violation the session absorbs as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CssScanContext {
    /// RX CTCSS selection menu
    RxCtcss,
    /// RX DCS selection menu
    RxDcs,
}

/// Result of one tone-scanner tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CssScanTick {
    /// Nothing to do
    None,
    /// Reprogram the decoder for this candidate
    Probe(CssCode),
    /// Decoder locked; code latched for the caller to accept
    Found(CssCode),
}

/// CTCSS/DCS tone scan session
///
/// Walks the concatenated CTCSS-then-DCS index space, giving the
/// decoder a fixed dwell per candidate. Finding a lock latches the
/// code but never writes it into a VFO; committing is an explicit
/// caller action.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssScanSession {
    state: CssScanState,
    position: u8,
    direction: ScanDirection,
    dwell: u8,
    found: Option<CssCode>,
    saved_decoder: Option<CssCode>,
}

impl CssScanSession {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> CssScanState {
        self.state
    }

    /// Code latched by the last lock, if any
    #[must_use]
    pub const fn found_code(&self) -> Option<CssCode> {
        self.found
    }

    /// Start a tone scan
    ///
    /// `context` is the caller's menu-context proof; `None` (or a
    /// session already running) is a defensive no-op returning false.
    /// `current_decoder` is saved and restored on stop, and anchors
    /// the walk at the matching position of the index space.
    ///
    /// Returns the first candidate to probe via the return value of
    /// the next `tick`.
    pub fn start(
        &mut self,
        context: Option<CssScanContext>,
        current_decoder: CssCode,
        direction: ScanDirection,
    ) -> bool {
        if context.is_none() || self.state == CssScanState::Scanning {
            return false;
        }
        self.position = match current_decoder {
            CssCode::Ctcss(i) if current_decoder.is_valid() => i,
            CssCode::Dcs { index, .. } if current_decoder.is_valid() => {
                index + css::CTCSS_OPTIONS.len() as u8
            }
            _ => 0,
        };
        self.direction = direction;
        self.dwell = CSS_SCAN_DWELL_TICKS;
        self.found = None;
        self.saved_decoder = Some(current_decoder);
        self.state = CssScanState::Scanning;
        true
    }

    /// Advance the tone scan by one scheduler tick
    ///
    /// `lock` is the decoder's report for the candidate currently
    /// programmed; a report that does not match the candidate's code
    /// space is ignored as stale.
    pub fn tick(&mut self, lock: Option<CssLock>) -> CssScanTick {
        if self.state != CssScanState::Scanning {
            return CssScanTick::None;
        }
        let candidate = css::scan_candidate(self.position);
        if let Some(code) = lock.and_then(|l| l.confirm(candidate)) {
            self.found = Some(code);
            self.state = CssScanState::Found;
            return CssScanTick::Found(code);
        }
        if self.dwell > 0 {
            self.dwell -= 1;
            return CssScanTick::None;
        }
        self.dwell = CSS_SCAN_DWELL_TICKS;
        let n = u16::from(css::SCAN_INDEX_COUNT);
        let pos = u16::from(self.position);
        self.position = match self.direction {
            ScanDirection::Up => ((pos + 1) % n) as u8,
            ScanDirection::Down => ((pos + n - 1) % n) as u8,
        };
        CssScanTick::Probe(css::scan_candidate(self.position))
    }

    /// Stop the scan and hand back the pre-scan decoder configuration
    ///
    /// The caller must reprogram the decoder with the returned code so
    /// cancellation never leaves it mis-tuned. Valid from any state.
    pub fn stop(&mut self) -> Option<CssCode> {
        self.state = CssScanState::Stopped;
        self.found = None;
        self.saved_decoder.take()
    }

    /// Return to Idle after the caller has consumed a found code or a
    /// stop
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
