//! Channel Memory and Validation
//!
//! The memory-channel bank, the channel validity predicate, and the
//! circular next-channel search the scanner builds on. Validation is a
//! predicate, never a fallible operation: an erased slot is simply an
//! invalid channel.

use heapless::String;

use crate::config::CHANNEL_COUNT;
use crate::css::CssCode;
use crate::types::{
    Bandwidth, Compander, Frequency, Modulation, OffsetDirection, PttId, ScanDirection, Step,
    TxPower,
};

/// Identity of one of the three scan lists
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanListId {
    /// Scan list 1
    List1,
    /// Scan list 2
    List2,
    /// Scan list 3
    List3,
}

/// Scan-list membership of a channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScanLists {
    /// Member of list 1
    pub list1: bool,
    /// Member of list 2
    pub list2: bool,
    /// Member of list 3
    pub list3: bool,
}

impl ScanLists {
    /// No memberships
    pub const NONE: Self = Self {
        list1: false,
        list2: false,
        list3: false,
    };

    /// Whether the channel belongs to the given list
    #[must_use]
    pub const fn contains(self, list: ScanListId) -> bool {
        match list {
            ScanListId::List1 => self.list1,
            ScanListId::List2 => self.list2,
            ScanListId::List3 => self.list3,
        }
    }
}

/// One memory channel slot
///
/// The persistable subset of a VFO configuration. The storage encoding
/// belongs to the settings layer; this is the in-memory shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    /// Slot number
    pub number: u8,
    /// RX frequency
    pub frequency: Frequency,
    /// TX offset amount in Hz
    pub offset_hz: u32,
    /// TX offset direction
    pub offset_direction: OffsetDirection,
    /// RX code squelch
    pub rx_css: CssCode,
    /// TX code squelch
    pub tx_css: CssCode,
    /// Tuning step
    pub step: Step,
    /// IF bandwidth
    pub bandwidth: Bandwidth,
    /// Demodulator mode
    pub modulation: Modulation,
    /// TX power tier
    pub tx_power: TxPower,
    /// Scan-list membership
    pub scan_lists: ScanLists,
    /// Refuse TX while the channel is busy
    pub busy_lock: bool,
    /// PTT-ID signaling mode
    pub ptt_id: PttId,
    /// Compander setting
    pub compander: Compander,
    /// Scrambler setting, 0 = off
    pub scramble: u8,
    /// Channel name
    pub name: String<16>,
    /// Slot is populated
    pub in_use: bool,
}

impl Channel {
    /// Create an erased slot
    #[must_use]
    pub fn empty(number: u8) -> Self {
        Self {
            number,
            frequency: crate::config::DEFAULT_FREQUENCY,
            offset_hz: 0,
            offset_direction: OffsetDirection::Off,
            rx_css: CssCode::Off,
            tx_css: CssCode::Off,
            step: Step::default(),
            bandwidth: Bandwidth::Wide,
            modulation: Modulation::Fm,
            tx_power: TxPower::default(),
            scan_lists: ScanLists::NONE,
            busy_lock: false,
            ptt_id: PttId::Off,
            compander: Compander::Off,
            scramble: 0,
            name: String::new(),
            in_use: false,
        }
    }

    /// Mark the slot erased
    pub fn clear(&mut self) {
        *self = Self::empty(self.number);
    }
}

/// The memory channel bank
pub struct ChannelBank {
    channels: [Channel; CHANNEL_COUNT],
}

impl ChannelBank {
    /// Create an empty bank
    #[must_use]
    pub fn new() -> Self {
        let channels = core::array::from_fn(|i| Channel::empty(i as u8));
        Self { channels }
    }

    /// Get a slot by number
    #[must_use]
    pub fn get(&self, number: u8) -> Option<&Channel> {
        self.channels.get(number as usize)
    }

    /// Get a slot mutably by number
    pub fn get_mut(&mut self, number: u8) -> Option<&mut Channel> {
        self.channels.get_mut(number as usize)
    }

    /// Store a channel into its slot
    ///
    /// Returns false when the slot number is out of range or the
    /// content fails validation (frequency outside every band, code
    /// index outside its table); the bank is left unchanged.
    pub fn store(&mut self, number: u8, mut channel: Channel) -> bool {
        if channel.frequency.band().is_none()
            || !channel.rx_css.is_valid()
            || !channel.tx_css.is_valid()
        {
            return false;
        }
        let Some(slot) = self.channels.get_mut(number as usize) else {
            return false;
        };
        channel.number = number;
        channel.in_use = true;
        *slot = channel;
        true
    }

    /// Erase a slot
    pub fn erase(&mut self, number: u8) {
        if let Some(slot) = self.channels.get_mut(number as usize) {
            slot.clear();
        }
    }

    /// Channel validity predicate
    ///
    /// True iff the slot exists and is populated, its frequency lies in
    /// a supported band, and (when `check_scan_list`) it belongs to the
    /// given scan list. Never errors.
    #[must_use]
    pub fn validate(&self, number: u8, check_scan_list: bool, list: ScanListId) -> bool {
        let Some(channel) = self.channels.get(number as usize) else {
            return false;
        };
        if !channel.in_use || channel.frequency.band().is_none() {
            return false;
        }
        if check_scan_list && !channel.scan_lists.contains(list) {
            return false;
        }
        true
    }

    /// Find the next valid channel, starting at `start` inclusive
    ///
    /// Walks circularly in `direction`, at most one full cycle. When no
    /// slot qualifies, returns `start` unchanged — "nothing found" is a
    /// value, not an error, and the walk is bounded by the table size.
    #[must_use]
    pub fn find_next(
        &self,
        start: u8,
        direction: ScanDirection,
        check_scan_list: bool,
        list: ScanListId,
    ) -> u8 {
        let n = CHANNEL_COUNT as u16;
        let mut index = u16::from(start) % n;
        for _ in 0..n {
            if self.validate(index as u8, check_scan_list, list) {
                return index as u8;
            }
            index = match direction {
                ScanDirection::Up => (index + 1) % n,
                ScanDirection::Down => (index + n - 1) % n,
            };
        }
        start
    }

    /// Slot adjacent to `number` in `direction`, with wrap
    #[must_use]
    pub fn next_position(number: u8, direction: ScanDirection) -> u8 {
        let n = CHANNEL_COUNT as u16;
        let index = u16::from(number) % n;
        let next = match direction {
            ScanDirection::Up => (index + 1) % n,
            ScanDirection::Down => (index + n - 1) % n,
        };
        next as u8
    }

    /// Count populated slots
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.channels.iter().filter(|ch| ch.in_use).count()
    }
}

impl Default for ChannelBank {
    fn default() -> Self {
        Self::new()
    }
}
