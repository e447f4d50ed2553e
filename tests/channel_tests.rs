//! Tests for channel memory and validation
//!
//! Covers the bank predicate, the bounded circular next-channel
//! search, and slot storage rules.

use ht_firmware::radio::channel::{Channel, ChannelBank, ScanListId, ScanLists};
use ht_firmware::types::{Frequency, ScanDirection};

fn channel_at(number: u8, hz: u32) -> Channel {
    let mut ch = Channel::empty(number);
    ch.frequency = Frequency::from_hz(hz).unwrap();
    ch
}

// ============================================================================
// Slot storage
// ============================================================================

#[test]
fn bank_starts_empty() {
    let bank = ChannelBank::new();
    assert_eq!(bank.active_count(), 0);
}

#[test]
fn store_and_get() {
    let mut bank = ChannelBank::new();
    assert!(bank.store(7, channel_at(7, 145_500_000)));
    assert_eq!(bank.active_count(), 1);

    let ch = bank.get(7).unwrap();
    assert!(ch.in_use);
    assert_eq!(ch.number, 7);
    assert_eq!(ch.frequency.as_hz(), 145_500_000);
}

#[test]
fn store_renumbers_to_slot() {
    let mut bank = ChannelBank::new();
    // Payload numbered 3 stored into slot 12 takes the slot's number
    assert!(bank.store(12, channel_at(3, 446_000_000)));
    assert_eq!(bank.get(12).unwrap().number, 12);
}

#[test]
fn store_rejects_out_of_range_slot() {
    let mut bank = ChannelBank::new();
    assert!(!bank.store(200, channel_at(0, 145_500_000)));
    assert_eq!(bank.active_count(), 0);
}

#[test]
fn store_rejects_band_gap_frequency() {
    // 90 MHz is on the grid and in the global span but in the 76-108
    // MHz gap, so it belongs to no band
    let mut bank = ChannelBank::new();
    assert!(!bank.store(0, channel_at(0, 90_000_000)));
    assert!(!bank.validate(0, false, ScanListId::List1));
}

#[test]
fn erase_clears_slot() {
    let mut bank = ChannelBank::new();
    bank.store(3, channel_at(3, 145_500_000));
    assert!(bank.validate(3, false, ScanListId::List1));

    bank.erase(3);
    assert!(!bank.validate(3, false, ScanListId::List1));
    assert_eq!(bank.active_count(), 0);
}

// ============================================================================
// Validity predicate
// ============================================================================

#[test]
fn validate_empty_slot_is_false_not_error() {
    let bank = ChannelBank::new();
    for number in 0u16..=255 {
        // Total predicate over the whole index type, in and out of range
        let _ = bank.validate(number as u8, false, ScanListId::List2);
    }
    assert!(!bank.validate(0, false, ScanListId::List1));
    assert!(!bank.validate(255, false, ScanListId::List1));
}

#[test]
fn validate_scan_list_membership() {
    let mut bank = ChannelBank::new();
    let mut ch = channel_at(4, 446_000_000);
    ch.scan_lists = ScanLists {
        list1: true,
        list2: false,
        list3: true,
    };
    bank.store(4, ch);

    assert!(bank.validate(4, false, ScanListId::List2));
    assert!(bank.validate(4, true, ScanListId::List1));
    assert!(!bank.validate(4, true, ScanListId::List2));
    assert!(bank.validate(4, true, ScanListId::List3));
}

// ============================================================================
// Next-channel search
// ============================================================================

#[test]
fn find_next_immediate_match_returns_start() {
    let mut bank = ChannelBank::new();
    bank.store(9, channel_at(9, 145_500_000));
    assert_eq!(bank.find_next(9, ScanDirection::Up, false, ScanListId::List1), 9);
    assert_eq!(bank.find_next(9, ScanDirection::Down, false, ScanListId::List1), 9);
}

#[test]
fn find_next_empty_bank_returns_start_unchanged() {
    let bank = ChannelBank::new();
    assert_eq!(bank.find_next(9, ScanDirection::Up, false, ScanListId::List1), 9);
    assert_eq!(bank.find_next(0, ScanDirection::Down, false, ScanListId::List1), 0);
    assert_eq!(bank.find_next(199, ScanDirection::Up, false, ScanListId::List1), 199);
}

#[test]
fn find_next_wraps_circularly() {
    // Slots {2, 5, 9} populated; stepping up from 9 walks 2, 5, 9, 2...
    let mut bank = ChannelBank::new();
    for n in [2, 5, 9] {
        bank.store(n, channel_at(n, 145_500_000));
    }

    let mut current = 9;
    let mut seen = Vec::new();
    for _ in 0..4 {
        let from = ChannelBank::next_position(current, ScanDirection::Up);
        current = bank.find_next(from, ScanDirection::Up, false, ScanListId::List1);
        seen.push(current);
    }
    assert_eq!(seen, [2, 5, 9, 2]);
}

#[test]
fn find_next_walks_down() {
    let mut bank = ChannelBank::new();
    for n in [2, 5, 9] {
        bank.store(n, channel_at(n, 145_500_000));
    }

    let from = ChannelBank::next_position(2, ScanDirection::Down);
    assert_eq!(bank.find_next(from, ScanDirection::Down, false, ScanListId::List1), 9);
}

#[test]
fn find_next_honors_scan_list_filter() {
    let mut bank = ChannelBank::new();
    let mut member = channel_at(10, 145_500_000);
    member.scan_lists.list2 = true;
    bank.store(10, member);
    bank.store(6, channel_at(6, 145_500_000));

    // Unfiltered finds 6 first; filtered skips to 10
    assert_eq!(bank.find_next(0, ScanDirection::Up, false, ScanListId::List2), 6);
    assert_eq!(bank.find_next(0, ScanDirection::Up, true, ScanListId::List2), 10);
}

#[test]
fn next_position_wraps_at_table_bounds() {
    assert_eq!(ChannelBank::next_position(199, ScanDirection::Up), 0);
    assert_eq!(ChannelBank::next_position(0, ScanDirection::Down), 199);
    assert_eq!(ChannelBank::next_position(10, ScanDirection::Up), 11);
    assert_eq!(ChannelBank::next_position(10, ScanDirection::Down), 9);
}
