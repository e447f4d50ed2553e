//! Tests for battery supervision

use ht_firmware::power::{BatteryStatus, BatterySupervisor, BatteryVoltage};

#[test]
fn voltage_from_centivolts() {
    let v = BatteryVoltage::from_centivolts(780);
    assert_eq!(v.centivolts(), 780);
}

#[test]
fn voltage_from_adc_scales() {
    // Full-scale sample maps to the calibration value
    assert_eq!(BatteryVoltage::from_adc(4096, 1000).centivolts(), 1000);
    assert_eq!(BatteryVoltage::from_adc(2048, 1000).centivolts(), 500);
    assert_eq!(BatteryVoltage::from_adc(0, 1000).centivolts(), 0);
}

#[test]
fn percentage_clamps_at_bounds() {
    assert_eq!(BatteryVoltage::from_centivolts(840).percentage(), 100);
    assert_eq!(BatteryVoltage::from_centivolts(900).percentage(), 100);
    assert_eq!(BatteryVoltage::from_centivolts(620).percentage(), 0);
    assert_eq!(BatteryVoltage::from_centivolts(100).percentage(), 0);

    let half = BatteryVoltage::from_centivolts(730).percentage();
    assert!(half >= 45 && half <= 55, "{half}");
}

#[test]
fn unprimed_supervisor_reports_normal() {
    let sup = BatterySupervisor::new();
    assert_eq!(sup.status(), BatteryStatus::Normal);
    assert!(sup.tx_allowed());
}

#[test]
fn classification_thresholds() {
    let mut sup = BatterySupervisor::new();

    assert_eq!(sup.update(BatteryVoltage::from_centivolts(780)), BatteryStatus::Normal);

    let mut sup = BatterySupervisor::new();
    assert_eq!(sup.update(BatteryVoltage::from_centivolts(650)), BatteryStatus::Low);
    assert!(sup.tx_allowed());

    let mut sup = BatterySupervisor::new();
    assert_eq!(sup.update(BatteryVoltage::from_centivolts(600)), BatteryStatus::Critical);
    assert!(!sup.tx_allowed());

    let mut sup = BatterySupervisor::new();
    assert_eq!(sup.update(BatteryVoltage::from_centivolts(900)), BatteryStatus::Overvoltage);
    assert!(!sup.tx_allowed());
}

#[test]
fn smoothing_resists_a_single_sag() {
    // A momentary TX sag should not flip a healthy battery to critical
    let mut sup = BatterySupervisor::new();
    sup.update(BatteryVoltage::from_centivolts(800));
    let status = sup.update(BatteryVoltage::from_centivolts(600));
    assert_ne!(status, BatteryStatus::Critical);
}

#[test]
fn sustained_low_voltage_converges() {
    let mut sup = BatterySupervisor::new();
    sup.update(BatteryVoltage::from_centivolts(800));
    for _ in 0..32 {
        sup.update(BatteryVoltage::from_centivolts(600));
    }
    assert_eq!(sup.status(), BatteryStatus::Critical);
}
