//! Handheld Transceiver Firmware Core
//!
//! This library implements the radio tuning and scan engine for a
//! dual-VFO VHF/UHF FM handheld transceiver. It owns the VFO data
//! model, frequency and channel validation, squelch/AGC/modulation
//! configuration, TX offset resolution, and the channel and CTCSS/DCS
//! scanning state machines.
//!
//! # Architecture
//!
//! The firmware is organized in layers; this crate is the application
//! core below the UI and above the RF driver:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                UI / ACTION LAYER (external)                  │
//! │  Key dispatch  │  Menu rendering  │  Display composition     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  RADIO CORE (this crate)                     │
//! │  VFO Model │ Validator │ Squelch/AGC │ Scan Engine │ TX seq  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 RF DRIVER SEAM (RfDriver trait)              │
//! │        Flattened register pushes to the transceiver IC       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Owned state, no statics**: all mutable state lives in a
//!   [`radio::orchestrator::RadioState`] value the caller owns
//! - **Total functions**: validators and configurators always return a
//!   value; failure is a state, never an unwind
//! - **Tick-driven**: every operation completes within one scheduler
//!   tick; "waiting" is state retained between ticks
//! - **Type-driven design**: invariants such as the frequency-reverse
//!   aliasing are encoded as closed enums, not pointers
//! - **No unsafe**: the core never needs it

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Radio Control Logic
///
/// The VFO data model, validators, configurators, scan state machines,
/// and the orchestrator tying them together.
pub mod radio;

/// CTCSS/DCS Code Tables
///
/// Sub-audible tone and digital code squelch tables and the combined
/// scan index space.
pub mod css;

/// RF Driver Seam
///
/// The flattened register-configuration interface this core pushes to.
pub mod rf;

/// Power Management
///
/// Battery supervision feeding the per-radio fault latches.
pub mod power;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;
