//! USB HID report descriptor parser and generic joystick decoder.
//!
//! This crate turns a device-supplied report descriptor into a queryable
//! [`ReportDescriptor`] and decodes raw input reports against it into a
//! canonical [`JoystickState`]. It has no heap and no I/O, so it runs the
//! same on the host and on a microcontroller.
//!
//! # Pipeline
//!
//! ```text
//! descriptor bytes ─► items() ─► Resolver ─► ReportDescriptor
//!                                                  │
//!                     raw report ─► Joystick::decode ─► JoystickState
//! ```
//!
//! # Example
//!
//! ```
//! use hid_report::{AxisKind, Joystick, ReportDescriptor};
//!
//! let descriptor = ReportDescriptor::parse(&[
//!     0x05, 0x01, // Usage Page (Generic Desktop)
//!     0x09, 0x05, // Usage (Gamepad)
//!     0xA1, 0x01, // Collection (Application)
//!     0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x02,
//!     0x09, 0x30, 0x09, 0x31, 0x81, 0x02, // X, Y
//!     0x05, 0x09, 0x19, 0x01, 0x29, 0x08,
//!     0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08, 0x81, 0x02, // Buttons 1-8
//!     0xC0,
//! ])
//! .unwrap();
//!
//! let joystick = Joystick::joysticks_only(&descriptor).unwrap();
//! let state = joystick.decode(&[0x80, 0x40, 0x05]).unwrap();
//! assert_eq!(state.axis(AxisKind::X), 128);
//! assert!(state.button(0) && state.button(2));
//! ```
//!
//! # Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format`
//! - `log`: log through the `log` facade
//! - `std`: build against std

#![cfg_attr(not(feature = "std"), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod bits;
pub mod descriptor;
pub mod field;
pub mod item;
pub mod joystick;
pub mod usage;

pub use bits::{read_bits, sign_extend};
pub use descriptor::{
    Application, ApplicationKind, DescriptorError, FieldGroup, Report, ReportDescriptor,
    MAX_GROUPS, MAX_REPORTS, MAX_SPANS,
};
pub use field::{AxisKind, Field, FieldKind};
pub use item::{items, Item, Items, Tag};
pub use joystick::{
    DecodeError, Hat, Joystick, JoystickError, JoystickState, Support, MAX_BUTTONS,
};
pub use usage::{
    Direction, GlobalState, MainFlags, Property, Resolver, Usage, UsagePage, UsageSource,
    MAX_PENDING_USAGES,
};
