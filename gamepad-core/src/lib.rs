//! Platform-agnostic gamepad types, input trait and generic HID input.
//!
//! This crate provides the canonical gamepad state that every input source
//! produces, and the generic HID path that turns an arbitrary USB joystick
//! into that state. It has no platform-specific dependencies and runs both
//! in embedded `no_std` environments and on the host for testing.
//!
//! # Overview
//!
//! - [`types`]: Core data structures ([`GamepadState`], [`Buttons`], [`AnalogStick`])
//! - [`input`]: Input source trait ([`InputSource`])
//! - [`hid`]: Generic HID joystick input ([`HidInputSource`], [`joystick_to_gamepad`])
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::{joystick_to_gamepad, Buttons, DEFAULT_HID_MAPPING};
//! use hid_report::{Joystick, ReportDescriptor};
//!
//! let descriptor = ReportDescriptor::parse(&[
//!     0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, // Gamepad
//!     0x05, 0x09, 0x19, 0x01, 0x29, 0x08, // Buttons 1-8
//!     0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08, 0x81, 0x02, //
//!     0xC0,
//! ])
//! .unwrap();
//!
//! let joystick = Joystick::joysticks_only(&descriptor).unwrap();
//! let decoded = joystick.decode(&[0b0000_0010]).unwrap();
//! let state = joystick_to_gamepad(&decoded, &DEFAULT_HID_MAPPING);
//! assert!(state.buttons.contains(Buttons::A));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`log`**: Log through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod hid;
pub mod input;
pub mod types;

// Re-export main types at crate root
pub use hid::{
    hat_to_dpad, joystick_to_gamepad, ButtonTarget, HidInputSource, HidMapping, ReportReader,
    DEFAULT_HID_MAPPING, MAPPED_BUTTONS, MAX_REPORT_SIZE,
};
pub use input::{InputError, InputSource};
pub use types::{axis_to_trigger, invert_axis, AnalogStick, Buttons, GamepadState};
