//! HAL for the NXP S32K144 microcontroller
//!
//! This is an implementation of the [`embedded-hal`] traits for the S32K144, an
//! Arm Cortex-M4F based automotive microcontroller. Peripheral register blocks
//! are defined in the [`pac`] module; each driver module wraps one peripheral
//! family:
//!
//! - [`gpio`] - pin direction and level (PDDR/PDOR and friends)
//! - [`port`] - pin multiplexing, pull resistors and pin interrupts
//! - [`pcc`] - peripheral clock gating and the SCG system clock sources
//! - [`uart`] - the LPUART serial modules
//! - [`ring_buffer`] - a fixed-capacity byte FIFO for interrupt-driven IO
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//!
//! # Usage
//!
//! ```no_run
//! use s32k144_hal::{gpio::Gpio, pac, pcc::{ClockName, Pcc}};
//!
//! let p = pac::Peripherals::take().unwrap();
//! let mut pcc = Pcc::new(p.PCC);
//! pcc.enable_clock(ClockName::PortD).unwrap();
//!
//! let gpio = Gpio::new(p.PTD);
//! let mut led = gpio.output_pin(15).unwrap();
//! led.set_high();
//! ```

#![warn(missing_docs)]
#![no_std]

pub mod gpio;
pub mod pac;
pub mod pcc;
pub mod port;
pub mod ring_buffer;
pub mod uart;

mod sealed {
    pub trait Sealed {}
}
pub(crate) use sealed::Sealed;
