//! General Purpose Input and Output (GPIO)
//!
//! Pin direction and level control for the five GPIO ports PTA..PTE. The
//! PORT module (see [`crate::port`]) must have muxed a pin to its GPIO
//! function and the port's clock must be gated on (see [`crate::pcc`])
//! before any of this has an effect.
//!
//! ```no_run
//! use s32k144_hal::{gpio::Gpio, pac};
//!
//! let p = pac::Peripherals::take().unwrap();
//! let gpio = Gpio::new(p.PTD);
//! let mut led = gpio.output_pin(15).unwrap();
//! led.set_high();
//! ```

use crate::pac::{self, gpio::RegisterBlock};
use crate::Sealed;
use core::convert::Infallible;
use core::ops::Deref;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

/// Error type for GPIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The pin number does not exist on this port.
    InvalidPin,
}

/// Identifier for one of the five GPIO/PORT instances.
///
/// Hardware instances are a closed set; using an enum (rather than raw
/// base addresses) makes "is this a real port" a match, not a pointer
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    /// Port A
    A,
    /// Port B
    B,
    /// Port C
    C,
    /// Port D
    D,
    /// Port E
    E,
}

impl PortId {
    /// Number of pins wired up on this port (port E has one fewer).
    pub const fn pin_count(self) -> u8 {
        match self {
            PortId::E => 17,
            _ => 18,
        }
    }

    pub(crate) fn register_block(self) -> &'static RegisterBlock {
        let ptr = match self {
            PortId::A => pac::PTA::PTR,
            PortId::B => pac::PTB::PTR,
            PortId::C => pac::PTC::PTR,
            PortId::D => pac::PTD::PTR,
            PortId::E => pac::PTE::PTR,
        };
        unsafe { &*ptr }
    }
}

/// Direction of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pin reads its input buffer
    Input,
    /// Pin drives its output buffer
    Output,
}

/// Trait for the GPIO port instances PTA..PTE.
pub trait GpioDevice: Deref<Target = RegisterBlock> + Sealed {
    /// Which port this instance is.
    const ID: PortId;
}

macro_rules! gpio_devices {
    ($($PT:ident: $id:ident,)+) => {
        $(
            impl GpioDevice for pac::$PT {
                const ID: PortId = PortId::$id;
            }
        )+
    };
}

gpio_devices! {
    PTA: A,
    PTB: B,
    PTC: C,
    PTD: D,
    PTE: E,
}

/// Driver over one GPIO port.
pub struct Gpio<D: GpioDevice> {
    device: D,
}

impl<D: GpioDevice> Gpio<D> {
    /// Wraps the port instance.
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Releases the underlying instance.
    pub fn free(self) -> D {
        self.device
    }

    fn check_pin(&self, pin: u8) -> Result<(), Error> {
        if pin < D::ID.pin_count() {
            Ok(())
        } else {
            Err(Error::InvalidPin)
        }
    }

    /// Sets the direction of a pin.
    pub fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), Error> {
        self.check_pin(pin)?;
        let pddr = self.device.pddr.get();
        match direction {
            Direction::Input => self.device.pddr.set(pddr & !(1 << pin)),
            Direction::Output => self.device.pddr.set(pddr | (1 << pin)),
        }
        Ok(())
    }

    /// Reads the input level of a pin.
    pub fn read_pin(&self, pin: u8) -> Result<bool, Error> {
        self.check_pin(pin)?;
        Ok((self.device.pdir.get() >> pin) & 1 != 0)
    }

    /// Reads the input levels of the whole port.
    pub fn read_port(&self) -> u32 {
        self.device.pdir.get()
    }

    /// Drives a pin high.
    pub fn set_pin(&mut self, pin: u8) -> Result<(), Error> {
        self.check_pin(pin)?;
        self.device.psor.set(1 << pin);
        Ok(())
    }

    /// Drives a pin low.
    pub fn clear_pin(&mut self, pin: u8) -> Result<(), Error> {
        self.check_pin(pin)?;
        self.device.pcor.set(1 << pin);
        Ok(())
    }

    /// Toggles the output level of a pin.
    pub fn toggle_pin(&mut self, pin: u8) -> Result<(), Error> {
        self.check_pin(pin)?;
        self.device.ptor.set(1 << pin);
        Ok(())
    }

    /// Configures a pin as an output and returns a handle implementing the
    /// `embedded-hal` output traits.
    ///
    /// The caller is responsible for creating at most one handle per pin;
    /// the port instance itself stays with the `Gpio` driver.
    pub fn output_pin(&self, pin: u8) -> Result<Output, Error> {
        self.check_pin(pin)?;
        let rb = D::ID.register_block();
        rb.pddr.set(rb.pddr.get() | (1 << pin));
        Ok(Output { port: D::ID, pin })
    }

    /// Configures a pin as an input and returns a handle implementing the
    /// `embedded-hal` input trait.
    ///
    /// Same single-handle-per-pin discipline as [`Gpio::output_pin`].
    pub fn input_pin(&self, pin: u8) -> Result<Input, Error> {
        self.check_pin(pin)?;
        let rb = D::ID.register_block();
        rb.pddr.set(rb.pddr.get() & !(1 << pin));
        Ok(Input { port: D::ID, pin })
    }
}

/// An output pin on one of the GPIO ports.
pub struct Output {
    port: PortId,
    pin: u8,
}

impl Output {
    /// Drives the pin high.
    #[inline]
    pub fn set_high(&mut self) {
        self.port.register_block().psor.set(1 << self.pin);
    }

    /// Drives the pin low.
    #[inline]
    pub fn set_low(&mut self) {
        self.port.register_block().pcor.set(1 << self.pin);
    }

    /// Toggles the pin.
    #[inline]
    pub fn toggle(&mut self) {
        self.port.register_block().ptor.set(1 << self.pin);
    }

    /// `true` if the output latch is currently driving high.
    #[inline]
    pub fn is_set_high(&self) -> bool {
        (self.port.register_block().pdor.get() >> self.pin) & 1 != 0
    }
}

impl ErrorType for Output {
    type Error = Infallible;
}

impl OutputPin for Output {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Output::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Output::set_high(self);
        Ok(())
    }
}

impl StatefulOutputPin for Output {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Output::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Output::is_set_high(self))
    }
}

/// An input pin on one of the GPIO ports.
pub struct Input {
    port: PortId,
    pin: u8,
}

impl Input {
    /// Reads the input buffer of the pin.
    #[inline]
    pub fn is_high(&self) -> bool {
        (self.port.register_block().pdir.get() >> self.pin) & 1 != 0
    }
}

impl ErrorType for Input {
    type Error = Infallible;
}

impl InputPin for Input {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Input::is_high(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Input::is_high(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_e_has_one_fewer_pin() {
        assert_eq!(PortId::E.pin_count(), 17);
        assert_eq!(PortId::A.pin_count(), 18);
    }
}
