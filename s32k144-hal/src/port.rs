//! Pin multiplexing and pin interrupts (PORT)
//!
//! Every pin's mux selection, pull resistor and interrupt mode live in its
//! Pin Control Register (PCR). The matching GPIO driver only works on pins
//! muxed to [`Mux::Gpio`].
//!
//! Pin interrupts fire one IRQ per port. An application callback is
//! registered per port through [`register_handler`]; the exported
//! `PORTx_IRQHandler` entry points dispatch through that registry and do
//! nothing when no handler is registered.
//!
//! ```no_run
//! use s32k144_hal::{pac, port::{Mux, PinConfig, Port, Pull}};
//!
//! let p = pac::Peripherals::take().unwrap();
//! let mut port = Port::new(p.PORTC);
//! port.configure(12, &PinConfig {
//!     mux: Mux::Gpio,
//!     pull: Some(Pull::Up),
//!     interrupt: s32k144_hal::port::InterruptMode::Disabled,
//! }).unwrap();
//! ```

use crate::gpio::PortId;
use crate::pac::{self, port::RegisterBlock, port::*};
use crate::Sealed;
use core::cell::Cell;
use core::ops::Deref;
use critical_section::Mutex;

/// Highest valid pin index in a PCR array.
const MAX_PINS: u8 = 32;

/// Error type for PORT operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The pin number does not exist on this port.
    InvalidPin,
}

/// Pin function selected by the mux field of the PCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mux {
    /// Pin disabled (analog)
    Disabled = 0,
    /// GPIO
    Gpio = 1,
    /// Chip-specific alternative 2
    Alt2 = 2,
    /// Chip-specific alternative 3
    Alt3 = 3,
    /// Chip-specific alternative 4
    Alt4 = 4,
    /// Chip-specific alternative 5
    Alt5 = 5,
    /// Chip-specific alternative 6
    Alt6 = 6,
    /// Chip-specific alternative 7
    Alt7 = 7,
}

/// Internal pull resistor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Pull-down resistor
    Down,
    /// Pull-up resistor
    Up,
}

/// Interrupt/DMA request mode of a pin (IRQC field encodings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// Interrupt status flag disabled
    Disabled = 0x0,
    /// DMA request on rising edge
    DmaRisingEdge = 0x1,
    /// DMA request on falling edge
    DmaFallingEdge = 0x2,
    /// DMA request on either edge
    DmaEitherEdge = 0x3,
    /// Interrupt when logic 0
    LogicZero = 0x8,
    /// Interrupt on rising edge
    RisingEdge = 0x9,
    /// Interrupt on falling edge
    FallingEdge = 0xA,
    /// Interrupt on either edge
    EitherEdge = 0xB,
    /// Interrupt when logic 1
    LogicOne = 0xC,
}

/// Complete PCR configuration for one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Pin function
    pub mux: Mux,
    /// Pull resistor, `None` leaves the pull disabled
    pub pull: Option<Pull>,
    /// Interrupt mode
    pub interrupt: InterruptMode,
}

impl PinConfig {
    /// Plain GPIO, no pull, no interrupt.
    pub const fn gpio() -> Self {
        Self {
            mux: Mux::Gpio,
            pull: None,
            interrupt: InterruptMode::Disabled,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::gpio()
    }
}

/// Trait for the PORT instances PORTA..PORTE.
pub trait PortDevice: Deref<Target = RegisterBlock> + Sealed {
    /// Which port this instance is.
    const ID: PortId;
}

macro_rules! port_devices {
    ($($PORT:ident: $id:ident,)+) => {
        $(
            impl PortDevice for pac::$PORT {
                const ID: PortId = PortId::$id;
            }
        )+
    };
}

port_devices! {
    PORTA: A,
    PORTB: B,
    PORTC: C,
    PORTD: D,
    PORTE: E,
}

/// Driver over one PORT controller.
pub struct Port<D: PortDevice> {
    device: D,
}

impl<D: PortDevice> Port<D> {
    /// Wraps the port instance.
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Releases the underlying instance.
    pub fn free(self) -> D {
        self.device
    }

    fn pcr(&self, pin: u8) -> Result<&vcell::VolatileCell<u32>, Error> {
        if pin < MAX_PINS {
            Ok(&self.device.pcr[usize::from(pin)])
        } else {
            Err(Error::InvalidPin)
        }
    }

    /// Applies a complete pin configuration: mux, pull and interrupt mode.
    ///
    /// Each field is cleared before the new value is set, so a previous
    /// configuration never bleeds through.
    pub fn configure(&mut self, pin: u8, config: &PinConfig) -> Result<(), Error> {
        let pcr = self.pcr(pin)?;

        let mut value = pcr.get() & !(PCR_MUX_MASK | PCR_IRQC_MASK | PCR_PE | PCR_PS);
        value |= (config.mux as u32) << PCR_MUX_SHIFT;
        match config.pull {
            Some(Pull::Up) => value |= PCR_PE | PCR_PS,
            Some(Pull::Down) => value |= PCR_PE,
            None => {}
        }
        value |= (config.interrupt as u32) << PCR_IRQC_SHIFT;
        pcr.set(value);
        Ok(())
    }

    /// Arms the pin interrupt in the given mode.
    ///
    /// Any pending interrupt status flag is cleared first so a stale event
    /// cannot fire the freshly armed interrupt.
    pub fn enable_interrupt(&mut self, pin: u8, mode: InterruptMode) -> Result<(), Error> {
        let pcr = self.pcr(pin)?;
        pcr.set(pcr.get() | PCR_ISF); // write-1-to-clear
        pcr.set((pcr.get() & !PCR_IRQC_MASK) | ((mode as u32) << PCR_IRQC_SHIFT));
        Ok(())
    }

    /// Disarms the pin interrupt.
    pub fn disable_interrupt(&mut self, pin: u8) -> Result<(), Error> {
        let pcr = self.pcr(pin)?;
        pcr.set(pcr.get() & !PCR_IRQC_MASK);
        Ok(())
    }

    /// Pending interrupt status flags for the whole port, one bit per pin.
    pub fn interrupt_status(&self) -> u32 {
        self.device.isfr.get()
    }

    /// Acknowledges the pending interrupt of one pin.
    pub fn clear_interrupt(&mut self, pin: u8) -> Result<(), Error> {
        if pin >= MAX_PINS {
            return Err(Error::InvalidPin);
        }
        self.device.isfr.set(1 << pin);
        Ok(())
    }
}

/// A pin interrupt callback. Runs in interrupt context.
pub type InterruptHandler = fn();

static PORT_HANDLERS: [Mutex<Cell<Option<InterruptHandler>>>; 5] = [
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
];

/// Registers `handler` as the pin interrupt callback for `port`,
/// replacing any previous one.
pub fn register_handler(port: PortId, handler: InterruptHandler) {
    critical_section::with(|cs| PORT_HANDLERS[port as usize].borrow(cs).set(Some(handler)));
}

/// Removes the pin interrupt callback for `port`.
pub fn unregister_handler(port: PortId) {
    critical_section::with(|cs| PORT_HANDLERS[port as usize].borrow(cs).set(None));
}

fn dispatch(port: PortId) {
    let handler = critical_section::with(|cs| PORT_HANDLERS[port as usize].borrow(cs).get());
    if let Some(handler) = handler {
        handler();
    }
}

macro_rules! port_irq_handlers {
    ($($PORT:ident: $id:ident,)+) => {
        $(
            paste::paste! {
                #[doc = "IRQ entry point for " $PORT " pin interrupts."]
                #[no_mangle]
                pub extern "C" fn [<$PORT _IRQHandler>]() {
                    dispatch(PortId::$id);
                }
            }
        )+
    };
}

port_irq_handlers! {
    PORTA: A,
    PORTB: B,
    PORTC: C,
    PORTD: D,
    PORTE: E,
}
