//! Low Power UART (LPUART)
//!
//! Driver for the three LPUART instances. The instance's PCC slot must have
//! a functional clock selected and gated on before the peripheral is
//! enabled, and the frequency of that clock is what the baud rate divisors
//! are derived from.
//!
//! ## Usage
//!
//! ```no_run
//! use fugit::RateExtU32;
//! use s32k144_hal::{pac, uart::{self, UartPeripheral}};
//!
//! let p = pac::Peripherals::take().unwrap();
//! // Clock init (PCC source select + gate) omitted for brevity.
//! let uart = UartPeripheral::new(p.LPUART1)
//!     .enable(uart::common_configs::_115200_8_N_1, 48.MHz())
//!     .unwrap();
//!
//! uart.write_full_blocking(b"Hello World!\r\n");
//! ```

use core::cell::Cell;
use core::convert::Infallible;
use core::fmt;
use core::ops::Deref;

use critical_section::Mutex;
use fugit::HertzU32;
use nb::Error::{Other, WouldBlock};

use crate::pac::lpuart::{
    RegisterBlock, BAUD_M10, BAUD_OSR_MASK, BAUD_OSR_SHIFT, BAUD_SBNS, BAUD_SBR_MASK, CTRL_FEIE,
    CTRL_M, CTRL_M7, CTRL_NEIE, CTRL_ORIE, CTRL_PE, CTRL_PEIE, CTRL_PT, CTRL_RE, CTRL_RIE,
    CTRL_TCIE, CTRL_TE, CTRL_TIE, CTRL_TXINV, GLOBAL_RST, STAT_FE, STAT_MSBF, STAT_NF, STAT_OR,
    STAT_PF, STAT_RDRF, STAT_RXINV, STAT_TC, STAT_TDRE,
};
use crate::pac;
use crate::Sealed;

/// Error type for UART configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bad argument: baud rate of zero, above clock/4, or not representable
    /// with the 13-bit divisor.
    BadArgument,
}

/// When there's a read error.
pub struct ReadError<'err> {
    /// The type of error
    pub err_type: ReadErrorType,

    /// Reference to the data that was read but eventually discarded because of the error.
    pub discarded: &'err [u8],
}

/// Possible types of read errors, from the receiver flags in STAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadErrorType {
    /// A received character was lost because the data register was still full.
    Overrun,

    /// Noise was detected on the receive line.
    Noise,

    /// The received character didn't have a valid stop bit.
    Framing,

    /// Parity mismatch between what was received and our settings.
    Parity,
}

impl embedded_hal_nb::serial::Error for ReadErrorType {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        match self {
            ReadErrorType::Overrun => embedded_hal_nb::serial::ErrorKind::Overrun,
            ReadErrorType::Noise => embedded_hal_nb::serial::ErrorKind::Noise,
            ReadErrorType::Framing => embedded_hal_nb::serial::ErrorKind::FrameFormat,
            ReadErrorType::Parity => embedded_hal_nb::serial::ErrorKind::Parity,
        }
    }
}

impl embedded_io::Error for ReadErrorType {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::InvalidData
    }
}

/// State of the UART peripheral.
pub trait State: Sealed {}

/// UART is enabled.
pub struct Enabled;

/// UART is disabled.
pub struct Disabled;

impl State for Enabled {}
impl Sealed for Enabled {}
impl State for Disabled {}
impl Sealed for Disabled {}

/// Identifier for one of the three LPUART instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    /// LPUART0
    Lpuart0,
    /// LPUART1
    Lpuart1,
    /// LPUART2
    Lpuart2,
}

/// Trait to handle the underlying devices (LPUART0, LPUART1, LPUART2)
pub trait UartDevice: Deref<Target = RegisterBlock> + Sealed {
    /// Which instance this is.
    const ID: UartId;
}

impl UartDevice for pac::LPUART0 {
    const ID: UartId = UartId::Lpuart0;
}
impl UartDevice for pac::LPUART1 {
    const ID: UartId = UartId::Lpuart1;
}
impl UartDevice for pac::LPUART2 {
    const ID: UartId = UartId::Lpuart2;
}

/// Data bits per frame (excluding parity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    /// 7 bits
    Seven,
    /// 8 bits
    Eight,
    /// 9 bits
    Nine,
    /// 10 bits
    Ten,
}

/// Stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    /// 1 bit
    One,
    /// 2 bits
    Two,
}

/// Parity
/// The "none" state of parity is represented with the Option type (None).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// Which end of a frame goes on the wire first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Least significant bit first (the usual choice)
    LsbFirst,
    /// Most significant bit first
    MsbFirst,
}

/// A struct holding the configuration for an UART device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Requested baud rate; the hardware gets as close as the divisors allow.
    pub baudrate: HertzU32,
    /// Data bits per frame
    pub data_bits: DataBits,
    /// Stop bits
    pub stop_bits: StopBits,
    /// Parity, `None` disables the parity bit
    pub parity: Option<Parity>,
    /// Bit order on the wire
    pub bit_order: BitOrder,
    /// Invert the TX line polarity
    pub invert_tx: bool,
    /// Invert the RX line polarity
    pub invert_rx: bool,
}

impl UartConfig {
    /// Creates a configuration with the given baud rate and 8 data bits, no
    /// parity, one stop bit, LSB first and no line inversion.
    pub const fn new(baudrate: HertzU32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: None,
            bit_order: BitOrder::LsbFirst,
            invert_tx: false,
            invert_rx: false,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new(HertzU32::from_raw(115_200))
    }
}

/// Common configurations for UART.
pub mod common_configs {
    use super::UartConfig;
    use fugit::HertzU32;

    /// 9600 baud, 8 data bits, no parity, 1 stop bit
    pub const _9600_8_N_1: UartConfig = UartConfig::new(HertzU32::from_raw(9600));

    /// 19200 baud, 8 data bits, no parity, 1 stop bit
    pub const _19200_8_N_1: UartConfig = UartConfig::new(HertzU32::from_raw(19200));

    /// 38400 baud, 8 data bits, no parity, 1 stop bit
    pub const _38400_8_N_1: UartConfig = UartConfig::new(HertzU32::from_raw(38400));

    /// 57600 baud, 8 data bits, no parity, 1 stop bit
    pub const _57600_8_N_1: UartConfig = UartConfig::new(HertzU32::from_raw(57600));

    /// 115200 baud, 8 data bits, no parity, 1 stop bit
    pub const _115200_8_N_1: UartConfig = UartConfig::new(HertzU32::from_raw(115_200));
}

/// An UART peripheral based on an underlying UART device.
pub struct UartPeripheral<S: State, D: UartDevice> {
    device: D,
    config: UartConfig,
    effective_baudrate: HertzU32,
    _state: S,
}

impl<S: State, D: UartDevice> UartPeripheral<S, D> {
    fn transition<To: State>(self, state: To) -> UartPeripheral<To, D> {
        UartPeripheral {
            device: self.device,
            config: self.config,
            effective_baudrate: self.effective_baudrate,
            _state: state,
        }
    }

    /// Releases the underlying device.
    pub fn free(self) -> D {
        self.device
    }
}

impl<D: UartDevice> UartPeripheral<Disabled, D> {
    /// Wraps the UART device, leaving it disabled.
    pub fn new(device: D) -> UartPeripheral<Disabled, D> {
        UartPeripheral {
            device,
            config: UartConfig::default(),
            effective_baudrate: HertzU32::from_raw(0),
            _state: Disabled,
        }
    }

    /// Pulses the software reset, returning every register to its reset
    /// value.
    pub fn reset(&mut self) {
        self.device.global.set(self.device.global.get() | GLOBAL_RST);
        self.device.global.set(self.device.global.get() & !GLOBAL_RST);
    }

    /// Enables the UART with the given configuration.
    ///
    /// `frequency` is the rate of the functional clock selected for this
    /// instance in the PCC.
    pub fn enable(
        self,
        config: UartConfig,
        frequency: HertzU32,
    ) -> Result<UartPeripheral<Enabled, D>, Error> {
        let device = self.device;

        // Transmitter and receiver must be off while the frame format and
        // divisors change.
        device.ctrl.set(device.ctrl.get() & !(CTRL_TE | CTRL_RE));

        set_format(&device, &config);
        let effective_baudrate = configure_baudrate(&device, config.baudrate, frequency)?;

        device.ctrl.set(device.ctrl.get() | CTRL_TE | CTRL_RE);

        Ok(UartPeripheral {
            device,
            config,
            effective_baudrate,
            _state: Enabled,
        })
    }
}

impl<D: UartDevice> UartPeripheral<Enabled, D> {
    /// Disable this UART peripheral, falling back to the Disabled state.
    pub fn disable(self) -> UartPeripheral<Disabled, D> {
        self.device.ctrl.set(self.device.ctrl.get() & !(CTRL_TE | CTRL_RE));
        self.transition(Disabled)
    }

    /// The baud rate the divisor search actually achieved.
    pub fn effective_baudrate(&self) -> HertzU32 {
        self.effective_baudrate
    }

    /// The configuration this peripheral was enabled with.
    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    fn uart_is_writable(&self) -> bool {
        self.device.stat.get() & STAT_TDRE != 0
    }

    fn uart_is_readable(&self) -> bool {
        self.device.stat.get() & STAT_RDRF != 0
    }

    pub(crate) fn transmit_flushed(&self) -> nb::Result<(), Infallible> {
        if self.device.stat.get() & STAT_TC != 0 {
            Ok(())
        } else {
            Err(WouldBlock)
        }
    }

    /// Writes bytes to the UART.
    /// This function writes as long as it can. As soon as the data register
    /// is occupied, if:
    /// - 0 bytes were written, a WouldBlock Error is returned
    /// - some bytes were written, it is deemed to be a success
    /// Upon success, the remaining slice is returned.
    pub fn write_raw<'d>(&self, data: &'d [u8]) -> nb::Result<&'d [u8], Infallible> {
        let mut bytes_written = 0;

        for c in data {
            if !self.uart_is_writable() {
                if bytes_written == 0 {
                    return Err(WouldBlock);
                } else {
                    return Ok(&data[bytes_written..]);
                }
            }

            self.device.data.set(u32::from(*c));
            bytes_written += 1;
        }
        Ok(&data[bytes_written..])
    }

    /// Reads bytes from the UART.
    /// This function reads as long as it can. As soon as the data register
    /// runs empty, if:
    /// - 0 bytes were read, a WouldBlock Error is returned
    /// - some bytes were read, it is deemed to be a success
    /// Upon success, it will return how many bytes were read.
    pub fn read_raw<'b>(&self, buffer: &'b mut [u8]) -> nb::Result<usize, ReadError<'b>> {
        let mut bytes_read = 0;

        Ok(loop {
            if !self.uart_is_readable() {
                if bytes_read == 0 {
                    return Err(WouldBlock);
                } else {
                    break bytes_read;
                }
            }

            if bytes_read < buffer.len() {
                let stat = self.device.stat.get();
                let mut error: Option<ReadErrorType> = None;

                if stat & STAT_OR != 0 {
                    error = Some(ReadErrorType::Overrun);
                }

                if stat & STAT_NF != 0 {
                    error = Some(ReadErrorType::Noise);
                }

                if stat & STAT_FE != 0 {
                    error = Some(ReadErrorType::Framing);
                }

                if stat & STAT_PF != 0 {
                    error = Some(ReadErrorType::Parity);
                }

                if let Some(err_type) = error {
                    // Receiver flags are write-1-to-clear.
                    self.device
                        .stat
                        .set(stat & (STAT_OR | STAT_NF | STAT_FE | STAT_PF));

                    return Err(Other(ReadError {
                        err_type,
                        discarded: buffer,
                    }));
                }

                buffer[bytes_read] = self.device.data.get() as u8;
                bytes_read += 1;
            } else {
                break bytes_read;
            }
        })
    }

    /// Writes bytes to the UART.
    /// This function blocks until the full buffer has been sent, waiting for
    /// each frame to leave the shift register.
    pub fn write_full_blocking(&self, data: &[u8]) {
        for c in data {
            self.blocking_write_word(u32::from(*c));
        }
    }

    /// Writes 9 or 10 bit frames to the UART.
    ///
    /// Only the low 9 (or 10) bits of each word end up on the wire; only
    /// meaningful when the peripheral was enabled with [`DataBits::Nine`] or
    /// [`DataBits::Ten`].
    pub fn write_wide_blocking(&self, data: &[u16]) {
        for w in data {
            self.blocking_write_word(u32::from(*w));
        }
    }

    fn blocking_write_word(&self, word: u32) {
        while !self.uart_is_writable() {
            cortex_m::asm::nop();
        }
        self.device.data.set(word);
        while self.device.stat.get() & STAT_TC == 0 {
            cortex_m::asm::nop();
        }
    }

    /// Reads bytes from the UART.
    /// This function blocks until the full buffer has been received.
    pub fn read_full_blocking(&self, buffer: &mut [u8]) -> Result<(), ReadErrorType> {
        let mut offset = 0;

        while offset != buffer.len() {
            offset += match self.read_raw(&mut buffer[offset..]) {
                Ok(bytes_read) => bytes_read,
                Err(e) => match e {
                    Other(inner) => return Err(inner.err_type),
                    WouldBlock => continue,
                },
            }
        }

        Ok(())
    }

    /// Enables the receive interrupt.
    ///
    /// The instance's IRQ will fire when a received frame reaches the data
    /// register.
    pub fn enable_rx_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() | CTRL_RIE);
    }

    /// Disables the receive interrupt.
    pub fn disable_rx_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() & !CTRL_RIE);
    }

    /// Enables the transmit interrupt.
    ///
    /// The instance's IRQ will fire whenever the data register is free.
    pub fn enable_tx_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() | CTRL_TIE);
    }

    /// Disables the transmit interrupt.
    pub fn disable_tx_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() & !CTRL_TIE);
    }

    /// Enables the transmission-complete interrupt (frame fully shifted
    /// out).
    pub fn enable_tx_complete_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() | CTRL_TCIE);
    }

    /// Disables the transmission-complete interrupt.
    pub fn disable_tx_complete_interrupt(&mut self) {
        self.device.ctrl.set(self.device.ctrl.get() & !CTRL_TCIE);
    }

    /// Enables the interrupt for one class of receive error.
    pub fn enable_error_interrupt(&mut self, error: ReadErrorType) {
        self.device
            .ctrl
            .set(self.device.ctrl.get() | error_interrupt_mask(error));
    }

    /// Disables the interrupt for one class of receive error.
    pub fn disable_error_interrupt(&mut self, error: ReadErrorType) {
        self.device
            .ctrl
            .set(self.device.ctrl.get() & !error_interrupt_mask(error));
    }
}

fn error_interrupt_mask(error: ReadErrorType) -> u32 {
    match error {
        ReadErrorType::Overrun => CTRL_ORIE,
        ReadErrorType::Noise => CTRL_NEIE,
        ReadErrorType::Framing => CTRL_FEIE,
        ReadErrorType::Parity => CTRL_PEIE,
    }
}

/// Frame format configuration: length, parity, polarity, stop bits, order.
fn set_format(rb: &RegisterBlock, config: &UartConfig) {
    let mut ctrl = rb.ctrl.get();
    let mut baud = rb.baud.get();

    ctrl &= !(CTRL_M7 | CTRL_M);
    baud &= !BAUD_M10;
    match config.data_bits {
        DataBits::Seven => ctrl |= CTRL_M7,
        DataBits::Eight => {}
        DataBits::Nine => ctrl |= CTRL_M,
        DataBits::Ten => baud |= BAUD_M10,
    }

    match config.parity {
        Some(Parity::Even) => {
            ctrl |= CTRL_PE;
            ctrl &= !CTRL_PT;
        }
        Some(Parity::Odd) => ctrl |= CTRL_PE | CTRL_PT,
        None => ctrl &= !(CTRL_PE | CTRL_PT),
    }

    if config.invert_tx {
        ctrl |= CTRL_TXINV;
    } else {
        ctrl &= !CTRL_TXINV;
    }

    match config.stop_bits {
        StopBits::One => baud &= !BAUD_SBNS,
        StopBits::Two => baud |= BAUD_SBNS,
    }

    rb.ctrl.set(ctrl);
    rb.baud.set(baud);

    // RX inversion and bit order live in STAT, next to the (write-1-to-
    // clear) receiver flags; rewriting the read value also acknowledges any
    // stale flags, which is what we want during (re)configuration.
    let mut stat = rb.stat.get() & !(STAT_RXINV | STAT_MSBF);
    if config.invert_rx {
        stat |= STAT_RXINV;
    }
    if let BitOrder::MsbFirst = config.bit_order {
        stat |= STAT_MSBF;
    }
    rb.stat.set(stat);
}

/// The LPUART derives its baud rate from a 13-bit modulo divisor (SBR) and
/// an oversampling ratio (OSR) of 4x to 32x. From the wanted baud rate we
/// brute-force the OSR range, picking the pair with the smallest deviation.
/// The returned OSR is the raw field value (ratio - 1).
fn calculate_baud_dividers(
    wanted_baudrate: HertzU32,
    frequency: HertzU32,
) -> Result<(u32, u32), Error> {
    let clock = frequency.to_Hz();
    let baudrate = wanted_baudrate.to_Hz();

    if baudrate == 0 || baudrate > clock / 4 {
        return Err(Error::BadArgument);
    }

    let mut best: Option<(u32, u32, u32)> = None;

    for osr in (3..=31u32).rev() {
        let ratio = osr + 1;
        let sbr = clock / (ratio * baudrate);
        if sbr == 0 || sbr > BAUD_SBR_MASK {
            continue;
        }

        let actual = clock / (ratio * sbr);
        let deviation = actual.abs_diff(baudrate);

        if best.map_or(true, |(least, _, _)| deviation < least) {
            best = Some((deviation, osr, sbr));
            if deviation == 0 {
                break;
            }
        }
    }

    best.map(|(_, osr, sbr)| (osr, sbr)).ok_or(Error::BadArgument)
}

/// Baud rate configuration, preserving the non-divisor bits of BAUD.
fn configure_baudrate(
    rb: &RegisterBlock,
    wanted_baudrate: HertzU32,
    frequency: HertzU32,
) -> Result<HertzU32, Error> {
    let (osr, sbr) = calculate_baud_dividers(wanted_baudrate, frequency)?;

    rb.baud.set(
        (rb.baud.get() & !(BAUD_OSR_MASK | BAUD_SBR_MASK)) | (osr << BAUD_OSR_SHIFT) | sbr,
    );

    Ok(HertzU32::from_raw(frequency.to_Hz() / ((osr + 1) * sbr)))
}

impl<D: UartDevice> embedded_hal_nb::serial::ErrorType for UartPeripheral<Enabled, D> {
    type Error = ReadErrorType;
}

impl<D: UartDevice> embedded_hal_nb::serial::Read<u8> for UartPeripheral<Enabled, D> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let byte: &mut [u8] = &mut [0; 1];

        match self.read_raw(byte) {
            Ok(_) => Ok(byte[0]),
            Err(e) => match e {
                Other(inner) => Err(Other(inner.err_type)),
                WouldBlock => Err(WouldBlock),
            },
        }
    }
}

impl<D: UartDevice> embedded_hal_nb::serial::Write<u8> for UartPeripheral<Enabled, D> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.write_raw(&[word]).is_err() {
            Err(WouldBlock)
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.transmit_flushed().map_err(|e| match e {
            WouldBlock => WouldBlock,
            Other(v) => match v {},
        })
    }
}

impl<D: UartDevice> embedded_io::ErrorType for UartPeripheral<Enabled, D> {
    type Error = ReadErrorType;
}

impl<D: UartDevice> embedded_io::Write for UartPeripheral<Enabled, D> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.write_raw(buf) {
                Ok(remaining) => return Ok(buf.len() - remaining.len()),
                Err(WouldBlock) => continue,
                Err(Other(v)) => match v {},
            }
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        loop {
            match self.transmit_flushed() {
                Ok(()) => return Ok(()),
                Err(WouldBlock) => continue,
                Err(Other(v)) => match v {},
            }
        }
    }
}

impl<D: UartDevice> embedded_io::Read for UartPeripheral<Enabled, D> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.read_raw(buf) {
                Ok(bytes_read) => return Ok(bytes_read),
                Err(WouldBlock) => continue,
                Err(Other(inner)) => return Err(inner.err_type),
            }
        }
    }
}

impl<D: UartDevice> fmt::Write for UartPeripheral<Enabled, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_full_blocking(s.as_bytes());
        Ok(())
    }
}

/// An interrupt callback for one LPUART instance. Runs in interrupt
/// context.
pub type InterruptHandler = fn();

static UART_HANDLERS: [Mutex<Cell<Option<InterruptHandler>>>; 3] = [
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
    Mutex::new(Cell::new(None)),
];

/// Registers `handler` as the interrupt callback for `uart`, replacing any
/// previous one.
pub fn register_handler(uart: UartId, handler: InterruptHandler) {
    critical_section::with(|cs| UART_HANDLERS[uart as usize].borrow(cs).set(Some(handler)));
}

/// Removes the interrupt callback for `uart`.
pub fn unregister_handler(uart: UartId) {
    critical_section::with(|cs| UART_HANDLERS[uart as usize].borrow(cs).set(None));
}

fn dispatch(uart: UartId) {
    let handler = critical_section::with(|cs| UART_HANDLERS[uart as usize].borrow(cs).get());
    if let Some(handler) = handler {
        handler();
    }
}

macro_rules! uart_irq_handlers {
    ($($LPUART:ident: $id:ident,)+) => {
        $(
            paste::paste! {
                #[doc = "IRQ entry point for the " $LPUART " transmit/receive interrupt."]
                #[no_mangle]
                pub extern "C" fn [<$LPUART _RxTx_IRQHandler>]() {
                    dispatch(UartId::$id);
                }
            }
        )+
    };
}

uart_irq_handlers! {
    LPUART0: Lpuart0,
    LPUART1: Lpuart1,
    LPUART2: Lpuart2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_search_finds_exact_match() {
        // 48 MHz / (25 * 200) is exactly 9600; OSR field holds ratio - 1.
        let (osr, sbr) =
            calculate_baud_dividers(HertzU32::from_raw(9600), HertzU32::from_raw(48_000_000))
                .unwrap();
        assert_eq!((osr, sbr), (24, 200));
        assert_eq!(48_000_000 / ((osr + 1) * sbr), 9600);
    }

    #[test]
    fn divider_search_picks_nearest() {
        // 115200 doesn't divide 48 MHz; the best any OSR manages is 115384.
        let (osr, sbr) =
            calculate_baud_dividers(HertzU32::from_raw(115_200), HertzU32::from_raw(48_000_000))
                .unwrap();
        assert_eq!((osr, sbr), (31, 13));
        assert_eq!(48_000_000 / ((osr + 1) * sbr), 115_384);
    }

    #[test]
    fn divider_search_rejects_out_of_range_baudrates() {
        let clock = HertzU32::from_raw(48_000_000);
        assert_eq!(
            calculate_baud_dividers(HertzU32::from_raw(0), clock),
            Err(Error::BadArgument)
        );
        // Anything above clock / 4 can't be generated at the minimum
        // oversampling ratio.
        assert_eq!(
            calculate_baud_dividers(HertzU32::from_raw(13_000_000), clock),
            Err(Error::BadArgument)
        );
        // 100 baud would need a divisor beyond the 13-bit SBR field at
        // every oversampling ratio.
        assert_eq!(
            calculate_baud_dividers(HertzU32::from_raw(100), clock),
            Err(Error::BadArgument)
        );
    }

    #[test]
    fn default_config_is_115200_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate.to_Hz(), 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.parity, None);
        assert_eq!(config.bit_order, BitOrder::LsbFirst);
    }
}
