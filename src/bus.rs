//! Transport glue: SPI transfers, the chip-select line and the DRDY input.

use crate::error::Ads1256Error;

use embedded_hal::{
    digital::{InputPin, OutputPin, PinState},
    spi::{Mode, SpiDevice, MODE_1},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Electrical level at which a line is considered asserted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    Low,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Select {
    Asserted,
    Deasserted,
}

/// SPI settings the host applies to its HAL before handing the bus over.
///
/// The ADS1256 samples DIN on the falling SCLK edge (mode 1), shifts MSB
/// first and frames every transaction with an active-low CS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    pub clock_hz: u32,
    pub mode: Mode,
    pub bit_order: BitOrder,
    pub word_bits: u8,
    pub cs_active: ActiveLevel,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            clock_hz: 2_000_000,
            mode: MODE_1,
            bit_order: BitOrder::MsbFirst,
            word_bits: 8,
            cs_active: ActiveLevel::Low,
        }
    }
}

impl BusConfig {
    /// Whether the chip can talk over a bus set up this way.
    pub fn is_supported(&self) -> bool {
        self.mode == MODE_1 && self.bit_order == BitOrder::MsbFirst && self.word_bits == 8
    }
}

pub(crate) struct Bus<SPI, CS, DRDY> {
    spi: SPI,
    cs: CS,
    drdy: DRDY,
    cs_active: ActiveLevel,
}

impl<SPI, CS, DRDY, SpiError, GpioError> Bus<SPI, CS, DRDY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DRDY: InputPin<Error = GpioError>,
{
    pub(crate) fn new(spi: SPI, cs: CS, drdy: DRDY, config: &BusConfig) -> Self {
        if !config.is_supported() {
            log::warn!("Bus settings not supported by the ADS1256: {:?}", config);
        }
        Bus {
            spi,
            cs,
            drdy,
            cs_active: config.cs_active,
        }
    }

    pub(crate) fn release(self) -> (SPI, CS, DRDY) {
        (self.spi, self.cs, self.drdy)
    }

    /// Moves bytes over SPI. Either side may be absent for a write-only or
    /// read-only exchange. Returns the number of bytes clocked.
    pub(crate) fn transfer(
        &mut self,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
    ) -> Result<usize, Ads1256Error<SpiError, GpioError>> {
        let len = match (tx, rx) {
            (Some(tx), Some(rx)) => {
                let len = tx.len().max(rx.len());
                self.spi.transfer(rx, tx).map_err(Ads1256Error::Spi)?;
                len
            }
            (Some(tx), None) => {
                self.spi.write(tx).map_err(Ads1256Error::Spi)?;
                tx.len()
            }
            (None, Some(rx)) => {
                let len = rx.len();
                self.spi.read(rx).map_err(Ads1256Error::Spi)?;
                len
            }
            (None, None) => 0,
        };
        Ok(len)
    }

    pub(crate) fn select(&mut self, select: Select) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        let asserted = match self.cs_active {
            ActiveLevel::Low => PinState::Low,
            ActiveLevel::High => PinState::High,
        };
        let state = match select {
            Select::Asserted => asserted,
            Select::Deasserted => !asserted,
        };
        self.cs.set_state(state).map_err(Ads1256Error::Gpio)
    }

    /// `Ok(true)` when DRDY is low, i.e. a conversion result is waiting.
    pub(crate) fn ready_line(&mut self) -> Result<bool, GpioError> {
        self.drdy.is_low()
    }
}
