use crate::bus::{Bus, Select};
use crate::command::{encode_read, encode_write};
use crate::config::{ChannelPolicy, Config, Mux, Settings, TimeoutPolicy};
use crate::constants::{Command, DataRate, Gain, Register, ADCON_PGA_MASK, STATUS_BUFEN};
use crate::error::Ads1256Error;
use crate::ready::{Poll, ReadySync};
use crate::sample::decode;
use core::result::Result;
use core::result::Result::Ok;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// SYNC to WAKEUP (t11)
const SYNC_SETTLE_US: u32 = 5;
/// WAKEUP to RDATA, lets the modulator settle on the new input
const WAKEUP_SETTLE_US: u32 = 25;
/// Command to first DOUT bit (t6)
const T6_US: u32 = 10;
const CONFIG_SETTLE_US: u32 = 50;
const RESET_SETTLE_MS: u32 = 50;
/// Calibration registers hold 24 bits
const OFFSET_LIMIT: i32 = 1 << 23;
const FULLSCALE_MAX: u32 = 0x00FF_FFFF;

/// ADS1256 driver
pub struct Ads1256<SPI, CS, DRDY, DELAY> {
    bus: Bus<SPI, CS, DRDY>,
    delay: DELAY,
    settings: Settings,
}

impl<SPI, CS, DRDY, DELAY, SpiError, GpioError> Ads1256<SPI, CS, DRDY, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DRDY: InputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Creates a new ADS1256 driver instance
    pub fn new(spi: SPI, cs: CS, drdy: DRDY, delay: DELAY, settings: Settings) -> Self {
        Ads1256 {
            bus: Bus::new(spi, cs, drdy, &settings.bus),
            delay,
            settings,
        }
    }

    /// Gives back the bus, pins and delay
    pub fn release(self) -> (SPI, CS, DRDY, DELAY) {
        let (spi, cs, drdy) = self.bus.release();
        (spi, cs, drdy, self.delay)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resets the chip, stops continuous read mode and writes `config`.
    pub fn init(&mut self, config: &Config) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.reset()?;
        self.stop_continuous()?;
        self.configure(config)
    }

    /// Writes STATUS, MUX, ADCON and DRATE in one burst.
    pub fn configure(&mut self, config: &Config) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        log::debug!("Configuring ADS1256: {:?}", config);
        self.write_registers(Register::Status, &config.registers())?;
        self.delay.delay_us(CONFIG_SETTLE_US);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(Command::Reset)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.wait_for_drdy()?;
        Ok(())
    }

    pub fn log_registers(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        for reg in Register::ALL {
            let value = self.read_register(reg)?;
            log::debug!("Register {}: 0x{:02X}", reg.name(), value);
        }
        Ok(())
    }

    /// Runs `f` with CS asserted. CS is released even when `f` fails.
    fn framed<T, F>(&mut self, f: F) -> Result<T, Ads1256Error<SpiError, GpioError>>
    where
        F: FnOnce(
            &mut Bus<SPI, CS, DRDY>,
            &mut DELAY,
        ) -> Result<T, Ads1256Error<SpiError, GpioError>>,
    {
        self.bus.select(Select::Asserted)?;
        let result = f(&mut self.bus, &mut self.delay);
        let released = self.bus.select(Select::Deasserted);
        let value = result?;
        released?;
        Ok(value)
    }

    /// Sends a command to the ADS1256
    pub fn send_command(&mut self, command: Command) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        log::debug!("Sending command: 0x{:02X}", command.opcode());
        self.framed(|bus, _| bus.transfer(Some(&[command.opcode()][..]), None).map(|_| ()))
    }

    /// Writes a single register after waiting for DRDY
    pub fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.write_registers(reg, &[value])
    }

    /// Writes consecutive registers starting at `reg` after waiting for DRDY
    pub fn write_registers(
        &mut self,
        reg: Register,
        data: &[u8],
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.write_registers_with(reg, data, TimeoutPolicy::Report)
    }

    fn write_registers_with(
        &mut self,
        reg: Register,
        data: &[u8],
        on_timeout: TimeoutPolicy,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        let frame = encode_write(reg, data).ok_or(Ads1256Error::InvalidLength)?;

        self.await_ready(on_timeout)?;
        log::debug!("Writing {}: {:02X?}", reg.name(), data);
        self.framed(|bus, _| bus.transfer(Some(frame.as_bytes()), None).map(|_| ()))
    }

    /// Reads a single register. Does not wait for DRDY.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Ads1256Error<SpiError, GpioError>> {
        let mut buffer = [0u8; 1];
        self.read_registers(reg, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Reads consecutive registers starting at `reg`. Does not wait for DRDY.
    pub fn read_registers(
        &mut self,
        reg: Register,
        buffer: &mut [u8],
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        let command = encode_read(reg, buffer.len()).ok_or(Ads1256Error::InvalidLength)?;

        self.framed(|bus, delay| {
            bus.transfer(Some(&command[..]), None)?;
            delay.delay_us(T6_US);
            bus.transfer(None, Some(buffer))?;
            Ok(())
        })
    }

    /// Returns the factory ID from the upper nibble of STATUS
    pub fn read_chip_id(&mut self) -> Result<u8, Ads1256Error<SpiError, GpioError>> {
        self.wait_for_drdy()?;
        let status = self.read_register(Register::Status)?;
        Ok(status >> 4)
    }

    /// Polls DRDY until it goes low.
    ///
    /// Returns how many not-ready polls were observed.
    pub fn wait_for_drdy(&mut self) -> Result<u32, Ads1256Error<SpiError, GpioError>> {
        let config = self.settings.ready;
        let mut sync = ReadySync::new(config);
        loop {
            match sync.observe(self.bus.ready_line()) {
                Poll::Pending => {
                    if config.poll_interval_ns > 0 {
                        self.delay.delay_ns(config.poll_interval_ns);
                    }
                }
                Poll::Ready(polls) => return Ok(polls),
                Poll::Timeout => {
                    log::error!("DRDY pin did not go low after {} polls", config.max_polls);
                    return Err(Ads1256Error::Timeout);
                }
                Poll::Failed(e) => return Err(Ads1256Error::Gpio(e)),
            }
        }
    }

    fn await_ready(&mut self, on_timeout: TimeoutPolicy) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        match self.wait_for_drdy() {
            Ok(_) => Ok(()),
            Err(Ads1256Error::Timeout) if on_timeout == TimeoutPolicy::Ignore => {
                log::warn!("Ignoring DRDY timeout, sample may be stale");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Sets the input multiplexer to `channel` against AINCOM.
    ///
    /// Channels above 7 leave the multiplexer untouched, or fail when the
    /// driver is set to reject them.
    pub fn select_channel(&mut self, channel: u8) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.select_channel_with(channel, TimeoutPolicy::Report)?;
        Ok(())
    }

    /// Returns whether the MUX register was written.
    fn select_channel_with(
        &mut self,
        channel: u8,
        on_timeout: TimeoutPolicy,
    ) -> Result<bool, Ads1256Error<SpiError, GpioError>> {
        let mux = match Mux::single_ended(channel) {
            Some(mux) => mux,
            None => {
                return match self.settings.invalid_channel {
                    ChannelPolicy::Ignore => {
                        log::warn!("Channel {} out of range, MUX left unchanged", channel);
                        Ok(false)
                    }
                    ChannelPolicy::Reject => Err(Ads1256Error::InvalidChannel(channel)),
                };
            }
        };

        log::debug!(
            "Setting MUX register to: 0x{:02X} (AINP = AIN{}, AINN = AINCOM)",
            mux.bits(),
            channel
        );
        self.write_registers_with(Register::Mux, &[mux.bits()], on_timeout)?;
        Ok(true)
    }

    /// Selects `channel`, restarts conversion and reads one sample.
    pub fn read_channel(&mut self, channel: u8) -> Result<i32, Ads1256Error<SpiError, GpioError>> {
        let on_timeout = self.settings.acquire_timeout;
        if !self.select_channel_with(channel, on_timeout)? {
            // No MUX write happened, so DRDY still has to be checked here.
            self.await_ready(on_timeout)?;
        }

        self.send_command(Command::Sync)?;
        self.delay.delay_us(SYNC_SETTLE_US);

        self.send_command(Command::Wakeup)?;
        self.delay.delay_us(WAKEUP_SETTLE_US);

        self.read_sample()
    }

    /// Reads the current conversion result from whatever input is selected
    pub fn read_data(&mut self) -> Result<i32, Ads1256Error<SpiError, GpioError>> {
        self.wait_for_drdy()?;
        self.read_sample()
    }

    fn read_sample(&mut self) -> Result<i32, Ads1256Error<SpiError, GpioError>> {
        let mut buffer = [0u8; 3];
        self.framed(|bus, delay| {
            bus.transfer(Some(&[Command::Rdata.opcode()][..]), None)?;
            delay.delay_us(T6_US);
            bus.transfer(None, Some(&mut buffer[..]))?;
            Ok(())
        })?;

        log::debug!(
            "Raw data: {:02X} {:02X} {:02X}",
            buffer[0],
            buffer[1],
            buffer[2]
        );
        Ok(decode(buffer[0], buffer[1], buffer[2]))
    }

    /// Sets the PGA, keeping the clock-out setting
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        let adcon = self.read_register(Register::Adcon)?;
        self.write_register(Register::Adcon, (adcon & !ADCON_PGA_MASK) | gain as u8)
    }

    pub fn set_data_rate(
        &mut self,
        data_rate: DataRate,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.write_register(Register::Drate, data_rate as u8)
    }

    /// Toggles the analog input buffer. The chip should be recalibrated
    /// afterwards.
    pub fn set_buffer_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        let mut status = self.read_register(Register::Status)?;
        if enabled {
            status |= STATUS_BUFEN;
        } else {
            status &= !STATUS_BUFEN;
        }
        self.write_register(Register::Status, status)
    }
}

// Calibration commands, each completes when DRDY goes low
impl<SPI, CS, DRDY, DELAY, SpiError, GpioError> Ads1256<SPI, CS, DRDY, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DRDY: InputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    fn calibrate(&mut self, command: Command) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(command)?;
        self.wait_for_drdy()?;
        Ok(())
    }

    // Offset and gain
    pub fn self_calibrate(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.calibrate(Command::Selfcal)
    }

    pub fn self_offset_calibrate(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.calibrate(Command::Selfocal)
    }

    pub fn self_gain_calibrate(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.calibrate(Command::Selfgcal)
    }

    /// Requires a zero differential input on the selected pair
    pub fn system_offset_calibrate(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.calibrate(Command::Sysocal)
    }

    /// Requires a full-scale differential input on the selected pair
    pub fn system_gain_calibrate(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.calibrate(Command::Sysgcal)
    }
}

// Calibration registers, stored least significant byte first
impl<SPI, CS, DRDY, DELAY, SpiError, GpioError> Ads1256<SPI, CS, DRDY, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DRDY: InputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// OFC0..OFC2 as a signed 24-bit value
    pub fn read_offset_calibration(&mut self) -> Result<i32, Ads1256Error<SpiError, GpioError>> {
        let mut buffer = [0u8; 3];
        self.read_registers(Register::Ofc0, &mut buffer)?;
        Ok(decode(buffer[2], buffer[1], buffer[0]))
    }

    /// FSC0..FSC2 as an unsigned 24-bit value
    pub fn read_fullscale_calibration(&mut self) -> Result<u32, Ads1256Error<SpiError, GpioError>> {
        let mut buffer = [0u8; 3];
        self.read_registers(Register::Fsc0, &mut buffer)?;
        Ok(u32::from_le_bytes([buffer[0], buffer[1], buffer[2], 0]))
    }

    /// Fails with `OutOfRange` outside -2^23..2^23.
    pub fn write_offset_calibration(
        &mut self,
        value: i32,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        if !(-OFFSET_LIMIT..OFFSET_LIMIT).contains(&value) {
            return Err(Ads1256Error::OutOfRange);
        }
        let data = [value as u8, (value >> 8) as u8, (value >> 16) as u8];
        self.write_registers(Register::Ofc0, &data)
    }

    /// Fails with `OutOfRange` above 0xFFFFFF.
    pub fn write_fullscale_calibration(
        &mut self,
        value: u32,
    ) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        if value > FULLSCALE_MAX {
            return Err(Ads1256Error::OutOfRange);
        }
        let data = [value as u8, (value >> 8) as u8, (value >> 16) as u8];
        self.write_registers(Register::Fsc0, &data)
    }
}

// Synchronization and power
impl<SPI, CS, DRDY, DELAY, SpiError, GpioError> Ads1256<SPI, CS, DRDY, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DRDY: InputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Restarts conversion with SYNC and WAKEUP, then waits for the first result
    pub fn synchronize(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(Command::Sync)?;
        self.delay.delay_us(SYNC_SETTLE_US);
        self.send_command(Command::Wakeup)?;
        self.wait_for_drdy()?;
        Ok(())
    }

    pub fn standby(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(Command::Standby)
    }

    pub fn wakeup(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(Command::Wakeup)
    }

    pub fn stop_continuous(&mut self) -> Result<(), Ads1256Error<SpiError, GpioError>> {
        self.send_command(Command::Sdatac)
    }
}
