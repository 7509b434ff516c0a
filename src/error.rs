use core::fmt;

#[derive(Debug)]
pub enum Ads1256Error<SpiError, GpioError> {
    Spi(SpiError),
    Gpio(GpioError),
    /// DRDY never reached its ready level within the polling bound.
    Timeout,
    /// Channel outside AIN0..AIN7, reported only when the driver rejects them.
    InvalidChannel(u8),
    /// Register burst that is empty or runs past the last register.
    InvalidLength,
    /// Value does not fit the 24-bit register it is written to.
    OutOfRange,
}

impl<SpiError, GpioError> Ads1256Error<SpiError, GpioError> {
    /// `true` when the bus or a pin failed at the platform level.
    pub fn is_transport(&self) -> bool {
        matches!(self, Ads1256Error::Spi(_) | Ads1256Error::Gpio(_))
    }
}

impl<SpiError: fmt::Debug, GpioError: fmt::Debug> fmt::Display
    for Ads1256Error<SpiError, GpioError>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ads1256Error::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
            Ads1256Error::Gpio(e) => write!(f, "GPIO access failed: {:?}", e),
            Ads1256Error::Timeout => f.write_str("DRDY did not signal ready in time"),
            Ads1256Error::InvalidChannel(ch) => write!(f, "invalid input channel {}", ch),
            Ads1256Error::InvalidLength => f.write_str("invalid register burst length"),
            Ads1256Error::OutOfRange => f.write_str("value exceeds 24 bits"),
        }
    }
}

#[cfg(feature = "std")]
impl<SpiError: fmt::Debug, GpioError: fmt::Debug> std::error::Error
    for Ads1256Error<SpiError, GpioError>
{
}
