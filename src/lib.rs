//! Driver for the TI ADS1256 24-bit delta-sigma ADC.
//!
//! The chip is reached over an `embedded-hal` [`SpiDevice`](embedded_hal::spi::SpiDevice),
//! a chip-select [`OutputPin`](embedded_hal::digital::OutputPin) driven by the
//! driver, and the DRDY [`InputPin`](embedded_hal::digital::InputPin).
//!
//! ```rust,ignore
//! let mut adc = Ads1256::new(spi, cs, drdy, delay, Settings::default());
//! adc.init(&Config::default())?;
//!
//! for channel in 0..3 {
//!     let code = adc.read_channel(channel)?;
//!     log::info!("AIN{}: {:.6} V", channel, code_to_volts(code, 2.5, Gain::Gain1));
//! }
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bus;
mod command;
mod config;
mod constants;
mod driver;
mod error;
mod ready;
mod sample;

pub use bus::{ActiveLevel, BitOrder, BusConfig};
pub use command::{encode_read, encode_write, Frame, MAX_FRAME_LEN};
pub use config::{ByteOrder, ChannelPolicy, Config, Input, Mux, Settings, TimeoutPolicy};
pub use constants::{ClockOut, Command, DataRate, Gain, Register};
pub use driver::Ads1256;
pub use error::Ads1256Error;
pub use ready::{PinErrorPolicy, Poll, ReadyConfig, ReadyState, ReadySync};
pub use sample::{code_to_volts, decode};
