use crate::bus::BusConfig;
use crate::constants::{
    ClockOut, DataRate, Gain, ADCON_PGA_MASK, MUX_AINCOM, STATUS_ACAL, STATUS_BUFEN, STATUS_ORDER,
};
use crate::ready::ReadyConfig;

/// Analog input pin selectable by the multiplexer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Ain0,
    Ain1,
    Ain2,
    Ain3,
    Ain4,
    Ain5,
    Ain6,
    Ain7,
    Common,
}

impl Input {
    /// AIN0..AIN7 by number; `None` above 7.
    pub fn from_pin(pin: u8) -> Option<Input> {
        let input = match pin {
            0 => Input::Ain0,
            1 => Input::Ain1,
            2 => Input::Ain2,
            3 => Input::Ain3,
            4 => Input::Ain4,
            5 => Input::Ain5,
            6 => Input::Ain6,
            7 => Input::Ain7,
            _ => return None,
        };
        Some(input)
    }

    /// Nibble code used in the MUX register.
    pub fn code(self) -> u8 {
        match self {
            Input::Ain0 => 0,
            Input::Ain1 => 1,
            Input::Ain2 => 2,
            Input::Ain3 => 3,
            Input::Ain4 => 4,
            Input::Ain5 => 5,
            Input::Ain6 => 6,
            Input::Ain7 => 7,
            Input::Common => MUX_AINCOM,
        }
    }
}

/// Differential input pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mux {
    pub positive: Input,
    pub negative: Input,
}

impl Mux {
    /// Single-ended measurement of `pin` against AINCOM.
    pub fn single_ended(pin: u8) -> Option<Mux> {
        Input::from_pin(pin).map(|positive| Mux {
            positive,
            negative: Input::Common,
        })
    }

    pub fn bits(self) -> u8 {
        (self.positive.code() << 4) | self.negative.code()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    MsbFirst,
    LsbFirst,
}

/// Register snapshot written at startup: STATUS, MUX, ADCON and DRATE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub byte_order: ByteOrder,
    pub auto_calibration: bool,
    pub input_buffer: bool,
    pub mux: Mux,
    pub clock_out: ClockOut,
    pub gain: Gain,
    pub data_rate: DataRate,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            byte_order: ByteOrder::MsbFirst,
            auto_calibration: false,
            input_buffer: false,
            mux: Mux {
                positive: Input::Ain0,
                negative: Input::Common,
            },
            clock_out: ClockOut::Div1,
            gain: Gain::Gain1,
            data_rate: DataRate::Sps30000,
        }
    }
}

impl Config {
    pub fn status(&self) -> u8 {
        let mut status = 0;
        if self.byte_order == ByteOrder::LsbFirst {
            status |= STATUS_ORDER;
        }
        if self.auto_calibration {
            status |= STATUS_ACAL;
        }
        if self.input_buffer {
            status |= STATUS_BUFEN;
        }
        status
    }

    pub fn adcon(&self) -> u8 {
        self.clock_out as u8 | (self.gain as u8 & ADCON_PGA_MASK)
    }

    /// Register values in address order, starting at STATUS.
    pub fn registers(&self) -> [u8; 4] {
        [
            self.status(),
            self.mux.bits(),
            self.adcon(),
            self.data_rate as u8,
        ]
    }
}

/// Handling of channel numbers above 7
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// Leave the multiplexer untouched and carry on.
    #[default]
    Ignore,
    /// Fail with `Ads1256Error::InvalidChannel`.
    Reject,
}

/// Handling of a readiness timeout inside `read_channel`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeoutPolicy {
    #[default]
    Report,
    /// Log and keep going. Legacy behavior: a stalled device yields a stale
    /// sample instead of an error.
    Ignore,
}

/// Driver-level settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub bus: BusConfig,
    pub ready: ReadyConfig,
    pub invalid_channel: ChannelPolicy,
    pub acquire_timeout: TimeoutPolicy,
}
