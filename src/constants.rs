/// ADS1256 commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Completes SYNC and exits standby mode
    Wakeup = 0x00,
    /// Read data
    Rdata = 0x01,
    /// Read data continuously
    Rdatac = 0x03,
    /// Stop read data continuously
    Sdatac = 0x0F,
    /// Read from register, OR'd with the register address
    Rreg = 0x10,
    /// Write to register, OR'd with the register address
    Wreg = 0x50,
    Selfcal = 0xF0,
    Selfocal = 0xF1,
    Selfgcal = 0xF2,
    Sysocal = 0xF3,
    Sysgcal = 0xF4,
    Sync = 0xFC,
    Standby = 0xFD,
    Reset = 0xFE,
}

impl Command {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

/// ADS1256 registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Status = 0x00,
    Mux = 0x01,
    Adcon = 0x02,
    Drate = 0x03,
    Io = 0x04,
    Ofc0 = 0x05,
    Ofc1 = 0x06,
    Ofc2 = 0x07,
    Fsc0 = 0x08,
    Fsc1 = 0x09,
    Fsc2 = 0x0A,
}

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 11;

impl Register {
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::Status,
        Register::Mux,
        Register::Adcon,
        Register::Drate,
        Register::Io,
        Register::Ofc0,
        Register::Ofc1,
        Register::Ofc2,
        Register::Fsc0,
        Register::Fsc1,
        Register::Fsc2,
    ];

    pub fn address(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Status => "STATUS",
            Register::Mux => "MUX",
            Register::Adcon => "ADCON",
            Register::Drate => "DRATE",
            Register::Io => "IO",
            Register::Ofc0 => "OFC0",
            Register::Ofc1 => "OFC1",
            Register::Ofc2 => "OFC2",
            Register::Fsc0 => "FSC0",
            Register::Fsc1 => "FSC1",
            Register::Fsc2 => "FSC2",
        }
    }
}

// STATUS register bits
pub const STATUS_ORDER: u8 = 0x08;
pub const STATUS_ACAL: u8 = 0x04;
pub const STATUS_BUFEN: u8 = 0x02;

// MUX register
/// Nibble code for AINCOM; any code with bit 3 set selects it.
pub const MUX_AINCOM: u8 = 0x08;

// ADCON register
pub const ADCON_PGA_MASK: u8 = 0x07;

/// Clock-out divider on the D0/CLKOUT pin (ADCON bits 6:5)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockOut {
    Off = 0x00,
    Div1 = 0x20,
    Div2 = 0x40,
    Div4 = 0x60,
}

/// Gain settings for the ADS1256 programmable gain amplifier (PGA)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    Gain1 = 0b000,
    Gain2 = 0b001,
    Gain4 = 0b010,
    Gain8 = 0b011,
    Gain16 = 0b100,
    Gain32 = 0b101,
    Gain64 = 0b110,
}

impl Gain {
    /// Returns the gain value as a floating-point number
    pub fn value(&self) -> f64 {
        match self {
            Gain::Gain1 => 1.0,
            Gain::Gain2 => 2.0,
            Gain::Gain4 => 4.0,
            Gain::Gain8 => 8.0,
            Gain::Gain16 => 16.0,
            Gain::Gain32 => 32.0,
            Gain::Gain64 => 64.0,
        }
    }
}

/// Data rates for the ADS1256
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    Sps30000 = 0xF0,
    Sps15000 = 0xE0,
    Sps7500 = 0xD0,
    Sps3750 = 0xC0,
    Sps2000 = 0xB0,
    Sps1000 = 0xA1,
    Sps500 = 0x92,
    Sps100 = 0x82,
    Sps60 = 0x72,
    Sps50 = 0x63,
    Sps30 = 0x53,
    Sps25 = 0x43,
    Sps15 = 0x33,
    Sps10 = 0x23,
    Sps5 = 0x13,
    Sps2_5 = 0x03,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses_are_sequential() {
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.address() as usize, i);
        }
        assert_eq!(Register::Fsc2.address(), 10);
    }

    #[test]
    fn opcodes_match_datasheet() {
        assert_eq!(Command::Wakeup.opcode(), 0x00);
        assert_eq!(Command::Rdata.opcode(), 0x01);
        assert_eq!(Command::Rdatac.opcode(), 0x03);
        assert_eq!(Command::Sdatac.opcode(), 0x0F);
        assert_eq!(Command::Rreg.opcode(), 0x10);
        assert_eq!(Command::Wreg.opcode(), 0x50);
        assert_eq!(Command::Sysgcal.opcode(), 0xF4);
        assert_eq!(Command::Sync.opcode(), 0xFC);
        assert_eq!(Command::Standby.opcode(), 0xFD);
        assert_eq!(Command::Reset.opcode(), 0xFE);
    }
}
