use crate::constants::Gain;

/// Full-scale code magnitude, 2^23.
pub const FULL_SCALE: f64 = 8_388_608.0;

/// Converts a 24-bit big-endian two's-complement sample to a signed 32-bit integer.
pub fn decode(b0: u8, b1: u8, b2: u8) -> i32 {
    let raw = ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32);
    // Sign extension for negative values
    let extended = if raw & 0x0080_0000 != 0 {
        raw | 0xFF00_0000
    } else {
        raw
    };
    extended as i32
}

/// Scales a decoded code to volts for a reference voltage and PGA setting.
///
/// Input range of the ADS1256 is ±2·VREF/PGA, spread over ±2^23 codes.
pub fn code_to_volts(code: i32, v_ref: f64, gain: Gain) -> f64 {
    (code as f64 * 2.0 * v_ref) / (gain.value() * FULL_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: u32) -> (u8, u8, u8) {
        ((raw >> 16) as u8, (raw >> 8) as u8, raw as u8)
    }

    #[test]
    fn known_codes() {
        assert_eq!(decode(0x00, 0x00, 0x01), 1);
        assert_eq!(decode(0xFF, 0xFF, 0xFF), -1);
        assert_eq!(decode(0x80, 0x00, 0x00), -8_388_608);
        assert_eq!(decode(0x7F, 0xFF, 0xFF), 8_388_607);
        assert_eq!(decode(0x00, 0x00, 0x00), 0);
    }

    #[test]
    fn twos_complement_law() {
        let mut raw = 0u32;
        while raw < (1 << 24) {
            let (b0, b1, b2) = split(raw);
            let expected = if raw < (1 << 23) {
                raw as i64
            } else {
                raw as i64 - (1 << 24)
            };
            assert_eq!(decode(b0, b1, b2) as i64, expected, "raw {:06X}", raw);
            raw += 997;
        }
    }

    #[test]
    fn volts_at_full_scale() {
        let v = code_to_volts(-8_388_608, 2.5, Gain::Gain1);
        assert!((v + 5.0).abs() < 1e-9);

        let v = code_to_volts(4_194_304, 2.5, Gain::Gain2);
        assert!((v - 1.25).abs() < 1e-9);
    }
}
