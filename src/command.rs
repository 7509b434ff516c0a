//! Framing of register commands.
//!
//! RREG and WREG carry the start address in the low nibble of the op-code,
//! followed by the number of registers minus one.

use crate::constants::{Command, Register, REGISTER_COUNT};

const HEADER_LEN: usize = 2;

/// Longest frame: header plus a burst over every register.
pub const MAX_FRAME_LEN: usize = HEADER_LEN + REGISTER_COUNT;

/// An encoded register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn burst_fits(register: Register, count: usize) -> bool {
    count >= 1 && register.address() as usize + count <= REGISTER_COUNT
}

/// Encodes `[WREG | register, len - 1, values...]`.
///
/// Returns `None` for an empty burst or one that runs past the last register.
pub fn encode_write(register: Register, values: &[u8]) -> Option<Frame> {
    if !burst_fits(register, values.len()) {
        return None;
    }

    let mut buf = [0u8; MAX_FRAME_LEN];
    buf[0] = Command::Wreg.opcode() | register.address();
    buf[1] = (values.len() - 1) as u8;
    buf[HEADER_LEN..HEADER_LEN + values.len()].copy_from_slice(values);

    Some(Frame {
        buf,
        len: HEADER_LEN + values.len(),
    })
}

/// Encodes `[RREG | register, count - 1]`.
pub fn encode_read(register: Register, count: usize) -> Option<[u8; 2]> {
    if !burst_fits(register, count) {
        return None;
    }
    Some([Command::Rreg.opcode() | register.address(), (count - 1) as u8])
}
