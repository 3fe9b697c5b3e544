//! Inbound operator commands.
//!
//! One opcode byte, then zero, one or two decimal operands. Operands are
//! read greedily from whatever is already buffered on the console; the
//! first non-digit ends the operand and is consumed with it. If the rest
//! of the digits have not arrived yet the operand is simply shorter:
//! `H7x` sets hours to 7, a bare `H` sets hours to 0.
//!
//! Operands accumulate in a wrapping `u16`; range checks belong to the
//! clock, which ignores values it cannot represent.

use super::ports::ByteSource;

/// Commands the operator console can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetHours(u16),
    SetMinutes(u16),
    SetSeconds(u16),
    SetYear(u16),
    SetMonth(u16),
    SetDate(u16),
    SetDayOfWeek(u16),
    ReportDayOfWeek,
    ToggleHourMode,
    SetAm,
    SetPm,
    /// Square wave on at 1 Hz.
    SquareWaveOn,
    /// Square wave off, output idles low.
    SquareWaveOff,
    StartOscillator,
    StopOscillator,
    WriteRegister { addr: u16, value: u16 },
    ReadRegister { addr: u16 },
    /// Unrecognised opcode; answered with the usage text.
    Unknown(u8),
}

impl Command {
    /// Parse the next command from `input`, or `None` if nothing is buffered.
    pub fn read_from(input: &mut impl ByteSource) -> Option<Self> {
        if input.bytes_available() == 0 {
            return None;
        }
        let opcode = input.read_byte()?;
        Some(Self::decode(opcode, input))
    }

    fn decode(opcode: u8, input: &mut impl ByteSource) -> Self {
        match opcode {
            b'H' | b'h' => Self::SetHours(read_operand(input)),
            b'I' | b'i' => Self::SetMinutes(read_operand(input)),
            b'S' | b's' => Self::SetSeconds(read_operand(input)),
            b'Y' | b'y' => Self::SetYear(read_operand(input)),
            b'M' | b'm' => Self::SetMonth(read_operand(input)),
            b'D' | b'd' => Self::SetDate(read_operand(input)),
            b'w' => Self::SetDayOfWeek(read_operand(input)),
            b'W' => Self::ReportDayOfWeek,
            b'T' | b't' => Self::ToggleHourMode,
            b'A' | b'a' => Self::SetAm,
            b'P' | b'p' => Self::SetPm,
            b'q' => Self::SquareWaveOn,
            b'Q' => Self::SquareWaveOff,
            b'z' => Self::StartOscillator,
            b'Z' => Self::StopOscillator,
            b'>' => {
                let addr = read_operand(input);
                let value = read_operand(input);
                Self::WriteRegister { addr, value }
            }
            b'<' => Self::ReadRegister {
                addr: read_operand(input),
            },
            other => Self::Unknown(other),
        }
    }
}

/// Accumulate buffered ASCII digits into a wrapping `u16`.
///
/// Stops when the buffer runs dry or after consuming the first non-digit.
pub fn read_operand(input: &mut impl ByteSource) -> u16 {
    let mut acc: u16 = 0;
    while input.bytes_available() > 0 {
        let Some(byte) = input.read_byte() else {
            break;
        };
        if !byte.is_ascii_digit() {
            break;
        }
        acc = acc.wrapping_mul(10).wrapping_add(u16::from(byte - b'0'));
    }
    acc
}
