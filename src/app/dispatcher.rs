//! Console command handlers.
//!
//! Flat `match` from [`Command`] to clock mutation plus a one-line reply.
//! Every handler that changes a register persists it before replying;
//! nothing is batched across commands.

use log::{debug, warn};

use super::commands::Command;
use super::ports::{Console, TimeSource};
use crate::clock::Clock;
use crate::clock::registers::SqwRate;
use crate::error::Result;

const USAGE: &[&str] = &[
    "Unknown command. Try these:",
    " h## - set Hours d## - set Date",
    " i## - set mInutes m## - set Month",
    " s## - set Seconds y## - set Year",
    " w## - set arbitrary day of Week",
    " t - toggle 24-hour mode",
    " a - set AM p - set PM",
    "",
    " z - start clock Z - stop clock",
    " q - SQW/OUT = 1Hz Q - stop SQW/OUT",
    "",
    " >##,### - write to register ## the value ###",
    " <## - read the value in register ##",
];

const MERIDIEM_IN_24H: &str = "(Set hours only in 24-hour mode.)";

/// Apply `cmd` to `clock` and report back on `console`.
///
/// Out-of-range operands are not errors: the clock ignores them and the
/// reply still echoes what was asked for. Only a failed bus transfer is.
pub fn dispatch<T: TimeSource>(
    cmd: Command,
    clock: &mut Clock<T>,
    console: &mut impl Console,
) -> Result<()> {
    debug!("Console: {:?}", cmd);
    match cmd {
        Command::SetHours(v) => {
            clock.registers_mut().set_hours(v);
            clock.write_all()?;
            reply_setting(console, "hours", v);
        }
        Command::SetMinutes(v) => {
            clock.registers_mut().set_minutes(v);
            clock.write_all()?;
            reply_setting(console, "minutes", v);
        }
        Command::SetSeconds(v) => {
            clock.registers_mut().set_seconds(v);
            clock.write_all()?;
            reply_setting(console, "seconds", v);
        }
        Command::SetYear(v) => {
            clock.registers_mut().set_year(v);
            clock.write_all()?;
            reply_setting(console, "year", v);
        }
        Command::SetMonth(v) => {
            clock.registers_mut().set_month(v);
            clock.write_all()?;
            reply_setting(console, "month", v);
        }
        Command::SetDate(v) => {
            clock.registers_mut().set_date(v);
            clock.write_all()?;
            reply_setting(console, "date", v);
        }
        Command::SetDayOfWeek(v) => {
            clock.registers_mut().set_day_of_week(v);
            clock.write_all()?;
            reply_setting(console, "day of week", v);
        }
        Command::ReportDayOfWeek => {
            let dow = clock.registers().day_of_week();
            console.write_line(&format!("Day of week is: {dow}"));
        }
        Command::ToggleHourMode => {
            let regs = clock.registers_mut();
            let line = if regs.is_12_hour() {
                regs.switch_to_24h();
                "Switching to 24-hour clock."
            } else {
                regs.switch_to_12h();
                "Switching to 12-hour clock."
            };
            clock.write_all()?;
            console.write_line(line);
        }
        Command::SetAm | Command::SetPm => {
            if !clock.registers().is_12_hour() {
                console.write_line(MERIDIEM_IN_24H);
                return Ok(());
            }
            let line = if cmd == Command::SetAm {
                clock.registers_mut().set_am();
                "Set AM."
            } else {
                clock.registers_mut().set_pm();
                "Set PM."
            };
            clock.write_all()?;
            console.write_line(line);
        }
        Command::SquareWaveOn => {
            clock.sqw_enable(SqwRate::Hz1)?;
            console.write_line("Square wave output set to 1Hz");
        }
        Command::SquareWaveOff => {
            clock.sqw_disable(false)?;
            console.write_line("Square wave output disabled (low)");
        }
        Command::StartOscillator => {
            clock.start()?;
            console.write_line("Clock oscillator started.");
        }
        Command::StopOscillator => {
            clock.stop()?;
            console.write_line("Clock oscillator stopped.");
        }
        Command::WriteRegister { addr, value } => {
            let byte = value as u8;
            if clock.write_register(addr, byte)? {
                console.write_line(&format!("Write to register {addr} the value {byte}"));
            } else {
                console.write_line(&format!("Register {addr} is out of range"));
            }
        }
        Command::ReadRegister { addr } => {
            let value = clock.read_register(addr)?;
            console.write_line(&format!("Read from register {addr} the value {value}"));
        }
        Command::Unknown(opcode) => {
            warn!("Console: unknown opcode 0x{:02X}", opcode);
            for line in USAGE {
                console.write_line(line);
            }
        }
    }
    Ok(())
}

fn reply_setting(console: &mut impl Console, field: &str, value: u16) {
    console.write_line(&format!("Setting {field} to: {value}"));
}
