//! Binding string codec
//!
//! Bindings are stored as slash-separated records:
//!
//! ```text
//! KEY/COMMAND/DELAY                       most commands
//! KEY/PLAY_ANIMATION/DELAY/ANIM/DURATION
//! KEY/PLAY_LED/DELAY/LED/FREQUENCY/DURATION
//! ```
//!
//! Enum fields use their canonical upper-case name, numbers use plain base-10 text.
//! Parsing is strict: any unknown name, bad number, missing or extra field
//! rejects the whole string.

use crate::binding::{Action, ControlBinding};
use crate::types::{BindingError, Command, InputKey, MalformedReason, Result};
use std::fmt::Write;
use std::str::FromStr;

/// Field separator of the stored form
pub const SEPARATOR: char = '/';

/// Fields every binding has: key, command, delay
const HEADER_FIELDS: usize = 3;

/// Parse a binding string (same as [`ControlBinding::parse`])
pub fn parse(input: &str) -> Result<ControlBinding> {
    ControlBinding::parse(input)
}

/// Render the stored form of a binding
pub fn render_binding(binding: &ControlBinding) -> String {
    render(binding.key(), binding.action(), binding.delay_ms())
}

/// Render typed fields into the stored form
pub fn render(key: InputKey, action: &Action, delay_ms: i32) -> String {
    let mut out = format!("{}{SEPARATOR}{}{SEPARATOR}{}", key, action.command(), delay_ms);

    // Writing into a String cannot fail
    match action {
        Action::PlayAnimation {
            animation,
            duration_ms,
        } => {
            let _ = write!(out, "{SEPARATOR}{}{SEPARATOR}{}", animation, duration_ms);
        }
        Action::PlayLed {
            led,
            frequency_hz,
            duration_ms,
        } => {
            let _ = write!(
                out,
                "{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
                led,
                format_frequency(*frequency_hz),
                duration_ms
            );
        }
        _ => {}
    }

    out
}

/// Format a frequency so whole numbers keep a decimal point ("2.0", not "2")
///
/// `f32`'s `Display` is the shortest text that parses back to the same value,
/// so the rendered form always round-trips.
pub fn format_frequency(frequency_hz: f32) -> String {
    let text = frequency_hz.to_string();
    if frequency_hz.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Split and type-check a binding string
pub(crate) fn parse_fields(input: &str) -> Result<(InputKey, Action, i32)> {
    let fields: Vec<&str> = input.split(SEPARATOR).collect();
    let malformed = |reason| BindingError::malformed(input, reason);

    let key = InputKey::from_str(fields[0])
        .map_err(|_| malformed(MalformedReason::UnknownInputKey(fields[0].to_string())))?;

    let command_token = fields.get(1).copied().unwrap_or_default();
    let command = Command::from_str(command_token)
        .map_err(|_| malformed(MalformedReason::UnknownCommand(command_token.to_string())))?;

    let expected = HEADER_FIELDS + command.payload_fields();
    if fields.len() < expected {
        return Err(malformed(MalformedReason::MissingFields {
            command,
            expected,
            found: fields.len(),
        }));
    }
    if fields.len() > expected {
        return Err(malformed(MalformedReason::TrailingFields {
            command,
            expected,
            found: fields.len(),
        }));
    }

    let delay_ms = parse_number::<i32>(fields[2], "delay").map_err(malformed)?;

    let action = match command {
        Command::PlayAnimation => {
            let animation = fields[3].parse().map_err(|_| {
                malformed(MalformedReason::UnknownAnimation(fields[3].to_string()))
            })?;
            let duration_ms = parse_number::<i32>(fields[4], "duration").map_err(malformed)?;
            Action::PlayAnimation {
                animation,
                duration_ms,
            }
        }
        Command::PlayLed => {
            let led = fields[3]
                .parse()
                .map_err(|_| malformed(MalformedReason::UnknownLed(fields[3].to_string())))?;
            let frequency_hz = parse_number::<f32>(fields[4], "frequency")
                .and_then(|value: f32| finite_frequency(value, fields[4]))
                .map_err(malformed)?;
            let duration_ms = parse_number::<i32>(fields[5], "duration").map_err(malformed)?;
            Action::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            }
        }
        // Payload-free commands always map
        other => Action::from_command(other)
            .ok_or_else(|| malformed(MalformedReason::MissingPayload(other)))?,
    };

    Ok((key, action, delay_ms))
}

/// `f32::from_str` accepts "NaN" and "inf", which can never round-trip
fn finite_frequency(value: f32, text: &str) -> std::result::Result<f32, MalformedReason> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MalformedReason::InvalidNumber {
            field: "frequency",
            value: text.to_string(),
        })
    }
}

fn parse_number<T: FromStr>(value: &str, field: &'static str) -> std::result::Result<T, MalformedReason> {
    value.parse().map_err(|_| MalformedReason::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
