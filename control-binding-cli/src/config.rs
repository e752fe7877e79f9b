//! Binding profile loading and parsing
//!
//! A profile is a TOML file listing bindings, either in their stored string form
//! or as typed tables:
//!
//! ```toml
//! name = "default"
//!
//! [[bindings]]
//! binding = "CROSS/TAKEOFF/0"
//!
//! [[bindings]]
//! key = "L1"
//! command = "PLAY_LED"
//! delay = 100
//! led = "RED"
//! frequency = 2.5
//! duration = 3000
//! ```

use anyhow::{bail, Context, Result};
use control_binding::{Action, Animation, Command, ControlBinding, InputKey, Led};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Profile file contents (loaded from a .toml file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

/// One binding entry of a profile
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BindingEntry {
    Encoded { binding: String },
    Typed(TypedBinding),
}

/// A binding spelled out field by field
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypedBinding {
    pub key: InputKey,
    pub command: Command,
    #[serde(default)]
    pub delay: i32,
    pub animation: Option<Animation>,
    pub led: Option<Led>,
    pub frequency: Option<f32>,
    pub duration: Option<i32>,
}

/// A loaded, fully validated profile
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: Option<String>,
    pub bindings: Vec<ControlBinding>,
}

impl BindingEntry {
    pub fn to_binding(&self) -> Result<ControlBinding> {
        match self {
            BindingEntry::Encoded { binding } => Ok(ControlBinding::parse(binding)?),
            BindingEntry::Typed(typed) => typed.to_binding(),
        }
    }
}

impl TypedBinding {
    /// Build the binding, requiring exactly the payload fields its command uses
    pub fn to_binding(&self) -> Result<ControlBinding> {
        let action = match self.command {
            Command::PlayAnimation => {
                self.reject_fields(&[
                    ("led", self.led.is_some()),
                    ("frequency", self.frequency.is_some()),
                ])?;
                Action::PlayAnimation {
                    animation: self.animation.context("PLAY_ANIMATION needs an animation")?,
                    duration_ms: self.duration.context("PLAY_ANIMATION needs a duration")?,
                }
            }
            Command::PlayLed => {
                self.reject_fields(&[("animation", self.animation.is_some())])?;
                Action::PlayLed {
                    led: self.led.context("PLAY_LED needs an led pattern")?,
                    frequency_hz: self.frequency.context("PLAY_LED needs a frequency")?,
                    duration_ms: self.duration.context("PLAY_LED needs a duration")?,
                }
            }
            command => {
                self.reject_fields(&[
                    ("animation", self.animation.is_some()),
                    ("led", self.led.is_some()),
                    ("frequency", self.frequency.is_some()),
                    ("duration", self.duration.is_some()),
                ])?;
                return Ok(ControlBinding::new(self.key, command, self.delay)?);
            }
        };

        Ok(ControlBinding::from_action(self.key, action, self.delay)?)
    }

    fn reject_fields(&self, fields: &[(&str, bool)]) -> Result<()> {
        for (name, present) in fields {
            if *present {
                bail!("{} does not take a {} field", self.command, name);
            }
        }
        Ok(())
    }
}

/// Load a profile from a TOML file and validate every binding in it
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {:?}", path))?;

    let config: ProfileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse profile file: {:?}", path))?;

    let bindings = config
        .bindings
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .to_binding()
                .with_context(|| format!("Invalid binding #{} in {:?}", index + 1, path))
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} bindings from {:?}", bindings.len(), path);

    Ok(Profile {
        name: config.name,
        bindings,
    })
}
