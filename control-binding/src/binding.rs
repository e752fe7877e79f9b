//! The control binding entity
//!
//! A [`ControlBinding`] maps one controller input to one vehicle [`Action`]. It is
//! immutable once built, apart from its [`CameraCycle`], which only the video-cycle
//! dispatch path advances.

use crate::codec;
use crate::types::{
    Animation, BindingError, Command, ControlAxis, DroneAxis, InputKey, Led, MalformedReason,
    Result, VideoChannel,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rotation used by `VIDEO_CYCLE`, in cycle order
pub const VIDEO_CYCLE: [VideoChannel; 4] = [
    VideoChannel::HorizontalOnly,
    VideoChannel::VerticalOnly,
    VideoChannel::VerticalInHorizontal,
    VideoChannel::HorizontalInVertical,
];

/// What a binding does, with the payload its command requires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Takeoff,
    Land,
    Trim,
    ClearEmergency,
    PlayAnimation {
        animation: Animation,
        duration_ms: i32,
    },
    PlayLed {
        led: Led,
        frequency_hz: f32,
        duration_ms: i32,
    },
    /// Clear emergency, then trim
    Reset,
    VideoCycle,
    FrontalCam,
    BottomCam,
    BottomCamSmall,
    FrontalCamSmall,
}

impl Action {
    /// The command tag of this action
    pub fn command(&self) -> Command {
        match self {
            Action::Takeoff => Command::Takeoff,
            Action::Land => Command::Land,
            Action::Trim => Command::Trim,
            Action::ClearEmergency => Command::ClearEmergency,
            Action::PlayAnimation { .. } => Command::PlayAnimation,
            Action::PlayLed { .. } => Command::PlayLed,
            Action::Reset => Command::Reset,
            Action::VideoCycle => Command::VideoCycle,
            Action::FrontalCam => Command::FrontalCam,
            Action::BottomCam => Command::BottomCam,
            Action::BottomCamSmall => Command::BottomCamSmall,
            Action::FrontalCamSmall => Command::FrontalCamSmall,
        }
    }

    /// Build the action for a payload-free command
    ///
    /// Returns `None` for `PlayAnimation` and `PlayLed`.
    pub fn from_command(command: Command) -> Option<Self> {
        let action = match command {
            Command::Takeoff => Action::Takeoff,
            Command::Land => Action::Land,
            Command::Trim => Action::Trim,
            Command::ClearEmergency => Action::ClearEmergency,
            Command::Reset => Action::Reset,
            Command::VideoCycle => Action::VideoCycle,
            Command::FrontalCam => Action::FrontalCam,
            Command::BottomCam => Action::BottomCam,
            Command::BottomCamSmall => Action::BottomCamSmall,
            Command::FrontalCamSmall => Action::FrontalCamSmall,
            Command::PlayAnimation | Command::PlayLed => return None,
        };
        Some(action)
    }

    /// Channel selected by the fixed camera commands
    ///
    /// The vehicle's "vertical" camera is the frontal one, so `FrontalCam` selects
    /// `VerticalOnly` and `BottomCam` selects `HorizontalOnly`.
    pub fn fixed_channel(&self) -> Option<VideoChannel> {
        match self {
            Action::FrontalCam => Some(VideoChannel::VerticalOnly),
            Action::BottomCam => Some(VideoChannel::HorizontalOnly),
            Action::BottomCamSmall => Some(VideoChannel::VerticalInHorizontal),
            Action::FrontalCamSmall => Some(VideoChannel::HorizontalInVertical),
            _ => None,
        }
    }
}

/// Position in the [`VIDEO_CYCLE`] rotation
///
/// Starts at 0 and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraCycle {
    index: usize,
}

impl CameraCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the rotation
    pub fn index(&self) -> usize {
        self.index
    }

    /// Step to the next position (wrapping) and return the channel there
    ///
    /// The step happens before the read, so the first call on a fresh cycle
    /// returns `VerticalOnly`, not `HorizontalOnly`.
    pub fn advance(&mut self) -> VideoChannel {
        self.index = (self.index + 1) % VIDEO_CYCLE.len();
        VIDEO_CYCLE[self.index]
    }
}

/// A mapping from one controller input to one vehicle action
///
/// Bindings compare equal when their typed fields match; the camera cycle
/// position and the stored string text are not part of equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlBinding {
    key: InputKey,
    action: Action,
    delay_ms: i32,
    control_axis: Option<ControlAxis>,
    drone_axis: Option<DroneAxis>,
    pref_string: String,
    camera_cycle: CameraCycle,
}

impl ControlBinding {
    /// Parse a binding from its stored `KEY/COMMAND/DELAY[/...]` form
    ///
    /// # Example
    /// ```
    /// use control_binding::{Command, ControlBinding, InputKey};
    ///
    /// let binding = ControlBinding::parse("CROSS/TAKEOFF/0").unwrap();
    /// assert_eq!(binding.key(), InputKey::Cross);
    /// assert_eq!(binding.command(), Command::Takeoff);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (key, action, delay_ms) = codec::parse_fields(input)?;
        log::debug!("Parsed binding: {}", input);
        Ok(Self::assemble(key, action, delay_ms, input.to_string()))
    }

    /// Build a binding for a payload-free command
    ///
    /// Fails with a malformed-binding error for `PlayAnimation` and `PlayLed`,
    /// which need [`ControlBinding::with_animation`] or [`ControlBinding::with_led`].
    pub fn new(key: InputKey, command: Command, delay_ms: i32) -> Result<Self> {
        let action = Action::from_command(command).ok_or_else(|| {
            BindingError::malformed(
                format!("{}/{}/{}", key, command, delay_ms),
                MalformedReason::MissingPayload(command),
            )
        })?;
        Self::from_action(key, action, delay_ms)
    }

    /// Build a `PLAY_ANIMATION` binding
    pub fn with_animation(
        key: InputKey,
        animation: Animation,
        delay_ms: i32,
        duration_ms: i32,
    ) -> Self {
        let action = Action::PlayAnimation {
            animation,
            duration_ms,
        };
        Self::build(key, action, delay_ms)
    }

    /// Build a `PLAY_LED` binding
    ///
    /// Fails if `frequency_hz` is NaN or infinite, since such a binding could not
    /// be stored and read back.
    pub fn with_led(
        key: InputKey,
        led: Led,
        delay_ms: i32,
        frequency_hz: f32,
        duration_ms: i32,
    ) -> Result<Self> {
        Self::from_action(
            key,
            Action::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            },
            delay_ms,
        )
    }

    /// Build a binding from an already-typed action
    ///
    /// Applies the same payload checks as [`ControlBinding::with_led`].
    pub fn from_action(key: InputKey, action: Action, delay_ms: i32) -> Result<Self> {
        if let Action::PlayLed { frequency_hz, .. } = action {
            if !frequency_hz.is_finite() {
                return Err(BindingError::malformed(
                    codec::render(key, &action, delay_ms),
                    MalformedReason::InvalidNumber {
                        field: "frequency",
                        value: frequency_hz.to_string(),
                    },
                ));
            }
        }
        Ok(Self::build(key, action, delay_ms))
    }

    fn build(key: InputKey, action: Action, delay_ms: i32) -> Self {
        let pref_string = codec::render(key, &action, delay_ms);
        log::debug!("Built binding: {}", pref_string);
        Self::assemble(key, action, delay_ms, pref_string)
    }

    fn assemble(key: InputKey, action: Action, delay_ms: i32, pref_string: String) -> Self {
        Self {
            key,
            action,
            delay_ms,
            control_axis: None,
            drone_axis: None,
            pref_string,
            camera_cycle: CameraCycle::new(),
        }
    }

    pub fn key(&self) -> InputKey {
        self.key
    }

    pub fn command(&self) -> Command {
        self.action.command()
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Delay before the action is due (interpreted by the trigger layer)
    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    pub fn animation(&self) -> Option<Animation> {
        match self.action {
            Action::PlayAnimation { animation, .. } => Some(animation),
            _ => None,
        }
    }

    pub fn led(&self) -> Option<Led> {
        match self.action {
            Action::PlayLed { led, .. } => Some(led),
            _ => None,
        }
    }

    pub fn frequency_hz(&self) -> Option<f32> {
        match self.action {
            Action::PlayLed { frequency_hz, .. } => Some(frequency_hz),
            _ => None,
        }
    }

    /// Animation or LED duration, for the commands that carry one
    pub fn duration_ms(&self) -> Option<i32> {
        match self.action {
            Action::PlayAnimation { duration_ms, .. } | Action::PlayLed { duration_ms, .. } => {
                Some(duration_ms)
            }
            _ => None,
        }
    }

    pub fn control_axis(&self) -> Option<ControlAxis> {
        self.control_axis
    }

    pub fn drone_axis(&self) -> Option<DroneAxis> {
        self.drone_axis
    }

    /// The stored string form: the parsed input, or the rendering of the typed fields
    pub fn pref_string(&self) -> &str {
        &self.pref_string
    }

    /// Current video-cycle position (always 0 on a fresh binding)
    pub fn camera_cycle_index(&self) -> usize {
        self.camera_cycle.index()
    }

    pub(crate) fn camera_cycle_mut(&mut self) -> &mut CameraCycle {
        &mut self.camera_cycle
    }
}

impl PartialEq for ControlBinding {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.action == other.action
            && self.delay_ms == other.delay_ms
            && self.control_axis == other.control_axis
            && self.drone_axis == other.drone_axis
    }
}

impl fmt::Display for ControlBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pref_string)
    }
}

impl FromStr for ControlBinding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ControlBinding {
    type Error = BindingError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ControlBinding> for String {
    fn from(binding: ControlBinding) -> Self {
        binding.pref_string
    }
}
