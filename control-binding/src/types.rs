//! Core types for the control binding library
//!
//! This module defines the closed vocabularies a binding is built from (controller
//! inputs, commands, vehicle animations, LED patterns and video channels) and the
//! error type shared by the codec and the dispatcher.
//!
//! Every enumeration renders as its canonical upper-case name and parses only from
//! that exact name (case-sensitive).

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindingError>;

/// Physical controller input that activates a binding
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKey {
    Ps,
    Select,
    Start,
    LeftStick,
    RightStick,
    Triangle,
    Circle,
    Cross,
    Square,
    #[serde(rename = "L1")]
    #[strum(to_string = "L1")]
    L1,
    #[serde(rename = "L2")]
    #[strum(to_string = "L2")]
    L2,
    #[serde(rename = "R1")]
    #[strum(to_string = "R1")]
    R1,
    #[serde(rename = "R2")]
    #[strum(to_string = "R2")]
    R2,
}

/// Action kind a binding triggers on the vehicle
///
/// `PlayAnimation` and `PlayLed` carry a payload; see [`crate::Action`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Takeoff,
    Land,
    Trim,
    ClearEmergency,
    PlayAnimation,
    PlayLed,
    Reset,
    VideoCycle,
    FrontalCam,
    BottomCam,
    BottomCamSmall,
    FrontalCamSmall,
}

impl Command {
    /// Number of slash-separated fields that follow the delay for this command
    pub fn payload_fields(&self) -> usize {
        match self {
            Command::PlayAnimation => 2,
            Command::PlayLed => 3,
            _ => 0,
        }
    }

    /// Check if this command needs a payload (animation or LED parameters)
    pub fn has_payload(&self) -> bool {
        self.payload_fields() > 0
    }
}

/// Analog controller axis (reserved for axis bindings, no dispatch behavior yet)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

/// Vehicle motion axis (reserved for axis bindings, no dispatch behavior yet)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneAxis {
    FrontBack,
    LeftRight,
    UpDown,
    Rotate,
}

/// Flight animation the vehicle can play
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Animation {
    #[serde(rename = "PHI_M30_DEG")]
    #[strum(to_string = "PHI_M30_DEG")]
    PhiM30Deg,
    #[serde(rename = "PHI_30_DEG")]
    #[strum(to_string = "PHI_30_DEG")]
    Phi30Deg,
    #[serde(rename = "THETA_M30_DEG")]
    #[strum(to_string = "THETA_M30_DEG")]
    ThetaM30Deg,
    #[serde(rename = "THETA_30_DEG")]
    #[strum(to_string = "THETA_30_DEG")]
    Theta30Deg,
    #[serde(rename = "THETA_20DEG_YAW_200DEG")]
    #[strum(to_string = "THETA_20DEG_YAW_200DEG")]
    Theta20DegYaw200Deg,
    #[serde(rename = "THETA_20DEG_YAW_M200DEG")]
    #[strum(to_string = "THETA_20DEG_YAW_M200DEG")]
    Theta20DegYawM200Deg,
    Turnaround,
    TurnaroundGodown,
    YawShake,
    YawDance,
    PhiDance,
    ThetaDance,
    VzDance,
    Wave,
    PhiThetaMixed,
    DoublePhiThetaMixed,
    AnimMayday,
}

/// LED pattern the vehicle can play
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Led {
    BlinkGreenRed,
    BlinkGreen,
    BlinkRed,
    BlinkOrange,
    SnakeGreenRed,
    Fire,
    Standard,
    Red,
    Green,
    RedSnake,
    Blank,
    RightMissile,
    LeftMissile,
    DoubleMissile,
    FrontLeftGreenOthersRed,
    FrontRightGreenOthersRed,
    RearRightGreenOthersRed,
    RearLeftGreenOthersRed,
    LeftGreenRightRed,
    LeftRedRightGreen,
    BlinkStandard,
}

/// Camera feed layout selectable on the vehicle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoChannel {
    HorizontalOnly,
    VerticalOnly,
    VerticalInHorizontal,
    HorizontalInVertical,
}

/// Why a binding string (or typed construction) was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    #[error("unknown input key '{0}'")]
    UnknownInputKey(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),

    #[error("unknown LED pattern '{0}'")]
    UnknownLed(String),

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{command} needs {expected} fields, found {found}")]
    MissingFields {
        command: Command,
        expected: usize,
        found: usize,
    },

    #[error("{command} takes {expected} fields, found {found}")]
    TrailingFields {
        command: Command,
        expected: usize,
        found: usize,
    },

    #[error("{0} cannot be built without its payload")]
    MissingPayload(Command),
}

/// Errors raised by parsing or dispatching a binding
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Malformed binding '{input}': {reason}")]
    Malformed {
        input: String,
        reason: MalformedReason,
    },

    #[error("Vehicle I/O failure: {0}")]
    VehicleIo(#[from] std::io::Error),
}

impl BindingError {
    pub(crate) fn malformed(input: impl Into<String>, reason: MalformedReason) -> Self {
        BindingError::Malformed {
            input: input.into(),
            reason,
        }
    }

    /// Check if this error came from the string format (as opposed to the vehicle)
    pub fn is_malformed(&self) -> bool {
        matches!(self, BindingError::Malformed { .. })
    }

    /// The rejection reason, if this is a format error
    pub fn malformed_reason(&self) -> Option<&MalformedReason> {
        match self {
            BindingError::Malformed { reason, .. } => Some(reason),
            BindingError::VehicleIo(_) => None,
        }
    }
}
