//! Vehicle command surface
//!
//! The [`Vehicle`] trait is the only boundary the dispatcher calls outward through.
//! Implementations are expected to enqueue the command and return quickly; any
//! error they report is handed back to the caller of the dispatch unchanged.

use crate::types::{Animation, Led, VideoChannel};
use std::fmt;
use std::io;

/// Commands a connected vehicle accepts
pub trait Vehicle {
    fn take_off(&mut self) -> io::Result<()>;

    fn land(&mut self) -> io::Result<()>;

    /// Auto-calibrate level attitude (flat trim)
    fn trim(&mut self) -> io::Result<()>;

    fn clear_emergency_signal(&mut self) -> io::Result<()>;

    fn play_animation(&mut self, animation: Animation, duration_ms: i32) -> io::Result<()>;

    fn play_led(&mut self, led: Led, frequency_hz: f32, duration_ms: i32) -> io::Result<()>;

    fn select_video_channel(&mut self, channel: VideoChannel) -> io::Result<()>;
}

impl<V: Vehicle + ?Sized> Vehicle for &mut V {
    fn take_off(&mut self) -> io::Result<()> {
        (**self).take_off()
    }

    fn land(&mut self) -> io::Result<()> {
        (**self).land()
    }

    fn trim(&mut self) -> io::Result<()> {
        (**self).trim()
    }

    fn clear_emergency_signal(&mut self) -> io::Result<()> {
        (**self).clear_emergency_signal()
    }

    fn play_animation(&mut self, animation: Animation, duration_ms: i32) -> io::Result<()> {
        (**self).play_animation(animation, duration_ms)
    }

    fn play_led(&mut self, led: Led, frequency_hz: f32, duration_ms: i32) -> io::Result<()> {
        (**self).play_led(led, frequency_hz, duration_ms)
    }

    fn select_video_channel(&mut self, channel: VideoChannel) -> io::Result<()> {
        (**self).select_video_channel(channel)
    }
}

impl<V: Vehicle + ?Sized> Vehicle for Box<V> {
    fn take_off(&mut self) -> io::Result<()> {
        (**self).take_off()
    }

    fn land(&mut self) -> io::Result<()> {
        (**self).land()
    }

    fn trim(&mut self) -> io::Result<()> {
        (**self).trim()
    }

    fn clear_emergency_signal(&mut self) -> io::Result<()> {
        (**self).clear_emergency_signal()
    }

    fn play_animation(&mut self, animation: Animation, duration_ms: i32) -> io::Result<()> {
        (**self).play_animation(animation, duration_ms)
    }

    fn play_led(&mut self, led: Led, frequency_hz: f32, duration_ms: i32) -> io::Result<()> {
        (**self).play_led(led, frequency_hz, duration_ms)
    }

    fn select_video_channel(&mut self, channel: VideoChannel) -> io::Result<()> {
        (**self).select_video_channel(channel)
    }
}

/// A single vehicle call with its arguments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VehicleCall {
    TakeOff,
    Land,
    Trim,
    ClearEmergencySignal,
    PlayAnimation {
        animation: Animation,
        duration_ms: i32,
    },
    PlayLed {
        led: Led,
        frequency_hz: f32,
        duration_ms: i32,
    },
    SelectVideoChannel(VideoChannel),
}

impl VehicleCall {
    /// Issue this call against a vehicle
    pub fn apply<V: Vehicle + ?Sized>(self, vehicle: &mut V) -> io::Result<()> {
        match self {
            VehicleCall::TakeOff => vehicle.take_off(),
            VehicleCall::Land => vehicle.land(),
            VehicleCall::Trim => vehicle.trim(),
            VehicleCall::ClearEmergencySignal => vehicle.clear_emergency_signal(),
            VehicleCall::PlayAnimation {
                animation,
                duration_ms,
            } => vehicle.play_animation(animation, duration_ms),
            VehicleCall::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            } => vehicle.play_led(led, frequency_hz, duration_ms),
            VehicleCall::SelectVideoChannel(channel) => vehicle.select_video_channel(channel),
        }
    }
}

impl fmt::Display for VehicleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCall::TakeOff => write!(f, "take_off()"),
            VehicleCall::Land => write!(f, "land()"),
            VehicleCall::Trim => write!(f, "trim()"),
            VehicleCall::ClearEmergencySignal => write!(f, "clear_emergency_signal()"),
            VehicleCall::PlayAnimation {
                animation,
                duration_ms,
            } => write!(f, "play_animation({}, {}ms)", animation, duration_ms),
            VehicleCall::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            } => write!(f, "play_led({}, {}Hz, {}ms)", led, frequency_hz, duration_ms),
            VehicleCall::SelectVideoChannel(channel) => {
                write!(f, "select_video_channel({})", channel)
            }
        }
    }
}

/// In-memory vehicle that records every call it receives
///
/// Used for dry runs and tests. Every call succeeds.
#[derive(Debug, Clone, Default)]
pub struct RecordingVehicle {
    calls: Vec<VehicleCall>,
}

impl RecordingVehicle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> &[VehicleCall] {
        &self.calls
    }

    /// Drain the recorded calls
    pub fn take_calls(&mut self) -> Vec<VehicleCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: VehicleCall) -> io::Result<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl Vehicle for RecordingVehicle {
    fn take_off(&mut self) -> io::Result<()> {
        self.record(VehicleCall::TakeOff)
    }

    fn land(&mut self) -> io::Result<()> {
        self.record(VehicleCall::Land)
    }

    fn trim(&mut self) -> io::Result<()> {
        self.record(VehicleCall::Trim)
    }

    fn clear_emergency_signal(&mut self) -> io::Result<()> {
        self.record(VehicleCall::ClearEmergencySignal)
    }

    fn play_animation(&mut self, animation: Animation, duration_ms: i32) -> io::Result<()> {
        self.record(VehicleCall::PlayAnimation {
            animation,
            duration_ms,
        })
    }

    fn play_led(&mut self, led: Led, frequency_hz: f32, duration_ms: i32) -> io::Result<()> {
        self.record(VehicleCall::PlayLed {
            led,
            frequency_hz,
            duration_ms,
        })
    }

    fn select_video_channel(&mut self, channel: VideoChannel) -> io::Result<()> {
        self.record(VehicleCall::SelectVideoChannel(channel))
    }
}
