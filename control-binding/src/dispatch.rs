//! Binding dispatch
//!
//! Turns a binding's action into vehicle calls. Every dispatch first resolves the
//! full call sequence (advancing the camera cycle for `VIDEO_CYCLE`), reports one
//! [`DispatchEvent`] to the observer, then issues the calls in order. The first
//! vehicle error stops the sequence and is returned to the caller; nothing is
//! retried.
//!
//! Dispatch takes `&mut ControlBinding`, so a binding can have at most one
//! dispatch in flight. Callers that share bindings across threads wrap them in a
//! `Mutex`.

use crate::binding::{Action, ControlBinding};
use crate::types::{Command, InputKey, Result, VideoChannel};
use crate::vehicle::{Vehicle, VehicleCall};
use std::io;

/// Summary of one dispatch, reported before the vehicle is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEvent {
    pub key: InputKey,
    pub command: Command,
    /// Channel selected, for camera commands
    pub channel: Option<VideoChannel>,
    /// Cycle position after the advance, for `VIDEO_CYCLE`
    pub cycle_index: Option<usize>,
}

/// Receives one event per dispatch, plus the vehicle error if a call fails
pub trait DispatchObserver {
    fn on_dispatch(&mut self, event: &DispatchEvent);

    /// Called with the call that failed, before the error is returned
    fn on_failure(&mut self, _event: &DispatchEvent, _call: &VehicleCall, _error: &io::Error) {}
}

impl<F: FnMut(&DispatchEvent)> DispatchObserver for F {
    fn on_dispatch(&mut self, event: &DispatchEvent) {
        self(event)
    }
}

/// Default observer: events go to the `log` facade at debug level, failures at warn
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl DispatchObserver for LogObserver {
    fn on_dispatch(&mut self, event: &DispatchEvent) {
        match (event.channel, event.cycle_index) {
            (Some(channel), Some(index)) => log::debug!(
                "Sending {} from {} (channel {}, cycle index {})",
                event.command,
                event.key,
                channel,
                index
            ),
            (Some(channel), None) => log::debug!(
                "Sending {} from {} (channel {})",
                event.command,
                event.key,
                channel
            ),
            _ => log::debug!("Sending {} from {}", event.command, event.key),
        }
    }

    fn on_failure(&mut self, event: &DispatchEvent, call: &VehicleCall, error: &io::Error) {
        log::warn!(
            "Vehicle rejected {} for {} on {}: {}",
            call,
            event.command,
            event.key,
            error
        );
    }
}

impl ControlBinding {
    /// Execute this binding's action on the vehicle, logging through [`LogObserver`]
    ///
    /// # Example
    /// ```
    /// use control_binding::{ControlBinding, RecordingVehicle, VehicleCall};
    ///
    /// let mut binding = ControlBinding::parse("PS/RESET/0").unwrap();
    /// let mut vehicle = RecordingVehicle::new();
    /// binding.send_to_drone(&mut vehicle).unwrap();
    ///
    /// assert_eq!(
    ///     vehicle.calls(),
    ///     &[VehicleCall::ClearEmergencySignal, VehicleCall::Trim]
    /// );
    /// ```
    pub fn send_to_drone<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V) -> Result<()> {
        self.send_to_drone_with(vehicle, &mut LogObserver)
    }

    /// Execute this binding's action, reporting the dispatch to `observer`
    pub fn send_to_drone_with<V, O>(&mut self, vehicle: &mut V, observer: &mut O) -> Result<()>
    where
        V: Vehicle + ?Sized,
        O: DispatchObserver + ?Sized,
    {
        let (calls, event) = self.resolve();
        observer.on_dispatch(&event);

        for call in calls {
            if let Err(e) = call.apply(vehicle) {
                observer.on_failure(&event, &call, &e);
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Work out the vehicle calls for the next dispatch
    ///
    /// This is the only place the camera cycle moves.
    fn resolve(&mut self) -> (Vec<VehicleCall>, DispatchEvent) {
        let mut event = DispatchEvent {
            key: self.key(),
            command: self.command(),
            channel: None,
            cycle_index: None,
        };

        let action = *self.action();
        let calls = match action {
            Action::Takeoff => vec![VehicleCall::TakeOff],
            Action::Land => vec![VehicleCall::Land],
            Action::Trim => vec![VehicleCall::Trim],
            Action::ClearEmergency => vec![VehicleCall::ClearEmergencySignal],
            Action::Reset => vec![VehicleCall::ClearEmergencySignal, VehicleCall::Trim],
            Action::PlayAnimation {
                animation,
                duration_ms,
            } => vec![VehicleCall::PlayAnimation {
                animation,
                duration_ms,
            }],
            Action::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            } => vec![VehicleCall::PlayLed {
                led,
                frequency_hz,
                duration_ms,
            }],
            Action::VideoCycle => {
                let cycle = self.camera_cycle_mut();
                let channel = cycle.advance();
                event.channel = Some(channel);
                event.cycle_index = Some(cycle.index());
                vec![VehicleCall::SelectVideoChannel(channel)]
            }
            fixed @ (Action::FrontalCam
            | Action::BottomCam
            | Action::BottomCamSmall
            | Action::FrontalCamSmall) => {
                event.channel = fixed.fixed_channel();
                event
                    .channel
                    .map(VehicleCall::SelectVideoChannel)
                    .into_iter()
                    .collect()
            }
        };

        (calls, event)
    }
}
