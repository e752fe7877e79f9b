// End-to-end behavior of bindings: storage round-trips and dispatch sequences
use control_binding::{
    Action, Animation, BindingError, Command, ControlBinding, InputKey, Led, RecordingVehicle,
    Vehicle, VehicleCall, VideoChannel,
};
use std::io;
use strum::IntoEnumIterator;

/// Vehicle whose every call fails after being counted
struct FailingVehicle {
    attempts: usize,
    kind: io::ErrorKind,
}

impl FailingVehicle {
    fn new(kind: io::ErrorKind) -> Self {
        Self { attempts: 0, kind }
    }

    fn fail(&mut self) -> io::Result<()> {
        self.attempts += 1;
        Err(io::Error::new(self.kind, "link down"))
    }
}

impl Vehicle for FailingVehicle {
    fn take_off(&mut self) -> io::Result<()> {
        self.fail()
    }

    fn land(&mut self) -> io::Result<()> {
        self.fail()
    }

    fn trim(&mut self) -> io::Result<()> {
        self.fail()
    }

    fn clear_emergency_signal(&mut self) -> io::Result<()> {
        self.fail()
    }

    fn play_animation(&mut self, _animation: Animation, _duration_ms: i32) -> io::Result<()> {
        self.fail()
    }

    fn play_led(&mut self, _led: Led, _frequency_hz: f32, _duration_ms: i32) -> io::Result<()> {
        self.fail()
    }

    fn select_video_channel(&mut self, _channel: VideoChannel) -> io::Result<()> {
        self.fail()
    }
}

fn channels(calls: &[VehicleCall]) -> Vec<VideoChannel> {
    calls
        .iter()
        .map(|call| match call {
            VehicleCall::SelectVideoChannel(channel) => *channel,
            other => panic!("expected a channel selection, got {}", other),
        })
        .collect()
}

#[test]
fn test_round_trip_every_plain_binding() {
    for key in InputKey::iter() {
        for command in Command::iter().filter(|c| !c.has_payload()) {
            let binding = ControlBinding::new(key, command, 42).unwrap();
            let parsed = ControlBinding::parse(binding.pref_string()).unwrap();
            assert_eq!(parsed, binding);
            assert_eq!(parsed.camera_cycle_index(), 0);
            assert_eq!(parsed.pref_string(), binding.pref_string());
        }
    }
}

#[test]
fn test_round_trip_every_animation() {
    for animation in Animation::iter() {
        let binding = ControlBinding::with_animation(InputKey::Circle, animation, 5, 1000);
        let parsed = ControlBinding::parse(binding.pref_string()).unwrap();
        assert_eq!(parsed, binding);
        assert_eq!(parsed.animation(), Some(animation));
    }
}

#[test]
fn test_round_trip_every_led() {
    for led in Led::iter() {
        let binding = ControlBinding::with_led(InputKey::R2, led, 0, 0.3, 700).unwrap();
        let parsed = ControlBinding::parse(binding.pref_string()).unwrap();
        assert_eq!(parsed, binding);
        assert_eq!(parsed.led(), Some(led));
    }
}

#[test]
fn test_round_trip_resets_cycle_position() {
    let mut binding = ControlBinding::new(InputKey::Square, Command::VideoCycle, 0).unwrap();
    let mut vehicle = RecordingVehicle::new();
    binding.send_to_drone(&mut vehicle).unwrap();
    binding.send_to_drone(&mut vehicle).unwrap();
    assert_eq!(binding.camera_cycle_index(), 2);

    let reloaded = ControlBinding::parse(&binding.to_string()).unwrap();
    assert_eq!(reloaded.camera_cycle_index(), 0);
    assert_eq!(reloaded, binding);
}

#[test]
fn test_led_parameter_fidelity() {
    let binding = ControlBinding::with_led(InputKey::L1, Led::Red, 100, 2.5, 3000).unwrap();
    let parsed = ControlBinding::parse(binding.pref_string()).unwrap();

    assert_eq!(parsed.key(), InputKey::L1);
    assert_eq!(parsed.delay_ms(), 100);
    assert_eq!(parsed.led(), Some(Led::Red));
    assert_eq!(parsed.frequency_hz(), Some(2.5));
    assert_eq!(parsed.duration_ms(), Some(3000));
}

#[test]
fn test_parse_rejects_bad_strings() {
    for input in [
        "SQUARE/PLAY_LED/0/RED",
        "FOO/TAKEOFF/0",
        "SQUARE/TAKEOFF/notanint",
        "SQUARE/PLAY_ANIMATION/0/WAVE",
        "square/TAKEOFF/0",
        "SQUARE//0",
        "SQUARE/TAKEOFF/2147483648",
        "L1/PLAY_LED/0/RED/NaN/10",
        "L1/PLAY_LED/0/RED/inf/10",
    ] {
        let err = ControlBinding::parse(input).unwrap_err();
        assert!(
            matches!(err, BindingError::Malformed { input: ref got, .. } if got == input),
            "{} should be malformed, got {}",
            input,
            err
        );
    }
}

#[test]
fn test_takeoff_dispatch_is_a_single_call() {
    let mut binding = ControlBinding::parse("CROSS/TAKEOFF/0").unwrap();
    let mut vehicle = RecordingVehicle::new();
    binding.send_to_drone(&mut vehicle).unwrap();
    assert_eq!(vehicle.calls(), &[VehicleCall::TakeOff]);
}

#[test]
fn test_reset_dispatch_order() {
    let mut binding = ControlBinding::new(InputKey::Ps, Command::Reset, 0).unwrap();
    let mut vehicle = RecordingVehicle::new();
    binding.send_to_drone(&mut vehicle).unwrap();
    assert_eq!(
        vehicle.calls(),
        &[VehicleCall::ClearEmergencySignal, VehicleCall::Trim]
    );
}

#[test]
fn test_video_cycle_sequence() {
    let mut binding = ControlBinding::parse("SELECT/VIDEO_CYCLE/0").unwrap();
    let mut vehicle = RecordingVehicle::new();
    let mut indices = Vec::new();
    for _ in 0..5 {
        binding.send_to_drone(&mut vehicle).unwrap();
        indices.push(binding.camera_cycle_index());
    }

    assert_eq!(
        channels(vehicle.calls()),
        vec![
            VideoChannel::VerticalOnly,
            VideoChannel::VerticalInHorizontal,
            VideoChannel::HorizontalInVertical,
            VideoChannel::HorizontalOnly,
            VideoChannel::VerticalOnly,
        ]
    );
    assert_eq!(indices, vec![1, 2, 3, 0, 1]);
}

#[test]
fn test_cycle_state_is_per_binding() {
    let mut first = ControlBinding::parse("L1/VIDEO_CYCLE/0").unwrap();
    let mut second = ControlBinding::parse("R1/VIDEO_CYCLE/0").unwrap();
    let mut vehicle = RecordingVehicle::new();

    first.send_to_drone(&mut vehicle).unwrap();
    first.send_to_drone(&mut vehicle).unwrap();
    second.send_to_drone(&mut vehicle).unwrap();

    assert_eq!(
        channels(vehicle.calls()),
        vec![
            VideoChannel::VerticalOnly,
            VideoChannel::VerticalInHorizontal,
            VideoChannel::VerticalOnly,
        ]
    );
}

#[test]
fn test_fixed_cameras_are_idempotent() {
    let expected = [
        (Command::FrontalCam, VideoChannel::VerticalOnly),
        (Command::BottomCam, VideoChannel::HorizontalOnly),
        (Command::BottomCamSmall, VideoChannel::VerticalInHorizontal),
        (Command::FrontalCamSmall, VideoChannel::HorizontalInVertical),
    ];

    for (command, channel) in expected {
        let mut binding = ControlBinding::new(InputKey::Triangle, command, 0).unwrap();
        let mut vehicle = RecordingVehicle::new();
        binding.send_to_drone(&mut vehicle).unwrap();
        binding.send_to_drone(&mut vehicle).unwrap();

        assert_eq!(channels(vehicle.calls()), vec![channel, channel]);
        assert_eq!(binding.camera_cycle_index(), 0);
    }
}

#[test]
fn test_vehicle_error_passes_through() {
    let mut binding = ControlBinding::parse("CROSS/LAND/0").unwrap();
    let mut vehicle = FailingVehicle::new(io::ErrorKind::BrokenPipe);

    let err = binding.send_to_drone(&mut vehicle).unwrap_err();
    match err {
        BindingError::VehicleIo(io_err) => {
            assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!(io_err.to_string(), "link down");
        }
        other => panic!("expected a vehicle error, got {}", other),
    }
    assert_eq!(vehicle.attempts, 1);
}

#[test]
fn test_reset_stops_at_first_failure() {
    let mut binding = ControlBinding::parse("PS/RESET/0").unwrap();
    let mut vehicle = FailingVehicle::new(io::ErrorKind::TimedOut);

    assert!(binding.send_to_drone(&mut vehicle).is_err());
    assert_eq!(vehicle.attempts, 1);
}

#[test]
fn test_failed_cycle_dispatch_still_advances() {
    let mut binding = ControlBinding::parse("START/VIDEO_CYCLE/0").unwrap();
    let mut failing = FailingVehicle::new(io::ErrorKind::NotConnected);
    assert!(binding.send_to_drone(&mut failing).is_err());
    assert_eq!(binding.camera_cycle_index(), 1);

    let mut vehicle = RecordingVehicle::new();
    binding.send_to_drone(&mut vehicle).unwrap();
    assert_eq!(
        vehicle.calls(),
        &[VehicleCall::SelectVideoChannel(VideoChannel::VerticalInHorizontal)]
    );
}

#[test]
fn test_dispatch_through_trait_object() {
    let mut binding = ControlBinding::from_action(
        InputKey::LeftStick,
        Action::PlayAnimation {
            animation: Animation::Wave,
            duration_ms: 900,
        },
        0,
    )
    .unwrap();
    let mut recorder = RecordingVehicle::new();
    {
        let vehicle: &mut dyn Vehicle = &mut recorder;
        binding.send_to_drone(vehicle).unwrap();
    }
    assert_eq!(
        recorder.calls(),
        &[VehicleCall::PlayAnimation {
            animation: Animation::Wave,
            duration_ms: 900,
        }]
    );
}

#[test]
fn test_negative_timing_round_trips() {
    let binding = ControlBinding::parse("CROSS/TAKEOFF/-100").unwrap();
    assert_eq!(binding.delay_ms(), -100);

    let animation = ControlBinding::with_animation(InputKey::Circle, Animation::Wave, -5, -250);
    let parsed = ControlBinding::parse(animation.pref_string()).unwrap();
    assert_eq!(parsed, animation);
    assert_eq!(parsed.duration_ms(), Some(-250));
}
