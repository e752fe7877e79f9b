//! Control Binding Library
//!
//! Maps one physical controller input (a button or stick) to one action on a
//! remote-controlled quadcopter: take off, land, trim, play an LED pattern or a
//! flight animation, switch camera feed.
//!
//! # Architecture
//!
//! A [`ControlBinding`] has two faces:
//! - The codec face converts it to and from a compact slash-separated string for
//!   preference stores (`CROSS/TAKEOFF/0`, `L1/PLAY_LED/100/RED/2.5/3000`)
//! - The dispatch face translates its action into calls on a [`Vehicle`]; the only
//!   state it keeps is the position of the `VIDEO_CYCLE` camera rotation
//!
//! The library does NOT:
//! - Poll input devices or decide when a binding fires
//! - Manage the vehicle connection
//! - Resolve conflicts between bindings on the same input
//!
//! # Example Usage
//!
//! ```
//! use control_binding::{ControlBinding, InputKey, Led, RecordingVehicle, VehicleCall};
//!
//! // Author a binding and store its string form
//! let binding = ControlBinding::with_led(InputKey::L1, Led::Red, 100, 2.5, 3000).unwrap();
//! let stored = binding.pref_string().to_string();
//! assert_eq!(stored, "L1/PLAY_LED/100/RED/2.5/3000");
//!
//! // Load it back and fire it
//! let mut loaded = ControlBinding::parse(&stored).unwrap();
//! assert_eq!(loaded, binding);
//!
//! let mut vehicle = RecordingVehicle::new();
//! loaded.send_to_drone(&mut vehicle).unwrap();
//! assert_eq!(vehicle.calls().len(), 1);
//! ```

// Public modules
pub mod binding;
pub mod codec;
pub mod dispatch;
pub mod types;
pub mod vehicle;

// Re-export main types for convenience
pub use binding::{Action, CameraCycle, ControlBinding, VIDEO_CYCLE};
pub use dispatch::{DispatchEvent, DispatchObserver, LogObserver};
pub use types::{
    Animation, BindingError, Command, ControlAxis, DroneAxis, InputKey, Led, MalformedReason,
    Result, VideoChannel,
};
pub use vehicle::{RecordingVehicle, Vehicle, VehicleCall};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
