//! Time-domain device descriptions
//!
//! This crate defines the hardware side of device compilation: the
//! [`DeviceSpec`] a program is checked against, its operation
//! [`DeviceLayout`], the [`ParameterRange`] of each named gate parameter and
//! the declared [`ModeCapacity`].
//!
//! Specs are loaded from JSON or YAML and validated on load:
//!
//! ```rust
//! use tdm_hal::DeviceSpec;
//!
//! let spec = DeviceSpec::from_json(r#"{
//!     "target": "tdm",
//!     "layout": {"operations": [
//!         {"op": "BSgate", "modes": [1, 0], "args": ["p0"]},
//!         {"op": "MeasureHomodyne", "modes": [0], "args": ["p1"]}
//!     ]},
//!     "gate_parameters": {"p0": [0, [0, 6.283185307179586]], "p1": [0]},
//!     "modes": {"concurrent": 2, "spatial": 1, "temporal": {"max": 100}}
//! }"#).unwrap();
//!
//! assert!(spec.range("p0").unwrap().contains(1.2));
//! ```

pub mod device;
pub mod error;
pub mod range;

pub use device::{DeviceLayout, DeviceSpec, LayoutOperation, ModeCapacity, TemporalCapacity};
pub use error::{HalError, HalResult};
pub use range::{ParameterRange, RANGE_TOLERANCE, RangeItem};
