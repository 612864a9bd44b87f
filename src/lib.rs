//! ASRock ASR LED/Polychrome RGB controller.
//!
//! Exposes every ASRock motherboard lighting revision through one generic controller: a fixed
//! catalog of effect modes, a zone/LED layout read from the hardware and the operations pushing
//! colors and modes back to it. Talking to the bus is left to an [`Adapter`] implementation.

pub mod adapter;
pub mod catalog;
pub mod color;
pub mod controller;
pub mod error;
pub mod mode;
pub mod topology;

pub use crate::adapter::{Adapter, AdapterError, AdapterResult, Variant, ZoneSlot};
pub use crate::catalog::{ModeCatalog, STATIC_MODE_INDEX};
pub use crate::color::RgbColor;
pub use crate::controller::{Controller, DeviceType};
pub use crate::error::{Error, Result, Target};
pub use crate::mode::{ColorMode, Mode, ModeFlags, SpeedRange};
pub use crate::topology::{Led, Topology, Zone, ZoneKind};
