pub mod controller;
pub mod frame;

pub use controller::{AimController, FrameSink, RenderError};
pub use frame::{RenderFrame, RenderSettings};
