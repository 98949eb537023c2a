//! Three-step create-restaurant wizard.

mod controller;
mod session;

pub use controller::*;
pub use session::*;
