#[cfg(feature="http")]
mod reqwest_transport;
#[cfg(feature="http")]
pub use reqwest_transport::*;

mod client_config;
pub use client_config::*;
