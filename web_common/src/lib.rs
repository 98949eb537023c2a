//! Shared API types for the SupaMenu admin console.
//!
//! This crate provides the types exchanged with the restaurant backend over
//! its REST API. All types are WASM-compatible so the browser client and the
//! command-line tools can share them.
//!
//! # Architecture
//!
//! - `web_common` - Backend DTOs (restaurants, menu items, auth, dashboard)
//! - `supamenu` - Wizard core, API services and transport
//!
//! Both `web_app` and `admin_cli` depend on both crates directly.
//!
//! # Usage
//!
//! ```rust
//! use web_common::{RestaurantDto, RestaurantType, CuisineType, MenuCategory};
//! ```

mod auth;
mod dashboard;
mod models;
mod responses;
mod restaurants;

pub use auth::*;
pub use dashboard::*;
pub use models::*;
pub use responses::*;
pub use restaurants::*;
