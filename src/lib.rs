//! # eos-api - Typed configuration for Arista EOS devices
//!
//! eos-api issues show-commands and configuration commands to EOS devices
//! through eAPI and exposes the results as typed resources.
//!
//! ## Core Concepts
//!
//! - **Connections**: Transports that run ordered command lists on a device
//! - **Nodes**: A device plus its connection; the entry point for entities
//! - **Entities**: Typed views over one configuration area (e.g. [`System`])
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │        Node          │────▶│   Entities (api)     │
//! │ (enable / config)    │     │   - System           │
//! └──────────────────────┘     └──────────────────────┘
//!            │                            │
//!            └─────────────┬──────────────┘
//!                          ▼
//!            ┌──────────────────────────┐
//!            │   Connection (trait)     │
//!            │   - EapiConnection       │
//!            └──────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use eos_api::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::load(None)?;
//!     let node = Node::connect_to("veos01", &config)?;
//!
//!     let system = node.system();
//!     if let Some(resource) = system.get()? {
//!         println!("{} (ip routing: {})", resource.hostname, resource.iprouting);
//!     }
//!
//!     system.set_hostname(Some("spine1"), false)?;
//!     system.set_iprouting(Some(true), false)?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::api::system::{System, SystemResource};
    pub use crate::api::{build_command, CommandMode, Entity};
    pub use crate::config::{Config, ConnectionProfile};
    pub use crate::connection::{
        CommandResult, Connection, ConnectionError, ConnectionResult, EapiConnection, Encoding,
    };
    pub use crate::error::{Error, Result};
    pub use crate::node::Node;
}

/// Configuration entities.
pub mod api;

/// Connection profiles and logging setup.
pub mod config;

/// Device transports.
pub mod connection;

/// Error types.
pub mod error;

/// Device handle.
pub mod node;

pub use api::system::{System, SystemResource};
pub use error::{Error, Result};
pub use node::Node;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
