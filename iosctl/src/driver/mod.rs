//! Device session layer.
//!
//! A [`Device`] owns one transport and drives it through the IOS login,
//! privilege and capability steps, then runs queries and configuration
//! plans on it. [`DeviceBuilder`] assembles one from a connection URL.

mod builder;
mod credentials;
mod device;
mod facts;
mod options;
mod session;

pub use builder::DeviceBuilder;
pub use credentials::{Credentials, DeviceUrl, Scheme};
pub use device::Device;
pub use facts::{Facts, FactsCollector};
pub use options::{DeviceOptions, FactsOptions};
pub use session::{Capabilities, SessionState};
