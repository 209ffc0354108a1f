//! Configuration planners.
//!
//! A planner compares an observed state with a desired one and returns the
//! minimal ordered list of configuration-mode commands that converges them.
//! Planners never touch the device; [`Device`](crate::Device) issues the
//! plans inside `configure terminal`.

mod interface;
mod vlan;

pub use interface::plan_interface_update;
pub use vlan::plan_vlan_update;
