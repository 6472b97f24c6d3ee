//! Shared type definitions.

mod price;
mod status;

pub mod id;

pub use id::{DesignerId, FabricId, OrderId};
pub use price::{CurrencyCode, Price};
pub use status::{Availability, ExperienceLevel, FabricStatus, OrderStatus};
