//! Delivery drivers as reported by the driver-availability collaborator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub vehicle: String,
    pub available: bool,
    #[serde(default)]
    pub current_orders: u32,
}

impl Driver {
    pub fn new(name: impl Into<String>, vehicle: impl Into<String>, available: bool, current_orders: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            vehicle: vehicle.into(),
            available,
            current_orders,
        }
    }
}

/// Envelope returned by the driver listing: `{success, drivers}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRoster {
    pub success: bool,
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

impl DriverRoster {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self {
            success: true,
            drivers,
        }
    }

    /// Splits the roster into `(available, unavailable)`, preserving order.
    pub fn partition(&self) -> (Vec<&Driver>, Vec<&Driver>) {
        self.drivers.iter().partition(|d| d.available)
    }
}
