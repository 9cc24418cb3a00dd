//! Domain DTOs for the remote API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A resource with a stable identifier inside its collection.
///
/// Only used as a bound on record-list retrieval; it has no runtime role.
pub trait Record {
    fn id(&self) -> &str;
}

/// Version of the remote service, as reported by `/version/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    pub version: String,
}

/// A currency known to the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub decimals: u32,
}

impl Record for Currency {
    fn id(&self) -> &str {
        &self.code
    }
}
