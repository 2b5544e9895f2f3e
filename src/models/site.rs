// src/models/site.rs

//! Village and site directory structures.

use serde::{Deserialize, Serialize};

/// A physical laundry room, keyed by the opaque location id the status
/// page uses in its query string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    /// Display name (e.g. "Bishop")
    pub name: String,

    /// Opaque UUID-like location identifier
    pub location_id: String,
}

/// A named cluster of sites with its own index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Village {
    /// Display name (e.g. "Cerro Vista")
    pub name: String,

    /// URL of the village's site listing page
    pub url: String,

    /// Sites discovered under this village
    #[serde(default)]
    pub sites: Vec<Site>,
}

impl Village {
    /// Count sites under this village.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}
