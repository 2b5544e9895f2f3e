// src/api/laundry.rs

//! Laundry status endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::SiteMachines;
use crate::services::status::{speech, status_messages};

use super::SharedState;

/// Query parameters naming a laundry site.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    location: Option<String>,
}

impl LocationQuery {
    /// The requested location id, or the configured default.
    fn resolve(self, state: &SharedState) -> String {
        self.location
            .unwrap_or_else(|| state.config.laundry.default_location.clone())
    }
}

/// `GET /laundry_locations` — the full village/site directory as nested
/// `[name, [[site, locationId], ...]]` pairs.
pub async fn locations(
    State(state): State<SharedState>,
) -> Result<Json<Vec<(String, Vec<(String, String)>)>>> {
    let villages = state.directory.all_sites().await?;

    let listing = villages
        .into_iter()
        .map(|village| {
            let sites = village
                .sites
                .into_iter()
                .map(|site| (site.name, site.location_id))
                .collect();
            (village.name, sites)
        })
        .collect();

    Ok(Json(listing))
}

/// `GET|POST /fulfillment` — availability summary shaped for the voice
/// assistant.
pub async fn fulfillment(
    State(state): State<SharedState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Value>> {
    let location = query.resolve(&state);
    let machines = state.laundry.fetch(&location).await?;
    let messages = status_messages(&machines);

    Ok(Json(fulfillment_body(&speech(&messages))))
}

/// `GET|POST /raw_status` — machine-by-machine status plus the summary
/// sentences.
pub async fn raw_status(
    State(state): State<SharedState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Value>> {
    let location = query.resolve(&state);
    let machines = state.laundry.fetch(&location).await?;
    let messages = status_messages(&machines);

    Ok(Json(json!({
        "machines": machine_rows(&machines),
        "messages": messages,
    })))
}

/// Voice assistant prompt envelope.
fn fulfillment_body(speech: &str) -> Value {
    json!({
        "prompt": {
            "override": false,
            "firstSimple": {
                "speech": speech,
            },
        },
    })
}

/// Flatten machines into `[type, title, time, available]` rows, washers
/// before dryers.
fn machine_rows(machines: &SiteMachines) -> Vec<Value> {
    machines
        .all()
        .map(|m| json!([m.kind.as_str(), m.title, m.time, m.is_available()]))
        .collect()
}
