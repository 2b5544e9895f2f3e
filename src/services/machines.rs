// src/services/machines.rs

//! Machine status scraper.
//!
//! Fetches one site's status page and parses its machine table. The page
//! marks machine rows with a CSS class; each cell's first class name keys
//! its text (`name`, `type`, `status`, `time`). Rows without a class
//! attribute are headers or decoration and are skipped.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Machine, MachineKind, SiteMachines};
use crate::utils::http::fetch_text;

/// Service for scraping a site's machine status page.
pub struct MachineScraper {
    client: Client,
    location_base_url: String,
}

impl MachineScraper {
    /// Create a new machine scraper.
    pub fn new(client: Client, location_base_url: impl Into<String>) -> Self {
        Self {
            client,
            location_base_url: location_base_url.into(),
        }
    }

    /// Fetch and parse all machines for one site.
    ///
    /// Transport failures propagate as hard errors; a malformed row only
    /// drops that row.
    pub async fn fetch(&self, location_id: &str) -> Result<SiteMachines> {
        let url = format!("{}{}", self.location_base_url, location_id);
        log::debug!("Fetching machine status from {url}");

        let body = fetch_text(&self.client, &url).await?;
        let machines = parse_machine_table(&Html::parse_document(&body))?;

        log::info!(
            "Site {location_id}: {} washers, {} dryers",
            machines.washers.len(),
            machines.dryers.len()
        );
        Ok(machines)
    }
}

/// Parse the machine table out of a status page document.
pub fn parse_machine_table(document: &Html) -> Result<SiteMachines> {
    let row_sel = parse_selector("tr[class]")?;
    let cell_sel = parse_selector("td[class]")?;

    let mut machines = SiteMachines::default();

    for row in document.select(&row_sel) {
        let Some(machine) = parse_machine_row(&row, &cell_sel) else {
            continue;
        };

        match machine.kind {
            MachineKind::Washer => machines.washers.push(machine),
            MachineKind::Dryer => machines.dryers.push(machine),
        }
    }

    Ok(machines)
}

/// Parse one classed table row into a machine.
///
/// Returns `None` when a required cell is missing or the type cell names
/// something other than a washer or dryer.
fn parse_machine_row(row: &ElementRef, cell_sel: &Selector) -> Option<Machine> {
    let mut name = None;
    let mut kind = None;
    let mut status = None;
    let mut time = None;

    for cell in row.select(cell_sel) {
        // The first class token keys the field.
        let Some(key) = cell
            .value()
            .attr("class")
            .and_then(|classes| classes.split_whitespace().next())
        else {
            continue;
        };
        let text: String = cell.text().collect();

        match key {
            "name" => name = Some(text),
            "type" => kind = Some(text),
            "status" => status = Some(text),
            "time" => time = Some(text),
            _ => {}
        }
    }

    let kind = MachineKind::from_cell(&kind?)?;
    Some(Machine::new(kind, name?, status?, time?))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_PAGE: &str = r#"
        <html><body><table>
            <tr><th>Machine</th><th>Type</th><th>Status</th><th>Time</th></tr>
            <tr class="even">
                <td class="name">Washer 01</td>
                <td class="type">Washer</td>
                <td class="status">Available</td>
                <td class="time">Available</td>
            </tr>
            <tr class="odd">
                <td class="name">Washer 02</td>
                <td class="type">Washer</td>
                <td class="status">In use</td>
                <td class="time">23 min</td>
            </tr>
            <tr class="even">
                <td class="name">Dryer 01</td>
                <td class="type">Dryer</td>
                <td class="status">Out of order</td>
                <td class="time"></td>
            </tr>
            <tr class="odd">
                <td class="name">Card Reader</td>
                <td class="type">Kiosk</td>
                <td class="status">Online</td>
                <td class="time"></td>
            </tr>
        </table></body></html>
    "#;

    #[test]
    fn parses_classed_rows_and_partitions_by_type() {
        let document = Html::parse_document(STATUS_PAGE);
        let machines = parse_machine_table(&document).unwrap();

        assert_eq!(machines.washers.len(), 2);
        assert_eq!(machines.dryers.len(), 1);

        assert_eq!(machines.washers[0].title, "Washer 01");
        assert!(machines.washers[0].is_available());
        assert_eq!(machines.washers[1].remaining_minutes(), Some(23));
    }

    #[test]
    fn header_rows_without_class_are_skipped() {
        let document = Html::parse_document(STATUS_PAGE);
        let machines = parse_machine_table(&document).unwrap();

        // Only the four classed rows are considered, and the kiosk row is
        // dropped for not being a washer or dryer.
        assert_eq!(machines.len(), 3);
    }

    #[test]
    fn broken_dryer_mirrors_status_into_time() {
        let document = Html::parse_document(STATUS_PAGE);
        let machines = parse_machine_table(&document).unwrap();

        let dryer = &machines.dryers[0];
        assert_eq!(dryer.time, "Out of order");
        assert!(!dryer.is_available());
    }

    #[test]
    fn rows_missing_cells_are_dropped() {
        let html = r#"
            <table><tr class="odd">
                <td class="name">Washer 03</td>
                <td class="type">Washer</td>
            </tr></table>
        "#;
        let machines = parse_machine_table(&Html::parse_document(html)).unwrap();
        assert!(machines.is_empty());
    }

    #[test]
    fn empty_page_yields_no_machines() {
        let machines = parse_machine_table(&Html::parse_document("<html></html>")).unwrap();
        assert!(machines.is_empty());
    }
}
