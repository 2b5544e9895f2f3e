// src/services/directory.rs

//! Site directory scraper.
//!
//! Discovers the village index and each village's sites from linked pages.
//! Both pages follow the same convention: a table cell containing exactly
//! one anchor is a navigation entry, anything else is decoration. Nothing
//! is cached; every call re-scrapes the live pages.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Site, Village};
use crate::utils::http::fetch_text;
use crate::utils::{location_param, normalize_whitespace, resolve_url};

/// Link text of the navigation entry back to the village index, present on
/// every village page and not a site.
const BACK_LINK_TEXT: &str = "Back to Villages";

/// Service for discovering villages and their sites.
pub struct DirectoryScraper {
    client: Client,
    index_url: String,
    max_concurrent: usize,
}

impl DirectoryScraper {
    /// Create a new directory scraper.
    pub fn new(client: Client, index_url: impl Into<String>, max_concurrent: usize) -> Self {
        Self {
            client,
            index_url: index_url.into(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Scrape the top-level index for villages. Sites are left empty.
    pub async fn villages(&self) -> Result<Vec<Village>> {
        let base = Url::parse(&self.index_url)?;
        let body = fetch_text(&self.client, &self.index_url).await?;
        parse_village_links(&Html::parse_document(&body), &base)
    }

    /// Scrape one village page for its sites.
    pub async fn sites(&self, village_url: &str) -> Result<Vec<Site>> {
        let base = Url::parse(village_url)?;
        let body = fetch_text(&self.client, village_url).await?;
        parse_site_links(&Html::parse_document(&body), &base)
    }

    /// Discover every village with its sites, preserving index order.
    pub async fn all_sites(&self) -> Result<Vec<Village>> {
        let villages = self.villages().await?;
        log::info!("Discovered {} villages", villages.len());

        let mut populated = Vec::with_capacity(villages.len());
        let mut village_stream = stream::iter(villages)
            .map(|village| self.populate(village))
            .buffered(self.max_concurrent);

        while let Some(result) = village_stream.next().await {
            populated.push(result?);
        }
        Ok(populated)
    }

    async fn populate(&self, mut village: Village) -> Result<Village> {
        village.sites = self.sites(&village.url).await?;
        log::debug!("Village {}: {} sites", village.name, village.site_count());
        Ok(village)
    }
}

/// Parse village links out of the index page.
pub fn parse_village_links(document: &Html, base: &Url) -> Result<Vec<Village>> {
    let mut villages = Vec::new();

    for (text, href) in cell_links(document)? {
        villages.push(Village {
            name: normalize_whitespace(&text),
            url: resolve_url(base, &href),
            sites: Vec::new(),
        });
    }

    Ok(villages)
}

/// Parse site links out of a village page.
pub fn parse_site_links(document: &Html, base: &Url) -> Result<Vec<Site>> {
    let mut sites = Vec::new();

    for (text, href) in cell_links(document)? {
        if text == BACK_LINK_TEXT {
            continue;
        }

        // Links without a location parameter are not site pages.
        let Some(location_id) = location_param(base, &href) else {
            continue;
        };

        sites.push(Site {
            name: text,
            location_id,
        });
    }

    Ok(sites)
}

/// Collect `(text, href)` for every table cell holding exactly one anchor.
fn cell_links(document: &Html) -> Result<Vec<(String, String)>> {
    let cell_sel = parse_selector("td")?;
    let link_sel = parse_selector("a")?;

    let mut links = Vec::new();

    for cell in document.select(&cell_sel) {
        let anchors: Vec<_> = cell.select(&link_sel).collect();
        if anchors.len() != 1 {
            continue;
        }

        let Some(href) = anchors[0].value().attr("href") else {
            continue;
        };

        let text: String = anchors[0].text().collect();
        links.push((text, href.to_string()));
    }

    Ok(links)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
