//! txtfire feed client.
//!
//! The feed is an HTML page of `div.cardfire` cards, newest first:
//!
//! ```html
//! <div class="cardfire">
//!   <p>FIRE ALERT! BRGY. HOLY SPIRIT, QUEZON CITY: 1ST ALARM -></p>
//!   <p>As of 10/16/2026 08:15 AM</p>
//! </div>
//! ```

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::Incident;
use crate::error::FetchError;
use crate::utils::clean_text;

pub struct TxtFireSource {
    url: String,
    client: reqwest::Client,
}

impl TxtFireSource {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("firewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<Incident>, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let html = response.text().await?;
        parse_incidents(&html)
    }
}

pub fn parse_incidents(html: &str) -> Result<Vec<Incident>, FetchError> {
    let document = Html::parse_document(html);
    let card_selector =
        Selector::parse("div.cardfire").map_err(|e| FetchError::Parse(e.to_string()))?;
    let paragraph_selector = Selector::parse("p").map_err(|e| FetchError::Parse(e.to_string()))?;

    let cards: Vec<ElementRef> = document.select(&card_selector).collect();
    if cards.is_empty() {
        return Err(FetchError::Parse("no incident cards found".to_string()));
    }

    let card_count = cards.len();
    let mut incidents = Vec::with_capacity(card_count);
    for (index, card) in cards.into_iter().enumerate() {
        let paragraphs: Vec<String> = card
            .select(&paragraph_selector)
            .map(|p| clean_text(&p.text().collect::<String>()))
            .collect();

        match parse_card(&paragraphs) {
            Some(incident) => incidents.push(incident),
            None => warn!("⚠️  Skipping malformed incident card #{}: {:?}", index, paragraphs),
        }
    }

    if incidents.is_empty() {
        return Err(FetchError::Parse(format!(
            "none of {card_count} incident cards could be parsed"
        )));
    }

    debug!("Parsed {} incidents", incidents.len());
    Ok(incidents)
}

fn parse_card(paragraphs: &[String]) -> Option<Incident> {
    let headline = paragraphs.first()?.replace("->", "");
    let (info, alert_type) = headline.rsplit_once(':')?;

    let location = match info.split_once('!') {
        Some((_, rest)) => rest,
        None => info,
    };
    let location = location.replace("FIRE ALERT!", "").trim().to_uppercase();
    let alert_type = alert_type.trim().to_uppercase();

    let reported_at = paragraphs
        .get(1)?
        .split_once("As of ")
        .map(|(_, time)| time.trim().to_uppercase())?;

    if location.is_empty() || alert_type.is_empty() || reported_at.is_empty() {
        return None;
    }

    Some(Incident::new(alert_type, location, reported_at))
}
