use std::{path::Path, thread, time::Duration};

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::{error::Result, traits::CardDatabase, types::CardRecord};

/// Public Magic: The Gathering API
pub const DEFAULT_API_URL: &str = "https://api.magicthegathering.io/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Largest page the API serves; bigger requests are silently capped
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);
/// Response header carrying the number of matches across all pages
const TOTAL_COUNT_HEADER: &str = "total-count";

#[derive(Debug, Deserialize)]
struct CardsPage {
    #[serde(default)]
    cards: Vec<CardRecord>,
}

/// Blocking client for the `/cards` endpoint of the MTG API.
///
/// A name query returns every printing of every card whose name contains the
/// query, split across pages; all pages are fetched. Paging ends once the
/// `Total-Count` header is reached or, without it, on an empty page.
#[derive(Debug, Clone)]
pub struct MtgApiDatabase {
    client: Client,
    base_url: String,
    page_size: u32,
    max_retries: u32,
    retry_delay: Duration,
}

impl MtgApiDatabase {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Cards requested per page, kept within `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Retry connection failures and timeouts this many times per page
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Base wait before a retry; the n-th retry waits n times this long
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Fetch one page, along with the total match count when the server
    /// reports it
    fn fetch_page(&self, name: &str, page: u32) -> Result<(Vec<CardRecord>, Option<usize>)> {
        let url = format!("{}/cards", self.base_url.trim_end_matches('/'));
        let page = page.to_string();
        let page_size = self.page_size.to_string();
        let mut attempt = 0;

        loop {
            let sent = self.client
                .get(&url)
                .query(&[("name", name), ("page", page.as_str()), ("pageSize", page_size.as_str())])
                .send();

            match sent {
                Ok(response) => {
                    let response = response.error_for_status()?;
                    let total = response
                        .headers()
                        .get(TOTAL_COUNT_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.trim().parse().ok());
                    let body: CardsPage = response.json()?;
                    debug!("Page {} for {:?}: {} cards (total {:?})", page, name, body.cards.len(), total);
                    return Ok((body.cards, total));
                }
                Err(e) if attempt < self.max_retries && (e.is_connect() || e.is_timeout()) => {
                    attempt += 1;
                    warn!("Card database unreachable ({}), retry {}/{}", e, attempt, self.max_retries);
                    thread::sleep(self.retry_delay * attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl CardDatabase for MtgApiDatabase {
    fn lookup_card(&self, name: &str) -> Result<Vec<CardRecord>> {
        let mut cards = Vec::new();

        for page in 1.. {
            let (batch, total) = self.fetch_page(name, page)?;
            if batch.is_empty() {
                break;
            }
            cards.extend(batch);
            // Pages can be shorter than requested before the last one
            if total.is_some_and(|total| cards.len() >= total) {
                break;
            }
        }

        Ok(cards)
    }
}

/// Offline card list, matched the way the API matches names
/// (case-insensitive substring).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    cards: Vec<CardRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CardRecord>),
    Page(CardsPage),
}

impl InMemoryDatabase {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    /// Load a JSON array of cards, or a saved `{"cards": [...]}` API response
    pub fn from_json_str(content: &str) -> Result<Self> {
        let cards = match serde_json::from_str(content)? {
            CatalogFile::List(cards) => cards,
            CatalogFile::Page(page) => page.cards,
        };
        Ok(Self::new(cards))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardDatabase for InMemoryDatabase {
    fn lookup_card(&self, name: &str) -> Result<Vec<CardRecord>> {
        let needle = name.to_lowercase();
        Ok(self.cards
            .iter()
            .filter(|card| card.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
