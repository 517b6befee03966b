//! # Source Extractor
//!
//! Loads the source playlist page in a browser, scrolls the track container
//! until every lazily rendered row exists, and reads the rows back as an
//! ordered list of [`SourceTrack`].
//!
//! The browser itself sits behind the [`PageDriver`] trait so the scroll and
//! extraction logic can run against an in-memory page. [`chromium`] provides
//! the real implementation.
//!
//! ## Scrolling
//!
//! The page only renders rows once they scroll into view, so the container
//! grows while it is being scrolled. Every tick re-reads the container's
//! scroll height before comparing it with the distance covered so far;
//! reading it once up front would stop short of rows loaded later.

pub mod chromium;

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tokio::time::{Instant, sleep};

use crate::{PortError, error::Result, types::SourceTrack, utils, warning};

/// CSS selectors and timings describing the source page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Element whose presence marks the page as ready; also the scroll target.
    pub container: String,
    pub row: String,
    pub title: String,
    pub artist: String,
    pub scroll_step: f64,
    pub scroll_interval: Duration,
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            container: ".page-container".to_string(),
            row: ".songs-list-row--song".to_string(),
            title: ".songs-list-row__song-name".to_string(),
            artist: ".songs-list-row__link".to_string(),
            scroll_step: 500.0,
            scroll_interval: Duration::from_secs(1),
            ready_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// The browser automation capability the extractor drives.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Whether at least one element currently matches `selector`.
    async fn has_selector(&self, selector: &str) -> Result<bool>;

    /// Current `scrollHeight` of the first element matching `container`.
    async fn scroll_height(&self, container: &str) -> Result<f64>;

    async fn scroll_by(&self, container: &str, delta: f64) -> Result<()>;

    /// Serialized HTML of the whole document as currently rendered.
    async fn content(&self) -> Result<String>;

    /// Polls for `selector` until it appears or `timeout` elapses.
    ///
    /// A failed check counts as not ready yet, so a page that keeps failing
    /// ends in [`PortError::PageLoadTimeout`] like one that never renders.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(true) = self.has_selector(selector).await {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PortError::PageLoadTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(poll).await;
        }
    }
}

pub struct Extractor<'a, D: PageDriver> {
    driver: &'a D,
    layout: &'a PageLayout,
}

impl<'a, D: PageDriver> Extractor<'a, D> {
    pub fn new(driver: &'a D, layout: &'a PageLayout) -> Self {
        Self { driver, layout }
    }

    /// Loads `url`, renders every row and returns the tracks in page order.
    ///
    /// # Errors
    ///
    /// - [`PortError::PageLoadTimeout`] if the container never appears
    /// - [`PortError::Browser`] for any failure of the underlying driver
    /// - [`PortError::Configuration`] if a layout selector does not parse
    pub async fn extract(&self, url: &str) -> Result<Vec<SourceTrack>> {
        self.driver.goto(url).await?;
        self.driver
            .wait_for_selector(
                &self.layout.container,
                self.layout.ready_timeout,
                self.layout.poll_interval,
            )
            .await?;

        self.scroll_to_end().await?;

        let html = self.driver.content().await?;
        parse_rows(&html, self.layout)
    }

    /// Scrolls the container in fixed steps until the covered distance
    /// reaches its current height. Returns the number of steps taken.
    pub async fn scroll_to_end(&self) -> Result<usize> {
        let step = self.layout.scroll_step.max(1.0);
        let mut covered = 0.0;
        let mut steps = 0;
        loop {
            sleep(self.layout.scroll_interval).await;

            let height = self.driver.scroll_height(&self.layout.container).await?;
            self.driver.scroll_by(&self.layout.container, step).await?;
            covered += step;
            steps += 1;

            if covered >= height {
                return Ok(steps);
            }
        }
    }
}

/// Reads title/artist pairs out of rendered page HTML.
///
/// Rows without a title element are skipped; rows without an artist element
/// keep an empty artist.
pub fn parse_rows(html: &str, layout: &PageLayout) -> Result<Vec<SourceTrack>> {
    let row_selector = selector(&layout.row)?;
    let title_selector = selector(&layout.title)?;
    let artist_selector = selector(&layout.artist)?;

    let document = Html::parse_document(html);
    let mut tracks = Vec::new();
    let mut skipped = 0;

    for row in document.select(&row_selector) {
        let Some(title) = first_text(&row, &title_selector).filter(|t| !t.is_empty()) else {
            skipped += 1;
            continue;
        };
        let artist = first_text(&row, &artist_selector).unwrap_or_default();
        tracks.push(SourceTrack { title, artist });
    }

    if skipped > 0 {
        warning!("Skipped {} rows without a title", skipped);
    }

    Ok(tracks)
}

fn first_text(row: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|e| utils::collapse_whitespace(&e.text().collect::<String>()))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PortError::Configuration(format!("invalid selector `{}`: {:?}", css, e)))
}
