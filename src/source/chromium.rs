use async_trait::async_trait;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    handler::viewport::Viewport,
    page::Page,
};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::{PortError, error::Result, source::PageDriver};

const VIEWPORT_WIDTH: u32 = 1200;
const VIEWPORT_HEIGHT: u32 = 800;

/// A [`PageDriver`] backed by a locally launched Chromium.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches Chromium and opens a blank page with a 1200x800 viewport.
    ///
    /// The CDP event handler runs on its own task until [`shutdown`] is
    /// called.
    ///
    /// [`shutdown`]: ChromiumDriver::shutdown
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .viewport(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
                ..Default::default()
            });
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(PortError::Browser)?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(PortError::browser)?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(PortError::browser(e));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Closes the browser and stops the event handler.
    pub async fn shutdown(mut self) -> Result<()> {
        let closed = self.browser.close().await.map_err(PortError::browser);
        let _ = self.browser.wait().await;
        self.handler.abort();
        closed.map(|_| ())
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(PortError::browser)?
            .into_value::<T>()
            .map_err(PortError::browser)
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(PortError::browser)?;
        Ok(())
    }

    async fn has_selector(&self, selector: &str) -> Result<bool> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(PortError::browser)?;
        Ok(!elements.is_empty())
    }

    async fn scroll_height(&self, container: &str) -> Result<f64> {
        let selector = serde_json::to_string(container)?;
        self.eval(format!(
            "document.querySelector({}).scrollHeight",
            selector
        ))
        .await
    }

    async fn scroll_by(&self, container: &str, delta: f64) -> Result<()> {
        let selector = serde_json::to_string(container)?;
        self.page
            .evaluate(format!(
                "document.querySelector({}).scrollBy(0, {})",
                selector, delta
            ))
            .await
            .map_err(PortError::browser)?;
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        self.page.content().await.map_err(PortError::browser)
    }
}
