//! Where catalog documents come from.

use std::time::Duration;

use crate::{CatalogError, document::CatalogDocument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetchable origin for the catalog document.
///
/// [`CatalogStore`](crate::CatalogStore) is generic over this so tests
/// can load from a canned document instead of the network.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch and validate the full catalog document.
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError>;
}

/// HTTP origin: one GET of a static, versionless document URL.
///
/// No ETags and no partial fetch; a non-success status or an invalid
/// body both surface as a load error.
pub struct HttpCatalogSource {
    http: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        let resp = self.http.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let text = resp.text().await?;
        CatalogDocument::from_json(&text)
    }
}
