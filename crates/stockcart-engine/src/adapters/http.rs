//! # HTTP Catalog Client
//!
//! Product and stock lookups against a JSON catalog API.
//!
//! ## Endpoints
//! ```text
//! GET {base}/products/{id}  →  {"id": 1, "title": "...", "image": "...", "price": 179.9}
//! GET {base}/stock/{id}     →  {"id": 1, "amount": 3}
//! ```
//!
//! ## Error Mapping
//! ```text
//! 404                     → LookupError::NotFound
//! other non-2xx status    → LookupError::Unavailable
//! transport / timeout     → LookupError::Unavailable
//! undecodable body        → LookupError::Malformed
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::EngineResult;
use crate::ports::{ProductLookup, StockLookup};
use stockcart_core::{LookupError, Money, Product, ProductId, StockInfo};

/// Catalog API client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    pub fn stock_url(&self, id: ProductId) -> String {
        format!("{}/stock/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        not_found: LookupError,
    ) -> Result<T, LookupError> {
        debug!(url = %url, "Catalog request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found);
        }
        if !status.is_success() {
            return Err(LookupError::Unavailable(format!(
                "{} answered {}",
                url, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::Malformed(e.to_string())
            } else {
                LookupError::Unavailable(e.to_string())
            }
        })
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Product as served by the API. `price` is a JSON number with up to two
/// decimal places.
#[derive(Debug, Deserialize)]
pub struct ProductDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    pub price: serde_json::Number,
}

impl TryFrom<ProductDto> for Product {
    type Error = LookupError;

    fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId::new(dto.id),
            title: dto.title,
            image: dto.image,
            price: Money::parse_decimal(&dto.price.to_string())?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StockDto {
    pub id: u64,
    pub amount: i64,
}

impl From<StockDto> for StockInfo {
    fn from(dto: StockDto) -> Self {
        StockInfo::new(ProductId::new(dto.id), dto.amount)
    }
}

// =============================================================================
// Ports
// =============================================================================

#[async_trait]
impl ProductLookup for ApiClient {
    async fn product(&self, id: ProductId) -> Result<Product, LookupError> {
        let dto: ProductDto = self
            .get_json(&self.product_url(id), LookupError::product_not_found(id))
            .await?;
        Product::try_from(dto)
    }
}

#[async_trait]
impl StockLookup for ApiClient {
    async fn stock(&self, id: ProductId) -> Result<StockInfo, LookupError> {
        let dto: StockDto = self
            .get_json(&self.stock_url(id), LookupError::stock_not_found(id))
            .await?;
        Ok(dto.into())
    }
}
