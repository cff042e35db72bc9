//! Read-only lookup clients for sibling pitstop services.

use pitstop_core::{catalog::ServiceItem, person::Person};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{Error, Result, http_client};

/// Fetch one JSON record; `404` decodes to `None`.
async fn get_optional<T: DeserializeOwned>(
  client: &Client,
  url: String,
) -> Result<Option<T>> {
  let resp = client.get(&url).send().await?;

  match resp.status() {
    StatusCode::NOT_FOUND => Ok(None),
    status if status.is_success() => Ok(Some(resp.json().await?)),
    status => Err(Error::Status { status, url }),
  }
}

/// Async HTTP client for the people service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PeopleClient {
  client:   Client,
  base_url: String,
}

impl PeopleClient {
  /// `base_url` is the service root, e.g. `http://localhost:8080`.
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    Ok(Self {
      client:   http_client()?,
      base_url: base_url.into().trim_end_matches('/').to_owned(),
    })
  }

  /// `GET /api/people/{id}`
  pub async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let url = format!("{}/api/people/{id}", self.base_url);
    get_optional(&self.client, url).await
  }
}

/// Async HTTP client for the catalog service.
#[derive(Clone)]
pub struct CatalogClient {
  client:   Client,
  base_url: String,
}

impl CatalogClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    Ok(Self {
      client:   http_client()?,
      base_url: base_url.into().trim_end_matches('/').to_owned(),
    })
  }

  /// `GET /api/catalog/service/id/{id}`
  pub async fn get_service_item(&self, id: i64) -> Result<Option<ServiceItem>> {
    let url = format!("{}/api/catalog/service/id/{id}", self.base_url);
    get_optional(&self.client, url).await
  }
}
