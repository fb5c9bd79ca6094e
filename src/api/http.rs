//! Implements the `Backend` trait over HTTP with `reqwest`.

use crate::api::types::{
    AccountNumberResponse, BulkSaveRequest, CategoriesResponse, DeleteRequest, ErrorBody,
    SearchResponse, SuccessResponse,
};
use crate::api::{Backend, CategoryEntry, SearchRecord, SingleEntryForm};
use crate::config::Endpoint;
use crate::error::ApiError;
use crate::model::{Transaction, TransactionType};
use crate::search::SearchQuery;
use crate::{Config, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, trace};
use url::Url;

/// The header carrying the anti-forgery token on state-changing requests.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Talks to the ledger backend's JSON endpoints. Endpoint URLs are resolved from the `Config`
/// once, at construction.
pub struct HttpBackend {
    client: reqwest::Client,
    urls: HashMap<Endpoint, Url>,
    csrf_token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let mut urls = HashMap::new();
        for endpoint in Endpoint::ALL {
            urls.insert(endpoint, config.endpoint_url(endpoint)?);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            urls,
            csrf_token: config.csrf_token().map(str::to_string),
        })
    }

    fn url(&self, endpoint: Endpoint) -> std::result::Result<Url, ApiError> {
        self.urls
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| ApiError::Transport(format!("No URL configured for {endpoint}")))
    }

    /// Adds the CSRF header when a token is configured.
    fn guarded(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn save_bulk(&self, transactions: &[Transaction]) -> std::result::Result<(), ApiError> {
        let url = self.url(Endpoint::SaveBulk)?;
        debug!("Saving {} transactions to {url}", transactions.len());
        let response = self
            .guarded(self.client.post(url))
            .json(&BulkSaveRequest { transactions })
            .send()
            .await?;
        read_success(response).await
    }

    async fn save_single(&self, form: &SingleEntryForm) -> std::result::Result<(), ApiError> {
        let url = self.url(Endpoint::SaveSingle)?;
        debug!("Saving a single {} entry to {url}", form.cash_side);
        let response = self
            .guarded(self.client.post(url))
            .form(form)
            .send()
            .await?;
        // The form endpoint answers with a redirect to the list, so any success status will do.
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(server_error(response).await)
        }
    }

    async fn search(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<Vec<SearchRecord>, ApiError> {
        let url = self.url(Endpoint::Search)?;
        let response = self
            .client
            .get(url)
            .query(&query.query_pairs())
            .send()
            .await?;
        let body: SearchResponse = read_json(response).await?;
        Ok(body.transactions)
    }

    async fn categories(
        &self,
        ty: TransactionType,
    ) -> std::result::Result<Vec<CategoryEntry>, ApiError> {
        let url = self.url(Endpoint::Categories)?;
        let response = self
            .client
            .get(url)
            .query(&[("type", ty.to_string())])
            .send()
            .await?;
        let body: CategoriesResponse = read_json(response).await?;
        Ok(body.categories)
    }

    async fn delete(&self, ids: &[String]) -> std::result::Result<(), ApiError> {
        let url = self.url(Endpoint::Delete)?;
        debug!("Deleting {} transactions", ids.len());
        let response = self
            .guarded(self.client.post(url))
            .json(&DeleteRequest { ids })
            .send()
            .await?;
        read_success(response).await
    }

    async fn check_account_number(&self, acc_num: &str) -> std::result::Result<bool, ApiError> {
        let url = self.url(Endpoint::CheckAccountNumber)?;
        let response = self
            .client
            .get(url)
            .query(&[("acc_num", acc_num)])
            .send()
            .await?;
        let body: AccountNumberResponse = read_json(response).await?;
        Ok(body.is_taken)
    }

    async fn export(&self, year: i32, month: u32) -> std::result::Result<Vec<u8>, ApiError> {
        let url = self.url(Endpoint::Export)?;
        let response = self
            .client
            .get(url)
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Interprets a `{"success": bool, "error": ..}` response. Non-2xx statuses are failures whose
/// body is inspected for an `error` field.
async fn read_success(response: Response) -> std::result::Result<(), ApiError> {
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }
    let body: SuccessResponse = read_json(response).await?;
    if body.success {
        Ok(())
    } else {
        Err(ApiError::Server {
            status: None,
            message: body.error,
        })
    }
}

async fn read_json<T>(response: Response) -> std::result::Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }
    let text = response.text().await?;
    trace!("Response body: {text}");
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Builds the error for a non-2xx response, picking up the body's `error` field if it has one.
async fn server_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .and_then(|body| body.error);
    ApiError::Server {
        status: Some(status),
        message,
    }
}
