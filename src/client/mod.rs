//! Stockast API client
//!
//! This module provides the client for the Stockast stock-information API.
//! Every public method is a thin wrapper over one REST route: it composes
//! the request out of a method, a path under the API prefix, and optional
//! parameters, and hands the response body back as raw JSON without
//! interpreting it. The shared request helper does the rest:
//! GET and DELETE parameters travel as the query string, PUT and POST
//! parameters as the JSON body, and the `Basic` credential is attached
//! whenever the configured provider yields one.

mod builder;

pub use builder::{ClientBuilder, DEFAULT_API_PREFIX, DEFAULT_BASE_URL};

use std::sync::Arc;

use log::debug;
use reqwest::{header, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{basic_authorization, CredentialProvider};
use crate::error::{Error, Result};

/// Query parameters understood by the prediction endpoints
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionParams {
    /// Business days of history to feed the prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    /// Grouping step: `T` (minute), `H` (hourly) or `D` (daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Price the stock was bought at, if the caller owns it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Client for the Stockast stock-information API
///
/// Cheap to clone; every method issues one HTTP request and returns the
/// response body as raw JSON. Build one with [`ClientBuilder`].
#[derive(Clone)]
pub struct Client {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL of the backend, always slash-terminated
    base_url: Url,
    /// Path prefix the API is served under
    api_prefix: String,
    /// Credential source for the `Authorization` header
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl Client {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: Url,
        api_prefix: String,
        credentials: Option<Arc<dyn CredentialProvider>>,
    ) -> Self {
        Self {
            http,
            base_url,
            api_prefix,
            credentials,
        }
    }

    /// The base URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request to an API path and parse the JSON response.
    ///
    /// GET and DELETE send `params` as query parameters; everything else
    /// sends them as the JSON body. Non-success statuses become
    /// [`Error::ServerError`] and an empty body decodes to `Value::Null`.
    async fn request(&self, method: Method, path: &str, params: Option<&Value>) -> Result<Value> {
        let url = self
            .base_url
            .join(&format!("{}{}", self.api_prefix, path))
            .map_err(Error::from)?;

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(params) = params {
            request = if method == Method::GET || method == Method::DELETE {
                request.query(params)
            } else {
                request.json(params)
            };
        }
        if let Some(provider) = &self.credentials {
            if let Some(credentials) = provider.credentials() {
                request = request.header(header::AUTHORIZATION, basic_authorization(&credentials));
            }
        }

        debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| Error::TransportError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::TransportError(format!("Failed to read HTTP response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::ServerError(status.as_u16(), body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Log in with the credentials the caller collected
    pub async fn login(&self, params: Option<&Value>) -> Result<Value> {
        self.request(Method::GET, "login", params).await
    }

    /// List users
    pub async fn list_users(&self, params: Option<&Value>) -> Result<Value> {
        self.request(Method::GET, "users", params).await
    }

    /// Create a user
    pub async fn create_user(&self, user: &Value) -> Result<Value> {
        self.request(Method::POST, "users", Some(user)).await
    }

    /// Fetch a single user
    pub async fn get_user(&self, user_id: u64) -> Result<Value> {
        self.request(Method::GET, &format!("users/{}", user_id), None)
            .await
    }

    /// Update a single user
    pub async fn update_user(&self, user_id: u64, user: &Value) -> Result<Value> {
        self.request(Method::PUT, &format!("users/{}", user_id), Some(user))
            .await
    }

    /// Delete a single user
    pub async fn delete_user(&self, user_id: u64) -> Result<Value> {
        self.request(Method::DELETE, &format!("users/{}", user_id), None)
            .await
    }

    /// List the companies a user follows
    pub async fn list_follows(&self, user_id: u64) -> Result<Value> {
        self.request(Method::GET, &format!("users/{}/follows", user_id), None)
            .await
    }

    /// Follow a company
    pub async fn follow(&self, user_id: u64, symbol: &str) -> Result<Value> {
        let body = serde_json::json!({ "symbol": symbol });
        self.request(
            Method::POST,
            &format!("users/{}/follows", user_id),
            Some(&body),
        )
        .await
    }

    /// Stop following a company
    pub async fn unfollow(&self, user_id: u64, symbol: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &format!("users/{}/follows/{}", user_id, symbol),
            None,
        )
        .await
    }

    /// List companies
    pub async fn list_companies(&self, params: Option<&Value>) -> Result<Value> {
        self.request(Method::GET, "companies", params).await
    }

    /// Register a company
    pub async fn create_company(&self, company: &Value) -> Result<Value> {
        self.request(Method::POST, "companies", Some(company)).await
    }

    /// Fetch a single company by ticker symbol
    pub async fn get_company(&self, symbol: &str) -> Result<Value> {
        self.request(Method::GET, &format!("companies/{}", symbol), None)
            .await
    }

    /// Search historical stock data
    pub async fn stock_history(&self, params: Option<&Value>) -> Result<Value> {
        self.request(Method::GET, "stocks/history", params).await
    }

    /// Search real-time stock data
    pub async fn stock_realtime(&self, params: Option<&Value>) -> Result<Value> {
        self.request(Method::GET, "stocks/realtime", params).await
    }

    /// Run a short-term prediction, optionally scoped to one symbol
    pub async fn predict_short(
        &self,
        symbol: Option<&str>,
        params: Option<&PredictionParams>,
    ) -> Result<Value> {
        self.predict("predict/short", symbol, params).await
    }

    /// Run a long-term prediction, optionally scoped to one symbol
    pub async fn predict_long(
        &self,
        symbol: Option<&str>,
        params: Option<&PredictionParams>,
    ) -> Result<Value> {
        self.predict("predict/long", symbol, params).await
    }

    async fn predict(
        &self,
        base: &str,
        symbol: Option<&str>,
        params: Option<&PredictionParams>,
    ) -> Result<Value> {
        let path = match symbol {
            Some(symbol) => format!("{}/{}", base, symbol),
            None => base.to_string(),
        };
        let params = params.map(serde_json::to_value).transpose()?;
        self.request(Method::GET, &path, params.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> Client {
        ClientBuilder::new()
            .with_base_url(server.uri())
            .with_credentials("someone@example.com", "1234")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_auth_header_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/companies"))
            .and(query_param("sort", "name"))
            .and(header(
                "Authorization",
                "Basic c29tZW9uZUBleGFtcGxlLmNvbToxMjM0",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = json!({ "sort": "name" });
        let value = client.list_companies(Some(&params)).await.unwrap();
        assert_eq!(value, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/7/follows"))
            .and(body_json(json!({ "symbol": "AAPL" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "symbol": "AAPL" })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.follow(7, "AAPL").await.unwrap();
    }

    #[tokio::test]
    async fn test_prediction_params_become_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/predict/short/AMZN"))
            .and(query_param("days", "5"))
            .and(query_param("step", "T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let params = PredictionParams {
            days: Some(5),
            step: Some("T".to_string()),
            cost: None,
        };
        client
            .predict_short(Some("AMZN"), Some(&params))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_requests_without_credentials_omit_the_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stocks/realtime"))
            .and(|request: &wiremock::Request| {
                !request
                    .headers
                    .iter()
                    .any(|(name, _)| name.as_str() == "authorization")
            })
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = ClientBuilder::new()
            .with_base_url(server.uri())
            .build()
            .unwrap();
        client.stock_realtime(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stocks/history"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server);
        match client.stock_history(None).await {
            Err(Error::ServerError(status, _)) => assert_eq!(status, 401),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_response_bodies_decode_to_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let value = client.delete_user(3).await.unwrap();
        assert!(value.is_null());
    }
}
