//! Binance HTTP Client - Signed REST Client with Retries
//!
//! Wraps reqwest with query signing, retries on transient failures,
//! and decoding of Binance error bodies into `ExchangeError`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::auth::{BinanceAuth, API_KEY_HEADER};
use super::types::ApiErrorBody;
use crate::config::ExchangeConfig;
use crate::ports::exchange::ExchangeError;

/// Configuration for the Binance HTTP client.
#[derive(Debug, Clone)]
pub struct BinanceClientConfig {
  /// Base URL, e.g. `https://testnet.binance.vision`.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
  /// `recvWindow` sent with signed requests (ms).
  pub recv_window_ms: u64,
}

impl Default for BinanceClientConfig {
  fn default() -> Self {
    Self::from(&ExchangeConfig::default())
  }
}

impl From<&ExchangeConfig> for BinanceClientConfig {
  fn from(config: &ExchangeConfig) -> Self {
    Self {
      base_url: config.base_url.clone(),
      timeout: Duration::from_millis(config.timeout_ms),
      max_retries: config.max_retries,
      retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
      recv_window_ms: config.recv_window_ms,
    }
  }
}

/// What to do with a response, by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusAction {
  /// Decode the body as the expected type.
  Accept,
  /// Transient: back off and send again.
  Retry,
  /// Exchange rejection: decode `{code, msg}` and stop.
  Reject,
}

fn classify_status(status: StatusCode) -> StatusAction {
  if status.is_success() {
    StatusAction::Accept
  } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
    StatusAction::Retry
  } else {
    StatusAction::Reject
  }
}

/// HTTP client for the Binance spot REST API.
pub struct BinanceClient {
  /// Underlying HTTP client.
  http: Client,
  /// Credentials; only signed endpoints need them.
  auth: Option<Arc<BinanceAuth>>,
  /// Client configuration.
  config: BinanceClientConfig,
}

impl BinanceClient {
  /// Create a new client.
  pub fn new(auth: Option<Arc<BinanceAuth>>, config: BinanceClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(2)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, auth, config })
  }

  /// Unsigned GET, decoded as `T`.
  pub async fn get_public<T: DeserializeOwned>(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<T, ExchangeError> {
    self.execute_with_retry(Method::GET, path, params, false).await
  }

  /// Signed GET, decoded as `T`.
  pub async fn get_signed<T: DeserializeOwned>(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<T, ExchangeError> {
    self.execute_with_retry(Method::GET, path, params, true).await
  }

  /// Signed POST, decoded as `T`.
  pub async fn post_signed<T: DeserializeOwned>(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<T, ExchangeError> {
    self.execute_with_retry(Method::POST, path, params, true).await
  }

  /// Build the request URL; signed requests get `recvWindow`,
  /// `timestamp` and `signature` appended.
  fn build_url(
    &self,
    path: &str,
    params: &[(&str, String)],
    signed: bool,
  ) -> Result<Url, ExchangeError> {
    let base = self.config.base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}{path}"))
      .map_err(|e| ExchangeError::transport(format!("invalid URL {base}{path}: {e}")))?;

    {
      let mut query = url.query_pairs_mut();
      for (key, value) in params {
        query.append_pair(key, value);
      }
      if signed {
        query
          .append_pair("recvWindow", &self.config.recv_window_ms.to_string())
          .append_pair("timestamp", &chrono::Utc::now().timestamp_millis().to_string());
      }
    }

    if signed {
      let auth = self
        .auth
        .as_ref()
        .ok_or_else(|| ExchangeError::new(ExchangeError::UNAUTHORIZED, "API credentials not configured"))?;
      let signature = auth.sign(url.query().unwrap_or_default());
      url.query_pairs_mut().append_pair("signature", &signature);
    }

    Ok(url)
  }

  /// Execute a request with retries on 429, 5xx, and transport errors.
  ///
  /// Any other non-success status is decoded into an `ExchangeError` and
  /// returned without retrying. Signed requests are re-signed per attempt.
  async fn execute_with_retry<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    params: &[(&str, String)],
    signed: bool,
  ) -> Result<T, ExchangeError> {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), path, "Retrying request");
        sleep(delay).await;
      }

      let url = self.build_url(path, params, signed)?;
      let mut request = self.http.request(method.clone(), url);
      if let Some(auth) = &self.auth {
        request = request.header(API_KEY_HEADER, auth.api_key());
      }

      match request.send().await {
        Ok(response) => {
          let status = response.status();
          match classify_status(status) {
            StatusAction::Accept => {
              return response
                .json::<T>()
                .await
                .map_err(|e| ExchangeError::transport(format!("Invalid response body: {e}")));
            }
            StatusAction::Retry if status == StatusCode::TOO_MANY_REQUESTS => {
              warn!(attempt, path, "Rate limited by exchange, backing off");
              last_error = Some(ExchangeError::new(i64::from(status.as_u16()), "Rate limited"));
            }
            StatusAction::Retry => {
              warn!(status = %status, attempt, path, "Server error, retrying");
              last_error = Some(ExchangeError::transport(format!("Server error: {status}")));
            }
            StatusAction::Reject => return Err(Self::decode_rejection(response).await),
          }
        }
        Err(e) => {
          warn!(error = %e, attempt, path, "Request failed");
          last_error = Some(ExchangeError::transport(e.to_string()));
        }
      }
    }

    Err(last_error.unwrap_or_else(|| ExchangeError::transport("Max retries exceeded")))
  }

  /// Turn a 4xx response into an `ExchangeError`.
  async fn decode_rejection(response: Response) -> ExchangeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    parse_rejection(status, &body)
  }
}

/// Decode a Binance `{code, msg}` body, falling back to the raw text.
fn parse_rejection(status: StatusCode, body: &str) -> ExchangeError {
  match serde_json::from_str::<ApiErrorBody>(body) {
    Ok(err) => ExchangeError::new(err.code, err.msg),
    Err(_) => ExchangeError::new(i64::from(status.as_u16()), format!("API error {status}: {body}")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::binance::mock_server::MockServer;
  use crate::adapters::binance::types::AvgPriceResponse;
  use rust_decimal_macros::dec;

  fn fast_retry_client(base_url: &str, max_retries: u32) -> BinanceClient {
    BinanceClient::new(
      None,
      BinanceClientConfig {
        base_url: base_url.to_string(),
        max_retries,
        retry_base_delay: Duration::from_millis(1),
        ..BinanceClientConfig::default()
      },
    )
    .unwrap()
  }

  async fn avg_price(client: &BinanceClient) -> Result<AvgPriceResponse, ExchangeError> {
    client
      .get_public("/api/v3/avgPrice", &[("symbol", "ETHUSDT".to_string())])
      .await
  }

  fn client(auth: Option<Arc<BinanceAuth>>) -> BinanceClient {
    BinanceClient::new(
      auth,
      BinanceClientConfig {
        base_url: "https://testnet.binance.vision/".to_string(),
        ..BinanceClientConfig::default()
      },
    )
    .unwrap()
  }

  #[test]
  fn test_public_url_has_no_signature() {
    let url = client(None)
      .build_url("/api/v3/avgPrice", &[("symbol", "ETHUSDT".to_string())], false)
      .unwrap();
    assert_eq!(url.as_str(), "https://testnet.binance.vision/api/v3/avgPrice?symbol=ETHUSDT");
  }

  #[test]
  fn test_signed_url_signs_full_query() {
    let auth = Arc::new(BinanceAuth::new("key", "secret"));
    let url = client(Some(Arc::clone(&auth)))
      .build_url("/api/v3/order", &[("symbol", "ETHUSDT".to_string())], true)
      .unwrap();

    let query = url.query().unwrap();
    let (unsigned, signature) = query.rsplit_once("&signature=").unwrap();
    assert!(unsigned.starts_with("symbol=ETHUSDT&recvWindow=5000&timestamp="));
    assert_eq!(signature, auth.sign(unsigned));
  }

  #[test]
  fn test_signed_url_without_credentials_fails() {
    let err = client(None)
      .build_url("/api/v3/order", &[], true)
      .unwrap_err();
    assert_eq!(err.code, ExchangeError::UNAUTHORIZED);
  }

  #[test]
  fn test_parse_binance_rejection() {
    let err = parse_rejection(
      StatusCode::BAD_REQUEST,
      r#"{"code":-1013,"msg":"Filter failure: PRICE_FILTER"}"#,
    );
    assert_eq!(err, ExchangeError::new(-1013, "Filter failure: PRICE_FILTER"));
  }

  #[test]
  fn test_parse_unstructured_rejection() {
    let err = parse_rejection(StatusCode::FORBIDDEN, "WAF blocked");
    assert_eq!(err.code, 403);
    assert!(err.message.contains("WAF blocked"));
  }

  #[test]
  fn test_classify_status() {
    assert_eq!(classify_status(StatusCode::OK), StatusAction::Accept);
    assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), StatusAction::Retry);
    assert_eq!(classify_status(StatusCode::INTERNAL_SERVER_ERROR), StatusAction::Retry);
    assert_eq!(classify_status(StatusCode::SERVICE_UNAVAILABLE), StatusAction::Retry);
    assert_eq!(classify_status(StatusCode::BAD_REQUEST), StatusAction::Reject);
    assert_eq!(classify_status(StatusCode::UNAUTHORIZED), StatusAction::Reject);
    assert_eq!(classify_status(StatusCode::FORBIDDEN), StatusAction::Reject);
  }

  #[tokio::test]
  async fn test_transient_statuses_are_retried() {
    let server = MockServer::start(vec![
      (500, ""),
      (429, ""),
      (200, r#"{"mins":5,"price":"1908.10"}"#),
    ])
    .await;

    let avg = avg_price(&fast_retry_client(&server.base_url, 3)).await.unwrap();

    assert_eq!(avg.price, dec!(1908.10));
    assert_eq!(server.requests().len(), 3);
  }

  #[tokio::test]
  async fn test_rejection_is_returned_without_retry() {
    let server = MockServer::start(vec![(
      400,
      r#"{"code":-2010,"msg":"Account has insufficient balance for requested action."}"#,
    )])
    .await;

    let err = avg_price(&fast_retry_client(&server.base_url, 3)).await.unwrap_err();

    assert_eq!(err.code, -2010);
    assert_eq!(server.requests().len(), 1);
  }

  #[tokio::test]
  async fn test_retries_stop_after_max_retries() {
    let server = MockServer::start(vec![(503, "")]).await;

    let err = avg_price(&fast_retry_client(&server.base_url, 2)).await.unwrap_err();

    assert_eq!(err.code, ExchangeError::TRANSPORT);
    assert_eq!(server.requests().len(), 3);
  }

  #[tokio::test]
  async fn test_connection_failure_is_transport_error() {
    // Nothing listens on port 1.
    let err = avg_price(&fast_retry_client("http://127.0.0.1:1", 1)).await.unwrap_err();
    assert_eq!(err.code, ExchangeError::TRANSPORT);
  }
}
