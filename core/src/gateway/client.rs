// storefront/src/gateway/client.rs

//! HTTP implementation of [`GatewayApi`].

use super::endpoints::Endpoint;
use super::GatewayApi;
use crate::config::StorefrontConfig;
use crate::error::{ApiError, StorefrontError};
use crate::models::{
  BalanceResponse, BankAccount, CreateAccountRequest, CreateOrderRequest, DepositRequest, Order, OrderStatus,
  OrderStatusResponse, Price, UserId,
};
use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{event, instrument, Level};

/// Thin JSON-over-HTTP wrapper around the gateway.
///
/// Every call goes through [`GatewayClient::request`] /
/// [`GatewayClient::request_with_body`], which own URL building, JSON
/// encoding and the mapping of failures onto [`ApiError`].
#[derive(Debug, Clone)]
pub struct GatewayClient {
  base_url: String,
  http: reqwest::Client,
}

impl GatewayClient {
  pub fn new(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
    let http = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .build()
      .map_err(|e| StorefrontError::Config(format!("Failed to build HTTP client: {}", e)))?;
    Ok(Self::with_http_client(&config.base_url, http))
  }

  pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      http,
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Issues a body-less request and decodes the JSON response.
  pub async fn request<T: DeserializeOwned>(&self, method: Method, endpoint: &Endpoint) -> Result<T, ApiError> {
    let url = endpoint.url(&self.base_url);
    let builder = self.http.request(method.clone(), &url);
    self.execute(method, url, builder).await
  }

  /// Issues a request with `body` serialized as JSON and decodes the JSON response.
  pub async fn request_with_body<B, T>(&self, method: Method, endpoint: &Endpoint, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = endpoint.url(&self.base_url);
    let builder = self
      .http
      .request(method.clone(), &url)
      .header(header::CONTENT_TYPE, "application/json")
      .json(body);
    self.execute(method, url, builder).await
  }

  #[instrument(name = "GatewayClient::execute", skip_all, fields(method = %method, url = %url), err(Display))]
  async fn execute<T: DeserializeOwned>(&self, method: Method, url: String, builder: RequestBuilder) -> Result<T, ApiError> {
    let response = match builder.header(header::ACCEPT, "application/json").send().await {
      Ok(response) => response,
      Err(err) if err.is_connect() || err.is_timeout() => {
        event!(Level::WARN, error = %err, "Gateway unreachable.");
        return Err(ApiError::Unreachable {
          url,
          reason: err.to_string(),
        });
      }
      Err(err) => return Err(ApiError::Transport(err)),
    };

    let status = response.status();
    if !status.is_success() {
      // An unreadable body is treated like an unparseable one.
      let body = response.bytes().await.unwrap_or_default();
      let err = ApiError::from_response(status, &body);
      event!(Level::DEBUG, status = status.as_u16(), "Gateway returned an error response.");
      return Err(err);
    }

    event!(Level::TRACE, status = status.as_u16(), "Decoding gateway response.");
    Ok(response.json::<T>().await?)
  }
}

#[async_trait]
impl GatewayApi for GatewayClient {
  async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
    self.request(Method::GET, &Endpoint::UserOrders(user_id)).await
  }

  async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
    self.request_with_body(Method::POST, &Endpoint::Orders, request).await
  }

  async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ApiError> {
    let response: OrderStatusResponse = self
      .request(Method::GET, &Endpoint::OrderStatus(order_id.to_string()))
      .await?;
    Ok(response.status)
  }

  async fn create_account(&self, request: &CreateAccountRequest) -> Result<BankAccount, ApiError> {
    self.request_with_body(Method::POST, &Endpoint::Payments, request).await
  }

  async fn deposit(&self, request: &DepositRequest) -> Result<Price, ApiError> {
    let response: BalanceResponse = self.request_with_body(Method::PUT, &Endpoint::Payments, request).await?;
    Ok(response.balance)
  }

  async fn user_account(&self, user_id: UserId) -> Result<BankAccount, ApiError> {
    self.request(Method::GET, &Endpoint::UserAccounts(user_id)).await
  }

  async fn account_balance(&self, account_id: &str) -> Result<Price, ApiError> {
    let response: BalanceResponse = self
      .request(Method::GET, &Endpoint::AccountBalance(account_id.to_string()))
      .await?;
    Ok(response.balance)
  }
}
