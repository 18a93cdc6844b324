//! HTTP-backed inventory client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{CatalogProduct, FetchError, InventoryClient, ProductId, Stock};

/// Inventory client talking to a REST inventory service.
///
/// Relative paths are joined onto the base URL; absolute URLs pass through.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
    http: reqwest::Client,
}

impl HttpInventoryClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HashMap::new(),
            timeout: None,
            http: reqwest::Client::new(),
        }
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Bound every request by `timeout`. A timed-out request is a
    /// [`FetchError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);

        let mut request = self.http.get(&url);
        for (key, value) in &self.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(%url, "inventory request");
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "inventory request rejected");
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.get_json(&format!("/stock/{}", id)).await
    }

    async fn product(&self, id: ProductId) -> Result<CatalogProduct, FetchError> {
        self.get_json(&format!("/products/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};

    async fn stock_handler(Path(id): Path<i64>, headers: HeaderMap) -> Response {
        match id {
            1 => Json(Stock::new(ProductId::new(1), 3)).into_response(),
            7 if headers.get("x-store").is_some() => {
                Json(Stock::new(ProductId::new(7), 1)).into_response()
            }
            7 => AxumStatus::UNAUTHORIZED.into_response(),
            500 => AxumStatus::INTERNAL_SERVER_ERROR.into_response(),
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    async fn product_handler(Path(id): Path<i64>) -> Response {
        match id {
            1 => Json(CatalogProduct {
                id: ProductId::new(1),
                title: "Tênis de Caminhada Leve Confortável".to_string(),
                price: 179.9,
                image_url: "https://img.example/1.jpg".to_string(),
            })
            .into_response(),
            2 => (AxumStatus::OK, "not json").into_response(),
            8 => {
                tokio::time::sleep(Duration::from_millis(500)).await;
                AxumStatus::OK.into_response()
            }
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/stock/:id", get(stock_handler))
            .route("/products/:id", get(product_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_url_joining() {
        let client = HttpInventoryClient::new("http://localhost:3333/");
        assert_eq!(client.url("/stock/1"), "http://localhost:3333/stock/1");
        assert_eq!(client.url("https://other/x"), "https://other/x");
    }

    #[tokio::test]
    async fn test_fetch_stock_and_product() {
        let client = HttpInventoryClient::new(spawn_server().await);

        let stock = client.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock, Stock::new(ProductId::new(1), 3));

        let product = client.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.price, 179.9);
    }

    #[tokio::test]
    async fn test_not_found() {
        let client = HttpInventoryClient::new(spawn_server().await);
        let err = client.stock(ProductId::new(42)).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(url) if url.ends_with("/stock/42")));
    }

    #[tokio::test]
    async fn test_server_error() {
        let client = HttpInventoryClient::new(spawn_server().await);
        let err = client.stock(ProductId::new(500)).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let client = HttpInventoryClient::new(spawn_server().await);
        let err = client.product(ProductId::new(2)).await.unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_default_headers_are_sent() {
        let base = spawn_server().await;

        let bare = HttpInventoryClient::new(base.clone());
        let err = bare.stock(ProductId::new(7)).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 401, .. }));

        let client = HttpInventoryClient::new(base).with_default_header("x-store", "rocket");
        assert_eq!(client.stock(ProductId::new(7)).await.unwrap().amount, 1);
    }

    #[tokio::test]
    async fn test_timeout() {
        let client = HttpInventoryClient::new(spawn_server().await)
            .with_timeout(Duration::from_millis(50));
        let err = client.product(ProductId::new(8)).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = HttpInventoryClient::new("http://127.0.0.1:1");
        let err = client.stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
    }
}
