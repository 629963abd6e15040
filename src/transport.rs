//! HTTP plumbing shared by the online and offline clients.
//!
//! The clients never talk to an HTTP library directly. They go through
//! [`HttpClient`], a base-URL-bound sender built on top of a [`Transport`].
//! Timeouts, proxies and cancellation belong to the transport: configure them
//! on the `reqwest::Client` handed to [`ReqwestTransport::with_client`], or
//! drop the returned future.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use reqwest::{
    Method,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Serialize;
use url::Url;

use crate::{
    error::{Error, Result},
    mask,
};

/// Content type the provider expects on every endpoint
pub const FORM_CONTENT_TYPE: &str =
    "application/x-www-form-urlencoded; application/json; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal contract the clients need from an HTTP stack.
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

pub fn form_headers() -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    map
}

/// Sender bound to one provider host
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
    base_url: String,
    default_headers: HeaderMap,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T, base_url: &str, default_headers: HeaderMap) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Error::InvalidRequest(format!("base url {base_url}: {e}")))?;
        Ok(Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| Error::InvalidRequest(format!("url {raw}: {e}")))
    }

    pub async fn get(&self, path: &str, query: &impl Serialize) -> Result<String> {
        let mut url = self.url(path)?;
        let encoded = encode(query)?;
        url.set_query(Some(&encoded));
        tracing::debug!(path = %url.path(), query = %mask::secure_serializable(query), "RMS GET request");
        self.execute(Method::GET, url, None).await
    }

    pub async fn post_form(&self, path: &str, form: &impl Serialize) -> Result<String> {
        let url = self.url(path)?;
        let body = encode(form)?;
        tracing::debug!(path = %url.path(), data = %mask::secure_serializable(form), "RMS POST request");
        self.execute(Method::POST, url, Some(body)).await
    }

    async fn execute(&self, method: Method, url: Url, body: Option<String>) -> Result<String> {
        let request = HttpRequest {
            method,
            url,
            headers: self.default_headers.clone(),
            body,
        };
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "RMS response");
        if !(200..300).contains(&response.status) {
            return Err(Error::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }
}

fn encode(data: &impl Serialize) -> Result<String> {
    serde_urlencoded::to_string(data)
        .map_err(|e| Error::InvalidRequest(format!("form encoding: {e}")))
}


#[cfg(test)]
mod tests {
    use super::{testing::*, *};

    #[derive(Serialize)]
    struct Query<'a> {
        id: &'a str,
        rdate: &'a str,
    }

    #[tokio::test]
    async fn joins_base_and_path() {
        let transport = MockTransport::new();
        let client = HttpClient::new(
            transport.clone(),
            "https://opa.example.test/RMS/API/MOLOPA/",
            form_headers(),
        )
        .unwrap();
        client.post_form("payment.php", &[("a", "1")]).await.unwrap();
        let client =
            HttpClient::new(transport.clone(), "https://api.example.test/RMS", form_headers())
                .unwrap();
        client
            .get(
                "/API/PSQ/psq-daily.php",
                &Query {
                    id: "M1",
                    rdate: "2022-01-01 16:00:00",
                },
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.as_str(),
            "https://opa.example.test/RMS/API/MOLOPA/payment.php"
        );
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].body.as_deref(), Some("a=1"));
        assert_eq!(requests[0].headers[CONTENT_TYPE], FORM_CONTENT_TYPE);

        assert_eq!(requests[1].method, Method::GET);
        assert_eq!(requests[1].url.path(), "/RMS/API/PSQ/psq-daily.php");
        assert!(requests[1].body.is_none());
        let pairs = query_pairs(&requests[1]);
        assert_eq!(field(&pairs, "rdate"), Some("2022-01-01 16:00:00"));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let transport = MockTransport::new();
        transport.respond(502, "bad gateway");
        let client =
            HttpClient::new(transport, "https://api.example.test/RMS", form_headers()).unwrap();
        let err = client.post_form("x.php", &[("a", "1")]).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpClient::new(MockTransport::new(), "not a url", HeaderMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
