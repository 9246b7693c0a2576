//! HTTP transport
//!
//! `RecordTransport` over the NocoDB v2 records endpoints:
//!
//! - `GET    {base}/api/v2/tables/{table}/records`
//! - `GET    {base}/api/v2/tables/{table}/records/{id}`
//! - `POST | PATCH | DELETE {base}/api/v2/tables/{table}/records`

use std::time::Duration;

use async_trait::async_trait;
use noco_core::{ClientConfig, ConfigError, NocoError, NocoResult, Scalar};
use noco_queries::params::WHERE;
use noco_queries::ParameterSet;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::executor::QueryExecutor;
use crate::transport::RecordTransport;

const RECORDS_PATH: [&str; 3] = ["api", "v2", "tables"];

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> NocoResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NocoError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base(&self) -> NocoResult<Url> {
        Url::parse(self.config.base_url()).map_err(|e| {
            NocoError::Config(ConfigError::InvalidValue {
                key: "api_url".to_string(),
                message: e.to_string(),
            })
        })
    }

    fn url_with_segments(&self, segments: &[&str]) -> NocoResult<Url> {
        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|_| {
                NocoError::Config(ConfigError::InvalidValue {
                    key: "api_url".to_string(),
                    message: "cannot be used as a base".to_string(),
                })
            })?
            .pop_if_empty()
            .extend(RECORDS_PATH.iter().chain(segments));
        Ok(url)
    }

    pub fn records_url(&self, table: &str) -> NocoResult<Url> {
        self.url_with_segments(&[table, "records"])
    }

    pub fn record_url(&self, table: &str, id: &Scalar) -> NocoResult<Url> {
        let id = id.to_string();
        self.url_with_segments(&[table, "records", &id])
    }

    /// List URL. `limit`, `offset` and `sort` are form-encoded; `where` is
    /// appended as given so its `(col,op,val)~and(...)` syntax survives.
    pub fn list_url(&self, table: &str, params: &ParameterSet) -> NocoResult<Url> {
        let mut url = self.records_url(table)?;

        let pairs = params.encoded_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        if let Some(where_clause) = params.raw_where() {
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => {
                    format!("{}&{}={}", existing, WHERE, where_clause)
                }
                _ => format!("{}={}", WHERE, where_clause),
            };
            url.set_query(Some(&query));
        }

        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> NocoResult<Value> {
        let attempts = self.config.retry_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.send_once(method.clone(), url.clone(), body).await {
                Err(err) if err.is_retryable() && attempt < attempts => {
                    tracing::warn!(
                        %method,
                        %url,
                        attempt,
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, method: Method, url: Url, body: Option<&Value>) -> NocoResult<Value> {
        tracing::debug!(%method, %url, "sending request");

        let (header, value) = self.config.auth_scheme.header(&self.config.api_token);
        let mut request = self.client.request(method, url).header(header, value);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NocoError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NocoError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(NocoError::remote(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RecordTransport for HttpTransport {
    async fn list_records(&self, table: &str, params: &ParameterSet) -> NocoResult<Value> {
        let url = self.list_url(table, params)?;
        self.send(Method::GET, url, None).await
    }

    async fn get_record(&self, table: &str, id: &Scalar) -> NocoResult<Value> {
        let url = self.record_url(table, id)?;
        self.send(Method::GET, url, None).await
    }

    async fn create_records(&self, table: &str, payload: Value) -> NocoResult<Value> {
        let url = self.records_url(table)?;
        self.send(Method::POST, url, Some(&payload)).await
    }

    async fn update_records(&self, table: &str, payload: Value) -> NocoResult<Value> {
        let url = self.records_url(table)?;
        self.send(Method::PATCH, url, Some(&payload)).await
    }

    async fn delete_records(&self, table: &str, payload: Value) -> NocoResult<Value> {
        let url = self.records_url(table)?;
        self.send(Method::DELETE, url, Some(&payload)).await
    }
}

impl QueryExecutor<HttpTransport> {
    /// Executor talking HTTP to the configured deployment
    pub fn from_config(config: ClientConfig) -> NocoResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noco_core::AuthScheme;
    use noco_queries::{QueryBuilder, QueryCompiler, WhereCompiler};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    type Heads = Arc<Mutex<Vec<String>>>;

    /// Serve a fixed response on a local port, one request per connection.
    /// Returns the base URL and the request heads received so far.
    async fn serve_fixed(status: &'static str, body: &'static str) -> (String, Heads) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let heads = Arc::new(Mutex::new(Vec::new()));
        let received = heads.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                received
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).into_owned());

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), heads)
    }

    fn request_line(head: &str) -> &str {
        head.lines().next().unwrap_or_default()
    }

    fn transport() -> HttpTransport {
        HttpTransport::new(ClientConfig::new("https://noco.example.com/", "token")).unwrap()
    }

    #[test]
    fn test_records_url() {
        let url = transport().records_url("m_leads").unwrap();
        assert_eq!(
            url.as_str(),
            "https://noco.example.com/api/v2/tables/m_leads/records"
        );
    }

    #[test]
    fn test_record_url() {
        let url = transport().record_url("m_leads", &Scalar::Int(12)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://noco.example.com/api/v2/tables/m_leads/records/12"
        );
    }

    #[test]
    fn test_list_url_keeps_where_verbatim() {
        let query = QueryBuilder::table("leads")
            .where_eq("status", "active")
            .where_group(|g| g.where_op("age", ">", 18).or_where_op("age", "<", 10))
            .order_by_desc("age")
            .order_by_asc("name")
            .limit(10)
            .offset(0)
            .build();
        let params = WhereCompiler.build_params(&query);

        let url = transport().list_url("leads", &params).unwrap();
        assert_eq!(
            url.query(),
            Some(
                "limit=10&offset=0&sort=-age%2Cname\
                 &where=(status,eq,active)~and((age,gt,18)~or(age,lt,10))"
            )
        );
    }

    #[test]
    fn test_list_url_without_params() {
        let url = transport()
            .list_url("leads", &ParameterSet::default())
            .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_list_url_where_only() {
        let params = ParameterSet {
            where_clause: Some("(Id,eq,1)".to_string()),
            ..Default::default()
        };
        let url = transport().list_url("leads", &params).unwrap();
        assert_eq!(url.query(), Some("where=(Id,eq,1)"));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = HttpTransport::new(ClientConfig::new("ftp://noco.example.com", "token"))
            .unwrap_err();
        assert!(matches!(err, NocoError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = ClientConfig::new("http://127.0.0.1:1", "token").with_retry(2, 1);
        let transport = HttpTransport::new(config).unwrap();

        let err = transport
            .list_records("leads", &ParameterSet::default())
            .await
            .unwrap_err();
        assert!(matches!(err, NocoError::Network(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_retried_then_surfaced() {
        let (base, heads) = serve_fixed("503 Service Unavailable", r#"{"msg":"down"}"#).await;
        let config = ClientConfig::new(base, "secret").with_retry(3, 1);
        let transport = HttpTransport::new(config).unwrap();

        let query = QueryBuilder::table("leads")
            .where_eq("a", 1)
            .or_where("b", 2)
            .build();
        let params = WhereCompiler.build_params(&query);

        let err = transport.list_records("leads", &params).await.unwrap_err();
        match err {
            NocoError::RemoteApi { status_code, body } => {
                assert_eq!(status_code, 503);
                assert_eq!(body, r#"{"msg":"down"}"#);
            }
            other => panic!("expected remote error, got {:?}", other),
        }

        let heads = heads.lock().unwrap();
        assert_eq!(heads.len(), 3);
        for head in heads.iter() {
            assert_eq!(
                request_line(head),
                "GET /api/v2/tables/leads/records?where=(a,eq,1)~or(b,eq,2) HTTP/1.1"
            );
            assert!(head.to_lowercase().contains("xc-token: secret"));
        }
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (base, heads) = serve_fixed("400 Bad Request", r#"{"msg":"bad where"}"#).await;
        let config = ClientConfig::new(base, "secret")
            .with_auth_scheme(AuthScheme::Bearer)
            .with_retry(3, 1);
        let transport = HttpTransport::new(config).unwrap();

        let err = transport
            .get_record("leads", &Scalar::Int(9))
            .await
            .unwrap_err();
        assert!(matches!(err, NocoError::RemoteApi { status_code: 400, .. }));
        assert!(!err.is_retryable());

        let heads = heads.lock().unwrap();
        assert_eq!(heads.len(), 1);
        assert_eq!(
            request_line(&heads[0]),
            "GET /api/v2/tables/leads/records/9 HTTP/1.1"
        );
        let head = heads[0].to_lowercase();
        assert!(head.contains("authorization: bearer secret"));
        assert!(!head.contains("xc-token"));
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let body = r#"{"list":[{"Id":1}],"pageInfo":{"totalRows":1}}"#;
        let (base, heads) = serve_fixed("200 OK", body).await;
        let transport = HttpTransport::new(ClientConfig::new(base, "secret")).unwrap();

        let response = transport
            .list_records("leads", &ParameterSet::probe(None))
            .await
            .unwrap();
        assert_eq!(response["pageInfo"]["totalRows"], 1);

        let heads = heads.lock().unwrap();
        assert_eq!(
            request_line(&heads[0]),
            "GET /api/v2/tables/leads/records?limit=1&offset=0 HTTP/1.1"
        );
    }
}
