use std::time::Duration;

use assocsync_core::{AssociationPage, AssociationTransport, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::ClientError;

/// Per-request timeout applied by the underlying HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AssociateRequest<'a> {
    function_arn: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListLambdaFunctionsResponse {
    #[serde(default)]
    lambda_functions: Vec<String>,
    #[serde(default)]
    next_token: Option<String>,
}

/// Transport speaking the control-plane REST API over HTTP.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    request_timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, request_timeout: Duration) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::invalid_base_url(base_url, e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::invalid_base_url(
                base_url,
                "expected an http(s) URL",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
            credentials: None,
            request_timeout,
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    fn instance_url(&self, instance_id: &str, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        // base URL was checked to be a base in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["instance", instance_id, resource]);
        }
        url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let req = self.http.request(method, url).header("Accept", "application/json");
        match &self.credentials {
            Some(credentials) => credentials.apply(req),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, TransportError> {
        let resp = req.send().await.map_err(|e| self.send_error(e))?;
        let status = resp.status();
        trace!(status = status.as_u16(), url = %resp.url(), "Control plane responded");

        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(TransportError::from_http_status(
                status.as_u16(),
                error_message(&body),
            ))
        }
    }

    fn send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                after: self.request_timeout,
            }
        } else {
            TransportError::network(err.to_string())
        }
    }
}

#[async_trait]
impl AssociationTransport for HttpTransport {
    async fn associate(&self, instance_id: &str, function_arn: &str) -> Result<(), TransportError> {
        let url = self.instance_url(instance_id, "lambda-function");
        debug!(instance_id, function_arn, %url, "AssociateLambdaFunction");

        let req = self
            .request(reqwest::Method::PUT, url)
            .json(&AssociateRequest { function_arn });
        self.send(req).await?;
        Ok(())
    }

    async fn disassociate(
        &self,
        instance_id: &str,
        function_arn: &str,
    ) -> Result<(), TransportError> {
        let url = self.instance_url(instance_id, "lambda-function");
        debug!(instance_id, function_arn, %url, "DisassociateLambdaFunction");

        let req = self
            .request(reqwest::Method::DELETE, url)
            .query(&[("functionArn", function_arn)]);
        self.send(req).await?;
        Ok(())
    }

    async fn list_associations(
        &self,
        instance_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<AssociationPage, TransportError> {
        let url = self.instance_url(instance_id, "lambda-functions");
        debug!(instance_id, page_token = ?page_token, max_results, "ListLambdaFunctions");

        let mut req = self
            .request(reqwest::Method::GET, url)
            .query(&[("maxResults", max_results.to_string())]);
        if let Some(token) = page_token {
            req = req.query(&[("nextToken", token)]);
        }

        let body = self
            .send(req)
            .await?
            .text()
            .await
            .map_err(|e| self.send_error(e))?;
        let parsed: ListLambdaFunctionsResponse =
            serde_json::from_str(&body).map_err(|e| TransportError::decode(e.to_string()))?;

        Ok(AssociationPage {
            function_arns: parsed.lambda_functions,
            next_token: parsed.next_token.filter(|t| !t.is_empty()),
        })
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body)
        && let Some(msg) = ["Message", "message"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str))
    {
        return msg.to_string();
    }
    if body.is_empty() {
        "empty response body".to_string()
    } else {
        body.to_string()
    }
}
