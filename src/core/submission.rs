use crate::config::schema::FormSchema;
use crate::config::FormConfig;
use crate::domain::model::{FieldKind, FormFieldSet, SubmissionOutcome};
use crate::domain::ports::SubmissionTransport;
use crate::utils::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

/// Every non-attachment field as a flat `name -> string` object, in schema order.
pub fn build_payload(schema: &FormSchema, fields: &FormFieldSet) -> Map<String, Value> {
    let mut payload = Map::new();
    for spec in schema.fields() {
        if spec.kind == FieldKind::Attachment {
            continue;
        }
        payload.insert(
            spec.name.clone(),
            Value::String(fields.get(&spec.name).to_string()),
        );
    }

    if let Some(attachment) = fields.attachment() {
        // 附件目前只做大小檢查，不上傳
        tracing::debug!(
            "Attachment '{}' ({} bytes) is not transmitted",
            attachment.file_name,
            attachment.size_bytes
        );
    }

    payload
}

/// POSTs the payload as JSON to a fixed endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Self::new(config.endpoint(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, payload: &Map<String, Value>) -> SubmissionOutcome {
        tracing::debug!("Sending leave request to: {}", self.endpoint);

        let response = match self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Failed to send form data: {}", e);
                return SubmissionOutcome::NetworkError(e.to_string());
            }
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return SubmissionOutcome::HttpError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
        }

        match response.json::<Value>().await {
            Ok(body) => {
                tracing::debug!("Server response: {}", body);
                SubmissionOutcome::Success(body)
            }
            Err(e) => {
                // 成功狀態但回應不是 JSON，視同連線失敗
                tracing::error!("❌ Failed to read server response: {}", e);
                SubmissionOutcome::NetworkError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Attachment;
    use httpmock::prelude::*;

    #[test]
    fn test_payload_skips_attachment_and_keeps_empty_fields() {
        let schema = FormSchema::leave_request();
        let mut fields = FormFieldSet::new();
        fields.set("full_name", "Ada");
        fields.set_attachment(Some(Attachment::new("scan.pdf", 42)));

        let payload = build_payload(&schema, &fields);
        assert_eq!(payload.len(), 8);
        assert!(!payload.contains_key("attachment"));
        assert_eq!(payload["full_name"], Value::String("Ada".to_string()));
        assert_eq!(payload["reason"], Value::String(String::new()));
    }

    #[test]
    fn test_payload_keys_follow_field_order() {
        let schema = FormSchema::leave_request();
        let payload = build_payload(&schema, &FormFieldSet::new());

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "full_name",
                "student_id",
                "email",
                "leave_type",
                "start_date",
                "end_date",
                "total_days",
                "reason",
            ]
        );
        let body = serde_json::to_string(&payload).unwrap();
        assert!(body.starts_with("{\"full_name\":\"\",\"student_id\""));
    }

    #[tokio::test]
    async fn test_success_status_with_json_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/leave")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"full_name": "Ada"}));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 1}));
        });

        let transport = HttpTransport::new(server.url("/leave"), Duration::from_secs(5)).unwrap();
        let mut payload = Map::new();
        payload.insert("full_name".to_string(), Value::String("Ada".to_string()));

        let outcome = transport.submit(&payload).await;
        api_mock.assert();
        assert_eq!(outcome, SubmissionOutcome::Success(serde_json::json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/leave");
            then.status(503);
        });

        let transport = HttpTransport::new(server.url("/leave"), Duration::from_secs(5)).unwrap();
        let outcome = transport.submit(&Map::new()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::HttpError {
                status: 503,
                reason: "Service Unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_network_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/leave");
            then.status(200).body("<html>ok</html>");
        });

        let transport = HttpTransport::new(server.url("/leave"), Duration::from_secs(5)).unwrap();
        let outcome = transport.submit(&Map::new()).await;
        assert!(matches!(outcome, SubmissionOutcome::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_stalled_server_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(serde_json::json!({"id": 1}));
        });

        let transport =
            HttpTransport::new(server.url("/slow"), Duration::from_millis(200)).unwrap();
        let outcome = transport.submit(&Map::new()).await;
        assert!(matches!(outcome, SubmissionOutcome::NetworkError(_)));
    }
}
