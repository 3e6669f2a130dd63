use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A monitoring agent as returned by `GET /agents`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub agent_id: i64,
    #[serde(default)]
    pub agent_name: String,
    /// Agent fields this client does not model (`agentType`, `countryId`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentList {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// An HTTP server test definition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpServerTest {
    pub test_id: i64,
    #[serde(default)]
    pub test_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub interval: Option<u64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestList {
    #[serde(default)]
    pub tests: Vec<HttpServerTest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    pub agent_id: i64,
}

/// Request body for `POST /tests/http-server`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestRequest {
    pub test_name: String,
    #[serde(rename = "type")]
    pub test_type: String,
    pub url: String,
    pub interval: u64,
    pub enabled: bool,
    pub agents: Vec<AgentRef>,
}

/// One test execution snapshot. Every measurement is optional; absent
/// fields stay absent through a serialize round trip. Timings and sizes
/// are kept as raw JSON numbers since the API does not guarantee they
/// are integral.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_size: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cipher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,

    /// Payload keys this client does not model, kept so the raw response
    /// survives the report round trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full results payload from `GET /test-results/{id}/http-server`,
/// ordered most recent first
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    #[serde(default)]
    pub results: Vec<ResultEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestResults {
    /// The most recent entry, when one exists
    pub fn latest(&self) -> Option<&ResultEntry> {
        self.results.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_entry_defaults_absent_fields() {
        let entry: ResultEntry = serde_json::from_value(json!({
            "responseCode": 200,
            "totalTime": 512
        }))
        .unwrap();

        assert_eq!(entry.response_code, Some(200));
        assert_eq!(entry.total_time, Some(Number::from(512u64)));
        assert!(entry.dns_time.is_none());
        assert!(entry.health_score.is_none());
        assert!(entry.agent.is_none());
    }

    #[test]
    fn result_entry_accepts_fractional_timings() {
        let raw = json!({
            "dnsTime": 12.5,
            "totalTime": 142,
            "throughput": 183500.75
        });

        let entry: ResultEntry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.dns_time.as_ref().and_then(Number::as_f64), Some(12.5));
        assert_eq!(entry.total_time.as_ref().and_then(Number::as_u64), Some(142));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn agent_keeps_unmodeled_keys() {
        let raw = json!({
            "agentId": 42,
            "agentName": "Frankfurt",
            "agentType": "Cloud",
            "countryId": "DE"
        });

        let agent: Agent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(agent.agent_id, 42);
        assert_eq!(agent.extra["agentType"], json!("Cloud"));

        let back = serde_json::to_value(&agent).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn empty_results_list_keeps_its_key() {
        let raw = json!({
            "results": [],
            "_links": {"self": {"href": "https://api.example.com/x"}}
        });

        let payload: TestResults = serde_json::from_value(raw.clone()).unwrap();
        assert!(payload.results.is_empty());

        let back = serde_json::to_value(&payload).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn results_payload_round_trips_unknown_keys() {
        let raw = json!({
            "results": [{"responseCode": 200, "probeDetail": {"kind": "http"}}],
            "_links": {"self": {"href": "https://api.example.com/x"}}
        });

        let payload: TestResults = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(payload.results.len(), 1);
        assert!(payload.extra.contains_key("_links"));

        let back = serde_json::to_value(&payload).unwrap();
        assert_eq!(back, raw);
    }
}
