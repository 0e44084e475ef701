use super::ticket::TicketSummary;
use crate::config::Settings;
use crate::error::{Error, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// Anything that can look up a ticket by project and issue id
pub trait TicketSource {
    async fn fetch_ticket(&self, project: &str, issue_id: &str) -> Result<TicketSummary>;
}

#[derive(Clone)]
pub struct JiraClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl JiraClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder().build()?;

        // Normalize the base URL (remove trailing slash)
        let base_url = settings.jira_api_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }
}

impl TicketSource for JiraClient {
    /// Look up `issue_id` in `project` via the JQL search endpoint
    async fn fetch_ticket(&self, project: &str, issue_id: &str) -> Result<TicketSummary> {
        let url = format!("{}/search", self.base_url);
        let jql = format!("project={} AND key = {}", project, issue_id);

        tracing::debug!(%url, %jql, "searching Jira");

        let response = self
            .client
            .get(&url)
            .query(&[("jql", jql.as_str())])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        // A login page instead of JSON means the token was not accepted
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("html"));
        if is_html {
            return Err(Error::AuthenticationSuspected);
        }

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        TicketSummary::from_search_json(&body)
    }
}

/// Pull a readable message out of a Jira error body
fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("errorMessages")
                .and_then(|m| m.get(0))
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| format!("unexpected status {}", status));

    Error::Api(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on loopback and hand back the raw request
    async fn serve_once(
        content_type: &'static str,
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/rest/api/2/", addr), handle)
    }

    // Loopback must not go through any proxy configured in the environment
    fn test_client(url: String) -> JiraClient {
        JiraClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url: url.trim_end_matches('/').to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_ticket_sends_query_and_token() {
        let body = r#"{"issues":[{"key":"PROJ-7","fields":{"summary":"Fix bug","components":[{"name":"Billing"}]}}]}"#;
        let (url, server) = serve_once("application/json;charset=UTF-8", "200 OK", body).await;

        let client = test_client(url);
        let ticket = client.fetch_ticket("PROJ", "PROJ-7").await.unwrap();

        assert_eq!(ticket.key, "PROJ-7");
        assert_eq!(ticket.component, "Billing");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /rest/api/2/search?jql=project%3dproj+and+key+%3d+proj-7 "));
        assert!(request.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_fetch_ticket_html_means_authentication() {
        let (url, server) = serve_once("text/html;charset=UTF-8", "200 OK", "<html>login</html>").await;

        let client = test_client(url);
        let result = client.fetch_ticket("PROJ", "PROJ-7").await;

        assert!(matches!(result, Err(Error::AuthenticationSuspected)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_ticket_empty_issues() {
        let (url, server) = serve_once("application/json", "200 OK", r#"{"issues":[]}"#).await;

        let client = test_client(url);
        let result = client.fetch_ticket("PROJ", "PROJ-7").await;

        assert!(matches!(result, Err(Error::NoIssuesFound)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_ticket_api_error_message() {
        let body = r#"{"errorMessages":["An issue with key 'PROJ-7' does not exist for field 'key'."],"errors":{}}"#;
        let (url, server) = serve_once("application/json", "400 Bad Request", body).await;

        let client = test_client(url);
        let result = client.fetch_ticket("PROJ", "PROJ-7").await;

        match result {
            Err(Error::Api(message)) => assert!(message.contains("does not exist")),
            other => panic!("expected Api error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[test]
    fn test_new_trims_base_url() {
        let settings = Settings {
            api_key: "secret".to_string(),
            jira_api_url: "https://jira.example.com/rest/api/2///".to_string(),
        };
        let client = JiraClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "https://jira.example.com/rest/api/2");
    }

    #[test]
    fn test_api_error_fallback() {
        let err = api_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert_eq!(
            err.to_string(),
            "Jira API error: unexpected status 401 Unauthorized"
        );
    }
}
