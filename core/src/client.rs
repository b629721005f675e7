//! Stateless HTTP request builder for the Canvas API.
//!
//! # Design
//! `CanvasClient` holds only configuration and carries no mutable state
//! between calls. `build` turns any `Endpoint` into an `HttpRequest`;
//! `build_cursor` does the same for a page cursor. Neither touches the
//! network, so the request side of every endpoint is deterministic and
//! testable without a server.

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::pagination::Cursor;
use crate::params::Params;

/// Builds `HttpRequest` values for endpoints against one Canvas instance.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    config: ClientConfig,
}

impl CanvasClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate the descriptor and assemble method, URL, headers and body.
    pub fn build<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<HttpRequest, ApiError> {
        endpoint.validate()?;

        let mut query = endpoint.query();
        if let Some(user_id) = &self.config.as_user_id {
            query.push("as_user_id", user_id);
        }
        let url = self.url_for(&endpoint.path(), &query);
        self.assemble(endpoint, url)
    }

    /// Same request as `build`, sent to the cursor's URL instead of the
    /// descriptor's own path and query.
    pub fn build_cursor<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
        cursor: &Cursor,
    ) -> Result<HttpRequest, ApiError> {
        endpoint.validate()?;

        let url = url::Url::parse(cursor.url())
            .map_err(|e| ApiError::InvalidCursor(format!("{cursor}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidCursor(cursor.to_string()));
        }
        self.assemble(endpoint, url.into())
    }

    pub fn url_for(&self, path: &str, query: &Params) -> String {
        let mut url = format!("{}/{}", self.config.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        url
    }

    fn assemble<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
        url: String,
    ) -> Result<HttpRequest, ApiError> {
        let body = endpoint.body()?;

        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(token) = &self.config.access_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if let Some(content_type) = body.content_type() {
            headers.push(("content-type".to_string(), content_type.to_string()));
        }

        Ok(HttpRequest {
            method: endpoint.method(),
            url,
            headers,
            body: body.encode()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Body;
    use crate::http::HttpMethod;
    use crate::validation::{ValidationError, Validator};

    struct Probe {
        id: String,
        search: Option<String>,
        form: Option<String>,
    }

    impl Endpoint for Probe {
        type Output = serde_json::Value;

        fn method(&self) -> HttpMethod {
            if self.form.is_some() {
                HttpMethod::Post
            } else {
                HttpMethod::Get
            }
        }

        fn path_template(&self) -> &'static str {
            "probes/{id}"
        }

        fn path_params(&self) -> Vec<(&'static str, String)> {
            vec![("id", self.id.clone())]
        }

        fn query(&self) -> Params {
            let mut params = Params::new();
            params.push_opt("search_term", self.search.as_deref());
            params
        }

        fn body(&self) -> Result<Body, ApiError> {
            Ok(match &self.form {
                Some(name) => {
                    let mut params = Params::new();
                    params.push("probe[name]", name);
                    Body::Form(params)
                }
                None => Body::Empty,
            })
        }

        fn validate(&self) -> Result<(), ValidationError> {
            Validator::new().require("id", &self.id).finish()
        }
    }

    fn probe(id: &str) -> Probe {
        Probe {
            id: id.to_string(),
            search: None,
            form: None,
        }
    }

    fn client() -> CanvasClient {
        CanvasClient::new(ClientConfig::new("https://canvas.example.edu/api/v1/").with_token("t0k"))
    }

    #[test]
    fn build_get_produces_absolute_url_and_auth() {
        let req = client().build(&probe("3")).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://canvas.example.edu/api/v1/probes/3");
        assert_eq!(req.header("authorization"), Some("Bearer t0k"));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert!(req.header("content-type").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_appends_encoded_query() {
        let mut p = probe("3");
        p.search = Some("intro to rust".to_string());
        let req = client().build(&p).unwrap();
        assert_eq!(
            req.url,
            "https://canvas.example.edu/api/v1/probes/3?search_term=intro+to+rust"
        );
    }

    #[test]
    fn build_form_sets_content_type_and_body() {
        let mut p = probe("3");
        p.form = Some("Probe A".to_string());
        let req = client().build(&p).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(req.body.as_deref(), Some("probe%5Bname%5D=Probe+A"));
    }

    #[test]
    fn invalid_descriptor_fails_before_building() {
        let err = client().build(&probe("")).unwrap_err();
        match err {
            ApiError::Validation(v) => assert!(v.names_field("id")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn no_token_means_no_authorization_header() {
        let client = CanvasClient::new(ClientConfig::new("https://canvas.example.edu/api/v1"));
        let req = client.build(&probe("3")).unwrap();
        assert!(req.header("authorization").is_none());
    }

    #[test]
    fn masquerade_appends_as_user_id() {
        let client = CanvasClient::new(
            ClientConfig::new("https://canvas.example.edu/api/v1").with_as_user_id("42"),
        );
        let mut p = probe("3");
        p.search = Some("x".to_string());
        let req = client.build(&p).unwrap();
        assert_eq!(
            req.url,
            "https://canvas.example.edu/api/v1/probes/3?search_term=x&as_user_id=42"
        );
    }

    #[test]
    fn cursor_replaces_url_but_keeps_method_and_headers() {
        let cursor = Cursor::new("https://canvas.example.edu/api/v1/probes/3?page=2&per_page=10");
        let req = client().build_cursor(&probe("3"), &cursor).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, cursor.url());
        assert_eq!(req.header("authorization"), Some("Bearer t0k"));
    }

    #[test]
    fn cursor_does_not_repeat_as_user_id() {
        let client = CanvasClient::new(
            ClientConfig::new("https://canvas.example.edu/api/v1").with_as_user_id("42"),
        );
        let cursor = Cursor::new(
            "https://canvas.example.edu/api/v1/probes/3?as_user_id=42&page=2&per_page=10",
        );
        let req = client.build_cursor(&probe("3"), &cursor).unwrap();
        assert_eq!(req.url, cursor.url());
        assert_eq!(req.url.matches("as_user_id").count(), 1);
    }

    #[test]
    fn relative_or_foreign_cursor_is_rejected() {
        for raw in ["probes/3?page=2", "ftp://canvas.example.edu/probes"] {
            let err = client()
                .build_cursor(&probe("3"), &Cursor::new(raw))
                .unwrap_err();
            assert!(matches!(err, ApiError::InvalidCursor(_)), "{raw}");
        }
    }
}
