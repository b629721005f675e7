//! The request descriptor contract every endpoint implements.
//!
//! # Design
//! A descriptor is plain data: path parameters as fields, plus optional
//! query and body groups. The trait exposes each part of the request
//! separately so `CanvasClient` can assemble them uniformly and tests can
//! inspect each part in isolation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::validation::ValidationError;

/// Request payload of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Form(Params),
    Json(serde_json::Value),
}

impl Body {
    /// Serialize a typed payload into a JSON body.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Body::Json)
            .map_err(ApiError::Serialization)
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Empty => None,
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
            Body::Json(_) => Some("application/json"),
        }
    }

    /// Wire form of the body; `None` when there is nothing to send.
    pub fn encode(&self) -> Result<Option<String>, ApiError> {
        match self {
            Body::Empty => Ok(None),
            Body::Form(params) => Ok(Some(params.encode())),
            Body::Json(value) => serde_json::to_string(value)
                .map(Some)
                .map_err(ApiError::Serialization),
        }
    }
}

/// One configured call to a Canvas endpoint.
pub trait Endpoint {
    /// Shape of a successful response body.
    type Output: DeserializeOwned;

    fn method(&self) -> HttpMethod;

    /// Path relative to the API root, with `{name}` placeholders.
    fn path_template(&self) -> &'static str;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn query(&self) -> Params {
        Params::new()
    }

    fn body(&self) -> Result<Body, ApiError> {
        Ok(Body::Empty)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn path(&self) -> String {
        resolve_path(self.path_template(), &self.path_params())
    }
}

/// Characters a value may not carry raw inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Replace every `{name}` in `template` with the matching parameter value,
/// percent-encoded as a single path segment.
///
/// The template is scanned once, so substituted values are never expanded
/// again. Placeholders without a parameter are left in place.
pub fn resolve_path(template: &str, params: &[(&str, String)]) -> String {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => path.extend(utf8_percent_encode(value, PATH_SEGMENT)),
            None => path.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    path.push_str(rest);
    path
}

/// Owner of a context-scoped resource; the first two path segments of
/// endpoints such as `courses/{course_id}/folders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Course(String),
    Group(String),
    User(String),
    Account(String),
    Section(String),
}

impl Context {
    pub fn segment(&self) -> &'static str {
        match self {
            Context::Course(_) => "courses",
            Context::Group(_) => "groups",
            Context::User(_) => "users",
            Context::Account(_) => "accounts",
            Context::Section(_) => "sections",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Context::Course(id)
            | Context::Group(id)
            | Context::User(id)
            | Context::Account(id)
            | Context::Section(id) => id,
        }
    }

    /// `context` and `context_id` path parameters.
    pub fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("context", self.segment().to_string()),
            ("context_id", self.id().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_replaces_every_occurrence() {
        let path = resolve_path(
            "courses/{x}/sections/{x}/{y}",
            &[("x", "42".to_string())],
        );
        assert_eq!(path, "courses/42/sections/42/{y}");
    }

    #[test]
    fn resolve_path_leaves_other_segments() {
        let path = resolve_path(
            "courses/{course_id}/assignments/{id}",
            &[("course_id", "7".to_string()), ("id", "99".to_string())],
        );
        assert_eq!(path, "courses/7/assignments/99");
    }

    #[test]
    fn resolve_path_keeps_values_inside_their_segment() {
        let cases = [
            ("sis_section_id:FALL/01", "sections/sis_section_id:FALL%2F01"),
            ("5?as_user_id=1", "sections/5%3Fas_user_id=1"),
            ("week 1#notes", "sections/week%201%23notes"),
            ("100%", "sections/100%25"),
        ];
        for (id, expected) in cases {
            assert_eq!(resolve_path("sections/{id}", &[("id", id.to_string())]), expected);
        }
    }

    #[test]
    fn resolve_path_does_not_expand_substituted_values() {
        let path = resolve_path(
            "courses/{course_id}/assignments/{id}",
            &[("course_id", "{id}".to_string()), ("id", "44".to_string())],
        );
        assert_eq!(path, "courses/%7Bid%7D/assignments/44");
    }

    #[test]
    fn resolve_path_tolerates_unclosed_brace() {
        let path = resolve_path("courses/{id}/odd{", &[("id", "3".to_string())]);
        assert_eq!(path, "courses/3/odd{");
    }

    #[test]
    fn context_expands_to_segment_and_id() {
        let ctx = Context::Group("12".to_string());
        let path = resolve_path("{context}/{context_id}/pages", &ctx.path_params());
        assert_eq!(path, "groups/12/pages");
    }

    #[test]
    fn form_body_encodes_with_content_type() {
        let mut params = Params::new();
        params.push("name", "Section A");
        let body = Body::Form(params);
        assert_eq!(body.content_type(), Some("application/x-www-form-urlencoded"));
        assert_eq!(body.encode().unwrap().as_deref(), Some("name=Section+A"));
    }

    #[test]
    fn empty_body_has_no_payload() {
        assert_eq!(Body::Empty.encode().unwrap(), None);
        assert_eq!(Body::Empty.content_type(), None);
    }
}
