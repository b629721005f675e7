//! `Link` header parsing for paginated list endpoints.
//!
//! Canvas paginates every list endpoint and advertises the neighbouring pages
//! in RFC 8288 `Link` headers:
//!
//! ```text
//! Link: <https://canvas.example.edu/api/v1/courses?page=2&per_page=10>; rel="next",
//!       <https://canvas.example.edu/api/v1/courses?page=1&per_page=10>; rel="first"
//! ```
//!
//! The URLs are opaque: callers hand a `Cursor` back to the dispatcher
//! rather than inspecting or rebuilding page numbers.

use std::fmt;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Opaque reference to one page of a list result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named cursors parsed from a response's `Link` headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub first: Option<Cursor>,
    pub prev: Option<Cursor>,
    pub current: Option<Cursor>,
    pub next: Option<Cursor>,
    pub last: Option<Cursor>,
}

impl Links {
    pub fn from_response(response: &HttpResponse) -> Result<Self, ApiError> {
        Self::from_values(response.header_values("link"))
    }

    /// Parse every `Link` header in `headers`. No header yields empty links.
    pub fn from_headers(headers: &[(String, String)]) -> Result<Self, ApiError> {
        Self::from_values(
            headers
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case("link"))
                .map(|(_, value)| value.as_str()),
        )
    }

    fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Self, ApiError> {
        let mut links = Links::default();
        for value in values {
            links.merge_header(value)?;
        }
        Ok(links)
    }

    /// Parse one `Link` header value.
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let mut links = Links::default();
        links.merge_header(value)?;
        Ok(links)
    }

    pub fn is_empty(&self) -> bool {
        *self == Links::default()
    }

    fn merge_header(&mut self, value: &str) -> Result<(), ApiError> {
        for entry in split_entries(value)? {
            let (url, rels) = parse_entry(entry)?;
            for rel in rels {
                let slot = match rel.to_ascii_lowercase().as_str() {
                    "first" => &mut self.first,
                    "prev" | "previous" => &mut self.prev,
                    "current" => &mut self.current,
                    "next" => &mut self.next,
                    "last" => &mut self.last,
                    _ => continue,
                };
                *slot = Some(Cursor::new(url));
            }
        }
        Ok(())
    }
}

/// Split a header value on the commas that separate entries. Commas inside
/// `<...>` or a quoted parameter belong to the entry.
fn split_entries(value: &str) -> Result<Vec<&str>, ApiError> {
    split_unquoted(value, ',')
}

/// Split on `sep` wherever it occurs outside `<...>` and double quotes.
/// Empty pieces are dropped.
fn split_unquoted(value: &str, sep: char) -> Result<Vec<&str>, ApiError> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            '"' if !in_url => in_quotes = !in_quotes,
            c if c == sep && !in_url && !in_quotes => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if in_url || in_quotes {
        return Err(ApiError::InvalidLinkHeader(format!(
            "unterminated entry in {value:?}"
        )));
    }
    entries.push(&value[start..]);
    Ok(entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// `<url>; rel="a b"; title="x"` into the URL and its relation names.
fn parse_entry(entry: &str) -> Result<(&str, Vec<&str>), ApiError> {
    let malformed = || ApiError::InvalidLinkHeader(format!("malformed entry {entry:?}"));

    let rest = entry.strip_prefix('<').ok_or_else(malformed)?;
    let close = rest.find('>').ok_or_else(malformed)?;
    let url = rest[..close].trim();
    if url.is_empty() {
        return Err(malformed());
    }

    let mut rels = None;
    for param in split_unquoted(&rest[close + 1..], ';')? {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("rel") {
            let value = value.trim().trim_matches('"');
            rels = Some(value.split_whitespace().collect::<Vec<_>>());
        }
    }

    match rels {
        Some(rels) if !rels.is_empty() => Ok((url, rels)),
        _ => Err(ApiError::InvalidLinkHeader(format!(
            "missing rel in entry {entry:?}"
        ))),
    }
}

/// One decoded page together with the cursors around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: T,
    pub links: Links,
}

impl<T> Page<T> {
    pub fn next(&self) -> Option<&Cursor> {
        self.links.next.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(value: &str) -> Vec<(String, String)> {
        vec![("Link".to_string(), value.to_string())]
    }

    #[test]
    fn next_and_prev_are_extracted() {
        let links =
            Links::from_headers(&link(r#"<url2>; rel="next", <url1>; rel="prev""#)).unwrap();
        assert_eq!(links.next, Some(Cursor::new("url2")));
        assert_eq!(links.prev, Some(Cursor::new("url1")));
        assert!(links.first.is_none());
        assert!(links.last.is_none());
    }

    #[test]
    fn missing_header_yields_empty_links() {
        let headers = vec![("content-type".to_string(), "application/json".to_string())];
        let links = Links::from_headers(&headers).unwrap();
        assert!(links.next.is_none());
        assert!(links.prev.is_none());
        assert!(links.is_empty());
    }

    #[test]
    fn canvas_style_header_with_all_relations() {
        let value = concat!(
            r#"<https://canvas.example.edu/api/v1/courses?page=2&per_page=10>; rel="current","#,
            r#"<https://canvas.example.edu/api/v1/courses?page=3&per_page=10>; rel="next","#,
            r#"<https://canvas.example.edu/api/v1/courses?page=1&per_page=10>; rel="prev","#,
            r#"<https://canvas.example.edu/api/v1/courses?page=1&per_page=10>; rel="first","#,
            r#"<https://canvas.example.edu/api/v1/courses?page=5&per_page=10>; rel="last""#,
        );
        let links = Links::parse(value).unwrap();
        assert_eq!(
            links.next.unwrap().url(),
            "https://canvas.example.edu/api/v1/courses?page=3&per_page=10"
        );
        assert_eq!(
            links.last.unwrap().url(),
            "https://canvas.example.edu/api/v1/courses?page=5&per_page=10"
        );
        assert!(links.current.is_some());
        assert!(links.first.is_some());
        assert!(links.prev.is_some());
    }

    #[test]
    fn bare_rel_multiple_names_and_extra_params() {
        let links = Links::parse(r#"<a?x=1,2>; title="one, two"; rel=first; , <b>; rel="prev last""#)
            .unwrap();
        assert_eq!(links.first.unwrap().url(), "a?x=1,2");
        assert_eq!(links.prev.as_ref().unwrap().url(), "b");
        assert_eq!(links.last.unwrap().url(), "b");
    }

    #[test]
    fn semicolons_inside_quoted_params_do_not_split() {
        let links = Links::parse(r#"<a>; title="x; rel=last"; rel="next""#).unwrap();
        assert_eq!(links.next.unwrap().url(), "a");
        assert!(links.last.is_none());

        let err = Links::parse(r#"<a>; title="x; rel=last""#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidLinkHeader(_)));
    }

    #[test]
    fn response_headers_are_read_case_insensitively() {
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("Link".to_string(), r#"<n>; rel="next""#.to_string()),
                ("link".to_string(), r#"<f>; rel="first""#.to_string()),
            ],
            body: "[]".to_string(),
        };
        let links = Links::from_response(&response).unwrap();
        assert_eq!(links.next.unwrap().url(), "n");
        assert_eq!(links.first.unwrap().url(), "f");
    }

    #[test]
    fn unknown_relations_are_ignored() {
        let links = Links::parse(r#"<a>; rel="alternate""#).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn multiple_link_headers_are_merged() {
        let headers = vec![
            ("link".to_string(), r#"<n>; rel="next""#.to_string()),
            ("LINK".to_string(), r#"<l>; rel="last""#.to_string()),
        ];
        let links = Links::from_headers(&headers).unwrap();
        assert_eq!(links.next.unwrap().url(), "n");
        assert_eq!(links.last.unwrap().url(), "l");
    }

    #[test]
    fn malformed_entries_are_errors() {
        for value in [
            r#"url2; rel="next""#,
            r#"<url2; rel="next""#,
            r#"<>; rel="next""#,
            r#"<url2>"#,
            r#"<url2>; rel="#,
            r#"<url2>; rel="next"#,
        ] {
            let err = Links::parse(value).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidLinkHeader(_)),
                "{value}: expected InvalidLinkHeader"
            );
        }
    }
}
