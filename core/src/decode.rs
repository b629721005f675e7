//! Response decoding: status check, then JSON into the endpoint's output type.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::pagination::{Links, Page};

/// Map a non-2xx response to `ApiError::Http`, carrying the raw body.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Decode the whole body as `T`. Either everything decodes or nothing does.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

/// For endpoints whose success body carries nothing worth decoding.
pub fn decode_empty(response: &HttpResponse) -> Result<(), ApiError> {
    check_status(response)
}

/// Decode the body and the `Link` headers of a list response.
pub fn decode_page<T: DeserializeOwned>(response: &HttpResponse) -> Result<Page<T>, ApiError> {
    let items = decode(response)?;
    let links = Links::from_response(response)?;
    Ok(Page { items, links })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
        name: String,
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn array_body_decodes_every_element() {
        let items: Vec<Item> =
            decode(&ok(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"},{"id":3,"name":"c"}]"#))
                .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[1],
            Item {
                id: 2,
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = decode::<Vec<Item>>(&ok(r#"[{"id":1,"name":"a"},"#)).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = decode::<Vec<Item>>(&ok(r#"{"id":1,"name":"a"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
        let err = decode::<Item>(&ok(r#"{"id":"one","name":"a"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn non_success_status_keeps_body() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"errors":[{"message":"The specified resource does not exist."}]}"#
                .to_string(),
        };
        let err = decode::<Item>(&response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(
            err.remote_messages(),
            vec!["The specified resource does not exist.".to_string()]
        );
    }

    #[test]
    fn empty_decode_only_checks_status() {
        assert!(decode_empty(&ok("")).is_ok());
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(matches!(
            decode_empty(&response),
            Err(ApiError::Http { status: 401, .. })
        ));
    }

    #[test]
    fn page_carries_links() {
        let mut response = ok(r#"[{"id":1,"name":"a"}]"#);
        response
            .headers
            .push(("Link".to_string(), r#"<https://x/api/v1/items?page=2>; rel="next""#.to_string()));
        let page: Page<Vec<Item>> = decode_page(&response).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next().unwrap().url(), "https://x/api/v1/items?page=2");
    }
}
