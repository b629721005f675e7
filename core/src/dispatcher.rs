//! Turns descriptors into network calls.
//!
//! # Design
//! `Dispatcher` pairs a `CanvasClient` (request building) with a
//! `Transport` (I/O) and the decoder. Each call is one blocking round-trip
//! with no retry; the only state shared between calls is the transport's
//! connection pool, so a `Dispatcher` can be cloned or shared across threads
//! freely.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::client::CanvasClient;
use crate::config::ClientConfig;
use crate::decode::{decode, decode_empty, decode_page};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::{Cursor, Page};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct Dispatcher<T = UreqTransport> {
    client: CanvasClient,
    transport: T,
}

impl Dispatcher<UreqTransport> {
    /// Dispatcher over a pooled `ureq` agent configured from `config`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: CanvasClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &CanvasClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the descriptor and return the raw response, whatever its status.
    pub fn execute<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<HttpResponse, ApiError> {
        let request = self.client.build(endpoint)?;
        self.send(&request)
    }

    /// Send the descriptor and decode a 2xx body into its output type.
    pub fn call<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<E::Output, ApiError> {
        let response = self.execute(endpoint)?;
        decode(&response)
    }

    /// Send the descriptor and only check the status, ignoring any body.
    pub fn call_empty<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<(), ApiError> {
        let response = self.execute(endpoint)?;
        decode_empty(&response)
    }

    /// Like `call`, also returning the cursors from the `Link` headers.
    pub fn call_page<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
    ) -> Result<Page<E::Output>, ApiError> {
        let response = self.execute(endpoint)?;
        decode_page(&response)
    }

    /// Continuation mode: repeat the descriptor's request against `cursor`.
    pub fn call_cursor<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
        cursor: &Cursor,
    ) -> Result<Page<E::Output>, ApiError> {
        let request = self.client.build_cursor(endpoint, cursor)?;
        let response = self.send(&request)?;
        decode_page(&response)
    }

    /// Lazily walk every page of a list endpoint, following `next` cursors.
    pub fn pages<'a, E: Endpoint + ?Sized>(&'a self, endpoint: &'a E) -> Pages<'a, E, T> {
        Pages {
            dispatcher: self,
            endpoint,
            state: PagesState::Start,
        }
    }

    /// Every item of a list endpoint, fetched page by page.
    pub fn collect_all<E, I>(&self, endpoint: &E) -> Result<Vec<I>, ApiError>
    where
        E: Endpoint<Output = Vec<I>> + ?Sized,
        I: DeserializeOwned,
    {
        let mut items = Vec::new();
        for page in self.pages(endpoint) {
            items.extend(page?);
        }
        Ok(items)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending canvas request");
        let response = self.transport.execute(request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "canvas response received"
        );
        Ok(response)
    }
}

enum PagesState {
    Start,
    Next(Cursor),
    Done,
}

/// Iterator returned by [`Dispatcher::pages`]. Yields each page's items; an
/// error is yielded once and ends the iteration.
pub struct Pages<'a, E: Endpoint + ?Sized, T> {
    dispatcher: &'a Dispatcher<T>,
    endpoint: &'a E,
    state: PagesState,
}

impl<E: Endpoint + ?Sized, T: Transport> Iterator for Pages<'_, E, T> {
    type Item = Result<E::Output, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (result, requested) = match std::mem::replace(&mut self.state, PagesState::Done) {
            PagesState::Start => (self.dispatcher.call_page(self.endpoint), None),
            PagesState::Next(cursor) => {
                let result = self.dispatcher.call_cursor(self.endpoint, &cursor);
                (result, Some(cursor))
            }
            PagesState::Done => return None,
        };
        match result {
            Ok(page) => {
                if let Some(next) = page.links.next {
                    // A next link pointing back at this page would never end.
                    let repeats = requested.as_ref() == Some(&next)
                        || page.links.current.as_ref() == Some(&next);
                    if repeats {
                        debug!(cursor = %next, "next page repeats the current page, stopping");
                    } else {
                        trace!(cursor = %next, "following next page");
                        self.state = PagesState::Next(next);
                    }
                }
                Some(Ok(page.items))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
