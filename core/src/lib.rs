//! Blocking client for the Canvas LMS REST API.
//!
//! # Overview
//! Each Canvas endpoint is a request descriptor implementing [`Endpoint`].
//! [`CanvasClient`] turns a descriptor into a plain-data [`HttpRequest`],
//! a [`Transport`] executes it, and the decoder maps the [`HttpResponse`]
//! into the endpoint's typed output. [`Dispatcher`] ties the three together.
//!
//! ```no_run
//! use canvas_core::endpoints::CreateCourseSection;
//! use canvas_core::{ClientConfig, Dispatcher};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let canvas = Dispatcher::new(ClientConfig::from_env()?);
//! let section = canvas.call(&CreateCourseSection::new("10", "Section A"))?;
//! println!("created section {}", section.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Descriptors are pure data; validation runs before anything is sent and
//!   reports every violation at once.
//! - Request building and response parsing never touch the network, so both
//!   sides can be tested without a server.
//! - No retries, no internal threads. The only shared state is the
//!   transport's connection pool.
//! - List endpoints expose Canvas's `Link` header cursors through
//!   [`Dispatcher::call_page`], [`Dispatcher::call_cursor`] and
//!   [`Dispatcher::pages`].

pub mod client;
pub mod config;
pub mod decode;
pub mod dispatcher;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod pagination;
pub mod params;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::CanvasClient;
pub use config::{ClientConfig, ConfigError};
pub use dispatcher::{Dispatcher, Pages};
pub use endpoint::{resolve_path, Body, Context, Endpoint};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::{Cursor, Links, Page};
pub use params::Params;
pub use transport::{Transport, UreqTransport};
pub use validation::{ValidationError, Validator, Violation};
