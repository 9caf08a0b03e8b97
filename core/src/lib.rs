//! Client core for the todo page.
//!
//! # Overview
//! Two pieces: a transport wrapper ([`Api`]) that attaches the credential and
//! turns a 401 into a login redirect, and a view controller ([`TodoPage`])
//! that keeps the rendered list in sync with the server.
//!
//! # Design
//! - `TodoClient` is stateless. It builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - The host supplies the network ([`Transport`]), the credential
//!   ([`CredentialProvider`]), navigation ([`Navigator`]) and dialogs ([`Ui`]).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod page;
pub mod transport;
pub mod types;
pub mod view;

pub use api::Api;
pub use client::{Reply, TodoClient};
pub use config::ClientConfig;
pub use credential::{CookieCredential, CredentialProvider, StaticCredential};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use page::{PageEvent, TodoForm, TodoPage, Ui};
pub use transport::{Navigator, Transport, UreqTransport};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{TodoItem, TodoListView};
