//! The transport wrapper: one round-trip per call, with the credential
//! attached and 401 turned into a login redirect.
//!
//! Every call returns `Ok(None)` after a redirect. Callers treat that as
//! "the page is going away" and stop.

use tracing::{debug, warn};

use crate::client::{Reply, TodoClient};
use crate::credential::CredentialProvider;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, RequestOptions};
use crate::transport::{Navigator, Transport};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Default location the wrapper navigates to on 401.
pub const LOGIN_PATH: &str = "/login";

pub struct Api<T, C, N> {
    client: TodoClient,
    transport: T,
    credentials: C,
    navigator: N,
    login_path: String,
}

impl<T, C, N> Api<T, C, N>
where
    T: Transport,
    C: CredentialProvider,
    N: Navigator,
{
    pub fn new(client: TodoClient, transport: T, credentials: C, navigator: N) -> Self {
        Self {
            client,
            transport,
            credentials,
            navigator,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    pub fn with_login_path(mut self, login_path: &str) -> Self {
        self.login_path = login_path.to_string();
        self
    }

    /// Generic call: `path` relative to the base url, parsed JSON on success.
    pub fn call(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_request(path, options, credential.as_deref());
        self.round_trip(request, |client, response| client.parse_json(response))
    }

    pub fn list_todos(&self) -> Result<Option<Vec<Todo>>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_list_todos(credential.as_deref());
        self.round_trip(request, TodoClient::parse_list_todos)
    }

    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_get_todo(id, credential.as_deref());
        self.round_trip(request, TodoClient::parse_get_todo)
    }

    pub fn create_todo(&self, input: &CreateTodo) -> Result<Option<Todo>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_create_todo(input, credential.as_deref())?;
        self.round_trip(request, TodoClient::parse_create_todo)
    }

    pub fn update_todo(&self, id: i64, input: &UpdateTodo) -> Result<Option<Todo>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_update_todo(id, input, credential.as_deref())?;
        self.round_trip(request, TodoClient::parse_update_todo)
    }

    pub fn delete_todo(&self, id: i64) -> Result<Option<()>, ApiError> {
        let credential = self.credentials.credential();
        let request = self.client.build_delete_todo(id, credential.as_deref());
        self.round_trip(request, TodoClient::parse_delete_todo)
    }

    fn round_trip<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<Reply<R>, ApiError>,
    ) -> Result<Option<R>, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "received response");

        match parse(&self.client, response)? {
            Reply::Data(data) => Ok(Some(data)),
            Reply::LoginRequired => {
                warn!(path = %request.path, "unauthorized, redirecting to {}", self.login_path);
                self.navigator.navigate(&self.login_path);
                Ok(None)
            }
        }
    }
}
