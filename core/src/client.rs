//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The credential is an argument to every
//! `build_*` call rather than state, so the client never reads ambient
//! storage.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::types::{CreateTodo, Todo, UpdateTodo};

const CONTENT_TYPE: &str = "content-type";
const AUTHORIZATION: &str = "authorization";

/// Successful outcome of parsing a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// 2xx with a decoded body.
    Data(T),
    /// 401: the credential is missing or was rejected.
    LoginRequired,
}

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a request for `path` (relative to the base url).
    ///
    /// Headers are applied in order: `content-type: application/json`, then the
    /// caller's headers (which may override it), then `authorization` carrying
    /// the credential verbatim when one is present.
    pub fn build_request(
        &self,
        path: &str,
        options: RequestOptions,
        credential: Option<&str>,
    ) -> HttpRequest {
        let mut headers = Vec::new();
        set_header(&mut headers, CONTENT_TYPE, "application/json");
        for (name, value) in &options.headers {
            set_header(&mut headers, name, value);
        }
        if let Some(token) = credential {
            set_header(&mut headers, AUTHORIZATION, token);
        }
        HttpRequest {
            method: options.method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: options.body,
        }
    }

    pub fn build_list_todos(&self, credential: Option<&str>) -> HttpRequest {
        self.build_request("/todos", RequestOptions::default(), credential)
    }

    pub fn build_get_todo(&self, id: i64, credential: Option<&str>) -> HttpRequest {
        self.build_request(&format!("/todos/{id}"), RequestOptions::default(), credential)
    }

    pub fn build_create_todo(
        &self,
        input: &CreateTodo,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let options = RequestOptions::method(HttpMethod::Post).with_body(to_json(input)?);
        Ok(self.build_request("/todos", options, credential))
    }

    pub fn build_update_todo(
        &self,
        id: i64,
        input: &UpdateTodo,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let options = RequestOptions::method(HttpMethod::Put).with_body(to_json(input)?);
        Ok(self.build_request(&format!("/todos/{id}"), options, credential))
    }

    pub fn build_delete_todo(&self, id: i64, credential: Option<&str>) -> HttpRequest {
        self.build_request(
            &format!("/todos/{id}"),
            RequestOptions::method(HttpMethod::Delete),
            credential,
        )
    }

    /// Decode any 2xx body as JSON. An empty body decodes as `null`.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Reply<serde_json::Value>, ApiError> {
        if let Some(reply) = check_status(&response)? {
            return Ok(reply);
        }
        if response.body.trim().is_empty() {
            return Ok(Reply::Data(serde_json::Value::Null));
        }
        decode(&response.body).map(Reply::Data)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Reply<Vec<Todo>>, ApiError> {
        parse_typed(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Reply<Todo>, ApiError> {
        parse_typed(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Reply<Todo>, ApiError> {
        parse_typed(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Reply<Todo>, ApiError> {
        parse_typed(response)
    }

    /// Any 2xx counts; the body (if any) is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Reply<()>, ApiError> {
        Ok(check_status(&response)?.unwrap_or(Reply::Data(())))
    }
}

/// Replace a header in place (case-insensitive) or append it.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    let name = name.to_ascii_lowercase();
    match headers.iter_mut().find(|(key, _)| *key == name) {
        Some(entry) => entry.1 = value.to_string(),
        None => headers.push((name, value.to_string())),
    }
}

fn to_json<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn parse_typed<T: DeserializeOwned>(response: HttpResponse) -> Result<Reply<T>, ApiError> {
    if let Some(reply) = check_status(&response)? {
        return Ok(reply);
    }
    decode(&response.body).map(Reply::Data)
}

/// `Ok(None)` for 2xx, `Ok(Some(LoginRequired))` for 401, `Err` otherwise.
fn check_status<T>(response: &HttpResponse) -> Result<Option<Reply<T>>, ApiError> {
    if response.is_success() {
        return Ok(None);
    }
    if response.status == 401 {
        return Ok(Some(Reply::LoginRequired));
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
