//! In-process emulation of the XL Deploy REST API.
//!
//! [`InMemoryTransport`] answers the metadata, repository and security endpoints
//! from shared in-memory state, the way the server would: writes are stamped with
//! a fresh `$token` and audit fields, creating an existing CI answers 409, and
//! unknown routes answer 404. Faults can be injected per request so that callers
//! can exercise failure handling without a network.
//!
//! # Example Usage
//!
//! ```rust
//! use xld_client::transport::{ApiRequest, Fault, InMemoryTransport, Method, Transport};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = InMemoryTransport::new();
//! transport
//!     .insert_ci(json!({"id": "Environments/dict", "type": "udm.Dictionary"}))
//!     .await;
//!
//! let answer = transport
//!     .execute(ApiRequest::get("deployit/repository/exists/Environments/dict")?)
//!     .await?;
//! assert_eq!(answer["boolean"], true);
//!
//! transport
//!     .inject_fault(Method::Get, "deployit/repository/ci/Environments/dict", Fault::Status(503))
//!     .await;
//! let failed = transport
//!     .execute(ApiRequest::get("deployit/repository/ci/Environments/dict")?)
//!     .await;
//! assert_eq!(failed.unwrap_err().status(), Some(503));
//! # Ok(())
//! # }
//! ```

use super::{ApiRequest, Method, Transport, TransportError};
use crate::client::ServicePaths;
use crate::metadata::TypeSchema;
use crate::security::User;
use chrono::Utc;
use log::trace;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Principal recorded in the audit fields of emulated writes.
const PRINCIPAL: &str = "admin";

/// Failure to return instead of routing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Answer with this HTTP status and an empty body.
    Status(u16),
    /// Fail as if the server could not be reached.
    Unreachable,
}

#[derive(Default)]
struct State {
    types: HashMap<String, TypeSchema>,
    /// Kept in insertion order; queries answer in this order.
    cis: Vec<(String, Value)>,
    users: HashMap<String, User>,
    faults: Vec<(Method, String, Fault)>,
    requests: Vec<ApiRequest>,
}

impl State {
    fn ci(&self, id: &str) -> Option<&Value> {
        self.cis
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value)
    }

    fn ci_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.cis
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value)
    }
}

/// Thread-safe in-memory stand-in for the remote server.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct InMemoryTransport {
    state: Arc<RwLock<State>>,
    paths: ServicePaths,
}

impl InMemoryTransport {
    /// Empty server using the default `deployit` service roots.
    pub fn new() -> Self {
        Self::with_paths(ServicePaths::default())
    }

    /// Empty server answering under custom service roots.
    pub fn with_paths(paths: ServicePaths) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            paths,
        }
    }

    /// Make `schema` available from the metadata endpoint.
    pub async fn register_type(&self, schema: TypeSchema) {
        let mut state = self.state.write().await;
        state.types.insert(schema.type_name.clone(), schema);
    }

    /// Store a CI verbatim, keyed by its `id` field.
    ///
    /// Existing entries with the same id are replaced in place.
    pub async fn insert_ci(&self, ci: Value) {
        let id = ci
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let mut state = self.state.write().await;
        match state.ci_mut(&id) {
            Some(existing) => *existing = ci,
            None => state.cis.push((id, ci)),
        }
    }

    /// Store a user record, password included.
    pub async fn insert_user(&self, user: User) {
        let mut state = self.state.write().await;
        state.users.insert(user.username.clone(), user);
    }

    /// Fail every `method` request to `path` with `fault` until cleared.
    pub async fn inject_fault(&self, method: Method, path: impl Into<String>, fault: Fault) {
        let mut state = self.state.write().await;
        state.faults.push((method, path.into(), fault));
    }

    pub async fn clear_faults(&self) {
        self.state.write().await.faults.clear();
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.state.read().await.requests.clone()
    }

    /// The stored JSON of CI `id`.
    pub async fn stored_ci(&self, id: &str) -> Option<Value> {
        self.state.read().await.ci(id).cloned()
    }

    /// The stored record of user `name`, password included.
    pub async fn stored_user(&self, name: &str) -> Option<User> {
        self.state.read().await.users.get(name).cloned()
    }

    fn route(&self, state: &mut State, request: &ApiRequest) -> Result<Value, TransportError> {
        let path = request.path();
        let metadata = format!("{}/type/", self.paths.metadata);
        let ci = format!("{}/ci/", self.paths.repository);
        let exists = format!("{}/exists/", self.paths.repository);
        let query = format!("{}/query", self.paths.repository);
        let user = format!("{}/user/", self.paths.security);

        if let Some(type_name) = path.strip_prefix(&metadata) {
            match (request.method(), state.types.get(type_name)) {
                (Method::Get, Some(schema)) => {
                    serde_json::to_value(schema).map_err(|e| TransportError::decode(path, e))
                }
                _ => Err(status(request, 404)),
            }
        } else if let Some(id) = path.strip_prefix(&exists) {
            match request.method() {
                Method::Get => Ok(json!({ "boolean": state.ci(id).is_some() })),
                _ => Err(status(request, 404)),
            }
        } else if let Some(id) = path.strip_prefix(&ci) {
            Self::route_ci(state, request, id)
        } else if path == query && request.method() == Method::Get {
            Ok(Self::query(state, request.query_param("ancestor")))
        } else if let Some(name) = path.strip_prefix(&user) {
            Self::route_user(state, request, name)
        } else {
            Err(status(request, 404))
        }
    }

    fn route_ci(state: &mut State, request: &ApiRequest, id: &str) -> Result<Value, TransportError> {
        match request.method() {
            Method::Get => state.ci(id).cloned().ok_or_else(|| status(request, 404)),
            Method::Post => {
                if state.ci(id).is_some() {
                    return Err(status(request, 409));
                }
                let mut stored = object_body(request)?;
                let now = timestamp();
                stored.insert("id".to_string(), Value::String(id.to_string()));
                stored.insert("$createdBy".to_string(), Value::String(PRINCIPAL.to_string()));
                stored.insert("$createdAt".to_string(), Value::String(now.clone()));
                stamp(&mut stored, now);

                let stored = Value::Object(stored);
                state.cis.push((id.to_string(), stored.clone()));
                Ok(stored)
            }
            Method::Put => {
                let mut replacement = object_body(request)?;
                let existing = state.ci_mut(id).ok_or_else(|| status(request, 404))?;
                for field in ["$createdBy", "$createdAt"] {
                    if let Some(value) = existing.get(field) {
                        replacement.insert(field.to_string(), value.clone());
                    }
                }
                replacement.insert("id".to_string(), Value::String(id.to_string()));
                stamp(&mut replacement, timestamp());

                *existing = Value::Object(replacement);
                Ok(existing.clone())
            }
            Method::Delete => Err(status(request, 404)),
        }
    }

    fn route_user(state: &mut State, request: &ApiRequest, name: &str) -> Result<Value, TransportError> {
        let user = match request.method() {
            Method::Get => state
                .users
                .get(name)
                .cloned()
                .ok_or_else(|| status(request, 404))?,
            Method::Post | Method::Put => {
                let known = state.users.contains_key(name);
                if request.method() == Method::Post && known {
                    return Err(status(request, 409));
                }
                if request.method() == Method::Put && !known {
                    return Err(status(request, 404));
                }
                let mut user: User = serde_json::from_value(Value::Object(object_body(request)?))
                    .map_err(|_| status(request, 400))?;
                user.username = name.to_string();
                state.users.insert(name.to_string(), user.clone());
                user
            }
            Method::Delete => return Err(status(request, 404)),
        };

        let public = User {
            password: None,
            ..user
        };
        serde_json::to_value(&public).map_err(|e| TransportError::decode(request.path(), e))
    }

    fn query(state: &State, ancestor: Option<&str>) -> Value {
        let prefix = ancestor.map(|a| format!("{}/", a.trim_start_matches('/')));
        let entries = state
            .cis
            .iter()
            .filter(|(id, _)| prefix.as_deref().is_none_or(|p| id.starts_with(p)))
            .map(|(id, ci)| json!({ "ref": id, "type": ci.get("type").cloned().unwrap_or(Value::Null) }))
            .collect();
        Value::Array(entries)
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTransport")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl Transport for InMemoryTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut state = self.state.write().await;
        trace!("{} {} (in memory)", request.method(), request.path());
        state.requests.push(request.clone());

        let fault = state
            .faults
            .iter()
            .find(|(method, path, _)| *method == request.method() && path == request.path())
            .map(|(_, _, fault)| *fault);

        match fault {
            Some(Fault::Status(code)) => Err(status(&request, code)),
            Some(Fault::Unreachable) => Err(TransportError::network(
                request.method(),
                request.path(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "server unreachable"),
            )),
            None => self.route(&mut state, &request),
        }
    }
}

fn status(request: &ApiRequest, status: u16) -> TransportError {
    TransportError::Status {
        method: request.method(),
        path: request.path().to_string(),
        status,
        body: String::new(),
    }
}

fn object_body(request: &ApiRequest) -> Result<Map<String, Value>, TransportError> {
    match request.body() {
        Some(Value::Object(map)) => Ok(map.clone()),
        _ => Err(status(request, 400)),
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

/// Assign a new token and modification audit fields.
fn stamp(ci: &mut Map<String, Value>, now: String) {
    ci.insert("$token".to_string(), Value::String(Uuid::new_v4().to_string()));
    ci.insert("$lastModifiedBy".to_string(), Value::String(PRINCIPAL.to_string()));
    ci.insert("$lastModifiedAt".to_string(), Value::String(now));
}
