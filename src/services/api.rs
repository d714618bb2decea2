//! JSON API contract
//!
//! Transport-independent request handling for the monitoring endpoints.
//! An HTTP server only has to turn its requests into [`ApiRequest`] and
//! write back the [`ApiResponse`].

use super::engine::Engine;
use crate::domain::MonitorConfig;
use crate::monitors::StatisticsMonitor;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

pub const API_VERSION: &str = "1.0.0";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Incoming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path with optional query string, e.g. `/api/monitor?id=1min`
    pub path: String,
    /// Raw request body
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, path, Some(body.into()))
    }

    pub fn put(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Put, path, Some(body.into()))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    /// Path without the query string
    fn route(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(route, _)| route)
    }

    /// Percent-decoded query parameters; later duplicates win
    ///
    /// Values that do not decode to UTF-8 are kept as sent.
    fn query(&self) -> HashMap<&str, Cow<'_, str>> {
        self.path
            .split_once('?')
            .map(|(_, query)| {
                query
                    .split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| {
                        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                        let value = urlencoding::decode(value).unwrap_or(Cow::Borrowed(value));
                        (key, value)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn json_body(&self) -> Result<Value, ApiResponse> {
        let body = self.body.as_deref().unwrap_or_default();
        serde_json::from_str(body).map_err(|_| ApiResponse::error("Invalid JSON", 400))
    }
}

/// Outgoing response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    /// `{"error": message, "code": status}`
    pub fn error(message: impl Into<String>, status: u16) -> Self {
        let message = message.into();
        Self {
            status,
            body: json!({ "error": message, "code": status }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Routes requests to the engine
pub struct ApiHandler<'a> {
    engine: &'a mut Engine,
}

impl<'a> ApiHandler<'a> {
    pub fn new(engine: &'a mut Engine) -> Self {
        Self { engine }
    }

    /// Handle one request
    pub fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        log::debug!("{} {}", request.method, request.path);

        let result = match (request.method, request.route()) {
            (Method::Get, "/") => Ok(self.root()),
            (Method::Get, "/api/status") => Ok(self.status()),
            (Method::Get, "/api/monitors") => Ok(self.list_monitors()),
            (Method::Post, "/api/monitors") => self.create_monitor(request),
            (Method::Get, "/api/monitor") => self.get_monitor(request),
            (Method::Put, "/api/monitor") => self.update_monitor(request),
            (Method::Delete, "/api/monitor") => self.delete_monitor(request),
            (Method::Get, "/api/config") => self.get_config(),
            (Method::Put, "/api/config") => self.update_config(request),
            (_, "/" | "/api/status" | "/api/monitors" | "/api/monitor" | "/api/config") => {
                Err(ApiResponse::error("Method not allowed", 405))
            }
            _ => Err(ApiResponse::error("Not found", 404)),
        };

        result.unwrap_or_else(|response| response)
    }

    fn root(&self) -> ApiResponse {
        ApiResponse::ok(json!({
            "status": "online",
            "version": API_VERSION,
            "endpoints": ["/api/status", "/api/monitors", "/api/monitor", "/api/config"],
        }))
    }

    fn status(&self) -> ApiResponse {
        let snapshot = self.engine.snapshot(0);
        ApiResponse::ok(json!({
            "noise": {
                "current": snapshot.current,
                "baseline": snapshot.baseline,
                "ratio": snapshot.ratio,
                "category": snapshot.severity,
            },
            "mode": snapshot.mode,
            "alert": snapshot.alert,
            "samples_processed": snapshot.samples_processed,
            "alerts_fired": snapshot.alerts_fired,
            "timestamp_ms": snapshot.timestamp_ms,
        }))
    }

    fn list_monitors(&self) -> ApiResponse {
        let monitors: Vec<Value> = self
            .engine
            .get_priority_monitors(usize::MAX)
            .into_iter()
            .map(monitor_json)
            .collect();
        ApiResponse::ok(json!({ "monitors": monitors }))
    }

    fn create_monitor(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let body = request.json_body()?;
        let config: MonitorConfig = serde_json::from_value(body)
            .map_err(|_| ApiResponse::error("Invalid monitor configuration", 400))?;
        let id = config.id.clone();

        match self.engine.add_monitor(config) {
            Ok(true) => Ok(ApiResponse::created(
                json!({ "status": "Monitor created", "id": id }),
            )),
            Ok(false) => Ok(ApiResponse::ok(
                json!({ "status": "Monitor already exists", "id": id }),
            )),
            Err(e) => Err(ApiResponse::error(e.to_string(), 400)),
        }
    }

    fn get_monitor(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let id = required_id(&request.query())?;
        let monitor = self
            .engine
            .get_monitor(&id)
            .ok_or_else(|| ApiResponse::error("Monitor not found", 404))?;
        Ok(ApiResponse::ok(monitor_json(monitor)))
    }

    /// Fields missing from the body keep their current values
    fn update_monitor(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let mut body = request.json_body()?;
        let fields = body
            .as_object_mut()
            .ok_or_else(|| ApiResponse::error("Invalid monitor configuration", 400))?;

        let id = match fields.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => required_id(&request.query())?,
        };

        let existing = self
            .engine
            .get_monitor(&id)
            .ok_or_else(|| ApiResponse::error("Monitor not found", 404))?;

        let mut merged = serde_json::to_value(existing.config())
            .map_err(|e| ApiResponse::error(e.to_string(), 500))?;
        if let Some(target) = merged.as_object_mut() {
            for (key, value) in fields.iter() {
                target.insert(key.clone(), value.clone());
            }
            target.insert("id".to_string(), Value::String(id.clone()));
        }

        let config: MonitorConfig = serde_json::from_value(merged)
            .map_err(|_| ApiResponse::error("Invalid monitor configuration", 400))?;

        match self.engine.replace_monitor(config) {
            Ok(true) => Ok(ApiResponse::ok(
                json!({ "status": "Monitor updated", "id": id }),
            )),
            Ok(false) => Err(ApiResponse::error("Monitor not found", 404)),
            Err(e) => Err(ApiResponse::error(e.to_string(), 400)),
        }
    }

    fn delete_monitor(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let id = required_id(&request.query())?;
        self.engine.remove_monitor(&id);
        Ok(ApiResponse::ok(
            json!({ "status": "Monitor deleted", "id": id }),
        ))
    }

    fn get_config(&self) -> Result<ApiResponse, ApiResponse> {
        let mut config = serde_json::to_value(self.engine.config())
            .map_err(|e| ApiResponse::error(e.to_string(), 500))?;
        if let Some(object) = config.as_object_mut() {
            object.insert("version".to_string(), json!(API_VERSION));
        }
        Ok(ApiResponse::ok(config))
    }

    fn update_config(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let mut patch = request.json_body()?;
        if let Some(object) = patch.as_object_mut() {
            object.remove("version");
        }

        self.engine
            .apply_config_patch(&patch)
            .map_err(|e| ApiResponse::error(e.to_string(), 400))?;
        Ok(ApiResponse::ok(json!({ "status": "Configuration updated" })))
    }
}

fn required_id(query: &HashMap<&str, Cow<'_, str>>) -> Result<String, ApiResponse> {
    query
        .get("id")
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .ok_or_else(|| ApiResponse::error("Monitor ID required", 400))
}

fn monitor_json(monitor: &StatisticsMonitor) -> Value {
    let config = monitor.config();
    let stats = monitor.stats();
    let (min, max) = stats.min_max();

    json!({
        "id": config.id,
        "label": config.label,
        "period_ms": config.period_ms,
        "priority": config.priority,
        "history_size": config.history_size,
        "stats": {
            "current": stats.current,
            "min": min,
            "max": max,
            "avg": stats.avg,
            "sample_count": stats.sample_count,
            "history": stats.history,
        },
    })
}
