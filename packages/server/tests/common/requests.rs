//! Minimal HTTP helpers over `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// One request against a built router.
///
/// Collects the response into `(status, json body)`; a non-JSON body
/// comes back as a JSON string so assertions can still print it.
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl TestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn patch(uri: &str) -> Self {
        Self::new(Method::PATCH, uri)
    }

    /// Attach a session token as `Authorization: Bearer <token>`
    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("authorization".to_string(), format!("Bearer {}", token)));
        self
    }

    /// Attach the admin secret header
    pub fn admin_secret(mut self, secret: &str) -> Self {
        self.headers
            .push(("x-admin-secret".to_string(), secret.to_string()));
        self
    }

    /// Attach a client IP via X-Forwarded-For.
    ///
    /// The rate limiter on generative routes keys on the client IP and
    /// rejects requests it cannot attribute, so tests hitting those
    /// routes must set one.
    pub fn forwarded_for(mut self, ip: &str) -> Self {
        self.headers
            .push(("x-forwarded-for".to_string(), ip.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub async fn send(self, app: Router) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        let request = match self.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&body).expect("request body serializes"),
                ))
                .expect("request builds"),
            None => builder.body(Body::empty()).expect("request builds"),
        };

        let response = app.oneshot(request).await.expect("router is infallible");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body collects");

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }
}
