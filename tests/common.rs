//! Shared test harness: drives the router in-process with `tower::oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

use plantscan::constants::DEFAULT_MAX_UPLOAD_BYTES;
use plantscan::http::{AppState, router};
use plantscan::random::RandomSource;
use plantscan::store::RecordStore;
use plantscan::uploads::UploadStorage;

pub const BOUNDARY: &str = "plantscan-test-boundary";

/// One part of a multipart request body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> Part<'a> {
    /// A photo in the expected `plantPhoto` field.
    pub fn photo(filename: &'a str, data: &'a [u8]) -> Self {
        Self::File {
            name: "plantPhoto",
            filename,
            content_type: "image/jpeg",
            data,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            },
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            },
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct TestAppBuilder {
    store: RecordStore,
    rng: Option<Box<dyn FnOnce(AppState) -> AppState>>,
    uploads: UploadStorage,
    max_upload_bytes: usize,
    public_dir: Option<PathBuf>,
}

impl TestAppBuilder {
    pub fn store(mut self, store: RecordStore) -> Self {
        self.store = store;
        self
    }

    pub fn rng<R: RandomSource>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(move |state| state.with_rng(rng)));
        self
    }

    pub fn uploads(mut self, uploads: UploadStorage) -> Self {
        self.uploads = uploads;
        self
    }

    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn public_dir(mut self, dir: PathBuf) -> Self {
        self.public_dir = Some(dir);
        self
    }

    pub fn build(self) -> TestApp {
        let mut state = AppState::new(self.store.clone()).with_uploads(self.uploads);
        if let Some(apply_rng) = self.rng {
            state = apply_rng(state);
        }

        // Keep an empty public dir alive for the app's lifetime when none is given
        let scratch = TempDir::new().expect("Failed to create temp dir");
        let public_dir = self
            .public_dir
            .unwrap_or_else(|| scratch.path().to_path_buf());

        TestApp {
            router: router(state, &public_dir, self.max_upload_bytes),
            store: self.store,
            _scratch: scratch,
        }
    }
}

/// In-process application under test.
pub struct TestApp {
    router: Router,
    pub store: RecordStore,
    _scratch: TempDir,
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            store: RecordStore::memory(),
            rng: None,
            uploads: UploadStorage::Memory,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            public_dir: None,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("router is infallible");

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, path: &str, value: serde_json::Value) -> TestResponse {
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        self.send(
            Request::post(path)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap(),
        )
        .await
    }

    /// Uploads a small photo and returns the parsed response body.
    pub async fn analyze(&self, filename: &str) -> serde_json::Value {
        let resp = self
            .post_multipart("/api/analyze", &[Part::photo(filename, b"fake jpeg bytes")])
            .await;
        assert_eq!(resp.status, StatusCode::OK, "analyze failed: {}", resp.text());
        resp.json()
    }
}
