//! In-process mock of the AgriSmart backend
//!
//! Wraps a test router with a recorder so tests can assert exactly which
//! endpoints were hit.

#![allow(dead_code)]

use axum::{
    extract::Request,
    middleware::{self, Next},
    Router,
};
use std::sync::{Arc, Mutex};

pub struct MockBackend {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub async fn start(router: Router) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let recorder = hits.clone();
        let app = router.layer(middleware::from_fn(move |req: Request, next: Next| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(req.uri().path().to_string());
                next.run(req).await
            }
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    pub fn hits_for(&self, path: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

/// Shared capture buffer for request bodies
pub type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

pub fn captured() -> Captured {
    Arc::new(Mutex::new(Vec::new()))
}
