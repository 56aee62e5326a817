//! In-memory upstream that replays a fixed script of attempt outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

use crate::upstream::{OutboundRequest, Upstream, UpstreamError, UpstreamResponse};

pub(crate) type Outcome = Result<UpstreamResponse, UpstreamError>;

pub(crate) struct ScriptedUpstream {
    script: Mutex<VecDeque<Outcome>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedUpstream {
    pub(crate) fn new(script: Vec<Outcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Outcome {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(ct).unwrap());
        }
        Ok(UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: body.into(),
        })
    }

    pub(crate) fn transport(message: &str) -> Outcome {
        Err(UpstreamError::Transport(message.to_string()))
    }

    pub(crate) fn broken_body(message: &str) -> Outcome {
        Err(UpstreamError::Body(message.to_string()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn fetch(&self, request: &OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(UpstreamError::Transport("script exhausted".into())))
    }
}
