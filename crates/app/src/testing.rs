//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use armpanel_domain::error::TransportError;
use armpanel_domain::payload::Payload;
use armpanel_domain::request::ApiRequest;
use armpanel_domain::step::StepSize;
use serde_json::Value;

use crate::ports::{Confirm, Element, Transport, ViewBindings};

#[derive(Default)]
pub struct RecordingElement {
    text: Mutex<String>,
    class: Mutex<String>,
}

impl RecordingElement {
    pub fn with_class(class: &str) -> Self {
        Self {
            text: Mutex::new(String::new()),
            class: Mutex::new(class.to_string()),
        }
    }
}

impl Element for RecordingElement {
    fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    fn class(&self) -> String {
        self.class.lock().unwrap().clone()
    }

    fn set_class(&self, class: &str) {
        *self.class.lock().unwrap() = class.to_string();
    }
}

/// A fully bound view whose elements can be inspected by markup id.
pub struct TestView {
    pub view: Arc<ViewBindings>,
    elements: HashMap<String, Arc<RecordingElement>>,
}

impl TestView {
    pub fn new() -> Self {
        let steps = [1, 5, 10].map(|d| StepSize::new(d).unwrap());
        let mut elements = HashMap::new();
        let view = ViewBindings::bind(&steps, |id| {
            let el = Arc::new(RecordingElement::default());
            elements.insert(id.to_string(), Arc::clone(&el));
            el
        });
        Self {
            view: Arc::new(view),
            elements,
        }
    }

    pub fn el(&self, id: &str) -> &RecordingElement {
        self.elements
            .get(id)
            .unwrap_or_else(|| panic!("no element bound as {id}"))
    }

    pub fn bound_names(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }
}

/// How the fake device answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Never answers.
    Hang,
    Refused,
}

struct FakeInner {
    requests: Mutex<Vec<ApiRequest>>,
    reply: Mutex<Reply>,
}

/// Transport double that records requests and answers with a fixed reply.
#[derive(Clone)]
pub struct FakeTransport {
    inner: Arc<FakeInner>,
}

impl FakeTransport {
    pub fn replying(reply: Reply) -> Self {
        Self {
            inner: Arc::new(FakeInner {
                requests: Mutex::new(Vec::new()),
                reply: Mutex::new(reply),
            }),
        }
    }

    pub fn json(value: Value) -> Self {
        Self::replying(Reply::Json(value))
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.inner.reply.lock().unwrap() = reply;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<Payload, TransportError> {
        let reply = {
            self.inner.requests.lock().unwrap().push(request);
            self.inner.reply.lock().unwrap().clone()
        };
        match reply {
            Reply::Json(value) => Ok(Payload::new(value)),
            Reply::Hang => std::future::pending().await,
            Reply::Refused => Err(TransportError::connection(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

/// Confirmation double with a fixed answer that remembers the prompts it saw.
pub struct Answer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl Answer {
    pub fn yes() -> Self {
        Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for Answer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
