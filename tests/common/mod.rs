#![allow(dead_code)]

#[cfg(feature = "server")]
pub mod server;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use contract_console::api::{FetchResult, ResourceReader, ResourceWriter};
use contract_console::domain::types::RecordId;
use contract_console::view::{ListSnapshot, ListView};
use serde_json::{Value, json};
use tokio::sync::oneshot;

pub type Reply = FetchResult<Option<Value>>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// In-memory backend answering reads in call order.
///
/// Gated replies stay pending until the test sends them, which lets tests
/// decide the order in which concurrent requests complete.
#[derive(Default)]
pub struct FakeBackend {
    reads: Mutex<VecDeque<Scripted>>,
    writes: Mutex<VecDeque<Reply>>,
    pub requests: Mutex<Vec<String>>,
    pub mutations: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.reads.lock().unwrap().push_back(Scripted::Ready(reply));
        self
    }

    pub fn gate(self) -> (Self, oneshot::Sender<Reply>) {
        let (tx, rx) = oneshot::channel();
        self.reads.lock().unwrap().push_back(Scripted::Gated(rx));
        (self, tx)
    }

    pub fn write_reply(self, reply: Reply) -> Self {
        self.writes.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn record_mutation(&self, entry: String) -> Reply {
        self.mutations.lock().unwrap().push(entry);
        self.writes.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

#[async_trait]
impl ResourceReader for FakeBackend {
    async fn fetch_json(&self, path: &str) -> Reply {
        self.requests.lock().unwrap().push(path.to_string());
        let next = self.reads.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or(Ok(None)),
            None => panic!("unexpected request {path}"),
        }
    }
}

#[async_trait]
impl ResourceWriter for FakeBackend {
    async fn create(&self, resource: &str, body: &Value) -> Reply {
        self.record_mutation(format!("POST {resource} {body}"))
    }

    async fn update(&self, resource: &str, id: RecordId, body: &Value) -> Reply {
        self.record_mutation(format!("PUT {resource}/{id} {body}"))
    }

    async fn delete(&self, resource: &str, id: RecordId) -> Reply {
        self.record_mutation(format!("DELETE {resource}/{id}"))
    }

    async fn post_action(&self, resource: &str, id: RecordId, action: &str, body: &Value) -> Reply {
        self.record_mutation(format!("POST {resource}/{id}/{action} {body}"))
    }
}

/// View keeping every snapshot it was asked to draw.
#[derive(Default)]
pub struct RecordingView {
    frames: Mutex<Vec<ListSnapshot>>,
}

impl RecordingView {
    pub fn frames(&self) -> Vec<ListSnapshot> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> ListSnapshot {
        self.frames.lock().unwrap().last().cloned().expect("nothing rendered")
    }
}

impl ListView for RecordingView {
    fn render(&self, snapshot: &ListSnapshot) {
        self.frames.lock().unwrap().push(snapshot.clone());
    }
}

/// Page envelope as the backend sends it.
pub fn page(content: Value, total_pages: usize, number: usize, total_elements: u64) -> Value {
    json!({
        "content": content,
        "totalPages": total_pages,
        "number": number,
        "first": number == 0,
        "last": number + 1 >= total_pages,
        "totalElements": total_elements,
    })
}

pub fn users(ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "id": id,
                    "username": format!("user{id}"),
                    "email": format!("user{id}@example.com"),
                    "realName": format!("User {id}"),
                    "enabled": true,
                    "roles": [{"name": "ADMIN"}]
                })
            })
            .collect(),
    )
}
