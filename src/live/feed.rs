use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::{ResourceReader, ResourceWriter};
use crate::controller::{ListController, LoadOutcome};
use crate::live::message::{LiveMessage, RefreshTrigger, Topic};
use crate::view::{Alert, ListView};

/// Wait between a lost connection and the next attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// One message delivered by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub destination: String,
    pub body: String,
}

/// Broker connection, e.g. STOMP over a WebSocket.
#[async_trait]
pub trait FrameSource: Send {
    /// Connects and subscribes to `topics`.
    async fn connect(&mut self, topics: &[Topic]) -> Result<(), FeedError>;

    /// Next frame; `None` once the connection is closed.
    async fn next_frame(&mut self) -> Option<Result<Frame, FeedError>>;
}

enum PumpEnd {
    Disconnected,
    Stopped,
}

pub struct LiveFeed<S> {
    source: S,
    topics: Vec<Topic>,
    reconnect_delay: Duration,
    triggers: mpsc::Sender<RefreshTrigger>,
    shutdown: CancellationToken,
}

impl<S: FrameSource> LiveFeed<S> {
    /// Feed over every topic, sending triggers to `triggers`.
    pub fn new(source: S, triggers: mpsc::Sender<RefreshTrigger>) -> Self {
        Self {
            source,
            topics: Topic::ALL.to_vec(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            triggers,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn topics(mut self, topics: &[Topic]) -> Self {
        self.topics = topics.to_vec();
        self
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Token that stops [`LiveFeed::run`] when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Connects, dispatches and reconnects until shut down or until nobody
    /// listens for triggers any more.
    pub async fn run(mut self) {
        let shutdown = self.shutdown.clone();

        loop {
            let connected = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.source.connect(&self.topics) => result,
            };

            match connected {
                Ok(()) => {
                    log::info!("Live feed connected to {} topics", self.topics.len());
                    match self.pump(&shutdown).await {
                        PumpEnd::Stopped => break,
                        PumpEnd::Disconnected => log::warn!(
                            "Live feed disconnected, reconnecting in {:?}",
                            self.reconnect_delay
                        ),
                    }
                }
                Err(err) => log::warn!(
                    "Live feed {err}, retrying in {:?}",
                    self.reconnect_delay
                ),
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        log::info!("Live feed stopped");
    }

    async fn pump(&mut self, shutdown: &CancellationToken) -> PumpEnd {
        loop {
            let frame = tokio::select! {
                _ = shutdown.cancelled() => return PumpEnd::Stopped,
                frame = self.source.next_frame() => frame,
            };

            let frame = match frame {
                Some(Ok(frame)) => frame,
                Some(Err(err)) => {
                    log::warn!("Live feed {err}");
                    return PumpEnd::Disconnected;
                }
                None => return PumpEnd::Disconnected,
            };

            let Some(trigger) = route(&frame) else {
                continue;
            };
            if self.triggers.send(trigger).await.is_err() {
                log::debug!("Live feed has no listeners left");
                return PumpEnd::Stopped;
            }
        }
    }
}

/// Decodes a frame into a trigger, logging and skipping anything unusable.
fn route(frame: &Frame) -> Option<RefreshTrigger> {
    let Some(topic) = Topic::from_destination(&frame.destination) else {
        log::debug!("Ignoring frame from unsubscribed {}", frame.destination);
        return None;
    };

    match LiveMessage::decode(topic, &frame.body) {
        Ok(LiveMessage::Unknown) => {
            log::debug!("Ignoring unknown live message on {}", frame.destination);
            None
        }
        Ok(message) => message.trigger(),
        Err(err) => {
            log::warn!("Undecodable frame on {}: {err}", frame.destination);
            None
        }
    }
}

/// Something that can reload itself in response to a live update.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh_with(&self, notice: Alert) -> LoadOutcome;
}

#[async_trait]
impl<B, V> Refresh for ListController<B, V>
where
    B: ResourceReader + ResourceWriter,
    V: ListView,
{
    async fn refresh_with(&self, notice: Alert) -> LoadOutcome {
        self.notify(notice);
        self.refresh().await
    }
}

/// Applies refresh triggers to the registered screens.
#[derive(Default)]
pub struct Refresher {
    targets: HashMap<&'static str, Vec<Arc<dyn Refresh>>>,
}

impl Refresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, screen: &'static str, target: Arc<dyn Refresh>) -> Self {
        self.targets.entry(screen).or_default().push(target);
        self
    }

    /// Handles one trigger, returning the outcome of every refreshed target.
    pub async fn apply(&self, trigger: &RefreshTrigger) -> Vec<LoadOutcome> {
        let Some(targets) = self.targets.get(trigger.screen) else {
            log::debug!("No {} screen open for: {}", trigger.screen, trigger.notice);
            return Vec::new();
        };

        let mut outcomes = Vec::with_capacity(targets.len());
        for target in targets {
            outcomes.push(target.refresh_with(Alert::info(trigger.notice.clone())).await);
        }
        outcomes
    }

    /// Applies triggers until the feed side is dropped.
    pub async fn run(self, mut triggers: mpsc::Receiver<RefreshTrigger>) {
        while let Some(trigger) = triggers.recv().await {
            log::info!("{}", trigger.notice);
            self.apply(&trigger).await;
        }
    }
}
