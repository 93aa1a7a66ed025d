//! Per-game subscriber registry for realtime snapshot fan-out.
//!
//! Every live watcher connection registers a bounded channel under the game
//! it watches. Broadcasting clones the payload into each channel; a
//! subscriber that is gone, or too slow to drain its buffer, is dropped
//! from the registry rather than allowed to stall the submitter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::sync::StatePush;

/// Identifies one subscriber within its game.
pub type SubscriberId = Uuid;

/// Buffered pushes per subscriber before backpressure kicks in.
const SUBSCRIBER_BUFFER: usize = 64;

/// How long a broadcast waits on one subscriber's full buffer before
/// dropping that subscriber.
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
struct Subscriber {
    id: SubscriberId,
    tx: mpsc::Sender<StatePush>,
}

/// Concurrency-safe map from game id to its live subscribers.
///
/// Clones share the same underlying map. The lock is only ever held to
/// snapshot or edit the subscriber lists, never across a send.
#[derive(Clone)]
pub struct SubscriptionRegistry {
    games: Arc<RwLock<HashMap<Uuid, Vec<Subscriber>>>>,
    send_timeout: Duration,
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::with_send_timeout(DEFAULT_SEND_TIMEOUT)
    }

    /// Registry with a custom per-subscriber send timeout.
    pub fn with_send_timeout(send_timeout: Duration) -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            send_timeout,
        }
    }

    /// Register a new subscriber for `game_id`.
    ///
    /// Returns the subscriber's id (needed to unsubscribe) and the receiving
    /// end of its push channel. The game does not have to exist in the
    /// ledger; a watcher of an unknown game simply never hears anything.
    pub async fn subscribe(&self, game_id: Uuid) -> (SubscriberId, mpsc::Receiver<StatePush>) {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        let id = Uuid::new_v4();

        let mut games = self.games.write().await;
        games.entry(game_id).or_default().push(Subscriber { id, tx });

        (id, rx)
    }

    /// Drop one subscriber. The game's entry disappears with its last
    /// subscriber, so the map stays bounded by live connections.
    pub async fn unsubscribe(&self, game_id: Uuid, subscriber_id: SubscriberId) {
        let mut games = self.games.write().await;
        if let Some(subs) = games.get_mut(&game_id) {
            subs.retain(|s| s.id != subscriber_id);
            if subs.is_empty() {
                games.remove(&game_id);
            }
        }
    }

    /// Deliver `push` to every current subscriber of `game_id`.
    ///
    /// Sends run concurrently, each bounded by the registry's send timeout.
    /// Failures never propagate: a closed or timed-out subscriber is logged
    /// and pruned, and delivery to the rest continues regardless.
    pub async fn broadcast(&self, game_id: Uuid, push: StatePush) {
        let subscribers: Vec<Subscriber> = {
            let games = self.games.read().await;
            match games.get(&game_id) {
                Some(subs) => subs.clone(),
                None => return,
            }
        };

        let sends = subscribers.iter().map(|sub| {
            let push = push.clone();
            async move {
                match sub.tx.send_timeout(push, self.send_timeout).await {
                    Ok(()) => None,
                    Err(SendTimeoutError::Closed(_)) => {
                        tracing::warn!(
                            game_id = %game_id,
                            subscriber = %sub.id,
                            "Subscriber channel closed, dropping"
                        );
                        Some(sub.id)
                    }
                    Err(SendTimeoutError::Timeout(_)) => {
                        tracing::warn!(
                            game_id = %game_id,
                            subscriber = %sub.id,
                            "Subscriber too slow to drain pushes, dropping"
                        );
                        Some(sub.id)
                    }
                }
            }
        });

        let stale: Vec<SubscriberId> = join_all(sends).await.into_iter().flatten().collect();
        for id in stale {
            self.unsubscribe(game_id, id).await;
        }
    }

    /// Number of live subscribers for a game.
    pub async fn subscriber_count(&self, game_id: Uuid) -> usize {
        let games = self.games.read().await;
        games.get(&game_id).map(|subs| subs.len()).unwrap_or(0)
    }
}
