//! Background query worker.
//!
//! Search and filter run on one persistent tokio task so large catalogs
//! never block the UI loop. Each request carries a snapshot of the
//! catalog (`Arc<[Game]>` — the worker shares it immutably, no copy of
//! the records themselves) and a reply channel.
//!
//! Requests carry a monotonic id issued by the handle. A request whose
//! id is no longer the latest by the time it settles resolves to
//! [`QueryOutcome::Superseded`], so a slow early query can never clobber
//! the results of a later one. In-flight work is not cancelled; a
//! superseded request still computes, its result set is just discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use playnook_core::Game;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::query::{self, FilterLogic};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("query worker is no longer running")]
    Closed,
}

/// One query operation.
#[derive(Debug, Clone)]
pub enum QueryOp {
    Search { term: String },
    Filter { tags: Vec<String>, logic: FilterLogic },
}

/// How a dispatched query settled.
#[derive(Debug)]
pub enum QueryOutcome {
    Matches(Vec<Game>),
    /// A newer query was dispatched before this one settled; the stale
    /// result set has been discarded.
    Superseded,
}

struct QueryRequest {
    games: Arc<[Game]>,
    lang: String,
    op: QueryOp,
    reply: oneshot::Sender<Vec<Game>>,
}

/// Handle to the query worker.
///
/// Dropping the handle closes the request channel, which ends the
/// worker task after it drains what is already queued.
pub struct QueryEngine {
    tx: mpsc::UnboundedSender<QueryRequest>,
    next_id: AtomicU64,
    latest: Arc<AtomicU64>,
}

impl QueryEngine {
    /// Spawn the worker task. Requires a running tokio runtime.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<QueryRequest>();

        tokio::spawn(async move {
            while let Some(req) = rx.recv().await {
                let matches = match req.op {
                    QueryOp::Search { term } => query::search(&req.games, &term, &req.lang),
                    QueryOp::Filter { tags, logic } => {
                        query::filter(&req.games, &tags, logic, &req.lang)
                    }
                };
                // Caller may have dropped its PendingQuery; nothing to do.
                let _ = req.reply.send(matches);
            }
            log::debug!("query worker shutting down");
        });

        Self {
            tx,
            next_id: AtomicU64::new(0),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Dispatch a query. The request is queued on the worker before this
    /// returns; await the returned [`PendingQuery`] for the outcome.
    ///
    /// Dispatching marks every earlier still-pending query as
    /// superseded.
    pub fn dispatch(
        &self,
        games: Arc<[Game]>,
        lang: impl Into<String>,
        op: QueryOp,
    ) -> PendingQuery {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.store(id, Ordering::SeqCst);

        let (reply_tx, reply_rx) = oneshot::channel();
        let sent = self
            .tx
            .send(QueryRequest {
                games,
                lang: lang.into(),
                op,
                reply: reply_tx,
            })
            .is_ok();

        PendingQuery {
            id,
            latest: self.latest.clone(),
            reply: reply_rx,
            sent,
        }
    }
}

/// An in-flight query. Await [`outcome`](Self::outcome) to settle it.
pub struct PendingQuery {
    id: u64,
    latest: Arc<AtomicU64>,
    reply: oneshot::Receiver<Vec<Game>>,
    sent: bool,
}

impl PendingQuery {
    pub async fn outcome(self) -> Result<QueryOutcome, EngineError> {
        if !self.sent {
            return Err(EngineError::Closed);
        }

        let matches = self.reply.await.map_err(|_| EngineError::Closed)?;
        if self.latest.load(Ordering::SeqCst) == self.id {
            Ok(QueryOutcome::Matches(matches))
        } else {
            Ok(QueryOutcome::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<[Game]> {
        let mut a = Game {
            id: "a".to_string(),
            ..Game::default()
        };
        a.title.insert("en", "Block Drop".to_string());
        a.tags.insert("en", vec!["puzzle".to_string()]);

        let mut b = Game {
            id: "b".to_string(),
            ..Game::default()
        };
        b.title.insert("en", "Sky Racer".to_string());
        b.tags.insert("en", vec!["racing".to_string()]);

        vec![a, b].into()
    }

    #[tokio::test]
    async fn test_search_through_worker() {
        let engine = QueryEngine::spawn();
        let pending = engine.dispatch(
            catalog(),
            "en",
            QueryOp::Search {
                term: "racer".to_string(),
            },
        );

        match pending.outcome().await.unwrap() {
            QueryOutcome::Matches(games) => {
                assert_eq!(games.len(), 1);
                assert_eq!(games[0].id, "b");
            }
            QueryOutcome::Superseded => panic!("sole query cannot be superseded"),
        }
    }

    #[tokio::test]
    async fn test_filter_through_worker() {
        let engine = QueryEngine::spawn();
        let pending = engine.dispatch(
            catalog(),
            "en",
            QueryOp::Filter {
                tags: vec!["puzzle".to_string()],
                logic: FilterLogic::And,
            },
        );

        match pending.outcome().await.unwrap() {
            QueryOutcome::Matches(games) => assert_eq!(games[0].id, "a"),
            QueryOutcome::Superseded => panic!("sole query cannot be superseded"),
        }
    }

    #[tokio::test]
    async fn test_earlier_query_is_superseded() {
        let engine = QueryEngine::spawn();

        let first = engine.dispatch(
            catalog(),
            "en",
            QueryOp::Search {
                term: "block".to_string(),
            },
        );
        let second = engine.dispatch(
            catalog(),
            "en",
            QueryOp::Search {
                term: "racer".to_string(),
            },
        );

        assert!(matches!(
            first.outcome().await.unwrap(),
            QueryOutcome::Superseded
        ));
        match second.outcome().await.unwrap() {
            QueryOutcome::Matches(games) => assert_eq!(games[0].id, "b"),
            QueryOutcome::Superseded => panic!("latest query must settle with matches"),
        }
    }
}
