//! Session gate.
//!
//! The session lives in a store that can change outside the client's
//! awareness (another window, another process, a sibling component). The
//! gate polls that store on a fixed interval and emits changes to
//! subscribers over a `watch` channel. Readers therefore observe the true
//! session with a lag of at most one polling interval; callers must tolerate
//! that staleness.
//!
//! Every mutating operation in the core checks [`SessionGate::is_authenticated`]
//! first and does nothing when it returns `false`.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use gitconnect_model::Session;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::Result;

/// Read access to the backing session store.
pub trait SessionSource: Send + Sync {
    /// Reads the latest session. Must not block for long.
    fn read(&self) -> Session;
}

/// Write access, used only by the login/logout collaborator.
pub trait SessionStore: SessionSource {
    /// Replaces the stored session.
    fn store(&self, session: &Session) -> Result<()>;

    /// Removes the stored session.
    fn clear(&self) -> Result<()>;
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionSource {
    session: RwLock<Session>,
}

impl MemorySessionSource {
    pub fn new(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    /// Replaces the session without going through [`SessionStore`].
    pub fn set(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

impl SessionSource for MemorySessionSource {
    fn read(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionSource {
    fn store(&self, session: &Session) -> Result<()> {
        self.set(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.set(Session::anonymous());
        Ok(())
    }
}

/// Polled view of the current session.
pub struct SessionGate {
    source: Arc<dyn SessionSource>,
    current: watch::Sender<Session>,
    poll_interval: Duration,
}

impl SessionGate {
    /// Creates a gate over `source`, reading it once immediately.
    pub fn new(source: Arc<dyn SessionSource>, poll_interval: Duration) -> Self {
        let (current, _) = watch::channel(source.read());
        Self {
            source,
            current,
            poll_interval,
        }
    }

    /// Latest known session. Never blocks on the backing store.
    pub fn current_session(&self) -> Session {
        self.current.borrow().clone()
    }

    /// True when the latest known session carries a token.
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_authenticated()
    }

    /// Receiver notified whenever a poll observes a different session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.current.subscribe()
    }

    /// Polling interval, the upper bound on observed staleness.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Re-reads the backing store once. Returns `true` if the session changed.
    pub fn refresh(&self) -> bool {
        let latest = self.source.read();
        let changed = self.current.send_if_modified(|current| {
            if *current == latest {
                false
            } else {
                *current = latest;
                true
            }
        });

        if changed {
            tracing::info!(
                "Session changed (authenticated: {})",
                self.current.borrow().is_authenticated()
            );
        }
        changed
    }

    /// Starts polling the backing store every [`poll_interval`](Self::poll_interval).
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_polling(self: &Arc<Self>) -> JoinHandle<()> {
        let gate = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(gate.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                gate.refresh();
            }
        })
    }
}
