#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::assessment::session::AssessmentSession;

struct Entry {
    session: AssessmentSession,
    /// Last insert or mutation. Reads do not count as activity.
    last_active: Instant,
}

/// In-memory session registry. Each session is owned by exactly one user;
/// nothing here is persisted. Idle sessions are dropped by `sweep_idle`.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: AssessmentSession) -> Uuid {
        let id = session.id;
        let entry = Entry {
            session,
            last_active: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        id
    }

    /// Returns a snapshot of the session.
    pub async fn get(&self, id: Uuid) -> Option<AssessmentSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|e| e.session.clone())
    }

    /// Runs `f` against the session under the write lock and marks it active.
    /// Returns `None` when the session does not exist.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut AssessmentSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(|e| {
            e.last_active = Instant::now();
            f(&mut e.session)
        })
    }

    pub async fn remove(&self, id: Uuid) -> Option<AssessmentSession> {
        self.sessions.write().await.remove(&id).map(|e| e.session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for at least `ttl`. Returns how many were dropped.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| now.duration_since(e.last_active) < ttl);
        before - sessions.len()
    }
}

/// How often the sweeper runs for a given idle TTL.
pub fn sweep_period(ttl: Duration) -> Duration {
    (ttl / 4).clamp(Duration::from_secs(1), Duration::from_secs(300))
}

/// Periodically expires idle sessions for the lifetime of the process.
pub fn spawn_idle_sweeper(store: SessionStore, ttl: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_period(ttl));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let expired = store.sweep_idle(ttl).await;
            if expired > 0 {
                info!(expired, ttl_secs = ttl.as_secs(), "expired idle assessment sessions");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::questions::{QuestionBank, SliderPolicy};
    use crate::models::user::UserProfile;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn session() -> AssessmentSession {
        AssessmentSession::new(
            UserProfile::anonymous(),
            Arc::new(QuestionBank::canonical()),
            SliderPolicy::Reject,
        )
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = SessionStore::new();
        let id = store.insert(session()).await;
        assert!(store.get(id).await.is_some());
        assert_eq!(store.len().await, 1);
        assert!(store.remove(id).await.is_some());
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.insert(session()).await;
        store.update(id, |s| s.start()).await.unwrap().unwrap();
        let phase = store.get(id).await.unwrap().phase();
        assert_eq!(phase, crate::assessment::session::Phase::InProgress);
    }

    #[tokio::test]
    async fn test_update_missing_session() {
        let store = SessionStore::new();
        assert!(store.update(Uuid::new_v4(), |s| s.attempt()).await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_drops_only_idle_sessions() {
        tokio::time::pause();
        let store = SessionStore::new();
        let idle = store.insert(session()).await;
        let active = store.insert(session()).await;

        tokio::time::advance(DAY / 2).await;
        store.update(active, |s| s.start()).await.unwrap().unwrap();
        tokio::time::advance(DAY / 2 + Duration::from_secs(1)).await;

        assert_eq!(store.sweep_idle(DAY).await, 1);
        assert!(store.get(idle).await.is_none());
        assert!(store.get(active).await.is_some());
    }

    #[tokio::test]
    async fn test_reads_do_not_keep_session_alive() {
        tokio::time::pause();
        let store = SessionStore::new();
        let id = store.insert(session()).await;
        tokio::time::advance(DAY - Duration::from_secs(1)).await;
        assert!(store.get(id).await.is_some());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.sweep_idle(DAY).await, 1);
    }

    #[tokio::test]
    async fn test_sweeper_expires_abandoned_sessions() {
        tokio::time::pause();
        let store = SessionStore::new();
        let sweeper = spawn_idle_sweeper(store.clone(), DAY);
        for _ in 0..1000 {
            store.insert(session()).await;
        }
        assert_eq!(store.len().await, 1000);

        tokio::time::advance(30 * DAY).await;
        // let the sweeper observe the new clock
        tokio::time::sleep(2 * sweep_period(DAY)).await;

        assert_eq!(store.len().await, 0);
        sweeper.abort();
    }

    #[test]
    fn test_sweep_period_bounds() {
        assert_eq!(sweep_period(Duration::from_secs(2)), Duration::from_secs(1));
        assert_eq!(sweep_period(Duration::from_secs(400)), Duration::from_secs(100));
        assert_eq!(sweep_period(DAY), Duration::from_secs(300));
    }
}
