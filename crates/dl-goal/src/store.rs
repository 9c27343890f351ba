// store.rs: GoalStore, the owner of the goal list.
//
// The store keeps the canonical list in memory and mirrors it to a
// KeyValueStore under one key. Mutations update memory first and return
// straight away; the encoded list is then handed to a background writer task
// which persists snapshots in the order they were issued. Snapshots that pile
// up while a write is in flight are coalesced, and only the newest is written,
// so storage always converges on the latest in-memory state.
//
// `GoalStore::open` is the only constructor and it finishes loading before it
// returns, so no mutation can ever race the initial load. Mutations take
// `&mut self`, which serializes them.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::config::{check_date_format, format_date, AppConfig};
use crate::error::GoalError;
use crate::goal::{Goal, GoalId};
use crate::grouping::{group_by_date, DisplayRow};
use crate::ordering::OrderingPolicy;
use crate::persistence::KeyValueStore;

/// How a GoalStore names, stamps, and orders its goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Key the encoded list is stored under.
    pub key: String,

    /// chrono format for `Goal.date`.
    pub date_format: String,

    pub ordering: OrderingPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for StoreOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            key: config.storage_key.clone(),
            date_format: config.date_format.clone(),
            ordering: config.ordering,
        }
    }
}

/// Read and decode the goal list stored under `key`.
///
/// Nothing stored yet is an empty list. Unlike [`GoalStore::open`], read and
/// decode failures are returned to the caller.
pub async fn load_goals(
    backend: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<Goal>, GoalError> {
    match backend.get(key).await? {
        Some(blob) => codec::decode(&blob),
        None => Ok(Vec::new()),
    }
}

/// Messages for the background writer.
enum PersistRequest {
    /// Persist this encoded snapshot of the whole list.
    Save { revision: u64, blob: String },

    /// Reply once every earlier snapshot has been written (or has failed).
    Flush(oneshot::Sender<Result<(), String>>),
}

/// Owns the backend on the writer task.
struct PersistWriter {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    rx: mpsc::UnboundedReceiver<PersistRequest>,
    /// Outcome of the most recent write, reported to flush callers.
    last_result: Result<(), String>,
}

impl PersistWriter {
    async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let mut latest = None;
            let mut waiters = Vec::new();
            Self::absorb(request, &mut latest, &mut waiters);

            // Coalesce whatever else is already queued.
            while let Ok(request) = self.rx.try_recv() {
                Self::absorb(request, &mut latest, &mut waiters);
            }

            if let Some((revision, blob)) = latest {
                self.write(revision, blob).await;
            }
            for waiter in waiters {
                let _ = waiter.send(self.last_result.clone());
            }
        }
        tracing::debug!(key = %self.key, "goal writer stopped");
    }

    fn absorb(
        request: PersistRequest,
        latest: &mut Option<(u64, String)>,
        waiters: &mut Vec<oneshot::Sender<Result<(), String>>>,
    ) {
        match request {
            PersistRequest::Save { revision, blob } => *latest = Some((revision, blob)),
            PersistRequest::Flush(reply) => waiters.push(reply),
        }
    }

    async fn write(&mut self, revision: u64, blob: String) {
        match self.backend.set(&self.key, blob).await {
            Ok(()) => {
                tracing::debug!(key = %self.key, revision, "goals persisted");
                self.last_result = Ok(());
            }
            Err(e) => {
                // Not retried: memory stays authoritative for this session.
                tracing::warn!(key = %self.key, revision, "failed to persist goals: {}", e);
                self.last_result = Err(e.to_string());
            }
        }
    }
}

/// The in-memory goal list plus its link to durable storage.
pub struct GoalStore {
    goals: Vec<Goal>,
    options: StoreOptions,
    clock: Arc<dyn Clock>,
    persist_tx: mpsc::UnboundedSender<PersistRequest>,
    writer: JoinHandle<()>,
    revision: u64,
}

impl GoalStore {
    /// Load the stored list and return a store ready for mutations.
    ///
    /// Must be called inside a tokio runtime. Storage problems never fail the
    /// open: unreadable or corrupt data yields an empty list (see
    /// [`GoalStore::open_with_clock`]). Only invalid options are an error.
    pub async fn open(
        backend: Arc<dyn KeyValueStore>,
        options: StoreOptions,
    ) -> Result<Self, GoalError> {
        Self::open_with_clock(backend, options, Arc::new(SystemClock)).await
    }

    /// Like [`GoalStore::open`], with an explicit clock for goal dates.
    ///
    /// A blob that cannot be decoded is copied to `<key>.corrupt` before the
    /// store starts empty, so the first write does not destroy it.
    pub async fn open_with_clock(
        backend: Arc<dyn KeyValueStore>,
        options: StoreOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GoalError> {
        check_date_format(&options.date_format)?;

        let key = options.key.clone();
        let goals = match backend.get(&key).await {
            Ok(None) => {
                tracing::info!(key = %key, "no stored goals, starting empty");
                Vec::new()
            }
            Ok(Some(blob)) => match codec::decode(&blob) {
                Ok(goals) => {
                    tracing::info!(key = %key, count = goals.len(), "loaded goals");
                    goals
                }
                Err(e) => {
                    tracing::warn!(key = %key, "stored goals are unreadable, starting empty: {}", e);
                    let backup_key = format!("{}.corrupt", key);
                    if let Err(e) = backend.set(&backup_key, blob).await {
                        tracing::warn!(key = %backup_key, "could not back up unreadable goals: {}", e);
                    }
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(key = %key, "could not read stored goals, starting empty: {}", e);
                Vec::new()
            }
        };
        warn_on_duplicate_ids(&goals);

        let (persist_tx, rx) = mpsc::unbounded_channel();
        let writer = PersistWriter {
            backend,
            key,
            rx,
            last_result: Ok(()),
        };
        let writer = tokio::spawn(writer.run());

        Ok(Self {
            goals,
            options,
            clock,
            persist_tx,
            writer,
            revision: 0,
        })
    }

    /// Add a goal with the given text.
    ///
    /// Surrounding whitespace is trimmed. If nothing is left this is a no-op
    /// and returns `None`; otherwise the new goal is placed per the ordering
    /// policy, a persist is scheduled, and the goal is returned.
    pub fn add(&mut self, text: &str) -> Option<&Goal> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring goal with empty text");
            return None;
        }

        let today = self.clock.today();
        let date = match format_date(today, &self.options.date_format) {
            Ok(date) => date,
            Err(e) => {
                // Already checked at open.
                tracing::warn!("{}, using ISO date", e);
                today.to_string()
            }
        };
        let goal = Goal::new(text, date);
        tracing::debug!(id = %goal.id, "goal added");

        let index = self.options.ordering.insert(&mut self.goals, goal);
        self.schedule_persist();
        self.goals.get(index)
    }

    /// Flip the completion flag of the goal with `id`.
    ///
    /// Returns the new flag, or `None` (and changes nothing) if no goal has
    /// that id. With `completed_last` the list is then stably re-sorted.
    pub fn toggle_completion(&mut self, id: &GoalId) -> Option<bool> {
        let Some(goal) = self.goals.iter_mut().find(|g| &g.id == id) else {
            tracing::debug!(id = %id, "ignoring toggle for unknown goal");
            return None;
        };
        let completed = goal.toggle();
        tracing::debug!(id = %id, completed, "goal toggled");

        self.options.ordering.after_toggle(&mut self.goals);
        self.schedule_persist();
        Some(completed)
    }

    /// Goals in canonical order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Date-grouped rows for display, rebuilt on each call.
    pub fn display_rows(&self) -> Vec<DisplayRow<'_>> {
        group_by_date(&self.goals)
    }

    /// Wait until every persist scheduled so far has been attempted.
    ///
    /// Returns the outcome of the most recent write.
    pub async fn flush(&self) -> Result<(), GoalError> {
        let (reply, done) = oneshot::channel();
        self.persist_tx
            .send(PersistRequest::Flush(reply))
            .map_err(|_| GoalError::PersistenceWrite("goal writer is not running".into()))?;
        done.await
            .map_err(|_| GoalError::PersistenceWrite("goal writer stopped before flushing".into()))?
            .map_err(GoalError::PersistenceWrite)
    }

    /// Flush pending writes and stop the background writer.
    pub async fn close(self) -> Result<(), GoalError> {
        let result = self.flush().await;
        let Self {
            persist_tx, writer, ..
        } = self;
        drop(persist_tx);
        if let Err(e) = writer.await {
            tracing::warn!("goal writer task failed: {}", e);
        }
        result
    }

    /// Encode the current list and queue it for the writer.
    fn schedule_persist(&mut self) {
        self.revision += 1;
        let blob = match codec::encode(&self.goals) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(revision = self.revision, "could not encode goals: {}", e);
                return;
            }
        };
        let request = PersistRequest::Save {
            revision: self.revision,
            blob,
        };
        if self.persist_tx.send(request).is_err() {
            tracing::warn!(revision = self.revision, "goal writer is not running, change not persisted");
        }
    }
}

fn warn_on_duplicate_ids(goals: &[Goal]) {
    let mut seen = HashSet::with_capacity(goals.len());
    for goal in goals {
        if !seen.insert(&goal.id) {
            tracing::warn!(id = %goal.id, "duplicate goal id in stored goals; toggles affect the first");
        }
    }
}
