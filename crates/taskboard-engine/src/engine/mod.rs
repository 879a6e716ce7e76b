//! Drag-and-drop board reconciliation.
//!
//! The engine keeps three views of the board in agreement:
//! - the authoritative lists in the [`QueryCache`],
//! - a transient overlay owned by the engine while a gesture is in progress,
//! - durable storage, written when a drop commits.
//!
//! Hover events only touch the overlay. Drops commit: column order is saved
//! and written to the cache at once, task moves are sent to the gateway on a
//! spawned task while the overlay is persisted optimistically. Every task
//! commit takes a new [`Generation`], and the optimistic cache write is guarded
//! by the cache epoch captured at drop time, so an invalidation that lands
//! first always wins. A rejected update rolls back only the rejected task in
//! storage, invalidates the cache and refetches. Other moves made in the
//! meantime survive.
//!
//! Read-modify-write cycles on the stored task list are serialized by an
//! async lock.
//!
//! Entry points are synchronous and must be called from within a tokio
//! runtime. Locks are never held across an `.await`.

mod drag;
mod view;

pub use drag::{ActiveDrag, DragEvent, DragPayload, DragSubject, Generation};
pub use view::{column_task_counts, BoardView, ColumnView};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use taskboard_core::BoardError;
use taskboard_domain::{
    array_move, Column, ColumnId, FilterState, SettingsStore, Task, TaskId, TaskPatch,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cache::QueryKey;
use crate::client::QueryClient;
use crate::notification::Notification;

use drag::{move_over_column, move_over_task};

const MOVE_FAILED_MESSAGE: &str = "Failed to move task. Changes will be reverted.";

#[derive(Debug, Default)]
struct DragState {
    active: Option<ActiveDrag>,
    overlay_tasks: Option<Arc<Vec<Task>>>,
    overlay_columns: Option<Arc<Vec<Column>>>,
    /// Authoritative tasks when the current task gesture started.
    baseline_tasks: Option<Arc<Vec<Task>>>,
    /// Bumped on every drag start; a settle timer only fires for its own gesture.
    gesture: u64,
}

struct Shared {
    client: QueryClient,
    settings: SettingsStore,
    state: Mutex<DragState>,
    generation: AtomicU64,
    settle_delay: Duration,
    notifications: mpsc::UnboundedSender<Notification>,
    pending: Mutex<Vec<JoinHandle<()>>>,
    persist: tokio::sync::Mutex<()>,
}

/// Cloneable handle to the board engine. Clones share all state.
#[derive(Clone)]
pub struct BoardEngine {
    shared: Arc<Shared>,
}

impl BoardEngine {
    /// Create an engine and the receiving end of its notifications.
    pub fn new(
        client: QueryClient,
        settings: SettingsStore,
        settle_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Self {
            shared: Arc::new(Shared {
                client,
                settings,
                state: Mutex::new(DragState::default()),
                generation: AtomicU64::new(0),
                settle_delay,
                notifications: tx,
                pending: Mutex::new(Vec::new()),
                persist: tokio::sync::Mutex::new(()),
            }),
        };
        (engine, rx)
    }

    pub fn client(&self) -> &QueryClient {
        &self.shared.client
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.shared.settings
    }

    /// Sender for other flows that share this engine's notification stream.
    pub fn notifier(&self) -> mpsc::UnboundedSender<Notification> {
        self.shared.notifications.clone()
    }

    /// Overlay tasks during a gesture, the cached tasks otherwise.
    pub fn tasks(&self) -> Arc<Vec<Task>> {
        let state = self.shared.state.lock();
        self.tasks_in(&state)
    }

    /// Overlay columns during a gesture, the cached columns otherwise.
    pub fn columns(&self) -> Arc<Vec<Column>> {
        let state = self.shared.state.lock();
        self.columns_in(&state)
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks().iter().find(|t| t.id == id).cloned()
    }

    pub fn active(&self) -> Option<ActiveDrag> {
        self.shared.state.lock().active.clone()
    }

    pub fn has_overlay(&self) -> bool {
        let state = self.shared.state.lock();
        state.overlay_tasks.is_some() || state.overlay_columns.is_some()
    }

    pub fn latest_generation(&self) -> Generation {
        Generation(self.shared.generation.load(Ordering::SeqCst))
    }

    /// Filtered and sorted board as it should be rendered now.
    pub fn board_view(&self, filter: &FilterState) -> BoardView {
        let (columns, tasks) = {
            let state = self.shared.state.lock();
            (self.columns_in(&state), self.tasks_in(&state))
        };
        BoardView::build(&columns, &tasks, filter)
    }

    /// Unfiltered task count per column from the authoritative lists.
    pub fn column_task_counts(&self) -> Vec<(ColumnId, usize)> {
        let cache = self.shared.client.cache();
        let columns = cache.columns().unwrap_or_default();
        let tasks = cache.tasks().unwrap_or_default();
        column_task_counts(&columns, &tasks)
    }

    fn tasks_in(&self, state: &DragState) -> Arc<Vec<Task>> {
        state
            .overlay_tasks
            .clone()
            .or_else(|| self.shared.client.cache().tasks())
            .unwrap_or_default()
    }

    fn columns_in(&self, state: &DragState) -> Arc<Vec<Column>> {
        state
            .overlay_columns
            .clone()
            .or_else(|| self.shared.client.cache().columns())
            .unwrap_or_default()
    }

    pub fn on_drag_start(&self, payload: DragPayload) {
        if let DragPayload::Column(column) = &payload {
            if !self.shared.settings.can_move_columns() {
                tracing::debug!("Column {} drag ignored, column movement is off", column.id);
                return;
            }
        }

        let mut state = self.shared.state.lock();
        state.gesture += 1;
        if let DragPayload::Task(_) = payload {
            state.baseline_tasks = self.shared.client.cache().tasks();
        }
        tracing::debug!("Drag started on {}", payload.subject());
        state.active = Some(payload);
    }

    pub fn on_drag_over(&self, event: DragEvent) {
        let Some(over) = event.over else {
            return;
        };
        if event.active == over {
            return;
        }
        // Columns only reorder on drop
        let DragSubject::Task(active_id) = event.active else {
            return;
        };

        let mut state = self.shared.state.lock();
        let columns = self.columns_in(&state);
        let current = self.tasks_in(&state);

        let next = match over {
            DragSubject::Task(over_id) => move_over_task(&current, active_id, over_id, &columns),
            DragSubject::Column(column_id) => {
                move_over_column(&current, active_id, column_id, &columns)
            }
        };
        state.overlay_tasks = Some(Arc::new(next));
    }

    pub fn on_drag_end(&self, event: DragEvent) {
        let Some(over) = event.over else {
            tracing::debug!("{} dropped outside the board", event.active);
            self.shared.state.lock().active = None;
            self.arm_settle();
            return;
        };

        match event.active {
            DragSubject::Column(column_id) => self.drop_column(column_id, over),
            DragSubject::Task(task_id) => self.drop_task(task_id),
        }
        self.arm_settle();
    }

    fn drop_column(&self, active_id: ColumnId, over: DragSubject) {
        let mut state = self.shared.state.lock();
        if matches!(state.active, Some(DragPayload::Column(_))) {
            state.active = None;
        }

        let over_id = match over {
            DragSubject::Column(id) if id != active_id => id,
            DragSubject::Column(_) => return,
            DragSubject::Task(task_id) => {
                tracing::debug!("Column {} dropped on task {}, ignoring", active_id, task_id);
                return;
            }
        };
        if !self.shared.settings.can_move_columns() {
            tracing::debug!("Column movement is off, ignoring drop of column {}", active_id);
            return;
        }

        let columns = self.columns_in(&state);
        let position = |id: ColumnId| columns.iter().position(|c| c.id == id);
        let (Some(from), Some(to)) = (position(active_id), position(over_id)) else {
            tracing::debug!("Column {} or {} not on the board", active_id, over_id);
            return;
        };

        let reordered = array_move(&columns, from, to);
        let order: Vec<ColumnId> = reordered.iter().map(|c| c.id).collect();
        tracing::info!("Column {} moved to position {}", active_id, to);

        state.overlay_columns = Some(self.shared.client.cache().set_columns(reordered));
        drop(state);

        let storage = self.shared.client.storage().clone();
        self.track(tokio::spawn(async move {
            if let Err(e) = storage.store_column_order(&order).await {
                tracing::error!("Failed to save column order: {}", e);
            }
        }));
    }

    fn drop_task(&self, task_id: TaskId) {
        let (overlay, baseline) = {
            let mut state = self.shared.state.lock();
            state.active = None;
            (state.overlay_tasks.clone(), state.baseline_tasks.clone())
        };

        let committed = match overlay {
            Some(overlay) => overlay,
            None => match self.shared.client.cache().tasks() {
                Some(tasks) => {
                    tracing::debug!("No overlay for task {}, committing it unchanged", task_id);
                    tasks
                }
                None => {
                    tracing::debug!("Dropped task {} before tasks were loaded", task_id);
                    return;
                }
            },
        };

        let Some(task) = committed.iter().find(|t| t.id == task_id).cloned() else {
            tracing::debug!("Dropped task {} is not on the board", task_id);
            return;
        };

        let generation = Generation(self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1);
        let epoch = self.shared.client.cache().epoch(QueryKey::Tasks);
        tracing::info!(
            "Committing task {} to column {} ({})",
            task.id,
            task.column_id,
            generation
        );

        let engine = self.clone();
        self.track(tokio::spawn(async move {
            engine
                .commit_task(generation, task, committed, baseline, epoch)
                .await;
        }));
    }

    async fn commit_task(
        &self,
        generation: Generation,
        task: Task,
        committed: Arc<Vec<Task>>,
        baseline: Option<Arc<Vec<Task>>>,
        epoch: u64,
    ) {
        let client = &self.shared.client;
        let request = client
            .gateway()
            .update_task(task.id, TaskPatch::placement_of(&task));

        let optimistic = async {
            let _guard = self.shared.persist.lock().await;
            if client.cache().epoch(QueryKey::Tasks) != epoch {
                // A rollback landed first; its list must not be overwritten
                tracing::warn!("Tasks were invalidated, dropping optimistic write of {}", generation);
                self.merge_into_storage(&task).await;
                return;
            }
            if let Err(e) = client.storage().store_tasks(&committed).await {
                tracing::error!("Failed to save tasks: {}", e);
            }
            if !client.cache().write_tasks_if_epoch(committed.to_vec(), epoch) {
                tracing::warn!("Tasks were invalidated, dropping optimistic write of {}", generation);
            }
        };

        let (result, ()) = tokio::join!(request, optimistic);
        match result {
            Ok(updated) => self.reconcile(generation, updated).await,
            Err(e) => self.recover(generation, &task, baseline, e).await,
        }
    }

    async fn reconcile(&self, generation: Generation, updated: Task) {
        if generation < self.latest_generation() {
            tracing::warn!("Ignoring stale response for task {} ({})", updated.id, generation);
            return;
        }

        {
            let _guard = self.shared.persist.lock().await;
            self.merge_into_storage(&updated).await;
        }

        let cache = self.shared.client.cache();
        let differs = cache
            .tasks()
            .is_some_and(|tasks| tasks.iter().any(|t| t.id == updated.id && *t != updated));
        if differs {
            cache.update_tasks(|tasks| replace_task(tasks, &updated));
        }
        tracing::debug!("Task {} confirmed ({})", updated.id, generation);
    }

    async fn recover(
        &self,
        generation: Generation,
        task: &Task,
        baseline: Option<Arc<Vec<Task>>>,
        error: BoardError,
    ) {
        tracing::error!("Failed to update task {} ({}): {}", task.id, generation, error);
        self.notify(Notification::Error(MOVE_FAILED_MESSAGE.to_string()));

        let client = &self.shared.client;
        {
            let _guard = self.shared.persist.lock().await;
            match baseline.as_ref().and_then(|b| b.iter().find(|t| t.id == task.id)) {
                Some(previous) => self.merge_into_storage(previous).await,
                None => tracing::warn!("No pre-drag copy of task {}, keeping stored tasks", task.id),
            }
            client.cache().invalidate(QueryKey::Tasks);
        }
        self.shared.state.lock().overlay_tasks = None;

        match client.refetch_tasks().await {
            Ok(tasks) => tracing::info!("Reverted board to {} tasks", tasks.len()),
            Err(e) => tracing::error!("Failed to refetch tasks: {}", e),
        }
    }

    /// Replace the stored copy of `task`, leaving every other task as stored.
    /// Callers hold the persist lock.
    async fn merge_into_storage(&self, task: &Task) {
        let client = &self.shared.client;
        let current = match client.storage().load_tasks().await {
            Ok(Some(tasks)) => tasks,
            Ok(None) => client.cache().tasks().map(|t| t.to_vec()).unwrap_or_default(),
            Err(e) => {
                tracing::error!("Failed to read tasks before saving task {}: {}", task.id, e);
                return;
            }
        };
        if !current.iter().any(|t| t.id == task.id) {
            tracing::debug!("Task {} is not stored, nothing to merge", task.id);
            return;
        }
        let merged = replace_task(&current, task);
        if let Err(e) = client.storage().store_tasks(&merged).await {
            tracing::error!("Failed to save task {}: {}", task.id, e);
        }
    }

    fn notify(&self, notification: Notification) {
        if let Err(e) = self.shared.notifications.send(notification) {
            tracing::debug!("Notification dropped, no listener: {:?}", e.0);
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.shared.pending.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Discard the overlay once `settle_delay` passes without a new gesture.
    fn arm_settle(&self) {
        let gesture = {
            let state = self.shared.state.lock();
            if state.active.is_some() {
                return;
            }
            state.gesture
        };

        let engine = self.clone();
        let delay = self.shared.settle_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.settle_if_idle(Some(gesture));
        });
    }

    /// Discard the overlay now, unless a gesture is in progress.
    pub fn settle_now(&self) {
        self.settle_if_idle(None);
    }

    fn settle_if_idle(&self, gesture: Option<u64>) {
        let mut state = self.shared.state.lock();
        if state.active.is_some() || gesture.is_some_and(|g| g != state.gesture) {
            return;
        }
        if state.overlay_tasks.is_some() || state.overlay_columns.is_some() {
            tracing::debug!("Overlay settled");
        }
        state.overlay_tasks = None;
        state.overlay_columns = None;
        state.baseline_tasks = None;
    }

    /// Wait for every in-flight commit, including failure recovery.
    pub async fn wait_for_commits(&self) {
        loop {
            let handles = std::mem::take(&mut *self.shared.pending.lock());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::error!("Commit task failed: {}", e);
                }
            }
        }
    }
}

fn replace_task(tasks: &[Task], task: &Task) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
        .collect()
}
