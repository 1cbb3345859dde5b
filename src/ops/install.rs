//! Install coordinator
//!
//! Each accepted request runs one external clone job as a background task.
//! The coordinator keeps an explicit job table keyed by item id: an id with a
//! job in flight rejects further requests as no-ops, and a table entry is
//! removed only after its completion events have been delivered. Distinct ids
//! install concurrently; the only shared state they touch is the catalog
//! store, which serializes all writes.
//!
//! Installs are full replacements: an existing target directory is removed
//! recursively before the clone starts. There is no in-flight cancellation
//! and no timeout; a hung tool hangs its job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::events::{EventBus, Notification};
use crate::ops::InstallError;
use crate::paths::InstallRoot;
use crate::store::StoreHandle;
use crate::types::{Item, ItemId};

/// External tool that materializes an item's content on disk.
///
/// Invoked as `{program} {clone_verb} {source_url} {target}`; success is a
/// zero exit status. Defaults to `git clone`.
#[derive(Debug, Clone)]
pub struct Retriever {
    program: String,
    clone_verb: String,
}

impl Retriever {
    pub fn new(program: impl Into<String>, clone_verb: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            clone_verb: clone_verb.into(),
        }
    }

    pub fn git() -> Self {
        Self::new("git", "clone")
    }

    /// Resolve the tool binary. A missing tool is an install failure, not a
    /// process error.
    fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }
}

impl Default for Retriever {
    fn default() -> Self {
        Self::git()
    }
}

/// One in-flight install job. The handle is taken by `wait_idle`; the entry
/// itself stays in the table until the job's events have gone out.
#[derive(Debug)]
struct Job {
    handle: Option<JoinHandle<()>>,
}

type JobTable = Arc<Mutex<HashMap<ItemId, Job>>>;

/// Runs install jobs and writes their outcomes back through the store.
#[derive(Debug)]
pub struct InstallCoordinator {
    store: StoreHandle,
    root: InstallRoot,
    bus: EventBus,
    retriever: Retriever,
    jobs: JobTable,
}

impl InstallCoordinator {
    pub fn new(store: StoreHandle, root: InstallRoot, bus: EventBus) -> Self {
        Self::with_retriever(store, root, bus, Retriever::git())
    }

    /// Use a custom retrieval tool (for testing, or a git alternative).
    pub fn with_retriever(
        store: StoreHandle,
        root: InstallRoot,
        bus: EventBus,
        retriever: Retriever,
    ) -> Self {
        Self {
            store,
            root,
            bus,
            retriever,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look an item up in the current catalog and request its install.
    pub async fn install_by_id(&self, id: &ItemId) -> Result<bool, InstallError> {
        let item = self
            .store
            .get(id.clone())
            .await?
            .ok_or_else(|| InstallError::UnknownItem(id.clone()))?;
        self.request_install(&item).await
    }

    /// Start an install job for `item`.
    ///
    /// Returns `Ok(false)` without side effects when a job for this id is
    /// already in flight. Otherwise emits `InstallStarted` synchronously,
    /// spawns the job, and returns `Ok(true)`; the outcome arrives later as
    /// an `InstallFinished` event followed by `CatalogChanged`.
    pub async fn request_install(&self, item: &Item) -> Result<bool, InstallError> {
        let target = self.root.resolve(&item.id)?;

        {
            let mut jobs = self.jobs.lock().await;
            if jobs.contains_key(&item.id) {
                debug!(item = %item.id, "install already in flight, ignoring request");
                return Ok(false);
            }
            jobs.insert(item.id.clone(), Job { handle: None });
        }

        self.bus.emit(Notification::InstallStarted(item.id.clone()));

        let handle = tokio::spawn(run_install_job(
            item.id.clone(),
            item.source_url.clone(),
            target,
            self.retriever.clone(),
            self.store.clone(),
            self.bus.clone(),
            Arc::clone(&self.jobs),
        ));

        if let Some(job) = self.jobs.lock().await.get_mut(&item.id) {
            job.handle = Some(handle);
        }
        Ok(true)
    }

    /// Number of jobs currently in flight.
    pub async fn in_flight(&self) -> usize {
        self.jobs.lock().await.len()
    }

    /// Wait for every currently in-flight job to complete and deliver its
    /// events. New requests made meanwhile are not waited for.
    pub async fn wait_idle(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut jobs = self.jobs.lock().await;
            jobs.values_mut().filter_map(|job| job.handle.take()).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// The background half of one install: clone, write back, notify, then
/// retire the job-table entry.
async fn run_install_job(
    id: ItemId,
    source_url: String,
    target: PathBuf,
    retriever: Retriever,
    store: StoreHandle,
    bus: EventBus,
    jobs: JobTable,
) {
    let success = clone_into(&retriever, &source_url, &target).await;

    match store
        .apply_install_result(id.clone(), success, target)
        .await
    {
        Ok(true) => {}
        Ok(false) => debug!(item = %id, "catalog reloaded during install, result dropped"),
        Err(err) => warn!(item = %id, error = %err, "catalog store unavailable, result lost"),
    }

    bus.emit(Notification::InstallFinished {
        id: id.clone(),
        success,
    });
    bus.emit(Notification::CatalogChanged);

    jobs.lock().await.remove(&id);
}

/// Replace `target` with a fresh clone of `source_url`. Any failure maps to
/// `false`; nothing here aborts the process.
async fn clone_into(retriever: &Retriever, source_url: &str, target: &Path) -> bool {
    // Check for the tool before destroying an existing install.
    let Some(program) = retriever.locate() else {
        warn!(tool = %retriever.program, "retrieval tool not found in environment");
        return false;
    };

    if target.exists() {
        if let Err(err) = tokio::fs::remove_dir_all(target).await {
            warn!(path = %target.display(), error = %err, "failed to clear existing install directory");
            return false;
        }
    }

    let status = Command::new(&program)
        .arg(&retriever.clone_verb)
        .arg(source_url)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) => status.success(),
        Err(err) => {
            warn!(tool = %program.display(), error = %err, "failed to launch retrieval tool");
            false
        }
    }
}
