//! People Loader - Background thread that fetches and links the people list once

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::components::EnrichedPerson;
use crate::enrichment::link_parents;
use crate::source::{PeopleSource, SourceError};

pub type LoadResult = Result<Vec<EnrichedPerson>, SourceError>;

/// Runs a single fetch off the caller's thread.
///
/// The completion callback only fires while the loader is alive; after
/// [`PeopleLoader::invalidate`] (or drop) a late result is discarded. The
/// fetch itself is not interrupted.
pub struct PeopleLoader {
    alive: Arc<AtomicBool>,
    started: bool,
    thread_handle: Option<JoinHandle<()>>,
}

impl PeopleLoader {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
            started: false,
            thread_handle: None,
        }
    }

    /// Fetch from `source`, link parents, and hand the result to `on_complete`.
    pub fn start<F>(&mut self, source: Arc<dyn PeopleSource>, on_complete: F)
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        // One fetch per loader
        if self.started {
            warn!("People loader already started");
            return;
        }
        self.started = true;

        let alive = Arc::clone(&self.alive);
        let handle = thread::spawn(move || {
            info!("Fetching people from {}", source.describe());
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                source.get_people().map(|people| {
                    info!("Fetched {} people", people.len());
                    link_parents(&people)
                })
            }))
            .unwrap_or_else(|payload| Err(SourceError::Panicked(panic_message(payload.as_ref()))));

            if let Err(e) = &result {
                warn!("People fetch failed: {}", e);
            }

            if alive.load(Ordering::Acquire) {
                on_complete(result);
            } else {
                debug!("Loader torn down before fetch completed; result discarded");
            }
        });

        self.thread_handle = Some(handle);
    }

    /// Stop delivering results. Idempotent.
    pub fn invalidate(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// True while the fetch thread is still running.
    pub fn is_pending(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Block until the fetch thread has finished.
    pub fn wait(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("People loader thread panicked");
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Default for PeopleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PeopleLoader {
    fn drop(&mut self) {
        // The fetch cannot be cancelled, so don't join; just mute it.
        self.invalidate();
    }
}
