/* ********************************************************************** **
**  This file is part of matops.                                          **
**                                                                        **
**  matops is free software: you can redistribute it and/or modify it     **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
** ********************************************************************** */

//! Evaluates every applicable operation on the latest edit, in parallel.
//!
//! Each edit that survives the debounce window becomes a [`Batch`]: an
//! immutable snapshot of the inputs plus one slot per operation. Tasks on the
//! thread pool fill in their own slot and nothing else. A newer batch simply
//! replaces the older one as "current"; tasks still running for the old one
//! finish, notice they are stale, and throw their results away.

use crate::FailResult;
use crate::catalog::{self, Inputs, Operation, OperationName};
use crate::config::Settings;
use crate::debounce::Debouncer;
use crate::util::{lock, read, write, AtomicCounter};

use matops_linalg::Outcome;
use serde::Serialize;

use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// State of one operation within one batch.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize)]
#[serde(tag = "status", content = "outcome", rename_all = "kebab-case")]
pub enum Entry {
    Pending,
    Done(Outcome),
}

impl Entry {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Entry::Pending => None,
            Entry::Done(outcome) => Some(outcome),
        }
    }

    pub fn is_done(&self) -> bool { self.outcome().is_some() }
}

/// A copy of the current batch at some instant.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize)]
pub struct Snapshot {
    /// Counts batches, starting from 1. Zero means nothing was ever evaluated.
    pub generation: u64,
    pub inputs: Option<Arc<Inputs>>,
    pub entries: BTreeMap<OperationName, Entry>,
}

impl Snapshot {
    pub fn get(&self, name: OperationName) -> Option<&Entry> { self.entries.get(&name) }

    pub fn outcome(&self, name: OperationName) -> Option<&Outcome> {
        self.get(name).and_then(Entry::outcome)
    }

    pub fn is_complete(&self) -> bool { self.entries.values().all(Entry::is_done) }
}

/// Called with the finished snapshot whenever a batch completes while still current.
///
/// Runs on a pool thread and must not call back into [`Scheduler::wait_until_settled`].
pub type Listener = Box<dyn Fn(&Snapshot) + Send + Sync>;

pub struct Scheduler {
    // declared first so that it is dropped (and its thread joined) first
    debouncer: Debouncer<Stamped>,
    shared: Arc<Shared>,
}

struct Shared {
    pool: rayon::ThreadPool,
    current: RwLock<Option<Arc<Batch>>>,
    /// Edits handed to the debouncer that have not yet become a batch.
    queued: AtomicCounter,
    /// Source of `Stamped::seq`.
    next_seq: AtomicU64,
    settled_lock: Mutex<()>,
    settled: Condvar,
    listener: Option<Listener>,
}

/// An edit, numbered in the order it reached the scheduler.
struct Stamped {
    seq: u64,
    inputs: Inputs,
}

struct Batch {
    generation: u64,
    /// `seq` of the newest edit this batch stands for. Identical later edits
    /// raise it without starting a new batch.
    seq: AtomicU64,
    inputs: Arc<Inputs>,
    slots: Vec<Slot>,
    remaining: AtomicUsize,
}

struct Slot {
    operation: &'static Operation,
    entry: Mutex<Entry>,
}

impl Scheduler {
    pub fn new(settings: &Settings) -> FailResult<Self> {
        Scheduler::build(settings, None)
    }

    /// Like `new`, but `listener` sees every batch that completes without being superseded.
    pub fn with_listener<F>(settings: &Settings, listener: F) -> FailResult<Self>
    where F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        Scheduler::build(settings, Some(Box::new(listener)))
    }

    fn build(settings: &Settings, listener: Option<Listener>) -> FailResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("matops-eval-{}", i))
            .panic_handler(|_| error!("an evaluation task panicked; its entry will stay pending"));
        if let Some(threads) = settings.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        let shared = Arc::new(Shared {
            pool,
            current: RwLock::new(None),
            queued: AtomicCounter::default(),
            next_seq: AtomicU64::new(0),
            settled_lock: Mutex::new(()),
            settled: Condvar::new(),
            listener,
        });

        let debouncer = Debouncer::spawn("matops-debounce", settings.debounce_window(), {
            let shared = Arc::clone(&shared);
            move |edit: Stamped, count| {
                if count > 1 {
                    debug!("{} edits coalesced", count);
                }
                Shared::start_batch(&shared, edit);
                shared.queued.sub(count);
                shared.notify_settled();
            }
        })?;

        Ok(Scheduler { debouncer, shared })
    }

    /// Record an edit. Evaluation starts once edits stop arriving for the debounce window.
    pub fn edit(&self, inputs: Inputs) {
        let edit = self.shared.stamp(inputs);
        self.shared.queued.inc();
        if !self.debouncer.push(edit) {
            self.shared.queued.sub(1);
            error!("debounce thread is gone; edit dropped");
        }
    }

    /// Evaluate immediately, skipping the debounce window.
    ///
    /// Edits made earlier that are still waiting out their debounce window
    /// are older than this one, and are dropped when the window closes.
    pub fn submit_now(&self, inputs: Inputs) {
        let edit = self.shared.stamp(inputs);
        Shared::start_batch(&self.shared, edit);
        self.shared.notify_settled();
    }

    pub fn snapshot(&self) -> Snapshot {
        match &*read(&self.shared.current) {
            Some(batch) => batch.snapshot(),
            None => Snapshot { generation: 0, inputs: None, entries: BTreeMap::new() },
        }
    }

    /// Block until no edits are waiting and every entry of the current batch is done.
    ///
    /// Returns `None` on timeout.
    pub fn wait_until_settled(&self, timeout: Duration) -> Option<Snapshot> {
        let deadline = Instant::now() + timeout;
        let mut guard = lock(&self.shared.settled_lock);
        loop {
            if self.shared.is_settled() {
                return Some(self.snapshot());
            }

            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            guard = match self.shared.settled.wait_timeout(guard, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}

impl Shared {
    fn stamp(&self, inputs: Inputs) -> Stamped {
        Stamped { seq: self.next_seq.fetch_add(1, Ordering::SeqCst), inputs }
    }

    fn start_batch(this: &Arc<Shared>, Stamped { seq, inputs }: Stamped) {
        let batch = {
            let mut current = write(&this.current);
            if let Some(batch) = &*current {
                if batch.seq.load(Ordering::SeqCst) > seq {
                    debug!("dropping edit {}; batch {} is from a newer edit", seq, batch.generation);
                    return;
                }
                if *batch.inputs == inputs {
                    batch.seq.store(seq, Ordering::SeqCst);
                    debug!("edit is identical to batch {}; not re-evaluating", batch.generation);
                    return;
                }
            }

            let generation = current.as_ref().map_or(1, |b| b.generation + 1);
            let batch = Arc::new(Batch::new(generation, seq, inputs));
            *current = Some(Arc::clone(&batch));
            batch
        };

        let (rows, cols) = batch.inputs.matrix.dims();
        debug!(
            "batch {}: {} operation(s) on a {}x{} matrix ({} edit(s) queued)",
            batch.generation, batch.slots.len(), rows, cols, this.queued,
        );

        for index in 0..batch.slots.len() {
            let shared = Arc::clone(this);
            let batch = Arc::clone(&batch);
            this.pool.spawn(move || shared.run_task(&batch, index));
        }
    }

    fn run_task(&self, batch: &Batch, index: usize) {
        let slot = &batch.slots[index];
        let name = slot.operation.name;

        // Tasks that never started for a superseded batch are skipped outright.
        if !self.is_current(batch) {
            trace!("batch {}: skipping {} (superseded)", batch.generation, name);
            return;
        }

        let outcome = slot.operation.evaluate(&batch.inputs);

        if !self.is_current(batch) {
            trace!("batch {}: discarding {} (superseded)", batch.generation, name);
            return;
        }

        *lock(&slot.entry) = Entry::Done(outcome);
        trace!("batch {}: {} done", batch.generation, name);

        // Held through the listener call, so that `wait_until_settled` cannot
        // observe the finished batch before the listener has seen it.
        let _guard = lock(&self.settled_lock);
        if batch.remaining.fetch_sub(1, Ordering::SeqCst) == 1 {
            debug!("batch {}: complete", batch.generation);
            if let Some(listener) = &self.listener {
                // checked once more so that listeners never see a stale batch
                if self.is_current(batch) {
                    listener(&batch.snapshot());
                }
            }
        }
        self.settled.notify_all();
    }

    fn is_current(&self, batch: &Batch) -> bool {
        match &*read(&self.current) {
            Some(current) => current.generation == batch.generation,
            None => false,
        }
    }

    fn is_settled(&self) -> bool {
        if self.queued.get() > 0 {
            return false;
        }
        match &*read(&self.current) {
            Some(batch) => batch.remaining.load(Ordering::SeqCst) == 0,
            None => true,
        }
    }

    fn notify_settled(&self) {
        let _guard = lock(&self.settled_lock);
        self.settled.notify_all();
    }
}

impl Batch {
    fn new(generation: u64, seq: u64, inputs: Inputs) -> Self {
        let slots: Vec<_> = catalog::applicable_operations(&inputs.matrix)
            .into_iter()
            .filter(|op| op.accepts(&inputs))
            .map(|operation| Slot { operation, entry: Mutex::new(Entry::Pending) })
            .collect();
        let remaining = AtomicUsize::new(slots.len());
        Batch { generation, seq: AtomicU64::new(seq), inputs: Arc::new(inputs), slots, remaining }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            inputs: Some(Arc::clone(&self.inputs)),
            entries: {
                self.slots.iter()
                    .map(|slot| (slot.operation.name, lock(&slot.entry).clone()))
                    .collect()
            },
        }
    }
}
