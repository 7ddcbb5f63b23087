//! Batching adapter: single-item writes accumulated into bulk flushes.

use anyhow::anyhow;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::mem;
use std::thread::{self, JoinHandle};

use crate::errors::{Error, Result};
use crate::store::BulkWriter;

/// Default maximum number of passwords per bulk flush.
pub const BULK_MAX_DEFAULT: usize = 1000;

/// Presents a single-item `add` on top of a [`BulkWriter`], so the
/// backend's wire protocol runs once per batch instead of once per item.
///
/// The adapter owns the store for the duration of the run and hands it
/// back at [`finish`](Self::finish). One worker thread, spawned at
/// construction, performs all flushes: the batch channel is a rendezvous
/// handoff and the result channel holds exactly one outstanding value,
/// so at most one bulk write is ever in flight. The producer blocks in
/// `add` only when it would start flush N+1 before flush N's result has
/// been collected, bounding memory to two buffers and giving natural
/// backpressure. Buffers are moved across the handoff, never shared.
///
/// Once a flush fails the adapter is terminal: the error surfaces on the
/// next `add` or at `finish`, and no further batches are accepted.
pub struct BulkAdapter<S: BulkWriter + 'static> {
    buf: Vec<String>,
    max: usize,
    batch_tx: Sender<Vec<String>>,
    result_rx: Receiver<Result<()>>,
    worker: JoinHandle<S>,
}

impl<S: BulkWriter + 'static> BulkAdapter<S> {
    /// Wrap `store` with the default batch size ([`BULK_MAX_DEFAULT`]).
    pub fn new(store: S) -> Self {
        Self::with_max(store, BULK_MAX_DEFAULT)
    }

    /// Wrap `store`, flushing every `max` items (clamped to at least 1).
    pub fn with_max(mut store: S, max: usize) -> Self {
        let max = max.max(1);
        let (batch_tx, batch_rx) = bounded::<Vec<String>>(0);
        let (result_tx, result_rx) = bounded::<Result<()>>(1);

        let worker = thread::spawn(move || {
            // Prime the result slot so the first flush has an outcome
            // to collect.
            let _ = result_tx.send(Ok(()));
            for batch in batch_rx.iter() {
                let res = store.add_multiple(&batch);
                let failed = res.is_err();
                if result_tx.send(res).is_err() || failed {
                    break;
                }
            }
            store
        });

        BulkAdapter {
            buf: Vec::with_capacity(max),
            max,
            batch_tx,
            result_rx,
            worker,
        }
    }

    /// Append one sanitized password. When the buffer reaches the batch
    /// size, collect the previous flush's outcome (propagating its error)
    /// and hand the full buffer to the worker.
    pub fn add(&mut self, password: String) -> Result<()> {
        self.buf.push(password);
        if self.buf.len() >= self.max {
            match self.result_rx.recv() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(terminated()),
            }
            let batch = mem::replace(&mut self.buf, Vec::with_capacity(self.max));
            if self.batch_tx.send(batch).is_err() {
                return Err(terminated());
            }
        }
        Ok(())
    }

    /// Flush any remaining partial buffer, stop the worker, and return
    /// the store together with the last flush's outcome.
    pub fn finish(self) -> (S, Result<()>) {
        let BulkAdapter {
            buf,
            max: _,
            batch_tx,
            result_rx,
            worker,
        } = self;

        let mut res = Ok(());
        if !buf.is_empty() {
            res = match result_rx.recv() {
                Ok(Ok(())) => {
                    if batch_tx.send(buf).is_err() {
                        Err(terminated())
                    } else {
                        Ok(())
                    }
                }
                Ok(Err(e)) => Err(e),
                Err(_) => Err(terminated()),
            };
        }

        // Closing the batch channel ends the worker loop.
        drop(batch_tx);
        let store = match worker.join() {
            Ok(store) => store,
            Err(payload) => std::panic::resume_unwind(payload),
        };

        // A disconnected result slot means the worker stopped on an error
        // already collected by an earlier add.
        let last = result_rx.recv().unwrap_or(Ok(()));
        if res.is_ok() {
            res = last;
        }
        (store, res)
    }
}

fn terminated() -> Error {
    Error::store(anyhow!("bulk writer terminated after a failed flush"))
}
