//! Last-write-wins debouncing for highlight rescans.
//!
//! Both flavours keep a single pending slot guarded by a generation counter:
//! scheduling bumps the generation, and a request only fires if its
//! generation is still current when the delay has elapsed.
//!
//! - [`Debouncer`] is clock-driven and owns no threads; event loops poll it
//!   with their own notion of "now" (the terminal front end does this).
//! - [`DelayedTask`] runs a closure on a single long-lived worker thread,
//!   for hosts without an event loop to poll from.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default quiescence window before a rescan runs.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Identifies one scheduled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<(Ticket, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a request due `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        if let Some((old, _)) = self.pending.replace((ticket, now + self.delay)) {
            log::trace!("debounce: {old:?} superseded by {ticket:?}");
        }
        ticket
    }

    /// Drops the pending request, if any.
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.pending.take().map(|(ticket, _)| ticket)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending request is due; zero if overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Takes the pending request if it is due at `now`.
    ///
    /// Each ticket is returned at most once.
    pub fn fire_due(&mut self, now: Instant) -> Option<Ticket> {
        match self.pending {
            Some((ticket, due)) if now >= due => {
                self.pending = None;
                log::trace!("debounce: firing {ticket:?}");
                Some(ticket)
            }
            _ => None,
        }
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Request {
    Schedule(Ticket, Job),
    Cancel,
}

/// Debouncer backed by one worker thread that runs a closure after the delay.
///
/// Requests go to the worker over a channel; the worker keeps only the latest
/// one and waits on the channel with a timeout until it is due. Dropping the
/// task shuts the worker down and discards whatever is pending.
pub struct DelayedTask {
    generation: AtomicU64,
    tx: Option<Sender<Request>>,
    worker: Option<JoinHandle<()>>,
}

impl Default for DelayedTask {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl std::fmt::Debug for DelayedTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedTask")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl DelayedTask {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = channel();
        let worker = thread::spawn(move || worker_loop(&rx, delay));
        Self {
            generation: AtomicU64::new(0),
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Runs `job` after the delay unless another request supersedes it first.
    pub fn schedule<F>(&self, job: F) -> Ticket
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.send(Request::Schedule(ticket, Box::new(job)));
        ticket
    }

    /// Invalidates whatever is pending.
    pub fn cancel(&self) {
        self.send(Request::Cancel);
    }

    fn send(&self, request: Request) {
        if let Some(tx) = &self.tx
            && tx.send(request).is_err()
        {
            log::warn!("debounce: worker has stopped, request dropped");
        }
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.tx.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::error!("debounce: worker panicked");
        }
    }
}

fn worker_loop(rx: &Receiver<Request>, delay: Duration) {
    let mut pending: Option<(Ticket, Job, Instant)> = None;

    loop {
        let request = match &pending {
            Some((_, _, due)) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match request {
            Ok(Request::Schedule(ticket, job)) => {
                if let Some((old, _, _)) = pending.replace((ticket, job, Instant::now() + delay)) {
                    log::trace!("debounce: {old:?} superseded by {ticket:?}");
                }
            }
            Ok(Request::Cancel) => {
                pending = None;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some((ticket, job, _)) = pending.take() {
                    log::trace!("debounce: firing {ticket:?}");
                    job();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_after_quiescence() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(50));
        let ticket = d.schedule(t0);

        assert_eq!(d.fire_due(t0 + ms(49)), None);
        assert_eq!(d.fire_due(t0 + ms(50)), Some(ticket));
        assert_eq!(d.fire_due(t0 + ms(100)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn new_edit_resets_the_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(50));
        let first = d.schedule(t0);
        let second = d.schedule(t0 + ms(40));

        assert_ne!(first, second);
        // The first request would have been due here but was superseded.
        assert_eq!(d.fire_due(t0 + ms(60)), None);
        assert_eq!(d.fire_due(t0 + ms(90)), Some(second));
    }

    #[test]
    fn burst_yields_only_the_latest_ticket() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(10));
        let mut last = None;
        for i in 0..5 {
            last = Some(d.schedule(t0 + ms(i)));
        }
        assert_eq!(d.fire_due(t0 + ms(1000)), last);
        assert_eq!(d.fire_due(t0 + ms(2000)), None);
    }

    #[test]
    fn cancel_clears_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(10));
        let ticket = d.schedule(t0);
        assert_eq!(d.cancel(), Some(ticket));
        assert_eq!(d.fire_due(t0 + ms(20)), None);
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn time_until_due_counts_down() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(50));
        assert_eq!(d.time_until_due(t0), None);
        d.schedule(t0);
        assert_eq!(d.time_until_due(t0 + ms(20)), Some(ms(30)));
        assert_eq!(d.time_until_due(t0 + ms(80)), Some(Duration::ZERO));
    }

    #[test]
    fn delayed_task_runs_only_latest() {
        let task = DelayedTask::new(ms(50));
        let (tx, rx) = mpsc::channel();
        for i in 0..3 {
            let tx = tx.clone();
            task.schedule(move || {
                let _ = tx.send(i);
            });
        }

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(2));
        assert!(rx.recv_timeout(ms(200)).is_err());
    }

    #[test]
    fn delayed_task_cancel_drops_request() {
        let task = DelayedTask::new(ms(20));
        let (tx, rx) = mpsc::channel();
        task.schedule(move || {
            let _ = tx.send(());
        });
        task.cancel();
        assert!(rx.recv_timeout(ms(200)).is_err());
    }

    #[test]
    fn delayed_task_keeps_working_after_a_burst() {
        let task = DelayedTask::new(ms(20));
        let (tx, rx) = mpsc::channel();
        for round in 0..3 {
            for i in 0..50 {
                let tx = tx.clone();
                task.schedule(move || {
                    let _ = tx.send((round, i));
                });
            }
            assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok((round, 49)));
        }
        assert!(rx.recv_timeout(ms(100)).is_err());
    }

    #[test]
    fn dropping_delayed_task_discards_pending_job() {
        let (tx, rx) = mpsc::channel();
        {
            let task = DelayedTask::new(ms(500));
            task.schedule(move || {
                let _ = tx.send(());
            });
        }
        // The worker has been joined and the job dropped with it.
        assert_eq!(rx.recv_timeout(ms(50)), Err(mpsc::RecvTimeoutError::Disconnected));
    }
}
