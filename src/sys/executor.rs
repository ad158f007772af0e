//! A single-worker serial work queue.
//!
//! All screen managers share one execution context. Work is submitted through
//! a [`Queue`] handle and only ever runs later, when the owning
//! [`SerialExecutor`] drains; submitting never runs anything inline. Jobs run
//! strictly in FIFO order, one at a time, on whichever thread drives the
//! executor.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{Span, trace};

use crate::actor;

pub type Job = Box<dyn FnOnce() + 'static>;

enum Work {
    Now(Job),
    After {
        deadline: Instant,
        token: CancellationToken,
        job: Job,
    },
}

/// Submitting side of the executor. Cheap to clone.
#[derive(Clone)]
pub struct Queue(actor::Sender<Work>);

impl Queue {
    pub fn dispatch(&self, job: impl FnOnce() + 'static) { self.0.send(Work::Now(Box::new(job))); }

    /// Runs `job` once `delay` has elapsed, unless the returned token is
    /// cancelled first.
    pub fn dispatch_after(
        &self,
        delay: Duration,
        job: impl FnOnce() + 'static,
    ) -> CancellationToken {
        let token = CancellationToken::new();
        self.0.send(Work::After {
            deadline: Instant::now() + delay,
            token: token.clone(),
            job: Box::new(job),
        });
        token
    }
}

struct Timer {
    deadline: Instant,
    seq: u64,
    span: Span,
    token: CancellationToken,
    job: Job,
}

// BinaryHeap is a max-heap; invert so the earliest deadline is on top and
// timers with equal deadlines fire in submission order.
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool { self.deadline == other.deadline && self.seq == other.seq }
}

impl Eq for Timer {}

pub struct SerialExecutor {
    tx: Option<actor::Sender<Work>>,
    rx: actor::Receiver<Work>,
    timers: BinaryHeap<Timer>,
    next_seq: u64,
}

impl Default for SerialExecutor {
    fn default() -> Self { Self::new() }
}

impl SerialExecutor {
    pub fn new() -> Self {
        let (tx, rx) = actor::channel();
        SerialExecutor {
            tx: Some(tx),
            rx,
            timers: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn queue(&self) -> Queue {
        let tx = self.tx.as_ref().expect("queue() called on a running executor");
        Queue(tx.clone())
    }

    /// Runs queued jobs until the queue is empty, including jobs submitted by
    /// the jobs being run. Timers are registered but not fired. Returns the
    /// number of jobs run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Ok((span, work)) = self.rx.try_recv() {
            ran += self.accept(span, work);
        }
        ran
    }

    /// Drains the queue and fires every live timer due at or before `now`,
    /// in deadline order. Returns the number of jobs and timers run.
    pub fn fire_timers_until(&mut self, now: Instant) -> usize {
        let mut ran = self.run_until_idle();
        while self.timers.peek().is_some_and(|t| t.deadline <= now) {
            let Some(timer) = self.timers.pop() else { break };
            if timer.token.is_cancelled() {
                trace!(seq = timer.seq, "dropping cancelled timer");
                continue;
            }
            let guard = timer.span.enter();
            (timer.job)();
            ran += 1;
            drop(guard);
            ran += self.run_until_idle();
        }
        ran
    }

    /// Number of registered timers that have not been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|t| !t.token.is_cancelled()).count()
    }

    /// Drives the executor until every [`Queue`] has been dropped and no live
    /// timers remain.
    pub async fn run(mut self) {
        self.tx = None;
        loop {
            self.fire_timers_until(Instant::now());
            self.timers.retain(|t| !t.token.is_cancelled());
            let next_deadline = self.timers.peek().map(|t| t.deadline);

            let received = match next_deadline {
                Some(deadline) => {
                    tokio::select! {
                        work = self.rx.recv() => work.map(Some),
                        _ = tokio::time::sleep_until(deadline.into()) => Some(None),
                    }
                }
                None => self.rx.recv().await.map(Some),
            };

            match received {
                Some(Some((span, work))) => {
                    self.accept(span, work);
                }
                Some(None) => {}
                None => match next_deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
                    None => break,
                },
            }
        }
    }

    fn accept(&mut self, span: Span, work: Work) -> usize {
        match work {
            Work::Now(job) => {
                let _guard = span.enter();
                job();
                1
            }
            Work::After { deadline, token, job } => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.timers.push(Timer { deadline, seq, span, token, job });
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Job) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log2 = log.clone();
        let make = move |name: &'static str| -> Job {
            let log = log2.clone();
            Box::new(move || log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn dispatch_never_runs_inline() {
        let mut executor = SerialExecutor::new();
        let queue = executor.queue();
        let (log, make) = recorder();

        queue.dispatch(make("a"));
        assert!(log.borrow().is_empty());

        assert_eq!(executor.run_until_idle(), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn jobs_run_fifo_including_nested_submissions() {
        let mut executor = SerialExecutor::new();
        let queue = executor.queue();
        let (log, make) = recorder();

        let nested = make("nested");
        let inner_queue = queue.clone();
        let first = make("first");
        queue.dispatch(move || {
            first();
            inner_queue.dispatch(nested);
        });
        queue.dispatch(make("second"));

        assert_eq!(executor.run_until_idle(), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
    }

    #[test]
    fn timers_fire_in_deadline_order_and_respect_cancellation() {
        let mut executor = SerialExecutor::new();
        let queue = executor.queue();
        let (log, make) = recorder();

        queue.dispatch_after(Duration::from_millis(200), make("late"));
        queue.dispatch_after(Duration::from_millis(100), make("early"));
        let cancelled = queue.dispatch_after(Duration::from_millis(50), make("cancelled"));
        cancelled.cancel();

        assert_eq!(executor.run_until_idle(), 0);
        assert_eq!(executor.pending_timers(), 2);
        assert!(log.borrow().is_empty());

        executor.fire_timers_until(Instant::now() + Duration::from_millis(150));
        assert_eq!(*log.borrow(), vec!["early"]);

        executor.fire_timers_until(Instant::now() + Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(executor.pending_timers(), 0);
    }

    #[test(tokio::test)]
    async fn run_returns_once_queues_and_timers_are_gone() {
        let executor = SerialExecutor::new();
        let queue = executor.queue();
        let (log, make) = recorder();

        queue.dispatch(make("now"));
        queue.dispatch_after(Duration::from_millis(5), make("soon"));
        drop(queue);

        executor.run().await;
        assert_eq!(*log.borrow(), vec!["now", "soon"]);
    }
}
