//! Deferred Task Scheduling
//!
//! Timer seam for the store and the debouncer. The browser build uses
//! `gloo-timers`; tests drive a virtual clock.

use std::time::Duration;

use gloo_timers::callback::Timeout;

/// Schedules a one-shot task after a delay on the current thread
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

/// Handle to a pending task. Dropping or cancelling it stops the task.
/// A task may drop its own handle while running; cancelling a fired timer is a no-op.
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// `setTimeout`-backed scheduler
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, task);
        ScheduledTask::new(move || drop(timeout))
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use super::{ScheduledTask, Scheduler};

    struct Pending {
        due: u64,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    /// Virtual clock: tasks run only when `advance` passes their due time
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u64>,
        next_seq: Cell<u64>,
        queue: RefCell<Vec<Pending>>,
    }

    impl ManualScheduler {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn now(&self) -> u64 {
            self.now.get()
        }

        /// Number of tasks still waiting to run
        pub fn pending(&self) -> usize {
            self.queue.borrow().iter().filter(|p| !p.cancelled.get()).count()
        }

        /// Move the clock forward, running due tasks in (due, scheduled) order.
        /// Tasks scheduled while advancing run too if they fall due in the window.
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    queue.retain(|p| !p.cancelled.get());
                    let idx = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.seq))
                        .map(|(i, _)| i);
                    idx.map(|i| queue.remove(i))
                };
                match next {
                    Some(pending) => {
                        self.now.set(pending.due);
                        (pending.task)();
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
            let seq = self.next_seq.get();
            self.next_seq.set(seq + 1);
            let cancelled = Rc::new(Cell::new(false));
            self.queue.borrow_mut().push(Pending {
                due: self.now.get() + delay.as_millis() as u64,
                seq,
                cancelled: Rc::clone(&cancelled),
                task,
            });
            ScheduledTask::new(move || cancelled.set(true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_for_task = Rc::clone(&log);
        let make = move |name: &'static str| {
            let log = Rc::clone(&log_for_task);
            Box::new(move || log.borrow_mut().push(name)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn test_manual_runs_in_due_order() {
        let clock = ManualScheduler::new();
        let (log, task) = recorder();

        let _late = clock.schedule(Duration::from_millis(200), task("late"));
        let _early = clock.schedule(Duration::from_millis(100), task("early"));

        clock.advance(99);
        assert!(log.borrow().is_empty());

        clock.advance(1);
        assert_eq!(*log.borrow(), vec!["early"]);

        clock.advance(500);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(clock.now(), 600);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let clock = ManualScheduler::new();
        let (log, task) = recorder();

        let handle = clock.schedule(Duration::from_millis(10), task("dropped"));
        let kept = clock.schedule(Duration::from_millis(10), task("kept"));
        drop(handle);
        assert_eq!(clock.pending(), 1);

        clock.advance(10);
        assert_eq!(*log.borrow(), vec!["kept"]);
        drop(kept);
    }

    #[test]
    fn test_task_drops_own_handle() {
        let clock = ManualScheduler::new();
        let slot: Rc<RefCell<Option<ScheduledTask>>> = Rc::new(RefCell::new(None));
        let ran = Rc::new(RefCell::new(0));

        let (slot_in_task, ran_in_task) = (Rc::clone(&slot), Rc::clone(&ran));
        let handle = clock.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                slot_in_task.borrow_mut().take();
                *ran_in_task.borrow_mut() += 1;
            }),
        );
        *slot.borrow_mut() = Some(handle);

        clock.advance(10);
        assert_eq!(*ran.borrow(), 1);
        assert!(slot.borrow().is_none());
        assert_eq!(clock.pending(), 0);

        // a later task is unaffected by the dropped handle
        let (log, task) = recorder();
        let _next = clock.schedule(Duration::from_millis(5), task("next"));
        clock.advance(5);
        assert_eq!(*log.borrow(), vec!["next"]);
    }

    #[test]
    fn test_explicit_cancel() {
        let clock = ManualScheduler::new();
        let (log, task) = recorder();

        clock.schedule(Duration::from_millis(5), task("x")).cancel();
        clock.advance(10);
        assert!(log.borrow().is_empty());
        assert_eq!(clock.pending(), 0);
    }
}
