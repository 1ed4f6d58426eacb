//! Debounced Channel
//!
//! Coalesces a fast stream of values (one per keystroke) into at most one
//! forward per quiet period, skipping values equal to the last forwarded one.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::scheduler::{ScheduledTask, Scheduler};

struct DebounceState<T> {
    pending: Option<ScheduledTask>,
    last_forwarded: Option<T>,
}

/// Timer-based coalescing queue in front of a sink
pub struct Debouncer<T> {
    state: Rc<RefCell<DebounceState<T>>>,
    sink: Rc<dyn Fn(T)>,
    scheduler: Rc<dyn Scheduler>,
    quiet: Duration,
}

impl<T: Clone + PartialEq + 'static> Debouncer<T> {
    pub fn new(scheduler: Rc<dyn Scheduler>, quiet: Duration, sink: impl Fn(T) + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(DebounceState {
                pending: None,
                last_forwarded: None,
            })),
            sink: Rc::new(sink),
            scheduler,
            quiet,
        }
    }

    /// Restart the quiet period with `value` as the candidate.
    /// The previous candidate, if any, is dropped.
    pub fn push(&self, value: T) {
        let state = Rc::clone(&self.state);
        let sink = Rc::clone(&self.sink);
        let task = self.scheduler.schedule(
            self.quiet,
            Box::new(move || {
                let forward = {
                    let mut state = state.borrow_mut();
                    state.pending = None;
                    if state.last_forwarded.as_ref() == Some(&value) {
                        None
                    } else {
                        state.last_forwarded = Some(value.clone());
                        Some(value)
                    }
                };
                if let Some(value) = forward {
                    sink(value);
                }
            }),
        );
        // replacing the handle cancels the superseded timer
        self.state.borrow_mut().pending = Some(task);
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.pending.take();
        }
    }
}
