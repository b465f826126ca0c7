//! Periodic driver
//!
//! Fires a tick callback at a fixed cadence while running. At most one timer is
//! alive at a time; `start`/`stop` are idempotent.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StageError;

/// Boxed tick callback
pub type TickFn = Box<dyn FnMut()>;

/// Platform timer facility (e.g. `setInterval`)
pub trait Scheduler {
    /// Opaque handle for a live timer
    type Handle;

    /// Call `tick` every `interval_ms` until cleared
    fn set_interval(&mut self, interval_ms: u32, tick: TickFn) -> Result<Self::Handle, StageError>;

    /// Cancel a timer. No tick fires for it after this returns.
    fn clear_interval(&mut self, handle: Self::Handle);
}

/// Runs a single periodic timer on demand
pub struct Driver<S: Scheduler> {
    scheduler: S,
    interval_ms: u32,
    /// `Some` exactly while running
    timer: Option<S::Handle>,
}

impl<S: Scheduler> Driver<S> {
    pub fn new(scheduler: S, interval_ms: u32) -> Self {
        Self {
            scheduler,
            interval_ms,
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Start ticking. Returns `Ok(false)` if already running.
    pub fn start(&mut self, tick: impl FnMut() + 'static) -> Result<bool, StageError> {
        if self.timer.is_some() {
            return Ok(false);
        }
        let handle = self.scheduler.set_interval(self.interval_ms, Box::new(tick))?;
        self.timer = Some(handle);
        log::debug!("Driver started ({} ms)", self.interval_ms);
        Ok(true)
    }

    /// Stop ticking. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(handle) => {
                self.scheduler.clear_interval(handle);
                log::debug!("Driver stopped");
                true
            }
            None => false,
        }
    }
}

impl<S: Scheduler> Drop for Driver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle for a [`ManualScheduler`] timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualHandle(u64);

#[derive(Default)]
struct ManualTimers {
    next_id: u64,
    live: Vec<(u64, Rc<RefCell<TickFn>>)>,
}

/// Deterministic scheduler advanced by hand.
///
/// Clones share the same timer table, so a caller can keep one clone to fire ticks
/// while the driver owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Rc<RefCell<ManualTimers>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_timers(&self) -> usize {
        self.timers.borrow().live.len()
    }

    /// Fire every live timer once, in creation order. Returns the number fired.
    ///
    /// Callbacks may start or clear timers; a timer cleared by an earlier callback
    /// in the same round does not fire.
    pub fn fire(&self) -> usize {
        let ids: Vec<u64> = self.timers.borrow().live.iter().map(|(id, _)| *id).collect();
        let mut fired = 0;
        for id in ids {
            let tick = {
                let timers = self.timers.borrow();
                timers
                    .live
                    .iter()
                    .find(|(live_id, _)| *live_id == id)
                    .map(|(_, tick)| Rc::clone(tick))
            };
            if let Some(tick) = tick {
                let mut tick = tick.borrow_mut();
                (*tick)();
                fired += 1;
            }
        }
        fired
    }

    /// Fire until no timer is live or `max_rounds` is reached. Returns rounds run.
    pub fn run_until_idle(&self, max_rounds: usize) -> usize {
        let mut rounds = 0;
        while rounds < max_rounds && self.fire() > 0 {
            rounds += 1;
        }
        rounds
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn set_interval(&mut self, _interval_ms: u32, tick: TickFn) -> Result<ManualHandle, StageError> {
        let mut timers = self.timers.borrow_mut();
        let id = timers.next_id;
        timers.next_id += 1;
        timers.live.push((id, Rc::new(RefCell::new(tick))));
        Ok(ManualHandle(id))
    }

    fn clear_interval(&mut self, handle: ManualHandle) {
        self.timers.borrow_mut().live.retain(|(id, _)| *id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn test_double_start_keeps_one_timer() {
        let scheduler = ManualScheduler::new();
        let mut driver = Driver::new(scheduler.clone(), 50);
        let (first, tick_a) = counter();
        let (second, tick_b) = counter();

        assert!(driver.start(tick_a).unwrap());
        assert!(!driver.start(tick_b).unwrap());
        assert_eq!(scheduler.live_timers(), 1);

        scheduler.fire();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_stop_cancels_fully() {
        let scheduler = ManualScheduler::new();
        let mut driver = Driver::new(scheduler.clone(), 50);
        let (count, tick) = counter();

        driver.start(tick).unwrap();
        scheduler.fire();
        assert!(driver.stop());
        assert!(!driver.is_running());
        assert_eq!(scheduler.live_timers(), 0);

        assert_eq!(scheduler.fire(), 0);
        assert_eq!(count.get(), 1);
        assert!(!driver.stop());
    }

    #[test]
    fn test_restart_after_stop() {
        let scheduler = ManualScheduler::new();
        let mut driver = Driver::new(scheduler.clone(), 50);
        let (count, tick) = counter();
        driver.start(tick).unwrap();
        driver.stop();

        let (again, tick) = counter();
        assert!(driver.start(tick).unwrap());
        scheduler.fire();
        assert_eq!(count.get(), 0);
        assert_eq!(again.get(), 1);
    }

    #[test]
    fn test_callback_can_clear_its_own_timer() {
        let scheduler = ManualScheduler::new();
        let handle = Rc::new(Cell::new(None));
        let mut inner = scheduler.clone();
        let h = Rc::clone(&handle);
        let id = scheduler
            .clone()
            .set_interval(
                50,
                Box::new(move || {
                    if let Some(id) = h.take() {
                        inner.clear_interval(id);
                    }
                }),
            )
            .unwrap();
        handle.set(Some(id));

        assert_eq!(scheduler.run_until_idle(10), 1);
        assert_eq!(scheduler.live_timers(), 0);
    }
}
