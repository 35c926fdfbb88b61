use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use crate::*;

/// Source of periodic callbacks, the returned handle keeps the timer alive until dropped.
pub trait IntervalScheduler {
    type Handle;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// A mounted [`PaletteAnimator`] bound to a running timer.
///
/// Dropping it unmounts the animator and releases the timer, a tick that still
/// arrives afterwards changes nothing and is not reported.
pub struct RunningPalette<H> {
    animator: Rc<RefCell<PaletteAnimator>>,
    handle: Option<H>,
}

impl PaletteAnimator {
    /// Mounts a new animator and drives it from `scheduler`, `on_change` gets every new rotation.
    pub fn start<S, F>(config: PaletteConfig, scheduler: &S, on_change: F) -> RunningPalette<S::Handle>
    where
        S: IntervalScheduler,
        F: Fn(u16) + 'static,
    {
        let mut animator = PaletteAnimator::new(config);
        animator.mount();
        let animator = Rc::new(RefCell::new(animator));

        let weak: Weak<RefCell<PaletteAnimator>> = Rc::downgrade(&animator);
        let tick = move || {
            let Some(animator) = weak.upgrade() else {
                log::trace!("palette tick after release");
                return;
            };
            let rotation = {
                let mut animator = animator.borrow_mut();
                animator.tick().then(|| animator.rotation())
            };
            // the borrow is released before notifying, the listener may read the animator
            if let Some(rotation) = rotation {
                on_change(rotation);
            }
        };
        let handle = scheduler.every(config.tick_ms, Box::new(tick));

        RunningPalette {
            animator,
            handle: Some(handle),
        }
    }
}

impl<H> RunningPalette<H> {
    pub fn rotation(&self) -> u16 {
        self.animator.borrow().rotation()
    }

    pub fn hue_for(&self, index: CellIndex) -> u16 {
        self.animator.borrow().hue_for(index)
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && self.animator.borrow().state().is_running()
    }

    /// Unmounts and releases the timer, returns the final animator state.
    pub fn stop(mut self) -> PaletteAnimator {
        self.release();
        self.animator.borrow().clone()
    }

    fn release(&mut self) {
        self.animator.borrow_mut().unmount();
        if self.handle.take().is_some() {
            log::debug!("palette timer released");
        }
    }
}

impl<H> Drop for RunningPalette<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::Cell;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test as test;

    /// Keeps every scheduled callback around, even after its handle is dropped.
    #[derive(Default)]
    struct ManualScheduler {
        ticks: RefCell<Vec<Box<dyn FnMut()>>>,
        released: Rc<Cell<usize>>,
        periods: RefCell<Vec<u32>>,
    }

    struct ManualHandle {
        released: Rc<Cell<usize>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    impl IntervalScheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle {
            self.periods.borrow_mut().push(period_ms);
            self.ticks.borrow_mut().push(tick);
            ManualHandle {
                released: self.released.clone(),
            }
        }
    }

    impl ManualScheduler {
        fn fire(&self) {
            for tick in self.ticks.borrow_mut().iter_mut() {
                tick();
            }
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<u16>>>, impl Fn(u16) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |rotation| sink.borrow_mut().push(rotation))
    }

    #[test]
    fn start_mounts_and_schedules_at_configured_period() {
        let scheduler = ManualScheduler::default();
        let (_, on_change) = recorder();

        let running = PaletteAnimator::start(PaletteConfig::new(40, 5, 360), &scheduler, on_change);

        assert!(running.is_running());
        assert_eq!(running.rotation(), 0);
        assert_eq!(*scheduler.periods.borrow(), [40]);
    }

    #[test]
    fn ticks_advance_and_notify() {
        let scheduler = ManualScheduler::default();
        let (seen, on_change) = recorder();
        let running = PaletteAnimator::start(PaletteConfig::new(40, 5, 360), &scheduler, on_change);

        scheduler.fire();
        scheduler.fire();

        assert_eq!(running.rotation(), 10);
        assert_eq!(*seen.borrow(), [5, 10]);
        assert_eq!(running.hue_for(32), 190);
    }

    #[test]
    fn tick_after_stop_changes_nothing() {
        let scheduler = ManualScheduler::default();
        let (seen, on_change) = recorder();
        let running = PaletteAnimator::start(PaletteConfig::new(40, 5, 360), &scheduler, on_change);
        scheduler.fire();

        let last = running.stop();
        assert_eq!(last.state(), AnimatorState::Unmounted);
        assert_eq!(last.rotation(), 5);
        assert_eq!(scheduler.released.get(), 1);

        // the scheduler never dropped the callback, fire it anyway
        scheduler.fire();
        assert_eq!(*seen.borrow(), [5]);
    }

    #[test]
    fn drop_releases_timer() {
        let scheduler = ManualScheduler::default();
        let (seen, on_change) = recorder();
        {
            let _running = PaletteAnimator::start(PaletteConfig::default(), &scheduler, on_change);
            assert_eq!(scheduler.released.get(), 0);
        }
        assert_eq!(scheduler.released.get(), 1);

        scheduler.fire();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn listener_can_read_rotation_during_notification() {
        let scheduler = ManualScheduler::default();
        let slot: Rc<RefCell<Option<RunningPalette<ManualHandle>>>> = Rc::default();
        let reads = Rc::new(Cell::new(0u16));

        let on_change = {
            let slot = slot.clone();
            let reads = reads.clone();
            move |_| {
                if let Some(running) = slot.borrow().as_ref() {
                    reads.set(running.rotation());
                }
            }
        };
        let running = PaletteAnimator::start(PaletteConfig::new(1, 3, 360), &scheduler, on_change);
        *slot.borrow_mut() = Some(running);

        scheduler.fire();
        assert_eq!(reads.get(), 3);

        slot.borrow_mut().take();
        assert_eq!(scheduler.released.get(), 1);
    }
}
