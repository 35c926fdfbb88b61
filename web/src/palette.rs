use gloo::timers::callback::Interval;
use timestable_core::IntervalScheduler;

/// Browser timers through `setInterval`, the interval is cleared when its handle drops.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct GlooScheduler;

impl IntervalScheduler for GlooScheduler {
    type Handle = Interval;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle {
        log::trace!("scheduling palette tick every {}ms", period_ms);
        Interval::new(period_ms, tick)
    }
}

/// Inline style feeding the cell's hue to the stylesheet.
pub(crate) fn cell_style(hue: u16) -> String {
    format!("--color-fg-pri: hsl({hue}deg 100 75);")
}
