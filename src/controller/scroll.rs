use crate::controller::state::Activity;

/// How many rows from the bottom the view may get before the next page is
/// requested.
pub const PREFETCH_DISTANCE: usize = 2;

/// True when the last visible row is within [`PREFETCH_DISTANCE`] of the end.
pub fn is_near_end(last_visible: Option<usize>, total: usize) -> bool {
    match last_visible {
        Some(index) => total > 0 && index + PREFETCH_DISTANCE >= total,
        None => false,
    }
}

/// Turns a stream of scroll positions into load-more requests.
///
/// Repeated observations of the same position in the same controller state
/// are coalesced, so a view can report on every frame.
#[derive(Debug, Default)]
pub struct ScrollTrigger {
    last: Option<(Option<usize>, usize, Activity, bool)>,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(
        &mut self,
        last_visible: Option<usize>,
        total: usize,
        activity: Activity,
        end_reached: bool,
    ) -> bool {
        let key = (last_visible, total, activity, end_reached);
        if self.last == Some(key) {
            return false;
        }
        self.last = Some(key);

        activity == Activity::Idle && !end_reached && is_near_end(last_visible, total)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
