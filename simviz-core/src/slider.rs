use layout::TimeSettings;

const AT_END_EPSILON: f64 = 1e-9;

/// Simulation time as seen by the displays: the newest time received, the
/// span currently on screen, and how much history stores should retain.
#[derive(Debug, Clone)]
pub struct TimeSlider {
    settings: TimeSettings,
    last_time: f64,
    first_shown_time: f64,
}

impl TimeSlider {
    pub fn new(settings: TimeSettings) -> Self {
        Self {
            first_shown_time: -settings.shown_time,
            settings,
            last_time: 0.0,
        }
    }

    pub fn settings(&self) -> &TimeSettings {
        &self.settings
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn first_shown_time(&self) -> f64 {
        self.first_shown_time
    }

    pub fn shown_time(&self) -> f64 {
        self.settings.shown_time
    }

    pub fn kept_time(&self) -> f64 {
        self.settings.kept_time
    }

    pub fn shown_range(&self) -> (f64, f64) {
        (
            self.first_shown_time,
            self.first_shown_time + self.settings.shown_time,
        )
    }

    pub fn is_at_end(&self) -> bool {
        self.last_time < self.first_shown_time + self.settings.shown_time + AT_END_EPSILON
    }

    /// Records a new simulation time. A view sitting at the end keeps
    /// following the data; a scrolled-back view stays put.
    pub fn advance(&mut self, time: f64) {
        let follow = self.is_at_end();
        self.last_time = time;
        if follow {
            self.first_shown_time = time - self.settings.shown_time;
        }
    }

    pub fn scroll_to(&mut self, first_shown_time: f64) {
        let earliest = self.last_time - self.settings.kept_time;
        let latest = self.last_time - self.settings.shown_time;
        self.first_shown_time = first_shown_time.max(earliest).min(latest);
    }

    /// `(current_time, keep_duration)` for [`TimeSeriesStore::trim`].
    ///
    /// [`TimeSeriesStore::trim`]: crate::TimeSeriesStore::trim
    pub fn retention(&self) -> (f64, f64) {
        (self.last_time, self.settings.kept_time)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }
}
