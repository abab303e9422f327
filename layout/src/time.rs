use serde::{Deserialize, Serialize};

/// Visible and retained time spans of the simulation view, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSettings {
    pub shown_time: f64,
    pub kept_time: f64,
    pub dt: f64,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            shown_time: 0.5,
            kept_time: 4.0,
            dt: 0.001,
        }
    }
}

impl TimeSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.shown_time > 0.0) {
            return Err(format!("shown_time must be positive, got {}", self.shown_time));
        }
        if !(self.kept_time >= self.shown_time) {
            return Err(format!(
                "kept_time {} is shorter than shown_time {}",
                self.kept_time, self.shown_time
            ));
        }
        if !(self.dt > 0.0) {
            return Err(format!("dt must be positive, got {}", self.dt));
        }
        Ok(())
    }
}
