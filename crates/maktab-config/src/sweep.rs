use std::env;

/// Schedule for the nightly exclusion-retention sweep.
#[derive(Clone, Debug)]
pub struct SweepConfig {
    /// Local wall-clock hour (0-23) at which the daily run fires.
    pub hour: u32,
}

impl SweepConfig {
    pub fn from_env() -> Self {
        let hour = env::var("SWEEP_HOUR")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|hour| *hour < 24)
            .unwrap_or(3);
        Self { hour }
    }
}
