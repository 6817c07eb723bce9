/// Tuning of the muscle group progress accumulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSettings {
    /// Upper bound of the progress gained by a single workout, in percentage points.
    pub max_gain_per_workout: f32,
    /// Training volume (kg × reps) corresponding to one percentage point.
    pub volume_per_point: f32,
}

impl ProgressSettings {
    #[must_use]
    pub fn gain(&self, volume: f32) -> f32 {
        if volume <= 0.0 || self.volume_per_point <= 0.0 {
            return 0.0;
        }
        (volume / self.volume_per_point).min(self.max_gain_per_workout)
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            max_gain_per_workout: 5.0,
            volume_per_point: 1000.0,
        }
    }
}
