// src/progress.rs
use crate::catalog::{WeeklyStat, PLANNED_PROGRAM_WORKOUTS};

/// `part / whole`, or 0 when there is nothing to divide by.
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Converts a fraction to a whole percentage clamped to 0..=100.
pub fn percent(fraction: f64) -> u16 {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    (fraction * 100.0).round().min(100.0) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklySummary {
    pub total_calories: u32,
    pub total_minutes: u32,
    pub total_workouts: u32,
    /// Days with at least one workout.
    pub active_days: u32,
}

impl WeeklySummary {
    pub fn from_stats(stats: &[WeeklyStat]) -> Self {
        stats.iter().fold(Self::default(), |mut acc, day| {
            acc.total_calories += day.calories;
            acc.total_minutes += day.duration_minutes;
            acc.total_workouts += day.workouts;
            if day.workouts > 0 {
                acc.active_days += 1;
            }
            acc
        })
    }
}

/// Share of the weekly session goal already met. Can exceed 1.0.
pub fn weekly_goal_fraction(active_days: u32, weekly_goal: u32) -> f64 {
    fraction(active_days as usize, weekly_goal as usize)
}

pub fn program_fraction(total_workouts: u32) -> f64 {
    fraction(total_workouts as usize, PLANNED_PROGRAM_WORKOUTS as usize)
}
