// src/session.rs
//! Workout player state: ordered exercises, a cursor, per-exercise
//! completion and the start/pause/complete flags.
use crate::catalog::{Exercise, WorkoutPlan};
use crate::navigation::Route;
use crate::progress;
use std::mem;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No exercise with id '{0}' in this workout.")]
    UnknownExercise(String),
    #[error("Exercise number {0} does not exist in this workout.")]
    IndexOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Active,
    Paused,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub exercises: Vec<Exercise>,
    pub current_index: usize,
    pub started: bool,
    pub paused: bool,
    pub complete: bool,
}

fn all_completed(exercises: &[Exercise]) -> bool {
    !exercises.is_empty() && exercises.iter().all(|e| e.completed)
}

impl SessionState {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        let complete = all_completed(&exercises);
        Self {
            exercises,
            current_index: 0,
            started: false,
            paused: true,
            complete,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.complete {
            SessionPhase::Complete
        } else if !self.started {
            SessionPhase::NotStarted
        } else if self.paused {
            SessionPhase::Paused
        } else {
            SessionPhase::Active
        }
    }

    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }

    pub fn progress_fraction(&self) -> f64 {
        progress::fraction(self.completed_count(), self.exercises.len())
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current_index)
    }

    /// The highlighted row, which only exists once the session started.
    pub fn is_active(&self, index: usize) -> bool {
        self.started && index == self.current_index
    }

    pub fn can_advance(&self) -> bool {
        self.current_index + 1 < self.exercises.len()
    }

    pub fn coach_tip(&self) -> Option<&str> {
        if !self.started {
            return None;
        }
        self.current_exercise()
            .filter(|e| !e.completed)
            .and_then(|e| e.coach_tip.as_deref())
    }

    fn position(&self, exercise_id: &str) -> Result<usize, SessionError> {
        self.exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or_else(|| SessionError::UnknownExercise(exercise_id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    TogglePause,
    ToggleComplete(String),
    SelectExercise(String),
    AdvanceNext,
}

/// Flips one exercise and re-derives the cursor and the completion flag.
fn toggle_complete(state: &SessionState, index: usize) -> SessionState {
    let mut next = state.clone();
    let exercise = &mut next.exercises[index];
    exercise.completed = !exercise.completed;

    if exercise.completed {
        let from = state.current_index;
        if let Some(pos) = next
            .exercises
            .iter()
            .enumerate()
            .position(|(i, e)| i > from && !e.completed)
        {
            next.current_index = pos;
        }
    }
    next.complete = all_completed(&next.exercises);
    next
}

pub fn reduce(state: &SessionState, action: SessionAction) -> Result<SessionState, SessionError> {
    match action {
        SessionAction::Start => {
            let mut next = state.clone();
            next.started = true;
            next.paused = false;
            Ok(next)
        }
        SessionAction::TogglePause => {
            let mut next = state.clone();
            if next.started {
                next.paused = !next.paused;
            }
            Ok(next)
        }
        SessionAction::ToggleComplete(id) => {
            let index = state.position(&id)?;
            Ok(toggle_complete(state, index))
        }
        SessionAction::SelectExercise(id) => {
            let index = state.position(&id)?;
            let mut next = state.clone();
            next.current_index = index;
            Ok(next)
        }
        SessionAction::AdvanceNext => {
            let mut next = state.clone();
            if next.can_advance() {
                next.current_index += 1;
            }
            Ok(next)
        }
    }
}

/// Countdown for the highlighted exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseTimer {
    remaining: Duration,
    running: bool,
}

impl ExerciseTimer {
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            remaining: Duration::from_secs(u64::from(duration_seconds)),
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds left, rounded up so a fresh timer shows its full length.
    pub fn remaining_seconds(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    pub fn toggle(&mut self) {
        if self.remaining.is_zero() {
            self.running = false;
        } else {
            self.running = !self.running;
        }
    }

    pub fn reset(&mut self, duration_seconds: u32) {
        *self = Self::new(duration_seconds);
    }

    pub fn tick(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
        }
    }
}

/// `125` -> `"2:05"`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub struct WorkoutSession {
    /// Plan header. Its exercises live in `state`.
    plan: WorkoutPlan,
    state: SessionState,
    timer: ExerciseTimer,
}

impl WorkoutSession {
    pub fn new(mut plan: WorkoutPlan) -> Self {
        let exercises = mem::take(&mut plan.exercises);
        let timer = ExerciseTimer::new(exercises.first().map_or(0, |e| e.duration_seconds));
        Self {
            plan,
            state: SessionState::new(exercises),
            timer,
        }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn timer(&self) -> &ExerciseTimer {
        &self.timer
    }

    fn apply(&mut self, action: SessionAction) -> Result<(), SessionError> {
        debug!(?action, cursor = self.state.current_index, "session action");
        let before = self.state.current_index;
        let was_complete = self.state.complete;
        match reduce(&self.state, action) {
            Ok(next) => {
                self.state = next;
                if self.state.current_index != before {
                    self.reset_timer();
                }
                if self.state.complete && !was_complete {
                    info!(workout = %self.plan.title, "workout complete");
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "session action rejected");
                Err(e)
            }
        }
    }

    pub fn start(&mut self) {
        // Start never fails.
        let _ = self.apply(SessionAction::Start);
    }

    pub fn toggle_pause(&mut self) {
        let _ = self.apply(SessionAction::TogglePause);
    }

    /// # Errors
    /// `SessionError::UnknownExercise` if the id is not part of this workout.
    pub fn toggle_complete(&mut self, exercise_id: &str) -> Result<(), SessionError> {
        self.apply(SessionAction::ToggleComplete(exercise_id.to_string()))
    }

    /// Toggles whichever exercise the cursor is on. No-op for an empty workout.
    pub fn toggle_current(&mut self) {
        if let Some(id) = self.state.current_exercise().map(|e| e.id.clone()) {
            let _ = self.toggle_complete(&id);
        }
    }

    /// # Errors
    /// `SessionError::UnknownExercise` if the id is not part of this workout.
    pub fn select_exercise(&mut self, exercise_id: &str) -> Result<(), SessionError> {
        self.apply(SessionAction::SelectExercise(exercise_id.to_string()))
    }

    /// # Errors
    /// `SessionError::IndexOutOfRange` for an index past the last exercise.
    pub fn select_index(&mut self, index: usize) -> Result<(), SessionError> {
        let id = self
            .state
            .exercises
            .get(index)
            .map(|e| e.id.clone())
            .ok_or(SessionError::IndexOutOfRange(index + 1))?;
        self.select_exercise(&id)
    }

    pub fn advance_to_next(&mut self) {
        let _ = self.apply(SessionAction::AdvanceNext);
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    pub fn reset_timer(&mut self) {
        let duration = self.state.current_exercise().map_or(0, |e| e.duration_seconds);
        self.timer.reset(duration);
    }

    /// Advances the exercise countdown while the session is running.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase() == SessionPhase::Active {
            self.timer.tick(elapsed);
        }
    }

    /// "Back to Dashboard" on the completion screen.
    pub fn finish(&self) -> Route {
        Route::Dashboard
    }

    /// "Chat with AI Coach" on the completion screen.
    pub fn ask_coach(&self) -> Route {
        Route::Chat
    }
}
