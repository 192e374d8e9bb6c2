use anyhow::Result;
use fitai_lib::catalog::{self, Exercise};
use fitai_lib::session::{format_clock, reduce, SessionAction};
use fitai_lib::{ExerciseTimer, Route, SessionError, SessionPhase, SessionState, WorkoutSession};
use std::time::Duration;

fn seven_exercises() -> Vec<Exercise> {
    (1..=7)
        .map(|n| Exercise::new(&format!("e{n}"), &format!("Exercise {n}"), "3 x 10", 60))
        .collect()
}

fn apply(state: &SessionState, action: SessionAction) -> SessionState {
    reduce(state, action).expect("action should apply")
}

fn toggle(state: &SessionState, id: &str) -> SessionState {
    apply(state, SessionAction::ToggleComplete(id.to_string()))
}

#[test]
fn test_fresh_session_is_not_started_and_paused() {
    let state = SessionState::new(seven_exercises());
    assert_eq!(state.phase(), SessionPhase::NotStarted);
    assert!(!state.started);
    assert!(state.paused);
    assert!(!state.complete);
    assert_eq!(state.current_index, 0);
    assert!(!state.is_active(0));
}

#[test]
fn test_start_pause_resume() {
    let state = SessionState::new(seven_exercises());

    // Pause means nothing before the session begins
    let state = apply(&state, SessionAction::TogglePause);
    assert_eq!(state.phase(), SessionPhase::NotStarted);

    let state = apply(&state, SessionAction::Start);
    assert_eq!(state.phase(), SessionPhase::Active);
    assert!(state.is_active(0));

    let state = apply(&state, SessionAction::TogglePause);
    assert_eq!(state.phase(), SessionPhase::Paused);

    // Start always leaves the session running
    let state = apply(&state, SessionAction::Start);
    assert_eq!(state.phase(), SessionPhase::Active);
    assert!(!state.paused);
    let again = apply(&state, SessionAction::Start);
    assert_eq!(again, state);

    let state = apply(&state, SessionAction::TogglePause);
    assert_eq!(state.phase(), SessionPhase::Paused);
    let state = apply(&state, SessionAction::TogglePause);
    assert_eq!(state.phase(), SessionPhase::Active);
}

#[test]
fn test_completing_current_advances_to_next_incomplete() {
    let mut state = SessionState::new(seven_exercises());
    state.current_index = 3;
    state.exercises[4].completed = true;

    let state = toggle(&state, "e4");
    assert!(state.exercises[3].completed);
    assert_eq!(state.current_index, 5, "skips the already completed e5");
}

#[test]
fn test_cursor_stays_when_nothing_later_is_incomplete() {
    let mut state = SessionState::new(seven_exercises());
    state.current_index = 3;
    for later in 4..7 {
        state.exercises[later].completed = true;
    }

    let state = toggle(&state, "e4");
    assert_eq!(state.current_index, 3);
    // e1..e3 are still open, so the session is not complete
    assert!(!state.complete);
}

#[test]
fn test_search_starts_after_cursor_not_after_toggled_exercise() {
    let mut state = SessionState::new(seven_exercises());
    state.current_index = 1;

    let state = toggle(&state, "e6");
    assert_eq!(state.current_index, 2);
}

#[test]
fn test_uncompleting_does_not_move_cursor() {
    let state = SessionState::new(seven_exercises());
    let state = toggle(&state, "e1");
    assert_eq!(state.current_index, 1);

    let state = toggle(&state, "e1");
    assert!(!state.exercises[0].completed);
    assert_eq!(state.current_index, 1);
}

#[test]
fn test_complete_tracks_last_remaining_exercise() {
    let mut state = SessionState::new(seven_exercises());
    for n in 1..=6 {
        state = toggle(&state, &format!("e{n}"));
        assert!(!state.complete, "complete too early after e{n}");
    }
    state = toggle(&state, "e7");
    assert!(state.complete);
    assert_eq!(state.phase(), SessionPhase::Complete);
    assert_eq!(state.completed_count(), 7);

    // Still toggleable after completion
    state = toggle(&state, "e3");
    assert!(!state.complete);
    assert_ne!(state.phase(), SessionPhase::Complete);
}

#[test]
fn test_select_and_advance_cursor() {
    let state = SessionState::new(seven_exercises());
    let state = apply(&state, SessionAction::SelectExercise("e7".to_string()));
    assert_eq!(state.current_index, 6);
    assert!(!state.can_advance());

    let same = apply(&state, SessionAction::AdvanceNext);
    assert_eq!(same.current_index, 6);

    let state = apply(&state, SessionAction::SelectExercise("e2".to_string()));
    let state = apply(&state, SessionAction::AdvanceNext);
    assert_eq!(state.current_index, 2);
}

#[test]
fn test_unknown_exercise_is_rejected() {
    let state = SessionState::new(seven_exercises());
    let err = reduce(&state, SessionAction::ToggleComplete("e99".to_string())).unwrap_err();
    assert_eq!(err, SessionError::UnknownExercise("e99".to_string()));
    let err = reduce(&state, SessionAction::SelectExercise("e99".to_string())).unwrap_err();
    assert!(matches!(err, SessionError::UnknownExercise(_)));
}

#[test]
fn test_progress_fraction_handles_empty_workout() {
    let empty = SessionState::new(Vec::new());
    assert_eq!(empty.progress_fraction(), 0.0);
    assert!(!empty.complete);
    assert!(empty.current_exercise().is_none());
    assert_eq!(apply(&empty, SessionAction::AdvanceNext).current_index, 0);

    let state = toggle(&SessionState::new(seven_exercises()), "e1");
    assert!((state.progress_fraction() - 1.0 / 7.0).abs() < 1e-9);
}

#[test]
fn test_coach_tip_shows_for_active_incomplete_exercise() -> Result<()> {
    let mut session = WorkoutSession::new(catalog::todays_workout());
    session.select_index(2)?;
    assert_eq!(session.state().coach_tip(), None, "no tip before start");

    session.start();
    assert!(session.state().coach_tip().is_some_and(|tip| tip.contains("core tight")));

    session.toggle_current();
    session.select_index(2)?;
    assert_eq!(session.state().coach_tip(), None);
    Ok(())
}

#[test]
fn test_workout_session_controller_flow() -> Result<()> {
    let mut session = WorkoutSession::new(catalog::todays_workout());
    assert_eq!(session.plan().title, "Full Body Strength");
    assert!(session.plan().exercises.is_empty());
    assert_eq!(session.state().exercises.len(), 7);

    session.start();
    let ids: Vec<String> = session.state().exercises.iter().map(|e| e.id.clone()).collect();
    for id in &ids {
        session.toggle_complete(id)?;
    }
    assert_eq!(session.phase(), SessionPhase::Complete);
    assert_eq!(session.finish(), Route::Dashboard);
    assert_eq!(session.ask_coach(), Route::Chat);

    assert!(session.toggle_complete("missing").is_err());
    assert!(matches!(
        session.select_index(7),
        Err(SessionError::IndexOutOfRange(8))
    ));
    Ok(())
}

#[test]
fn test_reopening_current_after_completion() -> Result<()> {
    let mut session = WorkoutSession::new(catalog::todays_workout());
    session.start();
    let ids: Vec<String> = session.state().exercises.iter().map(|e| e.id.clone()).collect();
    for id in &ids {
        session.toggle_complete(id)?;
    }
    assert_eq!(session.phase(), SessionPhase::Complete);

    let cursor = session.state().current_index;
    session.toggle_current();
    assert_eq!(session.state().current_index, cursor);
    assert!(!session.state().exercises[cursor].completed);
    assert_eq!(session.state().completed_count(), ids.len() - 1);
    assert_eq!(session.phase(), SessionPhase::Active);
    Ok(())
}

#[test]
fn test_timer_follows_cursor_and_session_pause() -> Result<()> {
    let mut session = WorkoutSession::new(catalog::todays_workout());
    assert_eq!(session.timer().remaining_seconds(), 300);

    session.toggle_timer();
    session.tick(Duration::from_secs(10));
    assert_eq!(session.timer().remaining_seconds(), 300, "no ticking before start");

    session.start();
    session.tick(Duration::from_secs(10));
    assert_eq!(session.timer().remaining_seconds(), 290);

    session.toggle_pause();
    session.tick(Duration::from_secs(10));
    assert_eq!(session.timer().remaining_seconds(), 290);

    session.advance_to_next();
    assert_eq!(session.timer().remaining_seconds(), 180);
    assert!(!session.timer().is_running());
    Ok(())
}

#[test]
fn test_exercise_timer_saturates() {
    let mut timer = ExerciseTimer::new(5);
    timer.toggle();
    timer.tick(Duration::from_millis(500));
    assert_eq!(timer.remaining_seconds(), 5);
    timer.tick(Duration::from_secs(30));
    assert_eq!(timer.remaining_seconds(), 0);
    assert!(!timer.is_running());

    timer.toggle();
    assert!(!timer.is_running(), "an expired timer cannot restart");
    timer.reset(5);
    assert_eq!(timer.remaining_seconds(), 5);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(65), "1:05");
    assert_eq!(format_clock(300), "5:00");
}
