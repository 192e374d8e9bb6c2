// src/onboarding.rs
//! Linear onboarding wizard. The reducer is a pure function over a
//! snapshot; `Wizard` owns the question bank and the current snapshot.
use crate::catalog::{
    self, OnboardingStep, UserProfile, STEP_DAYS, STEP_EQUIPMENT, STEP_GOALS, STEP_LEVEL,
    STEP_TIME,
};
use crate::navigation::Route;
use crate::progress;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_SESSION_LABEL: &str = "30m";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("The onboarding flow has no steps.")]
    NoSteps,
    #[error("Step index {0} is out of range.")]
    StepOutOfRange(usize),
    #[error("Unknown onboarding step '{0}'.")]
    UnknownStep(String),
    #[error("Step '{step_id}' has no option '{option_id}'.")]
    UnknownOption { step_id: String, option_id: String },
    #[error("Step '{step_id}' is not the step being shown (current: '{current}').")]
    StepNotDisplayed { step_id: String, current: String },
    #[error("The plan preview is showing; go back to change answers.")]
    PreviewShown,
    #[error("The plan preview has not been reached yet.")]
    PreviewNotShown,
}

/// Step id -> selected option ids, in click order.
pub type SelectionState = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub current_step: usize,
    pub selections: SelectionState,
    pub preview_shown: bool,
}

impl WizardState {
    pub fn selected(&self, step_id: &str) -> &[String] {
        self.selections
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_selected(&self, step_id: &str, option_id: &str) -> bool {
        self.selected(step_id).iter().any(|id| id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    SelectOption { step_id: String, option_id: String },
    Advance,
    Retreat,
    /// "Start My Journey" on the plan preview.
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    pub navigate: Option<Route>,
}

impl Transition {
    fn stay(state: WizardState) -> Self {
        Self { state, navigate: None }
    }
}

/// Whether the continue control is live for the step being shown.
pub fn can_proceed(steps: &[OnboardingStep], state: &WizardState) -> bool {
    steps
        .get(state.current_step)
        .is_some_and(|step| !state.selected(&step.id).is_empty())
}

pub fn reduce(
    steps: &[OnboardingStep],
    state: &WizardState,
    action: WizardAction,
) -> Result<Transition, WizardError> {
    if steps.is_empty() {
        return Err(WizardError::NoSteps);
    }
    let current = steps
        .get(state.current_step)
        .ok_or(WizardError::StepOutOfRange(state.current_step))?;
    let last_index = steps.len() - 1;

    match action {
        WizardAction::SelectOption { step_id, option_id } => {
            if state.preview_shown {
                return Err(WizardError::PreviewShown);
            }
            let step = steps
                .iter()
                .find(|s| s.id == step_id)
                .ok_or_else(|| WizardError::UnknownStep(step_id.clone()))?;
            if step.id != current.id {
                return Err(WizardError::StepNotDisplayed {
                    step_id,
                    current: current.id.clone(),
                });
            }
            if step.option(&option_id).is_none() {
                return Err(WizardError::UnknownOption { step_id, option_id });
            }

            let mut next = state.clone();
            let selected = next.selections.entry(step_id).or_default();
            if step.multi_select {
                match selected.iter().position(|id| *id == option_id) {
                    Some(pos) => {
                        selected.remove(pos);
                    }
                    None => selected.push(option_id),
                }
            } else {
                *selected = vec![option_id];
            }
            Ok(Transition::stay(next))
        }
        WizardAction::Advance => {
            if state.preview_shown || !can_proceed(steps, state) {
                return Ok(Transition::stay(state.clone()));
            }
            let mut next = state.clone();
            if next.current_step < last_index {
                next.current_step += 1;
            } else {
                next.preview_shown = true;
            }
            Ok(Transition::stay(next))
        }
        WizardAction::Retreat => {
            let mut next = state.clone();
            if next.preview_shown {
                next.preview_shown = false;
                Ok(Transition::stay(next))
            } else if next.current_step > 0 {
                next.current_step -= 1;
                Ok(Transition::stay(next))
            } else {
                Ok(Transition {
                    state: next,
                    navigate: Some(Route::Landing),
                })
            }
        }
        WizardAction::Finish => {
            if !state.preview_shown {
                return Err(WizardError::PreviewNotShown);
            }
            Ok(Transition {
                state: state.clone(),
                navigate: Some(Route::Dashboard),
            })
        }
    }
}

/// Summary shown once every question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPreview {
    pub goals: Vec<String>,
    pub level: String,
    pub weekly_sessions: String,
    pub session_length: String,
    pub equipment: Vec<String>,
    pub week: Vec<(String, Option<String>)>,
}

impl PlanPreview {
    /// Unanswered steps fall back to the user's profile.
    pub fn from_selections(
        steps: &[OnboardingStep],
        selections: &SelectionState,
        user: &UserProfile,
    ) -> Self {
        let labels = |step_id: &str| -> Vec<String> {
            let Some(step) = steps.iter().find(|s| s.id == step_id) else {
                return Vec::new();
            };
            selections
                .get(step_id)
                .into_iter()
                .flatten()
                .filter_map(|id| step.option(id).map(|o| o.label.clone()))
                .collect()
        };
        let first_or = |step_id: &str, fallback: String| {
            labels(step_id).into_iter().next().unwrap_or(fallback)
        };

        let goals = labels(STEP_GOALS);
        Self {
            goals: if goals.is_empty() { vec![user.goal.clone()] } else { goals },
            level: first_or(STEP_LEVEL, user.level.to_string()),
            weekly_sessions: first_or(STEP_DAYS, format!("{} days", user.sessions_per_week)),
            session_length: first_or(STEP_TIME, DEFAULT_SESSION_LABEL.to_string()),
            equipment: labels(STEP_EQUIPMENT),
            week: catalog::week_preview(),
        }
    }
}

pub struct Wizard {
    steps: Vec<OnboardingStep>,
    state: WizardState,
}

impl Wizard {
    /// # Errors
    /// `WizardError::NoSteps` if the question bank is empty.
    pub fn new(steps: Vec<OnboardingStep>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            state: WizardState::default(),
        })
    }

    pub fn steps(&self) -> &[OnboardingStep] {
        &self.steps
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> &OnboardingStep {
        &self.steps[self.state.current_step]
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step + 1 == self.steps.len()
    }

    pub fn preview_shown(&self) -> bool {
        self.state.preview_shown
    }

    pub fn is_selected(&self, option_id: &str) -> bool {
        self.state.is_selected(&self.current_step().id, option_id)
    }

    pub fn can_proceed(&self) -> bool {
        can_proceed(&self.steps, &self.state)
    }

    pub fn progress_fraction(&self) -> f64 {
        progress::fraction(self.state.current_step + 1, self.steps.len())
    }

    /// "2/5" style counter for the header.
    pub fn step_label(&self) -> String {
        format!("{}/{}", self.state.current_step + 1, self.steps.len())
    }

    pub fn continue_label(&self) -> &'static str {
        if self.is_last_step() {
            "Create My Plan"
        } else {
            "Continue"
        }
    }

    pub fn plan_preview(&self, user: &UserProfile) -> PlanPreview {
        PlanPreview::from_selections(&self.steps, &self.state.selections, user)
    }

    fn apply(&mut self, action: WizardAction) -> Result<Option<Route>, WizardError> {
        debug!(?action, step = self.state.current_step, "wizard action");
        match reduce(&self.steps, &self.state, action) {
            Ok(transition) => {
                self.state = transition.state;
                Ok(transition.navigate)
            }
            Err(e) => {
                warn!(error = %e, "wizard action rejected");
                Err(e)
            }
        }
    }

    /// # Errors
    /// Rejects unknown ids or a step other than the one being shown.
    pub fn select_option(&mut self, step_id: &str, option_id: &str) -> Result<(), WizardError> {
        self.apply(WizardAction::SelectOption {
            step_id: step_id.to_string(),
            option_id: option_id.to_string(),
        })
        .map(|_| ())
    }

    /// Selects the option at `index` of the step being shown.
    /// # Errors
    /// `WizardError::UnknownOption` when `index` is past the last option.
    pub fn select_index(&mut self, index: usize) -> Result<(), WizardError> {
        let step = self.current_step();
        let step_id = step.id.clone();
        let option_id = step
            .options
            .get(index)
            .map(|o| o.id.clone())
            .ok_or_else(|| WizardError::UnknownOption {
                step_id: step_id.clone(),
                option_id: format!("#{}", index + 1),
            })?;
        self.select_option(&step_id, &option_id)
    }

    /// # Errors
    /// Only fails if the snapshot was corrupted.
    pub fn advance(&mut self) -> Result<Option<Route>, WizardError> {
        self.apply(WizardAction::Advance)
    }

    /// Returns `Some(Route::Landing)` when backing out of the first step.
    /// # Errors
    /// Only fails if the snapshot was corrupted.
    pub fn retreat(&mut self) -> Result<Option<Route>, WizardError> {
        self.apply(WizardAction::Retreat)
    }

    /// # Errors
    /// `WizardError::PreviewNotShown` before the last step was confirmed.
    pub fn finish(&mut self) -> Result<Option<Route>, WizardError> {
        self.apply(WizardAction::Finish)
    }
}
