use anyhow::Result;
use fitai_lib::catalog::{self, STEP_DAYS, STEP_EQUIPMENT, STEP_GOALS, STEP_LEVEL, STEP_TIME};
use fitai_lib::onboarding::{reduce, WizardAction};
use fitai_lib::{Route, Wizard, WizardError, WizardState};

fn create_wizard() -> Result<Wizard> {
    Ok(Wizard::new(catalog::onboarding_steps())?)
}

// Walks the wizard to the given step, answering each single-select question on the way.
fn answer_through(wizard: &mut Wizard, steps: usize) -> Result<()> {
    for _ in 0..steps {
        wizard.select_index(0)?;
        wizard.advance()?;
    }
    Ok(())
}

#[test]
fn test_starts_on_first_step_with_nothing_selected() -> Result<()> {
    let wizard = create_wizard()?;
    assert_eq!(wizard.current_step().id, STEP_GOALS);
    assert!(!wizard.preview_shown());
    assert!(!wizard.can_proceed());
    assert_eq!(wizard.step_label(), "1/5");
    assert!((wizard.progress_fraction() - 0.2).abs() < f64::EPSILON);
    assert_eq!(wizard.continue_label(), "Continue");
    Ok(())
}

#[test]
fn test_empty_question_bank_is_rejected() {
    assert!(matches!(Wizard::new(Vec::new()), Err(WizardError::NoSteps)));
}

#[test]
fn test_single_select_keeps_at_most_one() -> Result<()> {
    let mut wizard = create_wizard()?;
    for option in ["lose", "gain", "tone", "gain", "energy"] {
        wizard.select_option(STEP_GOALS, option)?;
        assert!(wizard.state().selected(STEP_GOALS).len() <= 1);
    }
    assert_eq!(wizard.state().selected(STEP_GOALS), ["energy".to_string()]);

    // Re-clicking the same option keeps it selected
    wizard.select_option(STEP_GOALS, "energy")?;
    assert_eq!(wizard.state().selected(STEP_GOALS), ["energy".to_string()]);
    Ok(())
}

#[test]
fn test_multi_select_toggles_in_click_order() -> Result<()> {
    let mut wizard = create_wizard()?;
    answer_through(&mut wizard, 4)?;
    assert_eq!(wizard.current_step().id, STEP_EQUIPMENT);

    wizard.select_option(STEP_EQUIPMENT, "kettlebell")?;
    wizard.select_option(STEP_EQUIPMENT, "dumbbells")?;
    assert_eq!(
        wizard.state().selected(STEP_EQUIPMENT),
        ["kettlebell".to_string(), "dumbbells".to_string()]
    );

    // Two clicks on the same option restore the previous set
    let before = wizard.state().selected(STEP_EQUIPMENT).to_vec();
    wizard.select_option(STEP_EQUIPMENT, "bands")?;
    wizard.select_option(STEP_EQUIPMENT, "bands")?;
    assert_eq!(wizard.state().selected(STEP_EQUIPMENT), before.as_slice());

    // Deselecting everything makes continue inert again
    wizard.select_option(STEP_EQUIPMENT, "kettlebell")?;
    wizard.select_option(STEP_EQUIPMENT, "dumbbells")?;
    assert!(wizard.state().selected(STEP_EQUIPMENT).is_empty());
    assert!(!wizard.can_proceed());
    Ok(())
}

#[test]
fn test_advance_is_noop_without_selection_on_every_step() -> Result<()> {
    let steps = catalog::onboarding_steps();
    for index in 0..steps.len() {
        let state = WizardState {
            current_step: index,
            ..Default::default()
        };
        let transition = reduce(&steps, &state, WizardAction::Advance)?;
        assert_eq!(transition.state, state, "step {index} advanced without a selection");
        assert_eq!(transition.navigate, None);
    }
    Ok(())
}

#[test]
fn test_advance_walks_to_preview() -> Result<()> {
    let mut wizard = create_wizard()?;
    answer_through(&mut wizard, 4)?;
    assert!(wizard.is_last_step());
    assert_eq!(wizard.continue_label(), "Create My Plan");
    assert_eq!(wizard.step_label(), "5/5");
    assert!((wizard.progress_fraction() - 1.0).abs() < f64::EPSILON);

    wizard.select_option(STEP_EQUIPMENT, "none")?;
    assert_eq!(wizard.advance()?, None);
    assert!(wizard.preview_shown());
    assert_eq!(wizard.state().current_step, 4);
    Ok(())
}

#[test]
fn test_retreat_from_preview_then_steps_then_router() -> Result<()> {
    let mut wizard = create_wizard()?;
    answer_through(&mut wizard, 4)?;
    wizard.select_option(STEP_EQUIPMENT, "gym")?;
    wizard.advance()?;
    assert!(wizard.preview_shown());

    // Leaves the preview but stays on the last step
    assert_eq!(wizard.retreat()?, None);
    assert!(!wizard.preview_shown());
    assert_eq!(wizard.current_step().id, STEP_EQUIPMENT);

    for expected in [STEP_TIME, STEP_DAYS, STEP_LEVEL, STEP_GOALS] {
        assert_eq!(wizard.retreat()?, None);
        assert_eq!(wizard.current_step().id, expected);
    }

    // Answers survive going back
    assert_eq!(wizard.state().selected(STEP_GOALS), ["lose".to_string()]);

    assert_eq!(wizard.retreat()?, Some(Route::Landing));
    assert_eq!(wizard.state().current_step, 0);
    Ok(())
}

#[test]
fn test_finish_requires_preview() -> Result<()> {
    let mut wizard = create_wizard()?;
    assert_eq!(wizard.finish(), Err(WizardError::PreviewNotShown));

    answer_through(&mut wizard, 4)?;
    wizard.select_option(STEP_EQUIPMENT, "bands")?;
    wizard.advance()?;
    assert_eq!(wizard.finish()?, Some(Route::Dashboard));
    Ok(())
}

#[test]
fn test_selection_contract_violations_are_rejected() -> Result<()> {
    let mut wizard = create_wizard()?;

    let err = wizard.select_option("shoe-size", "42").unwrap_err();
    assert_eq!(err, WizardError::UnknownStep("shoe-size".to_string()));

    let err = wizard.select_option(STEP_GOALS, "fly").unwrap_err();
    assert!(matches!(err, WizardError::UnknownOption { .. }));

    // Only the step on screen accepts clicks
    let err = wizard.select_option(STEP_LEVEL, "beginner").unwrap_err();
    assert!(matches!(err, WizardError::StepNotDisplayed { .. }));

    assert!(wizard.select_index(99).is_err());
    assert!(wizard.state().selections.is_empty());
    Ok(())
}

#[test]
fn test_no_selection_changes_while_preview_is_shown() -> Result<()> {
    let mut wizard = create_wizard()?;
    answer_through(&mut wizard, 4)?;
    wizard.select_option(STEP_EQUIPMENT, "none")?;
    wizard.advance()?;

    let err = wizard.select_option(STEP_EQUIPMENT, "gym").unwrap_err();
    assert_eq!(err, WizardError::PreviewShown);
    assert_eq!(wizard.state().selected(STEP_EQUIPMENT), ["none".to_string()]);
    Ok(())
}

#[test]
fn test_plan_preview_uses_answers_and_falls_back_to_profile() -> Result<()> {
    let user = catalog::default_user();
    let mut wizard = create_wizard()?;

    let preview = wizard.plan_preview(&user);
    assert_eq!(preview.goals, vec!["Lose 6 kg".to_string()]);
    assert_eq!(preview.level, "Beginner");
    assert_eq!(preview.weekly_sessions, "4 days");
    assert_eq!(preview.session_length, "30m");
    assert!(preview.equipment.is_empty());
    assert_eq!(preview.week.len(), 7);
    assert_eq!(preview.week[0], ("Mon".to_string(), Some("Full Body Strength".to_string())));
    assert_eq!(preview.week[2], ("Wed".to_string(), None));

    wizard.select_option(STEP_GOALS, "gain")?;
    wizard.advance()?;
    wizard.select_option(STEP_LEVEL, "advanced")?;
    wizard.advance()?;
    wizard.select_option(STEP_DAYS, "5")?;
    wizard.advance()?;
    wizard.select_option(STEP_TIME, "45")?;
    wizard.advance()?;
    wizard.select_option(STEP_EQUIPMENT, "pullup")?;
    wizard.select_option(STEP_EQUIPMENT, "dumbbells")?;

    let preview = wizard.plan_preview(&user);
    assert_eq!(preview.goals, vec!["Build muscle".to_string()]);
    assert_eq!(preview.level, "Advanced");
    assert_eq!(preview.weekly_sessions, "5+ days");
    assert_eq!(preview.session_length, "45-60 min");
    assert_eq!(
        preview.equipment,
        vec!["Pull-up bar".to_string(), "Dumbbells".to_string()]
    );
    Ok(())
}
