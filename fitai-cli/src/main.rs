//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use chrono::Local;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdin, stdout, Write};
use std::str::FromStr;
use std::thread;
use std::time::Instant;
use tracing::debug;

use fitai_lib::progress::{self, WeeklySummary};
use fitai_lib::session::format_clock;
use fitai_lib::{
    CoachService, Milestone, NotificationKind, PlanPreview, PricingPlan, Route, SessionPhase,
    WeeklyStat, Wizard, WorkoutPlan, WorkoutSession,
};

const BAR_WIDTH: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    // --- Check for completion generation request FIRST ---
    let cli_args = cli::parse_args(); // Parse arguments once
    let export_csv = cli_args.export_csv;
    debug!(command = ?cli_args.command, export_csv, "parsed arguments");

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command(); // Get the command structure
        let bin_name = cmd.get_name().to_string(); // Get the binary name

        eprintln!("Generating completion script for {}...", shell); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(()); // Exit after generating script
    }

    // Initialize the application service (loads config)
    let mut service =
        CoachService::initialize().context("Failed to initialize application service")?;
    let header_color = Color::from(service.header_color());

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Today => {
            let workout = service.todays_workout();
            if export_csv {
                print_exercises_csv(&workout)?;
            } else {
                println!("{}", Local::now().format("%A, %B %-d"));
                println!(
                    "{} - {} min | {} kcal | {}",
                    workout.title, workout.duration_minutes, workout.est_calories, workout.difficulty
                );
                print_exercises_table(&workout, header_color);
            }
        }
        cli::Commands::Plan => {
            let plan = service.weekly_plan();
            if export_csv {
                print_plan_csv(&plan)?;
            } else {
                print_plan_table(&plan, header_color);
            }
        }
        cli::Commands::Stats => {
            let stats = service.weekly_stats();
            if export_csv {
                print_stats_csv(&stats)?;
            } else {
                print_stats_table(&stats, header_color);
                let summary = service.dashboard_stats();
                print_weekly_summary(&summary.week);
                println!(
                    "Weekly goal:   {} {}/{}",
                    progress_bar(summary.weekly_goal_fraction),
                    summary.week.active_days,
                    summary.weekly_goal
                );
                println!(
                    "12-week goal:  {} {}/{} workouts ({})",
                    progress_bar(summary.program_fraction),
                    summary.total_workouts,
                    fitai_lib::catalog::PLANNED_PROGRAM_WORKOUTS,
                    service.user.goal
                );
                println!("Current streak: {} days", summary.current_streak);
            }
        }
        cli::Commands::Milestones => print_milestones_table(&service.milestones(), header_color),
        cli::Commands::Plans => print_pricing_table(&service.pricing_plans(), header_color),
        cli::Commands::Chat { text, no_delay } => {
            run_chat(&service, &text, no_delay)?;
        }
        cli::Commands::Onboard => {
            let mut wizard = service.new_wizard()?;
            if let Some(route) = run_onboarding(&service, &mut wizard)? {
                println!("\n-> Continuing to {} ({})", route.title(), route.path());
            }
        }
        cli::Commands::Workout { id } => {
            let mut session = match id {
                Some(id) => service.workout_session_for(&id)?,
                None => service.new_workout_session(),
            };
            if session.state().exercises.is_empty() {
                bail!(
                    "'{}' has no exercises to play. Try 'fitai workout' for today's workout.",
                    session.plan().title
                );
            }
            if let Some(route) = run_workout(&mut session)? {
                println!("\n-> Continuing to {} ({})", route.title(), route.path());
                if route == Route::Chat {
                    println!("   Try: fitai chat \"Why this workout?\"");
                }
            }
        }
        cli::Commands::Settings => print_settings(&service, header_color),
        cli::Commands::SetNotification { kind, enabled } => {
            let kind = NotificationKind::from_str(&kind)?;
            service
                .set_notification(kind, enabled)
                .context("Failed to save notification setting")?;
            println!(
                "{} {}.",
                kind.label(),
                if enabled { "enabled" } else { "disabled" }
            );
        }
        cli::Commands::SetDarkMode { enabled } => {
            service
                .set_dark_mode(enabled)
                .context("Failed to save dark mode setting")?;
            println!("Dark mode {}.", if enabled { "on" } else { "off" });
        }
        cli::Commands::SetHeaderColor { color } => match service.set_header_color(&color) {
            Ok(parsed) => println!("Header color set to {parsed:?}."),
            Err(e) => bail!("Error setting header color: {}", e),
        },
        cli::Commands::SetChatDelay { min_ms, jitter_ms } => {
            service
                .set_chat_delay(min_ms, jitter_ms)
                .context("Failed to save chat delay")?;
            println!(
                "Coach replies now take {}-{} ms.",
                min_ms,
                min_ms.saturating_add(jitter_ms)
            );
        }
        cli::Commands::ConfigPath => {
            println!("Configuration file is located at: {:?}", service.get_config_path());
        }
    }

    Ok(())
}

// --- Prompt helpers ---

/// Prints `prompt` and reads one trimmed line. `None` on end of input.
fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    let read = stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn progress_bar(fraction: f64) -> String {
    let filled = (usize::from(progress::percent(fraction)) * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress::percent(fraction)
    )
}

// --- Interactive onboarding ---

fn print_step(wizard: &Wizard) {
    let step = wizard.current_step();
    println!();
    println!("{} {}", progress_bar(wizard.progress_fraction()), wizard.step_label());
    println!("{}", step.title);
    println!("  {}", step.subtitle);
    for (index, option) in step.options.iter().enumerate() {
        let marker = match (step.multi_select, wizard.is_selected(&option.id)) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };
        let icon = option.icon.as_deref().map(|i| format!("{i} ")).unwrap_or_default();
        println!("  {}. {} {}{}", index + 1, marker, icon, option.label);
        if let Some(description) = &option.description {
            println!("        {description}");
        }
    }
}

fn print_plan_preview(preview: &PlanPreview) {
    println!();
    println!("Your AI Plan is Ready! 🎉");
    println!("Based on your goals, here's your personalized 4-week preview");
    println!();
    println!("Your 12-Week Journey");
    println!("  Weekly Sessions:  {}", preview.weekly_sessions);
    println!("  Session Duration: {}", preview.session_length);
    println!("  Primary Goal:     {}", preview.goals.join(", "));
    println!("  Difficulty:       {}", preview.level);
    if !preview.equipment.is_empty() {
        println!("  Equipment:        {}", preview.equipment.join(", "));
    }
    println!();
    println!("Week 1 Preview");
    for (day, workout) in &preview.week {
        println!("  {:<4} {}", day, workout.as_deref().unwrap_or("Rest Day"));
    }
}

/// Returns the route to continue to, or `None` if the user quit.
fn run_onboarding(service: &CoachService, wizard: &mut Wizard) -> Result<Option<Route>> {
    loop {
        if wizard.preview_shown() {
            print_plan_preview(&wizard.plan_preview(&service.user));
            let Some(input) = prompt_line("\n[Enter] Start My Journey | [b] Back | [q] Quit: ")?
            else {
                return Ok(None);
            };
            match input.to_lowercase().as_str() {
                "" => return Ok(wizard.finish()?),
                "b" => {
                    wizard.retreat()?;
                }
                "q" => return Ok(None),
                other => eprintln!("Unknown input '{other}'."),
            }
            continue;
        }

        print_step(wizard);
        let hint = if wizard.current_step().multi_select {
            "Toggle numbers (e.g. 1,3)"
        } else {
            "Pick a number"
        };
        let prompt = format!(
            "{hint} | [Enter] {} | [b] Back | [q] Quit: ",
            wizard.continue_label()
        );
        let Some(input) = prompt_line(&prompt)? else {
            return Ok(None);
        };
        match input.to_lowercase().as_str() {
            "" => {
                if wizard.can_proceed() {
                    wizard.advance()?;
                } else {
                    eprintln!("Select an option to continue.");
                }
            }
            "b" => {
                if let Some(route) = wizard.retreat()? {
                    println!("Leaving onboarding.");
                    return Ok(Some(route));
                }
            }
            "q" => return Ok(None),
            choices => {
                for token in choices.split(|c: char| c == ',' || c.is_whitespace()) {
                    if token.is_empty() {
                        continue;
                    }
                    match token.parse::<usize>() {
                        Ok(n) if n > 0 => {
                            if let Err(e) = wizard.select_index(n - 1) {
                                eprintln!("{e}");
                            }
                        }
                        _ => eprintln!("'{token}' is not an option number."),
                    }
                }
            }
        }
    }
}

// --- Interactive workout ---

fn print_session(session: &WorkoutSession) {
    let state = session.state();
    let plan = session.plan();
    println!();
    println!(
        "{} - {} min | {} kcal | {}",
        plan.title, plan.duration_minutes, plan.est_calories, plan.difficulty
    );
    println!(
        "{} {}/{} exercises",
        progress_bar(state.progress_fraction()),
        state.completed_count(),
        state.exercises.len()
    );
    for (index, exercise) in state.exercises.iter().enumerate() {
        let cursor = if state.is_active(index) { ">" } else { " " };
        let check = if exercise.completed { "[x]" } else { "[ ]" };
        let equipment = if exercise.equipment.is_empty() {
            String::new()
        } else {
            format!(" ({})", exercise.equipment.join(", "))
        };
        println!(
            "{cursor} {:>2}. {check} {} - {}{}",
            index + 1,
            exercise.name,
            exercise.reps,
            equipment
        );
    }
    match session.phase() {
        SessionPhase::NotStarted => println!(
            "Ready? {} exercises - {} minutes. Type 'start'.",
            state.exercises.len(),
            plan.duration_minutes
        ),
        SessionPhase::Paused => println!("Paused. Type 'pause' to resume."),
        SessionPhase::Active => println!(
            "Timer {} {}",
            format_clock(session.timer().remaining_seconds()),
            if session.timer().is_running() { "(running)" } else { "(stopped)" }
        ),
        SessionPhase::Complete => {}
    }
    if let Some(tip) = state.coach_tip() {
        println!("AI Coach Tip: {tip}");
    }
}

fn parse_exercise_number(arg: Option<&str>) -> Option<usize> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n - 1)
}

/// Returns the route chosen on the completion screen, or `None` if the user quit.
fn run_workout(session: &mut WorkoutSession) -> Result<Option<Route>> {
    let mut last_prompt = Instant::now();
    loop {
        if session.phase() == SessionPhase::Complete {
            let plan = session.plan();
            println!();
            println!("Workout Complete! 🎉");
            println!(
                "Great job! You crushed {} and burned approximately {} calories.",
                plan.title, plan.est_calories
            );
            let Some(input) =
                prompt_line("[Enter] Back to Dashboard | [c] Chat with AI Coach | [u] Reopen current: ")?
            else {
                return Ok(None);
            };
            match input.to_lowercase().as_str() {
                "" => return Ok(Some(session.finish())),
                "c" => return Ok(Some(session.ask_coach())),
                "u" => session.toggle_current(),
                other => eprintln!("Unknown input '{other}'."),
            }
            continue;
        }

        print_session(session);
        let Some(input) = prompt_line(
            "start | pause | done [n] | select <n> | next | timer | reset | quit > ",
        )?
        else {
            return Ok(None);
        };
        // Wall-clock time between prompts drives the exercise countdown
        session.tick(last_prompt.elapsed());
        last_prompt = Instant::now();

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();
        match command.as_str() {
            "start" | "s" => session.start(),
            "pause" | "p" | "resume" => session.toggle_pause(),
            "done" | "d" => match parse_exercise_number(arg) {
                Some(index) => match session.state().exercises.get(index).map(|e| e.id.clone()) {
                    Some(id) => session.toggle_complete(&id)?,
                    None => eprintln!("Exercise number {} does not exist.", index + 1),
                },
                None if arg.is_some() => eprintln!("Expected an exercise number."),
                None => session.toggle_current(),
            },
            "select" | "sel" => match parse_exercise_number(arg) {
                Some(index) => {
                    if let Err(e) = session.select_index(index) {
                        eprintln!("{e}");
                    }
                }
                None => eprintln!("Usage: select <n>"),
            },
            "next" | "n" => {
                if !session.state().can_advance() {
                    eprintln!("Already on the last exercise.");
                }
                session.advance_to_next();
            }
            "timer" | "t" => session.toggle_timer(),
            "reset" | "r" => session.reset_timer(),
            "quit" | "q" => return Ok(None),
            "" => {}
            other => eprintln!("Unknown command '{other}'."),
        }
    }
}

// --- Chat ---

fn run_chat(service: &CoachService, text: &str, no_delay: bool) -> Result<()> {
    let mut conversation = service.new_conversation();
    let mut rng = rand::thread_rng();
    let sent_at = Instant::now();
    let delay = conversation.send(text, sent_at, &mut rng)?;

    if no_delay {
        conversation.poll(sent_at + delay);
    } else {
        eprint!("Coach is typing...");
        thread::sleep(delay);
        eprintln!();
        conversation.poll(Instant::now());
    }

    let Some(reply) = conversation.messages().last() else {
        bail!("The coach did not reply.");
    };
    println!("[{}] AI Coach:", reply.timestamp.format("%H:%M"));
    println!("{}", reply.content);
    if !reply.suggestions.is_empty() {
        println!();
        println!("Suggestions:");
        for suggestion in &reply.suggestions {
            println!("  - {suggestion}");
        }
    }
    Ok(())
}

// --- Settings ---

fn print_settings(service: &CoachService, header_color: Color) {
    let user = &service.user;
    println!("{} ({}) - {}", user.name, user.email, user.level);
    println!("Fitness Goal: {}", user.goal);
    println!("Sessions per Week: {} days", user.sessions_per_week);
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Setting").fg(header_color),
            Cell::new("Value").fg(header_color),
            Cell::new("Description").fg(header_color),
        ]);
    for kind in NotificationKind::ALL {
        table.add_row(vec![
            Cell::new(kind.label()),
            Cell::new(on_off(service.config.notifications.get(kind))),
            Cell::new(kind.description()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Dark Mode"),
        Cell::new(on_off(service.config.dark_mode)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Header Color"),
        Cell::new(&service.config.theme.header_color),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Coach Delay"),
        Cell::new(format!(
            "{} ms + up to {} ms",
            service.config.chat.min_delay_ms, service.config.chat.jitter_ms
        )),
        Cell::new("Simulated thinking time"),
    ]);
    println!("{table}");
    println!("Subscription: Free Plan (see 'fitai plans' to upgrade)");
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

// --- Table Printing Functions ---

fn print_exercises_table(workout: &WorkoutPlan, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Time").fg(header_color),
            Cell::new("Equipment").fg(header_color),
        ]);

    for (index, exercise) in workout.exercises.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&exercise.name),
            Cell::new(&exercise.reps),
            Cell::new(format_clock(u64::from(exercise.duration_seconds))),
            Cell::new(if exercise.equipment.is_empty() {
                "-".to_string()
            } else {
                exercise.equipment.join(", ")
            }),
        ]);
    }
    println!("{table}");
}

fn print_exercises_csv(workout: &WorkoutPlan) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "Id",
        "Exercise",
        "Reps",
        "Duration_Seconds",
        "Equipment",
    ])?;
    for exercise in &workout.exercises {
        writer.write_record([
            exercise.id.clone(),
            exercise.name.clone(),
            exercise.reps.clone(),
            exercise.duration_seconds.to_string(),
            exercise.equipment.join(";"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_plan_table(plan: &[WorkoutPlan], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").fg(header_color),
            Cell::new("Workout").fg(header_color),
            Cell::new("Type").fg(header_color),
            Cell::new("Duration").fg(header_color),
            Cell::new("Difficulty").fg(header_color),
            Cell::new("Est. kcal").fg(header_color),
            Cell::new("Done").fg(header_color),
        ]);

    for workout in plan {
        let title = if workout.is_rest_day() {
            Cell::new(&workout.title).add_attribute(Attribute::Italic)
        } else {
            Cell::new(&workout.title)
        };
        table.add_row(vec![
            Cell::new(&workout.day),
            title,
            Cell::new(&workout.kind),
            Cell::new(format!("{} min", workout.duration_minutes)),
            Cell::new(workout.difficulty.to_string()),
            Cell::new(workout.est_calories),
            Cell::new(if workout.completed { "✓" } else { "" }).fg(Color::Green),
        ]);
    }
    println!("{table}");
}

fn print_plan_csv(plan: &[WorkoutPlan]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "Id",
        "Day",
        "Title",
        "Type",
        "Duration_Minutes",
        "Difficulty",
        "Est_Calories",
        "Completed",
    ])?;
    for workout in plan {
        writer.write_record([
            workout.id.clone(),
            workout.day.clone(),
            workout.title.clone(),
            workout.kind.clone(),
            workout.duration_minutes.to_string(),
            workout.difficulty.to_string(),
            workout.est_calories.to_string(),
            workout.completed.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_stats_table(stats: &[WeeklyStat], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").fg(header_color),
            Cell::new("Calories").fg(header_color),
            Cell::new("Minutes").fg(header_color),
            Cell::new("Workouts").fg(header_color),
        ]);
    for day in stats {
        table.add_row(vec![
            Cell::new(&day.day),
            Cell::new(day.calories),
            Cell::new(day.duration_minutes),
            Cell::new(day.workouts),
        ]);
    }
    println!("{table}");
}

fn print_weekly_summary(summary: &WeeklySummary) {
    println!(
        "This week: {} workouts | {} kcal | {} minutes",
        summary.total_workouts, summary.total_calories, summary.total_minutes
    );
}

fn print_stats_csv(stats: &[WeeklyStat]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Day", "Calories", "Duration_Minutes", "Workouts"])?;
    for day in stats {
        writer.write_record([
            day.day.clone(),
            day.calories.to_string(),
            day.duration_minutes.to_string(),
            day.workouts.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_milestones_table(milestones: &[Milestone], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("").fg(header_color),
            Cell::new("Achievement").fg(header_color),
            Cell::new("Description").fg(header_color),
            Cell::new("Status").fg(header_color),
        ]);
    for milestone in milestones {
        let status = match (milestone.achieved, milestone.date) {
            (true, Some(date)) => Cell::new(format!("Unlocked {}", date.format("%Y-%m-%d")))
                .fg(Color::Green),
            (true, None) => Cell::new("Unlocked").fg(Color::Green),
            (false, _) => Cell::new("Locked").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&milestone.icon),
            Cell::new(&milestone.title),
            Cell::new(&milestone.description),
            status,
        ]);
    }
    println!("{table}");
}

fn print_pricing_table(plans: &[PricingPlan], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Plan").fg(header_color),
            Cell::new("Price").fg(header_color),
            Cell::new("Features").fg(header_color),
            Cell::new("").fg(header_color),
        ]);
    for plan in plans {
        let name = if plan.popular {
            Cell::new(format!("{} (Most Popular)", plan.name)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&plan.name)
        };
        table.add_row(vec![
            name,
            Cell::new(format!("${}/{}", plan.price, plan.period)),
            Cell::new(
                plan.features
                    .iter()
                    .map(|f| format!("✓ {f}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Cell::new(&plan.cta),
        ]);
    }
    println!("{table}");
}
