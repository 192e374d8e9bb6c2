// src/catalog.rs
//! Static content the app is driven by: the user persona, the workout
//! catalog, weekly stats, milestones, pricing and the onboarding question
//! bank. Every constructor returns a fresh copy so callers can own it.
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessLevel::Beginner => write!(f, "Beginner"),
            FitnessLevel::Intermediate => write!(f, "Intermediate"),
            FitnessLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub level: FitnessLevel,
    pub goal: String,
    pub sessions_per_week: u32,
    pub current_streak: u32,
    pub total_workouts: u32,
    pub calories_burned: u32,
    pub weekly_goal: u32,
}

impl UserProfile {
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// One entry of a workout. `completed` is the only field a session mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub reps: String,
    pub duration_seconds: u32,
    pub equipment: Vec<String>,
    pub completed: bool,
    pub coach_tip: Option<String>,
}

impl Exercise {
    pub fn new(id: &str, name: &str, reps: &str, duration_seconds: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            reps: reps.to_string(),
            duration_seconds,
            equipment: Vec::new(),
            completed: false,
            coach_tip: None,
        }
    }

    fn with_equipment(mut self, equipment: &[&str]) -> Self {
        self.equipment = equipment.iter().map(|e| (*e).to_string()).collect();
        self
    }

    fn with_tip(mut self, tip: &str) -> Self {
        self.coach_tip = Some(tip.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    pub title: String,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub est_calories: u32,
    pub kind: String,
    pub completed: bool,
    pub day: String,
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    fn header(
        id: &str,
        title: &str,
        duration_minutes: u32,
        difficulty: Difficulty,
        est_calories: u32,
        kind: &str,
        day: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            duration_minutes,
            difficulty,
            est_calories,
            kind: kind.to_string(),
            completed: false,
            day: day.to_string(),
            exercises: Vec::new(),
        }
    }

    pub fn is_rest_day(&self) -> bool {
        self.kind == "Rest"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyStat {
    pub day: String,
    pub calories: u32,
    pub duration_minutes: u32,
    pub workouts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub achieved: bool,
    pub date: Option<NaiveDate>,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub period: String,
    pub features: Vec<String>,
    pub cta: String,
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOption {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl StepOption {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: None,
            description: None,
        }
    }

    fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingStep {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub multi_select: bool,
    pub options: Vec<StepOption>,
}

impl OnboardingStep {
    pub fn option(&self, option_id: &str) -> Option<&StepOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Canned assistant reply. Turned into a `ChatMessage` by the chat module.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedReply {
    pub content: String,
    pub suggestions: Vec<String>,
}

impl ScriptedReply {
    fn new(content: &str, suggestions: &[&str]) -> Self {
        Self {
            content: content.to_string(),
            suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

pub const PLANNED_PROGRAM_WORKOUTS: u32 = 48; // 12 weeks x 4 sessions

pub const STEP_GOALS: &str = "goals";
pub const STEP_LEVEL: &str = "level";
pub const STEP_DAYS: &str = "days";
pub const STEP_TIME: &str = "time";
pub const STEP_EQUIPMENT: &str = "equipment";

pub fn default_user() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Emma".to_string(),
        email: "emma@example.com".to_string(),
        age: 30,
        level: FitnessLevel::Beginner,
        goal: "Lose 6 kg".to_string(),
        sessions_per_week: 4,
        current_streak: 7,
        total_workouts: 23,
        calories_burned: 4850,
        weekly_goal: 4,
    }
}

pub fn todays_workout() -> WorkoutPlan {
    let mut plan = WorkoutPlan::header(
        "w1",
        "Full Body Strength",
        30,
        Difficulty::Medium,
        220,
        "Strength",
        "Today",
    );
    plan.exercises = vec![
        Exercise::new("e1", "Warm-up Dynamic Stretches", "5 minutes", 300),
        Exercise::new("e2", "Bodyweight Squats", "3 x 12", 180),
        Exercise::new("e3", "Push-ups", "3 x 10", 150).with_tip(
            "Keep your core tight during push-ups. If 10 reps feel too hard, try doing them on your knees - quality over quantity!",
        ),
        Exercise::new("e4", "Dumbbell Rows", "3 x 12 each arm", 240).with_equipment(&["Dumbbells"]),
        Exercise::new("e5", "Plank Hold", "3 x 30 seconds", 120),
        Exercise::new("e6", "Lunges", "3 x 10 each leg", 180),
        Exercise::new("e7", "Cool-down Stretches", "5 minutes", 300),
    ];
    plan
}

pub fn weekly_plan() -> Vec<WorkoutPlan> {
    let mut rest = WorkoutPlan::header("w3", "Rest Day", 0, Difficulty::Easy, 0, "Rest", "Wednesday");
    rest.completed = true;
    vec![
        todays_workout(),
        WorkoutPlan::header("w2", "HIIT Cardio Blast", 25, Difficulty::Hard, 280, "Cardio", "Tuesday"),
        rest,
        WorkoutPlan::header("w4", "Upper Body Focus", 35, Difficulty::Medium, 200, "Strength", "Thursday"),
        WorkoutPlan::header("w5", "Core & Flexibility", 30, Difficulty::Easy, 150, "Flexibility", "Friday"),
        WorkoutPlan::header("w6", "Lower Body Power", 40, Difficulty::Hard, 300, "Strength", "Saturday"),
        WorkoutPlan::header("w7", "Active Recovery Yoga", 20, Difficulty::Easy, 80, "Recovery", "Sunday"),
    ]
}

pub fn weekly_stats() -> Vec<WeeklyStat> {
    [
        ("Mon", 220, 30, 1),
        ("Tue", 280, 25, 1),
        ("Wed", 0, 0, 0),
        ("Thu", 200, 35, 1),
        ("Fri", 150, 30, 1),
        ("Sat", 0, 0, 0),
        ("Sun", 0, 0, 0),
    ]
    .into_iter()
    .map(|(day, calories, duration_minutes, workouts)| WeeklyStat {
        day: day.to_string(),
        calories,
        duration_minutes,
        workouts,
    })
    .collect()
}

pub fn milestones() -> Vec<Milestone> {
    let milestone = |id: &str, title: &str, description: &str, date: Option<(i32, u32, u32)>, icon: &str| Milestone {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        achieved: date.is_some(),
        date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        icon: icon.to_string(),
    };
    vec![
        milestone("m1", "First Workout", "Completed your first workout!", Some((2024, 1, 1)), "🎯"),
        milestone("m2", "Week Warrior", "7-day streak achieved", Some((2024, 1, 8)), "🔥"),
        milestone("m3", "Strength Builder", "Complete 10 strength workouts", Some((2024, 1, 15)), "💪"),
        milestone("m4", "Calorie Crusher", "Burn 5,000 calories total", None, "🔥"),
        milestone("m5", "Consistency King", "30-day streak", None, "👑"),
    ]
}

pub fn pricing_plans() -> Vec<PricingPlan> {
    let plan = |id: &str, name: &str, price: f64, period: &str, features: &[&str], cta: &str, popular: bool| {
        PricingPlan {
            id: id.to_string(),
            name: name.to_string(),
            price,
            period: period.to_string(),
            features: features.iter().map(|f| (*f).to_string()).collect(),
            cta: cta.to_string(),
            popular,
        }
    };
    vec![
        plan(
            "free",
            "Free",
            0.0,
            "forever",
            &["3 workouts per week", "Basic AI coaching", "Progress tracking", "Community access"],
            "Current Plan",
            false,
        ),
        plan(
            "pro",
            "Pro",
            14.99,
            "month",
            &[
                "Unlimited workouts",
                "Advanced AI coaching",
                "Personalized meal plans",
                "Wearable sync",
                "Video exercise guides",
                "Priority support",
            ],
            "Start Free Trial",
            true,
        ),
        plan(
            "annual",
            "Pro Annual",
            99.99,
            "year",
            &["Everything in Pro", "2 months free", "Exclusive challenges", "1-on-1 coach check-ins"],
            "Best Value",
            false,
        ),
    ]
}

pub fn onboarding_steps() -> Vec<OnboardingStep> {
    vec![
        OnboardingStep {
            id: STEP_GOALS.to_string(),
            title: "What's your main fitness goal?".to_string(),
            subtitle: "This helps us create the perfect plan for you".to_string(),
            multi_select: false,
            options: vec![
                StepOption::new("lose", "Lose weight").icon("⚖️"),
                StepOption::new("gain", "Build muscle").icon("💪"),
                StepOption::new("tone", "Get toned").icon("✨"),
                StepOption::new("health", "Improve health").icon("❤️"),
                StepOption::new("energy", "Boost energy").icon("⚡"),
            ],
        },
        OnboardingStep {
            id: STEP_LEVEL.to_string(),
            title: "What's your fitness level?".to_string(),
            subtitle: "Be honest - we'll adjust as you progress".to_string(),
            multi_select: false,
            options: vec![
                StepOption::new("beginner", "Beginner")
                    .described("New to exercise or returning after a break"),
                StepOption::new("intermediate", "Intermediate")
                    .described("Regular exercise 1-3 times per week"),
                StepOption::new("advanced", "Advanced")
                    .described("Consistent training 4+ times per week"),
            ],
        },
        OnboardingStep {
            id: STEP_DAYS.to_string(),
            title: "How many days can you train?".to_string(),
            subtitle: "Quality over quantity - consistency is key".to_string(),
            multi_select: false,
            options: vec![
                StepOption::new("2", "2 days"),
                StepOption::new("3", "3 days"),
                StepOption::new("4", "4 days"),
                StepOption::new("5", "5+ days"),
            ],
        },
        OnboardingStep {
            id: STEP_TIME.to_string(),
            title: "How long per session?".to_string(),
            subtitle: "We'll optimize every minute".to_string(),
            multi_select: false,
            options: vec![
                StepOption::new("15", "15-20 min"),
                StepOption::new("30", "30-40 min"),
                StepOption::new("45", "45-60 min"),
                StepOption::new("60", "60+ min"),
            ],
        },
        OnboardingStep {
            id: STEP_EQUIPMENT.to_string(),
            title: "What equipment do you have?".to_string(),
            subtitle: "Select all that apply".to_string(),
            multi_select: true,
            options: vec![
                StepOption::new("none", "No equipment").icon("🏠"),
                StepOption::new("dumbbells", "Dumbbells").icon("🏋️"),
                StepOption::new("bands", "Resistance bands").icon("🎗️"),
                StepOption::new("kettlebell", "Kettlebell").icon("⚫"),
                StepOption::new("pullup", "Pull-up bar").icon("📏"),
                StepOption::new("gym", "Full gym access").icon("🏢"),
            ],
        },
    ]
}

/// Week 1 schedule shown on the plan preview. `None` is a rest day.
pub fn week_preview() -> Vec<(String, Option<String>)> {
    [
        ("Mon", Some("Full Body Strength")),
        ("Tue", Some("HIIT Cardio")),
        ("Wed", None),
        ("Thu", Some("Upper Body")),
        ("Fri", Some("Core & Flexibility")),
        ("Sat", None),
        ("Sun", None),
    ]
    .into_iter()
    .map(|(day, title)| (day.to_string(), title.map(str::to_string)))
    .collect()
}

pub fn greeting(user: &UserProfile) -> ScriptedReply {
    ScriptedReply::new(
        &format!(
            "Hi {}! 👋 I'm your AI fitness coach. I've analyzed your goals and fitness level to create a personalized 12-week plan. Ready to crush today's workout?",
            user.name
        ),
        &["Start today's workout", "Show my plan", "Why this workout?"],
    )
}

/// Exact prompt -> reply table. Matching is literal, no normalisation.
pub fn chat_script() -> Vec<(String, ScriptedReply)> {
    vec![
        (
            "Why this workout?".to_string(),
            ScriptedReply::new(
                "Great question! Today's Full Body Strength workout focuses on compound movements that maximize calorie burn and build lean muscle. At your beginner-intermediate level, these exercises will help you:\n\n• Build foundational strength\n• Boost metabolism for fat loss\n• Improve posture and balance\n\nThe 30-minute duration fits your schedule, and I've kept it equipment-minimal since you mentioned limited home gym access.",
                &["Got it, let's start!", "Can I modify exercises?", "What about nutrition?"],
            ),
        ),
        (
            "Can I swap cardio for yoga?".to_string(),
            ScriptedReply::new(
                "Absolutely! Here's the trade-off:\n\n**Swapping Tuesday's HIIT for Yoga:**\n✅ Better for recovery and flexibility\n✅ Lower impact on joints\n✅ Great for stress relief\n\n⚠️ Consideration:\n• You'd burn ~100 fewer calories\n• Less cardio conditioning\n\n**My suggestion:** Keep 1 HIIT session weekly and add yoga on rest days. Want me to update your plan?",
                &["Yes, update my plan", "Keep original plan", "Show alternatives"],
            ),
        ),
        (
            "What about nutrition?".to_string(),
            ScriptedReply::new(
                "For your goal of losing 6 kg in 12 weeks, here's my guidance:\n\n🍽️ **Daily Target:** ~1,600-1,800 calories\n🥗 **Protein:** 1.6g per kg body weight\n💧 **Water:** 2-3 liters daily\n\n**Post-workout tip:** Have a protein-rich snack within 30 min of finishing. Greek yogurt with berries is perfect!\n\nWant me to suggest meal ideas that complement today's workout?",
                &["Show meal ideas", "Track my nutrition", "Back to workout"],
            ),
        ),
    ]
}

pub fn chat_fallback() -> ScriptedReply {
    ScriptedReply::new(
        "That's a great question! Based on your current fitness level and goals, I'd recommend focusing on consistency first. Every workout you complete brings you closer to your goal of losing 6kg.\n\nWould you like me to adjust your plan or provide more specific guidance?",
        &["Adjust my plan", "Show tomorrow's workout", "Give me a tip"],
    )
}
