// src/navigation.rs
use std::fmt;
use strum_macros::EnumIter;

/// Pages a front end can be asked to show. Reducers never switch pages
/// themselves, they hand one of these back to whoever owns the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Route {
    Landing,
    Onboarding,
    Dashboard,
    Workout,
    Chat,
    Progress,
    Settings,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/dashboard",
            Route::Workout => "/workout",
            Route::Chat => "/chat",
            Route::Progress => "/progress",
            Route::Settings => "/settings",
        }
    }

    /// Resolves a path back to its route. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::iter().find(|route| route.path() == normalized)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Route::Landing => "FitAI",
            Route::Onboarding => "Onboarding",
            Route::Dashboard => "Dashboard",
            Route::Workout => "Workout",
            Route::Chat => "AI Coach",
            Route::Progress => "Progress",
            Route::Settings => "Settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
