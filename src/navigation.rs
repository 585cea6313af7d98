use std::fmt;

/// Screens of the app. The flow moves Onboarding -> Upload -> Results; the
/// trackers are reachable from Results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Onboarding,
    Upload,
    Results,
    Workout,
    Nutrition,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Onboarding => "onboarding",
            Stage::Upload => "upload",
            Stage::Results => "results",
            Stage::Workout => "workout",
            Stage::Nutrition => "nutrition",
        };
        f.write_str(name)
    }
}

/// What the current screen asks the navigator to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the current screen.
    Stay,
    /// Forward after a successful step.
    Goto(Stage),
    /// Backward because a prerequisite is missing from the session.
    Redirect(Stage),
}

impl Navigation {
    pub fn target(self) -> Option<Stage> {
        match self {
            Navigation::Stay => None,
            Navigation::Goto(s) | Navigation::Redirect(s) => Some(s),
        }
    }
}
