use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, instrument};

use crate::analysis::services::trigger_analysis;
use crate::console::Console;
use crate::error::FlowError;
use crate::navigation::{Navigation, Stage};
use crate::photos::{CaptureMode, PhotoAngle, PhotoIntake};
use crate::profile::dto::{ActivityLevel, ProfileForm, UnitSystem};
use crate::profile::services::{submit_profile, SUBMIT_FAILED_MESSAGE};
use crate::results::{present, Presentation};
use crate::session::Session;
use crate::state::AppState;
use crate::tracker::{workout, NutritionLog, WorkoutLog};

/// Drives the whole flow from a terminal until the user quits or input ends.
pub struct Wizard<'a, R, W> {
    st: &'a AppState,
    console: &'a Console<R, W>,
    session: Session,
    intake: PhotoIntake,
    workout: WorkoutLog,
    nutrition: NutritionLog,
}

type Step = anyhow::Result<Option<Stage>>;

const CLOCK: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

impl<'a, R, W> Wizard<'a, R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(st: &'a AppState, console: &'a Console<R, W>) -> Self {
        Self {
            st,
            console,
            session: Session::new(),
            intake: PhotoIntake::new(),
            workout: WorkoutLog::new(),
            nutrition: NutritionLog::default(),
        }
    }

    #[instrument(skip(self), fields(session = %self.session.id()))]
    pub async fn run(mut self, start: Stage) -> anyhow::Result<Session> {
        let mut stage = Some(start);
        while let Some(current) = stage {
            info!(stage = %current, "enter");
            stage = match current {
                Stage::Onboarding => self.onboarding().await?,
                Stage::Upload => self.upload().await?,
                Stage::Results => self.results().await?,
                Stage::Workout => self.workout().await?,
                Stage::Nutrition => self.nutrition().await?,
            };
        }
        Ok(self.session)
    }

    async fn onboarding(&mut self) -> Step {
        self.console.say("\nLet's Get Started").await?;
        self.console
            .say("Tell us about yourself to get personalized fitness and nutrition recommendations")
            .await?;

        loop {
            let Some(form) = self.read_form().await? else {
                return Ok(None);
            };
            match submit_profile(self.st, &mut self.session, &form).await {
                Ok(nav) => return Ok(nav.target()),
                Err(FlowError::Validation(errors)) => {
                    for (field, message) in errors.iter() {
                        self.console.say(&format!("  {}: {}", field.as_str(), message)).await?;
                    }
                }
                Err(_) => self.console.say(SUBMIT_FAILED_MESSAGE).await?,
            }
        }
    }

    async fn read_form(&self) -> anyhow::Result<Option<ProfileForm>> {
        let c = self.console;
        let Some(units) = c.ask("Units (metric/imperial) [metric]:").await? else {
            return Ok(None);
        };
        let units = units.parse::<UnitSystem>().unwrap_or_default();

        let mut answers = Vec::with_capacity(5);
        for question in [
            "Name (Optional):".to_string(),
            "Email (Optional):".to_string(),
            format!("Height ({}):", units.height_unit()),
            format!("Weight ({}):", units.weight_unit()),
            "Age:".to_string(),
        ] {
            match c.ask(&question).await? {
                Some(a) => answers.push(a),
                None => return Ok(None),
            }
        }

        c.say("Activity Level").await?;
        for (i, level) in ActivityLevel::ALL.iter().enumerate() {
            c.say(&format!("  {}) {} - {}", i + 1, level.label(), level.description()))
                .await?;
        }
        let Some(choice) = c.ask("Choose 1-5 [3]:").await? else {
            return Ok(None);
        };
        let activity_level = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| ActivityLevel::ALL.get(i).copied())
            .unwrap_or_default();

        let mut answers = answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();
        Ok(Some(ProfileForm {
            name: next(),
            email: next(),
            height: next(),
            weight: next(),
            age: next(),
            activity_level,
            units,
        }))
    }

    async fn upload(&mut self) -> Step {
        loop {
            let photos = self.intake.photos();
            self.console
                .say(&format!("\nUpload Photos ({}/3)", photos.count()))
                .await?;
            for angle in PhotoAngle::ALL {
                let line = match photos.get(angle) {
                    Some(p) => format!(
                        "  [x] {} ({}, {})",
                        angle,
                        p.content_type,
                        p.captured_at.format(CLOCK).unwrap_or_default()
                    ),
                    None => format!("  [ ] {}", angle),
                };
                self.console.say(&line).await?;
            }

            let Some(cmd) = self
                .console
                .ask("front/side/back to add, 'analyze' to continue, 'quit' to exit:")
                .await?
            else {
                return Ok(None);
            };

            match cmd.as_str() {
                "analyze" | "a" => {
                    match trigger_analysis(self.st, &mut self.session, &self.intake, self.console)
                        .await
                    {
                        Ok(Navigation::Stay) | Err(_) => continue,
                        Ok(nav) => return Ok(nav.target()),
                    }
                }
                "quit" | "q" => return Ok(None),
                other => {
                    let Ok(angle) = other.parse::<PhotoAngle>() else {
                        continue;
                    };
                    let Some(mode) = self.pick_mode().await? else {
                        return Ok(None);
                    };
                    // Failures were already reported through the console.
                    let _ = self
                        .intake
                        .capture(self.console, self.console, angle, mode)
                        .await;
                }
            }
        }
    }

    async fn pick_mode(&self) -> anyhow::Result<Option<CaptureMode>> {
        loop {
            let Some(answer) = self
                .console
                .ask("Select Photo: 1) Take Photo  2) Choose from Library:")
                .await?
            else {
                return Ok(None);
            };
            match answer.as_str() {
                "1" => return Ok(Some(CaptureMode::Camera)),
                "2" => return Ok(Some(CaptureMode::Library)),
                _ => continue,
            }
        }
    }

    async fn results(&mut self) -> Step {
        let view = match present(&self.session) {
            Presentation::Render(view) => view,
            Presentation::Redirect(stage) => return Ok(Some(stage)),
        };
        self.console.say(&format!("\n{}", view)).await?;

        loop {
            let Some(cmd) = self
                .console
                .ask("'workout', 'nutrition', 'upload' for new photos, or 'quit':")
                .await?
            else {
                return Ok(None);
            };
            match cmd.as_str() {
                "workout" | "w" => return Ok(Some(Stage::Workout)),
                "nutrition" | "n" => return Ok(Some(Stage::Nutrition)),
                "upload" | "u" => return Ok(Some(Stage::Upload)),
                "quit" | "q" => return Ok(None),
                _ => continue,
            }
        }
    }

    async fn workout(&mut self) -> Step {
        let plan = workout::PLAN;
        loop {
            self.console
                .say(&format!("\n{} ({}, {} days/week)", plan.goal, plan.duration, plan.days_per_week))
                .await?;
            for (i, day) in plan.workouts.iter().enumerate() {
                let done = self.workout.completed_in_day(day.day);
                let total: u32 = day.exercises.iter().map(|e| e.sets).sum();
                self.console
                    .say(&format!(
                        "  {}) {} - {} ({}) {}/{} sets",
                        i + 1,
                        day.day,
                        day.title,
                        day.duration,
                        done,
                        total
                    ))
                    .await?;
                if self.workout.expanded() == Some(day.day) {
                    for (ei, e) in day.exercises.iter().enumerate() {
                        let sets: String = (0..e.sets as usize)
                            .map(|s| if self.workout.is_set_done(day.day, ei, s) { 'x' } else { '.' })
                            .collect();
                        self.console
                            .say(&format!(
                                "       {}. {} {}x{} rest {} [{}]",
                                ei + 1,
                                e.name,
                                e.sets,
                                e.reps,
                                e.rest,
                                sets
                            ))
                            .await?;
                    }
                }
            }

            let Some(cmd) = self
                .console
                .ask("'<day>' to expand, '<exercise> <set>' to tick, 'back':")
                .await?
            else {
                return Ok(None);
            };
            if cmd == "back" || cmd == "b" {
                return Ok(Some(Stage::Results));
            }
            let nums: Vec<usize> = cmd
                .split_whitespace()
                .filter_map(|n| n.parse().ok())
                .collect();
            match nums.as_slice() {
                [d] => {
                    if let Some(day) = d.checked_sub(1).and_then(|i| plan.workouts.get(i)) {
                        self.workout.toggle_day(day.day);
                    }
                }
                [ex, set] => {
                    let day = self
                        .workout
                        .expanded()
                        .and_then(|open| plan.workouts.iter().find(|w| w.day == open));
                    if let Some(day) = day {
                        let (ex, set) = (ex.saturating_sub(1), set.saturating_sub(1));
                        if day.exercises.get(ex).is_some_and(|e| set < e.sets as usize) {
                            self.workout.toggle_set(day.day, ex, set);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    async fn nutrition(&mut self) -> Step {
        loop {
            let plan = *self.nutrition.plan();
            self.console
                .say(&format!(
                    "\nToday's Plan: {} / {} kcal, water {}/{} glasses ({:.0}%)",
                    self.nutrition.calories_consumed(),
                    plan.daily_calories,
                    self.nutrition.water(),
                    plan.water_goal,
                    self.nutrition.water_percentage()
                ))
                .await?;
            for m in plan.macros {
                self.console
                    .say(&format!("  {} {}g ({}%)", m.name, m.grams, m.percentage))
                    .await?;
            }
            for (i, meal) in plan.meals.iter().enumerate() {
                let mark = if self.nutrition.is_meal_done(i) { "x" } else { " " };
                self.console
                    .say(&format!(
                        "  [{}] {}) {} - {} kcal: {}",
                        mark,
                        i + 1,
                        meal.time,
                        meal.calories,
                        meal.items.join(", ")
                    ))
                    .await?;
            }

            let Some(cmd) = self
                .console
                .ask("'<meal>' to tick, '+'/'-' water, 'back':")
                .await?
            else {
                return Ok(None);
            };
            match cmd.as_str() {
                "back" | "b" => return Ok(Some(Stage::Results)),
                "+" => {
                    self.nutrition.adjust_water(1);
                }
                "-" => {
                    self.nutrition.adjust_water(-1);
                }
                other => {
                    if let Some(i) = other.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                        self.nutrition.toggle_meal(i);
                    }
                }
            }
        }
    }
}
