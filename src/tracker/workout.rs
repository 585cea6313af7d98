use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkoutDay {
    pub day: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub exercises: &'static [Exercise],
}

#[derive(Debug, Clone, Copy)]
pub struct WorkoutPlan {
    pub goal: &'static str,
    pub duration: &'static str,
    pub days_per_week: u32,
    pub workouts: &'static [WorkoutDay],
}

const fn ex(name: &'static str, sets: u32, reps: &'static str, rest: &'static str) -> Exercise {
    Exercise {
        name,
        sets,
        reps,
        rest,
    }
}

pub const PLAN: WorkoutPlan = WorkoutPlan {
    goal: "Build Muscle & Improve Posture",
    duration: "6 weeks",
    days_per_week: 4,
    workouts: &[
        WorkoutDay {
            day: "Monday",
            title: "Upper Body Strength",
            duration: "45 min",
            exercises: &[
                ex("Push-ups", 3, "12", "60s"),
                ex("Chest Press", 3, "8-10", "90s"),
                ex("Bent-over Rows", 3, "10", "90s"),
                ex("Shoulder Press", 3, "10", "60s"),
                ex("Bicep Curls", 2, "12", "45s"),
            ],
        },
        WorkoutDay {
            day: "Tuesday",
            title: "Core & Cardio",
            duration: "30 min",
            exercises: &[
                ex("Plank", 3, "45s", "60s"),
                ex("Bicycle Crunches", 3, "20", "45s"),
                ex("Dead Bug", 3, "10", "45s"),
                ex("Jump Rope", 3, "60s", "90s"),
            ],
        },
        WorkoutDay {
            day: "Thursday",
            title: "Lower Body Power",
            duration: "40 min",
            exercises: &[
                ex("Squats", 3, "12", "90s"),
                ex("Lunges", 3, "10", "60s"),
                ex("Deadlifts", 3, "8", "2 min"),
                ex("Calf Raises", 3, "15", "45s"),
            ],
        },
        WorkoutDay {
            day: "Friday",
            title: "Full Body Circuit",
            duration: "35 min",
            exercises: &[
                ex("Burpees", 3, "8", "90s"),
                ex("Mountain Climbers", 3, "20", "60s"),
                ex("Russian Twists", 3, "20", "45s"),
                ex("Wall Sit", 3, "30s", "60s"),
            ],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetKey {
    pub day: String,
    pub exercise: usize,
    pub set: usize,
}

/// Set check-offs and the one expanded day. View state only.
#[derive(Debug, Default)]
pub struct WorkoutLog {
    completed: HashSet<SetKey>,
    expanded: Option<String>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a set; returns whether it is now complete.
    pub fn toggle_set(&mut self, day: &str, exercise: usize, set: usize) -> bool {
        let key = SetKey {
            day: day.to_string(),
            exercise,
            set,
        };
        if self.completed.remove(&key) {
            false
        } else {
            self.completed.insert(key);
            true
        }
    }

    pub fn is_set_done(&self, day: &str, exercise: usize, set: usize) -> bool {
        self.completed.contains(&SetKey {
            day: day.to_string(),
            exercise,
            set,
        })
    }

    pub fn completed_in_day(&self, day: &str) -> usize {
        self.completed.iter().filter(|k| k.day == day).count()
    }

    /// Opening a day closes whichever was open; toggling the open day closes it.
    pub fn toggle_day(&mut self, day: &str) {
        if self.expanded.as_deref() == Some(day) {
            self.expanded = None;
        } else {
            self.expanded = Some(day.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }
}
