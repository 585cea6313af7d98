use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
pub struct Macro {
    pub name: &'static str,
    pub grams: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Meal {
    pub time: &'static str,
    pub calories: u32,
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct NutritionPlan {
    pub daily_calories: u32,
    pub macros: [Macro; 3],
    /// Glasses per day.
    pub water_goal: u32,
    pub meals: &'static [Meal],
}

pub const PLAN: NutritionPlan = NutritionPlan {
    daily_calories: 2340,
    macros: [
        Macro { name: "protein", grams: 140, percentage: 24 },
        Macro { name: "carbs", grams: 290, percentage: 50 },
        Macro { name: "fat", grams: 65, percentage: 26 },
    ],
    water_goal: 8,
    meals: &[
        Meal {
            time: "Breakfast",
            calories: 450,
            items: &[
                "Oatmeal with berries (1 cup)",
                "Greek yogurt (150g)",
                "Almonds (30g)",
                "Green tea",
            ],
        },
        Meal {
            time: "Lunch",
            calories: 550,
            items: &[
                "Grilled chicken breast (150g)",
                "Quinoa (100g)",
                "Mixed vegetables",
                "Avocado (1/2)",
            ],
        },
        Meal {
            time: "Snack",
            calories: 200,
            items: &["Protein shake", "Banana (1 medium)"],
        },
        Meal {
            time: "Dinner",
            calories: 650,
            items: &[
                "Salmon fillet (180g)",
                "Sweet potato (150g)",
                "Steamed broccoli",
                "Mixed green salad",
            ],
        },
        Meal {
            time: "Evening Snack",
            calories: 150,
            items: &["Greek yogurt (100g)", "Handful of walnuts"],
        },
    ],
};

/// Meal check-offs and a water counter bounded by the plan's goal.
#[derive(Debug)]
pub struct NutritionLog {
    plan: NutritionPlan,
    completed: BTreeSet<usize>,
    water: u32,
}

impl Default for NutritionLog {
    fn default() -> Self {
        Self::new(PLAN)
    }
}

impl NutritionLog {
    pub fn new(plan: NutritionPlan) -> Self {
        Self {
            plan,
            completed: BTreeSet::new(),
            water: 0,
        }
    }

    pub fn plan(&self) -> &NutritionPlan {
        &self.plan
    }

    /// Flips a meal; out-of-range indexes are ignored. Returns the new state.
    pub fn toggle_meal(&mut self, index: usize) -> bool {
        if index >= self.plan.meals.len() {
            return false;
        }
        if self.completed.remove(&index) {
            false
        } else {
            self.completed.insert(index);
            true
        }
    }

    pub fn is_meal_done(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn completed_meals(&self) -> usize {
        self.completed.len()
    }

    pub fn calories_consumed(&self) -> u32 {
        self.completed
            .iter()
            .filter_map(|i| self.plan.meals.get(*i))
            .map(|m| m.calories)
            .sum()
    }

    /// Adds `change` glasses, clamped to `0..=water_goal`.
    pub fn adjust_water(&mut self, change: i32) -> u32 {
        let next = (self.water as i64 + change as i64).clamp(0, self.plan.water_goal as i64);
        self.water = next as u32;
        self.water
    }

    pub fn water(&self) -> u32 {
        self.water
    }

    pub fn water_percentage(&self) -> f64 {
        if self.plan.water_goal == 0 {
            return 0.0;
        }
        self.water as f64 / self.plan.water_goal as f64 * 100.0
    }
}
