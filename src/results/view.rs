use std::fmt;

use tracing::debug;

use crate::analysis::dto::AnalysisResult;
use crate::navigation::Stage;
use crate::session::Session;

// Shown when the server leaves a field out. Literal placeholders, not estimates.
pub const DEFAULT_ROAST: &str = "Great work on taking your first step towards better fitness! 💪";
pub const DEFAULT_BMI: f64 = 24.2;
pub const DEFAULT_BODY_FAT: f64 = 18.0;
pub const DEFAULT_BMR: f64 = 1847.0;
pub const DEFAULT_STRENGTHS: [&str; 3] = [
    "Good overall posture and alignment",
    "Balanced shoulder width",
    "Healthy body composition baseline",
];
pub const DEFAULT_IMPROVEMENTS: [&str; 3] = [
    "Core strength needs development",
    "Upper body muscle mass could be increased",
    "Slight forward head posture to address",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub roast: String,
    pub bmi: Metric,
    pub body_fat: Metric,
    pub bmr: Metric,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

pub enum Presentation {
    Render(ResultsView),
    Redirect(Stage),
}

/// Zero and empty text count as missing, same as an absent field.
fn number_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v != 0.0 && !v.is_nan()).unwrap_or(default)
}

fn list_or(value: &Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match value {
        Some(items) => items.clone(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl ResultsView {
    pub fn from_result(r: &AnalysisResult) -> Self {
        Self {
            roast: r
                .ai_roast
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_ROAST.to_string()),
            bmi: Metric {
                label: "BMI",
                value: number_or(r.bmi, DEFAULT_BMI),
                status: "Normal",
            },
            body_fat: Metric {
                label: "Body Fat %",
                value: number_or(r.body_fat_percentage, DEFAULT_BODY_FAT),
                status: "Athletic",
            },
            bmr: Metric {
                label: "BMR",
                value: number_or(r.bmr, DEFAULT_BMR),
                status: "Calories/day",
            },
            strengths: list_or(&r.strengths, &DEFAULT_STRENGTHS),
            improvements: list_or(&r.improvements, &DEFAULT_IMPROVEMENTS),
        }
    }

    pub fn metrics(&self) -> [&Metric; 3] {
        [&self.bmi, &self.body_fat, &self.bmr]
    }
}

/// Results need a stored analysis; without one the user goes back to upload.
pub fn present(session: &Session) -> Presentation {
    match session.analysis() {
        Some(stored) => {
            debug!(session = %session.id(), analyzed_at = %stored.stored_at, "rendering analysis");
            Presentation::Render(ResultsView::from_result(&stored.result))
        }
        None => {
            debug!(session = %session.id(), "no analysis yet; redirecting to upload");
            Presentation::Redirect(Stage::Upload)
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {:>8}  {}", self.label, self.value, self.status)
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Analysis")?;
        writeln!(f)?;
        writeln!(f, "{}", self.roast)?;
        writeln!(f)?;
        for m in self.metrics() {
            writeln!(f, "{}", m)?;
        }
        writeln!(f)?;
        writeln!(f, "Strengths")?;
        for s in &self.strengths {
            writeln!(f, "  + {}", s)?;
        }
        writeln!(f, "Areas to Improve")?;
        for s in &self.improvements {
            writeln!(f, "  - {}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_bmr_renders_literal_default() {
        let r = AnalysisResult {
            bmi: Some(21.3),
            ..Default::default()
        };
        let view = ResultsView::from_result(&r);
        assert_eq!(view.bmr.value, 1847.0);
        assert_eq!(view.bmi.value, 21.3);
        let text = view.to_string();
        assert!(text.contains("1847"));
        assert!(text.contains("21.3"));
    }

    #[test]
    fn empty_result_uses_every_default() {
        let view = ResultsView::from_result(&AnalysisResult::default());
        assert_eq!(view.roast, DEFAULT_ROAST);
        assert_eq!(view.bmi.value, 24.2);
        assert_eq!(view.body_fat.value, 18.0);
        assert_eq!(view.strengths.len(), 3);
        assert_eq!(view.improvements[2], "Slight forward head posture to address");
    }

    #[test]
    fn zero_and_blank_fall_back_but_empty_lists_do_not() {
        let r = AnalysisResult {
            ai_roast: Some(String::new()),
            bmr: Some(0.0),
            strengths: Some(vec![]),
            ..Default::default()
        };
        let view = ResultsView::from_result(&r);
        assert_eq!(view.roast, DEFAULT_ROAST);
        assert_eq!(view.bmr.value, DEFAULT_BMR);
        assert!(view.strengths.is_empty());
    }

    #[test]
    fn present_redirects_without_analysis() {
        let session = Session::new();
        assert!(matches!(present(&session), Presentation::Redirect(Stage::Upload)));
    }

    #[test]
    fn present_renders_stored_analysis() {
        let mut session = Session::new();
        session.store_analysis(AnalysisResult {
            ai_roast: Some("Solid base.".into()),
            ..Default::default()
        });
        match present(&session) {
            Presentation::Render(v) => assert_eq!(v.roast, "Solid base."),
            Presentation::Redirect(_) => panic!("expected render"),
        }
    }
}
