use std::sync::Mutex;

use async_trait::async_trait;

/// Answer to a two-way confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    GoBack,
}

/// A blocking message or question shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// User-facing dialogs. Each call blocks until the user dismisses or answers.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn alert(&self, title: &str, message: &str);

    async fn confirm(
        &self,
        title: &str,
        message: &str,
        proceed_label: &str,
        back_label: &str,
    ) -> Decision;

    /// Transient status line; returns immediately.
    async fn notify(&self, message: &str);
}

/// Prompt with a preset answer that records everything it was shown.
pub struct ScriptedPrompt {
    answer: Decision,
    shown: Mutex<Vec<Alert>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: Decision) -> Self {
        Self {
            answer,
            shown: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Alert> {
        self.shown.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().map(|v| v.clone()).unwrap_or_default()
    }

    fn record(&self, title: &str, message: &str) {
        if let Ok(mut v) = self.shown.lock() {
            v.push(Alert {
                title: title.to_string(),
                message: message.to_string(),
            });
        }
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn alert(&self, title: &str, message: &str) {
        self.record(title, message);
    }

    async fn confirm(&self, title: &str, message: &str, _: &str, _: &str) -> Decision {
        self.record(title, message);
        self.answer
    }

    async fn notify(&self, message: &str) {
        if let Ok(mut v) = self.notices.lock() {
            v.push(message.to_string());
        }
    }
}
