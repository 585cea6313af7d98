use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Form fields that carry their own validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Height,
    Weight,
    Age,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Age => "age",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.as_str(), message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("invalid profile: {0}")]
    Validation(FieldErrors),

    #[error("camera or photo library permission denied")]
    PermissionDenied,

    #[error("image source failed: {0}")]
    Capture(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {status}")]
    Server { status: u16 },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl FlowError {
    /// Network-side failures; these never touch session state.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FlowError::Transport(_) | FlowError::Server { .. } | FlowError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
