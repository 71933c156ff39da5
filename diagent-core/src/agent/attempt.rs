use std::fmt;

/// Why a single generate-extract-render attempt did not produce an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The reply had no `@start… @end…` block
    NoMarkup,
    /// The markup was extracted but the renderer rejected it
    Render { markup: String, reason: String },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::NoMarkup => {
                f.write_str("no PlantUML block (@start... @end...) was found in the reply")
            }
            AttemptFailure::Render { reason, .. } => {
                write!(f, "the PlantUML code failed to render: {}", reason.trim())
            }
        }
    }
}

/// Immutable view of where the retry loop stands, handed to each attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptContext {
    /// 1-based attempt number
    pub attempt: usize,
    pub max_attempts: usize,
    pub prior_failure: Option<AttemptFailure>,
}

impl AttemptContext {
    pub fn first(max_attempts: usize) -> Self {
        Self {
            attempt: 1,
            max_attempts,
            prior_failure: None,
        }
    }

    /// Context for the attempt after this one failed, or `None` once the bound is reached
    pub fn next(&self, failure: AttemptFailure) -> Option<Self> {
        (self.attempt < self.max_attempts).then(|| Self {
            attempt: self.attempt + 1,
            max_attempts: self.max_attempts,
            prior_failure: Some(failure),
        })
    }

    pub fn is_retry(&self) -> bool {
        self.prior_failure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_stops_at_bound() {
        let first = AttemptContext::first(3);
        assert!(!first.is_retry());

        let second = first.next(AttemptFailure::NoMarkup).unwrap();
        assert_eq!(second.attempt, 2);
        assert_eq!(second.prior_failure, Some(AttemptFailure::NoMarkup));

        let third = second.next(AttemptFailure::NoMarkup).unwrap();
        assert_eq!(third.attempt, 3);
        assert!(third.next(AttemptFailure::NoMarkup).is_none());
    }

    #[test]
    fn single_attempt_never_retries() {
        assert!(AttemptContext::first(1).next(AttemptFailure::NoMarkup).is_none());
    }

    #[test]
    fn render_failure_display_includes_reason() {
        let failure = AttemptFailure::Render {
            markup: "@startuml\n@enduml".into(),
            reason: "Syntax Error? (line 2)\n".into(),
        };
        assert_eq!(
            failure.to_string(),
            "the PlantUML code failed to render: Syntax Error? (line 2)"
        );
    }
}
