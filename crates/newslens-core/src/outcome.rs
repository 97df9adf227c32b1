use std::fmt;

/// Result of a soft-failing operation.
///
/// Enrichment transforms and the on-demand services never abort the caller.
/// They report one of three states instead:
///
/// * `Success` - the operation ran and produced a meaningful value
/// * `Degraded` - the operation ran but the input was degenerate, `value` is a placeholder
/// * `Failed` - the operation could not run, `reason` says why
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Degraded { value: T, reason: String },
    Failed { reason: String },
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// The produced value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) | Outcome::Degraded { value, .. } => Some(value),
            Outcome::Failed { .. } => None,
        }
    }

    /// Why the outcome is not a plain success
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Degraded { reason, .. } | Outcome::Failed { reason } => Some(reason),
        }
    }

    /// Collapse into a plain value, using `fallback` for failures
    pub fn into_value_or(self, fallback: T) -> T {
        match self {
            Outcome::Success(value) | Outcome::Degraded { value, .. } => value,
            Outcome::Failed { .. } => fallback,
        }
    }
}

impl Outcome<String> {
    /// Flatten into the text shown to a user: the value, or `"<prefix>: <reason>"` on failure
    pub fn into_display(self, prefix: &str) -> String {
        match self {
            Outcome::Success(value) | Outcome::Degraded { value, .. } => value,
            Outcome::Failed { reason } => format!("{}: {}", prefix, reason),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(value) => write!(f, "{}", value),
            Outcome::Degraded { value, reason } => write!(f, "{} ({})", value, reason),
            Outcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
