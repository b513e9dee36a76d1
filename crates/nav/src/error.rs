use foundation::ids::SectionId;
use runtime::timer::TimerError;

#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// A required page element was not found; carries the selector.
    MissingElement(String),
    EmptySectionId,
    DuplicateSection(SectionId),
    AlreadyBuilt,
    InvalidConfig(String),
    /// Host (DOM) call failed.
    Dom(String),
    Timer(TimerError),
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::MissingElement(sel) => write!(f, "required element missing: {sel}"),
            NavError::EmptySectionId => write!(f, "section without an id"),
            NavError::DuplicateSection(id) => write!(f, "duplicate section id: {id}"),
            NavError::AlreadyBuilt => write!(f, "navigation menu already built"),
            NavError::InvalidConfig(msg) => write!(f, "invalid nav config: {msg}"),
            NavError::Dom(msg) => write!(f, "dom error: {msg}"),
            NavError::Timer(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::Timer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TimerError> for NavError {
    fn from(err: TimerError) -> Self {
        NavError::Timer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::NavError;
    use runtime::timer::TimerError;

    #[test]
    fn messages_name_the_culprit() {
        assert_eq!(
            NavError::MissingElement("#navbar__list".to_string()).to_string(),
            "required element missing: #navbar__list"
        );
        assert_eq!(
            NavError::DuplicateSection("section1".into()).to_string(),
            "duplicate section id: section1"
        );
    }

    #[test]
    fn timer_errors_convert() {
        let err: NavError = TimerError::Unavailable.into();
        assert_eq!(err, NavError::Timer(TimerError::Unavailable));
        assert!(std::error::Error::source(&err).is_some());
    }
}
