//! Load state of a fetched resource

/// `Idle → Loading → Ready | Failed`
///
/// A successful fetch always replaces the previous value as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Same state with the value dropped
    pub fn status(&self) -> LoadState<()> {
        match self {
            Self::Idle => LoadState::Idle,
            Self::Loading => LoadState::Loading,
            Self::Ready(_) => LoadState::Ready(()),
            Self::Failed(message) => LoadState::Failed(message.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Idle => LoadState::Idle,
            Self::Loading => LoadState::Loading,
            Self::Ready(value) => LoadState::Ready(f(value)),
            Self::Failed(message) => LoadState::Failed(message),
        }
    }
}

/// A fetched list of entities
pub type Collection<T> = LoadState<Vec<T>>;
