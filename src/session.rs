use crate::countdown::Countdown;
use crate::plan::StepKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Initial,
    Prepare,
    Work,
    Rest,
    Complete,
}

impl From<StepKind> for SessionState {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Prepare => SessionState::Prepare,
            StepKind::Work => SessionState::Work,
            StepKind::Rest => SessionState::Rest,
        }
    }
}

impl SessionState {
    /// Whether a new workout may be started from here
    pub fn can_start(&self) -> bool {
        matches!(self, SessionState::Initial | SessionState::Complete)
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SessionState::Prepare | SessionState::Work | SessionState::Rest
        )
    }
}

/// Position within the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Not started (index -1)
    #[default]
    Idle,
    Step(usize),
    /// Advanced past the last step
    Finished,
}

impl Cursor {
    pub fn index(&self) -> Option<usize> {
        match self {
            Cursor::Step(i) => Some(*i),
            Cursor::Idle | Cursor::Finished => None,
        }
    }

    /// The index the next advance lands on
    pub fn next_index(&self) -> Option<usize> {
        match self {
            Cursor::Idle => Some(0),
            Cursor::Step(i) => Some(i + 1),
            Cursor::Finished => None,
        }
    }
}

/// Mutable runtime state of one workout attempt
#[derive(Debug, Clone)]
pub struct Session {
    pub cursor: Cursor,
    pub state: SessionState,
    /// The single active countdown, if any
    pub countdown: Option<Countdown>,
    pub started_at_ms: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            cursor: Cursor::Idle,
            state: SessionState::Initial,
            countdown: None,
            started_at_ms: None,
        }
    }
}
