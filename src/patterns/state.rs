//! State: dad either watches TV or sleeps.
//!
//! Transitions live in one table keyed by (state, action); there are no
//! state objects pointing back at their owner.

use std::fmt;
use std::io::Write;

use tracing::{debug, warn};

use crate::error::{PatternError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DadState {
    WatchingTv,
    Sleeping,
}

impl DadState {
    pub fn describe(self) -> &'static str {
        match self {
            DadState::WatchingTv => "Dad is watching TV",
            DadState::Sleeping => "Dad is sleeping",
        }
    }

    fn blocker(self) -> &'static str {
        match self {
            DadState::WatchingTv => "dad is watching TV",
            DadState::Sleeping => "dad is sleeping",
        }
    }
}

impl fmt::Display for DadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    WakeUp,
    TurnOffTv,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::WakeUp => "wake dad up",
            Action::TurnOffTv => "turn off the TV",
        }
    }
}

/// Result of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: DadState,
    pub to: DadState,
    pub narration: &'static [&'static str],
}

/// The whole machine: (state, action) -> next state plus narration.
pub fn transition(state: DadState, action: Action) -> Result<Transition> {
    let (to, narration): (DadState, &'static [&'static str]) = match (state, action) {
        (DadState::WatchingTv, Action::TurnOffTv) => (
            DadState::Sleeping,
            &[
                "We turned off the TV",
                "Dad complained that the TV was turned off and went to sleep",
            ],
        ),
        (DadState::Sleeping, Action::WakeUp) => (
            DadState::WatchingTv,
            &[
                "We woke dad up",
                "Dad complained that he was woken up and went to watch TV",
            ],
        ),
        (state, action) => {
            return Err(PatternError::InvalidStateOperation {
                state: state.blocker(),
                operation: action.verb(),
            })
        }
    };
    Ok(Transition {
        from: state,
        to,
        narration,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dad {
    state: DadState,
}

impl Dad {
    pub fn new() -> Self {
        Self::in_state(DadState::WatchingTv)
    }

    pub fn in_state(state: DadState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> DadState {
        self.state
    }

    pub fn describe(&self) -> &'static str {
        self.state.describe()
    }

    pub fn wake_up(&mut self) -> Result<Transition> {
        self.apply(Action::WakeUp)
    }

    pub fn turn_off_tv(&mut self) -> Result<Transition> {
        self.apply(Action::TurnOffTv)
    }

    fn apply(&mut self, action: Action) -> Result<Transition> {
        let step = transition(self.state, action)?;
        debug!(from = ?step.from, to = ?step.to, ?action, "dad changed state");
        self.state = step.to;
        Ok(step)
    }
}

impl Default for Dad {
    fn default() -> Self {
        Self::new()
    }
}

fn report<W: Write>(out: &mut W, outcome: Result<Transition>) -> Result<()> {
    match outcome {
        Ok(step) => {
            for line in step.narration {
                writeln!(out, "{line}")?;
            }
        }
        Err(err) => {
            warn!(%err, "rejected action");
            writeln!(out, "Not possible: {err}")?;
        }
    }
    Ok(())
}

pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    let mut dad = Dad::new();
    writeln!(out, "{}", dad.describe())?;

    report(out, dad.wake_up())?;
    report(out, dad.turn_off_tv())?;
    writeln!(out, "{}", dad.describe())?;

    report(out, dad.wake_up())?;
    writeln!(out, "{}", dad.describe())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_action_leaves_state_unchanged() {
        let mut dad = Dad::new();
        let err = dad.wake_up().unwrap_err();
        assert!(matches!(err, PatternError::InvalidStateOperation { .. }));
        assert_eq!(dad.state(), DadState::WatchingTv);

        let mut dad = Dad::in_state(DadState::Sleeping);
        assert!(dad.turn_off_tv().is_err());
        assert_eq!(dad.state(), DadState::Sleeping);
    }

    #[test]
    fn test_two_cycle() {
        let mut dad = Dad::new();
        for _ in 0..3 {
            let step = dad.turn_off_tv().unwrap();
            assert_eq!(step.to, DadState::Sleeping);
            let step = dad.wake_up().unwrap();
            assert_eq!(step.to, DadState::WatchingTv);
        }
        assert_eq!(dad.state(), DadState::WatchingTv);
    }

    #[test]
    fn test_table_is_closed() {
        let states = [DadState::WatchingTv, DadState::Sleeping];
        let actions = [Action::WakeUp, Action::TurnOffTv];
        let mut valid = 0;
        for state in states {
            for action in actions {
                if let Ok(step) = transition(state, action) {
                    valid += 1;
                    assert_ne!(step.to, state);
                    assert!(states.contains(&step.to));
                }
            }
        }
        assert_eq!(valid, 2);
    }

    #[test]
    fn test_error_message() {
        let err = transition(DadState::Sleeping, Action::TurnOffTv).unwrap_err();
        assert_eq!(err.to_string(), "cannot turn off the TV while dad is sleeping");
    }

    #[test]
    fn test_demo_transcript() {
        let mut out = Vec::new();
        demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Dad is watching TV");
        assert_eq!(lines[1], "Not possible: cannot wake dad up while dad is watching TV");
        assert_eq!(lines[4], "Dad is sleeping");
        assert_eq!(lines.last(), Some(&"Dad is watching TV"));
    }
}
