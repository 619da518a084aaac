//! Chain of Responsibility: registration checks linked one after another.
//!
//! Every validating link forwards unconditionally once its own check is
//! done. Only [`Register`] may end a chain; a validating link without a
//! successor fails with [`PatternError::BrokenChain`].

use std::fmt;
use std::io::Write;

use tracing::{debug, warn};

use crate::error::{PatternError, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct User {
    pub login_correct: bool,
    pub phone_correct: bool,
    pub email_correct: bool,
    pub registered: bool,
}

impl User {
    pub fn is_fully_valid(&self) -> bool {
        self.login_correct && self.phone_correct && self.email_correct
    }
}

/// The field a validating link guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Login,
    Phone,
    Email,
}

impl Check {
    fn field_mut(self, user: &mut User) -> &mut bool {
        match self {
            Check::Login => &mut user.login_correct,
            Check::Phone => &mut user.phone_correct,
            Check::Email => &mut user.email_correct,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Check::Login => "login",
            Check::Phone => "phone",
            Check::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Validated(Check),
    AlreadyValid(Check),
    Registered,
    AlreadyRegistered,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Registered | StepOutcome::AlreadyRegistered)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Validated(Check::Login) => write!(f, "Correct login"),
            StepOutcome::Validated(Check::Phone) => write!(f, "Correct phone number"),
            StepOutcome::Validated(Check::Email) => write!(f, "Correct email address"),
            StepOutcome::AlreadyValid(Check::Login) => write!(f, "User already exists!"),
            StepOutcome::AlreadyValid(Check::Phone) => write!(f, "Phone number already exists!"),
            StepOutcome::AlreadyValid(Check::Email) => write!(f, "Email address already exists!"),
            StepOutcome::Registered => write!(f, "Account has been registered!"),
            StepOutcome::AlreadyRegistered => write!(f, "Account was already registered"),
        }
    }
}

/// Everything the chain did during one run, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub steps: Vec<StepOutcome>,
}

impl ChainReport {
    pub fn terminal_hits(&self) -> usize {
        self.steps.iter().filter(|step| step.is_terminal()).count()
    }

    pub fn duplicates(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, StepOutcome::AlreadyValid(_)))
            .count()
    }
}

pub trait Handler {
    fn name(&self) -> &'static str;
    fn handle(&self, user: &mut User, report: &mut ChainReport) -> Result<()>;
}

/// A link that marks one field valid and forwards.
pub struct Validator {
    check: Check,
    next: Option<Box<dyn Handler>>,
}

impl Validator {
    pub fn new(check: Check) -> Self {
        Self { check, next: None }
    }

    pub fn set_next(&mut self, next: Box<dyn Handler>) {
        self.next = Some(next);
    }
}

impl Handler for Validator {
    fn name(&self) -> &'static str {
        self.check.name()
    }

    fn handle(&self, user: &mut User, report: &mut ChainReport) -> Result<()> {
        let field = self.check.field_mut(user);
        if *field {
            debug!(handler = self.name(), "field already valid, forwarding");
            report.steps.push(StepOutcome::AlreadyValid(self.check));
        } else {
            *field = true;
            debug!(handler = self.name(), "field validated, forwarding");
            report.steps.push(StepOutcome::Validated(self.check));
        }

        match &self.next {
            Some(next) => next.handle(user, report),
            None => Err(PatternError::BrokenChain {
                handler: self.name(),
            }),
        }
    }
}

/// Terminal link: completes the registration and never forwards.
#[derive(Debug, Default)]
pub struct Register;

impl Handler for Register {
    fn name(&self) -> &'static str {
        "register"
    }

    fn handle(&self, user: &mut User, report: &mut ChainReport) -> Result<()> {
        if user.registered {
            report.steps.push(StepOutcome::AlreadyRegistered);
        } else {
            user.registered = true;
            report.steps.push(StepOutcome::Registered);
        }
        debug!("registration chain reached its terminal");
        Ok(())
    }
}

/// Assembles validating links in call order.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    checks: Vec<Check>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Links the checks and ends the chain with [`Register`].
    pub fn finish(self) -> Box<dyn Handler> {
        self.checks
            .into_iter()
            .rev()
            .fold(Box::new(Register) as Box<dyn Handler>, |next, check| {
                let mut link = Validator::new(check);
                link.set_next(next);
                Box::new(link) as Box<dyn Handler>
            })
    }

    /// Links the checks without a terminal. The last check has no
    /// successor, so running the chain reports it as broken.
    pub fn finish_open(self) -> Option<Box<dyn Handler>> {
        let mut next: Option<Box<dyn Handler>> = None;
        for check in self.checks.into_iter().rev() {
            let mut link = Validator::new(check);
            if let Some(successor) = next.take() {
                link.set_next(successor);
            }
            next = Some(Box::new(link));
        }
        next
    }
}

/// Runs `chain` once over `user`.
pub fn execute(chain: &dyn Handler, user: &mut User) -> Result<ChainReport> {
    let mut report = ChainReport::default();
    chain.handle(user, &mut report)?;
    Ok(report)
}

pub fn registration_chain() -> Box<dyn Handler> {
    ChainBuilder::new()
        .check(Check::Email)
        .check(Check::Phone)
        .check(Check::Login)
        .finish()
}

pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    let chain = registration_chain();
    let mut user = User::default();

    for run in 1..=2 {
        writeln!(out, "Run {run}:")?;
        let report = execute(chain.as_ref(), &mut user)?;
        for step in &report.steps {
            writeln!(out, "  {step}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Chain without a terminal:")?;
    if let Some(open) = ChainBuilder::new().check(Check::Login).finish_open() {
        if let Err(err) = execute(open.as_ref(), &mut User::default()) {
            warn!(%err, "chain execution failed");
            writeln!(out, "  {err}")?;
        }
    }
    Ok(())
}
