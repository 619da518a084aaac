use std::fmt;
use std::io::Write;
use std::str::FromStr;

use colored::Colorize;
use serde::Deserialize;
use tracing::info;

use crate::config::CatalogConfig;
use crate::error::{PatternError, Result};
use crate::patterns::{builder, chain, command, factory, state, strategy, visitor};

/// The closed set of demos shipped with the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    Builder,
    #[serde(alias = "chain-of-responsibility")]
    Chain,
    Command,
    #[serde(alias = "factory-method")]
    Factory,
    State,
    Strategy,
    Visitor,
}

impl DemoKind {
    pub const ALL: [DemoKind; 7] = [
        DemoKind::Builder,
        DemoKind::Chain,
        DemoKind::Command,
        DemoKind::Factory,
        DemoKind::State,
        DemoKind::Strategy,
        DemoKind::Visitor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Builder => "builder",
            DemoKind::Chain => "chain",
            DemoKind::Command => "command",
            DemoKind::Factory => "factory",
            DemoKind::State => "state",
            DemoKind::Strategy => "strategy",
            DemoKind::Visitor => "visitor",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Builder => "Builder",
            DemoKind::Chain => "Chain of Responsibility",
            DemoKind::Command => "Command",
            DemoKind::Factory => "Factory Method",
            DemoKind::State => "State",
            DemoKind::Strategy => "Strategy",
            DemoKind::Visitor => "Visitor",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            DemoKind::Builder => "a director builds wooden and brick houses with swappable builders",
            DemoKind::Chain => "registration checks forward a user record down a chain",
            DemoKind::Command => "a toggle button switches a TV with on/off commands",
            DemoKind::Factory => "a factory turns a model key into a car",
            DemoKind::State => "dad cycles between watching TV and sleeping",
            DemoKind::Strategy => "a bounded cache evicts with FIFO, LRU or LFU policies",
            DemoKind::Visitor => "area and perimeter visitors walk a set of shapes",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builder" => Ok(DemoKind::Builder),
            "chain" | "chain-of-responsibility" => Ok(DemoKind::Chain),
            "command" => Ok(DemoKind::Command),
            "factory" | "factory-method" => Ok(DemoKind::Factory),
            "state" => Ok(DemoKind::State),
            "strategy" => Ok(DemoKind::Strategy),
            "visitor" => Ok(DemoKind::Visitor),
            _ => Err(PatternError::UnknownDemo(s.to_string())),
        }
    }
}

/// Runs one demo, writing its transcript to `out`.
pub fn run_demo<W: Write>(kind: DemoKind, config: &CatalogConfig, out: &mut W) -> Result<()> {
    info!(demo = kind.name(), "running demo");
    match kind {
        DemoKind::Builder => builder::demo(out),
        DemoKind::Chain => chain::demo(out),
        DemoKind::Command => command::demo(out, config.command.presses),
        DemoKind::Factory => factory::demo(out),
        DemoKind::State => state::demo(out),
        DemoKind::Strategy => {
            strategy::demo(out, config.cache.initial_policy, config.cache.max_capacity)
        }
        DemoKind::Visitor => visitor::demo(out),
    }
}

/// Runs every demo listed in the config, each under a heading.
pub fn run_all<W: Write>(config: &CatalogConfig, out: &mut W) -> Result<()> {
    for (index, kind) in config.demos.iter().copied().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_heading(out, kind)?;
        run_demo(kind, config, out)?;
    }
    Ok(())
}

pub fn write_heading<W: Write>(out: &mut W, kind: DemoKind) -> Result<()> {
    let heading = format!("== {} ==", kind.title());
    writeln!(out, "{}", heading.bold().cyan())?;
    Ok(())
}

pub fn write_listing<W: Write>(out: &mut W) -> Result<()> {
    for kind in DemoKind::ALL {
        writeln!(out, "{:<10} {}", kind.name().green(), kind.summary())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.name().parse::<DemoKind>().unwrap(), kind);
        }
        assert_eq!(
            "Chain-of-Responsibility".parse::<DemoKind>().unwrap(),
            DemoKind::Chain
        );
    }

    #[test]
    fn test_unknown_demo() {
        assert!(matches!(
            "singleton".parse::<DemoKind>(),
            Err(PatternError::UnknownDemo(name)) if name == "singleton"
        ));
    }

    #[test]
    fn test_run_all_respects_config_order() {
        colored::control::set_override(false);
        let config = CatalogConfig {
            demos: vec![DemoKind::Visitor, DemoKind::Factory],
            ..CatalogConfig::default()
        };
        let mut out = Vec::new();
        run_all(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let visitor = text.find("== Visitor ==").unwrap();
        let factory = text.find("== Factory Method ==").unwrap();
        assert!(visitor < factory);
        assert!(!text.contains("== Builder =="));
    }
}
