//! Builder: a director drives interchangeable builders through the same
//! ordered steps, and each builder decides the values.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{PatternError, Result};

/// Immutable snapshot produced by a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    pub door_type: String,
    pub roof_type: String,
    pub wall_count: u32,
}

/// Construction steps every builder exposes.
pub trait HouseBuilder {
    fn material(&self) -> &'static str;
    fn set_wall_count(&mut self);
    fn set_roof_type(&mut self);
    fn set_door_type(&mut self);
    fn build(&self) -> House;
}

#[derive(Debug, Default)]
pub struct WoodenBuilder {
    door_type: String,
    roof_type: String,
    wall_count: u32,
}

impl HouseBuilder for WoodenBuilder {
    fn material(&self) -> &'static str {
        "wooden"
    }

    fn set_wall_count(&mut self) {
        self.wall_count = 4;
    }

    fn set_roof_type(&mut self) {
        self.roof_type = "Wooden roof".to_string();
    }

    fn set_door_type(&mut self) {
        self.door_type = "Wooden door".to_string();
    }

    fn build(&self) -> House {
        House {
            door_type: self.door_type.clone(),
            roof_type: self.roof_type.clone(),
            wall_count: self.wall_count,
        }
    }
}

#[derive(Debug, Default)]
pub struct BrickBuilder {
    door_type: String,
    roof_type: String,
    wall_count: u32,
}

impl HouseBuilder for BrickBuilder {
    fn material(&self) -> &'static str {
        "brick"
    }

    fn set_wall_count(&mut self) {
        self.wall_count = 6;
    }

    fn set_roof_type(&mut self) {
        self.roof_type = "Brick roof".to_string();
    }

    fn set_door_type(&mut self) {
        self.door_type = "Brick door".to_string();
    }

    fn build(&self) -> House {
        House {
            door_type: self.door_type.clone(),
            roof_type: self.roof_type.clone(),
            wall_count: self.wall_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderKind {
    Wooden,
    Brick,
}

impl BuilderKind {
    pub fn builder(self) -> Box<dyn HouseBuilder> {
        match self {
            BuilderKind::Wooden => Box::new(WoodenBuilder::default()),
            BuilderKind::Brick => Box::new(BrickBuilder::default()),
        }
    }
}

impl FromStr for BuilderKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "wooden" => Ok(BuilderKind::Wooden),
            "b" | "brick" => Ok(BuilderKind::Brick),
            _ => Err(PatternError::invalid_selector("builder", s)),
        }
    }
}

impl fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderKind::Wooden => write!(f, "wooden"),
            BuilderKind::Brick => write!(f, "brick"),
        }
    }
}

/// Resolve a selector string to a fresh builder.
pub fn builder_for(selector: &str) -> Result<Box<dyn HouseBuilder>> {
    selector.parse::<BuilderKind>().map(BuilderKind::builder)
}

pub struct Director {
    builder: Box<dyn HouseBuilder>,
}

impl Director {
    pub fn new(builder: Box<dyn HouseBuilder>) -> Self {
        Self { builder }
    }

    pub fn set_builder(&mut self, builder: Box<dyn HouseBuilder>) {
        self.builder = builder;
    }

    /// Runs the steps in the fixed order: walls, roof, door.
    pub fn build_house(&mut self) -> House {
        debug!(material = self.builder.material(), "building house");
        self.builder.set_wall_count();
        self.builder.set_roof_type();
        self.builder.set_door_type();
        self.builder.build()
    }
}

fn print_house<W: Write>(out: &mut W, label: &str, house: &House) -> Result<()> {
    writeln!(out, "{label} house door type: {}", house.door_type)?;
    writeln!(out, "{label} house roof type: {}", house.roof_type)?;
    writeln!(out, "{label} house wall amount: {}", house.wall_count)?;
    Ok(())
}

pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    let mut director = Director::new(builder_for("W")?);
    let wooden = director.build_house();
    print_house(out, "Wooden", &wooden)?;

    director.set_builder(builder_for("B")?);
    let brick = director.build_house();
    writeln!(out)?;
    print_house(out, "Brick", &brick)?;

    writeln!(out)?;
    match builder_for("steel") {
        Ok(_) => {}
        Err(err) => {
            warn!(%err, "builder lookup failed");
            writeln!(out, "Builder lookup failed: {err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wooden_house_values() {
        let mut director = Director::new(BuilderKind::Wooden.builder());
        let house = director.build_house();
        assert_eq!(house.door_type, "Wooden door");
        assert_eq!(house.roof_type, "Wooden roof");
        assert_eq!(house.wall_count, 4);
    }

    #[test]
    fn test_brick_house_values() {
        let mut director = Director::new(BuilderKind::Brick.builder());
        let house = director.build_house();
        assert_eq!(house.door_type, "Brick door");
        assert_eq!(house.roof_type, "Brick roof");
        assert_eq!(house.wall_count, 6);
    }

    #[test]
    fn test_swapping_builder_keeps_earlier_house() {
        let mut director = Director::new(builder_for("W").unwrap());
        let wooden = director.build_house();
        director.set_builder(builder_for("B").unwrap());
        let brick = director.build_house();

        assert_ne!(wooden, brick);
        assert_eq!(wooden.wall_count, 4);
        assert_eq!(brick.wall_count, 6);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("W".parse::<BuilderKind>().unwrap(), BuilderKind::Wooden);
        assert_eq!("brick".parse::<BuilderKind>().unwrap(), BuilderKind::Brick);
        assert!(matches!(
            "steel".parse::<BuilderKind>(),
            Err(PatternError::InvalidSelector { kind: "builder", .. })
        ));
    }

    #[test]
    fn test_demo_transcript() {
        let mut out = Vec::new();
        demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Wooden house wall amount: 4"));
        assert!(text.contains("Brick house door type: Brick door"));
        assert!(text.contains("unsupported builder type: 'steel'"));
    }
}
