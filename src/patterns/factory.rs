//! Factory Method: a single lookup turns a model key into a car.

use std::io::Write;
use std::str::FromStr;

use tracing::warn;

use crate::error::{PatternError, Result};

pub trait Car {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn engine_power(&self) -> u32;
    fn set_engine_power(&mut self, engine_power: u32);
}

/// Shared state embedded by every model.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Specs {
    name: String,
    engine_power: u32,
}

macro_rules! car_model {
    ($model:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $model {
            specs: Specs,
        }

        impl Car for $model {
            fn name(&self) -> &str {
                &self.specs.name
            }

            fn set_name(&mut self, name: String) {
                self.specs.name = name;
            }

            fn engine_power(&self) -> u32 {
                self.specs.engine_power
            }

            fn set_engine_power(&mut self, engine_power: u32) {
                self.specs.engine_power = engine_power;
            }
        }
    };
}

car_model!(Mercedes);
car_model!(Audi);

impl Mercedes {
    pub fn new() -> Self {
        Self {
            specs: Specs {
                name: "Mercedes E500".to_string(),
                engine_power: 500,
            },
        }
    }
}

impl Default for Mercedes {
    fn default() -> Self {
        Self::new()
    }
}

impl Audi {
    pub fn new() -> Self {
        Self {
            specs: Specs {
                name: "Audi Q8".to_string(),
                engine_power: 450,
            },
        }
    }
}

impl Default for Audi {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarKind {
    Mercedes,
    Audi,
}

impl CarKind {
    pub fn build(self) -> Box<dyn Car> {
        match self {
            CarKind::Mercedes => Box::new(Mercedes::new()),
            CarKind::Audi => Box::new(Audi::new()),
        }
    }
}

impl FromStr for CarKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mercedes" => Ok(CarKind::Mercedes),
            "audi" => Ok(CarKind::Audi),
            other => Err(PatternError::invalid_selector("car", other)),
        }
    }
}

/// The factory: unknown keys come back as [`PatternError::InvalidSelector`].
pub fn get_car(car_type: &str) -> Result<Box<dyn Car>> {
    car_type.parse::<CarKind>().map(CarKind::build)
}

pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    for key in ["mercedes", "audi", "bmw"] {
        match get_car(key) {
            Ok(car) => writeln!(
                out,
                "My car name: {}, my car engine power: {}",
                car.name(),
                car.engine_power()
            )?,
            Err(err) => {
                warn!(%err, key, "car factory rejected key");
                writeln!(out, "Cannot build '{key}': {err}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models() {
        let mercedes = get_car("mercedes").unwrap();
        assert_eq!(mercedes.name(), "Mercedes E500");
        assert_eq!(mercedes.engine_power(), 500);

        let audi = get_car("audi").unwrap();
        assert_eq!(audi.name(), "Audi Q8");
        assert_eq!(audi.engine_power(), 450);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let err = get_car("bmw").err().unwrap();
        assert!(matches!(
            err,
            PatternError::InvalidSelector { kind: "car", ref selector } if selector == "bmw"
        ));
    }

    #[test]
    fn test_products_are_mutable_after_creation() {
        let mut car = get_car("audi").unwrap();
        car.set_name("Audi RS Q8".to_string());
        car.set_engine_power(600);
        assert_eq!(car.name(), "Audi RS Q8");
        assert_eq!(car.engine_power(), 600);

        // A fresh lookup is unaffected.
        assert_eq!(get_car("audi").unwrap().engine_power(), 450);
    }

    #[test]
    fn test_demo_reports_error_and_continues() {
        let mut out = Vec::new();
        demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "My car name: Mercedes E500, my car engine power: 500");
        assert_eq!(lines[2], "Cannot build 'bmw': unsupported car type: 'bmw'");
    }
}
