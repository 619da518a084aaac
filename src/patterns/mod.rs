pub mod builder;
pub mod chain;
pub mod command;
pub mod factory;
pub mod state;
pub mod strategy;
pub mod visitor;
