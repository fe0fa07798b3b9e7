pub mod controller;
pub mod error;
pub mod outcome;
pub mod page;
pub mod runner;
pub mod settings;
