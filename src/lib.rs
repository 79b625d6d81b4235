pub mod advice;
pub mod cards;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ranges;
