pub mod card;
pub mod cli;
pub mod config;
pub mod game;
pub mod rng;
pub mod simulation;

#[cfg(test)]
mod integration_tests;
