//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives
//! what it needs from the [`Commander`](crate::commands::Commander), processes
//! the command and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Available Handlers
//!
//! - [`handle_help`] - Display help information
//! - [`handle_ai`] - Complete a prompt with the completion API
//! - [`handle_turtle`] - Draw a turtle avatar
//! - [`handle_tanks`] - Join the channel game and render the board

mod ai;
mod help;
mod tanks;
mod turtle;

pub use crate::commands::actions::{
    ai::handle_ai, help::handle_help, tanks::handle_tanks, turtle::handle_turtle,
};
