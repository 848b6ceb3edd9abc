//! egui front end of the inbox.
//!
//! Panels only read engine state and report user intent back to the
//! caller (a submitted message, a clicked conversation, "check again");
//! the app decides what to do with it.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
