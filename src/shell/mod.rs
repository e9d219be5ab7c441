// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the store, session, notice and navigation adapters.
// - Hand out views and handlers wired against them.

pub mod config;
pub mod presenters;
pub mod state;
