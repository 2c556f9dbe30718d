//! Canvas view state.
//!
//! `ViewState` is a plain value: each transition consumes it and returns the
//! next state. `ViewController` holds the current value together with the
//! window and canvas sizes that `reset` needs.

mod controller;
mod state;

pub use controller::ViewController;
pub use state::ViewState;
