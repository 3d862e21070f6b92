// App module for the terminal dashboard
// Holds the dashboard state and turns input into actions

pub mod input;
pub mod state;

pub use input::{handle_key, handle_mouse, Action};
pub use state::{App, FetchEvent};
