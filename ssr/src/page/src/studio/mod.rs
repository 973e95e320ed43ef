pub mod client;
mod key_dialog;
mod loading_screen;
mod page;
mod prompt_form;
mod result_screen;
pub mod screen;
pub mod server;

pub use page::{StudioPage, StudioPanel};
