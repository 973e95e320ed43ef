pub mod catalog;
pub mod generation;
#[cfg(feature = "ssr")]
pub mod server;
pub mod videogen;
