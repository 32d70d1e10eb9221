//! Small helpers shared by the loader, commands and server

mod url;

pub use url::*;
