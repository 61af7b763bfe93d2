//! API request handlers.

mod data;
mod export;
mod health;
mod session;
mod upload;
mod validate;

pub use data::*;
pub use export::*;
pub use health::*;
pub use session::*;
pub use upload::*;
pub use validate::*;
