pub mod config;
pub mod date_key;
pub mod record;
pub mod session;

pub use config::*;
pub use date_key::*;
pub use record::*;
pub use session::*;
