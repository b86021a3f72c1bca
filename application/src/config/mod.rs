pub mod session_defaults;

pub use session_defaults::SessionDefaults;
