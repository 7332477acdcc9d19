pub mod availability;
pub mod config;
pub mod summary;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use availability::*;
pub use config::*;
pub use summary::*;
pub use text::*;
pub use types::*;
