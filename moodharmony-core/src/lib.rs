pub mod config;
pub mod error;
pub mod recommendation;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use error::*;
pub use recommendation::*;
pub use text::*;
pub use types::*;
