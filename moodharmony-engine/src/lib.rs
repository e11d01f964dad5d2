pub mod client;
pub mod controller;
pub mod identity;
pub mod session;
pub mod state;
pub mod traits;
