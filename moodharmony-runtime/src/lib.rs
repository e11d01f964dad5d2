pub mod config_store;
pub mod fs_util;
pub mod history;
pub mod http;
pub mod identity_store;
pub mod service;
