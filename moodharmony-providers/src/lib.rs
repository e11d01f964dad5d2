pub mod account;
pub mod parse;
pub mod recommendations;
pub mod request;
pub mod runtime;

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
