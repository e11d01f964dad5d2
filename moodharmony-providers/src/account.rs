use crate::join_url;
use crate::request::HttpRequest;
use moodharmony_core::types::Credentials;
use serde_json::json;

pub const REGISTER_PATH: &str = "/api/register";
pub const LOGIN_PATH: &str = "/api/login";

pub fn build_register_request(base_url: &str, creds: &Credentials) -> HttpRequest {
    build_credentials_request(base_url, REGISTER_PATH, creds)
}

pub fn build_login_request(base_url: &str, creds: &Credentials) -> HttpRequest {
    build_credentials_request(base_url, LOGIN_PATH, creds)
}

fn build_credentials_request(base_url: &str, path: &str, creds: &Credentials) -> HttpRequest {
    let payload = json!({
        "email": creds.email,
        "password": creds.password,
    });
    HttpRequest::post_json(join_url(base_url, path), &payload)
}
