pub mod api_key;

pub use api_key::{require_api_key, verify_api_key, API_KEY_HEADER};
