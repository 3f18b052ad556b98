pub mod cors;
pub mod errors;
pub mod json;
pub mod text;

pub use errors::{error_to_response, ResultResp};
pub use json::json_ok;
pub use text::{empty_response, text_response};
