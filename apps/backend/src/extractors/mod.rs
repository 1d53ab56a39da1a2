pub mod identity;
pub mod request_parse;

pub use identity::Identity;
pub use request_parse::{parse_json, parse_path_id, parse_query};
