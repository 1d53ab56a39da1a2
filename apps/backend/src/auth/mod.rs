pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{Claims, TokenContext};
pub use jwt::{mint_access_token, mint_reset_token, verify_token};
