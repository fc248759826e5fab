pub mod token;

pub use token::get_auth_token;
