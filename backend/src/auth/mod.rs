//! Authentication module
//!
//! Provides signed bearer-token sessions with argon2 password hashing.
//! Tokens are self-contained: validity depends only on the signature and
//! the embedded expiry, never on server-side session state.

mod cookie;
mod middleware;
mod password;
mod reset;
mod token;

pub use cookie::{build_clear_cookie, build_session_cookie, session_cookie_value, SESSION_COOKIE};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use reset::generate_reset_token;
pub use token::{Claims, TokenError, TokenService};
