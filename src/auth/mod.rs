mod account;
mod log_in;
mod password;
mod profile;
mod register_user;
mod session;
mod token;
mod user;

pub use log_in::log_in;
pub use password::{PasswordHash, ValidatedPassword};
pub use profile::{get_me, update_profile};
pub use register_user::register_user;
pub use session::{AuthState, Session};
pub use token::DEFAULT_TOKEN_DURATION;
pub use user::{User, UserID, create_user, create_user_table, get_user_by_id};
