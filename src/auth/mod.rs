//! Identity & access: stateless JWT issuance/verification and route guards.

mod extract;
mod token;

pub use extract::{AdminUser, CurrentUser};
pub use token::{Claims, TokenManager};
