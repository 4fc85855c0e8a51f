pub mod login;
pub mod result;
