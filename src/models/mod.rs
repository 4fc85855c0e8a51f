pub mod answer;
pub mod question;
pub mod score;
pub mod user;
