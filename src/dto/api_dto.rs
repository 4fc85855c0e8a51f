use crate::models::score::{QueryKind, ResultRecord};
use crate::models::user::LoginId;
use crate::utils::validation::validate_username;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "A username is required."),
        custom(function = "validate_username")
    )]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub login_id: LoginId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub login_id: LoginId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub login_id: LoginId,
    pub kind: QueryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub result: Vec<ResultRecord>,
}
