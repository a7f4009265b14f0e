use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    /// "client" or "worker"; admin accounts are never self-registered.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,

    pub skills: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserProfileDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub bio: Option<String>,
    pub skills: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RequestQueryDto {
    pub page: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct WorkerQueryDto {
    pub skill: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub role: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_approved: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            role: user.role.to_str().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            skills: user.skills.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub role: String,
}

/// Worker contact details revealed to a client after a hire.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponseDto {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_valid_email_and_password() {
        let dto = RegisterUserDto {
            name: "Asha".to_string(),
            email: "not-an-email".to_string(),
            password: "secret99".to_string(),
            role: "worker".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = RegisterUserDto {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "short".to_string(),
            role: "worker".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = RegisterUserDto {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret99".to_string(),
            role: "worker".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn filter_user_omits_password() {
        let value = serde_json::to_value(FilterUserDto {
            id: "id".into(),
            role: "client".into(),
            name: "n".into(),
            email: "e@example.com".into(),
            phone: None,
            skills: None,
            bio: None,
            location: None,
            is_approved: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();

        assert!(value.get("password").is_none());
    }
}
