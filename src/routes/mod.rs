//! HTML route handlers

pub mod admin;
pub mod bookings;
pub mod dashboard;
pub mod home;
pub mod rooms;

use crate::auth::{CurrentUser, MaybeUser};

/// Page chrome context shared by every template
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub user_email: Option<String>,
    pub is_admin: bool,
}

impl Nav {
    pub fn for_user(user: &MaybeUser) -> Self {
        match &user.0 {
            Some(user) => Self::signed_in(user),
            None => Self::default(),
        }
    }

    pub fn signed_in(user: &CurrentUser) -> Self {
        Self {
            user_email: Some(user.email.clone()),
            is_admin: user.is_admin,
        }
    }

    pub fn guest() -> Self {
        Self::default()
    }
}
