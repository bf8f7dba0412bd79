//! Login stub. Every email/password pair is accepted and the role is guessed from the
//! email text. Placeholder only: there is no credential check here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Role, User};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
}

/// `admin` anywhere in the email wins, then `recruteur`, else candidate.
pub fn derive_role(email: &str) -> Role {
    if email.contains("admin") {
        Role::Admin
    } else if email.contains("recruteur") {
        Role::Recruiter
    } else {
        Role::Candidate
    }
}

pub fn login(request: &LoginRequest) -> Session {
    let name = request
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    Session {
        user: User {
            id: format!("u_{}", Uuid::new_v4()),
            name,
            email: request.email.clone(),
            role: derive_role(&request.email),
        },
    }
}
