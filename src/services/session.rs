use crate::models::user::{Session, SessionUser, UserRole};

/// Source of the current user for the booking flow.
pub trait SessionProvider {
    fn current_session(&self) -> Session;
}

impl SessionProvider for Session {
    fn current_session(&self) -> Session {
        self.clone()
    }
}

/// Sign-in without identity verification. Any email and password are accepted.
pub struct MockAuthenticator;

impl MockAuthenticator {
    pub fn sign_in(email: &str, _password: &str, role: UserRole) -> SessionUser {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or_default();

        SessionUser {
            name: if name.is_empty() { email.to_string() } else { name.to_string() },
            email: email.to_string(),
            role,
        }
    }
}
