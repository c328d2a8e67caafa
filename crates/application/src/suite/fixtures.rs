//! Payloads sent by the suite.

use gorest_check_domain::{Gender, NewUser, UserId, UserStatus, UserUpdate};
use rand::Rng;
use rand::distr::Alphanumeric;

/// An id the service will not have.
pub const MISSING_USER_ID: UserId = UserId(9_999_999);

const EMAIL_SUFFIX_LEN: usize = 8;

/// Data for the create, update and missing-user steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFixtures {
    /// Body of the create step.
    pub new_user: NewUser,
    /// Body of the update step.
    pub update: UserUpdate,
    /// Id requested by the negative step.
    pub missing_user_id: UserId,
}

impl UserFixtures {
    /// Fixtures for one run. The email is pinned when given, otherwise
    /// randomized so reruns against the live service do not collide on the
    /// unique email constraint.
    #[must_use]
    pub fn for_run(email: Option<&str>) -> Self {
        let email = email.map_or_else(Self::unique_email, ToString::to_string);
        Self {
            new_user: NewUser::new("irfan", Gender::Male, email, UserStatus::Active),
            update: UserUpdate::default()
                .name("Irfan")
                .status(UserStatus::Inactive),
            missing_user_id: MISSING_USER_ID,
        }
    }

    /// `irfan.<random>@example.com`
    #[must_use]
    pub fn unique_email() -> String {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(EMAIL_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("irfan.{suffix}@example.com")
    }
}
