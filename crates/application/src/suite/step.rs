//! The six suite steps.

use std::fmt;

/// One check of the suite, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteStep {
    /// `GET <base>`, expects 200.
    ListUsers,
    /// `POST <base>`, expects 201 and an `id`.
    CreateUser,
    /// `GET <base>/{id}`, expects 200 and the same `id`.
    GetUser,
    /// `PUT <base>/{id}`, expects 200.
    UpdateUser,
    /// `DELETE <base>/{id}`, expects 204.
    DeleteUser,
    /// `GET <base>/9999999`, expects a 404 error response.
    GetMissingUser,
}

impl SuiteStep {
    /// All steps in the order they must run.
    pub const ALL: [Self; 6] = [
        Self::ListUsers,
        Self::CreateUser,
        Self::GetUser,
        Self::UpdateUser,
        Self::DeleteUser,
        Self::GetMissingUser,
    ];

    /// Title used in reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ListUsers => "List user details",
            Self::CreateUser => "Create a new user",
            Self::GetUser => "Get user details",
            Self::UpdateUser => "Update user details",
            Self::DeleteUser => "Delete user",
            Self::GetMissingUser => "Get non-existing user",
        }
    }

    /// Whether the step targets the user made by [`SuiteStep::CreateUser`].
    #[must_use]
    pub const fn requires_created_user(self) -> bool {
        matches!(self, Self::GetUser | Self::UpdateUser | Self::DeleteUser)
    }

    /// Negative steps pass only on an error response.
    #[must_use]
    pub const fn expects_error_response(self) -> bool {
        matches!(self, Self::GetMissingUser)
    }
}

impl fmt::Display for SuiteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_precedes_dependents() {
        let position = |step| SuiteStep::ALL.iter().position(|s| *s == step);
        let create = position(SuiteStep::CreateUser);
        for step in SuiteStep::ALL.into_iter().filter(|s| s.requires_created_user()) {
            assert!(position(step) > create, "{step} runs before create");
        }
    }

    #[test]
    fn test_only_missing_user_is_negative() {
        let negative: Vec<_> = SuiteStep::ALL
            .into_iter()
            .filter(|s| s.expects_error_response())
            .collect();
        assert_eq!(negative, vec![SuiteStep::GetMissingUser]);
        assert_eq!(SuiteStep::ALL.last(), Some(&SuiteStep::GetMissingUser));
    }
}
