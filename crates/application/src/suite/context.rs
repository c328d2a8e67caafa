//! State carried from one step to the next.

use gorest_check_domain::UserId;
use serde_json::Value;

/// The user the create step made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    /// Id used to build `<base>/{id}` URLs.
    pub id: UserId,
    /// `id` exactly as the create response returned it. Later reads of the
    /// same user are compared against this value.
    pub raw_id: Value,
}

impl CreatedUser {
    /// A user whose id came back as a plain JSON number.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            raw_id: id.to_json(),
        }
    }

    /// Reads the `id` field of a create response. `None` when the value is not
    /// a non-negative integer or a string holding one.
    #[must_use]
    pub fn from_json(raw_id: Value) -> Option<Self> {
        UserId::from_json(&raw_id).map(|id| Self { id, raw_id })
    }
}

/// Fixture state for one run. Owned by the caller and passed to each step
/// by `&mut`, so only one step can touch it at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteContext {
    created_user: Option<CreatedUser>,
}

impl SuiteContext {
    /// Empty context: nothing has been created yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { created_user: None }
    }

    /// The user created by this run, if the create step succeeded.
    #[must_use]
    pub const fn created_user(&self) -> Option<&CreatedUser> {
        self.created_user.as_ref()
    }

    /// Id of the user created by this run, if the create step succeeded.
    #[must_use]
    pub fn created_user_id(&self) -> Option<UserId> {
        self.created_user.as_ref().map(|user| user.id)
    }

    /// Records the user returned by the create step.
    pub fn record_created_user(&mut self, user: CreatedUser) {
        self.created_user = Some(user);
    }
}
