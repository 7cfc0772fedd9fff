//! Ownership trait for user-owned resources.
//!
//! The `OwnedByUser` trait is the authorization primitive for single-owner
//! aggregates: a policy check compares the requesting user against the
//! resource owner and returns `Forbidden` on mismatch. Admins bypass
//! ownership via [`check_ownership_or_admin`](OwnedByUser::check_ownership_or_admin).

use super::{DomainError, ErrorCode, Role, UserId};

/// Trait for aggregates that have a single owner.
///
/// Implementors return the `UserId` of the owning user; the trait provides
/// the ownership checks used by command handlers.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning an error if the user is not the owner.
    ///
    /// This is the preferred method to use in command handlers as it
    /// returns a properly formed `DomainError` with `Forbidden` code.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }

    /// Like [`check_ownership`](OwnedByUser::check_ownership), but admins pass
    /// regardless of ownership.
    fn check_ownership_or_admin(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        if role == Role::Admin {
            return Ok(());
        }
        self.check_ownership(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedByUser for TestResource {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    fn user() -> UserId {
        UserId::from_uuid(Uuid::new_v4())
    }

    #[test]
    fn is_owner_returns_true_for_owner() {
        let owner = user();
        let resource = TestResource { owner };
        assert!(resource.is_owner(&owner));
    }

    #[test]
    fn is_owner_returns_false_for_non_owner() {
        let resource = TestResource { owner: user() };
        assert!(!resource.is_owner(&user()));
    }

    #[test]
    fn check_ownership_succeeds_for_owner() {
        let owner = user();
        let resource = TestResource { owner };
        assert!(resource.check_ownership(&owner).is_ok());
    }

    #[test]
    fn check_ownership_fails_for_non_owner() {
        let owner = user();
        let other = user();
        let resource = TestResource { owner };

        let err = resource.check_ownership(&other).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("owner_id"), Some(&owner.to_string()));
        assert_eq!(err.details.get("requested_by"), Some(&other.to_string()));
    }

    #[test]
    fn admin_bypasses_ownership_check() {
        let resource = TestResource { owner: user() };
        let other = user();

        assert!(resource.check_ownership_or_admin(&other, Role::Admin).is_ok());
        assert!(resource
            .check_ownership_or_admin(&other, Role::Student)
            .is_err());
    }
}
