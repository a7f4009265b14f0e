// service/access.rs
//
// The authorization gate: pure predicates over (actor, resource), checked
// before every mutating operation. No storage access, no side effects,
// binary outcome only.

use crate::{
    error::ErrorMessage,
    models::{jobmodel::Job, usermodel::{User, UserRole}},
    service::error::ServiceError,
};

/// Role check: the actor's role must be in the operation's allowed set.
pub fn ensure_role(actor: &User, allowed: &[UserRole]) -> Result<(), ServiceError> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ))
    }
}

/// Ownership check: operations scoped to a job require the job's owning
/// foreign key to equal the actor's id. Carries a distinct message from
/// the role failure.
pub fn ensure_job_owner(actor: &User, job: &Job) -> Result<(), ServiceError> {
    if job.client_id == actor.id {
        Ok(())
    } else {
        Err(ServiceError::NotJobOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            role,
            name: "Test".to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
            password: "hash".to_string(),
            phone: None,
            skills: None,
            bio: None,
            location: None,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn job_owned_by(client_id: Uuid) -> Job {
        Job {
            id: Uuid::new_v4(),
            client_id,
            title: "Fix the sink".to_string(),
            description: "Leaky kitchen sink".to_string(),
            location: None,
            is_open: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_in_allowed_set_passes() {
        let client = user(UserRole::Client);
        assert!(ensure_role(&client, &[UserRole::Client]).is_ok());
        assert!(ensure_role(&client, &[UserRole::Client, UserRole::Admin]).is_ok());
    }

    #[test]
    fn role_outside_allowed_set_is_forbidden() {
        let worker = user(UserRole::Worker);
        let err = ensure_role(&worker, &[UserRole::Client]).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn owner_passes_ownership_check() {
        let client = user(UserRole::Client);
        let job = job_owned_by(client.id);
        assert!(ensure_job_owner(&client, &job).is_ok());
    }

    #[test]
    fn non_owner_gets_distinct_ownership_error() {
        let client = user(UserRole::Client);
        let other = user(UserRole::Client);
        let job = job_owned_by(other.id);

        let err = ensure_job_owner(&client, &job).unwrap_err();
        assert!(matches!(err, ServiceError::NotJobOwner));
        assert_eq!(err.to_string(), "You cannot hire for jobs you did not post");
    }
}
