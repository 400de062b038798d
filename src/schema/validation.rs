use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, ListUsersQuery, UpdateUserRequest};
use email_address::EmailAddress;

pub const NAME_MAX_LENGTH: usize = 100;
/// Fits the relational `email` column on every backend
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const AGE_MIN: i32 = 0;
pub const AGE_MAX: i32 = 150;

/// Validates a user name: non-blank and at most 100 characters
pub fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "name must be at most {} characters",
            NAME_MAX_LENGTH
        )));
    }

    Ok(())
}

/// Check if an email address is well formed
///
/// Besides RFC 5322 syntax the domain must contain a dot, so bare hosts
/// such as `user@localhost` are rejected. At most 254 characters.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return false;
    }

    match email.parse::<EmailAddress>() {
        Ok(address) => address.domain().contains('.') && !address.domain().ends_with('.'),
        Err(_) => false,
    }
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation("email must be a valid email address".to_string()))
    }
}

pub fn validate_age(age: i32) -> AppResult<()> {
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(AppError::Validation(format!(
            "age must be between {} and {}",
            AGE_MIN, AGE_MAX
        )));
    }
    Ok(())
}

/// Validates a create payload
pub fn validate_create_user(input: &CreateUserRequest) -> AppResult<()> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    if let Some(age) = input.age {
        validate_age(age)?;
    }
    Ok(())
}

/// Validates the fields present in an update payload
pub fn validate_update_user(patch: &UpdateUserRequest) -> AppResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(age) = patch.age {
        validate_age(age)?;
    }
    Ok(())
}

/// Resolve effective `(limit, skip)` from the query and configured defaults
pub fn resolve_pagination(
    query: &ListUsersQuery,
    pagination: &PaginationConfig,
) -> AppResult<(i64, i64)> {
    let limit = query.limit.unwrap_or(pagination.default_limit);
    let skip = query.skip.unwrap_or(0);

    if limit < 1 || limit > pagination.max_limit {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            pagination.max_limit
        )));
    }

    if skip < 0 {
        return Err(AppError::Validation(
            "skip must be greater than or equal to 0".to_string(),
        ));
    }

    Ok((limit, skip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ada").is_ok());
        assert!(validate_name(&"a".repeat(100)).is_ok());
        // length counts characters, not bytes
        assert!(validate_name(&"é".repeat(100)).is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_email_length_limit() {
        let domain = format!("{}.{}.{}.com", "b".repeat(61), "c".repeat(61), "d".repeat(61));

        // 64 + 1 + 189 = 254
        let at_limit = format!("{}@{}", "a".repeat(64), domain);
        assert_eq!(at_limit.chars().count(), EMAIL_MAX_LENGTH);
        assert!(validate_email(&at_limit).is_ok());

        let over_limit = format!("{}@{}.{}", "a".repeat(64), "e".repeat(60), domain);
        assert!(over_limit.chars().count() > EMAIL_MAX_LENGTH);
        assert!(matches!(
            validate_email(&over_limit),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(0).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(-1).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn test_validate_update_only_checks_present_fields() {
        assert!(validate_update_user(&UpdateUserRequest::default()).is_ok());

        let bad_email = UpdateUserRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_update_user(&bad_email),
            Err(AppError::Validation(_))
        ));

        let blank_name = UpdateUserRequest {
            name: Some("".to_string()),
            ..Default::default()
        };
        assert!(validate_update_user(&blank_name).is_err());
    }

    #[test]
    fn test_resolve_pagination() {
        let config = PaginationConfig::default();

        let (limit, skip) = resolve_pagination(&ListUsersQuery::default(), &config).unwrap();
        assert_eq!(limit, config.default_limit);
        assert_eq!(skip, 0);

        let query = ListUsersQuery {
            limit: Some(2),
            skip: Some(4),
        };
        assert_eq!(resolve_pagination(&query, &config).unwrap(), (2, 4));

        for (limit, skip) in [(Some(0), None), (Some(1001), None), (None, Some(-1))] {
            let query = ListUsersQuery { limit, skip };
            assert!(resolve_pagination(&query, &config).is_err());
        }
    }
}
