//! Payload validation for registration and profile updates.
//!
//! Both validators are ordered rule tables evaluated top to bottom; only
//! the first violated rule is reported. Clients fix one problem at a
//! time, and the order stays auditable in one place.

use crate::user::errors::ValidationError;
use crate::user::models::EmailAddress;
use crate::user::models::RegisterUserCommand;
use crate::user::models::UpdateProfileCommand;

const EMPTY_FIELD: &str = "may not be empty";
const PASSWORD_MIN_LENGTH: usize = 5;

// First-failure rules for a password, in evaluation order. The message
// spelling is part of the API contract.
const PASSWORD_RULES: &[(fn(&str) -> bool, &str)] = &[
    (has_special_character, "should contain special characters"),
    (has_digit, "should contain numbers"),
    (has_min_length, "length should be greater then 5"),
];

struct FieldRule<'a> {
    field: &'static str,
    value: &'a str,
    syntax: Option<fn(&str) -> bool>,
}

/// Validate a registration payload.
///
/// Fields are checked in declared order (lastName, firstName, email,
/// password); per field, emptiness is checked before syntax. The
/// password policy runs only after every field rule has passed.
pub fn validate_registration(command: &RegisterUserCommand) -> Result<(), ValidationError> {
    let rules = [
        FieldRule {
            field: "lastName",
            value: &command.last_name,
            syntax: None,
        },
        FieldRule {
            field: "firstName",
            value: &command.first_name,
            syntax: None,
        },
        FieldRule {
            field: "email",
            value: &command.email,
            syntax: Some(EmailAddress::is_valid),
        },
        FieldRule {
            field: "password",
            value: &command.password,
            syntax: None,
        },
    ];

    for rule in rules {
        if rule.value.is_empty() {
            return Err(ValidationError {
                field: rule.field,
                reason: EMPTY_FIELD,
            });
        }
        if let Some(is_valid) = rule.syntax {
            if !is_valid(rule.value) {
                return Err(ValidationError {
                    field: rule.field,
                    reason: "invalid",
                });
            }
        }
    }

    validate_password(&command.password)
}

/// Validate a profile-update payload: any supplied field must be
/// non-empty.
pub fn validate_profile_update(command: &UpdateProfileCommand) -> Result<(), ValidationError> {
    let rules = [
        ("lastName", command.last_name.as_deref()),
        ("firstName", command.first_name.as_deref()),
    ];

    for (field, value) in rules {
        if value.is_some_and(str::is_empty) {
            return Err(ValidationError {
                field,
                reason: EMPTY_FIELD,
            });
        }
    }

    Ok(())
}

/// Apply the password policy, reporting the first violated rule.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    for &(satisfies, reason) in PASSWORD_RULES {
        if !satisfies(password) {
            return Err(ValidationError {
                field: "password",
                reason,
            });
        }
    }

    Ok(())
}

fn has_special_character(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_punctuation())
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn has_min_length(password: &str) -> bool {
    password.len() > PASSWORD_MIN_LENGTH
}
