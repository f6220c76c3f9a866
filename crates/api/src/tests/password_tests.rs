// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, PasswordPolicy, PasswordPolicyError};

#[test]
fn test_valid_password_passes() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert_eq!(policy.validate("bookworm42", "bookworm42", "reader"), Ok(()));
}

#[test]
fn test_confirmation_is_checked_first() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert_eq!(
        policy.validate("short", "different", "reader"),
        Err(PasswordPolicyError::ConfirmationMismatch)
    );
}

#[test]
fn test_too_short() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert_eq!(
        policy.validate("abc1234", "abc1234", "reader"),
        Err(PasswordPolicyError::TooShort { min_length: 8 })
    );
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert!(policy.validate("ééééééé1", "ééééééé1", "reader").is_ok());
    assert!(policy.validate("éééééé1", "éééééé1", "reader").is_err());
}

#[test]
fn test_requires_letter_and_digit() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert_eq!(
        policy.validate("12345678", "12345678", "reader"),
        Err(PasswordPolicyError::MissingLetter)
    );
    assert_eq!(
        policy.validate("abcdefgh", "abcdefgh", "reader"),
        Err(PasswordPolicyError::MissingDigit)
    );
}

#[test]
fn test_must_not_equal_username() {
    let policy: PasswordPolicy = PasswordPolicy::default();
    assert_eq!(
        policy.validate("Reader2024", "Reader2024", "reader2024"),
        Err(PasswordPolicyError::MatchesUsername)
    );
}

#[test]
fn test_policy_errors_name_the_field() {
    let mismatch: ApiError = PasswordPolicyError::ConfirmationMismatch.into();
    assert_eq!(mismatch.field(), Some("password_confirmation"));

    let short: ApiError = PasswordPolicyError::TooShort { min_length: 8 }.into();
    assert_eq!(short.field(), Some("password"));
}
