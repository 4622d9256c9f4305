//! Tests for user identifiers and draft validation.

use super::*;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case("7f1e5a9c-3b52-4c3e-9d7a")]
fn user_id_rejects_non_uuids(#[case] raw: &str) {
    assert_eq!(UserId::parse(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_id_displays_hyphenated_form() {
    let raw = "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44";
    let id = UserId::parse(raw).expect("valid id");
    assert_eq!(id.to_string(), raw);
}

#[rstest]
fn draft_trims_fields() {
    let draft = UserDraft::new("  Ann ", " ann@x.com ").expect("valid draft");
    assert_eq!(draft.name(), "Ann");
    assert_eq!(draft.email(), "ann@x.com");
}

#[rstest]
#[case("ann@x.com")]
#[case("first.last+tag@mail.example.org")]
fn draft_accepts_email_shaped_addresses(#[case] email: &str) {
    assert!(UserDraft::new("Ann", email).is_ok());
}

#[rstest]
#[case("not-an-email")]
#[case("ann@x")]
#[case("ann @x.com")]
#[case("@x.com")]
fn draft_rejects_malformed_email(#[case] email: &str) {
    let problems = UserDraft::new("Ann", email).expect_err("email should be rejected");
    assert_eq!(problems, vec![UserValidationError::InvalidEmail]);
}

#[rstest]
fn draft_accepts_name_at_the_limit() {
    let name = "n".repeat(NAME_MAX);
    assert!(UserDraft::new(name, "ann@x.com").is_ok());
}

#[rstest]
fn draft_reports_every_problem() {
    let problems = UserDraft::new("n".repeat(NAME_MAX + 1), "nope").expect_err("invalid draft");

    assert_eq!(
        problems,
        vec![
            UserValidationError::NameTooLong { max: NAME_MAX },
            UserValidationError::InvalidEmail,
        ]
    );
    assert_eq!(problems[0].field(), "name");
    assert_eq!(problems[1].field(), "email");
}

#[rstest]
fn draft_rejects_blank_name() {
    let problems = UserDraft::new("   ", "ann@x.com").expect_err("blank name");
    assert_eq!(problems, vec![UserValidationError::EmptyName]);
}

#[rstest]
fn draft_accepts_email_at_the_limit() {
    let email = format!("{}@example.com", "a".repeat(EMAIL_MAX - "@example.com".len()));
    assert!(UserDraft::new("Ann", email).is_ok());
}

#[rstest]
fn draft_rejects_overlong_email() {
    let email = format!("{}@example.com", "a".repeat(300));

    let problems = UserDraft::new("Ann", email).expect_err("email too long");

    assert_eq!(problems, vec![UserValidationError::EmailTooLong { max: EMAIL_MAX }]);
    assert_eq!(problems[0].field(), "email");
}

#[rstest]
#[case("A\u{0}B")]
#[case("Ann\u{7}")]
#[case("An\u{1b}n")]
fn draft_rejects_control_characters_in_name(#[case] name: &str) {
    let problems = UserDraft::new(name, "ann@x.com").expect_err("control characters");
    assert_eq!(problems, vec![UserValidationError::NameControlCharacters]);
}

#[rstest]
#[case("an\u{0}n@x.com")]
#[case("ann@x\u{0}.com")]
fn draft_rejects_control_characters_in_email(#[case] email: &str) {
    let problems = UserDraft::new("Ann", email).expect_err("control characters");
    assert_eq!(problems, vec![UserValidationError::InvalidEmail]);
}
