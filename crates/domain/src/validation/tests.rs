use proptest::prelude::*;

use crate::{FieldSchema, FormSchema, FormValues, RuleCheck, ValidationResult, validate};

use super::is_valid_email;

fn sample_schema() -> FormSchema {
    let build = || -> folio_core::AppResult<FormSchema> {
        FormSchema::new(
            "sample",
            vec![
                FieldSchema::new("code")?
                    .rule(RuleCheck::MinChars(3), "code too short")?
                    .rule(RuleCheck::MaxChars(6), "code too long")?,
                FieldSchema::new("email")?
                    .trimmed()
                    .rule(RuleCheck::MinChars(1), "email required")?
                    .rule(RuleCheck::Email, "email invalid")?,
            ],
        )
    };

    build().unwrap_or_else(|error| panic!("invalid sample schema: {error}"))
}

fn values(schema: &FormSchema, code: &str, email: &str) -> FormValues {
    let mut values = FormValues::empty(schema);
    for (field, value) in [("code", code), ("email", email)] {
        values
            .set(field, value)
            .unwrap_or_else(|error| panic!("{error}"));
    }
    values
}

fn expected_code_error(code: &str) -> Option<&'static str> {
    let length = code.chars().count();
    if length < 3 {
        Some("code too short")
    } else if length > 6 {
        Some("code too long")
    } else {
        None
    }
}

fn expected_email_error(email: &str) -> Option<&'static str> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        Some("email required")
    } else if !is_valid_email(trimmed) {
        Some("email invalid")
    } else {
        None
    }
}

#[test]
fn accepts_conventional_addresses() {
    for address in [
        "jo@x.com",
        "first.last@example.co.uk",
        "o'neil+tag@mail-server.io",
        "a_b-c@sub.domain.dev",
    ] {
        assert!(is_valid_email(address), "{address} should be valid");
    }
}

#[test]
fn rejects_malformed_addresses() {
    for address in [
        "bad",
        "@x.com",
        "jo@",
        "jo@x",
        "jo@x.c",
        ".jo@x.com",
        "jo.@x.com",
        "j..o@x.com",
        "jo@-x.com",
        "jo@x..com",
        "jo@x.c0m",
        "jo@@x.com",
        "jo smith@x.com",
        " jo@x.com",
    ] {
        assert!(!is_valid_email(address), "{address} should be invalid");
    }
}

#[test]
fn missing_value_is_checked_as_empty() {
    let schema = sample_schema();
    let other = FormSchema::new(
        "other",
        vec![FieldSchema::new("unrelated").unwrap_or_else(|error| panic!("{error}"))],
    )
    .unwrap_or_else(|error| panic!("{error}"));

    let ValidationResult::Invalid(errors) = validate(&schema, &FormValues::empty(&other)) else {
        panic!("expected missing values to fail");
    };
    assert_eq!(errors.get("code"), Some("code too short"));
    assert_eq!(errors.get("email"), Some("email required"));
}

#[test]
fn validation_does_not_mutate_input() {
    let schema = sample_schema();
    let input = values(&schema, "abcd", "  jo@x.com ");
    let before = input.clone();

    let first = validate(&schema, &input);
    let second = validate(&schema, &input);

    assert_eq!(input, before);
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn invalid_reports_exactly_the_failing_fields_with_first_message(
        code in "[a-z ]{0,10}",
        email in "[ a-z@.]{0,12}",
    ) {
        let schema = sample_schema();
        let result = validate(&schema, &values(&schema, &code, &email));

        let expected: Vec<(&str, &str)> = [
            ("code", expected_code_error(&code)),
            ("email", expected_email_error(&email)),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| (field, message)))
        .collect();

        match result {
            ValidationResult::Invalid(errors) => {
                let actual: Vec<(&str, &str)> = errors
                    .as_slice()
                    .iter()
                    .map(|error| (error.field.as_str(), error.message.as_str()))
                    .collect();
                prop_assert_eq!(actual, expected);
            }
            ValidationResult::Valid(_) => {
                prop_assert!(expected.is_empty());
            }
        }
    }

    #[test]
    fn valid_trims_only_trimmable_fields(
        code in "[a-z]{1,2}",
        local in "[a-z]{1,6}",
        pad in " {0,3}",
    ) {
        let schema = sample_schema();
        let padded_code = format!("{pad}{code} ");
        prop_assume!(expected_code_error(&padded_code).is_none());
        let email = format!("{pad}{local}@example.com{pad}");

        let ValidationResult::Valid(sanitized) =
            validate(&schema, &values(&schema, &padded_code, &email))
        else {
            return Err(TestCaseError::fail("expected valid values"));
        };

        prop_assert_eq!(sanitized.get("code"), Some(padded_code.as_str()));
        let trimmed_email = format!("{local}@example.com");
        prop_assert_eq!(sanitized.get("email"), Some(trimmed_email.as_str()));
    }
}
