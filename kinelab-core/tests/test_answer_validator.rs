//! Tolerance checking of typed answers

use kinelab_core::answer::{check_answer, parse_leading_number, AnswerOutcome, DEFAULT_TOLERANCE};

#[test]
fn test_within_tolerance_is_correct() {
    assert_eq!(check_answer("9.05", 9.0, 0.1), AnswerOutcome::Correct);
    assert_eq!(check_answer("9", 9.0, DEFAULT_TOLERANCE), AnswerOutcome::Correct);
    assert_eq!(check_answer("  -8 ", -8.0, DEFAULT_TOLERANCE), AnswerOutcome::Correct);
    assert_eq!(check_answer("2.5e0", 2.5, DEFAULT_TOLERANCE), AnswerOutcome::Correct);
}

#[test]
fn test_outside_tolerance_is_incorrect() {
    assert_eq!(check_answer("9.2", 9.0, 0.1), AnswerOutcome::Incorrect);
    assert_eq!(check_answer("8", -8.0, DEFAULT_TOLERANCE), AnswerOutcome::Incorrect);
    assert_eq!(check_answer("10", 9.0, 0.5), AnswerOutcome::Incorrect);
}

#[test]
fn test_tolerance_is_strict() {
    assert_eq!(check_answer("10", 9.0, 1.0), AnswerOutcome::Incorrect);
}

#[test]
fn test_non_numbers_are_unparseable() {
    for input in ["abc", "", "   ", "-", ".", "m/s", "NaN", "inf", "infinity", "1e999"] {
        assert_eq!(
            check_answer(input, 9.0, DEFAULT_TOLERANCE),
            AnswerOutcome::Unparseable,
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_trailing_units_are_ignored() {
    assert_eq!(check_answer("9 m", 9.0, DEFAULT_TOLERANCE), AnswerOutcome::Correct);
    assert_eq!(check_answer("-8m/s²", -8.0, DEFAULT_TOLERANCE), AnswerOutcome::Correct);
}

#[test]
fn test_leading_number_forms() {
    assert_eq!(parse_leading_number("12abc"), Some(12.0));
    assert_eq!(parse_leading_number(".5"), Some(0.5));
    assert_eq!(parse_leading_number("+3."), Some(3.0));
    assert_eq!(parse_leading_number("2e"), Some(2.0));
    assert_eq!(parse_leading_number("2e-1x"), Some(0.2));
    assert_eq!(parse_leading_number("x2"), None);
}
