/// Tolerance used by the problem set
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Result of comparing a typed answer with the reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The input holds no number; callers should treat it as "not answered yet"
    Unparseable,
}

/// Compare `input` with `reference`, accepting anything strictly closer than `tolerance`
pub fn check_answer(input: &str, reference: f64, tolerance: f64) -> AnswerOutcome {
    match parse_leading_number(input) {
        None => AnswerOutcome::Unparseable,
        Some(value) if (value - reference).abs() < tolerance => AnswerOutcome::Correct,
        Some(_) => AnswerOutcome::Incorrect,
    }
}

/// Read the number at the start of `input`, ignoring surrounding whitespace
/// and anything after it, so `"9 m"` reads as 9.
///
/// Returns `None` when there is no leading number or it is not finite.
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let text = input.trim();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // a lone "." is not part of the number
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // exponent only counts when digits follow it: "2e" reads as 2
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
