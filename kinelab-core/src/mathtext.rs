//! Inline math markup
//!
//! Question and formula strings embed math between dollar signs:
//! `"starts from rest ($v_0 = 0$)"`. Inside a math span, a letter followed
//! by `_` takes a subscript and `^` a superscript, either a single character
//! or a `{braced}` group. `\Delta` (or `Δ`) renders as the delta sign and
//! `\times` as a multiplication sign.

/// One piece of a marked-up string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Math(Vec<MathToken>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathToken {
    /// A single-letter variable with optional indices
    Symbol {
        name: char,
        subscript: Option<String>,
        superscript: Option<String>,
    },
    Number(String),
    Operator(char),
    Delta,
    /// Superscript attached to the preceding token, as in `(3)^2`
    Superscript(String),
    /// Anything else, kept verbatim (spaces, parentheses, units)
    Text(String),
}

/// Split `text` into plain and math segments
pub fn parse_math_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('$') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('$') else {
            break;
        };
        if open > 0 {
            push_text(&mut segments, &rest[..open]);
        }
        segments.push(Segment::Math(tokenize_math(&after[..close])));
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        push_text(&mut segments, rest);
    }
    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Text(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Tokenize the inside of a `$...$` span
pub fn tokenize_math(source: &str) -> Vec<MathToken> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end].is_ascii_alphabetic() {
                end += 1;
            }
            let command: String = chars[start..end].iter().collect();
            match command.as_str() {
                "Delta" => {
                    tokens.push(MathToken::Delta);
                    // `\Delta s` binds to the following symbol
                    if chars.get(end) == Some(&' ') {
                        end += 1;
                    }
                }
                "times" => tokens.push(MathToken::Operator('×')),
                _ => push_plain(&mut tokens, &format!("\\{}", command)),
            }
            i = end;
        } else if c == 'Δ' {
            tokens.push(MathToken::Delta);
            i += 1;
        } else if c.is_ascii_alphabetic() {
            i += 1;
            let subscript = read_index(&chars, &mut i, '_');
            let superscript = read_index(&chars, &mut i, '^');
            tokens.push(MathToken::Symbol {
                name: c,
                subscript,
                superscript,
            });
        } else if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            tokens.push(MathToken::Number(chars[start..i].iter().collect()));
        } else if matches!(c, '+' | '-' | '=' | '/' | '*' | '×') {
            tokens.push(MathToken::Operator(c));
            i += 1;
        } else if c == '^' {
            // superscript on a closing parenthesis, e.g. (3)^2
            i += 1;
            let start = i;
            i = index_end(&chars, i);
            tokens.push(MathToken::Superscript(strip_braces(&chars[start..i])));
        } else {
            push_plain(&mut tokens, &c.to_string());
            i += 1;
        }
    }
    tokens
}

fn push_plain(tokens: &mut Vec<MathToken>, text: &str) {
    if let Some(MathToken::Text(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(MathToken::Text(text.to_string()));
    }
}

fn read_index(chars: &[char], i: &mut usize, marker: char) -> Option<String> {
    if *i >= chars.len() || chars[*i] != marker {
        return None;
    }
    let start = *i + 1;
    let end = index_end(chars, start);
    if end == start {
        return None;
    }
    *i = end;
    Some(strip_braces(&chars[start..end]))
}

/// End of a `_x` / `^{xy}` index starting at `start`
fn index_end(chars: &[char], start: usize) -> usize {
    match chars.get(start) {
        Some('{') => chars[start..]
            .iter()
            .position(|c| *c == '}')
            .map(|p| start + p + 1)
            .unwrap_or(chars.len()),
        Some(c) if c.is_ascii_digit() => {
            let mut end = start;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
            end
        }
        Some(c) if c.is_ascii_alphabetic() => start + 1,
        _ => start,
    }
}

fn strip_braces(chars: &[char]) -> String {
    chars
        .iter()
        .filter(|c| **c != '{' && **c != '}')
        .collect()
}

/// Render segments back to plain text with Unicode sub/superscripts
pub fn to_plain_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Math(tokens) => {
                for token in tokens {
                    match token {
                        MathToken::Symbol {
                            name,
                            subscript,
                            superscript,
                        } => {
                            out.push(*name);
                            if let Some(sub) = subscript {
                                out.extend(sub.chars().map(subscript_char));
                            }
                            if let Some(sup) = superscript {
                                out.extend(sup.chars().map(superscript_char));
                            }
                        }
                        MathToken::Number(n) => out.push_str(n),
                        MathToken::Operator(op) => out.push(*op),
                        MathToken::Delta => out.push('Δ'),
                        MathToken::Superscript(sup) => {
                            out.extend(sup.chars().map(superscript_char))
                        }
                        MathToken::Text(text) => out.push_str(text),
                    }
                }
            }
        }
    }
    out
}

fn subscript_char(c: char) -> char {
    match c {
        '0'..='9' => char::from_u32('₀' as u32 + (c as u32 - '0' as u32)).unwrap_or(c),
        _ => c,
    }
}

fn superscript_char(c: char) -> char {
    match c {
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '0' | '4'..='9' => char::from_u32('⁰' as u32 + (c as u32 - '0' as u32)).unwrap_or(c),
        _ => c,
    }
}
