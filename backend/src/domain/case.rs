//! Field name conversion between the storage convention (snake_case) and the
//! application convention (camelCase).
//!
//! Both functions are total: any input string is accepted and nothing is
//! validated. Only ASCII letters take part in the conversion.

/// Convert a snake_case name to camelCase.
///
/// Every `_` directly followed by a lowercase ASCII letter is dropped and the
/// letter upper-cased. Other underscores are kept as they are, so
/// `"a__b"` becomes `"a_B"`.
pub fn to_camel_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    output.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        output.push(c);
    }

    output
}

/// Convert a camelCase name to snake_case.
///
/// Every uppercase ASCII letter becomes `_` plus its lowercase form. A leading
/// capital therefore yields a leading underscore (`"Name"` -> `"_name"`); stored
/// column names depend on this, so it is kept.
pub fn to_snake_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len() + 4);

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            output.push('_');
            output.push(c.to_ascii_lowercase());
        } else {
            output.push(c);
        }
    }

    output
}
