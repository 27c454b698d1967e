//! Placeholder templates for the value-list logging variants
//!
//! `logger.error(&[&"x", &1, &"y"])` builds the template `"{} {} {}"` and
//! renders it against the values, giving the same text as
//! `log_error(format_args!("{} {} {}", "x", 1, "y"))`.

use std::fmt::{Display, Write};

const PLACEHOLDER: &str = "{}";

/// Template of `count` space-separated `{}` placeholders
pub fn placeholder_template(count: usize) -> String {
    vec![PLACEHOLDER; count].join(" ")
}

/// Substitute `values` into each `{}` of `template`, left to right.
///
/// `{{` and `}}` are literal braces. Placeholders without a value are kept
/// verbatim; surplus values are appended space-separated so nothing a caller
/// passed is silently lost.
pub fn render(template: &str, values: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 8);
    let mut values = values.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) => {
                chars.next();
                out.push('{');
            }
            ('}', Some('}')) => {
                chars.next();
                out.push('}');
            }
            ('{', Some('}')) => {
                chars.next();
                match values.next() {
                    Some(value) => {
                        let _ = write!(out, "{}", value);
                    }
                    None => out.push_str(PLACEHOLDER),
                }
            }
            _ => out.push(c),
        }
    }

    for value in values {
        let _ = write!(out, " {}", value);
    }
    out
}

/// Render a value list with a generated template
pub fn render_values(values: &[&dyn Display]) -> String {
    render(&placeholder_template(values.len()), values)
}
