//! Constant literal rendering.
//!
//! Renders constant values as round-trip-safe literal text. Strings use a
//! triple-quoted form; a verbatim (raw) form is preferred when the value
//! carries backslashes and nothing that a verbatim literal cannot hold. A
//! value ending in an odd run of backslashes cannot close a verbatim
//! delimiter: one backslash is split off and appended as a separate
//! escaped literal. Integers render in decimal.

use typeweld_model::ConstValue;

/// Renders a constant value as literal text.
#[must_use]
pub fn render(value: &ConstValue) -> String {
    match value {
        ConstValue::Int(value) => value.to_string(),
        ConstValue::Str(value) => render_string(value),
    }
}

/// Renders a string constant as a triple-quoted literal.
#[must_use]
pub fn render_string(value: &str) -> String {
    if wants_verbatim(value) {
        if trailing_backslashes(value) % 2 == 1 {
            // An odd run cannot sit against the closing delimiter. Split
            // one backslash off and render the even-run head on its own.
            let head = &value[..value.len() - 1];
            return format!("{} + '\\\\'", render_string(head));
        }
        return format!("r\"\"\"{value}\"\"\"");
    }
    format!("\"\"\"{}\"\"\"", escape(value))
}

/// Returns true if the value prefers the verbatim form: it contains
/// backslashes and nothing a verbatim literal cannot hold.
fn wants_verbatim(value: &str) -> bool {
    value.contains('\\')
        && !value.contains("\"\"\"")
        && !value.ends_with('"')
        && value.chars().all(|c| !c.is_control())
}

fn trailing_backslashes(value: &str) -> usize {
    value.chars().rev().take_while(|&c| c == '\\').count()
}

/// Escapes a value for the non-verbatim triple-quoted form. Newlines stay
/// literal; quotes are escaped only where a run would close the delimiter
/// or a final quote would merge with it.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let chars: Vec<char> = value.chars().collect();
    let mut quote_run = 0usize;
    for (position, &c) in chars.iter().enumerate() {
        if c == '"' {
            quote_run += 1;
            if quote_run == 3 || position == chars.len() - 1 {
                out.push('\\');
                quote_run = 0;
            }
            out.push('"');
            continue;
        }
        quote_run = 0;
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push('\n'),
            '\0' => out.push_str("\\x00"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(render_string(""), "\"\"\"\"\"\"");
    }

    #[test]
    fn test_simple_string() {
        assert_eq!(render_string("Hello, world!"), "\"\"\"Hello, world!\"\"\"");
    }

    #[test]
    fn test_multiline_keeps_literal_newlines() {
        assert_eq!(
            render_string("Line one.\nLine two.\nLine three."),
            "\"\"\"Line one.\nLine two.\nLine three.\"\"\""
        );
    }

    #[test]
    fn test_escaped_characters_mix() {
        assert_eq!(
            render_string("First\\line.\nSecond \"quoted\" line.\tEnd."),
            "\"\"\"First\\\\line.\nSecond \"quoted\" line.\\tEnd.\"\"\""
        );
    }

    #[test]
    fn test_verbatim_preferred_for_backslash_runs() {
        assert_eq!(
            render_string("C:\\Users\\test\\path and a regex \\d+\\w"),
            "r\"\"\"C:\\Users\\test\\path and a regex \\d+\\w\"\"\""
        );
    }

    #[test]
    fn test_even_trailing_backslashes_stay_verbatim() {
        assert_eq!(render_string("dir\\\\"), "r\"\"\"dir\\\\\"\"\"");
    }

    #[test]
    fn test_odd_trailing_backslashes_split_one_off() {
        assert_eq!(
            render_string("Odd number of backslashes: \\\\\\"),
            "r\"\"\"Odd number of backslashes: \\\\\"\"\" + '\\\\'"
        );
    }

    #[test]
    fn test_single_trailing_backslash_falls_back_to_escaped() {
        // The head keeps no backslash, so no verbatim form remains.
        assert_eq!(render_string("ab\\"), "\"\"\"ab\"\"\" + '\\\\'");
    }

    #[test]
    fn test_control_characters_disqualify_verbatim() {
        assert_eq!(
            render_string("tab\t then \\d+"),
            "\"\"\"tab\\t then \\\\d+\"\"\""
        );
    }

    #[test]
    fn test_null_byte_rendered_as_hex_escape() {
        assert_eq!(render_string("null\0byte"), "\"\"\"null\\x00byte\"\"\"");
    }

    #[test]
    fn test_quote_runs_cannot_close_the_delimiter() {
        // The third quote in a row is escaped so no closing triple forms.
        assert_eq!(render_string("a\"\"\"b"), "\"\"\"a\"\"\\\"b\"\"\"");
    }

    #[test]
    fn test_final_quote_cannot_merge_with_delimiter() {
        assert_eq!(render_string("say \"hi\""), "\"\"\"say \"hi\\\"\"\"\"");
    }

    #[test]
    fn test_triple_quote_disqualifies_verbatim() {
        assert_eq!(
            render_string("quote \"\"\" and slash \\d"),
            "\"\"\"quote \"\"\\\" and slash \\\\d\"\"\""
        );
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(
            render_string("Emoji: \u{1f980} acce\u{0301}nt"),
            "\"\"\"Emoji: \u{1f980} acce\u{0301}nt\"\"\""
        );
    }

    #[test]
    fn test_template_like_text_is_inert() {
        assert_eq!(render_string("${not a template}"), "\"\"\"${not a template}\"\"\"");
    }

    #[test]
    fn test_integers_render_in_decimal() {
        assert_eq!(render(&ConstValue::Int(65_535)), "65535");
        assert_eq!(render(&ConstValue::Int(-40)), "-40");
        assert_eq!(render(&ConstValue::Int(0)), "0");
    }
}
