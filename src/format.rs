//! Formatting Utilities
//!
//! Small string helpers shared by the row render code: positional
//! templating, capitalization, DOM-id hashing and the usage percentage.

/// Substitute positional `{0}`, `{1}`, … markers in a template.
/// Markers without a matching argument are left untouched.
pub fn fmt(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i), arg);
    }
    out
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Stable DOM id derived from a prefix and an arbitrary key string
/// (FNV-1a over the key bytes). Used where a row has no numeric id.
pub fn dom_id(prefix: &str, key: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in key.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    format!("{}-{:x}", prefix, hash)
}

/// Display text for an optional field: the value, or `""`, never the
/// literal `"None"`.
pub fn opt_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Display-only usage percentage, fixed to two decimals. Returns `"0"`
/// whenever consumed or total is zero: the guard covers the 0/0 case and a
/// zero total, since a percentage of nothing has no meaning either way.
pub fn usage(consumed: u64, total: u64) -> String {
    if consumed > 0 && total > 0 {
        format!("{:.2}", consumed as f64 / total as f64 * 100.0)
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_positional() {
        assert_eq!(
            fmt("Extend {0} by {1} hours", &["prj42", "5000"]),
            "Extend prj42 by 5000 hours"
        );
        // unmatched marker stays
        assert_eq!(fmt("hello {0} {1}", &["world"]), "hello world {1}");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn test_dom_id_stable_and_distinct() {
        assert_eq!(dom_id("user", "marie"), dom_id("user", "marie"));
        assert_ne!(dom_id("user", "marie"), dom_id("user", "pierre"));
        assert!(dom_id("user", "marie").starts_with("user-"));
    }

    #[test]
    fn test_opt_text_never_renders_none() {
        assert_eq!(opt_text(&Some("lab".to_string())), "lab");
        assert_eq!(opt_text(&None), "");
    }

    #[test]
    fn test_usage() {
        assert_eq!(usage(0, 0), "0");
        assert_eq!(usage(0, 200), "0");
        // zero total never divides
        assert_eq!(usage(5, 0), "0");
        assert_eq!(usage(50, 200), "25.00");
        assert_eq!(usage(200, 200), "100.00");
        assert_eq!(usage(1, 3), "33.33");
    }
}
