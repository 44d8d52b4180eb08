use std::io::{self, Write};

/// Three ways of asking whether two strings are "the same"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringComparison {
    /// Both slices point at the same bytes
    pub same_allocation: bool,
    pub equal: bool,
    pub equal_ignore_case: bool,
}

impl StringComparison {
    pub fn of(first: &str, second: &str) -> Self {
        Self {
            same_allocation: std::ptr::eq(first, second),
            equal: first == second,
            equal_ignore_case: first
                .chars()
                .flat_map(char::to_lowercase)
                .eq(second.chars().flat_map(char::to_lowercase)),
        }
    }
}

pub fn write_comparison<W: Write>(w: &mut W, first: &str, second: &str) -> io::Result<()> {
    let result = StringComparison::of(first, second);

    writeln!(w, "\nString 1: \"{}\"", first)?;
    writeln!(w, "String 2: \"{}\"", second)?;
    writeln!(
        w,
        "\nString 1 and String 2 share storage: [{}] (compares addresses, not content)",
        result.same_allocation
    )?;
    writeln!(w, "String 1 == String 2: [{}] (compares content, case-sensitive)", result.equal)?;
    writeln!(
        w,
        "String 1 equals String 2 ignoring case: [{}] (compares content, ignoring case)",
        result.equal_ignore_case
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separately_read_strings_differ_in_storage() {
        let first = String::from("Hello");
        let second = String::from("Hello");
        let result = StringComparison::of(&first, &second);

        assert!(!result.same_allocation);
        assert!(result.equal);
        assert!(result.equal_ignore_case);
    }

    #[test]
    fn test_same_slice_shares_storage() {
        let text = String::from("Hello");
        assert!(StringComparison::of(&text, &text).same_allocation);
    }

    #[test]
    fn test_case_only_difference() {
        let result = StringComparison::of("Hello", "hELLO");
        assert!(!result.equal);
        assert!(result.equal_ignore_case);
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(StringComparison::of("ÄPFEL", "äpfel").equal_ignore_case);
        assert!(!StringComparison::of("abc", "abd").equal_ignore_case);
    }
}
