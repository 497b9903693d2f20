/// Turns a title into a URL slug: lowercase ASCII letters and digits, with
/// every run of other characters collapsed into a single `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_question_title() {
        assert_eq!(slugify("How do I center a div?"), "how-do-i-center-a-div");
    }

    #[test]
    fn test_slugify_collapses_and_trims_separators() {
        assert_eq!(slugify("  Rust -- async/await!! "), "rust-async-await");
        assert_eq!(slugify("C++ vs. C#"), "c-vs-c");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("Why is `Vec<T>` not Copy?");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slugify_without_ascii_content() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
    }
}
