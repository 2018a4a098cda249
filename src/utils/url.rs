//! URL building utilities.
//!
//! Repository paths come from user input (folder names) and file names, so
//! every segment is percent-encoded before it is put into an API or Pages
//! URL.

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Percent-encode every segment of a `/`-separated path, keeping the slashes.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_untouched() {
        assert_eq!(encode_segment("slideshow-1_2.png~"), "slideshow-1_2.png~");
    }

    #[test]
    fn test_reserved_encoded() {
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("x?y#z"), "x%3Fy%23z");
        assert_eq!(encode_segment("Trip (2024)"), "Trip%20%282024%29");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_path_keeps_separators() {
        assert_eq!(encode_path("trip/3."), "trip/3.");
        assert_eq!(encode_path("my trip/index.html"), "my%20trip/index.html");
    }
}
