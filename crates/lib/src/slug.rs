/// Turns a file stem into a URL path segment: transliterated to ASCII,
/// lowercased, runs of whitespace, `-` and `.` collapsed to one `-`, any
/// other punctuation dropped. May return an empty string.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut separator = false;

    for ch in deunicode::deunicode(name).chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if separator && !slug.is_empty() {
                slug.push('-');
            }
            separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '.' {
            separator = true;
        }
    }

    slug
}
