// Admission rules for new ideas: blacklist and duplicate detection

/// Lowercase and collapse all whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Return the first blacklisted keyword contained in `text`, if any.
pub fn find_blacklisted<'a>(text: &str, blacklist: &'a [String]) -> Option<&'a str> {
    let text = normalize(text);
    blacklist
        .iter()
        .find(|keyword| {
            let keyword = normalize(keyword);
            !keyword.is_empty() && text.contains(&keyword)
        })
        .map(String::as_str)
}
