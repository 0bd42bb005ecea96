/// Show only the first six characters of a credential.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    if visible.is_empty() {
        return "***".to_string();
    }
    format!("{visible}...")
}

/// Collapse line breaks, tabs and repeated spaces left over from HTML markup.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "BRGY. HOLY SPIRIT" -> "Brgy. Holy Spirit"
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
