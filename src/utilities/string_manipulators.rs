/// Lowercased text used for case-insensitive name matching.
pub fn normalize_for_search(input: &str) -> String {
    input.to_lowercase()
}

/// "not_legal" -> "Not Legal", "commander" -> "Commander".
pub fn title_case(input: &str) -> String {
    input
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
