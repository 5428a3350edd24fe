//! Successor computation for traveler revision labels.

/// Returns the next revision label after `current`.
///
/// Total function: every input yields a usable label. Input is trimmed and
/// uppercased before classification.
///
/// - All-letter labels increment as a base-26 odometer over `A`..`Z`
///   (`"A"` -> `"B"`, `"Z"` -> `"AA"`, `"AZ"` -> `"BA"`).
/// - A label ending in decimal digits with a non-empty, non-numeric prefix
///   increments the trailing number (`"V1.9"` -> `"V1.10"`), without
///   zero-padding.
/// - An empty label starts the sequence at `"A"`; anything unclassifiable
///   gets a literal `"B"` appended rather than failing.
pub fn next_revision(current: &str) -> String {
    let label = current.trim().to_uppercase();

    if label.is_empty() {
        return "A".to_string();
    }

    if label.chars().all(|c| c.is_ascii_uppercase()) {
        return increment_letters(&label);
    }

    let digit_run = label
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digit_run > 0 {
        let split = label.len() - digit_run;
        let (prefix, digits) = label.split_at(split);
        if !prefix.is_empty() {
            // Trailing runs longer than u64 can hold are not real revision
            // numbers; those fall through to the append fallback.
            if let Ok(number) = digits.parse::<u64>() {
                return format!("{}{}", prefix, number + 1);
            }
        }
    }

    format!("{}B", label)
}

fn increment_letters(label: &str) -> String {
    let mut chars: Vec<char> = label.chars().collect();
    for slot in chars.iter_mut().rev() {
        if *slot == 'Z' {
            *slot = 'A';
        } else {
            *slot = (*slot as u8 + 1) as char;
            return chars.into_iter().collect();
        }
    }
    // Carried out of the leftmost position.
    let mut widened = String::with_capacity(chars.len() + 1);
    widened.push('A');
    widened.extend(chars);
    widened
}
