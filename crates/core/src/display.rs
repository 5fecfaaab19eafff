//! Page title derivation and region visibility.

use crate::page::Page;

/// Title for a canonical fragment.
///
/// `blog/0007` under `My Website` becomes `My Website | Blog - 0007`.
pub fn title_for(base_title: &str, fragment: &str, not_found_fragment: &str) -> String {
    if fragment.is_empty() {
        return base_title.to_string();
    }
    if fragment == not_found_fragment {
        return format!("{base_title} | Page Not Found");
    }

    let segments: Vec<&str> = fragment.split('/').collect();
    match segments.as_slice() {
        [single] => format!("{base_title} | {}", capitalize(single)),
        [first, .., last] => format!("{base_title} | {} - {last}", capitalize(first)),
        [] => base_title.to_string(),
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hide every managed region, then reveal `id` if the page has it.
pub fn show(page: &dyn Page, id: &str) {
    for region in page.regions() {
        page.set_visible(&region, false);
    }
    if page.contains(id) {
        page.set_visible(id, true);
    }
}
