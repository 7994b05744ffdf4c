use log::warn;
use web_sys::{window, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};

/// Element id an in-page link points at; a bare `#` points nowhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_to_anchor(id: &str) -> bool {
    let target = window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id));
    match target {
        Some(target) => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
            true
        }
        None => {
            warn!("No element with id {} to scroll to", id);
            false
        }
    }
}

/// Click handler body for links: in-page anchors scroll smoothly instead of jumping.
pub fn follow_anchor(event: &MouseEvent, href: &str) {
    if !href.starts_with('#') {
        return;
    }
    event.prevent_default();
    if let Some(id) = anchor_target(href) {
        scroll_to_anchor(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#services"), Some("services"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about"), None);
        assert_eq!(anchor_target("https://example.com/#x"), None);
    }
}
