//! Client-side form validation.
//!
//! These checks run before any request is built; a payload that fails here
//! never reaches the network layer. Kept regex-free so the crate compiles
//! lean on wasm32.

use crate::{RETURN_WINDOW_MAX, RETURN_WINDOW_MIN};

/// Loose email shape: something, `@`, something, `.`, something, and
/// no whitespace anywhere.
pub fn email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Phone numbers: digits plus common separators, at least 10 digits total.
pub fn phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= 10
}

/// Contact field on the find-order form: email when it contains `@`,
/// phone otherwise.
pub fn email_or_phone(value: &str) -> bool {
    if value.contains('@') { email(value) } else { phone(value) }
}

/// Order ids must be at least 3 characters after trimming.
pub fn order_id(value: &str) -> bool {
    value.trim().len() >= 3
}

/// `#RRGGBB` hex color.
pub fn hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Store URLs: accept both bare domains and full http(s) URLs.
pub fn store_url(value: &str) -> bool {
    let bare = crate::normalize_store_domain(value);
    domain(&bare)
}

/// Store names: 2..=100 characters after trimming.
pub fn store_name(value: &str) -> bool {
    let len = value.trim().chars().count();
    (2..=100).contains(&len)
}

/// Return window in days, inclusive bounds.
pub fn return_window(days: i32) -> bool {
    (RETURN_WINDOW_MIN..=RETURN_WINDOW_MAX).contains(&days)
}

/// MIME types accepted for a store logo.
pub fn logo_mime(mime: &str) -> bool {
    matches!(mime, "image/png" | "image/jpg" | "image/jpeg")
}

/// Return-photo attachments accept any image type, nothing else.
pub fn image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

fn domain(value: &str) -> bool {
    let mut labels = value.split('.');
    let Some(last) = value.rsplit('.').next() else {
        return false;
    };
    // TLD must be alphabetic and at least two characters.
    if last.len() < 2 || !last.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    value.contains('.')
        && labels.all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(email("merchant@example.com"));
        assert!(email("a@b.co"));
        assert!(!email("merchant@example"));
        assert!(!email("@example.com"));
        assert!(!email("a b@example.com"));
        assert!(!email("plain"));
    }

    #[test]
    fn phone_needs_ten_digits() {
        assert!(phone("+1 (555) 012-3456"));
        assert!(phone("5550123456"));
        assert!(!phone("555-0123"));
        assert!(!phone("call me maybe"));
    }

    #[test]
    fn contact_dispatches_on_at_sign() {
        assert!(email_or_phone("a@b.com"));
        assert!(!email_or_phone("a@b"));
        assert!(email_or_phone("+1 555 000 1111"));
        assert!(!email_or_phone("12345"));
    }

    #[test]
    fn order_ids_trimmed_min_three() {
        assert!(order_id("ORD-1001"));
        assert!(order_id(" 123 "));
        assert!(!order_id(" 12 "));
    }

    #[test]
    fn hex_colors() {
        assert!(hex_color("#FF7F14"));
        assert!(hex_color("#00aabb"));
        assert!(!hex_color("FF7F14"));
        assert!(!hex_color("#FF7F1"));
        assert!(!hex_color("#GG0000"));
    }

    #[test]
    fn store_urls_accept_scheme_or_bare_domain() {
        assert!(store_url("mystore.com"));
        assert!(store_url("https://mystore.com"));
        assert!(store_url("https://www.my-store.co.uk"));
        assert!(!store_url("mystore"));
        assert!(!store_url("-bad-.com"));
        assert!(!store_url("my store.com"));
    }

    #[test]
    fn return_window_bounds() {
        assert!(return_window(1));
        assert!(return_window(365));
        assert!(!return_window(0));
        assert!(!return_window(366));
    }

    #[test]
    fn logo_mime_whitelist() {
        assert!(logo_mime("image/png"));
        assert!(logo_mime("image/jpeg"));
        assert!(!logo_mime("image/gif"));
        assert!(!logo_mime("application/pdf"));
    }

    #[test]
    fn photo_mime_accepts_any_image() {
        assert!(image_mime("image/png"));
        assert!(image_mime("image/webp"));
        assert!(image_mime("image/gif"));
        assert!(!image_mime("application/pdf"));
        assert!(!image_mime("video/mp4"));
        assert!(!image_mime(""));
    }
}
