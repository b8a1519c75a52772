/// Utility helpers for StreamFlow
use crate::player::MediaSource;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render seconds as `m:ss`. Zero, negative and non-finite input render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Turn whatever the user typed into the source the player should attach.
///
/// Returns `None` for empty or whitespace-only input. With `use_proxy` the
/// target is percent-encoded into the proxy's `url` query parameter.
pub fn resolve_source(
    input: &str,
    use_proxy: bool,
    proxy_endpoint: &str,
    adaptive_marker: &str,
) -> Option<MediaSource> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let url = if use_proxy {
        format!(
            "{proxy_endpoint}?url={}",
            utf8_percent_encode(trimmed, URI_COMPONENT)
        )
    } else {
        trimmed.to_string()
    };

    if !adaptive_marker.is_empty() && url.contains(adaptive_marker) {
        Some(MediaSource::Adaptive(url))
    } else {
        Some(MediaSource::Direct(url))
    }
}

/// Read a query parameter from a `location.search` style string.
/// Empty values count as absent. Invalid UTF-8 is replaced, not rejected.
pub fn url_param_from_search(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then_some(value)
        })
        .next()
        .map(|raw| {
            let spaced = raw.replace('+', " ");
            let bytes = urlencoding::decode_binary(spaced.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .filter(|value| !value.is_empty())
}

/// Whether keystrokes on an element with this tag belong to text entry.
/// `contenteditable` is the raw attribute value, if present.
pub fn is_text_entry(tag: &str, contenteditable: Option<&str>) -> bool {
    if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    contenteditable.is_some_and(|value| !value.eq_ignore_ascii_case("false"))
}

/// Horizontal position of a pointer inside a track, as a fraction in [0, 1].
pub fn pointer_fraction(client_x: f64, track_left: f64, track_width: f64) -> Option<f64> {
    if !track_width.is_finite() || track_width <= 0.0 || !client_x.is_finite() {
        return None;
    }
    Some(((client_x - track_left) / track_width).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_falls_back_for_falsy_values() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn proxy_rewrite_encodes_the_target() {
        let source = resolve_source(
            "https://example.com/video.mp4",
            true,
            "http://localhost:4000/proxy",
            ".m3u8",
        );
        assert_eq!(
            source,
            Some(MediaSource::Direct(
                "http://localhost:4000/proxy?url=https%3A%2F%2Fexample.com%2Fvideo.mp4".into()
            ))
        );
    }

    #[test]
    fn proxy_rewrite_keeps_component_safe_punctuation() {
        let source = resolve_source(
            "https://a.test/clip(1)!.mp4?t=a b&x=*'~",
            true,
            "http://localhost:4000/proxy",
            ".m3u8",
        );
        assert_eq!(
            source,
            Some(MediaSource::Direct(
                "http://localhost:4000/proxy?url=https%3A%2F%2Fa.test%2Fclip(1)!.mp4%3Ft%3Da%20b%26x%3D*'~"
                    .into()
            ))
        );
    }

    #[test]
    fn blank_input_resolves_to_nothing() {
        assert_eq!(resolve_source("", false, "http://p", ".m3u8"), None);
        assert_eq!(resolve_source("   \t ", true, "http://p", ".m3u8"), None);
    }

    #[test]
    fn manifest_urls_are_adaptive_even_through_the_proxy() {
        assert_eq!(
            resolve_source(" https://cdn.test/live/index.m3u8 ", false, "http://p", ".m3u8"),
            Some(MediaSource::Adaptive("https://cdn.test/live/index.m3u8".into()))
        );
        assert!(matches!(
            resolve_source("https://cdn.test/index.m3u8", true, "http://p", ".m3u8"),
            Some(MediaSource::Adaptive(url)) if url.starts_with("http://p?url=")
        ));
    }

    #[test]
    fn query_param_is_form_decoded() {
        assert_eq!(
            url_param_from_search("?url=https%3A%2F%2Fa.test%2Fmy+clip.mp4", "url"),
            Some("https://a.test/my clip.mp4".to_string())
        );
        assert_eq!(
            url_param_from_search("?foo=1&url=x.mp4&url=y.mp4", "url"),
            Some("x.mp4".to_string())
        );
        assert_eq!(url_param_from_search("?url=", "url"), None);
        assert_eq!(url_param_from_search("", "url"), None);
    }

    #[test]
    fn query_param_with_broken_utf8_still_decodes() {
        assert_eq!(
            url_param_from_search("?url=https%3A%2F%2Fa.test%2F%FF.mp4", "url"),
            Some("https://a.test/\u{FFFD}.mp4".to_string())
        );
    }

    #[test]
    fn text_entry_covers_inputs_and_editable_content() {
        assert!(is_text_entry("INPUT", None));
        assert!(is_text_entry("textarea", None));
        assert!(is_text_entry("div", Some("")));
        assert!(is_text_entry("div", Some("true")));
        assert!(is_text_entry("span", Some("plaintext-only")));
        assert!(!is_text_entry("div", Some("false")));
        assert!(!is_text_entry("VIDEO", None));
        assert!(!is_text_entry("button", None));
    }

    #[test]
    fn pointer_fraction_clamps_to_track() {
        assert_eq!(pointer_fraction(150.0, 100.0, 200.0), Some(0.25));
        assert_eq!(pointer_fraction(50.0, 100.0, 200.0), Some(0.0));
        assert_eq!(pointer_fraction(400.0, 100.0, 200.0), Some(1.0));
        assert_eq!(pointer_fraction(150.0, 100.0, 0.0), None);
    }
}
