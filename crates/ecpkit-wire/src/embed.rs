//! Embed URL construction for the main and child frames.

use crate::settings::EmbedSettings;

/// Fixed embed path of the primary chat surface.
pub const MAIN_EMBED_PATH: &str = "/apps/embed/default";
/// Fixed embed path child frames bootstrap from.
pub const CHILD_EMBED_PATH: &str = "/apps/embed/default/frame-root.html";

/// URL the main frame navigates to.
///
/// The fixed settings query comes first, then `embed=true`, the partner
/// id, the stream id, and the embedding page's origin as `sdkOrigin`.
/// Appended values are percent-encoded; the settings query is already
/// canonical.
pub fn main_frame_url(
    pod_url: &str,
    settings: &EmbedSettings,
    partner_id: &str,
    stream_id: &str,
    sdk_origin: &str,
) -> String {
    let mut url = format!(
        "{}{}?{}",
        pod_url.trim_end_matches('/'),
        MAIN_EMBED_PATH,
        settings.to_query()
    );
    for (key, value) in [
        ("embed", "true"),
        ("partnerId", partner_id),
        ("streamId", stream_id),
        ("sdkOrigin", sdk_origin),
    ] {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(&encode_query_value(value));
    }
    url
}

/// URL a child frame navigates to; the generated frame container id
/// travels as the fragment identifier.
pub fn child_frame_url(pod_url: &str, frame_container_id: &str) -> String {
    format!(
        "{}{}#{}",
        pod_url.trim_end_matches('/'),
        CHILD_EMBED_PATH,
        frame_container_id
    )
}

/// Percent-encode everything outside the unreserved set.
fn encode_query_value(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push(HEX[usize::from(byte >> 4)] as char);
                out.push(HEX[usize::from(byte & 0x0F)] as char);
            }
        }
    }
    out
}
