//! Parsing of user-pasted links.
//!
//! Users paste whatever their browser gives them: long-form watch URLs,
//! short links, embed and shorts paths, sometimes the bare identifier.
//! Failure to match any shape is a user input error, never a crash.

use glassbeats_core::types::VideoId;
use url::Url;

/// What a catalog link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// A single track
    Track,

    /// A whole album
    Album,

    /// A user playlist
    Playlist,
}

/// A validated reference into the external music catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRef {
    /// Kind of entity the link addresses
    pub kind: CatalogKind,

    /// The catalog's identifier for it
    pub id: String,
}

/// Parse the input as a URL, retrying with an assumed scheme for pasted
/// links like `youtube.com/watch?v=...`.
fn lenient_url(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) if input.contains('.') => {
            Url::parse(&format!("https://{input}")).ok()
        }
        Err(_) => None,
    }
}

fn is_video_host(host: &str) -> bool {
    matches!(
        host,
        "youtube.com"
            | "www.youtube.com"
            | "m.youtube.com"
            | "music.youtube.com"
            | "youtube-nocookie.com"
            | "www.youtube-nocookie.com"
    )
}

/// Extract the 11-character video identifier from any of the common URL
/// shapes (`watch?v=`, `youtu.be/`, `embed/`, `shorts/`, `v/`) or from a
/// bare identifier.
///
/// Returns `None` for anything that does not match; callers surface that
/// as an input error.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();

    if let Ok(id) = VideoId::parse(input) {
        return Some(id);
    }

    let url = lenient_url(input)?;
    let host = url.host_str()?;

    let candidate = if host == "youtu.be" {
        url.path_segments()?.next().map(str::to_string)
    } else if is_video_host(host) {
        let mut segments = url.path_segments()?;
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            "embed" | "shorts" | "v" | "live" => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    }?;

    VideoId::parse(candidate).ok()
}

/// Playlist identifiers use the same alphabet as video ids but have no
/// fixed length.
fn is_playlist_id(input: &str) -> bool {
    input.len() >= 13
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract a playlist identifier from a playlist URL (`?list=...`) or
/// accept a bare identifier.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(url) = lenient_url(input) {
        if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "list") {
            let value = value.into_owned();
            return is_playlist_id(&value).then_some(value);
        }
    }

    is_playlist_id(input).then(|| input.to_string())
}

/// Validate a catalog link before anything goes over the wire.
///
/// Accepts `open.spotify.com/{track,album,playlist}/{id}` URLs (with or
/// without locale path prefixes) and `spotify:{track,album,playlist}:{id}`
/// URIs.
pub fn parse_catalog_ref(input: &str) -> Option<CatalogRef> {
    let input = input.trim();

    if let Some(rest) = input.strip_prefix("spotify:") {
        let (kind, id) = rest.split_once(':')?;
        return catalog_ref(kind, id);
    }

    let url = lenient_url(input)?;
    if url.host_str()? != "open.spotify.com" {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    // Locale prefixes like /intl-de/track/... are skipped.
    let mut iter = segments
        .iter()
        .skip_while(|s| s.starts_with("intl-") || s.starts_with("embed"));
    let kind = iter.next()?;
    let id = iter.next()?;
    catalog_ref(kind, id)
}

fn catalog_ref(kind: &str, id: &str) -> Option<CatalogRef> {
    let kind = match kind {
        "track" => CatalogKind::Track,
        "album" => CatalogKind::Album,
        "playlist" => CatalogKind::Playlist,
        _ => return None,
    };
    let id = id.split('?').next().unwrap_or(id);
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| CatalogRef {
            kind,
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_with_extra_params() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn short_link() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn short_link_with_share_params() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=share-token&t=42");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn embed_and_shorts_and_v_paths() {
        for input in [
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
        ] {
            let id = extract_video_id(input);
            assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ", "failed on {input}");
        }
    }

    #[test]
    fn music_subdomain_and_mobile() {
        let id = extract_video_id("https://music.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");

        let id = extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn scheme_less_paste() {
        let id = extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn bare_identifier() {
        let id = extract_video_id("dQw4w9WgXcQ");
        assert_eq!(id.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(extract_video_id("not a url").is_none());
        assert!(extract_video_id("").is_none());
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(extract_video_id("https://www.youtube.com/watch?v=tooshort").is_none());
    }

    #[test]
    fn playlist_url_and_bare_id() {
        let id = extract_playlist_id("https://www.youtube.com/playlist?list=PLabcdef12345");
        assert_eq!(id.as_deref(), Some("PLabcdef12345"));

        let id = extract_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLabcdef12345");
        assert_eq!(id.as_deref(), Some("PLabcdef12345"));

        let id = extract_playlist_id("PLabcdef12345");
        assert_eq!(id.as_deref(), Some("PLabcdef12345"));

        assert!(extract_playlist_id("not a playlist").is_none());
    }

    #[test]
    fn catalog_track_url() {
        let parsed = parse_catalog_ref("https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT");
        assert_eq!(
            parsed,
            Some(CatalogRef {
                kind: CatalogKind::Track,
                id: "4cOdK2wGLETKBW3PvgPWqT".to_string(),
            })
        );
    }

    #[test]
    fn catalog_urls_with_locale_and_query() {
        let parsed =
            parse_catalog_ref("https://open.spotify.com/intl-de/album/6dVIqQ8qmQ5GBnJ9shOYGE?si=x");
        assert_eq!(
            parsed,
            Some(CatalogRef {
                kind: CatalogKind::Album,
                id: "6dVIqQ8qmQ5GBnJ9shOYGE".to_string(),
            })
        );
    }

    #[test]
    fn catalog_uri_forms() {
        let parsed = parse_catalog_ref("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M");
        assert_eq!(
            parsed,
            Some(CatalogRef {
                kind: CatalogKind::Playlist,
                id: "37i9dQZF1DXcBWIGoYBM5M".to_string(),
            })
        );
    }

    #[test]
    fn catalog_rejects_other_links() {
        assert!(parse_catalog_ref("https://open.spotify.com/artist/abc123").is_none());
        assert!(parse_catalog_ref("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(parse_catalog_ref("spotify:track:").is_none());
        assert!(parse_catalog_ref("not a url").is_none());
    }
}
