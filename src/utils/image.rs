// src/utils/image.rs

use crate::utils::origin::{HTTP_SCHEMES, parse_absolute};

/// Shown in place of any image source that fails the checks below.
pub const DEFAULT_IMAGE_PLACEHOLDER: &str = "/images/placeholder.png";

/// File extensions an image `src` path may end with (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

/// Sanitizes image sources before they are rendered as `src` attributes.
///
/// Only fully qualified `http`/`https` URLs whose path ends in an allow-listed
/// image extension survive. The host is not restricted.
#[derive(Debug, Clone)]
pub struct ImageSanitizer {
    placeholder: String,
}

impl Default for ImageSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_PLACEHOLDER)
    }
}

impl ImageSanitizer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Returns `""` for a missing source, the source itself when it passes,
    /// and the placeholder otherwise.
    pub fn sanitize_image_url(&self, candidate: Option<&str>) -> String {
        match candidate {
            None | Some("") => String::new(),
            Some(src) if self.is_allowed(src) => src.to_string(),
            Some(_) => self.placeholder.clone(),
        }
    }

    /// True when `candidate` would be returned unchanged.
    pub fn is_allowed(&self, candidate: &str) -> bool {
        let url = match parse_absolute(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Unparseable image source {:?}: {}", candidate, e);
                return false;
            }
        };

        if !HTTP_SCHEMES.contains(&url.scheme()) {
            tracing::warn!("Rejected image source with scheme {}", url.scheme());
            return false;
        }

        // `path()` excludes query and fragment.
        let path = url.path().to_ascii_lowercase();
        if !IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            tracing::warn!("Rejected image source with path {:?}", url.path());
            return false;
        }
        true
    }
}

/// Sanitizes with the default placeholder.
pub fn sanitize_image_url(candidate: Option<&str>) -> String {
    ImageSanitizer::default().sanitize_image_url(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_empty() {
        assert_eq!(sanitize_image_url(None), "");
        assert_eq!(sanitize_image_url(Some("")), "");
    }

    #[test]
    fn allowed_extensions_pass_through() {
        for src in [
            "https://cdn.example.com/pic.png",
            "http://cdn.example.com/a/b/photo.jpg",
            "https://cdn.example.com/photo.JPEG",
            "https://cdn.example.com/anim.gif?v=3",
            "https://cdn.example.com/hero.webp#frag",
            "https://cdn.example.com/logo.Svg",
        ] {
            assert_eq!(sanitize_image_url(Some(src)), src, "src {:?}", src);
        }
    }

    #[test]
    fn disallowed_extensions_get_placeholder() {
        for src in [
            "https://cdn.example.com/pic.exe",
            "https://cdn.example.com/pic",
            "https://cdn.example.com/",
            "https://cdn.example.com/run.exe?fake=.png",
            "https://cdn.example.com/run.php#.jpg",
            "https://cdn.example.com/pic.png.html",
        ] {
            assert_eq!(
                sanitize_image_url(Some(src)),
                DEFAULT_IMAGE_PLACEHOLDER,
                "src {:?}",
                src
            );
        }
    }

    #[test]
    fn disallowed_schemes_get_placeholder() {
        for src in [
            "javascript:alert(1)",
            "javascript:alert(1)//x.png",
            "data:image/png;base64,iVBORw0KGgo=",
            "ftp://cdn.example.com/pic.png",
            "file:///etc/passwd.png",
        ] {
            assert_eq!(
                sanitize_image_url(Some(src)),
                DEFAULT_IMAGE_PLACEHOLDER,
                "src {:?}",
                src
            );
        }
    }

    #[test]
    fn unparseable_or_relative_gets_placeholder() {
        for src in ["not a url", "http://", "/images/pic.png", "pic.png", " "] {
            assert_eq!(
                sanitize_image_url(Some(src)),
                DEFAULT_IMAGE_PLACEHOLDER,
                "src {:?}",
                src
            );
        }
    }

    #[test]
    fn host_is_not_restricted() {
        let src = "https://anything.example.net/u/42/avatar.png";
        assert_eq!(sanitize_image_url(Some(src)), src);
    }

    #[test]
    fn custom_placeholder_and_idempotence() {
        let s = ImageSanitizer::new("/static/no-image.svg");
        assert_eq!(s.sanitize_image_url(Some("https://x.example/a.exe")), "/static/no-image.svg");

        for src in [
            None,
            Some(""),
            Some("https://cdn.example.com/pic.png"),
            Some("https://cdn.example.com/pic.exe"),
            Some("javascript:alert(1)"),
        ] {
            let once = s.sanitize_image_url(src);
            assert_eq!(s.sanitize_image_url(Some(&once)), once);
        }
    }
}
