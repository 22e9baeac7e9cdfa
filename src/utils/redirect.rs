// src/utils/redirect.rs

use crate::utils::origin::{HTTP_SCHEMES, SiteOrigin};

/// Where navigation lands when a redirect target is rejected.
pub const DEFAULT_REDIRECT_FALLBACK: &str = "/";

/// Knobs on top of the host comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectPolicy {
    /// Also require `http`/`https` on absolute same-host targets.
    pub require_http_scheme: bool,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            require_http_scheme: true,
        }
    }
}

/// Guards client-side navigation against open redirects.
///
/// Accepts a target only when it is a same-document path (`/x`) or resolves
/// to the host of the current origin. Everything else, including anything
/// that fails to parse, is replaced with the fallback route.
#[derive(Debug, Clone)]
pub struct RedirectValidator {
    origin: SiteOrigin,
    fallback: String,
    policy: RedirectPolicy,
}

impl RedirectValidator {
    pub fn new(origin: SiteOrigin) -> Self {
        Self {
            origin,
            fallback: DEFAULT_REDIRECT_FALLBACK.to_string(),
            policy: RedirectPolicy::default(),
        }
    }

    /// Replaces the fallback route. It must itself be a local path, otherwise
    /// the default is kept.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        if is_local_path(&fallback) {
            self.fallback = fallback;
        } else {
            tracing::warn!("Ignoring non-local redirect fallback {:?}", fallback);
        }
        self
    }

    pub fn with_policy(mut self, policy: RedirectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns `candidate` unchanged when it is safe to navigate to, the
    /// fallback route otherwise.
    pub fn validate_redirect(&self, candidate: &str) -> String {
        if self.is_safe(candidate) {
            candidate.to_string()
        } else {
            self.fallback.clone()
        }
    }

    /// True when `validate_redirect` would hand `candidate` back unchanged.
    pub fn is_safe(&self, candidate: &str) -> bool {
        match leading_form(candidate) {
            Leading::LocalPath => return true,
            Leading::ProtocolRelative => {
                tracing::warn!("Rejected protocol-relative redirect {:?}", candidate);
                return false;
            }
            Leading::Empty => return false,
            Leading::Other => {}
        }

        let url = match self.origin.resolve(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Unparseable redirect target {:?}: {}", candidate, e);
                return false;
            }
        };

        if !self.origin.same_host(&url) {
            tracing::warn!(
                "Rejected redirect to foreign host {:?} (expected {})",
                url.host_str().unwrap_or_default(),
                self.origin.host()
            );
            return false;
        }
        if self.policy.require_http_scheme && !HTTP_SCHEMES.contains(&url.scheme()) {
            tracing::warn!("Rejected same-host redirect with scheme {}", url.scheme());
            return false;
        }
        true
    }
}

/// Validates `candidate` against `origin` with the default fallback and policy.
pub fn validate_redirect(origin: &SiteOrigin, candidate: &str) -> String {
    RedirectValidator::new(origin.clone()).validate_redirect(candidate)
}

enum Leading {
    Empty,
    /// `/x`
    LocalPath,
    /// `//x` or `/\x`
    ProtocolRelative,
    Other,
}

/// Classifies the first two characters. Tabs and newlines are skipped
/// since browsers drop them before resolving.
fn leading_form(candidate: &str) -> Leading {
    let mut chars = candidate
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'));

    match (chars.next(), chars.next()) {
        (None, _) => Leading::Empty,
        (Some('/'), Some('/' | '\\')) => Leading::ProtocolRelative,
        (Some('/'), _) => Leading::LocalPath,
        _ => Leading::Other,
    }
}

pub(crate) fn is_local_path(candidate: &str) -> bool {
    matches!(leading_form(candidate), Leading::LocalPath)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> RedirectValidator {
        RedirectValidator::new(SiteOrigin::parse("https://app.example.com").unwrap())
    }

    #[test]
    fn single_slash_paths_pass_through() {
        let v = validator();
        for path in ["/", "/foo", "/foo/bar", "/settings?tab=profile#avatar"] {
            assert_eq!(v.validate_redirect(path), path);
        }
    }

    #[test]
    fn protocol_relative_targets_fall_back() {
        let v = validator();
        for target in [
            "//evil.example",
            "//evil.example/path",
            "/\\evil.example",
            "\\\\evil.example",
            "/\t/evil.example",
            "//app.example.com/looks-local",
        ] {
            assert_eq!(v.validate_redirect(target), "/", "target {:?}", target);
        }
    }

    #[test]
    fn same_host_absolute_urls_pass_through() {
        let v = validator();
        let target = "https://app.example.com/dashboard?x=1";
        assert_eq!(v.validate_redirect(target), target);

        let upper = "https://APP.example.COM/dashboard";
        assert_eq!(v.validate_redirect(upper), upper);

        // Relative without a leading slash resolves onto the origin.
        assert_eq!(v.validate_redirect("dashboard"), "dashboard");
    }

    #[test]
    fn foreign_hosts_fall_back() {
        let v = validator();
        assert_eq!(v.validate_redirect("https://evil.example/"), "/");
        assert_eq!(v.validate_redirect("https://app.example.com.evil.example/"), "/");
        assert_eq!(v.validate_redirect("https://user@evil.example/"), "/");
    }

    #[test]
    fn unparseable_and_empty_fall_back() {
        let v = validator();
        for target in ["", "   ", "http://", "not a url", "https://[::1"] {
            assert_eq!(v.validate_redirect(target), "/", "target {:?}", target);
        }
    }

    #[test]
    fn script_schemes_fall_back() {
        let v = validator();
        assert_eq!(v.validate_redirect("javascript:alert(1)"), "/");
        assert_eq!(v.validate_redirect("data:text/html,<script>x</script>"), "/");
    }

    #[test]
    fn scheme_pinning_is_configurable() {
        let strict = validator();
        assert_eq!(strict.validate_redirect("ftp://app.example.com/file"), "/");

        let lax = validator().with_policy(RedirectPolicy {
            require_http_scheme: false,
        });
        assert_eq!(
            lax.validate_redirect("ftp://app.example.com/file"),
            "ftp://app.example.com/file"
        );
        assert_eq!(lax.validate_redirect("ftp://evil.example/file"), "/");
    }

    #[test]
    fn custom_fallback_must_be_local() {
        let v = validator().with_fallback("/home");
        assert_eq!(v.validate_redirect("//evil.example"), "/home");

        let v = validator().with_fallback("https://evil.example/");
        assert_eq!(v.fallback(), "/");
    }

    #[test]
    fn validation_is_idempotent() {
        let v = validator().with_fallback("/home");
        for target in [
            "/foo",
            "//evil.example",
            "https://app.example.com/x",
            "https://evil.example/x",
            "not a url",
            "",
        ] {
            let once = v.validate_redirect(target);
            assert_eq!(v.validate_redirect(&once), once);
        }
    }

    #[test]
    fn free_function_uses_defaults() {
        let origin = SiteOrigin::parse("https://app.example.com").unwrap();
        assert_eq!(validate_redirect(&origin, "/ok"), "/ok");
        assert_eq!(validate_redirect(&origin, "//evil.example"), "/");
    }
}
