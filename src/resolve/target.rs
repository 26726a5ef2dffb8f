//!Request target detection.

use context::RawSignals;

///Detect the request target (path and optional query) from the raw
///signals.
///
///The signals are tried in this order:
///
/// 1. `UNENCODED_URL`, if a rewrite engine reported that it rewrote the URL.
///This preserves double slashes that IIS would otherwise collapse.
/// 2. `REQUEST_URI`, without the request's own `scheme://host` prefix if a
///proxy sent an absolute URI.
/// 3. `ORIG_PATH_INFO` and `QUERY_STRING`, for old CGI setups.
///
///`None` is returned if none of them are available.
///
///```
///use reqbase::context::RawSignals;
///use reqbase::resolve::target;
///
///let signals = RawSignals {
///    request_uri: Some("http://example.com/api/v1?x=1".to_owned()),
///    scheme_and_host: "http://example.com".to_owned(),
///    ..RawSignals::default()
///};
///
///assert_eq!(target::resolve(&signals), Some("/api/v1?x=1".to_owned()));
///```
pub fn resolve(raw: &RawSignals) -> Option<String> {
    if raw.url_rewritten {
        if let Some(ref url) = raw.unencoded_url {
            if !url.is_empty() {
                debug!("request target '{}' taken from UNENCODED_URL", url);
                return Some(url.clone());
            }
        }
    }

    if let Some(ref uri) = raw.request_uri {
        if has_host(&raw.scheme_and_host) && uri.starts_with(&raw.scheme_and_host) {
            let target = &uri[raw.scheme_and_host.len()..];
            debug!("request target '{}' taken from absolute REQUEST_URI '{}'", target, uri);
            return Some(target.to_owned());
        }

        debug!("request target '{}' taken from REQUEST_URI", uri);
        return Some(uri.clone());
    }

    if let Some(ref path_info) = raw.orig_path_info {
        let mut target = path_info.clone();
        match raw.query_string {
            Some(ref query) if !query.is_empty() => {
                target.push('?');
                target.push_str(query);
            },
            _ => {}
        }

        debug!("request target '{}' taken from ORIG_PATH_INFO", target);
        return Some(target);
    }

    debug!("no request target could be detected");
    None
}

//A `scheme://` prefix without a host would strip the host of any absolute URI.
fn has_host(scheme_and_host: &str) -> bool {
    match scheme_and_host.find("://") {
        Some(index) => index + 3 < scheme_and_host.len(),
        None => false
    }
}

///The query string of a request target, if it has one.
pub fn query_string(target: &str) -> Option<&str> {
    target.find('?').map(|index| &target[index + 1..])
}

#[cfg(test)]
mod test {
    use context::RawSignals;
    use super::{resolve, query_string};

    fn signals() -> RawSignals {
        RawSignals {
            scheme_and_host: "http://example.com".to_owned(),
            ..RawSignals::default()
        }
    }

    #[test]
    fn rewritten_url_wins() {
        let raw = RawSignals {
            url_rewritten: true,
            unencoded_url: Some("/a//b".to_owned()),
            request_uri: Some("/a/b".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/a//b".to_owned()));
    }

    #[test]
    fn empty_rewritten_url_is_ignored() {
        let raw = RawSignals {
            url_rewritten: true,
            unencoded_url: Some("".to_owned()),
            request_uri: Some("/a/b".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/a/b".to_owned()));
    }

    #[test]
    fn unencoded_url_needs_rewrite_flag() {
        let raw = RawSignals {
            unencoded_url: Some("/a//b".to_owned()),
            request_uri: Some("/a/b".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/a/b".to_owned()));
    }

    #[test]
    fn proxy_prefix_is_stripped() {
        let raw = RawSignals {
            request_uri: Some("http://example.com/api/v1?x=1".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/api/v1?x=1".to_owned()));
    }

    #[test]
    fn foreign_prefix_is_kept() {
        let raw = RawSignals {
            request_uri: Some("http://other.com/api".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("http://other.com/api".to_owned()));
    }

    #[test]
    fn absolute_uri_without_known_host_is_kept() {
        let raw = RawSignals {
            request_uri: Some("http://other.com/x".to_owned()),
            scheme_and_host: "http://".to_owned(),
            ..RawSignals::default()
        };
        assert_eq!(resolve(&raw), Some("http://other.com/x".to_owned()));
    }

    #[test]
    fn cgi_path_info() {
        let raw = RawSignals {
            orig_path_info: Some("/index.php/foo".to_owned()),
            query_string: Some("a=b".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/index.php/foo?a=b".to_owned()));

        let raw = RawSignals {
            orig_path_info: Some("/index.php/foo".to_owned()),
            query_string: Some("".to_owned()),
            ..signals()
        };
        assert_eq!(resolve(&raw), Some("/index.php/foo".to_owned()));
    }

    #[test]
    fn nothing_to_detect() {
        assert_eq!(resolve(&signals()), None);
    }

    #[test]
    fn query_strings() {
        assert_eq!(query_string("/a?b=c"), Some("b=c"));
        assert_eq!(query_string("/a?"), Some(""));
        assert_eq!(query_string("/a"), None);
    }
}
