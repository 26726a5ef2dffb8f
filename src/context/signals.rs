use context::Parameters;

///The `http` scheme.
pub const SCHEME_HTTP: &'static str = "http";
///The `https` scheme.
pub const SCHEME_HTTPS: &'static str = "https";

///A snapshot of the transport facts that the request target and base URL
///are derived from.
///
///These are read from the server environment with `RawSignals::from_server`,
///using the conventional CGI variable names, but can just as well be
///assembled by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSignals {
    ///`REQUEST_URI`: the request target as sent by the client or proxy.
    pub request_uri: Option<String>,

    ///`SCRIPT_FILENAME`: the file system path of the entry script.
    pub script_filename: Option<String>,

    ///`SCRIPT_NAME`: the public path of the entry script.
    pub script_name: Option<String>,

    ///`PHP_SELF`: the public path of the script, including path info.
    pub php_self: Option<String>,

    ///`ORIG_SCRIPT_NAME`: the script name before a CGI wrapper changed it.
    pub orig_script_name: Option<String>,

    ///`ORIG_PATH_INFO`: path info reported by CGI setups without `REQUEST_URI`.
    pub orig_path_info: Option<String>,

    ///`QUERY_STRING`: the raw query string.
    pub query_string: Option<String>,

    ///`IIS_WasUrlRewritten`: whether a rewrite engine changed the URL.
    pub url_rewritten: bool,

    ///`UNENCODED_URL`: the original URL before the rewrite engine touched it.
    pub unencoded_url: Option<String>,

    ///The request's own `scheme://host`, such as `http://example.com`.
    pub scheme_and_host: String,
}

impl RawSignals {
    ///Read the signals from a server environment.
    ///
    ///```
    ///use reqbase::context::{Parameters, RawSignals};
    ///
    ///let mut server = Parameters::new();
    ///server.insert("REQUEST_URI", "/index.php?a=b");
    ///server.insert("HTTP_HOST", "example.com");
    ///server.insert("HTTPS", "on");
    ///
    ///let signals = RawSignals::from_server(&server);
    ///assert_eq!(signals.request_uri.as_ref().map(|s| &**s), Some("/index.php?a=b"));
    ///assert_eq!(signals.scheme_and_host, "https://example.com");
    ///```
    pub fn from_server(server: &Parameters) -> RawSignals {
        let owned = |key: &str| server.get(key).map(|value| value.to_owned());

        RawSignals {
            request_uri: owned("REQUEST_URI"),
            script_filename: owned("SCRIPT_FILENAME"),
            script_name: owned("SCRIPT_NAME"),
            php_self: owned("PHP_SELF"),
            orig_script_name: owned("ORIG_SCRIPT_NAME"),
            orig_path_info: owned("ORIG_PATH_INFO"),
            query_string: owned("QUERY_STRING"),
            url_rewritten: server.get("IIS_WasUrlRewritten") == Some("1"),
            unencoded_url: owned("UNENCODED_URL"),
            scheme_and_host: format!("{}://{}", scheme(server), http_host(server)),
        }
    }
}

///The request scheme. It's `https` if the server reports `HTTPS=on`, and
///`http` otherwise.
pub fn scheme(server: &Parameters) -> &'static str {
    if server.get("HTTPS") == Some("on") {
        SCHEME_HTTPS
    } else {
        SCHEME_HTTP
    }
}

///The requested host.
///
///`HTTP_HOST` is used when it's set. Otherwise, the host is built from
///`SERVER_NAME` and `SERVER_PORT`, where the port is left out if it's the
///default for the scheme. An empty string is returned if neither is
///available.
pub fn http_host(server: &Parameters) -> String {
    match server.get("HTTP_HOST") {
        Some(host) if !host.is_empty() => return host.to_owned(),
        _ => {}
    }

    let name = match server.get("SERVER_NAME") {
        Some(name) => name,
        None => return String::new()
    };

    let port = server.get("SERVER_PORT").unwrap_or("");
    let default_port = match scheme(server) {
        SCHEME_HTTPS => "443",
        _ => "80"
    };

    if port == default_port {
        name.to_owned()
    } else {
        format!("{}:{}", name, port)
    }
}

#[cfg(test)]
mod test {
    use context::Parameters;
    use super::{RawSignals, scheme, http_host};

    fn server(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn http_host_header_wins() {
        let server = server(&[("HTTP_HOST", "example.com"), ("SERVER_NAME", "internal"), ("SERVER_PORT", "8080")]);
        assert_eq!(http_host(&server), "example.com");
    }

    #[test]
    fn default_ports_are_hidden() {
        assert_eq!(http_host(&server(&[("SERVER_NAME", "example.com"), ("SERVER_PORT", "80")])), "example.com");
        assert_eq!(http_host(&server(&[("SERVER_NAME", "example.com"), ("SERVER_PORT", "443"), ("HTTPS", "on")])), "example.com");
    }

    #[test]
    fn other_ports_are_shown() {
        assert_eq!(http_host(&server(&[("SERVER_NAME", "example.com"), ("SERVER_PORT", "8080")])), "example.com:8080");
        assert_eq!(http_host(&server(&[("SERVER_NAME", "example.com"), ("SERVER_PORT", "80"), ("HTTPS", "on")])), "example.com:80");
    }

    #[test]
    fn empty_host_header_is_ignored() {
        assert_eq!(http_host(&server(&[("HTTP_HOST", ""), ("SERVER_NAME", "example.com"), ("SERVER_PORT", "80")])), "example.com");
        assert_eq!(http_host(&server(&[("HTTP_HOST", "")])), "");
    }

    #[test]
    fn scheme_from_https_flag() {
        assert_eq!(scheme(&server(&[("HTTPS", "on")])), "https");
        assert_eq!(scheme(&server(&[("HTTPS", "off")])), "http");
        assert_eq!(scheme(&server(&[])), "http");
    }

    #[test]
    fn rewrite_flag_needs_one() {
        let signals = RawSignals::from_server(&server(&[("IIS_WasUrlRewritten", "1"), ("UNENCODED_URL", "/a//b")]));
        assert!(signals.url_rewritten);
        assert_eq!(signals.unencoded_url, Some("/a//b".to_owned()));

        let signals = RawSignals::from_server(&server(&[("IIS_WasUrlRewritten", "0")]));
        assert!(!signals.url_rewritten);
        assert_eq!(signals.scheme_and_host, "http://");
    }
}
