//!Request header lookup in a CGI style server environment.

use std::borrow::Cow;

use unicase::UniCase;

use context::{HeaderSource, Parameters};
use error::{Error, Result};

///Convert a header name to its server environment form, without the `HTTP_`
///prefix.
///
///```
///use reqbase::header::server_key;
///
///assert_eq!(server_key("X-Requested-With"), "X_REQUESTED_WITH");
///```
pub fn server_key(name: &str) -> String {
    name.replace('-', "_").to_uppercase()
}

///Find a header value.
///
///The header is first looked up as `HTTP_<NAME>` in the server environment.
///`Content-*` headers are also looked up without the prefix, since that's
///where CGI puts them. The header source, if any, is asked last. Its names
///are first matched exactly and then without regard to case.
///
///An empty name is an error.
pub fn find<'a>(server: &'a Parameters, source: Option<&dyn HeaderSource>, name: &str) -> Result<Option<Cow<'a, str>>> {
    if name.is_empty() {
        return Err(Error::EmptyHeaderName);
    }

    let key = server_key(name);
    if let Some(value) = server.get(&format!("HTTP_{}", key)) {
        return Ok(Some(value.into()));
    }

    if key.starts_with("CONTENT_") {
        if let Some(value) = server.get(&key) {
            return Ok(Some(value.into()));
        }
    }

    if let Some(source) = source {
        let headers = source.headers();

        if let Some(&(_, ref value)) = headers.iter().find(|&&(ref header, _)| header == name) {
            return Ok(Some(value.clone().into()));
        }

        let name = UniCase::new(name);
        if let Some(&(_, ref value)) = headers.iter().find(|&&(ref header, _)| UniCase::new(&**header) == name) {
            return Ok(Some(value.clone().into()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod test {
    use context::{HeaderSource, Parameters};
    use error::Error;
    use super::find;

    fn server() -> Parameters {
        vec![
            ("HTTP_X_REQUESTED_WITH", "XMLHttpRequest"),
            ("CONTENT_TYPE", "text/plain"),
            ("HTTP_CONTENT_LENGTH", "5"),
        ].into_iter().collect()
    }

    fn apache() -> Vec<(String, String)> {
        vec![
            ("Authorization".to_owned(), "Basic abc".to_owned()),
            ("x-custom".to_owned(), "lower".to_owned()),
        ]
    }

    #[test]
    fn prefixed_headers() {
        let server = server();
        assert_eq!(find(&server, None, "X-Requested-With").unwrap().as_ref().map(|v| &**v), Some("XMLHttpRequest"));
        assert_eq!(find(&server, None, "x-requested-with").unwrap().as_ref().map(|v| &**v), Some("XMLHttpRequest"));
    }

    #[test]
    fn content_headers() {
        let server = server();
        assert_eq!(find(&server, None, "Content-Type").unwrap().as_ref().map(|v| &**v), Some("text/plain"));
        assert_eq!(find(&server, None, "Content-Length").unwrap().as_ref().map(|v| &**v), Some("5"));
    }

    #[test]
    fn unprefixed_non_content_headers_are_ignored() {
        let mut server = server();
        server.insert("ACCEPT", "text/html");
        assert_eq!(find(&server, None, "Accept").unwrap(), None);
    }

    #[test]
    fn empty_name() {
        assert_eq!(find(&server(), None, ""), Err(Error::EmptyHeaderName));
    }

    #[test]
    fn header_source_is_last() {
        let server = server();
        let source = apache;
        let source: Option<&dyn HeaderSource> = Some(&source);
        assert_eq!(find(&server, source, "Authorization").unwrap().as_ref().map(|v| &**v), Some("Basic abc"));
        assert_eq!(find(&server, source, "authorization").unwrap().as_ref().map(|v| &**v), Some("Basic abc"));
        assert_eq!(find(&server, source, "X-Custom").unwrap().as_ref().map(|v| &**v), Some("lower"));
        assert_eq!(find(&server, source, "X-Missing").unwrap(), None);
    }
}
