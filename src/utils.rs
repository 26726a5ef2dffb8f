use std::borrow::Cow;

use percent_encoding::{percent_decode, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use context::Parameters;

//Everything except `-`, `_` and `.` among the non-alphanumerics is escaped.
const FORM: &'static AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

///Parse a query string and merge the result into existing `Parameters`.
///Later duplicates overwrite earlier ones and empty pairs are skipped.
pub fn extend_parameters(parameters: &mut Parameters, source: &str) {
    for parameter in source.split('&') {
        if parameter.is_empty() {
            continue;
        }

        let mut parts = parameter.splitn(2, '=');

        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) => {
                parameters.insert(url_decode(name), url_decode(value));
            },
            (Some(name), None) => {
                parameters.insert(url_decode(name), String::new());
            },
            _ => {}
        }
    }
}

///Decode a form encoded string, where `+` means space. Invalid UTF-8 is
///replaced.
pub fn url_decode(source: &str) -> String {
    let source = source.replace('+', " ");
    percent_decode(source.as_bytes()).decode_utf8_lossy().into_owned()
}

///Form encode a string. Alphanumerics and `-_.` are kept, spaces become `+`
///and everything else is percent encoded.
pub fn url_encode(source: &str) -> String {
    utf8_percent_encode(source, FORM).to_string().replace("%20", "+")
}

///The last component of a path, ignoring trailing slashes.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed
    }
}

///Everything but the last component of a path. A path without any slashes
///has the parent `.` and the root is its own parent.
pub fn dirname(path: &str) -> Cow<str> {
    if path.is_empty() {
        return "".into();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".into();
    }

    match trimmed.rfind('/') {
        Some(index) => {
            let parent = trimmed[..index].trim_end_matches('/');
            if parent.is_empty() {
                "/".into()
            } else {
                parent.into()
            }
        },
        None => ".".into()
    }
}

///Find `needle` in `haystack`, but only if it's found after the first
///byte. An empty needle never matches.
pub fn find_after_start(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    haystack.find(needle).and_then(|index| if index > 0 { Some(index) } else { None })
}

///The part of a request target before the query string.
pub fn strip_query(target: &str) -> &str {
    match target.find('?') {
        Some(index) => &target[..index],
        None => target
    }
}

#[cfg(test)]
mod test {
    use context::Parameters;
    use super::{extend_parameters, url_decode, url_encode, basename, dirname, find_after_start, strip_query};

    fn parse_parameters(source: &str) -> Parameters {
        let mut parameters = Parameters::new();
        extend_parameters(&mut parameters, source);
        parameters
    }

    #[test]
    fn parsing_parameters() {
        let parameters = parse_parameters("a=1&aa=2&ab=202");
        assert_eq!(parameters.get("a"), Some("1"));
        assert_eq!(parameters.get("aa"), Some("2"));
        assert_eq!(parameters.get("ab"), Some("202"));
    }

    #[test]
    fn parsing_parameters_with_plus() {
        let parameters = parse_parameters("a=1&aa=2+%2B+extra+meat&ab=202+fifth+avenue");
        assert_eq!(parameters.get("a"), Some("1"));
        assert_eq!(parameters.get("aa"), Some("2 + extra meat"));
        assert_eq!(parameters.get("ab"), Some("202 fifth avenue"));
    }

    #[test]
    fn parsing_strange_parameters() {
        let parameters = parse_parameters("a=1=2&=2&&ab=&flag");
        assert_eq!(parameters.get("a"), Some("1=2"));
        assert_eq!(parameters.get(""), Some("2"));
        assert_eq!(parameters.get("ab"), Some(""));
        assert_eq!(parameters.get("flag"), Some(""));
        assert_eq!(parameters.len(), 4);
    }

    #[test]
    fn later_duplicates_win() {
        let parameters = parse_parameters("x=1&x=2");
        assert_eq!(parameters.get("x"), Some("2"));
    }

    #[test]
    fn decoding() {
        assert_eq!(url_decode("/my+shop/caf%C3%A9"), "/my shop/café");
        assert_eq!(url_decode("%ZZ"), "%ZZ");
        assert_eq!(url_decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn encoding() {
        assert_eq!(url_encode("/my shop/a-b_c.d"), "%2Fmy+shop%2Fa-b_c.d");
        assert_eq!(url_encode("100%"), "100%25");
        assert_eq!(url_encode(""), "");
    }

    #[test]
    fn basenames() {
        assert_eq!(basename("/var/www/index.php"), "index.php");
        assert_eq!(basename("index.php"), "index.php");
        assert_eq!(basename("/shop/"), "shop");
        assert_eq!(basename("/"), "");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn dirnames() {
        assert_eq!(dirname("/shop/index.php"), "/shop");
        assert_eq!(dirname("/index.php"), "/");
        assert_eq!(dirname("index.php"), ".");
        assert_eq!(dirname("/a//b"), "/a");
        assert_eq!(dirname("/shop/"), "/");
        assert_eq!(dirname("///"), "/");
        assert_eq!(dirname(""), "");
    }

    #[test]
    fn finding_after_start() {
        assert_eq!(find_after_start("/a/b", "/b"), Some(2));
        assert_eq!(find_after_start("/a/b", "/a"), None);
        assert_eq!(find_after_start("/a/b", "/c"), None);
        assert_eq!(find_after_start("/a/b", ""), None);
    }

    #[test]
    fn stripping_query() {
        assert_eq!(strip_query("/a?b=c?d"), "/a");
        assert_eq!(strip_query("/a"), "/a");
        assert_eq!(strip_query("?x"), "");
    }
}
