//!Path info derivation.

use utils::{strip_query, url_decode, url_encode};

///Subtract the base URL from the path of a request target.
///
///The raw, the decoded and the form encoded base URL are tried as prefixes,
///in that order. The whole path is returned if none of them match, or if
///the base URL is empty.
///
///```
///use reqbase::resolve::path_info;
///
///assert_eq!(path_info::resolve("/shop/index.php/checkout?x=1", "/shop/index.php"), "/checkout");
///assert_eq!(path_info::resolve("/checkout?x=1", ""), "/checkout");
///```
pub fn resolve(target: &str, base_url: &str) -> String {
    let path = strip_query(target);

    if !base_url.is_empty() {
        let decoded = url_decode(base_url);
        let encoded = url_encode(base_url);

        for prefix in &[base_url, &*decoded, &*encoded] {
            if path.starts_with(prefix) {
                let path_info = &path[prefix.len()..];
                trace!("path info '{}' found after base URL '{}'", path_info, prefix);
                return path_info.to_owned();
            }
        }
    }

    trace!("no base URL in '{}', using the whole path as path info", path);
    path.to_owned()
}

#[cfg(test)]
mod test {
    use super::resolve;

    #[test]
    fn raw_prefix() {
        assert_eq!(resolve("/shop/index.php/checkout?x=1", "/shop/index.php"), "/checkout");
        assert_eq!(resolve("/shop/index.php", "/shop/index.php"), "");
    }

    #[test]
    fn decoded_prefix() {
        assert_eq!(resolve("/my shop/checkout", "/my%20shop"), "/checkout");
    }

    #[test]
    fn encoded_prefix() {
        assert_eq!(resolve("%2Fshop/checkout", "/shop"), "/checkout");
    }

    #[test]
    fn no_relation() {
        assert_eq!(resolve("/other/checkout?x=1", "/shop"), "/other/checkout");
    }

    #[test]
    fn empty_base_or_target() {
        assert_eq!(resolve("/checkout?x=1", ""), "/checkout");
        assert_eq!(resolve("", ""), "");
        assert_eq!(resolve("", "/shop"), "");
    }

    #[test]
    fn reconstructs_target_path() {
        let target = "/shop/index.php/a/b?c=d";
        let base = "/shop/index.php";
        assert_eq!(format!("{}{}", base, resolve(target, base)), "/shop/index.php/a/b");
    }
}
