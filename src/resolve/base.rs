//!Base URL and base path detection.
//!
//!The base URL is the part of the request target that leads to the entry
//!script, such as `/shop/index.php` in `/shop/index.php/checkout`, or
//!`/shop` when a rewrite engine hides the script name. It's found without
//!any configuration, by comparing the public script path with the request
//!target.

use config::PathStyle;
use context::RawSignals;
use utils::{basename, dirname, find_after_start, strip_query};

///Find the public path of the entry script.
///
///The first of `SCRIPT_NAME`, `PHP_SELF` and `ORIG_SCRIPT_NAME` that ends
///with the same file name as `SCRIPT_FILENAME` is used. If none of them do,
///`SCRIPT_FILENAME` is walked backwards, one segment at a time, for as long
///as the collected path appears inside `PHP_SELF` after its start.
///
///```
///use reqbase::context::RawSignals;
///use reqbase::resolve::base;
///
///let signals = RawSignals {
///    script_filename: Some("/var/www/shop/index.php".to_owned()),
///    php_self: Some("/shop/index.php".to_owned()),
///    ..RawSignals::default()
///};
///
///assert_eq!(base::script_path(&signals), "/shop/index.php");
///```
pub fn script_path(raw: &RawSignals) -> String {
    let file = raw.script_filename.as_ref().map(|s| &**s).unwrap_or("");
    let filename = basename(file);

    let candidates = [&raw.script_name, &raw.php_self, &raw.orig_script_name];
    for candidate in candidates.iter() {
        if let Some(ref path) = **candidate {
            if basename(path) == filename {
                return path.clone();
            }
        }
    }

    let php_self = raw.php_self.as_ref().map(|s| &**s).unwrap_or("");
    let segments: Vec<&str> = file.trim_matches('/').split('/').rev().collect();
    let mut path = String::new();

    for (index, segment) in segments.iter().enumerate() {
        path = format!("/{}{}", segment, path);

        if index + 1 >= segments.len() || find_after_start(php_self, &path).is_none() {
            break;
        }
    }

    trace!("script path '{}' found by backtracking '{}'", path, file);
    path
}

///Detect the base URL of a request target. The result never ends with `/`
///and the root is represented by an empty string.
///
///```
///use reqbase::context::RawSignals;
///use reqbase::resolve::base;
///
///let signals = RawSignals {
///    script_filename: Some("/var/www/shop/index.php".to_owned()),
///    script_name: Some("/shop/index.php".to_owned()),
///    ..RawSignals::default()
///};
///
///assert_eq!(base::resolve("/shop/index.php/checkout?x=1", &signals), "/shop/index.php");
///assert_eq!(base::resolve("/shop/checkout", &signals), "/shop");
///assert_eq!(base::resolve("/checkout", &signals), "");
///```
pub fn resolve(target: &str, raw: &RawSignals) -> String {
    let script = script_path(raw);
    let base = match_target(target, script);
    debug!("base URL '{}' detected for request target '{}'", base, target);
    base
}

fn match_target(target: &str, script: String) -> String {
    if target.starts_with(&*script) {
        return trim(&script);
    }

    let directory = dirname(&script);
    if target.starts_with(&*directory) {
        return trim(&directory);
    }

    let name = basename(&script);
    if name.is_empty() || find_after_start(strip_query(target), name).is_none() {
        return String::new();
    }

    //A rewrite engine may have put something in front of the script path.
    if target.len() >= script.len() {
        if let Some(index) = find_after_start(target, &script) {
            return trim(&target[..index + script.len()]);
        }
    }

    trim(&script)
}

///Derive the base path from a decoded base URL. The script file name is
///removed if the base URL ends with it, leaving the directory.
///
///```
///use reqbase::config::PathStyle;
///use reqbase::resolve::base;
///
///assert_eq!(base::base_path("/shop/index.php", "index.php", PathStyle::Unix), "/shop");
///assert_eq!(base::base_path("/shop", "index.php", PathStyle::Unix), "/shop");
///assert_eq!(base::base_path("", "index.php", PathStyle::Unix), "");
///```
pub fn base_path(base_url: &str, script_filename: &str, style: PathStyle) -> String {
    if base_url.is_empty() {
        return String::new();
    }

    if basename(base_url) == basename(script_filename) {
        normalize_path(&dirname(base_url), style)
    } else {
        normalize_path(base_url, style)
    }
}

///Normalize a base path for the given path style and remove any trailing
///`/`.
pub fn normalize_path(path: &str, style: PathStyle) -> String {
    match style {
        PathStyle::Windows => trim(&path.replace('\\', "/")),
        PathStyle::Unix => trim(path)
    }
}

///Remove trailing slashes.
pub fn trim(path: &str) -> String {
    path.trim_end_matches('/').to_owned()
}
