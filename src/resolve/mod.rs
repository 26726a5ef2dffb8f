//!The derivation stages for the addressing components of a request.
//!
//!Each stage is a pure function over already resident strings:
//!
//! * [`target`][target] normalizes the request target from the raw
//!signals, handling proxies, rewrite engines and CGI setups.
//!
//! * [`base`][base] finds the base URL by comparing the public script path
//!with the request target, and derives the base path from it.
//!
//! * [`path_info`][path_info] subtracts the base URL from the request target.
//!
//!`Request` caches the results and keeps track of which ones need to be
//!derived again when an upstream value changes.
//!
//![target]: target/index.html
//![base]: base/index.html
//![path_info]: path_info/index.html

pub mod target;
pub mod base;
pub mod path_info;
