//!Derives the addressing components of a web request from raw, CGI style
//!transport signals. The main purpose of Reqbase is to answer "what path was
//!requested, relative to the application" and "which parameters apply",
//!without any configuration, no matter if the application sits behind a
//!proxy, a rewrite engine or an old CGI wrapper.
//!
//!A [`Request`][request] is created from an [`Environment`][environment],
//!which owns the query, body, cookie, server and process stores of one
//!request:
//!
//!```
//!use reqbase::Request;
//!use reqbase::context::Environment;
//!
//!let mut environment = Environment::default();
//!environment.server.insert("REQUEST_URI", "/shop/checkout?step=2");
//!environment.server.insert("SCRIPT_FILENAME", "/var/www/shop/index.php");
//!environment.server.insert("SCRIPT_NAME", "/shop/index.php");
//!
//!let mut request = Request::from_env(environment);
//!
//!//The rewrite engine hides `index.php`, so the directory is the base
//!assert_eq!(request.base_url(), "/shop");
//!assert_eq!(request.path_info(), "/checkout");
//!
//!//Explicitly set parameters win over the query and body variables
//!request.set_param("step", "3".to_owned());
//!assert_eq!(request.param("step"), Some("3"));
//!assert_eq!(request.query_value("step"), Some("2"));
//!```
//!
//![request]: request/struct.Request.html
//![environment]: context/struct.Environment.html

#![crate_name = "reqbase"]

#![crate_type = "rlib"]

#![cfg_attr(feature = "strict", deny(missing_docs))]
#![cfg_attr(feature = "strict", deny(warnings))]

extern crate url;
extern crate percent_encoding;
extern crate hyper;
extern crate unicase;
#[macro_use]
extern crate log;

#[cfg(test)]
extern crate env_logger;

pub use hyper::Method;

pub use self::request::Request;
pub use self::context::{Environment, Parameters, RawSignals};
pub use self::config::{Config, PathStyle};
pub use self::params::{ParamSource, ParamSources};
pub use self::error::{Error, Result};

mod utils;
mod cache;

pub mod request;
pub mod context;
pub mod config;
pub mod params;
pub mod resolve;
pub mod header;
pub mod error;
