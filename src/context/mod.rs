//!The per-request environment and the raw signals derived from it.
//!
//!#Environment
//!
//!An [`Environment`][environment] owns every transport store of a single
//!request: query and body variables, cookies, the server environment (CGI
//!style variables like `REQUEST_URI` and `HTTP_HOST`) and the process
//!environment. It may also carry a reader for the raw request body and a
//![`HeaderSource`][header_source] for hosts that can enumerate the original
//!request headers.
//!
//!```
//!use reqbase::context::Environment;
//!
//!let mut environment = Environment::default();
//!environment.server.insert("REQUEST_URI", "/shop/index.php/checkout?x=1");
//!environment.server.insert("SCRIPT_FILENAME", "/var/www/shop/index.php");
//!environment.server.insert("SCRIPT_NAME", "/shop/index.php");
//!environment.query.insert("x", "1");
//!```
//!
//!#Raw Signals
//!
//!The parts of the server environment that the request target and base URL
//!are derived from are collected in [`RawSignals`][raw_signals].
//!
//![environment]: struct.Environment.html
//![header_source]: trait.HeaderSource.html
//![raw_signals]: struct.RawSignals.html

use std::env;
use std::fmt;
use std::io::Read;

mod parameters;
pub use self::parameters::Parameters;

mod signals;
pub use self::signals::{RawSignals, scheme, http_host, SCHEME_HTTP, SCHEME_HTTPS};

///A host capability for enumerating the original request headers.
///
///Some servers hide headers, like `Authorization`, from the server
///environment. This is used as the last resort when looking up headers.
pub trait HeaderSource {
    ///All request headers, with their original names.
    fn headers(&self) -> Vec<(String, String)>;
}

impl<F: Fn() -> Vec<(String, String)>> HeaderSource for F {
    fn headers(&self) -> Vec<(String, String)> {
        self()
    }
}

///The transport stores of a single request.
#[derive(Default)]
pub struct Environment {
    ///Query variables.
    pub query: Parameters,

    ///Body variables, such as decoded form data.
    pub body: Parameters,

    ///Cookies.
    pub cookies: Parameters,

    ///The server environment, with CGI style names.
    pub server: Parameters,

    ///The process environment.
    pub env: Parameters,

    ///A reader for the raw request body. It's read at most once.
    pub body_reader: Option<Box<dyn Read>>,

    ///A way to enumerate the original request headers, if the host has one.
    pub header_source: Option<Box<dyn HeaderSource>>,
}

impl Environment {
    ///Create an empty environment where the process store is filled with
    ///the current process environment variables. Variables that are not
    ///valid unicode are skipped.
    pub fn from_process() -> Environment {
        Environment {
            env: env::vars_os()
                .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                    (Ok(key), Ok(value)) => Some((key, value)),
                    _ => None
                })
                .collect(),
            ..Environment::default()
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("query", &self.query)
            .field("body", &self.body)
            .field("cookies", &self.cookies)
            .field("server", &self.server)
            .field("env", &self.env)
            .field("body_reader", &self.body_reader.is_some())
            .field("header_source", &self.header_source.is_some())
            .finish()
    }
}
