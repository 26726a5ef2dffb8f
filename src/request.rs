//!The request object and its lookup chains.

use std::borrow::Cow;
use std::io::Read;

use hyper::Method;
use url::Url;

use cache::Derived;
use config::Config;
use context::{self, Environment, Parameters, RawSignals, SCHEME_HTTPS};
use error::{Error, Result};
use header;
use params::{ParamSources, ParameterResolver};
use resolve::{base, path_info, target};
use utils;

///The addressing components and parameters of a single request.
///
///A `Request` owns the transport stores of one request and derives the
///request target, base URL, base path and path info from them. The derived
///values are computed when they are first needed and cached. Changing one of
///them, using the setters, drops every cached value that was derived from
///it, while explicitly set values are kept.
///
///```
///use reqbase::Request;
///use reqbase::context::Environment;
///
///let mut environment = Environment::default();
///environment.server.insert("REQUEST_URI", "/shop/index.php/checkout?x=1");
///environment.server.insert("SCRIPT_FILENAME", "/var/www/shop/index.php");
///environment.server.insert("SCRIPT_NAME", "/shop/index.php");
///
///let request = Request::from_env(environment);
///assert_eq!(request.request_uri(), Some("/shop/index.php/checkout?x=1"));
///assert_eq!(request.base_url(), "/shop/index.php");
///assert_eq!(request.base_path(), "/shop");
///assert_eq!(request.path_info(), "/checkout");
///assert_eq!(request.query_value("x"), Some("1"));
///```
///
///A `Request` is not `Sync`, since the caches are not synchronized. It's
///meant to live and die with the request it represents.
pub struct Request {
    environment: Environment,
    config: Config,
    params: Parameters,

    request_uri: Option<String>,
    base_url: Derived,
    base_path: Derived,
    path_info: Derived,
    raw_body: Option<Option<Vec<u8>>>,
}

impl Request {
    ///Create a request from an environment, using the given configuration.
    ///The request target is detected right away.
    pub fn new(environment: Environment, config: Config) -> Request {
        let mut request = Request {
            environment: environment,
            config: config,
            params: Parameters::new(),
            request_uri: None,
            base_url: Derived::new(),
            base_path: Derived::new(),
            path_info: Derived::new(),
            raw_body: None,
        };

        request.set_request_uri(None);
        request
    }

    ///Create a request from an environment, using the default
    ///configuration.
    pub fn from_env(environment: Environment) -> Request {
        Request::new(environment, Config::default())
    }

    ///Create a request for an absolute `http` or `https` URI. The path and
    ///query of the URI becomes the request target, and the query variables
    ///are added to the query store.
    ///
    ///```
    ///use reqbase::Request;
    ///
    ///let request = Request::from_uri("http://example.com/news/today?page=2").unwrap();
    ///assert_eq!(request.request_uri(), Some("/news/today?page=2"));
    ///assert_eq!(request.query_value("page"), Some("2"));
    ///
    ///assert!(Request::from_uri("not a uri").is_err());
    ///```
    pub fn from_uri(uri: &str) -> Result<Request> {
        let url = Url::parse(uri).map_err(|e| Error::InvalidUri {
            uri: uri.to_owned(),
            reason: e.to_string()
        })?;

        match url.scheme() {
            "http" | "https" => {},
            scheme => return Err(Error::InvalidUri {
                uri: uri.to_owned(),
                reason: format!("unsupported scheme '{}'", scheme)
            })
        }

        let mut target = url.path().to_owned();
        match url.query() {
            Some(query) if !query.is_empty() => {
                target.push('?');
                target.push_str(query);
            },
            _ => {}
        }

        let mut request = Request::from_env(Environment::default());
        request.set_request_uri(Some(&target));
        Ok(request)
    }

    ///The configuration of this request.
    pub fn config(&self) -> &Config {
        &self.config
    }

    ///The transport facts the derived values are based on, as they are in
    ///the server store right now.
    pub fn signals(&self) -> RawSignals {
        RawSignals::from_server(&self.environment.server)
    }

    ///Set the request target, or detect it from the server environment if
    ///`request_uri` is `None`. An undetectable target leaves the current one
    ///as it is.
    ///
    ///Query variables in the new target are added to the query store. The
    ///detected base URL, base path and path info will be derived again on
    ///their next access.
    pub fn set_request_uri(&mut self, request_uri: Option<&str>) -> &mut Request {
        let request_uri = match request_uri {
            Some(request_uri) => request_uri.to_owned(),
            None => match target::resolve(&self.signals()) {
                Some(request_uri) => request_uri,
                None => return self
            }
        };

        if let Some(query) = target::query_string(&request_uri) {
            utils::extend_parameters(&mut self.environment.query, query);
        }

        debug!("request target set to '{}'", request_uri);
        self.request_uri = Some(request_uri);

        self.base_url.invalidate();
        self.base_path.invalidate();
        self.path_info.invalidate();

        self
    }

    ///The request target, including the query string, if one is known.
    pub fn request_uri(&self) -> Option<&str> {
        self.request_uri.as_ref().map(|uri| &**uri)
    }

    ///Set the base URL, or let it be detected on the next access if
    ///`base_url` is `None`. Any trailing `/` is removed.
    ///
    ///The detected base path and path info will be derived again on their
    ///next access.
    pub fn set_base_url(&mut self, base_url: Option<&str>) -> &mut Request {
        match base_url {
            Some(base_url) => self.base_url.set(base::trim(base_url)),
            None => self.base_url.clear()
        }

        self.base_path.invalidate();
        self.path_info.invalidate();

        self
    }

    ///The URL decoded base URL.
    pub fn base_url(&self) -> String {
        utils::url_decode(&self.base_url_raw())
    }

    ///The base URL as it appears in the request target.
    pub fn base_url_raw(&self) -> String {
        self.base_url.get_or_derive(|| {
            base::resolve(self.request_uri().unwrap_or(""), &self.signals())
        })
    }

    ///Set the base path, or let it be derived on the next access if
    ///`base_path` is `None`.
    pub fn set_base_path(&mut self, base_path: Option<&str>) -> &mut Request {
        match base_path {
            Some(base_path) => self.base_path.set(base::normalize_path(base_path, self.config.path_style)),
            None => self.base_path.clear()
        }

        self
    }

    ///The directory of the entry script, as seen from the outside. This is
    ///the decoded base URL without the script file name.
    pub fn base_path(&self) -> String {
        self.base_path.get_or_derive(|| {
            let script_filename = self.environment.server.get("SCRIPT_FILENAME").unwrap_or("");
            base::base_path(&self.base_url(), script_filename, self.config.path_style)
        })
    }

    ///Set the path info, or let it be derived on the next access if
    ///`path_info` is `None`.
    pub fn set_path_info(&mut self, path_info: Option<&str>) -> &mut Request {
        match path_info {
            Some(path_info) => self.path_info.set(path_info.to_owned()),
            None => self.path_info.clear()
        }

        self
    }

    ///The part of the request path that comes after the base URL. It's empty
    ///if the request target is unknown.
    pub fn path_info(&self) -> String {
        self.path_info.get_or_derive(|| match self.request_uri() {
            Some(request_uri) => path_info::resolve(request_uri, &self.base_url_raw()),
            None => String::new()
        })
    }

    fn resolver(&self) -> ParameterResolver {
        ParameterResolver {
            overlay: &self.params,
            sources: &self.config.param_sources,
            query: &self.environment.query,
            body: &self.environment.body,
        }
    }

    ///Set or, if `value` is `None`, remove an explicit parameter. Explicit
    ///parameters take precedence over every source.
    ///
    ///```
    ///use reqbase::Request;
    ///
    ///let mut request = Request::from_uri("http://example.com/?a=2").unwrap();
    ///request.set_param("a", "1".to_owned());
    ///assert_eq!(request.param("a"), Some("1"));
    ///
    ///request.set_param("a", None::<String>);
    ///assert_eq!(request.param("a"), Some("2"));
    ///```
    pub fn set_param<K, V>(&mut self, key: K, value: V) -> &mut Request where
        K: Into<String>, V: Into<Option<String>>
    {
        let key = key.into();
        match value.into() {
            Some(value) => {
                self.params.insert(key, value);
            },
            None => {
                self.params.remove(&key);
            }
        }

        self
    }

    ///Set or remove several explicit parameters.
    pub fn set_params<I, K, V>(&mut self, params: I) -> &mut Request where
        I: IntoIterator<Item=(K, V)>, K: Into<String>, V: Into<Option<String>>
    {
        for (key, value) in params {
            self.set_param(key, value);
        }

        self
    }

    ///Remove all explicit parameters.
    pub fn clear_params(&mut self) -> &mut Request {
        self.params.clear();
        self
    }

    ///The explicit parameters.
    pub fn user_params(&self) -> &Parameters {
        &self.params
    }

    ///An explicit parameter.
    pub fn user_param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    ///Find a parameter among the explicit ones and the enabled sources.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.resolver().get(key)
    }

    ///Find a parameter, or fall back to `default`.
    pub fn param_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.param(key).unwrap_or(default)
    }

    ///All explicit parameters and all parameters from the enabled sources.
    ///Explicit parameters win, and earlier sources win over later ones.
    pub fn params(&self) -> Parameters {
        self.resolver().all()
    }

    ///Replace the enabled parameter sources.
    pub fn set_param_sources(&mut self, sources: ParamSources) -> &mut Request {
        self.config.param_sources = sources;
        self
    }

    ///The enabled parameter sources.
    pub fn param_sources(&self) -> &ParamSources {
        &self.config.param_sources
    }

    ///Look for `key` anywhere in the request.
    ///
    ///The explicit parameters, query variables, body variables and cookies
    ///are searched in that order. `REQUEST_URI` and `PATH_INFO` are then
    ///answered with the derived request target and path info. Other keys
    ///fall through to the server and process environments.
    pub fn get(&self, key: &str) -> Option<Cow<str>> {
        let stores = [&self.params, &self.environment.query, &self.environment.body, &self.environment.cookies];
        for &store in stores.iter() {
            if let Some(value) = store.get(key) {
                return Some(value.into());
            }
        }

        match key {
            "REQUEST_URI" => return self.request_uri().map(Into::into),
            "PATH_INFO" => return Some(self.path_info().into()),
            _ => {}
        }

        self.environment.server.get(key)
            .or_else(|| self.environment.env.get(key))
            .map(Into::into)
    }

    ///Check if `key` can be found with `get`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    ///Always fails. The transport stores can't be written through the
    ///generic accessor. Use `set_param` instead.
    pub fn set<V: Into<String>>(&mut self, key: &str, _value: V) -> Result<()> {
        Err(Error::ReadOnlySource { key: key.to_owned() })
    }

    ///The query variables.
    pub fn query(&self) -> &Parameters {
        &self.environment.query
    }

    ///A query variable.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.environment.query.get(key)
    }

    ///Set or, if `value` is `None`, remove a query variable.
    pub fn set_query<K, V>(&mut self, key: K, value: V) -> &mut Request where
        K: Into<String>, V: Into<Option<String>>
    {
        set_or_remove(&mut self.environment.query, key.into(), value.into());
        self
    }

    ///Set several query variables. An empty collection clears the query
    ///store.
    pub fn set_query_all<I, K, V>(&mut self, values: I) -> &mut Request where
        I: IntoIterator<Item=(K, V)>, K: Into<String>, V: Into<Option<String>>
    {
        set_all(&mut self.environment.query, values);
        self
    }

    ///The body variables.
    pub fn post(&self) -> &Parameters {
        &self.environment.body
    }

    ///A body variable.
    pub fn post_value(&self, key: &str) -> Option<&str> {
        self.environment.body.get(key)
    }

    ///Set or, if `value` is `None`, remove a body variable.
    pub fn set_post<K, V>(&mut self, key: K, value: V) -> &mut Request where
        K: Into<String>, V: Into<Option<String>>
    {
        set_or_remove(&mut self.environment.body, key.into(), value.into());
        self
    }

    ///Set several body variables. An empty collection clears the body
    ///store.
    pub fn set_post_all<I, K, V>(&mut self, values: I) -> &mut Request where
        I: IntoIterator<Item=(K, V)>, K: Into<String>, V: Into<Option<String>>
    {
        set_all(&mut self.environment.body, values);
        self
    }

    ///Replace all body variables.
    pub fn replace_post(&mut self, body: Parameters) -> &mut Request {
        self.environment.body = body;
        self
    }

    ///The cookies.
    pub fn cookies(&self) -> &Parameters {
        &self.environment.cookies
    }

    ///A cookie.
    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.environment.cookies.get(key)
    }

    ///The server environment.
    pub fn server(&self) -> &Parameters {
        &self.environment.server
    }

    ///A server environment variable.
    pub fn server_value(&self, key: &str) -> Option<&str> {
        self.environment.server.get(key)
    }

    ///The process environment.
    pub fn env(&self) -> &Parameters {
        &self.environment.env
    }

    ///A process environment variable.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.environment.env.get(key)
    }

    ///Find a request header. See `header::find` for the details.
    ///
    ///```
    ///use reqbase::Request;
    ///use reqbase::context::Environment;
    ///
    ///let mut environment = Environment::default();
    ///environment.server.insert("CONTENT_TYPE", "application/json");
    ///let request = Request::from_env(environment);
    ///
    ///assert_eq!(request.header("Content-Type").unwrap().as_ref().map(|v| &**v), Some("application/json"));
    ///assert!(request.header("").is_err());
    ///```
    pub fn header(&self, name: &str) -> Result<Option<Cow<str>>> {
        let source = self.environment.header_source.as_ref().map(|source| &**source);
        header::find(&self.environment.server, source, name)
    }

    ///Set a request header in the server environment.
    pub fn set_header<V: Into<String>>(&mut self, name: &str, value: V) -> &mut Request {
        self.environment.server.insert(format!("HTTP_{}", header::server_key(name)), value);
        self
    }

    ///Set the requested host.
    pub fn set_http_host<V: Into<String>>(&mut self, host: V) -> &mut Request {
        self.environment.server.insert("HTTP_HOST", host);
        self
    }

    ///Set the client address.
    pub fn set_remote_address<V: Into<String>>(&mut self, address: V) -> &mut Request {
        self.environment.server.insert("REMOTE_ADDR", address);
        self
    }

    ///Mark the request as sent over HTTPS, or not.
    pub fn set_secure(&mut self, secure: bool) -> &mut Request {
        if secure {
            self.environment.server.insert("HTTPS", "on");
        } else {
            self.environment.server.remove("HTTPS");
        }

        self
    }

    ///The request scheme, `http` or `https`.
    pub fn scheme(&self) -> &'static str {
        context::scheme(&self.environment.server)
    }

    ///The requested host, possibly with a port.
    pub fn http_host(&self) -> String {
        context::http_host(&self.environment.server)
    }

    ///The client address.
    pub fn client_ip(&self) -> Option<&str> {
        self.environment.server.get("REMOTE_ADDR")
    }

    ///The request method, if the server reported a valid one.
    pub fn method(&self) -> Option<Method> {
        self.environment.server.get("REQUEST_METHOD")
            .and_then(|method| Method::from_bytes(method.as_bytes()).ok())
    }

    fn method_is(&self, method: Method) -> bool {
        self.method() == Some(method)
    }

    ///Check if this is a `GET` request.
    pub fn is_get(&self) -> bool {
        self.method_is(Method::GET)
    }

    ///Check if this is a `POST` request.
    pub fn is_post(&self) -> bool {
        self.method_is(Method::POST)
    }

    ///Check if this is a `PUT` request.
    pub fn is_put(&self) -> bool {
        self.method_is(Method::PUT)
    }

    ///Check if this is a `DELETE` request.
    pub fn is_delete(&self) -> bool {
        self.method_is(Method::DELETE)
    }

    ///Check if this is a `HEAD` request.
    pub fn is_head(&self) -> bool {
        self.method_is(Method::HEAD)
    }

    ///Check if this is an `OPTIONS` request.
    pub fn is_options(&self) -> bool {
        self.method_is(Method::OPTIONS)
    }

    ///Check if the request was sent over HTTPS.
    pub fn is_secure(&self) -> bool {
        self.scheme() == SCHEME_HTTPS
    }

    ///Check if the request was made with `XMLHttpRequest`.
    pub fn is_xml_http_request(&self) -> bool {
        match self.header("X-Requested-With") {
            Ok(Some(value)) => value == "XMLHttpRequest",
            _ => false
        }
    }

    ///Check if the request was made by a Flash client.
    pub fn is_flash_request(&self) -> bool {
        match self.header("User-Agent") {
            Ok(Some(value)) => value.to_lowercase().contains(" flash"),
            _ => false
        }
    }

    ///The raw request body. It's read once, on the first call, and is
    ///`None` if it's empty, only whitespace or couldn't be read.
    pub fn raw_body(&mut self) -> Option<&[u8]> {
        if self.raw_body.is_none() {
            let body = self.environment.body_reader.take().and_then(|mut reader| {
                let mut body = Vec::new();
                match reader.read_to_end(&mut body) {
                    Ok(_) => Some(body),
                    Err(e) => {
                        warn!("could not read the request body: {}", e);
                        None
                    }
                }
            });

            self.raw_body = Some(body.and_then(|body| if is_blank(&body) { None } else { Some(body) }));
        }

        match self.raw_body {
            Some(Some(ref body)) => Some(&body[..]),
            _ => None
        }
    }
}

fn set_or_remove(store: &mut Parameters, key: String, value: Option<String>) {
    match value {
        Some(value) => {
            store.insert(key, value);
        },
        None => {
            store.remove(&key);
        }
    }
}

fn set_all<I, K, V>(store: &mut Parameters, values: I) where
    I: IntoIterator<Item=(K, V)>, K: Into<String>, V: Into<Option<String>>
{
    let values: Vec<_> = values.into_iter().collect();
    if values.is_empty() {
        store.clear();
        return;
    }

    for (key, value) in values {
        set_or_remove(store, key.into(), value.into());
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(|&b| match b {
        b' ' | b'\t' | b'\n' | b'\r' | b'\0' | b'\x0B' => true,
        _ => false
    })
}
