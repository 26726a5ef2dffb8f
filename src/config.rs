//!Request configuration.

use params::ParamSources;

///How the host operating system separates path components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStyle {
    ///Forward slashes only.
    Unix,
    ///Backslashes may appear and are normalized to forward slashes in the
    ///base path.
    Windows
}

impl PathStyle {
    ///The style of the platform this was compiled for.
    pub fn native() -> PathStyle {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }
}

impl Default for PathStyle {
    fn default() -> PathStyle {
        PathStyle::native()
    }
}

///Settings for a `Request`.
///
///```
///use reqbase::config::{Config, PathStyle};
///use reqbase::params::{ParamSource, ParamSources};
///
///let config = Config {
///    param_sources: vec![ParamSource::Body].into_iter().collect(),
///    path_style: PathStyle::Windows,
///};
///
///let defaults = Config::default();
///assert_eq!(defaults.param_sources, ParamSources::default());
///```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Config {
    ///The sources that request parameters are taken from, after the
    ///explicitly set ones. Default is query, then body.
    pub param_sources: ParamSources,

    ///The path style used when deriving the base path. Default is the style
    ///of the current platform.
    pub path_style: PathStyle,
}
