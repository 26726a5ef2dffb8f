//!Parameter sources and the merged parameter view.
//!
//!Request parameters are looked up in the explicit overlay first, which is
//!what `Request::set_param` writes to, and then in each enabled source in
//!the configured order. The first hit wins.

use std::iter::FromIterator;
use std::slice;

use context::Parameters;

///A transport store that may provide parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamSource {
    ///Query variables.
    Query,
    ///Body variables.
    Body
}

///An ordered set of enabled parameter sources.
///
///The default is query, then body.
///
///```
///use reqbase::params::{ParamSource, ParamSources};
///
///let sources: ParamSources = vec![ParamSource::Body, ParamSource::Query, ParamSource::Body].into_iter().collect();
///assert_eq!(sources.as_slice(), &[ParamSource::Body, ParamSource::Query]);
///assert_eq!(ParamSources::default().as_slice(), &[ParamSource::Query, ParamSource::Body]);
///```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSources(Vec<ParamSource>);

impl ParamSources {
    ///No sources. Only the overlay will be consulted.
    pub fn none() -> ParamSources {
        ParamSources(vec![])
    }

    ///Enable a source after the already enabled ones. Nothing happens if it's
    ///already enabled.
    pub fn push(&mut self, source: ParamSource) {
        if !self.0.contains(&source) {
            self.0.push(source);
        }
    }

    ///Check if a source is enabled.
    pub fn contains(&self, source: ParamSource) -> bool {
        self.0.contains(&source)
    }

    ///The enabled sources, in order.
    pub fn as_slice(&self) -> &[ParamSource] {
        &self.0
    }

    ///Iterate over the enabled sources, in order.
    pub fn iter<'a>(&'a self) -> slice::Iter<'a, ParamSource> {
        self.0.iter()
    }
}

impl Default for ParamSources {
    fn default() -> ParamSources {
        ParamSources(vec![ParamSource::Query, ParamSource::Body])
    }
}

impl FromIterator<ParamSource> for ParamSources {
    fn from_iter<T: IntoIterator<Item=ParamSource>>(iterable: T) -> ParamSources {
        let mut sources = ParamSources::none();
        for source in iterable {
            sources.push(source);
        }
        sources
    }
}

impl<'a> IntoIterator for &'a ParamSources {
    type IntoIter = slice::Iter<'a, ParamSource>;
    type Item = &'a ParamSource;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

///A read-through view of the overlay and the enabled sources.
pub struct ParameterResolver<'a> {
    ///Explicitly set parameters. These always win.
    pub overlay: &'a Parameters,
    ///The enabled sources, in order.
    pub sources: &'a ParamSources,
    ///Query variables.
    pub query: &'a Parameters,
    ///Body variables.
    pub body: &'a Parameters,
}

impl<'a> ParameterResolver<'a> {
    fn store(&self, source: ParamSource) -> &'a Parameters {
        match source {
            ParamSource::Query => self.query,
            ParamSource::Body => self.body
        }
    }

    ///Find a parameter in the overlay or the first source that has it.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        if let Some(value) = self.overlay.get(key) {
            return Some(value);
        }

        self.sources.iter().filter_map(|&source| self.store(source).get(key)).next()
    }

    ///Merge the overlay and all enabled sources. Keys that are already
    ///present are never overwritten, so the overlay wins over every source
    ///and earlier sources win over later ones.
    pub fn all(&self) -> Parameters {
        let mut params = self.overlay.clone();
        for &source in self.sources {
            params.union(self.store(source));
        }
        params
    }
}
