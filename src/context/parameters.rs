use std::collections::HashMap;
use std::iter::FromIterator;
use std::fmt;
use std::ops::{Deref, DerefMut};

///An extended `HashMap` with string values and first-writer-wins merging.
///
///This is the storage type for every key/value store of a request, like
///query and body variables, cookies, the server environment and the
///parameter overlay.
#[derive(Clone)]
pub struct Parameters(HashMap<String, String>);

impl Parameters {
    ///Create an empty `Parameters`.
    pub fn new() -> Parameters {
        Parameters(HashMap::new())
    }

    ///Get a parameter as a string slice.
    pub fn get<'a>(&'a self, key: &str) -> Option<&'a str> {
        self.0.get(key).map(|v| &**v)
    }

    ///Returns true if a parameter with the given key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    ///Insert a parameter.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String> where
        K: Into<String>, V: Into<String>
    {
        self.0.insert(key.into(), value.into())
    }

    ///Remove a parameter and return it.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    ///Add every entry from `other` whose key is not already present. Existing
    ///entries are never overwritten.
    ///
    ///```
    ///use reqbase::context::Parameters;
    ///
    ///let mut params: Parameters = vec![("a", "1")].into_iter().collect();
    ///let other: Parameters = vec![("a", "2"), ("b", "3")].into_iter().collect();
    ///params.union(&other);
    ///
    ///assert_eq!(params.get("a"), Some("1"));
    ///assert_eq!(params.get("b"), Some("3"));
    ///```
    pub fn union(&mut self, other: &Parameters) {
        for (key, value) in &other.0 {
            if !self.0.contains_key(key) {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }

}

impl Deref for Parameters {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &HashMap<String, String> {
        &self.0
    }
}

impl DerefMut for Parameters {
    fn deref_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.0
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Parameters) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for Parameters {}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters::new()
    }
}

impl IntoIterator for Parameters {
    type IntoIter = <HashMap<String, String> as IntoIterator>::IntoIter;
    type Item = (String, String);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type IntoIter = <&'a HashMap<String, String> as IntoIterator>::IntoIter;
    type Item = (&'a String, &'a String);

    fn into_iter(self) -> Self::IntoIter {
        (&self.0).into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item=(K, V)>>(iterable: T) -> Parameters {
        Parameters(HashMap::from_iter(iterable.into_iter().map(|(k, v)| (k.into(), v.into()))))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Parameters {
    fn extend<T: IntoIterator<Item=(K, V)>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}
