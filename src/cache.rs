//!Cached derived values.

use std::cell::RefCell;

///Where a cached value came from.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Origin {
    ///Set by the user. It stays until it's replaced.
    Explicit(String),
    ///Derived from other values. It's dropped when they change.
    Detected(String),
}

///A lazily derived string that can also be set explicitly.
///
///The value is derived the first time it's borrowed and kept until it's
///invalidated. Invalidation only drops detected values, so an explicitly
///set value survives changes to whatever it would otherwise be derived
///from.
///
///This is not `Sync`. A request is meant to be used by one thread at a
///time.
#[derive(Debug, Default)]
pub struct Derived(RefCell<Option<Origin>>);

impl Derived {
    ///Create an empty cell that will be derived on first access.
    pub fn new() -> Derived {
        Derived(RefCell::new(None))
    }

    ///Get the value, deriving it with `derive` if there is none.
    ///
    ///`derive` must not access this cell.
    pub fn get_or_derive<F: FnOnce() -> String>(&self, derive: F) -> String {
        if let Some(value) = self.current() {
            return value;
        }

        let value = derive();
        *self.0.borrow_mut() = Some(Origin::Detected(value.clone()));
        value
    }

    ///Get the value without deriving it.
    pub fn current(&self) -> Option<String> {
        match *self.0.borrow() {
            Some(Origin::Explicit(ref value)) | Some(Origin::Detected(ref value)) => Some(value.clone()),
            None => None
        }
    }

    ///Set an explicit value.
    pub fn set(&self, value: String) {
        *self.0.borrow_mut() = Some(Origin::Explicit(value));
    }

    ///Forget the value, regardless of where it came from.
    pub fn clear(&self) {
        *self.0.borrow_mut() = None;
    }

    ///Forget the value if it was derived. Returns `true` if something was
    ///dropped.
    pub fn invalidate(&self) -> bool {
        let mut value = self.0.borrow_mut();
        match *value {
            Some(Origin::Detected(_)) => {
                *value = None;
                true
            },
            _ => false
        }
    }
}
