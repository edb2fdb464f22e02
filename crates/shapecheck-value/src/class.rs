//! Class identity.
//!
//! A [`Class`] is a named constructor with an optional parent. Instance checks
//! compare classes by reference, so two classes that merely share a name are
//! distinct. The built-in markers (`Object`, `Array`, `Function`, `Date`) are
//! process-wide singletons.

use std::fmt;
use std::sync::{Arc, LazyLock};

static OBJECT: LazyLock<Arc<Class>> = LazyLock::new(|| Class::native("Object"));
static ARRAY: LazyLock<Arc<Class>> = LazyLock::new(|| Class::native("Array"));
static FUNCTION: LazyLock<Arc<Class>> = LazyLock::new(|| Class::native("Function"));
static DATE: LazyLock<Arc<Class>> = LazyLock::new(|| Class::native("Date"));

/// A named constructor.
#[derive(Debug)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
    native: bool,
}

impl Class {
    /// Declare a root class.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
            native: false,
        })
    }

    /// Declare a class deriving from `parent`.
    pub fn extends(name: impl Into<String>, parent: &Arc<Class>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
            native: false,
        })
    }

    fn native(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            parent: None,
            native: true,
        })
    }

    /// The built-in `Object` class. Every non-primitive value is an instance of it.
    pub fn object() -> Arc<Self> {
        Arc::clone(&OBJECT)
    }

    /// The built-in `Array` class.
    pub fn array() -> Arc<Self> {
        Arc::clone(&ARRAY)
    }

    /// The built-in `Function` class. Classes and functions are instances of it.
    pub fn function() -> Arc<Self> {
        Arc::clone(&FUNCTION)
    }

    /// The built-in `Date` class.
    pub fn date() -> Arc<Self> {
        Arc::clone(&DATE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Returns true for the built-in markers.
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Returns true if `self` is `other` or derives from it.
    pub fn is_subclass_of(self: &Arc<Self>, other: &Arc<Class>) -> bool {
        if Arc::ptr_eq(other, &OBJECT) {
            return true;
        }

        let mut current = Some(self);
        while let Some(class) = current {
            if Arc::ptr_eq(class, other) {
                return true;
            }
            current = class.parent.as_ref();
        }
        false
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
