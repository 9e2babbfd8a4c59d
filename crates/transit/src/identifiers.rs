//! Type-safe identifiers for stops and lines.
//!
//! Identifiers are operator codes (`"120"`, `"4"`). They arrive from the OSM
//! `ref` tag and from the live API, sometimes padded with whitespace, so they
//! are trimmed on construction and compare as the bare code. The code sits in
//! an `Arc<str>` so stops can be cloned into views and requests cheaply.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! operator_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(code: impl AsRef<str>) -> Self {
                Self(code.as_ref().trim().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self::new(code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::new(code)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

operator_code!(
    /// Operator stop code (the OSM `ref` tag), not the OSM element id.
    StopIdentifier
);
operator_code!(
    /// Line number as the operator publishes it.
    LineIdentifier
);
