use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Authentication context namespace (e.g. `"web"`, `"api"`).
///
/// Permission names and role definitions are unique *per guard*: a grant
/// made under one guard is invisible to checks performed under another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guard(Cow<'static, str>);

impl Guard {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self(Cow::Borrowed("web"))
    }
}

impl core::fmt::Display for Guard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permission identifier.
///
/// A named capability (e.g. `"inventory.adjust"`), unique by `(name, guard)`.
/// Names are opaque at this layer; the catalog module owns the names the
/// checker emits, and the assignment store matches them byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    name: Cow<'static, str>,
    #[serde(default)]
    guard: Guard,
}

impl Permission {
    /// Permission under the default guard.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            guard: Guard::default(),
        }
    }

    pub fn with_guard(name: impl Into<Cow<'static, str>>, guard: Guard) -> Self {
        Self {
            name: name.into(),
            guard,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
