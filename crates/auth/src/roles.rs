use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier carried in session claims and user records.
///
/// Roles are opaque strings at this layer. The policy recognizes `ADMIN`
/// and `DOCENTE`; any other value exists (old data, future roles) but is
/// denied by the guard rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

pub const ADMIN: &str = "ADMIN";
pub const DOCENTE: &str = "DOCENTE";

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn admin() -> Self {
        Self(Cow::Borrowed(ADMIN))
    }

    pub fn docente() -> Self {
        Self(Cow::Borrowed(DOCENTE))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN
    }

    pub fn is_docente(&self) -> bool {
        self.0 == DOCENTE
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
