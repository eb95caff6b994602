use colegio_academics::Viewer;
use colegio_auth::SessionClaims;

/// The authenticated identity of a request, inserted by the authentication
/// middleware and read by handlers through `Extension`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

impl CurrentUser {
    pub fn claims(&self) -> &SessionClaims {
        &self.0
    }

    /// Join-layer scope for this session.
    ///
    /// A DOCENTE without a linked teacher record gets a scope that matches
    /// no schedules, i.e. empty visible sets.
    pub fn viewer(&self) -> Viewer {
        if self.0.role.is_admin() {
            Viewer::Admin
        } else {
            match &self.0.teacher_dni {
                Some(dni) => Viewer::Teacher(dni.clone()),
                None => Viewer::Teacher("".into()),
            }
        }
    }
}
