//! Route guards as pure decisions over a [`Session`] snapshot.
//!
//! The UI wraps each route in a guard component that calls [`decide`] on
//! every render, so a forced logout anywhere in the app bounces protected
//! screens to the login page on the next frame.

use crate::session::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";
pub const HOME_ROUTE: &str = "/";
pub const OAUTH_CALLBACK_ROUTE: &str = "/oauth2/callback";

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Anyone, e.g. the OAuth callback which must run before a session exists.
    Public,
    /// Authenticated sessions only.
    Protected,
    /// Anonymous sessions only (login, signup).
    GuestOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    Render,
    Redirect(&'static str),
}

pub fn decide(access: Access, session: &Session) -> Guard {
    match access {
        Access::Public => Guard::Render,
        Access::Protected if !session.is_authenticated => Guard::Redirect(LOGIN_ROUTE),
        Access::GuestOnly if session.is_authenticated => Guard::Redirect(HOME_ROUTE),
        _ => Guard::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::sample_user;

    #[test]
    fn test_protected_redirects_anonymous_to_login() {
        let anonymous = Session::default();
        assert_eq!(decide(Access::Protected, &anonymous), Guard::Redirect("/login"));

        let signed_in = Session::authenticated(sample_user(1, "alice"));
        assert_eq!(decide(Access::Protected, &signed_in), Guard::Render);
    }

    #[test]
    fn test_guest_only_redirects_authenticated_home() {
        let signed_in = Session::authenticated(sample_user(1, "alice"));
        assert_eq!(decide(Access::GuestOnly, &signed_in), Guard::Redirect("/"));
        assert_eq!(decide(Access::GuestOnly, &Session::default()), Guard::Render);
    }

    #[test]
    fn test_login_in_flight_is_still_anonymous() {
        let session = Session {
            loading: true,
            ..Session::default()
        };
        assert_eq!(decide(Access::Protected, &session), Guard::Redirect("/login"));
        assert_eq!(decide(Access::GuestOnly, &session), Guard::Render);
    }

    #[test]
    fn test_public_renders_for_everyone() {
        let signed_in = Session::authenticated(sample_user(1, "alice"));
        assert_eq!(decide(Access::Public, &signed_in), Guard::Render);
        assert_eq!(decide(Access::Public, &Session::default()), Guard::Render);
    }
}
