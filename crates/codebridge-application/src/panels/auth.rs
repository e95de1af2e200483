use super::paint;
use crate::document::{mounts, SharedDocument};
use crate::markup::templates;
use codebridge_core::api::UserInfo;
use minijinja::context;

/// Sign-in state in the header.
pub struct AuthPanel {
    document: SharedDocument,
}

impl AuthPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn show_user(&self, user: &UserInfo, logout_url: &str) {
        paint(
            &self.document,
            mounts::AUTH,
            templates::AUTH_LOGGED_IN,
            context! { username => &user.username, logout_url },
        );
    }

    pub fn show_logged_out(&self, login_url: &str) {
        paint(
            &self.document,
            mounts::AUTH,
            templates::AUTH_LOGGED_OUT,
            context! { login_url },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{self, Document};

    #[test]
    fn test_logged_in_shows_username_and_logout() {
        let doc = Document::standard().into_shared();
        let panel = AuthPanel::new(doc.clone());
        panel.show_user(
            &UserInfo {
                username: "ada".to_string(),
                is_authenticated: true,
                ..UserInfo::default()
            },
            "http://localhost:5000/auth/logout",
        );
        let guard = document::lock(&doc);
        let markup = guard.markup(mounts::AUTH).unwrap();
        assert!(markup.contains(r#"<span class="username">ada</span>"#));
        assert!(markup.contains("Log Out"));
    }

    #[test]
    fn test_logged_out_links_to_login() {
        let doc = Document::standard().into_shared();
        let panel = AuthPanel::new(doc.clone());
        panel.show_logged_out("/auth/login");
        assert!(document::lock(&doc)
            .markup(mounts::AUTH)
            .unwrap()
            .contains("Sign In"));
    }
}
