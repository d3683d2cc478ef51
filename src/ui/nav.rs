use crate::session::{Flash, Session};

pub const APP_TITLE: &str = "Portfolio Dashboard";

/// Sidebar entries, in display order.
pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("Dashboard", "/"),
    ("Projects", "/projects"),
    ("Blogs", "/blogs"),
    ("Skills", "/skills"),
    ("Experience", "/experience"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Everything the shared layout needs: page title, navigation, pending toast and user.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    pub title: String,
    pub app_title: &'static str,
    pub nav: Vec<NavLink>,
    pub flash_kind: String,
    pub flash_message: String,
    pub user_name: String,
    pub user_email: String,
}

impl Shell {
    pub fn new(title: impl Into<String>, current_path: &str, session: &Session) -> Self {
        Self {
            title: title.into(),
            app_title: APP_TITLE,
            nav: nav_links(current_path),
            user_name: session.user_name.clone().unwrap_or_default(),
            user_email: session.user_email.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        if let Some(flash) = flash {
            self.flash_kind = flash.kind.as_str().to_string();
            self.flash_message = flash.message;
        }
        self
    }
}

/// The item whose href equals `current_path` is highlighted.
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    NAV_ITEMS
        .iter()
        .map(|&(title, href)| NavLink {
            title,
            href,
            active: href == current_path,
        })
        .collect()
}
