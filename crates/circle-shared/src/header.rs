use serde::Serialize;

use crate::constants::{APP_NAME, SEARCH_PLACEHOLDER};
use crate::types::initials;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MenuItem {
    Profile,
    Settings,
    Help,
    SignOut,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [Self::Profile, Self::Settings, Self::Help, Self::SignOut];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Your Profile",
            Self::Settings => "Settings",
            Self::Help => "Help & Support",
            Self::SignOut => "Sign out",
        }
    }
}

/// Page header: branding, connection search and the account menu.
#[derive(Debug, Clone, Default)]
pub struct Header {
    query: String,
    is_dropdown_open: bool,
    account_name: String,
}

impl Header {
    pub fn new(account_name: &str) -> Self {
        Self {
            account_name: account_name.to_string(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &'static str {
        APP_NAME
    }

    pub fn placeholder(&self) -> &'static str {
        SEARCH_PLACEHOLDER
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn avatar_fallback(&self) -> String {
        initials(&self.account_name)
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.is_dropdown_open
    }

    pub fn toggle_menu(&mut self) {
        self.is_dropdown_open = !self.is_dropdown_open;
    }

    /// A press anywhere outside the menu closes it.
    pub fn click_outside(&mut self) {
        self.is_dropdown_open = false;
    }

    /// Entries to draw; empty while the menu is closed.
    pub fn menu_items(&self) -> &'static [MenuItem] {
        if self.is_dropdown_open {
            &MenuItem::ALL
        } else {
            &[]
        }
    }
}
