//! Page frame: a header above exactly one content widget.

use crate::carousel::{Carousel, Key};
use crate::constants::{FILES_ROUTE, HOME_ROUTE};
use crate::error::ViewError;
use crate::file_browser::FileBrowser;
use crate::fixtures;
use crate::header::Header;
use crate::utility_button::UtilityButton;

/// The widget filling the page below the header.
#[derive(Debug, Clone)]
pub enum Content {
    Carousel(Carousel),
    Files {
        browser: FileBrowser,
        is_open: bool,
    },
}

/// User input routed through the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Key(String),
    NextCard,
    PreviousCard,
    ToggleMenu,
    ClickOutside,
    Search(String),
    SelectCategory(String),
    ClickCard(String),
    CloseBrowser,
    ToggleUtility,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub header: Header,
    pub content: Content,
    pub utility: UtilityButton,
}

impl Page {
    pub fn home() -> Result<Self, ViewError> {
        Ok(Self {
            header: Header::new("Your Account"),
            content: Content::Carousel(Carousel::new(fixtures::friends())?),
            utility: UtilityButton::new(),
        })
    }

    pub fn files() -> Self {
        Self {
            header: Header::new("Your Account"),
            content: Content::Files {
                browser: FileBrowser::new(),
                is_open: true,
            },
            utility: UtilityButton::new(),
        }
    }

    pub fn for_route(route: &str) -> Result<Self, ViewError> {
        tracing::debug!(route, "building page");
        match route {
            HOME_ROUTE => Self::home(),
            FILES_ROUTE => Ok(Self::files()),
            other => Err(ViewError::UnknownRoute(other.to_string())),
        }
    }

    /// Apply one event. Returns `Ok(false)` when nothing on the page reacts
    /// to it (a carousel key on the files page, an unbound key, ...).
    pub fn dispatch(&mut self, event: UiEvent) -> Result<bool, ViewError> {
        match event {
            UiEvent::ToggleMenu => self.header.toggle_menu(),
            UiEvent::ClickOutside => self.header.click_outside(),
            UiEvent::Search(query) => self.header.set_query(&query),
            UiEvent::ToggleUtility => self.utility.toggle(),
            other => return self.dispatch_content(other),
        }
        Ok(true)
    }

    fn dispatch_content(&mut self, event: UiEvent) -> Result<bool, ViewError> {
        match (&mut self.content, event) {
            (Content::Carousel(carousel), UiEvent::Key(name)) => {
                Ok(carousel.handle_key(Key::from_name(&name)))
            }
            (Content::Carousel(carousel), UiEvent::NextCard) => {
                carousel.next();
                Ok(true)
            }
            (Content::Carousel(carousel), UiEvent::PreviousCard) => {
                carousel.previous();
                Ok(true)
            }
            (Content::Files { browser, is_open: true }, UiEvent::SelectCategory(name)) => {
                browser.select_category(&name)?;
                Ok(true)
            }
            (Content::Files { browser, is_open: true }, UiEvent::ClickCard(name)) => {
                browser.click_card(&name)?;
                Ok(true)
            }
            (Content::Files { browser, is_open }, UiEvent::CloseBrowser) => {
                browser.close();
                *is_open = false;
                Ok(true)
            }
            (_, event) => {
                tracing::trace!(?event, "event ignored by page content");
                Ok(false)
            }
        }
    }
}
