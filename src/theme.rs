use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, info, warn};
use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::dom::{self, DomNode};
use crate::error::SiteError;
use crate::storage::{BrowserStore, KeyValueStore};

pub const TOGGLE_SELECTOR: &str = "#themeToggle";
pub const DARK_CLASS: &str = "dark";
pub const THEME_ATTR: &str = "data-theme";
pub const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(SiteError::UnknownTheme(other.to_string())),
        }
    }
}

/// Applies the light/dark mode to the page and remembers the choice.
///
/// The root element carries the `dark` class, `<body>` carries
/// `data-theme`. The toggle reads the live attribute, storage is only
/// consulted at startup.
pub struct ThemeManager<S, N> {
    storage: S,
    root: N,
    body: N,
    key: String,
}

impl<S: KeyValueStore, N: DomNode> ThemeManager<S, N> {
    pub fn new(storage: S, root: N, body: N, key: impl Into<String>) -> Self {
        Self {
            storage,
            root,
            body,
            key: key.into(),
        }
    }

    pub fn apply(&self, theme: Theme) {
        self.root.set_class(DARK_CLASS, theme == Theme::Dark);
        self.body.set_attr(THEME_ATTR, theme.as_str());
        if let Err(err) = self.storage.write(&self.key, theme.as_str()) {
            warn!("Failed to persist theme: {}", err);
        }
    }

    /// Persisted choice, if any. Anything other than a known name renders
    /// as light.
    pub fn saved(&self) -> Option<Theme> {
        let raw = self.storage.read(&self.key).filter(|v| !v.is_empty())?;
        Some(raw.parse().unwrap_or_else(|err| {
            warn!("{}, falling back to light", err);
            Theme::Light
        }))
    }

    /// `prefers_dark` is only evaluated when nothing is persisted.
    pub fn init(&self, prefers_dark: impl FnOnce() -> bool) -> Theme {
        let theme = match self.saved() {
            Some(theme) => theme,
            None => Theme::from_preference(prefers_dark()),
        };
        self.apply(theme);
        theme
    }

    pub fn current(&self) -> Theme {
        match self.body.attr(THEME_ATTR).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.apply(next);
        next
    }
}

fn prefers_dark(window: &Window) -> bool {
    match window.match_media(DARK_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) {
    let (Some(root), Some(body)) = (document.document_element(), document.body()) else {
        debug!("Theme skipped: document has no root or body");
        return;
    };
    let manager = Rc::new(ThemeManager::new(
        BrowserStore::open(window),
        root,
        Element::from(body),
        config.storage_key.clone(),
    ));

    if let Some(toggle) = dom::select(document, TOGGLE_SELECTOR) {
        let manager = Rc::clone(&manager);
        dom::listen(&toggle, "click", move |_| {
            let theme = manager.toggle();
            debug!("Theme toggled to {}", theme);
        });
    }

    let theme = manager.init(|| prefers_dark(window));
    info!("Theme initialized as {}", theme);
}
