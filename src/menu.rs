//! Mobile navigation menu state.
//!
//! The menu panel and its two icons (hamburger "open" and "close") are kept
//! consistent: the open icon is visible exactly when the panel is hidden.

/// Visibility of the menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuVisibility {
    /// Panel collapsed (initial state)
    #[default]
    Hidden,
    /// Panel expanded
    Shown,
}

impl MenuVisibility {
    /// The opposite visibility.
    pub fn toggled(self) -> Self {
        match self {
            MenuVisibility::Hidden => MenuVisibility::Shown,
            MenuVisibility::Shown => MenuVisibility::Hidden,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MenuVisibility::Hidden => "hidden",
            MenuVisibility::Shown => "shown",
        }
    }
}

/// Mobile menu with its toggle icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileMenu {
    panel: MenuVisibility,
    open_icon: MenuVisibility,
    close_icon: MenuVisibility,
    links: Vec<String>,
}

impl Default for MobileMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MobileMenu {
    /// Collapsed menu without links.
    pub fn new() -> Self {
        Self {
            panel: MenuVisibility::Hidden,
            open_icon: MenuVisibility::Shown,
            close_icon: MenuVisibility::Hidden,
            links: Vec::new(),
        }
    }

    /// Collapsed menu with the given link labels.
    pub fn with_links<I, L>(links: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            links: links.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    /// Flip the panel and both icons.
    pub fn toggle(&mut self) {
        self.panel = self.panel.toggled();
        self.open_icon = self.open_icon.toggled();
        self.close_icon = self.close_icon.toggled();
        log::debug!("Mobile menu {}", self.panel.name());
    }

    /// A link inside the panel was followed: collapse if expanded.
    pub fn follow_link(&mut self) {
        if self.is_open() {
            self.panel = MenuVisibility::Hidden;
            self.open_icon = MenuVisibility::Shown;
            self.close_icon = MenuVisibility::Hidden;
            log::debug!("Mobile menu closed by link");
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel == MenuVisibility::Shown
    }

    pub fn panel(&self) -> MenuVisibility {
        self.panel
    }

    pub fn open_icon(&self) -> MenuVisibility {
        self.open_icon
    }

    pub fn close_icon(&self) -> MenuVisibility {
        self.close_icon
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_icons_consistent(menu: &MobileMenu) {
        assert_eq!(menu.open_icon() == MenuVisibility::Shown, !menu.is_open());
        assert_eq!(menu.close_icon() == MenuVisibility::Shown, menu.is_open());
    }

    #[test]
    fn test_initial_state_is_collapsed() {
        let menu = MobileMenu::new();
        assert!(!menu.is_open());
        assert_eq!(menu.open_icon(), MenuVisibility::Shown);
        assert_eq!(menu.close_icon(), MenuVisibility::Hidden);
    }

    #[test]
    fn test_default_is_collapsed_with_open_icon() {
        let mut menu = MobileMenu::default();
        assert_eq!(menu, MobileMenu::new());
        assert_icons_consistent(&menu);

        menu.toggle();
        assert!(menu.is_open());
        assert_icons_consistent(&menu);
    }

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menu = MobileMenu::new();
        menu.toggle();
        assert!(menu.is_open());
        assert_icons_consistent(&menu);

        menu.toggle();
        assert_eq!(menu, MobileMenu::new());
    }

    #[test]
    fn test_follow_link_closes_open_menu() {
        let mut menu = MobileMenu::new();
        menu.toggle();
        menu.follow_link();
        assert!(!menu.is_open());
        assert_icons_consistent(&menu);
    }

    #[test]
    fn test_follow_link_on_closed_menu_is_noop() {
        let mut menu = MobileMenu::new();
        menu.follow_link();
        assert_eq!(menu, MobileMenu::new());
    }

    #[test]
    fn test_with_links() {
        let menu = MobileMenu::with_links(["Inicio", "Nosotros", "Contacto"]);
        assert_eq!(menu.links().len(), 3);
        assert_eq!(menu.links()[1], "Nosotros");
        assert!(!menu.is_open());
    }
}
