use std::collections::BTreeSet;

use tracing::{debug, info};

/// What the menu, progress bar and globe slide need after a slide change.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideChange {
    pub index: usize,
    /// `href` of the menu item to highlight, e.g. `#/3` for the third slide.
    pub active_href: String,
    pub progress_pct: f64,
    /// The new slide hosts the globe and no globe scene exists yet.
    pub needs_globe: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyHint {
    SpeakerView,
    Fullscreen,
    Blackout,
}

impl KeyHint {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(KeyHint::SpeakerView),
            'f' => Some(KeyHint::Fullscreen),
            'b' => Some(KeyHint::Blackout),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            KeyHint::SpeakerView => "press S to open the speaker view",
            KeyHint::Fullscreen => "press F to toggle fullscreen",
            KeyHint::Blackout => "press B to black out the screen",
        }
    }
}

/// Slide bookkeeping around the external slideshow engine.
#[derive(Debug)]
pub struct Deck {
    total_slides: usize,
    current: usize,
    globe_slides: BTreeSet<usize>,
    globe_attached: bool,
}

impl Deck {
    pub fn new(total_slides: usize, globe_slides: impl IntoIterator<Item = usize>) -> Self {
        let total_slides = total_slides.max(1);
        let globe_slides = globe_slides
            .into_iter()
            .filter(|&i| i < total_slides)
            .collect();
        info!(total_slides, "deck ready");
        Self {
            total_slides,
            current: 0,
            globe_slides,
            globe_attached: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    /// Menu links are written `#/N` with N counting from one.
    pub fn menu_target(href: &str) -> Option<usize> {
        let number: usize = href.strip_prefix("#/")?.trim().parse().ok()?;
        number.checked_sub(1)
    }

    pub fn progress_pct(&self) -> f64 {
        (self.current + 1) as f64 / self.total_slides as f64 * 100.0
    }

    pub fn attach_globe(&mut self) {
        self.globe_attached = true;
    }

    pub fn globe_attached(&self) -> bool {
        self.globe_attached
    }

    pub fn slide_changed(&mut self, index: usize) -> SlideChange {
        self.current = index.min(self.total_slides - 1);
        let needs_globe = self.globe_slides.contains(&self.current) && !self.globe_attached;
        if needs_globe {
            debug!(slide = self.current, "globe slide reached without a globe");
        }
        SlideChange {
            index: self.current,
            active_href: format!("#/{}", self.current + 1),
            progress_pct: self.progress_pct(),
            needs_globe,
        }
    }

    /// Follows a menu click; unknown links leave the deck where it is.
    pub fn follow_menu(&mut self, href: &str) -> Option<SlideChange> {
        Self::menu_target(href).map(|index| self.slide_changed(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_hrefs_are_one_based() {
        assert_eq!(Deck::menu_target("#/3"), Some(2));
        assert_eq!(Deck::menu_target("#/1"), Some(0));
        assert_eq!(Deck::menu_target("#/0"), None);
        assert_eq!(Deck::menu_target("#/x"), None);
        assert_eq!(Deck::menu_target("3"), None);
    }

    #[test]
    fn progress_tracks_position() {
        let mut deck = Deck::new(4, []);
        assert_eq!(deck.total_slides(), 4);
        assert_eq!(Deck::new(0, []).total_slides(), 1);
        let change = deck.slide_changed(1);
        assert_eq!(change.active_href, "#/2");
        assert_eq!(change.progress_pct, 50.0);
        let change = deck.slide_changed(99);
        assert_eq!(change.index, 3);
        assert_eq!(change.progress_pct, 100.0);
    }

    #[test]
    fn globe_is_requested_once_until_attached() {
        let mut deck = Deck::new(5, [2]);
        assert!(!deck.slide_changed(1).needs_globe);
        assert!(deck.slide_changed(2).needs_globe);
        assert!(!deck.globe_attached());
        deck.attach_globe();
        assert!(deck.globe_attached());
        assert!(!deck.slide_changed(2).needs_globe);
    }

    #[test]
    fn follow_menu_ignores_bad_links() {
        let mut deck = Deck::new(3, []);
        assert!(deck.follow_menu("#/nope").is_none());
        assert_eq!(deck.current(), 0);
        assert_eq!(deck.follow_menu("#/3").unwrap().index, 2);
    }

    #[test]
    fn key_hints_are_case_insensitive() {
        assert_eq!(KeyHint::from_key('S'), Some(KeyHint::SpeakerView));
        assert_eq!(KeyHint::from_key('f'), Some(KeyHint::Fullscreen));
        assert_eq!(KeyHint::from_key('b'), Some(KeyHint::Blackout));
        assert_eq!(KeyHint::from_key('x'), None);
    }
}
