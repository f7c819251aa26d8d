//! Keyboard Shortcuts
//!
//! Parses combos such as `"mod+k"` or `"mod+shift+c"` and matches them
//! against key events. `mod` means Meta on macOS and Ctrl elsewhere.

/// Key event fields relevant for matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    key: String,
    ctrl: bool,
    meta: bool,
    alt: bool,
    shift: bool,
}

impl Shortcut {
    pub fn parse(combo: &str, is_mac: bool) -> Self {
        let mut parts: Vec<String> = combo
            .to_lowercase()
            .split('+')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let key = match parts.pop().as_deref() {
            Some("esc") => "escape".to_string(),
            Some("return") => "enter".to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let has = |name: &str| parts.iter().any(|p| p == name);
        Self {
            ctrl: has("ctrl") || (has("mod") && !is_mac),
            meta: has("meta") || (has("mod") && is_mac),
            alt: has("alt") || has("option"),
            shift: has("shift"),
            key,
        }
    }

    /// Exact match: same key and the same four modifier flags
    pub fn matches(&self, input: &KeyInput) -> bool {
        input.key.to_lowercase() == self.key
            && input.ctrl == self.ctrl
            && input.meta == self.meta
            && input.alt == self.alt
            && input.shift == self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(key: &str, ctrl: bool, meta: bool, shift: bool) -> KeyInput {
        KeyInput {
            key: key.to_string(),
            ctrl,
            meta,
            alt: false,
            shift,
        }
    }

    #[test]
    fn test_mod_is_platform_specific() {
        let linux = Shortcut::parse("mod+k", false);
        let mac = Shortcut::parse("mod+k", true);
        assert!(linux.matches(&input("k", true, false, false)));
        assert!(!linux.matches(&input("k", false, true, false)));
        assert!(mac.matches(&input("K", false, true, false)));
    }

    #[test]
    fn test_aliases() {
        assert!(Shortcut::parse("Mod + Return", false).matches(&input("Enter", true, false, false)));
        assert!(Shortcut::parse("esc", false).matches(&input("Escape", false, false, false)));
        let alt = Shortcut::parse("option+x", false);
        assert!(alt.matches(&KeyInput { key: "x".into(), alt: true, ..Default::default() }));
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let slash = Shortcut::parse("/", false);
        assert!(slash.matches(&input("/", false, false, false)));
        assert!(!slash.matches(&input("/", true, false, false)));

        let clear = Shortcut::parse("mod+shift+c", false);
        assert!(clear.matches(&input("C", true, false, true)));
        assert!(!clear.matches(&input("c", true, false, false)));
    }
}
