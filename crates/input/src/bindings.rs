use counter_common::Command;
use std::collections::BTreeMap;

/// Character-to-command key bindings.
///
/// Uses a BTreeMap so `bindings()` lists keys in a stable order for help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMap {
    keys: BTreeMap<char, Command>,
}

impl InputMap {
    /// A map with no bindings.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `key` to `command`, returning the previous binding if any.
    pub fn bind(&mut self, key: char, command: Command) -> Option<Command> {
        let previous = self.keys.insert(key, command);
        if let Some(prev) = previous {
            tracing::debug!(%key, from = %prev, to = %command, "rebound key");
        }
        previous
    }

    pub fn unbind(&mut self, key: char) -> Option<Command> {
        self.keys.remove(&key)
    }

    /// Command bound to `key`, if any.
    pub fn resolve(&self, key: char) -> Option<Command> {
        self.keys.get(&key).copied()
    }

    /// Resolve the first character of a text input event.
    pub fn resolve_text(&self, text: &str) -> Option<Command> {
        let mut chars = text.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.resolve(key)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (char, Command)> + '_ {
        self.keys.iter().map(|(k, c)| (*k, *c))
    }

    /// Keys bound to `command`, in ascending order.
    pub fn keys_for(&self, command: Command) -> Vec<char> {
        self.bindings()
            .filter(|(_, c)| *c == command)
            .map(|(k, _)| k)
            .collect()
    }
}

impl Default for InputMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind('+', Command::Increment);
        map.bind('=', Command::Increment);
        map.bind('-', Command::Decrement);
        map.bind('_', Command::Decrement);
        map.bind('r', Command::Reset);
        map.bind('R', Command::Reset);
        map.bind('0', Command::Reset);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let map = InputMap::default();
        assert_eq!(map.resolve('+'), Some(Command::Increment));
        assert_eq!(map.resolve('-'), Some(Command::Decrement));
        assert_eq!(map.resolve('r'), Some(Command::Reset));
        assert_eq!(map.resolve('x'), None);
    }

    #[test]
    fn bind_overrides_and_returns_previous() {
        let mut map = InputMap::default();
        assert_eq!(map.bind('r', Command::Increment), Some(Command::Reset));
        assert_eq!(map.resolve('r'), Some(Command::Increment));
        assert_eq!(map.bind('k', Command::Decrement), None);
    }

    #[test]
    fn unbind_removes_key() {
        let mut map = InputMap::default();
        assert_eq!(map.unbind('0'), Some(Command::Reset));
        assert_eq!(map.resolve('0'), None);
    }

    #[test]
    fn resolve_text_only_accepts_single_char() {
        let map = InputMap::default();
        assert_eq!(map.resolve_text("+"), Some(Command::Increment));
        assert_eq!(map.resolve_text("++"), None);
        assert_eq!(map.resolve_text(""), None);
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let map = InputMap::default();
        assert_eq!(map.keys_for(Command::Reset), vec!['0', 'R', 'r']);
        assert!(InputMap::empty().keys_for(Command::Increment).is_empty());
    }
}
