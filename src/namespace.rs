//! Namespace management with TeX-like grouping semantics.
//!
//! A `Namespace` is a space of nameable things (here: macros) that can be set
//! either globally or local to a nested group, using an undo stack the way
//! TeX implements `\begingroup`/`\endgroup` scoping.

use core::cell::RefMut;

use rapidhash::{RapidHashMap, RapidHashSet};

use crate::types::{ParseError, ParseErrorKind};

/// Hash map alias so the backend can be swapped in one place.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
/// Hash set alias.
pub type KeySet<K> = RapidHashSet<K>;
/// String-keyed mapping.
pub type Mapping<V> = KeyMap<String, V>;

/// Scoped definitions with begin/end group semantics.
///
/// `get` and local `set` are O(1); a global `set` is O(depth) in the group
/// nesting level because it must clear pending undos at every level.
#[derive(Debug)]
pub struct Namespace<'a, V: Clone + 'static> {
    /// The mutable table local changes modify, with undos recorded on the
    /// stack. Borrowed from the caller so definitions survive the parse when
    /// requested.
    current: RefMut<'a, Mapping<V>>,
    /// Immutable built-in definitions consulted below `current`.
    builtins: &'static phf::Map<&'static str, V>,
    /// Per-group undo maps; the stored value is the name's previous value
    /// (`None` meaning it was undefined) to restore on pop.
    undef_stack: Vec<KeyMap<String, Option<V>>>,
}

impl<'a, V: Clone> Namespace<'a, V> {
    #[must_use]
    pub const fn new(
        builtins: &'static phf::Map<&'static str, V>,
        global: RefMut<'a, Mapping<V>>,
    ) -> Self {
        Self {
            current: global,
            builtins,
            undef_stack: Vec::new(),
        }
    }

    /// Starts a new nested group, affecting future local `set`s.
    pub fn begin_group(&mut self) {
        self.undef_stack.push(KeyMap::default());
    }

    fn restore_changes<I>(&mut self, undefs: I)
    where
        I: IntoIterator<Item = (String, Option<V>)>,
    {
        for (name, previous) in undefs {
            match previous {
                Some(v) => {
                    self.current.insert(name, v);
                }
                None => {
                    self.current.remove(&name);
                }
            }
        }
    }

    /// Ends the innermost group, restoring values from before it began.
    pub fn end_group(&mut self) -> Result<(), ParseError> {
        let undefs = self
            .undef_stack
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnbalancedNamespaceDestruction))?;
        self.restore_changes(undefs);
        Ok(())
    }

    /// Ends all open groups; returns how many were closed.
    pub fn end_groups(&mut self) -> usize {
        let mut count = 0;
        while let Some(undefs) = self.undef_stack.pop() {
            self.restore_changes(undefs);
            count += 1;
        }
        count
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.current.contains_key(name) || self.builtins.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.current.get(name).or_else(|| self.builtins.get(name))
    }

    /// Sets `name`, locally or globally. A `value` of `None` deletes.
    ///
    /// A local set records an undo in the innermost group unless one is
    /// already scheduled there (the older value is the right one to restore).
    /// A global set clears pending undos for the name at every level, then
    /// schedules the new value as the innermost undo so a later local set
    /// within this group still unwinds to it.
    pub fn set(&mut self, name: &str, value: Option<V>, global: bool) {
        if global {
            for level in &mut self.undef_stack {
                level.remove(name);
            }
            if let Some(top) = self.undef_stack.last_mut() {
                top.insert(name.to_owned(), value.clone());
            }
        } else if let Some(top) = self.undef_stack.last_mut()
            && !top.contains_key(name)
        {
            let prev = self.current.get(name).cloned();
            top.insert(name.to_owned(), prev);
        }

        match value {
            Some(v) => {
                self.current.insert(name.to_owned(), v);
            }
            None => {
                self.current.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use phf::phf_map;

    static BUILTINS: phf::Map<&'static str, i32> = phf_map! {
        "builtin" => 1,
    };

    #[test]
    fn test_group_set_is_undone() {
        let global = RefCell::new(Mapping::default());
        let mut ns = Namespace::new(&BUILTINS, global.borrow_mut());

        ns.set("x", Some(10), false);
        ns.begin_group();
        ns.set("x", Some(20), false);
        assert_eq!(ns.get("x"), Some(&20));
        ns.end_group().unwrap();
        assert_eq!(ns.get("x"), Some(&10));
    }

    #[test]
    fn test_global_set_survives_group() {
        let global = RefCell::new(Mapping::default());
        let mut ns = Namespace::new(&BUILTINS, global.borrow_mut());

        ns.begin_group();
        ns.set("x", Some(5), true);
        ns.end_group().unwrap();
        assert_eq!(ns.get("x"), Some(&5));
    }

    #[test]
    fn test_builtin_shadowing() {
        let global = RefCell::new(Mapping::default());
        let mut ns = Namespace::new(&BUILTINS, global.borrow_mut());

        assert_eq!(ns.get("builtin"), Some(&1));
        ns.begin_group();
        ns.set("builtin", Some(2), false);
        assert_eq!(ns.get("builtin"), Some(&2));
        ns.end_group().unwrap();
        assert_eq!(ns.get("builtin"), Some(&1));
    }

    #[test]
    fn test_unbalanced_end_group_fails() {
        let global = RefCell::new(Mapping::default());
        let mut ns: Namespace<'_, i32> = Namespace::new(&BUILTINS, global.borrow_mut());
        assert!(ns.end_group().is_err());
    }
}
