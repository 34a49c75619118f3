//! Property exclusion lists.

use std::collections::BTreeSet;

/// Property names excluded from a transfer, matched case-insensitively.
///
/// Names are compared after uppercasing each character on its own, so the
/// match does not depend on surrounding characters or locale. Characters
/// whose uppercase form is longer than one character are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    names: BTreeSet<String>,
}

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of names.
    ///
    /// Entries are trimmed of surrounding whitespace and empty entries are
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctk_transfer::SkipSet;
    ///
    /// let skip = SkipSet::parse("FirstProperty, referenceproperty,,");
    /// assert_eq!(skip.len(), 2);
    /// assert!(skip.contains("firstproperty"));
    /// assert!(skip.contains("ReferenceProperty"));
    /// ```
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Adds a name; blank names are ignored.
    pub fn insert(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(fold(name));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.names.is_empty() && self.names.contains(&fold(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.chars()
        .map(|ch| {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => ch,
            }
        })
        .collect()
}

impl<S: AsRef<str>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut skip = SkipSet::new();
        for name in iter {
            skip.insert(name.as_ref());
        }
        skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let skip = SkipSet::parse(" A ,, ,b");
        assert_eq!(skip.len(), 2);
        assert!(skip.contains("a"));
        assert!(skip.contains("B"));
        assert!(!skip.contains(""));
    }

    #[test]
    fn folding_is_per_character() {
        let skip = SkipSet::parse("ΟΔΟΣ, straße");
        assert!(skip.contains("οδοσ"));
        assert!(skip.contains("οδος"));
        assert!(skip.contains("STRAßE"));
        assert!(!skip.contains("STRASSE"));
    }

    #[test]
    fn empty_list_excludes_nothing() {
        let skip = SkipSet::parse("");
        assert!(skip.is_empty());
        assert!(!skip.contains("Anything"));
    }
}
