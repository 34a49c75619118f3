//! Option lists for drop-down and list-box controls.

use serde::{Deserialize, Serialize};

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectListItem {
    /// Text shown to the user.
    pub text: String,
    /// Value submitted when the option is chosen.
    pub value: String,
    pub selected: bool,
}

/// Builds unselected options from `items`, ordered by their text.
pub fn to_select_list_items<T>(
    items: impl IntoIterator<Item = T>,
    text: impl Fn(&T) -> String,
    value: impl Fn(&T) -> String,
) -> Vec<SelectListItem> {
    to_select_list_items_with_selection(items, text, value, |_| false)
}

/// Builds options from `items`, ordered by their text, marking those for
/// which `selected` returns true.
///
/// Texts compare case-insensitively, with ties broken by exact text; items
/// with equal text keep their input order.
pub fn to_select_list_items_with_selection<T>(
    items: impl IntoIterator<Item = T>,
    text: impl Fn(&T) -> String,
    value: impl Fn(&T) -> String,
    selected: impl Fn(&T) -> bool,
) -> Vec<SelectListItem> {
    let mut options: Vec<SelectListItem> = items
        .into_iter()
        .map(|item| SelectListItem {
            text: text(&item),
            value: value(&item),
            selected: selected(&item),
        })
        .collect();
    options.sort_by_cached_key(|option| (option.text.to_lowercase(), option.text.clone()));
    options
}

/// Enumerations that can be listed as select options.
pub trait SelectEnum: Copy + PartialEq + 'static {
    /// True if variants are bit flags that may be combined.
    const FLAGS: bool = false;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    fn name(&self) -> &'static str;

    /// Integer value of the variant.
    fn bits(&self) -> i64;

    /// Display label, when one differs from the name.
    fn label(&self) -> Option<&'static str> {
        None
    }
}

/// Lists every variant of `E` as an option, selecting `current`.
///
/// With `use_integer_value`, option values are the variants' integers and a
/// variant is selected when all of its bits are set in `current`. Otherwise
/// values are variant names and a variant is selected when it equals
/// `current`. Texts are labels, falling back to names.
pub fn enum_select_list<E: SelectEnum>(current: E, use_integer_value: bool) -> Vec<SelectListItem> {
    enum_select_list_bits::<E>(current.bits(), use_integer_value)
}

/// Like [`enum_select_list`], for a combination of flags that no single
/// variant represents.
///
/// In name mode a flag enumeration selects every variant whose bits are all
/// set in `current`.
pub fn enum_select_list_bits<E: SelectEnum>(
    current: i64,
    use_integer_value: bool,
) -> Vec<SelectListItem> {
    E::variants()
        .iter()
        .map(|variant| {
            let bits = variant.bits();
            let (value, selected) = if use_integer_value {
                (bits.to_string(), bits & current == bits)
            } else {
                let is_flag = E::FLAGS && bits != 0 && bits & current == bits;
                (variant.name().to_string(), bits == current || is_flag)
            };
            SelectListItem {
                text: variant.label().unwrap_or(variant.name()).to_string(),
                value,
                selected,
            }
        })
        .collect()
}

/// Lists every variant of `E` by name, selecting `current`.
pub fn to_select_list<E: SelectEnum>(current: E) -> Vec<SelectListItem> {
    E::variants()
        .iter()
        .map(|variant| SelectListItem {
            text: variant.name().to_string(),
            value: variant.name().to_string(),
            selected: *variant == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_sorted_by_text() {
        let items = vec![(3, "Cherry"), (1, "apple"), (2, "Banana")];
        let options = to_select_list_items_with_selection(
            items,
            |(_, name)| (*name).to_owned(),
            |(id, _)| id.to_string(),
            |(id, _)| *id == 2,
        );
        let texts: Vec<_> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["apple", "Banana", "Cherry"]);
        assert!(options[1].selected);
        assert_eq!(options[1].value, "2");
    }

    #[test]
    fn sorting_ignores_case_before_exact_text() {
        let options = to_select_list_items(
            ["cherry", "b", "Banana", "B", "apple"],
            |s| (*s).to_owned(),
            |s| (*s).to_owned(),
        );
        let texts: Vec<_> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["apple", "B", "b", "Banana", "cherry"]);
    }

    #[test]
    fn unselected_overload_selects_nothing() {
        let options = to_select_list_items(["b", "a"], |s| (*s).to_owned(), |s| s.to_uppercase());
        assert_eq!(options[0].value, "A");
        assert!(options.iter().all(|o| !o.selected));
    }
}
