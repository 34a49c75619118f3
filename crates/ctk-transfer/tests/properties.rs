//! Property-based tests for transfer invariants.

use ctk_model::properties;
use ctk_transfer::{SkipSet, transfer, transfer_into};
use proptest::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
struct Profile {
    name: Option<String>,
    age: i32,
    active: bool,
    score: f64,
}

properties!(Profile with Default {
    name: Option<String> as "Name",
    age: i32 as "Age",
    active: bool as "Active",
    score: f64 as "Score",
});

const NAMES: [&str; 4] = ["Name", "Age", "Active", "Score"];

fn profile() -> impl Strategy<Value = Profile> {
    (
        proptest::option::of("[a-zA-Z ]{0,12}"),
        any::<i32>(),
        any::<bool>(),
        -1.0e6..1.0e6f64,
    )
        .prop_map(|(name, age, active, score)| Profile {
            name,
            age,
            active,
            score,
        })
}

/// Random subset of property names with random casing and padding.
fn skip_list() -> impl Strategy<Value = (Vec<bool>, String)> {
    (proptest::collection::vec(any::<bool>(), 4), any::<bool>()).prop_map(|(mask, upper)| {
        let list = NAMES
            .iter()
            .zip(&mask)
            .filter(|(_, skip)| **skip)
            .map(|(name, _)| {
                if upper {
                    format!("  {} ", name.to_uppercase())
                } else {
                    name.to_lowercase()
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        (mask, list)
    })
}

proptest! {
    #[test]
    fn compatible_properties_are_copied(source in profile()) {
        let mut target = Profile::default();
        let report = transfer(&source, &mut target, &SkipSet::new()).unwrap();
        prop_assert_eq!(&target, &source);
        prop_assert_eq!(report.transferred_count(), NAMES.len());
    }

    #[test]
    fn skipped_properties_keep_prior_values(
        source in profile(),
        prior in profile(),
        (mask, list) in skip_list(),
    ) {
        let mut target = Some(prior.clone());
        let result = transfer_into(Some(&source), &mut target, Some(&list)).unwrap().clone();

        let expect = |skip: bool| if skip { &prior } else { &source };
        prop_assert_eq!(&result.name, &expect(mask[0]).name);
        prop_assert_eq!(result.age, expect(mask[1]).age);
        prop_assert_eq!(result.active, expect(mask[2]).active);
        prop_assert_eq!(result.score, expect(mask[3]).score);
    }

    #[test]
    fn new_targets_start_from_defaults(source in profile(), (mask, list) in skip_list()) {
        let mut target: Option<Profile> = None;
        transfer_into(Some(&source), &mut target, Some(&list)).unwrap();
        let target = target.unwrap();
        let defaults = Profile::default();
        if mask[0] {
            prop_assert_eq!(target.name, defaults.name);
        }
        if mask[1] {
            prop_assert_eq!(target.age, defaults.age);
        }
    }

    #[test]
    fn transfer_is_idempotent(source in profile(), prior in profile(), (_, list) in skip_list()) {
        let skip = SkipSet::parse(&list);
        let mut once = prior.clone();
        transfer(&source, &mut once, &skip).unwrap();
        let mut twice = once.clone();
        transfer(&source, &mut twice, &skip).unwrap();
        prop_assert_eq!(once, twice);
    }
}
