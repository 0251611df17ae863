//! The five elements and the directional relation between them
//!
//! Elements sit at ordinal positions 0..4 on two fixed cycles:
//! - generating: `i` generates `(i + 1) % 5` (Wood -> Fire -> Earth -> Metal -> Water -> Wood)
//! - overcoming: `i` overcomes `(i + 2) % 5` (Wood -> Earth -> Water -> Fire -> Metal -> Wood)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of elements on the cycle
pub const ELEMENT_COUNT: u8 = 5;

/// One of the five elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Wood = 0,
    Fire = 1,
    Earth = 2,
    Metal = 3,
    Water = 4,
}

impl Element {
    /// All elements in cycle order
    pub const ALL: [Element; ELEMENT_COUNT as usize] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Position on the cycle (0..4)
    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The element this one feeds
    pub fn generates(self) -> Element {
        Self::ALL[((self.ordinal() + 1) % ELEMENT_COUNT) as usize]
    }

    /// The element this one destroys
    pub fn overcomes(self) -> Element {
        Self::ALL[((self.ordinal() + 2) % ELEMENT_COUNT) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }
}

impl TryFrom<u8> for Element {
    type Error = Error;

    /// Out-of-range identifiers are rejected rather than wrapped, since a
    /// silent default would corrupt the cycle.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidElement(value))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation of a subject element to a target element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Subject is generated-by or overcome-by the target: nothing it acts on
    None,
    /// Subject feeds the target (Wood -> Fire)
    Generating,
    /// Subject destroys the target (Water -> Fire)
    Overcoming,
    /// Same element
    Same,
}

impl Relation {
    /// Whether the subject performs an action on the target
    pub fn is_action(self) -> bool {
        matches!(self, Relation::Generating | Relation::Overcoming)
    }
}

/// Compare `subject` against `target`.
///
/// Direction-sensitive: `compare(a, b)` and `compare(b, a)` generally differ.
pub fn compare(subject: Element, target: Element) -> Relation {
    let step = (target.ordinal() + ELEMENT_COUNT - subject.ordinal()) % ELEMENT_COUNT;
    match step {
        0 => Relation::Same,
        1 => Relation::Generating,
        2 => Relation::Overcoming,
        _ => Relation::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_element() -> impl Strategy<Value = Element> {
        (0..ELEMENT_COUNT).prop_map(|i| Element::ALL[i as usize])
    }

    #[test]
    fn test_named_pairs() {
        assert_eq!(compare(Element::Wood, Element::Fire), Relation::Generating);
        assert_eq!(compare(Element::Water, Element::Fire), Relation::Overcoming);
        assert_eq!(compare(Element::Fire, Element::Wood), Relation::None);
        assert_eq!(compare(Element::Fire, Element::Water), Relation::None);
        assert_eq!(compare(Element::Water, Element::Wood), Relation::Generating);
        assert_eq!(compare(Element::Metal, Element::Wood), Relation::Overcoming);
    }

    #[test]
    fn test_one_generate_one_overcome_per_subject() {
        for subject in Element::ALL {
            let others = Element::ALL.iter().filter(|&&t| t != subject);
            let relations: Vec<_> = others.map(|&t| compare(subject, t)).collect();
            let count = |r: Relation| relations.iter().filter(|&&x| x == r).count();
            assert_eq!(count(Relation::Generating), 1, "{subject}");
            assert_eq!(count(Relation::Overcoming), 1, "{subject}");
            assert_eq!(count(Relation::None), 2, "{subject}");
            assert_eq!(count(Relation::Same), 0, "{subject}");
        }
    }

    #[test]
    fn test_cycle_helpers_agree_with_compare() {
        for e in Element::ALL {
            assert_eq!(compare(e, e.generates()), Relation::Generating);
            assert_eq!(compare(e, e.overcomes()), Relation::Overcoming);
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Element::try_from(4).ok(), Some(Element::Water));
        assert!(matches!(Element::try_from(5), Err(Error::InvalidElement(5))));
        assert!(matches!(Element::try_from(255), Err(Error::InvalidElement(255))));
    }

    proptest! {
        #[test]
        fn prop_same_element_is_same(e in any_element()) {
            prop_assert_eq!(compare(e, e), Relation::Same);
        }

        #[test]
        fn prop_distinct_pair_has_exactly_one_acting_side(a in any_element(), b in any_element()) {
            prop_assume!(a != b);
            let forward = compare(a, b).is_action();
            let backward = compare(b, a).is_action();
            prop_assert!(forward ^ backward);
        }

        #[test]
        fn prop_ordinal_round_trips(i in 0u8..ELEMENT_COUNT) {
            let e = Element::try_from(i).unwrap();
            prop_assert_eq!(e.ordinal(), i);
        }
    }
}
