use std::fmt;

/// The named 3D shape class assigned to a ring instance.
///
/// Not every variant is reachable for every ring kind; each
/// [`super::ring::RingKind`] exposes its own ordered registry of valid
/// conformations, and the position within that registry is the kind-local
/// numeric code. The first three entries are shared by every kind:
/// `UNANALYSED` = 0, `UNDEFINIED` = 1 and `FLAT` = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Conformation {
    /// No analysis has run yet.
    #[default]
    Unanalysed,
    /// Analysis ran but no geometric test matched.
    Undefined,
    Flat,
    Envelope,
    Twist,
    Chair,
    TwistedBoat,
    HalfChair,
    Boat,
    Skew,
}

impl Conformation {
    /// The display label, matching the historical registry strings
    /// (including the "UNDEFINIED" spelling, which downstream consumers of
    /// the summary output rely on).
    pub fn label(&self) -> &'static str {
        match self {
            Conformation::Unanalysed => "UNANALYSED",
            Conformation::Undefined => "UNDEFINIED",
            Conformation::Flat => "FLAT",
            Conformation::Envelope => "ENVELOPE",
            Conformation::Twist => "TWIST",
            Conformation::Chair => "CHAIR",
            Conformation::TwistedBoat => "TWISTED BOAT",
            Conformation::HalfChair => "HALF CHAIR",
            Conformation::Boat => "BOAT",
            Conformation::Skew => "SKEW",
        }
    }

    /// The one-letter symbol used in annotated conformation names of
    /// oxygen-bearing six-membered rings (e.g. the "C" in "4C1").
    pub(crate) fn symbol(&self) -> Option<char> {
        match self {
            Conformation::Chair => Some('C'),
            Conformation::Envelope => Some('E'),
            Conformation::HalfChair => Some('H'),
            Conformation::Boat => Some('B'),
            Conformation::Skew => Some('S'),
            _ => None,
        }
    }
}

impl fmt::Display for Conformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_historical_registry_strings() {
        assert_eq!(Conformation::Unanalysed.label(), "UNANALYSED");
        assert_eq!(Conformation::Undefined.label(), "UNDEFINIED");
        assert_eq!(Conformation::TwistedBoat.label(), "TWISTED BOAT");
        assert_eq!(Conformation::HalfChair.label(), "HALF CHAIR");
    }

    #[test]
    fn symbols_exist_only_for_annotated_conformations() {
        assert_eq!(Conformation::Chair.symbol(), Some('C'));
        assert_eq!(Conformation::Skew.symbol(), Some('S'));
        assert_eq!(Conformation::Flat.symbol(), None);
        assert_eq!(Conformation::Undefined.symbol(), None);
    }

    #[test]
    fn default_is_unanalysed() {
        assert_eq!(Conformation::default(), Conformation::Unanalysed);
    }
}
