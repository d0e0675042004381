use sadhana_core::catalog;
use sadhana_core::model::{Practice, Proficiency};

/// Everything the guide screen shows for one practice, plus which entry
/// actions it offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuideVm {
    practice: Practice,
    related: Vec<&'static str>,
}

impl GuideVm {
    #[must_use]
    pub fn load(title: &str) -> Self {
        Self {
            practice: catalog::resolve(title),
            related: catalog::related_by_type(title),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.practice.title()
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.practice.description()
    }

    #[must_use]
    pub fn type_label(&self) -> &'static str {
        self.practice.type_label()
    }

    #[must_use]
    pub fn religion_label(&self) -> &'static str {
        self.practice.religion().label()
    }

    /// Practices sharing a type label, for the "more like this" strip.
    #[must_use]
    pub fn related(&self) -> &[&'static str] {
        &self.related
    }

    /// Tiered practices offer one entry per proficiency; everything else a
    /// single Start.
    #[must_use]
    pub fn entry_tiers(&self) -> Option<[Proficiency; 3]> {
        self.practice.offers_proficiency().then_some(Proficiency::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiered_practice_offers_three_entries() {
        let vm = GuideVm::load("Hatha Yoga");
        assert_eq!(vm.entry_tiers(), Some(Proficiency::ALL));
    }

    #[test]
    fn plain_practice_offers_single_start() {
        let vm = GuideVm::load("Rosary");
        assert_eq!(vm.entry_tiers(), None);
        assert!(!vm.description().is_empty());
    }

    #[test]
    fn unknown_title_still_loads_with_defaults() {
        let vm = GuideVm::load("No Such Practice");
        assert_eq!(vm.description(), "");
        assert_eq!(vm.entry_tiers(), None);
        assert!(vm.related().is_empty());
    }
}
