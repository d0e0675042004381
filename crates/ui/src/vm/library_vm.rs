use sadhana_core::catalog;
use sadhana_core::model::Religion;

/// One practice card in the library grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryCardVm {
    pub title: &'static str,
    pub type_label: &'static str,
}

/// One tradition's section of the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibrarySectionVm {
    pub religion: Religion,
    pub heading: &'static str,
    pub cards: Vec<LibraryCardVm>,
}

/// The whole library, grouped by tradition in catalog order.
#[must_use]
pub fn library_sections() -> Vec<LibrarySectionVm> {
    Religion::ALL
        .into_iter()
        .map(|religion| LibrarySectionVm {
            religion,
            heading: religion.label(),
            cards: catalog::practices_for(religion)
                .iter()
                .copied()
                .map(|title| LibraryCardVm {
                    title,
                    type_label: catalog::type_label_for(title).unwrap_or(""),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cover_all_five_traditions() {
        let sections = library_sections();
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].heading, "Christianity");
        assert_eq!(sections[3].heading, "Buddhism");
    }

    #[test]
    fn every_card_carries_a_type_label() {
        for section in library_sections() {
            assert!(!section.cards.is_empty());
            for card in &section.cards {
                assert!(!card.type_label.is_empty(), "{}", card.title);
            }
        }
    }
}
