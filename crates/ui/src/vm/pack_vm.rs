use drill_core::model::PackCatalog;

/// Entries previewed on each pack card.
const SAMPLE_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackCardVm {
    pub name: String,
    pub count_label: String,
    pub samples: Vec<(String, String)>,
}

#[must_use]
pub fn map_pack_cards(catalog: &PackCatalog) -> Vec<PackCardVm> {
    catalog
        .iter()
        .map(|pack| {
            let count_label = match pack.len() {
                1 => "1 entry".to_owned(),
                n => format!("{n} entries"),
            };
            PackCardVm {
                name: pack.name().to_owned(),
                count_label,
                samples: pack
                    .entries()
                    .iter()
                    .take(SAMPLE_SIZE)
                    .map(|entry| (entry.source().to_owned(), entry.target().to_owned()))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Entry, Pack};

    #[test]
    fn cards_preview_first_entries() {
        let entries = ["eins", "zwei", "drei", "vier"]
            .into_iter()
            .map(|t| Entry::new(format!("pl-{t}"), t, None).unwrap())
            .collect();
        let single = Pack::new("Eins", vec![Entry::new("jeden", "eins", None).unwrap()]).unwrap();
        let catalog =
            PackCatalog::new(vec![Pack::new("Liczby", entries).unwrap(), single]).unwrap();

        let cards = map_pack_cards(&catalog);
        assert_eq!(cards[0].count_label, "4 entries");
        assert_eq!(cards[0].samples.len(), 3);
        assert_eq!(cards[0].samples[0], ("pl-eins".to_owned(), "eins".to_owned()));
        assert_eq!(cards[1].count_label, "1 entry");
    }
}
