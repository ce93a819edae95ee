//! Packs bundled with the game: Polish prompts, German answers.

use crate::repository::{EntryRecord, PackRecord};

const GREETINGS: &[(&str, &str)] = &[
    ("Cześć!", "Hallo!"),
    ("Dzień dobry (rano)", "Guten Morgen!"),
    ("Dzień dobry", "Guten Tag!"),
    ("Dobry wieczór", "Guten Abend!"),
    ("Pa! / Cześć!", "Tschüss!"),
    ("Jak masz na imię?", "Wie heißt du?"),
    ("Nazywam się Maja.", "Ich heiße Maja."),
    ("Jak leci?", "Wie geht's?"),
    ("Dobrze, dziękuję.", "Gut, danke."),
    ("Proszę / Nie ma za co.", "Bitte."),
    ("Dziękuję.", "Danke."),
    ("Tak / Nie", "Ja / Nein"),
    ("Przepraszam.", "Entschuldigung."),
    ("Nie rozumiem.", "Ich verstehe nicht."),
    ("Czy mówi Pan/Pani po polsku?", "Sprechen Sie Polnisch?"),
];

const NUMBERS: &[(&str, &str)] = &[
    ("zero", "null"),
    ("jeden", "eins"),
    ("dwa", "zwei"),
    ("trzy", "drei"),
    ("cztery", "vier"),
    ("pięć", "fünf"),
    ("sześć", "sechs"),
    ("siedem", "sieben"),
    ("osiem", "acht"),
    ("dziewięć", "neun"),
    ("dziesięć", "zehn"),
];

const PHRASES: &[(&str, &str)] = &[
    ("Pochodzę z Polski.", "Ich komme aus Polen."),
    ("Mieszkam w Hanowerze.", "Ich wohne in Hannover."),
    ("Uczę się niemieckiego.", "Ich lerne Deutsch."),
    ("Czy może Pan/Pani powtórzyć?", "Können Sie das wiederholen?"),
    ("Wolniej, proszę.", "Langsamer, bitte."),
    ("Gdzie jest toaleta?", "Wo ist die Toilette?"),
    ("Ile to kosztuje?", "Wie viel kostet das?"),
    ("Pomocy!", "Hilfe!"),
    ("Potrzebuję terminu.", "Ich brauche einen Termin."),
];

const PACKS: &[(&str, &[(&str, &str)])] = &[
    ("Powitania i podstawy", GREETINGS),
    ("Liczby 0–10", NUMBERS),
    ("Zwroty ważne", PHRASES),
];

/// Records for the built-in packs, in display order.
#[must_use]
pub fn pack_records() -> Vec<PackRecord> {
    PACKS
        .iter()
        .map(|(name, pairs)| PackRecord {
            name: (*name).to_owned(),
            entries: pairs
                .iter()
                .map(|(source, target)| EntryRecord {
                    source: (*source).to_owned(),
                    target: (*target).to_owned(),
                    hint: None,
                })
                .collect(),
        })
        .collect()
}
