/// Default number of snippets returned by [`search`].
pub const DEFAULT_LIMIT: usize = 5;

struct MedEntry {
    name: &'static str,
    generic: &'static str,
    indication: &'static str,
    dose: &'static str,
}

// Stand-in knowledge base of common Indian OTC medicines, in fixed table
// order. Not a general retrieval engine.
const MEDICINE_TABLE: &[MedEntry] = &[
    MedEntry {
        name: "Dolo 650",
        generic: "Paracetamol",
        indication: "Fever/Pain",
        dose: "650 mg every 6–8 hours (max 3 g/day)",
    },
    MedEntry {
        name: "Azithral 500",
        generic: "Azithromycin",
        indication: "Bacterial infections",
        dose: "As prescribed; common: 500 mg OD for 3 days",
    },
    MedEntry {
        name: "Allegra 120",
        generic: "Fexofenadine",
        indication: "Allergic rhinitis",
        dose: "120 mg once daily",
    },
    MedEntry {
        name: "Omez 20",
        generic: "Omeprazole",
        indication: "Acidity/GERD",
        dose: "20 mg once daily before food",
    },
    MedEntry {
        name: "ORS Powder",
        generic: "ORS",
        indication: "Dehydration",
        dose: "As per sachet instructions with safe water",
    },
];

/// Case-insensitive lookup of knowledge-table snippets relevant to a query.
///
/// An entry matches when its brand name, generic name, or an indication
/// keyword appears in the query. Matches come back in table order, truncated
/// to `limit`; no ranking or fuzzy matching.
pub fn search(query: &str, limit: usize) -> Vec<String> {
    let q = query.to_lowercase();
    let mut hits = Vec::new();

    for entry in MEDICINE_TABLE {
        if hits.len() >= limit {
            break;
        }
        if matches_query(&q, entry) {
            hits.push(format!(
                "{} ({}) – {}; typical: {}",
                entry.name, entry.generic, entry.indication, entry.dose
            ));
        }
    }

    hits
}

fn matches_query(query_lower: &str, entry: &MedEntry) -> bool {
    if query_lower.contains(&entry.name.to_lowercase())
        || query_lower.contains(&entry.generic.to_lowercase())
    {
        return true;
    }
    // Indication keywords, so symptom queries ("I have fever") hit too.
    entry
        .indication
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| query_lower.contains(word))
}
