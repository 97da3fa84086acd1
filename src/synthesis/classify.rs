//! Classification of free-text survey results.
//!
//! Results are typed by hand in LICIEL ("Présence d'amiante", "Négatif",
//! "Matériau susceptible de contenir de l'amiante", ...), so they are matched
//! on lowercase substrings. The three tests are independent.

/// Overall result when any result reports asbestos
pub const PRESENCE: &str = "Présence d'amiante";

/// Overall result when none reports asbestos but one is suspect
pub const SUSPECT: &str = "Matériau suspect";

/// Overall result when the only classified results report no asbestos
pub const ABSENCE: &str = "Absence d'amiante";

/// Overall result when nothing could be classified
pub const UNKNOWN: &str = "Non renseigné";

const PRESENCE_MARKERS: [&str; 3] = ["présence", "present", "positif"];
const ABSENCE_MARKERS: [&str; 4] = ["absence", "absent", "négatif", "negatif"];
const SUSPECT_MARKERS: [&str; 4] = ["suspect", "susceptible", "à confirmer", "a confirmer"];

fn mentions(result: &str, markers: &[&str]) -> bool {
    let lower = result.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}

/// Whether a result reports asbestos
pub fn is_presence(result: &str) -> bool {
    mentions(result, &PRESENCE_MARKERS)
}

/// Whether a result reports no asbestos
pub fn is_absence(result: &str) -> bool {
    mentions(result, &ABSENCE_MARKERS)
}

/// Whether a result leaves the material suspect
pub fn is_suspect(result: &str) -> bool {
    mentions(result, &SUSPECT_MARKERS)
}

/// Overall result of several results: presence beats suspect beats absence.
pub fn overall_result<'a, I>(results: I) -> &'static str
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut presence, mut suspect, mut absence) = (false, false, false);
    for result in results {
        presence |= is_presence(result);
        suspect |= is_suspect(result);
        absence |= is_absence(result);
    }

    if presence {
        PRESENCE
    } else if suspect {
        SUSPECT
    } else if absence {
        ABSENCE
    } else {
        UNKNOWN
    }
}
