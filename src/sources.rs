//! Fixed file names of the LICIEL export tables and of the merged outputs.

/// Materials table: one item per inspected material.
pub const MATERIALS: &str = "Table_Z_Amiante.xml";

/// Samples table: one item per laboratory sample, keyed by material number.
pub const SAMPLES: &str = "Table_Z_Amiante_prelevements.xml";

/// General report table: address, dates, operator and report numbers.
pub const GENERAL: &str = "Table_Z_Amiante_General.xml";

/// Deviations from the survey standard.
pub const DEVIATIONS: &str = "Table_Z_Amiante_Ecart_Norme.xml";

/// Documents handed over to the surveyor.
pub const DOCUMENTS: &str = "Table_Z_Amiante_doc_remis.xml";

/// Laboratory analyses.
pub const ANALYSES: &str = "Table_General_Amiante_Analyses.xml";

/// Photos, keyed by sample number. Only read for the survey synthesis.
pub const PHOTOS: &str = "Table_General_Photo.xml";

/// Every source table converted by a default run, in processing order.
pub const ALL_SOURCES: [&str; 6] = [MATERIALS, SAMPLES, GENERAL, DEVIATIONS, DOCUMENTS, ANALYSES];

/// The three tables the merged row table is built from.
pub const JOINED_SOURCES: [&str; 3] = [MATERIALS, SAMPLES, GENERAL];

/// Output files receiving the merged row table. Both get identical bytes.
pub const MERGED_OUTPUTS: [&str; 2] = ["amiante_auto.json", "generate_amiante_json.json"];

/// Survey synthesis document.
pub const SYNTHESIS_JSON: &str = "synthese_amiante.json";

/// HTML rendering of the survey synthesis.
pub const SYNTHESIS_HTML: &str = "synthese_amiante.html";

/// Name of the JSON document written for a source table: the same base name
/// with its extension replaced by `.json`.
pub fn json_name(source: &str) -> String {
    let stem = match source.rfind('.') {
        Some(dot) if dot > 0 => &source[..dot],
        _ => source,
    };
    format!("{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_name_replaces_extension() {
        assert_eq!(json_name(MATERIALS), "Table_Z_Amiante.json");
        assert_eq!(json_name("archive.tar.xml"), "archive.tar.json");
    }

    #[test]
    fn test_json_name_without_extension() {
        assert_eq!(json_name("Table_Z_Amiante"), "Table_Z_Amiante.json");
        assert_eq!(json_name(".hidden"), ".hidden.json");
    }
}
