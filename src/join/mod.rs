//! # Material Row Denormalization
//!
//! Builds the merged table: one [`OutputRow`] per material, enriched with the
//! samples taken from it and with the report header.
//!
//! ## Joining
//!
//! A material's join key is the first filled-in of `Num_Materiau`,
//! `Reperage_3` and `Id_Prelevement_Int_txt`. Samples belong to a material
//! when their trimmed `Num_Materiau` equals that key exactly, so a material
//! without a key collects the samples without one.
//!
//! Rows keep material order; nothing is deduplicated or sorted.

use serde::{Deserialize, Serialize};

use crate::model::{FieldMap, ParsedSource};
use crate::sources::JOINED_SOURCES;

mod fallback;
mod row;

pub use fallback::{is_effectively_absent, present, Fallback};
pub use row::{OutputRow, OUTPUT_COLUMNS};

#[cfg(test)]
mod tests;

/// `Nom_EI` when the report header has no address
pub const DEFAULT_ADDRESS: &str = "Adresse non précisée";

/// `Num_UG` when the report header has neither report nor mission number
pub const DEFAULT_UG: &str = "UG";

/// Separator between sample numbers gathered from the samples table
pub const SAMPLE_ID_SEPARATOR: &str = "; ";

/// The merged row table and its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPayload {
    /// One row per material
    pub rows: Vec<OutputRow>,
    /// Provenance
    pub meta: PayloadMeta,
}

/// `meta` object of the merged table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMeta {
    /// Always `"xml"`
    pub generated_from: String,
    /// File names of the materials, samples and general tables
    pub sources: Vec<String>,
    /// Number of rows
    pub count: usize,
}

impl MergedPayload {
    /// Pretty-printed JSON (two-space indent, non-ASCII kept as-is)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Join materials with their samples and the report header.
///
/// A source of the wrong shape, or missing, contributes nothing: materials
/// and samples are read as collections, the report header as a flat record.
pub fn build_rows(
    materials: &ParsedSource,
    samples: &ParsedSource,
    general: &ParsedSource,
) -> MergedPayload {
    let empty = FieldMap::new();
    let general = general.flat().unwrap_or(&empty);
    let samples = samples.items();

    let rows: Vec<OutputRow> = materials
        .items()
        .iter()
        .map(|material| build_row(material, samples, general))
        .collect();

    MergedPayload {
        meta: PayloadMeta {
            generated_from: "xml".to_string(),
            sources: JOINED_SOURCES.iter().map(|s| s.to_string()).collect(),
            count: rows.len(),
        },
        rows,
    }
}

/// Join key of a material, trimmed; empty when none is filled in.
pub fn material_key(material: &FieldMap) -> String {
    Fallback::field(material, "Num_Materiau")
        .or_field(material, "Reperage_3")
        .or_field(material, "Id_Prelevement_Int_txt")
        .or_empty()
        .trim()
        .to_string()
}

/// Samples whose trimmed `Num_Materiau` equals `key`, in table order.
pub fn related_samples<'s>(samples: &'s [FieldMap], key: &str) -> Vec<&'s FieldMap> {
    samples
        .iter()
        .filter(|sample| {
            let sample_key = sample.get("Num_Materiau").map_or("", String::as_str);
            sample_key.trim() == key
        })
        .collect()
}

fn build_row(material: &FieldMap, samples: &[FieldMap], general: &FieldMap) -> OutputRow {
    let key = material_key(material);
    let related = related_samples(samples, &key);

    let sample_ids: Vec<&str> = related
        .iter()
        .filter_map(|sample| present(sample, "Num_Prelevement"))
        .collect();

    // Only the first related sample is consulted
    let resultat = Fallback::field(material, "Resultats").or_else(|| {
        related
            .first()
            .and_then(|sample| sample.get("Resultat_reperage"))
            .cloned()
            .unwrap_or_default()
    });

    OutputRow {
        nom_ei: Fallback::field(general, "Immeuble_Adresse1").or_literal(DEFAULT_ADDRESS),
        num_ug: Fallback::field(general, "Gen_Num_rapport")
            .or_field(general, "Gen_Num_mission")
            .or_literal(DEFAULT_UG),
        commune: Fallback::field(general, "Immeuble_Commune").or_empty(),
        local_visite: Fallback::field(material, "Localisation")
            .or_field(material, "Detail_loc")
            .or_empty(),
        etage: Fallback::field(general, "Loc_Etage").or_empty(),
        occupation: String::new(),
        date_realisation: Fallback::field(general, "Gen_Date_rapport").or_empty(),
        operateur: Fallback::field(general, "Gen_Nom_operateur").or_empty(),
        reference_rapport: Fallback::field(general, "Gen_Num_rapport")
            .or_field(material, "Dossier_Materiau")
            .or_empty(),
        composant_construction: Fallback::field(material, "Ouvrages").or_empty(),
        materiau_produit: Fallback::field(material, "Description")
            .or_field(material, "Partie_Inspectee")
            .or_empty(),
        num_prelevement: Fallback::field(material, "num_prelevement")
            .or_else(|| sample_ids.join(SAMPLE_ID_SEPARATOR)),
        resultat,
        applicabilite_zpso: Fallback::field(material, "Id_Prelevement").or_empty(),
        etat_conservation: Fallback::field(material, "Etat_Conservation").or_empty(),
        quantite: Fallback::field(material, "quantite").or_empty(),
        unite: Fallback::field(material, "unite").or_empty(),
        resultat_hap: Fallback::field(material, "resultat_Hap").or_empty(),
    }
}
