//! # Survey Synthesis
//!
//! A report-oriented view of the same exports: every suspect zone (ZPSO, one
//! per material) with its samples, the same zones grouped by room, global
//! counts, the documents handed over and the deviations from the survey
//! standard.
//!
//! Samples are enriched from three lookups keyed by sample number or
//! component key: the samples table, the laboratory analyses and the photos.
//! Missing tables simply contribute no records.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::FieldMap;

mod classify;
mod html;
mod records;

pub use classify::{is_absence, is_presence, is_suspect, overall_result};
pub use html::render_html;
pub use records::records_from_json;

use records::{first_of, index_by, split_list, squeeze_spaces};


/// Values accepted as a ticked box in the deviations table
pub const TRUE_FLAGS: [&str; 4] = ["oui", "true", "1", "x"];

/// Record lists of the tables the synthesis reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisTables {
    /// Materials, one zone each
    pub materials: Vec<FieldMap>,
    /// Samples, looked up by sample number
    pub samples: Vec<FieldMap>,
    /// Laboratory analyses, looked up by component key
    pub analyses: Vec<FieldMap>,
    /// Photos, looked up by sample number
    pub photos: Vec<FieldMap>,
    /// Documents handed over or requested
    pub documents: Vec<FieldMap>,
    /// Deviations from the survey standard
    pub deviations: Vec<FieldMap>,
}

/// The complete synthesis document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    /// Global counts
    pub global: GlobalCounts,
    /// Per-room view
    #[serde(rename = "pieces")]
    pub rooms: Vec<Room>,
    /// Per-zone view
    #[serde(rename = "zpsos")]
    pub zones: Vec<Zone>,
    /// Documents handed over and requested
    pub documents: Documents,
    /// Deviations from the survey standard
    #[serde(rename = "ecarts_norme")]
    pub deviations: Vec<Deviation>,
}

/// Zone and sample counts over the whole survey
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCounts {
    /// Whether any zone reports asbestos
    #[serde(rename = "presence_amiante")]
    pub asbestos_present: bool,
    /// Zones
    #[serde(rename = "nb_zones_total")]
    pub zones_total: usize,
    /// Zones reporting asbestos
    #[serde(rename = "nb_zones_presence")]
    pub zones_presence: usize,
    /// Zones reporting no asbestos
    #[serde(rename = "nb_zones_absence")]
    pub zones_absence: usize,
    /// Suspect zones
    #[serde(rename = "nb_zones_suspect")]
    pub zones_suspect: usize,
    /// Distinct sample numbers
    #[serde(rename = "nb_prelevements_total")]
    pub samples_total: usize,
    /// Zone samples reporting asbestos
    #[serde(rename = "nb_prelevements_presence")]
    pub samples_presence: usize,
    /// Zone samples reporting no asbestos
    #[serde(rename = "nb_prelevements_absence")]
    pub samples_absence: usize,
}

/// One room and the zones located in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room name as written in the zone locations
    #[serde(rename = "piece")]
    pub name: String,
    /// Overall result of the room's zones
    #[serde(rename = "resultat_global")]
    pub overall_result: String,
    /// Zones located in the room
    #[serde(rename = "zpsos")]
    pub zones: Vec<Zone>,
}

/// One suspect zone (ZPSO), built from one material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: String,
    /// Material description
    pub description: String,
    /// Result as written for the material
    #[serde(rename = "resultat")]
    pub result: String,
    /// Rooms the zone spans
    #[serde(rename = "localisations")]
    pub locations: Vec<String>,
    /// Samples taken in the zone
    #[serde(rename = "prelevements")]
    pub samples: Vec<ZoneSample>,
}

/// One sample of a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSample {
    /// Sample number
    pub id: String,
    /// Where the sample was taken
    #[serde(rename = "localisation")]
    pub location: String,
    /// Photo path
    pub photo: String,
    /// Laboratory report reference
    pub pv: String,
    /// Sample result
    #[serde(rename = "resultat")]
    pub result: String,
    /// Laboratory comment
    #[serde(rename = "commentaire_labo")]
    pub lab_comment: String,
}

/// Documents handed over to and requested by the surveyor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    /// Handed over
    #[serde(rename = "remis")]
    pub handed_over: Vec<String>,
    /// Requested
    #[serde(rename = "demandes")]
    pub requested: Vec<String>,
}

/// One deviation from the survey standard with its ticked boxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    /// Observation text
    pub observation: String,
    /// "Yes" box
    #[serde(rename = "oui")]
    pub yes: bool,
    /// "No" box
    #[serde(rename = "non")]
    pub no: bool,
    /// "Not applicable" box
    #[serde(rename = "so")]
    pub not_applicable: bool,
}

impl Synthesis {
    /// Pretty-printed JSON (two-space indent, non-ASCII kept as-is)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Whether a deviation box value counts as ticked
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    TRUE_FLAGS.contains(&value.as_str())
}

/// Build the synthesis from the record lists of the survey tables.
pub fn build_synthesis(tables: &SynthesisTables) -> Synthesis {
    let samples = index_by(
        &tables.samples,
        &["LiColonne_Num_Prelevement", "Num_Prelevement"],
    );
    let analyses = index_by(
        &tables.analyses,
        &["LiColonne_Clef_composant", "Clef_composant"],
    );
    let photos = index_by(
        &tables.photos,
        &["LiColonne_Photo", "Photo", "LiColonne_LiColonne_Photo"],
    );
    let lookups = Lookups {
        samples: &samples,
        analyses: &analyses,
        photos: &photos,
    };

    let zones: Vec<Zone> = tables
        .materials
        .iter()
        .enumerate()
        .map(|(index, material)| build_zone(index, material, &lookups))
        .collect();

    Synthesis {
        global: count_zones(&zones),
        rooms: group_by_room(&zones),
        documents: build_documents(&tables.documents),
        deviations: tables.deviations.iter().map(build_deviation).collect(),
        zones,
    }
}

type Index<'a> = HashMap<&'a str, &'a FieldMap>;

struct Lookups<'i, 'a> {
    samples: &'i Index<'a>,
    analyses: &'i Index<'a>,
    photos: &'i Index<'a>,
}

fn build_zone(index: usize, material: &FieldMap, lookups: &Lookups<'_, '_>) -> Zone {
    let id = match first_of(
        material,
        &["LiColonne_Id_Prelevement", "Num_ZPSO", "Num_Materiau"],
    ) {
        "" => format!("ZPSO-{}", index + 1),
        id => id.to_string(),
    };

    let raw_location = first_of(material, &["LiColonne_Localisation", "Local_visite"]);
    let details = match first_of(material, &["LiColonne_Detail_loc"]) {
        "" => split_list(raw_location),
        details => split_list(details),
    };

    let samples = split_list(first_of(
        material,
        &["LiColonne_num_prelevement", "num_prelevement"],
    ))
    .into_iter()
    .enumerate()
    .map(|(position, sample_id)| {
        build_sample(
            sample_id,
            details.get(position).copied(),
            raw_location,
            material,
            lookups,
        )
    })
    .collect();

    Zone {
        id,
        description: first_of(
            material,
            &["LiColonne_Description", "materiau_produit", "Description"],
        )
        .to_string(),
        result: first_of(material, &["LiColonne_Resultats", "resultat"]).to_string(),
        locations: split_list(raw_location)
            .into_iter()
            .map(squeeze_spaces)
            .collect(),
        samples,
    }
}

fn build_sample(
    id: &str,
    detail: Option<&str>,
    raw_location: &str,
    material: &FieldMap,
    lookups: &Lookups<'_, '_>,
) -> ZoneSample {
    let empty = FieldMap::new();
    let sample = lookups.samples.get(id).copied().unwrap_or(&empty);

    let location = match detail {
        Some(detail) => detail,
        None => match first_of(sample, &["LiColonne_Localisation", "Localisation"]) {
            "" => raw_location,
            location => location,
        },
    };

    let component_key = first_of(sample, &["LiColonne_ClefComposant", "ClefComposant"]);
    let pv = match lookups.analyses.get(component_key) {
        Some(analysis) => first_of(analysis, &["LiColonne_Repertoire_plan", "Repertoire_plan"]),
        _ => first_of(sample, &["LiColonne_PV_Analyse_Lie", "PV_Analyse_Lie"]),
    };

    let photo = lookups
        .photos
        .get(id)
        .map(|photo| first_of(photo, &["LiColonne_Chemin_acces", "Chemin_acces"]))
        .unwrap_or("");

    let result = match first_of(
        sample,
        &["LiColonne_Resultat_reperage", "Resultat_reperage"],
    ) {
        "" => first_of(material, &["LiColonne_Resultats"]),
        result => result,
    };

    ZoneSample {
        id: id.to_string(),
        location: location.to_string(),
        photo: photo.to_string(),
        pv: pv.to_string(),
        result: result.to_string(),
        lab_comment: first_of(sample, &["LiColonne_Commentaires_Labo", "Commentaires_Labo"])
            .to_string(),
    }
}

fn group_by_room(zones: &[Zone]) -> Vec<Room> {
    let mut seen = HashSet::new();
    zones
        .iter()
        .flat_map(|zone| zone.locations.iter())
        .filter(|room| seen.insert(*room))
        .map(|room| {
            let zones: Vec<Zone> = zones
                .iter()
                .filter(|zone| zone.locations.contains(room))
                .cloned()
                .collect();
            Room {
                name: room.clone(),
                overall_result: overall_result(zones.iter().map(|zone| zone.result.as_str()))
                    .to_string(),
                zones,
            }
        })
        .collect()
}

fn count_zones(zones: &[Zone]) -> GlobalCounts {
    let count = |test: fn(&str) -> bool| zones.iter().filter(|zone| test(&zone.result)).count();
    let samples = || zones.iter().flat_map(|zone| zone.samples.iter());

    let distinct_samples: HashSet<&str> = samples().map(|sample| sample.id.as_str()).collect();

    GlobalCounts {
        asbestos_present: zones.iter().any(|zone| is_presence(&zone.result)),
        zones_total: zones.len(),
        zones_presence: count(is_presence),
        zones_absence: count(is_absence),
        zones_suspect: count(is_suspect),
        samples_total: distinct_samples.len(),
        samples_presence: samples().filter(|sample| is_presence(&sample.result)).count(),
        samples_absence: samples().filter(|sample| is_absence(&sample.result)).count(),
    }
}

fn build_documents(records: &[FieldMap]) -> Documents {
    let filled = |keys: &[&str]| -> Vec<String> {
        records
            .iter()
            .map(|record| first_of(record, keys))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    };

    Documents {
        handed_over: filled(&["LiColonne_Doc_Remis", "Doc_Remis", "Document", "Libelle"]),
        requested: filled(&["LiColonne_Doc_Demandes", "Doc_Demandes"]),
    }
}

fn build_deviation(record: &FieldMap) -> Deviation {
    Deviation {
        observation: first_of(record, &["LiColonne_Observation", "Observation", "Libelle"])
            .to_string(),
        yes: parse_flag(first_of(record, &["LiColonne_Oui", "Oui"])),
        no: parse_flag(first_of(record, &["LiColonne_Non", "Non"])),
        not_applicable: parse_flag(first_of(record, &["LiColonne_SO", "SO", "SansObjet"])),
    }
}
