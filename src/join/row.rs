use serde::{Deserialize, Serialize};

/// One material, denormalized with its samples and the report header.
///
/// Columns serialize under their export names, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Building address (`Immeuble_Adresse1`)
    #[serde(rename = "Nom_EI")]
    pub nom_ei: String,
    /// Management unit: report number, else mission number
    #[serde(rename = "Num_UG")]
    pub num_ug: String,
    /// Town of the building
    #[serde(rename = "Commune")]
    pub commune: String,
    /// Room or location of the material
    #[serde(rename = "Local_visite")]
    pub local_visite: String,
    /// Floor
    #[serde(rename = "Etage")]
    pub etage: String,
    /// Occupancy; never filled from the exports
    pub occupation: String,
    /// Report date
    pub date_realisation: String,
    /// Surveyor name
    pub operateur: String,
    /// Report reference
    pub reference_rapport: String,
    /// Building component (`Ouvrages`)
    pub composant_construction: String,
    /// Material or product description
    pub materiau_produit: String,
    /// Sample numbers, `"; "`-separated when gathered from the samples table
    pub num_prelevement: String,
    /// Asbestos finding
    pub resultat: String,
    /// ZPSO applicability (`Id_Prelevement`)
    #[serde(rename = "applicabilite_ZPSO")]
    pub applicabilite_zpso: String,
    /// State of conservation
    pub etat_conservation: String,
    /// Quantity
    pub quantite: String,
    /// Unit of the quantity
    #[serde(rename = "unité")]
    pub unite: String,
    /// PAH (HAP) finding
    #[serde(rename = "resultat_Hap")]
    pub resultat_hap: String,
}

/// Export names of the [`OutputRow`] columns, in serialization order.
pub const OUTPUT_COLUMNS: [&str; 18] = [
    "Nom_EI",
    "Num_UG",
    "Commune",
    "Local_visite",
    "Etage",
    "occupation",
    "date_realisation",
    "operateur",
    "reference_rapport",
    "composant_construction",
    "materiau_produit",
    "num_prelevement",
    "resultat",
    "applicabilite_ZPSO",
    "etat_conservation",
    "quantite",
    "unité",
    "resultat_Hap",
];
