use super::*;

fn record(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn collection(items: Vec<FieldMap>) -> ParsedSource {
    ParsedSource::Collection {
        source: "table.xml".to_string(),
        item_tag: "LiItem_table".to_string(),
        items,
    }
}

fn flat(data: FieldMap) -> ParsedSource {
    ParsedSource::Flat {
        source: "Table_Z_Amiante_General.xml".to_string(),
        data,
    }
}

fn sample(material: &str, id: &str, result: &str) -> FieldMap {
    record(&[
        ("Num_Materiau", material),
        ("Num_Prelevement", id),
        ("Resultat_reperage", result),
    ])
}

#[test]
fn test_only_matching_samples_contribute() {
    let materials = collection(vec![record(&[("Num_Materiau", "M1")])]);
    let samples = collection(vec![
        sample("M1", "P1", "Positif"),
        sample("M2", "P2", "Négatif"),
    ]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));

    assert_eq!(payload.rows.len(), 1);
    assert_eq!(payload.rows[0].num_prelevement, "P1");
    assert_eq!(payload.rows[0].resultat, "Positif");
}

#[test]
fn test_missing_general_uses_literal_defaults() {
    let materials = collection(vec![record(&[("Num_Materiau", "M1")]), record(&[])]);
    let payload = build_rows(
        &materials,
        &ParsedSource::missing("s.xml"),
        &ParsedSource::missing("g.xml"),
    );

    assert_eq!(payload.rows.len(), 2);
    for row in &payload.rows {
        assert_eq!(row.nom_ei, "Adresse non précisée");
        assert_eq!(row.num_ug, "UG");
        assert_eq!(row.commune, "");
        assert_eq!(row.reference_rapport, "");
    }
}

#[test]
fn test_local_visite_falls_back_to_detail_loc() {
    let materials = collection(vec![record(&[
        ("Localisation", ""),
        ("Detail_loc", "Cave"),
    ])]);
    let payload = build_rows(
        &materials,
        &ParsedSource::missing("s.xml"),
        &ParsedSource::missing("g.xml"),
    );

    assert_eq!(payload.rows[0].local_visite, "Cave");
}

#[test]
fn test_empty_materials_yield_no_rows() {
    let samples = collection(vec![sample("M1", "P1", "Positif")]);
    for materials in [ParsedSource::missing("m.xml"), collection(Vec::new())] {
        let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
        assert!(payload.rows.is_empty());
        assert_eq!(payload.meta.count, 0);
    }
}

#[test]
fn test_general_fields_fill_every_row() {
    let general = flat(record(&[
        ("Immeuble_Adresse1", "12 rue des Lilas"),
        ("Immeuble_Commune", "Dijon"),
        ("Loc_Etage", "R+1"),
        ("Gen_Date_rapport", "14/03/2024"),
        ("Gen_Nom_operateur", "C. Martin"),
        ("Gen_Num_rapport", ""),
        ("Gen_Num_mission", "MIS-9"),
    ]));
    let materials = collection(vec![record(&[("Dossier_Materiau", "DOS-1")])]);

    let payload = build_rows(&materials, &ParsedSource::missing("s.xml"), &general);
    let row = &payload.rows[0];

    assert_eq!(row.nom_ei, "12 rue des Lilas");
    assert_eq!(row.num_ug, "MIS-9");
    assert_eq!(row.commune, "Dijon");
    assert_eq!(row.etage, "R+1");
    assert_eq!(row.date_realisation, "14/03/2024");
    assert_eq!(row.operateur, "C. Martin");
    // Empty report number falls through to the material's file number
    assert_eq!(row.reference_rapport, "DOS-1");
    assert_eq!(row.occupation, "");
}

#[test]
fn test_report_number_feeds_ug_and_reference() {
    let general = flat(record(&[
        ("Gen_Num_rapport", "R-2024-01"),
        ("Gen_Num_mission", "MIS-9"),
    ]));
    let materials = collection(vec![record(&[("Dossier_Materiau", "DOS-1")])]);

    let payload = build_rows(&materials, &ParsedSource::missing("s.xml"), &general);
    assert_eq!(payload.rows[0].num_ug, "R-2024-01");
    assert_eq!(payload.rows[0].reference_rapport, "R-2024-01");
}

#[test]
fn test_collection_general_is_ignored() {
    let general = collection(vec![record(&[("Immeuble_Adresse1", "ignored")])]);
    let materials = collection(vec![record(&[])]);

    let payload = build_rows(&materials, &ParsedSource::missing("s.xml"), &general);
    assert_eq!(payload.rows[0].nom_ei, DEFAULT_ADDRESS);
}

#[test]
fn test_join_key_fallback_and_trim() {
    let materials = collection(vec![
        record(&[("Num_Materiau", ""), ("Reperage_3", "R3")]),
        record(&[("Id_Prelevement_Int_txt", "INT-7")]),
    ]);
    let samples = collection(vec![
        sample(" R3 ", "P-R3", "Négatif"),
        sample("INT-7", "P-INT", "Positif"),
    ]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
    assert_eq!(payload.rows[0].num_prelevement, "P-R3");
    assert_eq!(payload.rows[1].num_prelevement, "P-INT");
    assert_eq!(payload.rows[1].resultat, "Positif");
}

#[test]
fn test_empty_key_matches_samples_without_material() {
    let materials = collection(vec![record(&[("Description", "Colle")])]);
    let samples = collection(vec![
        record(&[("Num_Prelevement", "P-orphan")]),
        sample("", "P-blank", ""),
        sample("M1", "P1", "Positif"),
    ]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
    assert_eq!(payload.rows[0].num_prelevement, "P-orphan; P-blank");
    assert_eq!(payload.rows[0].materiau_produit, "Colle");
}

#[test]
fn test_sample_ids_skip_empty_and_keep_order() {
    let materials = collection(vec![record(&[("Num_Materiau", "M1")])]);
    let samples = collection(vec![
        sample("M1", "P3", ""),
        sample("M1", "", "Positif"),
        sample("M1", "P1", "Négatif"),
    ]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
    let row = &payload.rows[0];
    assert_eq!(row.num_prelevement, "P3; P1");
    // First related sample decides, even when its result is empty
    assert_eq!(row.resultat, "");
}

#[test]
fn test_material_fields_take_precedence() {
    let materials = collection(vec![record(&[
        ("Num_Materiau", "M1"),
        ("Resultats", "Présence"),
        ("num_prelevement", "P-MAT"),
        ("Id_Prelevement", "ZPSO-1"),
        ("Etat_Conservation", "EP"),
        ("quantite", "12"),
        ("unite", "m²"),
        ("resultat_Hap", "Absence"),
        ("Ouvrages", "Sols"),
        ("Partie_Inspectee", "Dalles"),
    ])]);
    let samples = collection(vec![sample("M1", "P1", "Absence")]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
    let row = &payload.rows[0];

    assert_eq!(row.resultat, "Présence");
    assert_eq!(row.num_prelevement, "P-MAT");
    assert_eq!(row.applicabilite_zpso, "ZPSO-1");
    assert_eq!(row.etat_conservation, "EP");
    assert_eq!(row.quantite, "12");
    assert_eq!(row.unite, "m²");
    assert_eq!(row.resultat_hap, "Absence");
    assert_eq!(row.composant_construction, "Sols");
    assert_eq!(row.materiau_produit, "Dalles");
}

#[test]
fn test_rows_keep_material_order_without_dedup() {
    let materials = collection(vec![
        record(&[("Num_Materiau", "M2")]),
        record(&[("Num_Materiau", "M1")]),
        record(&[("Num_Materiau", "M2")]),
    ]);
    let samples = collection(vec![sample("M1", "P1", "x"), sample("M2", "P2", "y")]);

    let payload = build_rows(&materials, &samples, &ParsedSource::missing("g.xml"));
    let ids: Vec<&str> = payload
        .rows
        .iter()
        .map(|r| r.num_prelevement.as_str())
        .collect();
    assert_eq!(ids, vec!["P2", "P1", "P2"]);
    assert_eq!(payload.meta.count, 3);
}

#[test]
fn test_payload_json_layout() {
    let materials = collection(vec![record(&[("unite", "m²")])]);
    let payload = build_rows(
        &materials,
        &ParsedSource::missing("s.xml"),
        &ParsedSource::missing("g.xml"),
    );
    let json = payload.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["meta"]["generatedFrom"], "xml");
    assert_eq!(
        value["meta"]["sources"],
        serde_json::json!([
            "Table_Z_Amiante.xml",
            "Table_Z_Amiante_prelevements.xml",
            "Table_Z_Amiante_General.xml"
        ])
    );
    assert_eq!(value["meta"]["count"], 1);
    assert_eq!(value["rows"][0]["unité"], "m²");

    // Columns appear in the fixed order
    let row = &json[json.find("\"Nom_EI\"").unwrap()..];
    let mut last = 0;
    for column in OUTPUT_COLUMNS {
        let at = row.find(&format!("\"{column}\"")).unwrap();
        assert!(at >= last, "{column} out of order");
        last = at;
    }
}
