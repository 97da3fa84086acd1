//! Standalone HTML page of a [`Synthesis`].

use quick_xml::escape::partial_escape as escape;

use super::{Synthesis, Zone, ZoneSample};

const STYLE: &str = "    body { font-family: Arial, sans-serif; margin: 2rem; line-height: 1.5; }
    h1 { color: #0d47a1; }
    section { margin-bottom: 1.5rem; }";

/// Render the synthesis as a single HTML page. All text is escaped.
pub fn render_html(synthesis: &Synthesis) -> String {
    let global = &synthesis.global;

    let rooms: Vec<String> = synthesis
        .rooms
        .iter()
        .map(|room| {
            let zones: String = room
                .zones
                .iter()
                .map(|zone| {
                    format!(
                        "<li><strong>{}</strong> — {} — {}<ul>{}</ul></li>",
                        escape(zone.id.as_str()),
                        escape(zone.description.as_str()),
                        escape(zone.result.as_str()),
                        sample_items(zone, true)
                    )
                })
                .collect();
            format!(
                "<section><h3>Pièce : {} ({})</h3><ul>{}</ul></section>",
                escape(room.name.as_str()),
                escape(room.overall_result.as_str()),
                zones
            )
        })
        .collect();

    let zones: Vec<String> = synthesis
        .zones
        .iter()
        .map(|zone| {
            let locations = match zone.locations.join("; ") {
                joined if joined.is_empty() => "Non précisées".to_string(),
                joined => escape(joined.as_str()).into_owned(),
            };
            format!(
                "<section><h3>{} — {} — {}</h3><p>Localisations : {}</p><ul>{}</ul></section>",
                escape(zone.id.as_str()),
                escape(zone.description.as_str()),
                escape(zone.result.as_str()),
                locations,
                sample_items(zone, false)
            )
        })
        .collect();

    let deviations: String = synthesis
        .deviations
        .iter()
        .map(|deviation| {
            format!(
                "<li>{} — Oui: {} / Non: {} / SO: {}</li>",
                escape(deviation.observation.as_str()),
                mark(deviation.yes),
                mark(deviation.no),
                mark(deviation.not_applicable)
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html lang="fr">
<head>
  <meta charset="utf-8" />
  <title>Synthèse amiante</title>
  <style>
{STYLE}
  </style>
</head>
<body>
  <h1>Synthèse amiante (reconstruite)</h1>
  <p><strong>Zones :</strong> {} | Présence : {} | Absence : {} | Suspect : {}</p>
  <p><strong>Prélèvements :</strong> {} | Présence : {} | Absence : {}</p>
  <h2>Vue par pièce</h2>
  {}
  <h2>Vue par ZPSO</h2>
  {}
  <h2>Documents</h2>
  <p>Remis : {}</p>
  <p>Demandés : {}</p>
  <h2>Écarts normatifs</h2>
  <ul>{}</ul>
</body>
</html>"#,
        global.zones_total,
        global.zones_presence,
        global.zones_absence,
        global.zones_suspect,
        global.samples_total,
        global.samples_presence,
        global.samples_absence,
        rooms.join("\n"),
        zones.join("\n"),
        joined_or_none(&synthesis.documents.handed_over),
        joined_or_none(&synthesis.documents.requested),
        deviations
    )
}

fn sample_items(zone: &Zone, bold_id: bool) -> String {
    if zone.samples.is_empty() {
        return "<li>Aucun prélèvement</li>".to_string();
    }
    zone.samples
        .iter()
        .map(|sample| sample_item(sample, bold_id))
        .collect()
}

fn sample_item(sample: &ZoneSample, bold_id: bool) -> String {
    let id = escape(sample.id.as_str());
    let mut item = if bold_id {
        format!("<li><strong>{id}</strong>")
    } else {
        format!("<li>{id}")
    };
    item.push_str(" — ");
    item.push_str(&escape(sample.location.as_str()));
    if !sample.photo.is_empty() {
        item.push_str(" — Photo : ");
        item.push_str(&escape(sample.photo.as_str()));
    }
    if !sample.pv.is_empty() {
        item.push_str(" — PV labo : ");
        item.push_str(&escape(sample.pv.as_str()));
    }
    item.push_str("</li>");
    item
}

fn joined_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "Aucun".to_string()
    } else {
        escape(values.join(", ").as_str()).into_owned()
    }
}

fn mark(ticked: bool) -> &'static str {
    if ticked {
        "X"
    } else {
        ""
    }
}
