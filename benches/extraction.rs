use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use amiante_json::extract::extract_source;
use amiante_json::join::build_rows;

fn generate_materials_xml(num_items: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<LiTable_Z_Amiante>"#,
    );

    for i in 0..num_items {
        xml.push_str(&format!(
            r#"
  <LiItem_table_Z_Amiante>
    <Num_Materiau>M{}</Num_Materiau>
    <LiColonne_Localisation>Pièce {}
      niveau {}</LiColonne_Localisation>
    <Ouvrages>Revêtements durs (murs)</Ouvrages>
    <Description>Enduit plâtre</Description>
    <Etat_Conservation>EP</Etat_Conservation>
    <quantite>{}</quantite>
    <unite>m²</unite>
  </LiItem_table_Z_Amiante>"#,
            i,
            i % 12,
            i % 3,
            i * 2
        ));
    }

    xml.push_str("\n</LiTable_Z_Amiante>");
    xml
}

fn generate_samples_xml(num_items: usize) -> String {
    let mut xml = String::from("<LiTable_Z_Amiante_prelevements>");
    for i in 0..num_items {
        xml.push_str(&format!(
            r#"
  <LiItem_table_Z_Amiante_prelevements>
    <Num_Materiau>M{}</Num_Materiau>
    <Num_Prelevement>P{}</Num_Prelevement>
    <Resultat_reperage>{}</Resultat_reperage>
  </LiItem_table_Z_Amiante_prelevements>"#,
            i,
            i,
            if i % 4 == 0 { "Positif" } else { "Négatif" }
        ));
    }
    xml.push_str("\n</LiTable_Z_Amiante_prelevements>");
    xml
}

fn bench_extract_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_collection");

    for num_items in [100, 1000, 5000] {
        let xml = generate_materials_xml(num_items);

        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_items), &xml, |b, xml| {
            b.iter(|| {
                let parsed = extract_source("Table_Z_Amiante.xml", black_box(xml));
                black_box(parsed.count());
            });
        });
    }

    group.finish();
}

fn bench_build_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_rows");

    for num_items in [100, 1000] {
        let materials = extract_source("Table_Z_Amiante.xml", &generate_materials_xml(num_items));
        let samples = extract_source(
            "Table_Z_Amiante_prelevements.xml",
            &generate_samples_xml(num_items),
        );
        let general = extract_source("Table_Z_Amiante_General.xml", "");

        group.throughput(Throughput::Elements(num_items as u64));
        group.bench_function(BenchmarkId::from_parameter(num_items), |b| {
            b.iter(|| {
                let payload = build_rows(&materials, &samples, &general);
                black_box(payload.meta.count);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_collection, bench_build_rows);
criterion_main!(benches);
