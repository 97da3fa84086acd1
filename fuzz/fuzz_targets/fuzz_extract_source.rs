#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode and extract without panicking
    let text = amiante_json::decode::decode_source(data);
    let parsed = amiante_json::extract::extract_source("fuzz.xml", &text);

    // Every extracted value is a single normalized line
    for item in parsed.items().iter().chain(parsed.flat()) {
        for value in item.values() {
            assert_eq!(&amiante_json::extract::collapse_whitespace(value), value);
        }
    }

    // The document must always serialize and read back
    if let Ok(json) = parsed.to_json() {
        let back = amiante_json::model::ParsedSource::from_json(&json);
        assert_eq!(back.ok().as_ref(), Some(&parsed));
    }

    // Any records feed the synthesis without panicking
    let records = parsed.records().to_vec();
    let tables = amiante_json::synthesis::SynthesisTables {
        materials: records.clone(),
        samples: records.clone(),
        deviations: records,
        ..Default::default()
    };
    let synthesis = amiante_json::synthesis::build_synthesis(&tables);
    assert_eq!(synthesis.zones.len(), parsed.records().len());
    let _ = amiante_json::synthesis::render_html(&synthesis);
});
