use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/threats.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let threats = catalog.get("threats").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'threats' field\n\
             The catalog must have a top-level 'threats' object keyed by threat id.\n"
        );
    });

    let threats = threats.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'threats' must be an object\n\
             Got: {threats}\n"
        );
    });

    let total_records = validate_threats(threats);

    println!(
        "cargo:warning=Validated catalog: {} threats, {total_records} total sub-records",
        threats.len()
    );
}

fn validate_threats(threats: &serde_json::Map<String, serde_json::Value>) -> usize {
    let mut total_records = 0;

    for (id, entry) in threats {
        assert!(
            entry.is_object(),
            "\n\nCATALOG BUILD ERROR: Threat '{id}' must be a JSON object\n"
        );
        total_records += validate_sub_records(entry, id, "objects");
        total_records += validate_sub_records(entry, id, "implementations");
    }

    total_records
}

fn validate_sub_records(entry: &serde_json::Value, threat_id: &str, kind: &str) -> usize {
    // Missing sequences are valid and treated as empty at load time
    let Some(records) = entry.get(kind) else {
        return 0;
    };

    let records = records.as_array().unwrap_or_else(|| {
        panic!("\n\nCATALOG BUILD ERROR: Threat '{threat_id}' field '{kind}' must be an array\n")
    });

    for (i, record) in records.iter().enumerate() {
        assert!(
            record.get("id").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Threat '{threat_id}' {kind}[{i}] missing string 'id' field\n"
        );
        assert!(
            record.get("name").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Threat '{threat_id}' {kind}[{i}] missing string 'name' field\n"
        );
    }

    records.len()
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/threats.json");
    println!("cargo:rerun-if-changed=build.rs");
}
