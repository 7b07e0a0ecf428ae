use std::collections::HashSet;
use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/sequences.json");
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

    let sequences = catalog.get("sequences").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'sequences' field\n\
             The catalog must have a top-level 'sequences' array.\n"
        );
    });

    let seqs = sequences.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'sequences' must be an array\n\
             Got: {sequences}\n"
        );
    });

    let total_profiles = validate_sequences(seqs);

    println!(
        "cargo:warning=Validated catalog: {} sequences, {total_profiles} compatibility profiles",
        seqs.len()
    );
}

fn validate_sequences(seqs: &[serde_json::Value]) -> usize {
    let mut total_profiles = 0;
    let mut seen_ids = HashSet::new();

    for (i, sequence) in seqs.iter().enumerate() {
        let seq_id = sequence
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        assert!(
            seen_ids.insert(seq_id.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate sequence id '{seq_id}' (index {i})\n"
        );

        validate_sequence_fields(sequence, seq_id, i);
        total_profiles += validate_sequence_profiles(sequence, seq_id);
    }

    total_profiles
}

fn validate_sequence_fields(sequence: &serde_json::Value, seq_id: &str, index: usize) {
    for field in ["id", "title", "category", "priceCents", "createdAt", "profiles"] {
        assert!(
            sequence.get(field).is_some(),
            "\n\nCATALOG BUILD ERROR: Sequence '{seq_id}' (index {index}) missing '{field}' field\n"
        );
    }
}

fn validate_sequence_profiles(sequence: &serde_json::Value, seq_id: &str) -> usize {
    let Some(profiles) = sequence.get("profiles").and_then(|p| p.as_array()) else {
        return 0;
    };

    for (j, profile) in profiles.iter().enumerate() {
        for field in ["id", "propName", "pixelCount"] {
            assert!(
                profile.get(field).is_some(),
                "\n\nCATALOG BUILD ERROR: Sequence '{seq_id}' profile {j} missing '{field}' field\n"
            );
        }

        if let Some(difficulty) = profile.get("difficulty").and_then(|d| d.as_str()) {
            assert!(
                matches!(difficulty, "beginner" | "intermediate" | "advanced"),
                "\n\nCATALOG BUILD ERROR: Sequence '{seq_id}' profile {j} has unknown difficulty '{difficulty}'\n\
                 Expected one of: beginner, intermediate, advanced.\n"
            );
        }
    }

    profiles.len()
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/sequences.json");
    println!("cargo:rerun-if-changed=build.rs");
}
