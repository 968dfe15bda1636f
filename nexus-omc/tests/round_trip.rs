//! Document -> graph-text -> document round-trip coverage

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn round_trip(docs: &[Value]) -> Vec<nexus_omc::ImportedEntity> {
    let ttl = nexus_omc::export_collection(docs).expect("export");
    let result = nexus_omc::import_collection(&ttl);
    assert!(result.success, "import failed: {:?}", result.error);
    result.entities
}

#[test]
fn location_round_trip_preserves_identity_and_scalars() {
    let doc = json!({
        "entityType": "Location",
        "schemaVersionTag": "https://movielabs.com/omc/json/schema/v2.6",
        "identifier": [{"scope": "me-nexus", "value": "loc-1", "combinedForm": "me-nexus:loc-1"}],
        "name": "Springfield Stage",
        "address": {"street": "1 Main St", "locality": "Springfield"},
        "coordinates": {"latitude": 46.78, "longitude": -92.1}
    });

    let entities = round_trip(std::slice::from_ref(&doc));
    assert_eq!(entities.len(), 1);

    let got = &entities[0];
    assert_eq!(got.entity_type, "Location");
    assert_eq!(got.entity_id, "me-nexus:loc-1");
    assert_eq!(got.name.as_deref(), Some("Springfield Stage"));
    assert_eq!(
        got.content["identifier"][0]["combinedForm"],
        json!("me-nexus:loc-1")
    );
    assert_eq!(
        got.content["address"],
        json!({"street": "1 Main St", "locality": "Springfield"})
    );
    assert_eq!(
        got.content["coordinates"],
        json!({"latitude": 46.78, "longitude": -92.1})
    );
}

#[test]
fn participant_round_trip_keeps_reference_as_object_form() {
    let docs = vec![
        json!({
            "entityType": "Location",
            "identifier": [{"combinedForm": "me-nexus:loc-1"}],
            "name": "Duluth Office"
        }),
        json!({
            "entityType": "Participant",
            "identifier": [{"combinedForm": "me-nexus:p-1"}],
            "name": "Alice Quist",
            "structuralCharacteristics": {
                "firstGivenName": "Alice",
                "familyName": "Quist",
                "jobTitle": "Gaffer",
                "Location": "me-nexus:loc-1",
                "contact": {"email": "alice@example.com"}
            },
            "functionalCharacteristics": {"functionalType": "crew"}
        }),
    ];

    let entities = round_trip(&docs);
    assert_eq!(entities.len(), 2);

    let participant = entities
        .iter()
        .find(|e| e.entity_type == "Participant")
        .unwrap();
    let sc = &participant.content["structuralCharacteristics"];
    assert_eq!(sc["firstGivenName"], json!("Alice"));
    assert_eq!(sc["jobTitle"], json!("Gaffer"));
    // A bare-string reference on input always comes back in object form.
    assert_eq!(sc["Location"], json!({"combinedForm": "me-nexus:loc-1"}));
    assert_eq!(sc["contact"], json!({"email": "alice@example.com"}));
    assert_eq!(
        participant.content["functionalCharacteristics"]["functionalType"],
        json!("crew")
    );
}

#[test]
fn asset_round_trip_preserves_typed_values() {
    let doc = json!({
        "entityType": "Asset",
        "identifier": [{"combinedForm": "me-nexus:a-1"}],
        "name": "Plate 004",
        "structuralCharacteristics": {
            "structuralType": "digital.image",
            "fileDetails": {
                "fileName": "plate_004",
                "fileExtension": "exr",
                "fileSize": 48234112
            }
        },
        "functionalCharacteristics": {"functionalType": "vfx.plate"}
    });

    let entities = round_trip(std::slice::from_ref(&doc));
    let sc = &entities[0].content["structuralCharacteristics"];
    assert_eq!(sc["structuralType"], json!("digital.image"));
    assert_eq!(sc["fileDetails"]["fileSize"], json!(48234112));
    assert_eq!(sc["fileDetails"]["fileExtension"], json!("exr"));
}

#[test]
fn task_round_trip_preserves_datetimes_and_references() {
    let docs = vec![
        json!({
            "entityType": "Participant",
            "identifier": [{"combinedForm": "me-nexus:p-1"}]
        }),
        json!({
            "entityType": "Task",
            "identifier": [{"combinedForm": "me-nexus:t-1"}],
            "taskType": "scout",
            "assignedTo": "me-nexus:p-1",
            "scheduling": {
                "scheduledStart": "2024-05-01T09:00:00Z",
                "scheduledEnd": "2024-05-01T17:00:00Z"
            }
        }),
    ];

    let entities = round_trip(&docs);
    let task = entities.iter().find(|e| e.entity_type == "Task").unwrap();
    assert_eq!(task.content["taskType"], json!("scout"));
    assert_eq!(
        task.content["assignedTo"],
        json!({"combinedForm": "me-nexus:p-1"})
    );
    assert_eq!(
        task.content["scheduling"]["scheduledStart"],
        json!("2024-05-01T09:00:00Z")
    );
}

#[test]
fn full_project_round_trip() {
    let docs = vec![
        json!({
            "entityType": "CreativeWork",
            "identifier": [{"combinedForm": "me-nexus:cw-1"}],
            "name": "North Shore",
            "creativeWorkType": "feature",
            "title": {"titleName": "North Shore", "titleType": "working"},
            "releaseDate": "2025-11-21"
        }),
        json!({
            "entityType": "Location",
            "identifier": [{"combinedForm": "me-nexus:loc-1"}],
            "address": {"street": "1 Main St", "locality": "Springfield"}
        }),
        json!({
            "entityType": "Participant",
            "identifier": [{"combinedForm": "me-nexus:p-1"}],
            "structuralCharacteristics": {"firstGivenName": "Alice", "Location": "me-nexus:loc-1"}
        }),
        json!({
            "entityType": "Character",
            "identifier": [{"combinedForm": "me-nexus:ch-1"}],
            "characterName": "Detective Halla",
            "portrayedBy": "me-nexus:p-1",
            "appearsIn": "me-nexus:cw-1"
        }),
        json!({
            "entityType": "Context",
            "identifier": [{"combinedForm": "me-nexus:ctx-1"}],
            "contextType": "shoot-day",
            "contextFor": "me-nexus:cw-1",
            "Location": "me-nexus:loc-1"
        }),
    ];

    let entities = round_trip(&docs);
    assert_eq!(entities.len(), 5);

    let by_type = |t: &str| entities.iter().find(|e| e.entity_type == t).unwrap();
    assert_eq!(by_type("CreativeWork").content["releaseDate"], json!("2025-11-21"));
    assert_eq!(
        by_type("Character").content["portrayedBy"],
        json!({"combinedForm": "me-nexus:p-1"})
    );
    assert_eq!(
        by_type("Context").content["contextFor"],
        json!({"combinedForm": "me-nexus:cw-1"})
    );
}
