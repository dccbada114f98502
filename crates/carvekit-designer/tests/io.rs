//! Save/load round trips through real files.

use carvekit_designer::{DesignDocument, Editor, Point, Shape};

#[test]
fn save_and_load_round_trip() {
    let mut editor = Editor::new();
    editor.add_leaf(Point::new(0.0, 0.0), Point::new(40.0, 0.0));
    editor.add_tri_arc(
        Point::new(50.0, 50.0),
        Point::new(150.0, 50.0),
        Point::new(100.0, 150.0),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.json");
    editor.to_document("round trip").save_to_file(&path).unwrap();

    let loaded = DesignDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded.metadata.name, "round trip");

    let mut restored = Editor::new();
    restored.load_document(&loaded).unwrap();
    assert_eq!(restored.shape_count(), 2);

    let original: Vec<Shape> = editor.store.iter().map(|o| o.shape.clone()).collect();
    let reloaded: Vec<Shape> = restored.store.iter().map(|o| o.shape.clone()).collect();
    assert_eq!(original, reloaded);
}

#[test]
fn load_rejects_other_schema_versions() {
    let mut editor = Editor::new();
    editor.add_leaf(Point::new(0.0, 0.0), Point::new(40.0, 0.0));
    let mut document = editor.to_document("versioned");
    document.version = "1.0".to_string();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.json");
    std::fs::write(&path, document.to_json().unwrap()).unwrap();

    assert!(DesignDocument::load_from_file(&path).is_err());
}

#[test]
fn load_rejects_corrupt_shape_records() {
    let json = r#"{
        "version": "2.0",
        "metadata": {
            "name": "bad",
            "created": "2026-01-01T00:00:00Z",
            "modified": "2026-01-01T00:00:00Z"
        },
        "shapes": [
            { "type": "LEAF", "vertices": [{"x": 0.0, "y": 0.0}, {"x": 10.0, "y": 0.0}] }
        ]
    }"#;
    // A leaf without a radius is structurally present but invalid.
    assert!(DesignDocument::parse(json).is_err());
}

#[test]
fn loading_a_bad_document_leaves_the_canvas_untouched() {
    let mut editor = Editor::new();
    editor.add_leaf(Point::new(0.0, 0.0), Point::new(40.0, 0.0));

    let mut bad = editor.to_document("bad");
    bad.version = "3.0".to_string();

    let mut target = Editor::new();
    target.add_tri_arc(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 10.0),
    );
    assert!(target.load_document(&bad).is_err());
    assert_eq!(target.shape_count(), 1);
}
