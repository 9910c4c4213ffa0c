use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const MODEL: &str = r#"{
    "namespaces": [
        {"name": "demo.ui", "doc": "User interface widgets. Everything visible lives here."}
    ],
    "types": [
        {
            "qualified_name": "demo.core.Component",
            "kind": "class",
            "line": 5,
            "doc": "Base of everything drawable.",
            "fields": [{"name": "id", "type": "String"}],
            "methods": [{"name": "render", "returns": "void",
                         "doc": "Renders this component."}]
        },
        {
            "qualified_name": "demo.ui.Paintable",
            "kind": "interface",
            "methods": [{"name": "paint", "returns": "void",
                         "params": [{"name": "canvas", "type": "Canvas"}],
                         "doc": "Paints onto the given canvas."}]
        },
        {
            "qualified_name": "demo.ui.Widget",
            "kind": "class",
            "superclass": "demo.core.Component",
            "interfaces": ["demo.ui.Paintable"],
            "line": 12,
            "doc": "A concrete widget.",
            "constructors": [{"line": 12}],
            "methods": [{"name": "paint", "returns": "void",
                         "params": [{"name": "canvas", "type": "Canvas"}]}]
        },
        {
            "qualified_name": "vendor.Legacy",
            "kind": "class",
            "external": true,
            "methods": [{"name": "refresh", "returns": "void"}]
        },
        {
            "qualified_name": "demo.ui.Panel",
            "kind": "class",
            "superclass": "vendor.Legacy",
            "doc": "Groups widgets."
        }
    ]
}"#;

#[test]
fn generates_relocatable_site() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(&model_path, MODEL).unwrap();
    let out = dir.path().join("site");

    Command::cargo_bin("refdoc")
        .unwrap()
        .arg("generate")
        .arg(&model_path)
        .arg("-o")
        .arg(&out)
        .arg("--title")
        .arg("Demo API")
        .assert()
        .success();

    // Output layout: one page per type, index per namespace, global pages
    // and assets at the root.
    assert!(out.join("index.html").exists());
    assert!(out.join("alltypes.html").exists());
    assert!(out.join("doc.css").exists());
    assert!(out.join("doc.js").exists());
    assert!(out.join("demo/core/index.html").exists());
    assert!(out.join("demo/core/Component.html").exists());
    assert!(out.join("demo/ui/index.html").exists());
    assert!(out.join("demo/ui/Widget.html").exists());
    assert!(out.join("demo/ui/Panel.html").exists());
    assert!(!out.join("vendor").exists());

    assert_eq!(
        fs::read_to_string(out.join("namespace-list")).unwrap(),
        "demo.core\ndemo.ui\n"
    );

    let widget = fs::read_to_string(out.join("demo/ui/Widget.html")).unwrap();
    // Chrome is root-relative from two levels down.
    assert!(widget.contains("href=\"../../doc.css\""));
    assert!(widget.contains("href=\"../../index.html\">Demo API</a>"));
    // The inherited field links across namespaces to its documented owner.
    assert!(widget.contains("../core/Component.html#id"));
    // The local paint() implements the interface declaration and borrows
    // its description.
    assert!(widget.contains("Implements"));
    assert!(widget.contains("Paints onto the given canvas."));

    let panel = fs::read_to_string(out.join("demo/ui/Panel.html")).unwrap();
    // Members of the undocumented superclass collapse behind the toggle.
    assert!(panel.contains("Show all inherited methods (1 more)"));
    assert!(panel.contains("<a class=\"extern\" title=\"vendor.Legacy\">Legacy</a>"));

    let ns_index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(ns_index.contains("href=\"demo/ui/index.html\""));
    assert!(ns_index.contains("User interface widgets."));
    assert!(!ns_index.contains("Everything visible lives here."));

    let all_types = fs::read_to_string(out.join("alltypes.html")).unwrap();
    assert!(all_types.contains("href=\"demo/ui/Widget.html\""));
    assert!(!all_types.contains("Legacy</a>"));
}

#[test]
fn regeneration_is_byte_stable() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(&model_path, MODEL).unwrap();

    let mut snapshots = Vec::new();
    for out_name in ["first", "second"] {
        let out = dir.path().join(out_name);
        Command::cargo_bin("refdoc")
            .unwrap()
            .arg("generate")
            .arg(&model_path)
            .arg("-o")
            .arg(&out)
            .arg("--title")
            .arg("Demo API")
            .arg("--parallelism")
            .arg("8")
            .assert()
            .success();
        snapshots.push(fs::read_to_string(out.join("demo/ui/Widget.html")).unwrap());
    }
    assert_eq!(snapshots[0], snapshots[1]);
}

#[test]
fn check_reports_cycles_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(
        &model_path,
        r#"{"types": [
            {"qualified_name": "a.A", "kind": "class", "superclass": "a.B"},
            {"qualified_name": "a.B", "kind": "class", "superclass": "a.A"}
        ]}"#,
    )
    .unwrap();

    Command::cargo_bin("refdoc")
        .unwrap()
        .arg("check")
        .arg(&model_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("cyclic class extension"));
}

#[test]
fn check_accepts_well_formed_model() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(&model_path, MODEL).unwrap();

    Command::cargo_bin("refdoc")
        .unwrap()
        .arg("check")
        .arg(&model_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 documented types"));
}

#[test]
fn rejects_malformed_model() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    fs::write(
        &model_path,
        r#"{"types": [{"qualified_name": "a..B", "kind": "class"}]}"#,
    )
    .unwrap();

    Command::cargo_bin("refdoc")
        .unwrap()
        .arg("check")
        .arg(&model_path)
        .assert()
        .failure();
}
