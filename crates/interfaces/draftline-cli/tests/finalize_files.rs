use camino::Utf8PathBuf;
use draftline_cli::commands::{self, FinalizeInputs};
use tempfile::tempdir;

const GENERATED: &str = r#"const GeneratedComponent = () => {
  return (
    <section className="hero">
      <svg viewBox="0 0 2 2"><rect width="2" height="2"/></svg>
    </section>
  );
};
"#;

const BUNDLE: &str = r#"{
  "file_id": "AbC123",
  "document": { "name": "Hero" },
  "metadata": {},
  "components": [{ "key": "a" }],
  "styles": [],
  "retrieved_at": "2026-10-18T09:30:00Z"
}"#;

fn write(dir: &Utf8PathBuf, name: &str, contents: &str) -> Utf8PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn finalize_writes_both_exports() {
    let tmp = tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let inputs = FinalizeInputs {
        generated: write(&root, "component.tsx", GENERATED),
        user_markup: Some(write(&root, "user.html", "<p>Tagline</p>")),
        base_style: Some(write(&root, "base.css", ".hero { display: grid; }")),
        extra_style: None,
        bundle: Some(write(&root, "bundle.json", BUNDLE)),
        out_dir: root.join("export"),
    };

    let written = commands::cmd_finalize(&inputs).unwrap();
    assert_eq!(written.len(), 2);

    let component = std::fs::read_to_string(root.join("export/GeneratedComponent.tsx")).unwrap();
    assert!(component.contains("Generated from design file: Hero"));
    assert!(component.contains(" * Components: 1"));
    let tagline = component.find("<p>Tagline</p>").unwrap();
    let closing = component.find("</section>").unwrap();
    assert!(closing < tagline);

    let css = std::fs::read_to_string(root.join("export/styles.css")).unwrap();
    assert!(css.contains("/* Base styles */"));
    assert!(!css.contains("/* Additional styles */"));
}

#[test]
fn finalize_without_custom_input_is_an_error() {
    let tmp = tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let inputs = FinalizeInputs {
        generated: write(&root, "component.tsx", GENERATED),
        user_markup: None,
        base_style: None,
        extra_style: None,
        bundle: None,
        out_dir: root.join("export"),
    };

    assert!(commands::cmd_finalize(&inputs).is_err());
    assert!(!root.join("export").exists());
}

#[test]
fn check_markup_reports_vector_content() {
    let tmp = tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let svg = write(&root, "icon.svg", "<svg><circle r=\"1\"/></svg>");
    let html = write(&root, "page.html", "<div>hello</div>");
    assert!(commands::cmd_check_markup(&svg).unwrap());
    assert!(!commands::cmd_check_markup(&html).unwrap());
}

#[test]
fn styles_command_always_emits_responsive_rules() {
    let css = commands::cmd_styles(None, None).unwrap();
    assert!(css.contains("@media (max-width: 768px)"));
}
