//! Directory batch processing.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as LopdfDocument, Object, Stream};

use pdfoutline::batch::{process_directory_with_progress, FileOutcome};
use pdfoutline::{process_directory, BatchOptions, JsonFormat, OutlineResult};

/// Write a one-page PDF with a bold heading and some body text.
fn write_pdf(path: &Path, heading: &str) {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Bold",
    });
    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F2".into(), 22.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new("Tj", vec![Object::string_literal(heading)]),
        Operation::new("ET", vec![]),
    ];
    for i in 0..8i64 {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![72.into(), (650 - i * 12).into()]),
            Operation::new(
                "Tj",
                vec![Object::string_literal("Ordinary paragraph text in the body.")],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => regular, "F2" => bold },
        },
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn read_result(path: &Path) -> OutlineResult {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn processes_every_pdf_and_counts_failures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("nested").join("json");

    write_pdf(&input.path().join("alpha_report.pdf"), "Project Alpha Status Report");
    write_pdf(&input.path().join("Beta.PDF"), "Beta Release Notes Summary");
    fs::write(input.path().join("corrupt.pdf"), b"%PDF-1.4\nthis is not a body").unwrap();
    fs::write(input.path().join("readme.txt"), b"ignored").unwrap();

    let summary = process_directory(input.path(), &out_dir, &BatchOptions::default()).unwrap();
    assert_eq!(summary.found, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.failures[0].path.ends_with("corrupt.pdf"));

    let alpha = read_result(&out_dir.join("alpha_report.json"));
    assert_eq!(alpha.title, "Project Alpha Status Report");
    assert_eq!(alpha.outline.len(), 1);
    assert_eq!(alpha.outline[0].page, 1);

    assert!(out_dir.join("Beta.json").exists());
    assert!(!out_dir.join("corrupt.json").exists());
    assert!(!out_dir.join("readme.json").exists());
}

#[test]
fn sequential_and_parallel_agree() {
    let input = tempfile::tempdir().unwrap();
    for (name, heading) in [
        ("one.pdf", "First Document Heading Text"),
        ("two.pdf", "Second Document Heading Text"),
        ("three.pdf", "Third Document Heading Text"),
    ] {
        write_pdf(&input.path().join(name), heading);
    }

    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();
    let parallel =
        process_directory(input.path(), parallel_out.path(), &BatchOptions::default()).unwrap();
    let sequential = process_directory(
        input.path(),
        sequential_out.path(),
        &BatchOptions::new().sequential(),
    )
    .unwrap();

    assert_eq!(parallel, sequential);
    for name in ["one.json", "two.json", "three.json"] {
        assert_eq!(
            fs::read_to_string(parallel_out.path().join(name)).unwrap(),
            fs::read_to_string(sequential_out.path().join(name)).unwrap()
        );
    }
}

#[test]
fn compact_output_and_progress_callback() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_pdf(&input.path().join("doc.pdf"), "Compact Output Heading Check");
    fs::write(input.path().join("bad.pdf"), b"nope").unwrap();

    let written = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let options = BatchOptions::new().with_json_format(JsonFormat::Compact);
    let summary =
        process_directory_with_progress(input.path(), output.path(), &options, |outcome| {
            match outcome {
                FileOutcome::Written(_) => written.fetch_add(1, Ordering::SeqCst),
                FileOutcome::Failed(_) => failed.fetch_add(1, Ordering::SeqCst),
            };
        })
        .unwrap();

    assert_eq!(written.load(Ordering::SeqCst), summary.succeeded);
    assert_eq!(failed.load(Ordering::SeqCst), summary.failed);

    let json = fs::read_to_string(output.path().join("doc.json")).unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with(r#"{"title":"Compact Output Heading Check","outline":["#));
}

#[test]
fn empty_input_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let summary = process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();
    assert_eq!((summary.found, summary.succeeded, summary.failed), (0, 0, 0));
    assert!(summary.is_success());
}

#[test]
fn missing_input_directory_is_an_error() {
    let output = tempfile::tempdir().unwrap();
    let result = process_directory("/nonexistent/input_pdfs", output.path(), &BatchOptions::default());
    assert!(result.is_err());
}
