use std::io::Cursor;

use super::*;
use crate::document::memory::InMemoryRuntime;
use crate::document::model::Document;
use crate::foundation::core::Vec2;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn config() -> EngineConfig {
    EngineConfig {
        import_threads: Some(2),
        ..EngineConfig::default()
    }
}

#[test]
fn failed_decode_is_reported_by_index_and_skipped() {
    let mut rt = InMemoryRuntime::new(Document::new(Size::new(1000.0, 800.0)).unwrap());
    let assets = vec![
        ImportAsset::new("a.png", png_bytes(200, 100)),
        ImportAsset::new("broken.png", b"garbage".to_vec()),
        ImportAsset::new("c.png", png_bytes(50, 400)),
    ];
    let summary = bulk_import(&mut rt, &assets, &config()).unwrap();
    assert_eq!(summary.processed_count, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].index, 1);
    assert!(matches!(
        summary.failures[0].error,
        PagecraftError::AssetDecodeFailed { ref name, .. } if name == "broken.png"
    ));
    assert_eq!(rt.list_pages().len(), 3);
    assert_eq!(rt.commit_count(), 1);

    let pages = rt.document().pages();
    let names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names[1..], ["a.png", "c.png"]);
    assert!(pages[1..].iter().all(|p| p.size == Size::new(1000.0, 800.0)));
    let first = &pages[1].frame.containers[0];
    assert_eq!(first.size, Size::new(200.0, 100.0));
    assert_eq!(first.translation, Vec2::new(400.0, 350.0));
}

#[test]
fn new_pages_follow_the_current_page() {
    let mut doc = Document::new(Size::new(100.0, 100.0)).unwrap();
    let second = doc.add_page(Size::new(640.0, 480.0), "wide").unwrap();
    let mut rt = InMemoryRuntime::new(doc);
    rt.set_current_page(second).unwrap();
    let assets = vec![ImportAsset::new("x", png_bytes(4, 4))];
    bulk_import(&mut rt, &assets, &EngineConfig::default()).unwrap();
    assert_eq!(rt.document().pages()[2].size, Size::new(640.0, 480.0));
}

#[test]
fn all_failures_commit_nothing() {
    let mut rt = InMemoryRuntime::new(Document::new(Size::new(100.0, 100.0)).unwrap());
    let assets = vec![
        ImportAsset::new("one", vec![1, 2, 3]),
        ImportAsset::new("two", Vec::new()),
    ];
    let summary = bulk_import(&mut rt, &assets, &config()).unwrap();
    assert_eq!(summary.processed_count, 0);
    let indices: Vec<usize> = summary.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(rt.commit_count(), 0);
    assert_eq!(rt.list_pages().len(), 1);
}

#[test]
fn zero_threads_is_rejected() {
    let mut rt = InMemoryRuntime::new(Document::new(Size::new(100.0, 100.0)).unwrap());
    let cfg = EngineConfig {
        import_threads: Some(0),
        ..EngineConfig::default()
    };
    let assets = vec![ImportAsset::new("x", png_bytes(4, 4))];
    assert!(bulk_import(&mut rt, &assets, &cfg).is_err());
    assert_eq!(rt.commit_count(), 0);
}
