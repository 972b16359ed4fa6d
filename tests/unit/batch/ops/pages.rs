use super::*;
use crate::document::memory::InMemoryRuntime;
use crate::document::model::{Container, Document};
use crate::foundation::core::Size;

fn runtime() -> InMemoryRuntime {
    let mut doc = Document::new(Size::new(100.0, 50.0)).unwrap();
    let first = doc.pages()[0].id;
    doc.add_container(first, Container::with_media(Size::new(5.0, 5.0)).unwrap())
        .unwrap();
    doc.add_page(Size::new(200.0, 100.0), "cover").unwrap();
    doc.add_page(Size::new(300.0, 150.0), "back").unwrap();
    InMemoryRuntime::new(doc)
}

#[test]
fn lists_every_page_without_range() {
    let rt = runtime();
    let pages = list_pages(&rt, None).unwrap();
    let indices: Vec<usize> = pages.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(pages[0].container_count, 1);
    assert_eq!(pages[1].name, "cover");
    assert_eq!((pages[2].width, pages[2].height), (300.0, 150.0));
}

#[test]
fn range_keeps_document_positions() {
    let rt = runtime();
    let pages = list_pages(&rt, Some(PageRange::new(2, 7).unwrap())).unwrap();
    let summary: Vec<(usize, &str)> = pages.iter().map(|p| (p.index, p.name.as_str())).collect();
    assert_eq!(summary, vec![(2, "cover"), (3, "back")]);
    assert!(list_pages(&rt, Some(PageRange::single(4).unwrap())).unwrap().is_empty());
}
