use super::*;

#[test]
fn new_document_has_one_empty_page() {
    let doc = Document::new(Size::new(800.0, 600.0)).unwrap();
    assert_eq!(doc.pages().len(), 1);
    assert_eq!(doc.pages()[0].size, Size::new(800.0, 600.0));
    assert_eq!(doc.container_count(), 0);
    assert!(Document::new(Size::new(0.0, 600.0)).is_err());
}

#[test]
fn media_container_keeps_natural_size_after_scaling() {
    let mut c = Container::with_media(Size::new(800.0, 400.0)).unwrap();
    c.scale_to(Size::new(100.0, 100.0));
    assert_eq!(c.size, Size::new(100.0, 100.0));
    assert_eq!(c.media.natural_size(), Size::new(800.0, 400.0));
    assert_eq!(c.media.natural_aspect(), 2.0);
    assert!(Container::with_media(Size::new(0.0, 1.0)).is_err());
}

#[test]
fn bounds_follow_translation_and_size() {
    let mut c = Container::with_media(Size::new(10.0, 20.0)).unwrap();
    c.translation = Vec2::new(5.0, 7.0);
    assert_eq!(c.bounds(), Rect::new(5.0, 7.0, 15.0, 27.0));
}

#[test]
fn json_roundtrip_reseeds_unassigned_ids() {
    let json = r#"
{
  "pages": [
    {
      "id": 3,
      "name": "cover",
      "size": { "width": 100.0, "height": 50.0 },
      "frame": {
        "containers": [
          {
            "translation": { "x": 0.0, "y": 0.0 },
            "size": { "width": 10.0, "height": 10.0 },
            "opacity": 1.0,
            "media": {
              "natural_size": { "width": 10.0, "height": 10.0 },
              "offset": { "x": 0.0, "y": 0.0 },
              "size": { "width": 10.0, "height": 10.0 }
            }
          }
        ]
      }
    }
  ]
}
"#;
    let doc = Document::from_reader(json.as_bytes()).unwrap();
    let c = &doc.pages()[0].frame.containers[0];
    assert_eq!(c.id, ContainerId(4));
    assert!(c.tags.is_empty());
}

#[test]
fn validate_rejects_empty_document_and_bad_opacity() {
    let empty = r#"{ "pages": [] }"#;
    assert!(Document::from_reader(empty.as_bytes()).is_err());

    let mut doc = Document::new(Size::new(10.0, 10.0)).unwrap();
    let id = doc.pages()[0].id;
    let mut c = Container::with_media(Size::new(1.0, 1.0)).unwrap();
    c.opacity = 1.5;
    doc.page_mut(id).unwrap().frame.containers.push(c);
    assert!(doc.validate().is_err());
}

fn container_json(id: Option<u64>) -> String {
    let id = id.map(|id| format!(r#""id": {id},"#)).unwrap_or_default();
    format!(
        r#"{{ {id}
            "translation": {{ "x": 0.0, "y": 0.0 }},
            "size": {{ "width": 200.0, "height": 100.0 }},
            "opacity": 1.0,
            "media": {{
              "natural_size": {{ "width": 200.0, "height": 100.0 }},
              "offset": {{ "x": 0.0, "y": 0.0 }},
              "size": {{ "width": 200.0, "height": 100.0 }}
            }}
        }}"#
    )
}

fn page_json(id: u64, containers: &[String]) -> String {
    format!(
        r#"{{ "id": {id}, "size": {{ "width": 1000.0, "height": 1000.0 }},
             "frame": {{ "containers": [{}] }} }}"#,
        containers.join(",")
    )
}

fn doc_json(pages: &[String]) -> String {
    format!(r#"{{ "pages": [{}] }}"#, pages.join(","))
}

#[test]
fn duplicate_container_ids_are_rejected() {
    let same_page = doc_json(&[page_json(
        1,
        &[container_json(Some(5)), container_json(Some(5))],
    )]);
    let err = Document::from_reader(same_page.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("duplicate container id 5"));

    let across_pages = doc_json(&[
        page_json(1, &[container_json(Some(7))]),
        page_json(2, &[container_json(Some(7))]),
    ]);
    assert!(Document::from_reader(across_pages.as_bytes()).is_err());
}

#[test]
fn duplicate_page_ids_are_rejected() {
    let json = doc_json(&[page_json(1, &[]), page_json(1, &[])]);
    let err = Document::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, PagecraftError::Validation(_)));
    assert!(err.to_string().contains("duplicate page id 1"));
}

#[test]
fn unassigned_containers_get_distinct_ids() {
    let json = doc_json(&[page_json(1, &[container_json(None), container_json(None)])]);
    let doc = Document::from_reader(json.as_bytes()).unwrap();
    let ids: Vec<ContainerId> = doc.pages()[0].frame.containers.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![ContainerId(2), ContainerId(3)]);
}

#[test]
fn validate_rejects_degenerate_container_geometry() {
    let mut doc = Document::new(Size::new(10.0, 10.0)).unwrap();
    let page = doc.pages()[0].id;
    doc.add_container(page, Container::with_media(Size::new(1.0, 1.0)).unwrap())
        .unwrap();
    assert!(doc.validate().is_ok());
    let original = doc.pages()[0].frame.containers[0].clone();

    doc.page_mut(page).unwrap().frame.containers[0].size = Size::new(0.0, 4.0);
    assert!(matches!(
        doc.validate(),
        Err(PagecraftError::InvalidDimensions { .. })
    ));

    doc.page_mut(page).unwrap().frame.containers[0] = original;
    doc.page_mut(page).unwrap().frame.containers[0].translation = Vec2::new(f64::NAN, 0.0);
    assert!(doc.validate().is_err());
}
