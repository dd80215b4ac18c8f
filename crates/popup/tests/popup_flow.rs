use bus::page_channel;
use highlight::style::MARKER_CLASS;
use html::parse_document;
use popup::{KeywordStore, Palette, Popup, PopupConfig, PopupError};
use runtime_page::start_page_runtime;
use tempfile::tempdir;

const PAGE: &str = "<html><body><p>cat and dog</p><p>another Cat</p></body></html>";

fn config(dir: &tempfile::TempDir) -> PopupConfig {
    PopupConfig {
        store_path: dir.path().join("store.json"),
        ..PopupConfig::default()
    }
}

#[test]
fn keywords_persist_across_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut popup = Popup::open(config(&dir)).unwrap();
        assert!(popup.add_keyword("cat").unwrap());
        assert!(popup.add_keyword(" dog ").unwrap());
        assert!(!popup.add_keyword("cat").unwrap());
        assert!(popup.add_keyword("owl").unwrap());
        assert_eq!(popup.remove_keyword(2).unwrap().as_deref(), Some("owl"));
    }
    let popup = Popup::open(config(&dir)).unwrap();
    assert_eq!(popup.keywords().as_slice(), ["cat", "dog"]);
}

#[test]
fn search_reports_counts_in_list_order() {
    let dir = tempdir().unwrap();
    let mut popup = Popup::open(config(&dir)).unwrap();
    popup.add_keyword("dog").unwrap();
    popup.add_keyword("cat").unwrap();
    popup.add_keyword("emu").unwrap();

    let (client, rx) = page_channel();
    let page = start_page_runtime(parse_document(PAGE), rx);

    let summary = popup.search(&client).unwrap();
    assert_eq!(
        summary.rows(),
        [("dog".to_string(), 1), ("cat".to_string(), 2), ("emu".to_string(), 0)]
    );
    assert_eq!(summary.total_label(), "3 total matches found");

    drop(client);
    let doc = page.join().unwrap();
    let markers = doc.elements_with_class(doc.root(), "mark", MARKER_CLASS);
    assert_eq!(markers.len(), 3);
    let palette = Palette::default();
    for marker in markers {
        let index = match doc.text_content(marker).as_str() {
            "dog" => 0,
            _ => 1,
        };
        let color = &palette.colors()[index];
        assert!(
            doc.attribute(marker, "style")
                .is_some_and(|s| s.contains(color))
        );
    }
}

#[test]
fn clear_all_empties_page_and_list() {
    let dir = tempdir().unwrap();
    let mut popup = Popup::open(config(&dir)).unwrap();
    popup.add_keyword("cat").unwrap();

    let (client, rx) = page_channel();
    let page = start_page_runtime(parse_document(PAGE), rx);
    popup.search(&client).unwrap();
    popup.clear_all(&client).unwrap();
    assert!(popup.keywords().is_empty());

    drop(client);
    let doc = page.join().unwrap();
    assert!(doc.elements_with_class(doc.root(), "mark", MARKER_CLASS).is_empty());
    assert!(KeywordStore::new(dir.path().join("store.json")).load().unwrap().is_empty());
}

#[test]
fn search_fails_when_page_is_gone() {
    let dir = tempdir().unwrap();
    let popup = Popup::open(config(&dir)).unwrap();
    let (client, rx) = page_channel();
    drop(rx);
    assert!(matches!(popup.search(&client), Err(PopupError::Bus(_))));
}
