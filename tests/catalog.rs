//! Catalog Loading Integration Tests
//!
//! Tests for deterministic loading and the reverse content index.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rell::{Catalog, ContentId};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "auth/login.html", "FB.login(function(r) {});\n");
    write(root, "auth/logout.html", "  FB.logout();  ");
    write(root, "auth/status.html", "FB.getLoginStatus();");
    write(root, "xfbml/like.html", "<fb:like></fb:like>");
    write(root, "xfbml/comments.html", "<fb:comments></fb:comments>");
    write(root, "bugs/1234.html", "// regression");
    write(root, "notes.txt", "stray file at the root");
    temp
}

/// Everything that matters for display, in order
fn shape(catalog: &Catalog) -> Vec<(String, bool, Vec<(String, String, String)>)> {
    catalog
        .categories
        .iter()
        .map(|c| {
            (
                c.name.clone(),
                c.hidden,
                c.examples
                    .iter()
                    .map(|e| (e.name.clone(), e.title.clone(), e.url.clone()))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn test_loading_twice_is_identical() {
    let temp = fixture();

    let first = Catalog::load_dir(temp.path()).unwrap();
    let second = Catalog::load_dir(temp.path()).unwrap();

    assert_eq!(shape(&first), shape(&second));
    assert_eq!(first.reverse.len(), second.reverse.len());
}

#[test]
fn test_catalog_shape() {
    let temp = fixture();
    let catalog = Catalog::load_dir(temp.path()).unwrap();

    let shape = shape(&catalog);
    let categories: Vec<_> = shape.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(categories, ["auth", "bugs", "xfbml"]);

    let (_, hidden, examples) = &shape[2];
    assert!(!hidden);
    assert_eq!(
        examples[0],
        (
            "comments".to_string(),
            "xfbml · comments".to_string(),
            "/xfbml/comments".to_string()
        )
    );

    let bugs = catalog.find_category("bugs").unwrap();
    assert!(bugs.hidden);
    assert!(bugs.find_example("1234").is_some());
}

#[test]
fn test_every_example_is_in_reverse_index() {
    let temp = fixture();
    let catalog = Catalog::load_dir(temp.path()).unwrap();

    for category in &catalog.categories {
        for example in &category.examples {
            let key = ContentId::of_trimmed(&example.content);
            let indexed = catalog
                .reverse
                .get(&key)
                .unwrap_or_else(|| panic!("{} missing from reverse index", example.url));
            assert!(Arc::ptr_eq(indexed, example));
        }
    }
}

#[test]
fn test_reverse_index_holds_empty_example() {
    let temp = TempDir::new().unwrap();
    let catalog = Catalog::load_dir(temp.path()).unwrap();

    assert!(catalog.categories.is_empty());
    let empty = catalog.reverse.get(&ContentId::of(b"")).unwrap();
    assert_eq!(empty.title, "Welcome");
    assert!(Arc::ptr_eq(empty, &rell::library::empty_example()));
}

#[test]
fn test_content_is_not_trimmed() {
    let temp = fixture();
    let catalog = Catalog::load_dir(temp.path()).unwrap();

    let logout = catalog
        .find_category("auth")
        .and_then(|c| c.find_example("logout"))
        .unwrap();
    assert_eq!(logout.content, b"  FB.logout();  ");
    assert_eq!(
        catalog.find_by_content(b"FB.logout();").unwrap().url,
        "/auth/logout"
    );
}
