#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]

use proptest::{collection::vec, prelude::*};

use xmlchain::test_utils::*;

// Strategy for element and attribute names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

// Strategy for dotted paths of one to four segments
fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    vec(name_strategy(), 1..5)
}

fn attribute_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    vec((name_strategy(), "[ -~]{0,12}"), 0..5)
}

proptest! {
    #[test]
    fn test_root_attributes_in_order(
        root in name_strategy(),
        attributes in vec(("[a-z]{1,4}", any::<i32>()), 0..6)
    ) {
        let mut expected = Attributes::new();
        for (key, value) in &attributes {
            expected.insert(key.clone(), AttrValue::from(*value));
        }
        let doc = Document::with_attributes(root.clone(), attributes);
        let xml = doc.to_xml().unwrap();

        let mut rendered = format!("<{root}");
        for (key, value) in &expected {
            rendered.push_str(&format!(" {key}=\"{value}\""));
        }
        rendered.push_str("/>");
        prop_assert_eq!(xml, rendered);
    }

    #[test]
    fn test_n_commits_make_n_siblings(path in path_strategy(), values in vec(any::<u32>(), 1..10)) {
        let dotted = path.join(".");
        let mut doc = Document::new("root");
        for value in &values {
            doc.at(&dotted).commit(attrs! { "v" => *value }).unwrap();
        }

        let leaf = doc.path(&dotted).target().unwrap();
        let parent = doc.node(leaf).unwrap().parent().unwrap();
        let siblings: Vec<AttrValue> = doc
            .node(parent)
            .unwrap()
            .children()
            .iter()
            .map(|&id| doc.node(id).unwrap())
            .filter(|node| node.name() == path[path.len() - 1])
            .map(|node| node.attributes()["v"].clone())
            .collect();
        let expected: Vec<AttrValue> = values.iter().map(|&v| AttrValue::from(v)).collect();
        prop_assert_eq!(siblings, expected);

        // every ancestor on the path exists exactly once
        prop_assert_eq!(doc.node_count(), 1 + (path.len() - 1) + values.len());
    }

    #[test]
    fn test_resolution_is_idempotent(paths in vec(path_strategy(), 1..6), probes in vec(path_strategy(), 1..6)) {
        let mut doc = Document::new("root");
        for path in &paths {
            doc.at(&path.join(".")).commit(attrs!()).unwrap();
        }
        let before = doc.clone();

        for probe in &probes {
            let first = doc.path(&probe.join("."));
            let second = doc.path(&probe.join("."));
            prop_assert_eq!(first, second);
        }
        prop_assert_eq!(&doc, &before);
    }

    #[test]
    fn test_children_keep_commit_order(names in vec(name_strategy(), 1..12)) {
        let mut doc = Document::new("root");
        for name in &names {
            let cursor = doc.child(&doc.root(), name);
            doc.commit(&cursor, attrs!()).unwrap();
        }

        let order: Vec<String> = doc
            .root_node()
            .children()
            .iter()
            .map(|&id| doc.node(id).unwrap().name().to_string())
            .collect();
        prop_assert_eq!(order, names);
    }

    #[test]
    fn test_serialization_never_fails(paths in vec((path_strategy(), attribute_strategy()), 0..8)) {
        let mut doc = Document::new("root");
        for (path, attributes) in paths {
            doc.at(&path.join(".")).commit(attributes).unwrap();
        }
        let xml = doc.to_xml().unwrap();
        prop_assert!(xml.starts_with("<root"));
        let ends_correctly = xml.ends_with("</root>") || xml == "<root/>";
        prop_assert!(ends_correctly);
    }

    #[test]
    fn test_graft_equals_direct_commits(paths in vec(path_strategy(), 1..6)) {
        let mut part = Document::new("part");
        let mut direct = Document::new("root");
        for path in &paths {
            let dotted = path.join(".");
            part.at(&dotted).commit(attrs!()).unwrap();
        }
        direct.at("part").commit(attrs!()).unwrap();
        for path in &paths {
            direct.at(&format!("part.{}", path.join("."))).commit(attrs!()).unwrap();
        }

        let mut grafted = Document::new("root");
        grafted.graft(&grafted.root(), &part).unwrap();
        prop_assert_eq!(grafted.to_xml().unwrap(), direct.to_xml().unwrap());
    }
}
