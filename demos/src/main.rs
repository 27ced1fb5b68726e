// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted tree combobox session over a small documentation index.
//!
//! This example shows how to combine:
//! - `understory_tree` to build the items from nested JSON records and to diff two
//!   result sets,
//! - `understory_tree_combo` to drive focus with key presses.
//!
//! Run:
//! - `cargo run -p understory_demos --bin tree_combo`
//! - `RUST_LOG=trace cargo run -p understory_demos --bin tree_combo` to see every focus move

use serde::Deserialize;
use understory_tree::diff::{DiffOptions, diff_forests};
use understory_tree::{SerializedNode, Tree};
use understory_tree_combo::{ComboEvent, Key, TreeCombo};

const INDEX: &str = r#"[
    {"id": "guide", "title": "Guide", "children": [
        {"id": "install", "title": "Installing"},
        {"id": "layout", "title": "Layout", "children": [
            {"id": "flex", "title": "Flex layout"},
            {"id": "grid", "title": "Grid layout"}
        ]},
        {"id": "focus", "title": "Keyboard focus"}
    ]},
    {"id": "api", "title": "API", "children": [
        {"id": "tree", "title": "Tree"},
        {"id": "combo", "title": "TreeCombo"}
    ]},
    {"id": "faq", "title": "FAQ"}
]"#;

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Page {
    title: String,
}

/// Keep records whose title matches, plus the ancestors of any match.
fn filter(records: &[SerializedNode<Page>], query: &str) -> Vec<SerializedNode<Page>> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter_map(|record| {
            let children = record
                .children
                .as_deref()
                .map(|c| filter(c, &query))
                .filter(|c| !c.is_empty());
            let hit = record.value.title.to_lowercase().contains(&query);
            (hit || children.is_some()).then(|| SerializedNode {
                id: record.id.clone(),
                children,
                value: record.value.clone(),
            })
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp(None)
        .init();

    let records: Vec<SerializedNode<Page>> = serde_json::from_str(INDEX)?;
    let mut combo = TreeCombo::new(|query: &str| Tree::from_records(filter(&records, query)));

    let script = [
        Key::ArrowDown,
        Key::ArrowRight,
        Key::ArrowDown,
        Key::ArrowDown,
        Key::ArrowRight,
        Key::ArrowDown,
        Key::ArrowDown,
        Key::ArrowDown,
        Key::ArrowUp,
        Key::ArrowUp,
        Key::ArrowLeft,
        Key::ArrowLeft,
    ];
    for key in script {
        let out = combo.handle_key(key)?;
        println!(
            "{key:?}: {:?} (consumed: {}), focus = {:?}",
            out.event,
            out.consumed,
            combo.focused_key()
        );
    }

    let before = combo.items().clone();
    combo.set_query("layout");
    println!(
        "query {:?}: {} items, focus = {:?}",
        combo.query(),
        combo.items().len(),
        combo.focused_key()
    );
    if let Some(d) = diff_forests(
        &before,
        combo.items(),
        |a, b| a == b,
        DiffOptions::default(),
    ) {
        println!(
            "first change: {:?} at path {:?} ({:?} -> {:?})",
            d.kind,
            d.path.as_slice(),
            d.left.and_then(|id| before.key_of(id)),
            d.right.and_then(|id| combo.items().key_of(id)),
        );
    }

    let pick = [
        Key::ArrowRight,
        Key::ArrowDown,
        Key::ArrowRight,
        Key::ArrowDown,
        Key::Enter,
    ];
    for key in pick {
        let out = combo.handle_key(key)?;
        if let ComboEvent::Selected(node) = out.event {
            let page = combo.items().value_of(node).map(|p| p.title.as_str());
            println!("selected {:?}: {page:?}", combo.items().key_of(node));
        }
    }
    println!("open after Enter: {}", combo.is_open());

    Ok(())
}
