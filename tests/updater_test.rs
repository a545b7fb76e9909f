mod common;

use insight::{IndexConfig, InsightIndex};

use common::{Graph, ids};

const ZEBROID: &str = "A zebroid (also zedonk, zorse, zebra mule, zonkey, and zebmule) is the \
                       offspring of any cross between a zebra and any other equine: \
                       essentially, a zebra hybrid.";

#[test]
fn test_finds_node_with_string() -> insight::Result<()> {
    let index = InsightIndex::open(IndexConfig::new(["prop"]))?;
    let mut graph = Graph::new(&index);

    let mut tx = graph.begin_tx();
    let first = tx.create_node();
    tx.set_property(first, "prop", "Hello. Hello again.");
    let second = tx.create_node();
    tx.set_property(second, "prop", ZEBROID);
    tx.success();
    tx.close()?;

    let reader = index.reader()?;
    assert_eq!(ids(reader.query(&["hello"])?), vec![first]);
    assert_eq!(ids(reader.query(&["zebra"])?), vec![second]);
    assert_eq!(ids(reader.query(&["zedonk"])?), vec![second]);
    assert_eq!(ids(reader.query(&["cross"])?), vec![second]);
    Ok(())
}

#[test]
fn test_represents_property_changes() -> insight::Result<()> {
    let index = InsightIndex::open(IndexConfig::new(["prop"]))?;
    let mut graph = Graph::new(&index);

    let mut tx = graph.begin_tx();
    let first = tx.create_node();
    tx.set_property(first, "prop", "Hello. Hello again.");
    let second = tx.create_node();
    tx.set_property(second, "prop", ZEBROID);
    tx.success();
    tx.close()?;

    let mut tx = graph.begin_tx();
    tx.set_property(first, "prop", "Hah! potato!");
    tx.set_property(second, "prop", "This one is potato as well.");
    tx.success();
    tx.close()?;

    let reader = index.reader()?;
    for stale in ["hello", "zebra", "zedonk", "cross"] {
        assert!(!reader.query(&[stale])?.has_next(), "stale term {stale}");
    }
    assert_eq!(ids(reader.query(&["hah"])?), vec![first]);
    assert_eq!(ids(reader.query(&["well"])?), vec![second]);
    assert_eq!(ids(reader.query(&["potato"])?), vec![first, second]);
    Ok(())
}

#[test]
fn test_does_not_find_removed_nodes() -> insight::Result<()> {
    let index = InsightIndex::open(IndexConfig::new(["prop"]))?;
    let mut graph = Graph::new(&index);

    let mut tx = graph.begin_tx();
    let first = tx.create_node();
    tx.set_property(first, "prop", "Hello. Hello again.");
    let second = tx.create_node();
    tx.set_property(second, "prop", ZEBROID);
    tx.success();
    tx.close()?;

    let mut tx = graph.begin_tx();
    tx.delete_node(first);
    tx.delete_node(second);
    tx.success();
    tx.close()?;

    let reader = index.reader()?;
    for term in ["hello", "zebra", "zedonk", "cross"] {
        assert!(!reader.query(&[term])?.has_next(), "removed node found by {term}");
    }
    assert_eq!(reader.num_docs()?, 0);
    Ok(())
}

#[test]
fn test_searches_across_multiple_properties() -> insight::Result<()> {
    let index = InsightIndex::open(IndexConfig::new(["prop", "prop2"]))?;
    let mut graph = Graph::new(&index);

    let mut tx = graph.begin_tx();
    let first = tx.create_node();
    tx.set_property(first, "prop", "Tomtar tomtar oftsat i tomteutstyrsel.");
    let second = tx.create_node();
    tx.set_property(second, "prop", "Olof och Hans");
    tx.set_property(second, "prop2", "karl");
    let third = tx.create_node();
    tx.set_property(
        third,
        "prop",
        "Tomtar som inte tomtar ser upp till tomtar som tomtar.",
    );
    tx.success();
    tx.close()?;

    let reader = index.reader()?;
    assert_eq!(
        ids(reader.query(&["tomtar", "karl"])?),
        vec![first, second, third]
    );
    // A single term only consults the first field.
    assert_eq!(ids(reader.query(&["karl"])?), Vec::<u64>::new());
    Ok(())
}

#[test]
fn test_untracked_properties_are_ignored() -> insight::Result<()> {
    let index = InsightIndex::open(IndexConfig::new(["prop"]))?;
    let mut graph = Graph::new(&index);

    let mut tx = graph.begin_tx();
    let node = tx.create_node();
    tx.set_property(node, "name", "hello");
    tx.success();
    tx.close()?;

    let reader = index.reader()?;
    assert_eq!(reader.num_docs()?, 0);
    assert!(reader.query_field("name", "hello").is_err());
    Ok(())
}
