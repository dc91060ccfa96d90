use std::collections::HashSet;

use hiername::contract::ErrorKind;
use hiername::filesystem::FileTree;
use hiername::names::Name;

#[test]
fn full_name_and_move_scenario() {
    let mut tree = FileTree::new();
    let root = tree.root();
    let a = tree.create_directory("a", root).unwrap();
    let x = tree.create_file("x", a).unwrap();

    assert_eq!(tree.full_name(x).unwrap().as_string(), "a.x");

    tree.move_node(x, root).unwrap();
    assert!(!tree.has_child_node(a, x));
    assert!(tree.has_child_node(root, x));
    assert_eq!(tree.find_nodes(root, "x").unwrap(), HashSet::from([x]));
    assert!(tree.find_nodes(a, "x").unwrap().is_empty());
}

#[test]
fn find_nodes_at_two_depths() {
    let mut tree = FileTree::new();
    let root = tree.root();
    let top = tree.create_directory("a", root).unwrap();
    let mid = tree.create_directory("b", top).unwrap();
    let deep = tree.create_file("a", mid).unwrap();

    let found = tree.find_nodes(root, "a").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found, HashSet::from([top, deep]));
}

#[test]
fn renamed_nodes_change_descendant_names() {
    let mut tree = FileTree::new();
    let root = tree.root();
    let home = tree.create_directory("home", root).unwrap();
    let user = tree.create_directory("user", home).unwrap();
    let file = tree.create_file("notes.txt", user).unwrap();

    tree.rename(home, "Users").unwrap();
    let name = tree.full_name(file).unwrap();
    assert_eq!(name.no_components(), 3);
    assert_eq!(name.as_string_with('/'), "Users/user/notes.txt");
    assert_eq!(tree.lookup(&name).unwrap(), Some(file));
}

#[test]
fn links_point_outside_their_subtree() {
    let mut tree = FileTree::new();
    let root = tree.root();
    let bin = tree.create_directory("bin", root).unwrap();
    let opt = tree.create_directory("opt", root).unwrap();
    let tool = tree.create_file("tool", opt).unwrap();
    let link = tree.create_link("tool-link", bin, Some(tool)).unwrap();

    assert_eq!(tree.base_name(link).unwrap(), "tool");
    assert_eq!(tree.full_name(link).unwrap().as_string(), "bin.tool");
    assert_eq!(tree.find_nodes(bin, "tool").unwrap(), HashSet::from([link]));
    assert_eq!(
        tree.find_nodes(root, "tool").unwrap(),
        HashSet::from([link, tool])
    );
}

#[test]
fn search_through_dangling_link_is_a_service_failure() {
    let mut tree = FileTree::new();
    let root = tree.root();
    tree.create_link("dangling", root, None).unwrap();
    let err = tree.find_nodes(root, "anything").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
}
