use rand::{prelude::random, rngs::StdRng, Rng, SeedableRng};

use super::*;

fn in_order<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut items = vec![];
    let mut node = tree.min();
    while !node.is_nil() {
        items.push(tree.item(node).clone());
        node = tree.successor(node);
    }
    items
}

fn reverse_order<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut items = vec![];
    let mut node = tree.max();
    while !node.is_nil() {
        items.push(tree.item(node).clone());
        node = tree.predecessor(node);
    }
    items
}

// order (key, seqno) pairs by key alone, seqno tracks insertion order.
fn by_key() -> Comparator<(u8, u32)> {
    Comparator::new(|a: &(u8, u32), b: &(u8, u32)| a.0.cmp(&b.0))
}

#[test]
fn test_tree_empty() {
    let tree: Tree<i32> = Tree::new(Comparator::natural());
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert!(tree.min().is_nil());
    assert!(tree.max().is_nil());
    assert_eq!(tree.search(&10).unwrap(), None);
    assert!(tree.successor(NIL).is_nil());
    assert!(tree.predecessor(NIL).is_nil());
    tree.validate().unwrap();
}

#[test]
fn test_tree_insert_delete() {
    let mut tree: Tree<i32> = Tree::new(Comparator::natural());
    for item in [5, 3, 8, 1, 4].iter() {
        tree.insert(*item).unwrap();
        tree.validate().unwrap();
    }
    assert_eq!(in_order(&tree), vec![1, 3, 4, 5, 8]);
    assert_eq!(reverse_order(&tree), vec![8, 5, 4, 3, 1]);
    assert_eq!(*tree.item(tree.nth(2)), 4);
    assert_eq!(*tree.item(tree.min()), 1);
    assert_eq!(*tree.item(tree.max()), 8);
    assert_eq!(tree.mod_count(), 5);

    let node = tree.search(&5).unwrap().unwrap();
    let deleted = tree.delete(node);
    assert_eq!(deleted.item, 5);
    tree.validate().unwrap();
    assert_eq!(in_order(&tree), vec![1, 3, 4, 8]);
    assert_eq!(tree.search(&5).unwrap(), None);

    let node = tree.max();
    assert_eq!(tree.delete(node).item, 8);
    assert_eq!(*tree.item(tree.max()), 4);
    let node = tree.min();
    assert_eq!(tree.delete(node).item, 1);
    assert_eq!(*tree.item(tree.min()), 3);
    tree.validate().unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.mod_count(), 8);

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.min().is_nil());
    tree.validate().unwrap();
    tree.insert(7).unwrap();
    assert_eq!(in_order(&tree), vec![7]);
}

#[test]
fn test_tree_relocated() {
    let mut tree: Tree<i32> = Tree::new(Comparator::natural());
    for item in 1..=7 {
        tree.insert(item).unwrap();
    }
    // ascending inserts leave 4 with two children, 3 and 6.
    let root = tree.search(&4).unwrap().unwrap();
    let succ = tree.successor(root);
    let deleted = tree.delete(root);
    assert_eq!(deleted.item, 4);
    assert_eq!(deleted.relocated, Some((succ, root)));
    assert_eq!(deleted.remap(succ), root);
    assert_eq!(*tree.item(root), 5);
    tree.validate().unwrap();
    assert_eq!(in_order(&tree), vec![1, 2, 3, 5, 6, 7]);
}

#[test]
fn test_tree_stable_duplicates() {
    let mut tree = Tree::new(by_key());
    for seqno in 0..100 {
        tree.insert((5, 2 * seqno)).unwrap();
        tree.insert(((seqno % 10) as u8, 2 * seqno + 1)).unwrap();
    }
    tree.validate().unwrap();
    let items = in_order(&tree);
    for pair in items.windows(2) {
        let ((ak, aseq), (bk, bseq)) = (pair[0], pair[1]);
        assert!(ak <= bk, "{:?}", pair);
        if ak == bk {
            assert!(aseq < bseq, "insertion order lost {:?}", pair);
        }
    }
}

#[test]
fn test_tree_incomparable() {
    let mut tree: Tree<f64> = Tree::new(Comparator::natural());
    tree.insert(1.0).unwrap();
    tree.insert(2.0).unwrap();
    let mod_count = tree.mod_count();
    match tree.insert(f64::NAN) {
        Err(Error::Incomparable(_, _)) => (),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("NAN inserted"),
    }
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.mod_count(), mod_count);
    tree.validate().unwrap();
    assert!(tree.search(&f64::NAN).is_err());
}

#[test]
fn test_tree_random() {
    let seed: u64 = random();
    // let seed: u64 = 13426347563478921;
    println!("test_tree_random {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut tree = Tree::new(by_key());
    let mut model: Vec<(u8, u32)> = vec![];
    let mut depth = 0;

    for seqno in 0..20_000_u32 {
        let key: u8 = rng.gen();
        match rng.gen::<u8>() % 3 {
            0 | 1 => {
                tree.insert((key, seqno)).unwrap();
                let at = model.iter().take_while(|(k, _)| *k <= key).count();
                model.insert(at, (key, seqno));
            }
            _ => match tree.search(&(key, 0)).unwrap() {
                Some(node) => {
                    let item = tree.delete(node).item;
                    assert_eq!(item.0, key);
                    let at = model.iter().position(|x| *x == item).unwrap();
                    model.remove(at);
                }
                None => assert!(model.iter().all(|(k, _)| *k != key)),
            },
        }
        if seqno % 97 == 0 {
            tree.validate().unwrap();
            assert_eq!(in_order(&tree), model);
            depth = depth.max(tree.depth());
        }
    }

    tree.validate().unwrap();
    assert_eq!(tree.len(), model.len());
    assert_eq!(in_order(&tree), model);
    let mut rev = model.clone();
    rev.reverse();
    assert_eq!(reverse_order(&tree), rev);
    println!("test_tree_random len:{} depth:{}", tree.len(), depth);

    // drain through min, the tree stays balanced all the way down.
    while !tree.is_empty() {
        let node = tree.min();
        let item = tree.delete(node).item;
        assert_eq!(item, model.remove(0));
        if tree.len() % 31 == 0 {
            tree.validate().unwrap();
        }
    }
    tree.validate().unwrap();
}
