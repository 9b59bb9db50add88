use super::*;

use crate::TreeList;

#[test]
fn test_iter_both_ways() {
    let list = TreeList::from_items(vec![5, 3, 8, 1, 4]).unwrap();
    let mut iter = list.iter();
    assert!(!iter.has_previous());
    assert_eq!(iter.previous_index(), None);

    let mut items = vec![];
    while iter.has_next() {
        items.push(iter.next_item().unwrap());
    }
    assert_eq!(items, vec![1, 3, 4, 5, 8]);
    assert_eq!(iter.next_index(), 5);
    assert_eq!(iter.previous_index(), Some(4));
    match iter.next_item() {
        Err(Error::NoSuchElement(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }

    let mut items = vec![];
    while iter.has_previous() {
        items.push(iter.previous_item().unwrap());
    }
    assert_eq!(items, vec![8, 5, 4, 3, 1]);
    match iter.previous_item() {
        Err(Error::NoSuchElement(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }

    // zig-zag returns the same element.
    assert_eq!(iter.next_item().unwrap(), 1);
    assert_eq!(iter.previous_item().unwrap(), 1);
    assert_eq!(iter.next_index(), 0);
}

#[test]
fn test_iter_from_index() {
    let list = TreeList::from_items(0..10).unwrap();
    let mut iter = list.list_iter(10).unwrap();
    assert!(!iter.has_next());
    assert_eq!(iter.previous_item().unwrap(), 9);

    let mut iter = list.list_iter(4).unwrap();
    assert_eq!(iter.previous_item().unwrap(), 3);
    assert_eq!(iter.next_item().unwrap(), 3);
    assert_eq!(iter.next_item().unwrap(), 4);

    match list.list_iter(11) {
        Err(Error::IndexOutOfBounds(_, _)) => (),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("iterator past the end"),
    }

    let empty: TreeList<u8> = TreeList::new();
    let mut iter = empty.list_iter(0).unwrap();
    assert!(!iter.has_next() && !iter.has_previous());
    assert!(iter.next().is_none());
}

#[test]
fn test_iter_remove() {
    let list = TreeList::from_items(1..=10).unwrap();
    let mut iter = list.iter();
    while iter.has_next() {
        if iter.next_item().unwrap() % 2 == 0 {
            iter.remove().unwrap();
        }
    }
    assert_eq!(list.to_vec(), vec![1, 3, 5, 7, 9]);
    assert_eq!(iter.next_index(), 5);

    // remove while walking backward.
    while iter.has_previous() {
        if iter.previous_item().unwrap() > 4 {
            iter.remove().unwrap();
        }
    }
    assert_eq!(list.to_vec(), vec![1, 3]);
    assert_eq!(iter.next_index(), 0);
    assert_eq!(iter.next_item().unwrap(), 1);
    list.validate().unwrap();
}

#[test]
fn test_iter_remove_relocated() {
    let list = TreeList::from_items(1..=7).unwrap();
    let mut iter = list.list_iter(3).unwrap();
    // 4 holds two children, its successor moves into the node.
    assert_eq!(iter.next_item().unwrap(), 4);
    iter.remove().unwrap();
    assert_eq!(iter.next_index(), 3);
    assert_eq!(iter.next_item().unwrap(), 5);
    assert_eq!(iter.previous_item().unwrap(), 5);
    assert_eq!(iter.previous_item().unwrap(), 3);
    assert_eq!(list.to_vec(), vec![1, 2, 3, 5, 6, 7]);

    let list = TreeList::from_items(1..=7).unwrap();
    let mut iter = list.list_iter(4).unwrap();
    assert_eq!(iter.previous_item().unwrap(), 4);
    iter.remove().unwrap();
    assert_eq!(iter.next_index(), 3);
    assert_eq!(iter.next_item().unwrap(), 5);
    assert_eq!(iter.next_item().unwrap(), 6);
    list.validate().unwrap();
}

#[test]
fn test_iter_illegal_state() {
    let list = TreeList::from_items(vec![1, 2, 3]).unwrap();
    let mut iter = list.iter();
    match iter.remove() {
        Err(Error::IllegalState(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    iter.next_item().unwrap();
    iter.remove().unwrap();
    match iter.remove() {
        Err(Error::IllegalState(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match iter.add(10) {
        Err(Error::Unsupported(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match iter.set(10) {
        Err(Error::Unsupported(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(list.to_vec(), vec![2, 3]);
}

#[test]
fn test_iter_fail_fast() {
    let mut list = TreeList::from_items(vec![1, 2, 3]).unwrap();
    let mut iter = list.iter();
    assert_eq!(iter.next().unwrap().unwrap(), 1);
    list.add(4).unwrap();

    match iter.next() {
        Some(Err(Error::ConcurrentModification(_, _))) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert!(iter.next().is_none());
    match iter.previous_item() {
        Err(Error::ConcurrentModification(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match iter.remove() {
        Err(Error::ConcurrentModification(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }

    // removal through one iterator invalidates the others.
    let mut a = list.iter();
    let mut b = list.iter();
    a.next_item().unwrap();
    a.remove().unwrap();
    assert_eq!(a.next_item().unwrap(), 2);
    assert!(b.next_item().is_err());
}

#[test]
fn test_iter_collect() {
    let list = TreeList::from_items(vec![3, 1, 2]).unwrap();
    let items: Result<Vec<i32>> = list.iter().collect();
    assert_eq!(items.unwrap(), vec![1, 2, 3]);
    assert_eq!(list.iter().count(), 3);
}

#[test]
fn test_iter_view() {
    let list = TreeList::from_items(0..10).unwrap();
    let view = list.sub_list(2, 7).unwrap();
    let items: Vec<i32> = view.iter().unwrap().map(|x| x.unwrap()).collect();
    assert_eq!(items, vec![2, 3, 4, 5, 6]);

    let mut iter = view.iter().unwrap();
    while let Some(item) = iter.next() {
        if item.unwrap() % 3 == 0 {
            iter.remove().unwrap();
        }
    }
    assert_eq!(view.to_vec().unwrap(), vec![2, 4, 5]);
    assert_eq!(view.len().unwrap(), 3);
    assert_eq!(list.to_vec(), vec![0, 1, 2, 4, 5, 7, 8, 9]);

    let mut iter = view.list_iter(3).unwrap();
    assert!(!iter.has_next());
    let mut items = vec![];
    while iter.has_previous() {
        items.push(iter.previous_item().unwrap());
    }
    assert_eq!(items, vec![5, 4, 2]);
    assert!(view.list_iter(4).is_err());

    // removing the view's boundaries keeps the view in shape.
    let mut iter = view.iter().unwrap();
    iter.next_item().unwrap();
    iter.remove().unwrap();
    let mut iter = view.list_iter(2).unwrap();
    iter.previous_item().unwrap();
    iter.remove().unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![4]);
    assert_eq!(view.first().unwrap(), Some(4));
    assert_eq!(view.last().unwrap(), Some(4));
    list.validate().unwrap();
}
