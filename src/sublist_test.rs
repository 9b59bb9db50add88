use super::*;

use crate::TreeList;

#[test]
fn test_sublist_read() {
    let list = TreeList::from_items(vec![1, 3, 3, 5, 7, 9]).unwrap();
    let view = list.sub_list(1, 5).unwrap();
    assert_eq!(view.len().unwrap(), 4);
    assert!(!view.is_empty().unwrap());
    assert!(view.comparator().is_natural());
    assert_eq!(view.get(0).unwrap(), 3);
    assert_eq!(view.get(3).unwrap(), 7);
    match view.get(4) {
        Err(Error::IndexOutOfBounds(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(view.first().unwrap(), Some(3));
    assert_eq!(view.last().unwrap(), Some(7));
    assert_eq!(view.index_of(&3).unwrap(), Some(0));
    assert_eq!(view.last_index_of(&3).unwrap(), Some(1));
    assert_eq!(view.index_of(&1).unwrap(), None);

    assert!(view.contains(&5).unwrap());
    assert!(!view.contains(&1).unwrap());
    assert!(!view.contains(&9).unwrap());
    assert!(view.contains_all(&[3, 7]).unwrap());
    assert!(!view.contains_all(&[3, 9]).unwrap());
    assert_eq!(format!("{:?}", view), "[3, 3, 5, 7]");

    let other = list.range(2..=8).unwrap();
    assert!(view.equals(&other).unwrap());
    let other = list.range(2..8).unwrap();
    assert!(other.equals(&view).unwrap());
    let other = list.head_list(&7, true).unwrap();
    assert!(!view.equals(&other).unwrap());
}

#[test]
fn test_sublist_empty() {
    let list = TreeList::from_items(vec![1, 2, 3]).unwrap();
    let view = list.range(10..).unwrap();
    assert!(view.is_empty().unwrap());
    assert_eq!(view.first().unwrap(), None);
    assert_eq!(view.last().unwrap(), None);
    assert!(!view.contains(&3).unwrap());
    assert_eq!(view.to_vec().unwrap(), Vec::<i32>::new());
    assert!(view.ceiling(&0).unwrap().is_none());
    assert!(view.floor(&10).unwrap().is_none());
}

#[test]
fn test_sublist_write() {
    let list = TreeList::from_items(0..10).unwrap();
    let mut view = list.sub_list(3, 8).unwrap();
    match view.add_at(0, 4) {
        Err(Error::Unsupported(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match view.add_all_at(0, vec![4]) {
        Err(Error::Unsupported(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match view.set(0, 4) {
        Err(Error::Unsupported(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }

    view.extend(vec![4, 6]).unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![3, 4, 4, 5, 6, 6, 7]);
    match view.extend(vec![5, 8, 5]) {
        Err(Error::InvalidArgument(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(view.len().unwrap(), 8);
    assert!(!view.remove(&9).unwrap());
    assert!(view.remove(&4).unwrap());
    assert_eq!(view.remove_at(0).unwrap(), 3);
    assert_eq!(view.retain(|x| *x != 6).unwrap(), 2);
    assert_eq!(view.to_vec().unwrap(), vec![4, 5, 5, 7]);
    assert_eq!(list.len(), 9);
    list.validate().unwrap();
}

#[test]
fn test_sublist_views() {
    let list = TreeList::from_items(vec![1, 2, 2, 3, 4, 4, 5, 6]).unwrap();
    let view = list.sub_list(1, 7).unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![2, 2, 3, 4, 4, 5]);

    let head = view.head_list(&4, false).unwrap();
    assert_eq!(head.to_vec().unwrap(), vec![2, 2, 3]);
    let tail = view.tail_list(&4, false).unwrap();
    assert_eq!(tail.to_vec().unwrap(), vec![5]);
    let range = view.range(3..=4).unwrap();
    assert_eq!(range.to_vec().unwrap(), vec![3, 4, 4]);
    let slice = view.sub_list(2, 4).unwrap();
    assert_eq!(slice.to_vec().unwrap(), vec![3, 4]);

    let ceiling = view.ceiling(&0).unwrap().unwrap();
    assert_eq!(ceiling.to_vec().unwrap(), vec![2, 2]);
    let floor = view.floor(&9).unwrap().unwrap();
    assert_eq!(floor.to_vec().unwrap(), vec![5]);
    assert!(view.ceiling(&6).unwrap().is_none());

    match view.sub_list(0, 7) {
        Err(Error::IndexOutOfBounds(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
}

#[test]
fn test_sublist_stale() {
    let mut list = TreeList::from_items(vec![1, 2, 3, 4]).unwrap();
    let mut view = list.sub_list(1, 3).unwrap();
    assert!(!view.is_stale());
    list.remove(&4).unwrap();
    assert!(view.is_stale());
    assert_eq!(format!("{:?}", view), "SubList<stale>");

    match view.add(2) {
        Err(Error::ConcurrentModification(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert!(view.contains(&2).is_err());
    assert!(view.get(0).is_err());
    assert!(view.iter().is_err());
    assert!(view.sub_list(0, 1).is_err());
    assert!(view.clear().is_err());
    assert!(TreeList::from_sorted(&view).is_err());
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_sublist_eq_hash() {
    use std::collections::hash_map::DefaultHasher;

    let list = TreeList::from_items(vec![1, 2, 2, 3, 5]).unwrap();
    let other = TreeList::from_items(vec![2, 3, 2]).unwrap();
    let view = list.sub_list(1, 4).unwrap();

    assert!(view.equals_list(&other).unwrap());
    assert!(view.equals_slice(&[2, 2, 3]).unwrap());
    assert!(!view.equals_slice(&[2, 2]).unwrap());
    assert!(!view.equals_slice(&[2, 3, 3]).unwrap());
    assert!(!view.equals_list(&list).unwrap());

    let mut a = DefaultHasher::new();
    view.hash_items(&mut a).unwrap();
    let mut b = DefaultHasher::new();
    other.hash(&mut b);
    assert_eq!(a.finish(), b.finish());

    let whole = list.sub_list(0, 5).unwrap();
    let mut c = DefaultHasher::new();
    whole.hash_items(&mut c).unwrap();
    assert_ne!(a.finish(), c.finish());

    let mut list = list;
    list.add(4).unwrap();
    assert!(view.equals_list(&other).is_err());
    assert!(view.hash_items(&mut DefaultHasher::new()).is_err());
}
