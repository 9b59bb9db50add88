use super::*;

#[test]
fn test_arena_alloc_free() {
    let mut arena: Arena<u32> = Arena::new();
    assert_eq!(arena.len(), 0);
    assert!(arena.get(NIL).is_black());
    assert!(arena.get(NIL).item.is_none());

    let a = arena.alloc(10);
    let b = arena.alloc(20);
    assert_eq!(arena.len(), 2);
    assert!(!a.is_nil());
    assert!(!arena.get(a).is_black(), "new nodes are red");
    assert_eq!(arena.get(b).item, Some(20));

    assert_eq!(arena.free(a), Some(10));
    assert_eq!(arena.len(), 1);

    // freed slot is reused.
    let c = arena.alloc(30);
    assert_eq!(c, a);
    assert_eq!(arena.get(c).item, Some(30));
    assert_eq!(arena.get(c).parent, NIL);

    arena.clear();
    assert_eq!(arena.len(), 0);
    // after clear the first allocation lands right after the sentinel.
    assert_eq!(arena.alloc(40), Handle(1));
}
