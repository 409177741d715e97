use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn notifies_in_order_until_unsubscribed() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut observers = Observers::<u32>::default();

    let a = {
        let seen = Rc::clone(&seen);
        observers.subscribe(move |e| seen.borrow_mut().push(("a", *e)))
    };
    {
        let seen = Rc::clone(&seen);
        observers.subscribe(move |e| seen.borrow_mut().push(("b", *e)));
    }
    assert_eq!(observers.len(), 2);

    observers.notify(&1);
    assert!(observers.unsubscribe(a));
    assert!(!observers.unsubscribe(a));
    observers.notify(&2);

    assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("b", 2)]);
}

#[test]
fn ids_are_not_reused() {
    let mut observers = Observers::<()>::default();
    let first = observers.subscribe(|_| {});
    observers.unsubscribe(first);
    let second = observers.subscribe(|_| {});
    assert_ne!(first, second);
    assert!(!observers.is_empty());
}
