use pocket_ledger::{core::StateContainer, init};

mod common;

#[test]
fn init_and_open_session() {
    init();
    let (session, store) = common::memory_session();
    assert!(session.is_ready());
    assert_eq!(session.state().accounts.len(), 1);
    assert_eq!(session.state().categories.len(), 6);
    assert!(store.keys().contains(&"transactions".to_string()));
}
