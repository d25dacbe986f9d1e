//! Tenant isolation across the enforced session API.
//!
//! Every case here checks the same contract from a different angle: a row
//! outside the principal's reach behaves exactly like a row that does not
//! exist, and absence of a principal grants nothing.

mod common;

use atrium_persistence::{TenantFilter, TenantPatch};
use common::{create_child, create_parent, memory_backend};

#[test]
fn unrelated_tenants_are_mutually_invisible() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let a = create_parent(&mut session, "Acme");
    let b = create_parent(&mut session, "Borealis");

    session.set_context(&a.id).unwrap();
    assert!(session.get(&b.id).unwrap().is_none());

    session.set_context(&b.id).unwrap();
    assert!(session.get(&a.id).unwrap().is_none());
}

#[test]
fn parent_sees_children_but_not_vice_versa() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let parent = create_parent(&mut session, "Acme");
    let child = create_child(&mut session, &parent.id, "Ops");

    session.set_context(&parent.id).unwrap();
    assert!(session.get(&child.id).unwrap().is_some());

    session.set_context(&child.id).unwrap();
    assert!(session.get(&parent.id).unwrap().is_none());
}

#[test]
fn siblings_are_mutually_invisible() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let parent = create_parent(&mut session, "Acme");
    let ops = create_child(&mut session, &parent.id, "Ops");
    let sales = create_child(&mut session, &parent.id, "Sales");

    session.set_context(&ops.id).unwrap();
    assert!(session.get(&sales.id).unwrap().is_none());

    session.set_context(&sales.id).unwrap();
    assert!(session.get(&ops.id).unwrap().is_none());
}

#[test]
fn access_does_not_cross_hierarchies() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let a = create_parent(&mut session, "Acme");
    let a_child = create_child(&mut session, &a.id, "Ops");
    let b = create_parent(&mut session, "Borealis");
    let b_child = create_child(&mut session, &b.id, "Ops");

    session.set_context(&a.id).unwrap();
    assert!(session.get(&b_child.id).unwrap().is_none());

    session.set_context(&b_child.id).unwrap();
    assert!(session.get(&a_child.id).unwrap().is_none());
}

#[test]
fn unbound_session_sees_nothing() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let parent = create_parent(&mut session, "Acme");
    create_child(&mut session, &parent.id, "Ops");
    session.clear_context();

    assert!(session.get(&parent.id).unwrap().is_none());
    let page = session.select(&TenantFilter::default()).unwrap();
    assert!(page.tenants.is_empty());
    assert_eq!(page.total, 0);
}

#[test]
fn list_is_scoped_to_the_principal() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let a = create_parent(&mut session, "Acme");
    create_child(&mut session, &a.id, "Ops");
    let sales = create_child(&mut session, &a.id, "Sales");
    let b = create_parent(&mut session, "Borealis");
    create_child(&mut session, &b.id, "Ops");

    session.set_context(&a.id).unwrap();
    let page = session.select(&TenantFilter::default()).unwrap();
    assert_eq!(page.total, 3); // itself plus two subsidiaries
    assert!(
        page.tenants
            .iter()
            .all(|t| t.id == a.id || t.parent_id == Some(a.id.clone()))
    );

    session.set_context(&sales.id).unwrap();
    let page = session.select(&TenantFilter::default()).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.tenants[0].id, sales.id);
}

#[test]
fn writes_against_invisible_rows_report_not_found() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let a = create_parent(&mut session, "Acme");
    let b = create_parent(&mut session, "Borealis");

    session.set_context(&a.id).unwrap();

    let updated = session
        .update(
            &b.id,
            TenantPatch {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(updated.is_none());

    assert!(!session.delete(&b.id).unwrap());

    // The row is untouched.
    session.set_context(&b.id).unwrap();
    let row = session.get(&b.id).unwrap().unwrap();
    assert_eq!(row.name, "Borealis");
}

#[test]
fn full_lifecycle_across_two_hierarchies() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();

    // Bootstrap a parent with no context, then act as it.
    let p = create_parent(&mut session, "P");
    let s1 = create_child(&mut session, &p.id, "S1");

    // The subsidiary cannot look back up at its parent.
    session.set_context(&s1.id).unwrap();
    assert!(session.get(&p.id).unwrap().is_none());

    // The parent sees its subsidiary.
    session.set_context(&p.id).unwrap();
    assert!(session.get(&s1.id).unwrap().is_some());

    // A second, unrelated parent sees neither of them.
    session.clear_context();
    let q = create_parent(&mut session, "Q");
    session.set_context(&q.id).unwrap();
    assert!(session.get(&p.id).unwrap().is_none());
    assert!(session.get(&s1.id).unwrap().is_none());
    assert!(!session.delete(&p.id).unwrap());
    assert!(!session.delete(&s1.id).unwrap());
}

#[test]
fn no_transitive_access_through_shared_structure() {
    let backend = memory_backend();
    let mut session = backend.session().unwrap();
    let parent = create_parent(&mut session, "Acme");
    let child = create_child(&mut session, &parent.id, "Ops");

    // The child can see itself but gains nothing from its parent's reach.
    session.set_context(&child.id).unwrap();
    assert!(session.get(&child.id).unwrap().is_some());
    let page = session.select(&TenantFilter::default()).unwrap();
    assert_eq!(page.total, 1);
}
