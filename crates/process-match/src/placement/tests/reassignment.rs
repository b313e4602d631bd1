use super::common::*;

use crate::placement::domain::{AssignmentId, Communication, Potential};
use crate::placement::store::StoreError;

#[test]
fn reassign_moves_exactly_one_slot() {
    let (service, store) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");
    assert_eq!(vacancy_of(&store, "Inbound Service"), 7);

    let updated = service
        .reassign(
            &placed.assignment_id,
            reassignment(
                "John Doe",
                "john@example.com",
                Potential::Service,
                Communication::Excellent,
                Some("Premium Service Desk"),
            ),
        )
        .expect("move succeeds");

    assert_eq!(updated.process.as_deref(), Some("Premium Service Desk"));
    assert_eq!(vacancy_of(&store, "Inbound Service"), 8, "slot released");
    assert_eq!(vacancy_of(&store, "Premium Service Desk"), 1, "slot taken");
}

#[test]
fn reassign_to_bench_releases_the_slot() {
    let (service, store) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let updated = service
        .reassign(
            &placed.assignment_id,
            reassignment(
                "John Doe",
                "john@example.com",
                Potential::Service,
                Communication::Good,
                None,
            ),
        )
        .expect("bench move succeeds");

    assert!(updated.process.is_none());
    assert_eq!(vacancy_of(&store, "Inbound Service"), 8);
}

#[test]
fn reassign_rejects_a_full_target_and_changes_nothing() {
    let (service, store) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let error = service
        .reassign(
            &placed.assignment_id,
            reassignment(
                "John Doe",
                "john@example.com",
                Potential::Sales,
                Communication::Excellent,
                Some("Credit Desk"),
            ),
        )
        .expect_err("Credit Desk is full");

    assert!(matches!(error, StoreError::SlotsExhausted(name) if name == "Credit Desk"));
    let record = service.get(&placed.assignment_id).expect("record kept");
    assert_eq!(record.process.as_deref(), Some("Inbound Service"));
    assert_eq!(
        record.employee.potential,
        Potential::Service,
        "profile edit rolled back with the move"
    );
    assert_eq!(vacancy_of(&store, "Inbound Service"), 7, "old slot still held");
    assert_eq!(vacancy_of(&store, "Credit Desk"), 0);
}

#[test]
fn reassign_rejects_an_unknown_target_process() {
    let (service, _) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let error = service
        .reassign(
            &placed.assignment_id,
            reassignment(
                "John Doe",
                "john@example.com",
                Potential::Service,
                Communication::Good,
                Some("Ghost Desk"),
            ),
        )
        .expect_err("no such process");
    assert!(matches!(error, StoreError::ProcessNotFound(name) if name == "Ghost Desk"));
}

#[test]
fn reassign_rejects_stealing_another_employees_email() {
    let (service, _) = build_service();
    service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("first allocation");
    let second = service
        .allocate(request(
            "Jane Smith",
            "jane@example.com",
            Potential::Sales,
            Communication::VeryGood,
        ))
        .expect("second allocation");

    let error = service
        .reassign(
            &second.assignment_id,
            reassignment(
                "Jane Smith",
                "john@example.com",
                Potential::Sales,
                Communication::VeryGood,
                Some("Outbound Sales"),
            ),
        )
        .expect_err("email belongs to John");
    assert!(matches!(error, StoreError::DuplicateEmail(email) if email == "john@example.com"));
}

#[test]
fn reassign_can_keep_the_email_while_editing_the_profile() {
    let (service, _) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let updated = service
        .reassign(
            &placed.assignment_id,
            reassignment(
                "John A. Doe",
                "john@example.com",
                Potential::Service,
                Communication::VeryGood,
                Some("Inbound Service"),
            ),
        )
        .expect("profile edit succeeds");

    assert_eq!(updated.employee.name, "John A. Doe");
    assert_eq!(updated.employee.communication, Communication::VeryGood);
    assert_eq!(updated.process.as_deref(), Some("Inbound Service"));
}

#[test]
fn reassign_unknown_assignment_fails() {
    let (service, _) = build_service();
    let error = service
        .reassign(
            &AssignmentId("emp-999999".to_string()),
            reassignment(
                "Nobody",
                "nobody@example.com",
                Potential::Service,
                Communication::Good,
                None,
            ),
        )
        .expect_err("no such assignment");
    assert!(matches!(error, StoreError::AssignmentNotFound(_)));
}

#[test]
fn withdraw_releases_the_slot_and_drops_the_record() {
    let (service, store) = build_service();
    let placed = service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let removed = service
        .withdraw(&placed.assignment_id)
        .expect("withdraw succeeds");
    assert_eq!(removed.process.as_deref(), Some("Inbound Service"));
    assert_eq!(vacancy_of(&store, "Inbound Service"), 8);

    let error = service
        .get(&placed.assignment_id)
        .expect_err("record removed");
    assert!(matches!(error, StoreError::AssignmentNotFound(_)));

    // The email is free again after withdrawal.
    service
        .allocate(request(
            "John Doe",
            "john@example.com",
            Potential::Service,
            Communication::Good,
        ))
        .expect("email can be reused");
}

#[test]
fn withdraw_of_benched_employee_touches_no_vacancy() {
    let (service, store) = build_service();
    let benched = service
        .allocate(request(
            "Uma Stone",
            "uma@example.com",
            Potential::Support,
            Communication::Good,
        ))
        .expect("attempt recorded");
    assert!(!benched.success);

    service
        .withdraw(&benched.assignment_id)
        .expect("withdraw succeeds");
    assert_eq!(vacancy_of(&store, "Inbound Service"), 8);
}

#[test]
fn find_by_email_locates_the_record() {
    let (service, _) = build_service();
    service
        .allocate(request(
            "John Doe",
            "  john@example.com ",
            Potential::Service,
            Communication::Good,
        ))
        .expect("allocation succeeds");

    let found = service
        .find_by_email(" john@example.com ")
        .expect("lookup works")
        .expect("record found");
    assert_eq!(found.employee.name, "John Doe");

    assert!(service
        .find_by_email("ghost@example.com")
        .expect("lookup works")
        .is_none());
}
