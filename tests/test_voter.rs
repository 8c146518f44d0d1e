//! Voter registration and authentication.

use voting_lib::app::{
    voter_authenticate, voter_get_by_email, voter_register, voter_set_verified, VoterRegisterReq,
};
use voting_lib::hash_password;
use voting_lib::infra::db::init_test_db;

// ──────────────────────── Helper ────────────────────────

fn make_req(name: &str, constituency: &str) -> VoterRegisterReq {
    VoterRegisterReq {
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase()),
        password: "s3cret".to_string(),
        constituency: constituency.to_string(),
    }
}

#[test]
fn register_stores_hash_not_plaintext() {
    let mut conn = init_test_db().unwrap();
    let v = voter_register(conn.as_mut(), make_req("Asha", "Kurnool")).unwrap();
    assert_eq!(v.password, hash_password("s3cret"));
    assert_ne!(v.password, "s3cret");
    assert!(!v.is_verified);
    assert_eq!(v.constituency, "Kurnool");
}

#[test]
fn register_normalizes_email() {
    let mut conn = init_test_db().unwrap();
    let mut req = make_req("Asha", "Kurnool");
    req.email = "  Asha@Test.COM ".to_string();
    let v = voter_register(conn.as_mut(), req).unwrap();
    assert_eq!(v.email, "asha@test.com");
    assert_eq!(voter_get_by_email(conn.as_mut(), "ASHA@test.com").unwrap().id, v.id);
}

#[test]
fn duplicate_email_is_conflict() {
    let mut conn = init_test_db().unwrap();
    voter_register(conn.as_mut(), make_req("Asha", "Kurnool")).unwrap();
    let err = voter_register(conn.as_mut(), make_req("Asha", "Nellore")).unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
}

#[test]
fn unknown_constituency_is_not_found() {
    let mut conn = init_test_db().unwrap();
    let err = voter_register(conn.as_mut(), make_req("Asha", "Hyderabad")).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn register_trims_constituency() {
    let mut conn = init_test_db().unwrap();
    let v = voter_register(conn.as_mut(), make_req("Asha", "  Guntur ")).unwrap();
    assert_eq!(v.constituency, "Guntur");
}

#[test]
fn empty_name_fails_validation() {
    let mut conn = init_test_db().unwrap();
    let err = voter_register(conn.as_mut(), make_req("   ", "Kurnool")).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn authenticate_checks_password() {
    let mut conn = init_test_db().unwrap();
    voter_register(conn.as_mut(), make_req("Asha", "Kurnool")).unwrap();
    assert!(voter_authenticate(conn.as_mut(), "asha@test.com", "s3cret").is_ok());
    let wrong = voter_authenticate(conn.as_mut(), "asha@test.com", "nope").unwrap_err();
    assert_eq!(wrong.code(), "UNAUTHORIZED");
    let missing = voter_authenticate(conn.as_mut(), "ghost@test.com", "s3cret").unwrap_err();
    assert_eq!(missing.code(), "UNAUTHORIZED");
}

#[test]
fn set_verified_flips_flag() {
    let mut conn = init_test_db().unwrap();
    let v = voter_register(conn.as_mut(), make_req("Asha", "Kurnool")).unwrap();
    voter_set_verified(conn.as_mut(), v.id, true).unwrap();
    assert!(voter_get_by_email(conn.as_mut(), &v.email).unwrap().is_verified);
    assert_eq!(
        voter_set_verified(conn.as_mut(), 404, true).unwrap_err().code(),
        "NOT_FOUND"
    );
}
