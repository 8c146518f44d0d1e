//! Vote integrity: one vote per voter per election.

use chrono::NaiveDate;
use voting_lib::app::{
    candidate_create, election_create, election_get, vote_cast, vote_has_voted, vote_tally,
    voter_register, CandidateCreateReq, ElectionCreateReq, VoterRegisterReq,
};
use voting_lib::infra::db::init_test_db;
use voting_lib::infra::DbConnection;

// ──────────────────────── Helper ────────────────────────

fn voter(conn: &mut dyn DbConnection, name: &str) -> i64 {
    voter_register(
        conn,
        VoterRegisterReq {
            name: name.to_string(),
            email: format!("{}@test.com", name.to_lowercase()),
            password: "pw".to_string(),
            constituency: "Guntur".to_string(),
        },
    )
    .unwrap()
    .id
}

fn candidate(conn: &mut dyn DbConnection, name: &str) -> i64 {
    candidate_create(
        conn,
        CandidateCreateReq {
            name: name.to_string(),
            party: "Independent".to_string(),
            constituency: "Guntur".to_string(),
            photo_path: None,
            symbol_path: None,
        },
    )
    .unwrap()
    .id
}

fn election(conn: &mut dyn DbConnection, title: &str) -> i64 {
    let day = NaiveDate::from_ymd_opt(2026, 5, 13).unwrap();
    election_create(
        conn,
        ElectionCreateReq {
            title: title.to_string(),
            description: None,
            constituency: "Guntur".to_string(),
            start_time: day.and_hms_opt(7, 0, 0).unwrap(),
            end_time: day.and_hms_opt(18, 0, 0).unwrap(),
            status: "active".to_string(),
        },
    )
    .unwrap()
    .id
}

// ══════════════════════════════════════════════════════════
//  vote_cast
// ══════════════════════════════════════════════════════════

#[test]
fn first_vote_is_recorded() {
    let mut conn = init_test_db().unwrap();
    let v = voter(conn.as_mut(), "Asha");
    let c = candidate(conn.as_mut(), "Ravi");
    let e = election(conn.as_mut(), "Lok Sabha");

    let vote = vote_cast(conn.as_mut(), v, e, c).unwrap();
    assert_eq!((vote.voter_id, vote.election_id, vote.candidate_id), (v, e, c));
    assert!(vote.voted_at.is_some());
    assert!(vote_has_voted(conn.as_mut(), v, e).unwrap());
}

#[test]
fn second_vote_same_election_is_conflict() {
    let mut conn = init_test_db().unwrap();
    let v = voter(conn.as_mut(), "Asha");
    let c1 = candidate(conn.as_mut(), "Ravi");
    let c2 = candidate(conn.as_mut(), "Lakshmi");
    let e = election(conn.as_mut(), "Lok Sabha");

    vote_cast(conn.as_mut(), v, e, c1).unwrap();
    let err = vote_cast(conn.as_mut(), v, e, c2).unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let tally = vote_tally(conn.as_mut(), e).unwrap();
    assert_eq!(tally.get(&c1), Some(&1));
    assert_eq!(tally.get(&c2), None);
}

#[test]
fn same_voter_different_elections_succeeds() {
    let mut conn = init_test_db().unwrap();
    let v = voter(conn.as_mut(), "Asha");
    let c = candidate(conn.as_mut(), "Ravi");
    let e1 = election(conn.as_mut(), "Lok Sabha");
    let e2 = election(conn.as_mut(), "Assembly");

    vote_cast(conn.as_mut(), v, e1, c).unwrap();
    vote_cast(conn.as_mut(), v, e2, c).unwrap();
    assert!(vote_has_voted(conn.as_mut(), v, e2).unwrap());
}

#[test]
fn different_voters_same_election_succeed() {
    let mut conn = init_test_db().unwrap();
    let a = voter(conn.as_mut(), "Asha");
    let b = voter(conn.as_mut(), "Bala");
    let c = candidate(conn.as_mut(), "Ravi");
    let e = election(conn.as_mut(), "Lok Sabha");

    vote_cast(conn.as_mut(), a, e, c).unwrap();
    vote_cast(conn.as_mut(), b, e, c).unwrap();
    assert_eq!(vote_tally(conn.as_mut(), e).unwrap().get(&c), Some(&2));
}

#[test]
fn vote_for_unknown_election_violates_foreign_key() {
    let mut conn = init_test_db().unwrap();
    let v = voter(conn.as_mut(), "Asha");
    let c = candidate(conn.as_mut(), "Ravi");
    let err = vote_cast(conn.as_mut(), v, 999, c).unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
}

#[test]
fn election_keeps_sub_second_window() {
    let mut conn = init_test_db().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 5, 13).unwrap();
    let start = day.and_hms_milli_opt(7, 0, 0, 100).unwrap();
    let end = day.and_hms_milli_opt(7, 0, 0, 900).unwrap();
    let created = election_create(
        conn.as_mut(),
        ElectionCreateReq {
            title: "By-election".to_string(),
            description: None,
            constituency: "Guntur".to_string(),
            start_time: start,
            end_time: end,
            status: "scheduled".to_string(),
        },
    )
    .unwrap();
    assert_eq!(created.start_time, start);
    assert_eq!(created.end_time, end);

    let stored = election_get(conn.as_mut(), created.id).unwrap();
    assert!(stored.end_time > stored.start_time);
}

#[test]
fn has_voted_false_before_casting() {
    let mut conn = init_test_db().unwrap();
    let v = voter(conn.as_mut(), "Asha");
    let e = election(conn.as_mut(), "Lok Sabha");
    assert!(!vote_has_voted(conn.as_mut(), v, e).unwrap());
    assert!(vote_tally(conn.as_mut(), e).unwrap().is_empty());
}
