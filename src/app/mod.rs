//! Typed helpers over the voting tables.

mod admin;
mod audit;
mod candidate;
mod constituency;
mod election;
mod vote;
mod voter;

pub use admin::{admin_authenticate, admin_count, admin_create};
pub use audit::{audit_append, audit_list_recent, AuditAppendReq};
pub use candidate::{candidate_create, candidate_list_by_constituency, CandidateCreateReq};
pub use constituency::{constituency_exists, constituency_list, constituency_list_names};
pub use election::{election_create, election_get, election_list_by_constituency, ElectionCreateReq};
pub use vote::{vote_cast, vote_has_voted, vote_tally};
pub use voter::{
    voter_authenticate, voter_get_by_email, voter_register, voter_set_verified, VoterRegisterReq,
};
