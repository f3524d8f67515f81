//! Battle sessions: shared state, concurrent intake and termination

pub mod battle;
pub mod controller;
pub mod link;
pub mod outcome;

pub use battle::{Battle, Phase};
pub use controller::{run_battle, start_session, Contestant, SessionReport, MOVE_PROMPT};
pub use link::{Inbox, Link, Outbox, Peer};
pub use outcome::{decide, final_notice, EndReason, Verdict};
