//! Domain types and the attendance eligibility calculator.
//!
//! Everything in this crate is a pure function of data handed in by the
//! caller. There are no database or clock dependencies: handlers fetch rows
//! through `survivor-db`, convert them into the snapshot types defined here,
//! and pass "today" explicitly.

pub mod attendance;
pub mod calendar;
pub mod deadline;
pub mod error;
pub mod insight;
pub mod risk;
pub mod subject;
pub mod timetable;
pub mod types;
