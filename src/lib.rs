//! Pay period and overtime engine for a personal timesheet.
//!
//! This crate turns daily hours worked and travel time into paycheck
//! estimates: it resolves which pay period a date falls in, splits the
//! period into seven-day chunks for weekly overtime, sums regular, overtime,
//! and travel pay, applies flat withholding, and counts down to payday.
//!
//! The [`calculation`] functions are pure. Records and settings live behind
//! the [`storage::TimesheetStore`] trait, and [`api`] serves everything over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
