//! Shared test harness modules for the courier CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::plan::{PlanConfig, PlannerBuilder, run_plan_with};

mod helpers;
