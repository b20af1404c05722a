// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Phase-based pipeline tests.
//!
//! - `parse/`: lexing, parsing and static checks through the driver
//! - `eval/`: loading and running programs
//! - `cli/`: whole-file runs as `cairn run` performs them
//! - `common/`: shared helpers
//!
//! ```bash
//! cargo test -p cairnc --test phases
//! cargo test -p cairnc --test phases eval
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;

#[path = "phases/cli/mod.rs"]
mod cli;
