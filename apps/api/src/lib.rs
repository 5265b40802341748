//! Resume Editor API: the backend the editor core talks to. Exposes the
//! section enhancement endpoint and flat resume storage (in-memory map plus
//! one JSON file per saved resume).

pub mod config;
pub mod enhance;
pub mod errors;
pub mod routes;
pub mod state;
pub mod storage;
