//! Integration tests: the full scouting pipeline against an in-memory
//! roster source.

mod mock_roster;
mod pipeline;
