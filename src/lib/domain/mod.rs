//! Domain types shared by every layer of the client.

pub mod types;
