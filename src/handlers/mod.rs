//! HTTP handlers, grouped by exposure: `public` needs no session,
//! `protected` sits behind the session middleware, `ops` hosts the
//! operational smoke-test endpoints.

pub mod ops;
pub mod protected;
pub mod public;
