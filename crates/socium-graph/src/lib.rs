//! # Socium Graph
//!
//! Neo4j store client for the socium social-graph gateway.
//!
//! Provides the connection lifecycle, typed read queries over the
//! social graph (users, groups, FOLLOWS/SUBSCRIBED edges), and the
//! write path for node and relationship maintenance.

pub mod client;
pub mod label;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use label::{InvalidLabel, Label};
pub use mutations::{NewNode, UserAttributes};
pub use queries::{NodeDetail, NodeSummary, RankedGroup, RankedUser, UserProfile};
