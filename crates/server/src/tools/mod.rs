//! MCP tool implementations.
//!
//! This module contains all tools exposed by the broadsheet server.

pub mod article_delete;
pub mod article_extract;
pub mod article_get;
pub mod profile_list;
