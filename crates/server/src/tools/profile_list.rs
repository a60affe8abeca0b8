//! profile_list tool implementation.

use broadsheet_client::{ProfileSet, SiteProfile};
use broadsheet_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Summary of one configured site profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProfileSummary {
    pub id: String,
    /// Publisher name stamped on extracted records.
    pub publisher: String,
    pub require_author: bool,
}

impl From<&SiteProfile> for ProfileSummary {
    fn from(profile: &SiteProfile) -> Self {
        Self { id: profile.id.clone(), publisher: profile.name.clone(), require_author: profile.require_author }
    }
}

/// Output from the profile_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProfileListOutput {
    pub profiles: Vec<ProfileSummary>,
}

/// Implementation of the profile_list tool.
pub fn list_impl(profiles: &ProfileSet) -> Result<CallToolResult, McpError> {
    let output = ProfileListOutput { profiles: profiles.iter().map(ProfileSummary::from).collect() };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize profiles: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
