use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

pub const GET: Endpoint = Endpoint::get("engagements.get", "engagements/v1/engagements/paged")
    .whitelist(&["limit", "offset"]);
pub const GET_RECENTLY_MODIFIED: Endpoint = Endpoint::get(
    "engagements.getRecentlyModified",
    "engagements/v1/engagements/recent/modified",
)
.whitelist(&["count", "offset", "since"]);
pub const CREATE: Endpoint = Endpoint::post("engagements.create", "engagements/v1/engagements").json();
pub const GET_ASSOCIATED: Endpoint = Endpoint::get(
    "engagements.getAssociated",
    "engagements/v1/engagements/associated/{object_type}/{object_id}/paged",
)
.whitelist(&["limit", "offset"]);

/// Engagement (notes, calls, meetings, tasks) operations
pub struct Engagements<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Engagements<'_> {
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_recently_modified<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET_RECENTLY_MODIFIED, &[], param)
    }

    pub fn create<P: Serialize>(&self, data: P) -> Result<Response> {
        self.client.invoke(&CREATE, &[], data)
    }

    pub fn get_associated<P: Serialize>(&self, object_type: &str, object_id: u64, param: P) -> Result<Response> {
        self.client.invoke(
            &GET_ASSOCIATED,
            &[("object_type", object_type), ("object_id", &object_id.to_string())],
            param,
        )
    }
}
