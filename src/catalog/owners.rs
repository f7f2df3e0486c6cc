use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

pub const GET: Endpoint =
    Endpoint::get("owners.get", "owners/v2/owners").whitelist(&["email", "includeInactive"]);
pub const GET_BY_ID: Endpoint = Endpoint::get("owners.getById", "owners/v2/owners/{owner}");

pub struct Owners<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Owners<'_> {
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_by_id(&self, owner: u64) -> Result<Response> {
        self.client.invoke(&GET_BY_ID, &[("owner", &owner.to_string())], ())
    }
}
