use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

const RECENT: &[&str] = &["count", "offset", "since", "includePropertyVersions"];

pub const GET: Endpoint = Endpoint::get("deals.get", "deals/v1/deal/paged").whitelist(&[
    "limit",
    "offset",
    "properties",
    "propertiesWithHistory",
    "includeAssociations",
]);
pub const GET_BY_ID: Endpoint = Endpoint::get("deals.getById", "deals/v1/deal/{deal}");
pub const GET_RECENTLY_CREATED: Endpoint =
    Endpoint::get("deals.getRecentlyCreated", "deals/v1/deal/recent/created").whitelist(RECENT);
pub const GET_RECENTLY_MODIFIED: Endpoint =
    Endpoint::get("deals.getRecentlyModified", "deals/v1/deal/recent/modified").whitelist(RECENT);
pub const CREATE: Endpoint = Endpoint::post("deals.create", "deals/v1/deal").json();
pub const UPDATE: Endpoint = Endpoint::put("deals.update", "deals/v1/deal/{deal}");
pub const DELETE: Endpoint = Endpoint::delete("deals.deleteById", "deals/v1/deal/{deal}");
pub const ASSOCIATE: Endpoint = Endpoint::put(
    "deals.associate",
    "deals/v1/deal/{deal}/associations/{object_type}?id={object_id}",
);
pub const PIPELINES: Endpoint = Endpoint::get("pipelines.get", "deals/v1/pipelines");

/// Deal operations
pub struct Deals<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Deals<'_> {
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_by_id(&self, deal: u64) -> Result<Response> {
        self.client.invoke(&GET_BY_ID, &[("deal", &deal.to_string())], ())
    }

    pub fn get_recently_created<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET_RECENTLY_CREATED, &[], param)
    }

    pub fn get_recently_modified<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET_RECENTLY_MODIFIED, &[], param)
    }

    pub fn create<P: Serialize>(&self, data: P) -> Result<Response> {
        self.client.invoke(&CREATE, &[], data)
    }

    pub fn update<P: Serialize>(&self, deal: u64, data: P) -> Result<Response> {
        self.client.invoke(&UPDATE, &[("deal", &deal.to_string())], data)
    }

    pub fn delete(&self, deal: u64) -> Result<Response> {
        self.client.invoke(&DELETE, &[("deal", &deal.to_string())], ())
    }

    /// Associate a deal with a `CONTACT` or `COMPANY` object
    pub fn associate(&self, deal: u64, object_type: &str, object_id: u64) -> Result<Response> {
        self.client.invoke(
            &ASSOCIATE,
            &[
                ("deal", &deal.to_string()),
                ("object_type", object_type),
                ("object_id", &object_id.to_string()),
            ],
            (),
        )
    }

    /// Deal pipelines and their stages
    pub fn pipelines(&self) -> Result<Response> {
        self.client.invoke(&PIPELINES, &[], ())
    }
}
