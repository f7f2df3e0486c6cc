use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

const RECENT: &[&str] = &["count", "offset"];

pub const GET: Endpoint = Endpoint::get("companies.get", "companies/v2/companies/paged")
    .whitelist(&["limit", "offset", "properties", "propertiesWithHistory"]);
pub const GET_BY_ID: Endpoint = Endpoint::get("companies.getById", "companies/v2/companies/{company}");
pub const GET_RECENTLY_CREATED: Endpoint =
    Endpoint::get("companies.getRecentlyCreated", "companies/v2/companies/recent/created")
        .whitelist(RECENT);
pub const GET_RECENTLY_MODIFIED: Endpoint =
    Endpoint::get("companies.getRecentlyModified", "companies/v2/companies/recent/modified")
        .whitelist(RECENT);
pub const CREATE: Endpoint = Endpoint::post("companies.create", "companies/v2/companies").json();
pub const UPDATE: Endpoint = Endpoint::put("companies.update", "companies/v2/companies/{company}");
pub const DELETE: Endpoint = Endpoint::delete("companies.delete", "companies/v2/companies/{company}");
pub const GET_CONTACT_IDS: Endpoint =
    Endpoint::get("companies.getContactIds", "companies/v2/companies/{company}/vids")
        .whitelist(&["count", "vidOffset"]);
pub const GET_CONTACTS: Endpoint =
    Endpoint::get("companies.getContacts", "companies/v2/companies/{company}/contacts")
        .whitelist(&["count", "vidOffset"]);
pub const ADD_CONTACT: Endpoint = Endpoint::put(
    "companies.addContactToCompany",
    "companies/v2/companies/{company}/contacts/{vid}",
);

/// Company operations
pub struct Companies<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Companies<'_> {
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_by_id(&self, company: u64) -> Result<Response> {
        self.client
            .invoke(&GET_BY_ID, &[("company", &company.to_string())], ())
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

    pub fn update<P: Serialize>(&self, company: u64, data: P) -> Result<Response> {
        self.client
            .invoke(&UPDATE, &[("company", &company.to_string())], data)
    }

    pub fn delete(&self, company: u64) -> Result<Response> {
        self.client
            .invoke(&DELETE, &[("company", &company.to_string())], ())
    }

    pub fn get_contact_ids<P: Serialize>(&self, company: u64, param: P) -> Result<Response> {
        self.client
            .invoke(&GET_CONTACT_IDS, &[("company", &company.to_string())], param)
    }

    pub fn get_contacts<P: Serialize>(&self, company: u64, param: P) -> Result<Response> {
        self.client
            .invoke(&GET_CONTACTS, &[("company", &company.to_string())], param)
    }

    pub fn add_contact(&self, company: u64, vid: u64) -> Result<Response> {
        self.client.invoke(
            &ADD_CONTACT,
            &[("company", &company.to_string()), ("vid", &vid.to_string())],
            (),
        )
    }
}
