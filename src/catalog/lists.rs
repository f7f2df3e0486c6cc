use super::Endpoint;
use crate::error::Result;
use crate::request::Params;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;
use serde_json::Value;

const LIST_CONTACTS: &[&str] = &[
    "count",
    "vidOffset",
    "timeOffset",
    "property",
    "propertyMode",
    "formSubmissionMode",
    "showListMemberships",
];

pub const GET: Endpoint = Endpoint::get("lists.get", "contacts/v1/lists").whitelist(&["count", "offset"]);
pub const GET_ONE: Endpoint = Endpoint::get("lists.getOne", "contacts/v1/lists/{list}");
pub const GET_CONTACTS: Endpoint =
    Endpoint::get("lists.getContacts", "contacts/v1/lists/{list}/contacts/all").whitelist(LIST_CONTACTS);
pub const GET_RECENT_CONTACTS: Endpoint =
    Endpoint::get("lists.getRecentContacts", "contacts/v1/lists/{list}/contacts/recent")
        .whitelist(LIST_CONTACTS);
pub const CREATE: Endpoint = Endpoint::post("lists.create", "contacts/v1/lists").json();
pub const DELETE: Endpoint = Endpoint::delete("lists.delete", "contacts/v1/lists/{list}");
pub const ADD_CONTACTS: Endpoint =
    Endpoint::post("lists.addContacts", "contacts/v1/lists/{list}/add").json();
pub const REMOVE_CONTACTS: Endpoint =
    Endpoint::post("lists.removeContacts", "contacts/v1/lists/{list}/remove").json();

/// Contact list operations
pub struct Lists<'a> {
    pub(crate) client: &'a HubSpot,
}

fn membership(vids: &[u64], emails: &[&str]) -> Params {
    let mut params = Params::new();
    params.insert("vids".to_string(), vids.iter().copied().map(Value::from).collect());
    params.insert("emails".to_string(), emails.iter().copied().map(Value::from).collect());
    params
}

impl Lists<'_> {
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_one(&self, list: u64) -> Result<Response> {
        self.client.invoke(&GET_ONE, &[("list", &list.to_string())], ())
    }

    pub fn get_contacts<P: Serialize>(&self, list: u64, param: P) -> Result<Response> {
        self.client
            .invoke(&GET_CONTACTS, &[("list", &list.to_string())], param)
    }

    pub fn get_recent_contacts<P: Serialize>(&self, list: u64, param: P) -> Result<Response> {
        self.client
            .invoke(&GET_RECENT_CONTACTS, &[("list", &list.to_string())], param)
    }

    pub fn create<P: Serialize>(&self, data: P) -> Result<Response> {
        self.client.invoke(&CREATE, &[], data)
    }

    pub fn delete(&self, list: u64) -> Result<Response> {
        self.client.invoke(&DELETE, &[("list", &list.to_string())], ())
    }

    /// Add contacts to a static list by id and/or email
    pub fn add_contacts(&self, list: u64, vids: &[u64], emails: &[&str]) -> Result<Response> {
        self.client.invoke_params(
            &ADD_CONTACTS,
            &[("list", &list.to_string())],
            membership(vids, emails),
        )
    }

    pub fn remove_contacts(&self, list: u64, vids: &[u64], emails: &[&str]) -> Result<Response> {
        self.client.invoke_params(
            &REMOVE_CONTACTS,
            &[("list", &list.to_string())],
            membership(vids, emails),
        )
    }
}
