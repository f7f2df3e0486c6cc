use super::{merge_unique, Endpoint};
use crate::error::Result;
use crate::request::{to_params, Params};
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;
use serde_json::Value;

/// Properties always requested by [`Contacts::get_by_id_batch`]
pub const DEFAULT_BATCH_PROPERTIES: &[&str] = &[
    "email",
    "firstname",
    "lastname",
    "phone",
    "company",
    "jobtitle",
    "lifecyclestage",
    "hubspot_owner_id",
];

const LISTING: &[&str] = &[
    "count",
    "vidOffset",
    "timeOffset",
    "property",
    "propertyMode",
    "formSubmissionMode",
    "showListMemberships",
];

const PROFILE: &[&str] = &["property", "propertyMode", "formSubmissionMode", "showListMemberships"];

const BATCH: &[&str] = &[
    "vid",
    "email",
    "property",
    "propertyMode",
    "formSubmissionMode",
    "showListMemberships",
    "includeDeletes",
];

pub const GET: Endpoint =
    Endpoint::get("contacts.get", "contacts/v1/lists/all/contacts/all").whitelist(LISTING);
pub const GET_RECENTLY_MODIFIED: Endpoint = Endpoint::get(
    "contacts.getRecentlyModified",
    "contacts/v1/lists/recently_updated/contacts/recent",
)
.whitelist(LISTING);
pub const GET_RECENTLY_CREATED: Endpoint =
    Endpoint::get("contacts.getRecentlyCreated", "contacts/v1/lists/all/contacts/recent")
        .whitelist(LISTING);
pub const GET_BY_ID: Endpoint =
    Endpoint::get("contacts.getById", "contacts/v1/contact/vid/{vid}/profile").whitelist(PROFILE);
pub const GET_BY_ID_BATCH: Endpoint =
    Endpoint::get("contacts.getByIdBatch", "contacts/v1/contact/vids/batch").whitelist(BATCH);
pub const GET_BY_EMAIL: Endpoint =
    Endpoint::get("contacts.getByEmail", "contacts/v1/contact/email/{email}/profile")
        .whitelist(PROFILE);
pub const GET_BY_EMAIL_BATCH: Endpoint =
    Endpoint::get("contacts.getByEmailBatch", "contacts/v1/contact/emails/batch").whitelist(BATCH);
pub const GET_BY_TOKEN: Endpoint =
    Endpoint::get("contacts.getByToken", "contacts/v1/contact/utk/{utk}/profile").whitelist(PROFILE);
pub const CREATE: Endpoint = Endpoint::post("contacts.create", "contacts/v1/contact").json();
pub const UPDATE: Endpoint =
    Endpoint::post("contacts.update", "contacts/v1/contact/vid/{vid}/profile").json();
pub const CREATE_OR_UPDATE: Endpoint = Endpoint::post(
    "contacts.createOrUpdate",
    "contacts/v1/contact/createOrUpdate/email/{email}",
)
.json();
pub const MERGE: Endpoint =
    Endpoint::post("contacts.merge", "contacts/v1/contact/merge-vids/{vid}/").json();
pub const DELETE: Endpoint = Endpoint::delete("contacts.delete", "contacts/v1/contact/vid/{vid}");
pub const SEARCH: Endpoint = Endpoint::get("contacts.search", "contacts/v1/search/query")
    .whitelist(&["q", "count", "offset", "property", "sort", "order"]);
pub const PROPERTIES: Endpoint =
    Endpoint::get("contacts.properties", "properties/v1/contacts/properties");

/// Contact operations
pub struct Contacts<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Contacts<'_> {
    /// All contacts, paged with `count`/`vidOffset`
    pub fn get<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET, &[], param)
    }

    pub fn get_recently_modified<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET_RECENTLY_MODIFIED, &[], param)
    }

    pub fn get_recently_created<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&GET_RECENTLY_CREATED, &[], param)
    }

    pub fn get_by_id<P: Serialize>(&self, vid: u64, param: P) -> Result<Response> {
        self.client.invoke(&GET_BY_ID, &[("vid", &vid.to_string())], param)
    }

    /// Several contacts by id; [`DEFAULT_BATCH_PROPERTIES`] are always
    /// requested along with any `property` values the caller passes.
    pub fn get_by_id_batch<P: Serialize>(&self, vids: &[u64], param: P) -> Result<Response> {
        let mut params = to_params(param)?;
        params.insert("vid".to_string(), vids.iter().copied().map(Value::from).collect());
        merge_unique(&mut params, "property", DEFAULT_BATCH_PROPERTIES);
        self.client.invoke_params(&GET_BY_ID_BATCH, &[], params)
    }

    pub fn get_by_email<P: Serialize>(&self, email: &str, param: P) -> Result<Response> {
        self.client.invoke(&GET_BY_EMAIL, &[("email", email)], param)
    }

    pub fn get_by_email_batch<P: Serialize>(&self, emails: &[&str], param: P) -> Result<Response> {
        let mut params = to_params(param)?;
        params.insert("email".to_string(), emails.iter().copied().map(Value::from).collect());
        self.client.invoke_params(&GET_BY_EMAIL_BATCH, &[], params)
    }

    /// Contact identified by a `hubspotutk` tracking cookie
    pub fn get_by_token<P: Serialize>(&self, utk: &str, param: P) -> Result<Response> {
        self.client.invoke(&GET_BY_TOKEN, &[("utk", utk)], param)
    }

    pub fn create<P: Serialize>(&self, data: P) -> Result<Response> {
        self.client.invoke(&CREATE, &[], data)
    }

    pub fn update<P: Serialize>(&self, vid: u64, data: P) -> Result<Response> {
        self.client.invoke(&UPDATE, &[("vid", &vid.to_string())], data)
    }

    pub fn create_or_update<P: Serialize>(&self, email: &str, data: P) -> Result<Response> {
        self.client.invoke(&CREATE_OR_UPDATE, &[("email", email)], data)
    }

    /// Merge `secondary` into `primary`
    pub fn merge(&self, primary: u64, secondary: u64) -> Result<Response> {
        let mut params = Params::new();
        params.insert("vidToMerge".to_string(), Value::from(secondary));
        self.client
            .invoke_params(&MERGE, &[("vid", &primary.to_string())], params)
    }

    pub fn delete(&self, vid: u64) -> Result<Response> {
        self.client.invoke(&DELETE, &[("vid", &vid.to_string())], ())
    }

    pub fn search<P: Serialize>(&self, query: &str, param: P) -> Result<Response> {
        let mut params = to_params(param)?;
        params.insert("q".to_string(), Value::from(query));
        self.client.invoke_params(&SEARCH, &[], params)
    }

    pub fn properties(&self) -> Result<Response> {
        self.client.invoke(&PROPERTIES, &[], ())
    }
}
