use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;

pub const ACCOUNT_DETAILS: Endpoint = Endpoint::get("integrations.getAccountDetails", "integrations/v1/me");

pub struct Integrations<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Integrations<'_> {
    /// Portal id, time zone and currency of the authenticated account
    pub fn account_details(&self) -> Result<Response> {
        self.client.invoke(&ACCOUNT_DETAILS, &[], ())
    }
}
