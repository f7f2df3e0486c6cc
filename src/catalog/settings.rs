use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

pub const GET: Endpoint =
    Endpoint::get("settings.getSettings", "integrations/v1/{app}/settings?userId={user}");
pub const UPDATE: Endpoint =
    Endpoint::put("settings.updateSettings", "integrations/v1/{app}/settings?userId={user}");

/// Per-user application settings
pub struct Settings<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Settings<'_> {
    pub fn get(&self, user: u64) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client
            .invoke(&GET, &[("app", app), ("user", &user.to_string())], ())
    }

    pub fn update<P: Serialize>(&self, user: u64, data: P) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client
            .invoke(&UPDATE, &[("app", app), ("user", &user.to_string())], data)
    }
}
