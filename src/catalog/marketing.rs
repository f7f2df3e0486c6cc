use super::Endpoint;
use crate::error::Result;
use crate::request::Params;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;
use serde_json::Value;

pub const SUBSCRIPTIONS: Endpoint =
    Endpoint::get("subscriptions.get", "email/public/v1/subscriptions/timeline")
        .whitelist(&["startTimestamp", "endTimestamp", "offset", "limit", "changeType"]);
pub const UNSUBSCRIBE: Endpoint =
    Endpoint::put("subscriptions.unsubscribe", "email/public/v1/subscriptions/{email}");
pub const FORMS: Endpoint = Endpoint::get("forms.getAll", "forms/v2/forms");
pub const FORM: Endpoint = Endpoint::get("forms.getById", "forms/v2/forms/{form}");
pub const FORM_FIELDS: Endpoint = Endpoint::get("forms.getFields", "forms/v2/fields/{form}");
pub const CAMPAIGNS: Endpoint =
    Endpoint::get("campaigns.get", "email/public/v1/campaigns").whitelist(&["offset", "limit"]);
pub const CAMPAIGN: Endpoint =
    Endpoint::get("campaigns.getById", "email/public/v1/campaigns/{campaign}")
        .whitelist(&["appId"]);
pub const CAMPAIGN_EVENTS: Endpoint = Endpoint::get("campaigns.events", "email/public/v1/events")
    .whitelist(&[
        "appId",
        "campaignId",
        "recipient",
        "eventType",
        "startTimestamp",
        "endTimestamp",
        "offset",
        "limit",
        "excludeFilteredEvents",
    ]);

/// Email subscriptions, forms and email campaigns
pub struct Marketing<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Marketing<'_> {
    /// Timeline of subscription changes across the portal
    pub fn subscriptions<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&SUBSCRIPTIONS, &[], param)
    }

    /// Unsubscribe an address from all email
    pub fn unsubscribe(&self, email: &str) -> Result<Response> {
        let mut params = Params::new();
        params.insert("unsubscribeFromAll".to_string(), Value::Bool(true));
        self.client
            .invoke_params(&UNSUBSCRIBE, &[("email", email)], params)
    }

    pub fn forms(&self) -> Result<Response> {
        self.client.invoke(&FORMS, &[], ())
    }

    pub fn form(&self, form: &str) -> Result<Response> {
        self.client.invoke(&FORM, &[("form", form)], ())
    }

    pub fn form_fields(&self, form: &str) -> Result<Response> {
        self.client.invoke(&FORM_FIELDS, &[("form", form)], ())
    }

    pub fn campaigns<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&CAMPAIGNS, &[], param)
    }

    pub fn campaign<P: Serialize>(&self, campaign: u64, param: P) -> Result<Response> {
        self.client
            .invoke(&CAMPAIGN, &[("campaign", &campaign.to_string())], param)
    }

    pub fn campaign_events<P: Serialize>(&self, param: P) -> Result<Response> {
        self.client.invoke(&CAMPAIGN_EVENTS, &[], param)
    }
}
