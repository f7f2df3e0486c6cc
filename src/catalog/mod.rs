//! Named remote operations.
//!
//! Every operation is a `const` [`Endpoint`]: a verb, a path template and
//! an optional whitelist of accepted parameter names. Invoking one drops
//! parameters outside the whitelist, fills the path template and hands the
//! request to the executor. Resource groups are reached through accessors
//! on [`HubSpot`], e.g. `client.contacts().get_by_id(51, ())`.

pub mod companies;
pub mod contacts;
pub mod deals;
pub mod engagements;
pub mod integrations;
pub mod lists;
pub mod marketing;
pub mod oauth;
pub mod owners;
pub mod settings;
pub mod timelines;
pub mod workflows;

use crate::error::{HubSpotError, Result};
use crate::request::{to_params, Encoding, OperationRequest, Params, Verb};
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;
use serde_json::Value;

/// Declaration of one remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, used in error messages
    pub name: &'static str,
    pub verb: Verb,
    /// Path relative to the base URL; `{name}` segments are substituted
    pub path: &'static str,
    /// Accepted parameter names; `None` accepts any bag
    pub whitelist: Option<&'static [&'static str]>,
    pub encoding: Option<Encoding>,
    /// Renew the access token and retry once on HTTP 401
    pub refresh_on_unauthorized: bool,
}

impl Endpoint {
    pub const fn new(name: &'static str, verb: Verb, path: &'static str) -> Self {
        Endpoint {
            name,
            verb,
            path,
            whitelist: None,
            encoding: None,
            refresh_on_unauthorized: false,
        }
    }

    pub const fn get(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Get, path)
    }

    pub const fn post(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Post, path)
    }

    pub const fn put(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Put, path)
    }

    pub const fn delete(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Verb::Delete, path)
    }

    pub const fn whitelist(self, names: &'static [&'static str]) -> Self {
        Endpoint {
            whitelist: Some(names),
            ..self
        }
    }

    /// Send the parameters as a JSON body
    pub const fn json(self) -> Self {
        Endpoint {
            encoding: Some(Encoding::Json),
            ..self
        }
    }

    pub const fn refresh_on_unauthorized(self) -> Self {
        Endpoint {
            refresh_on_unauthorized: true,
            ..self
        }
    }

    /// Substitute `{name}` segments, percent-encoding each value
    pub fn render_path(&self, args: &[(&str, &str)]) -> Result<String> {
        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| {
                    HubSpotError::RequestBuild(format!("{}: unterminated path variable", self.name))
                })?;
            let name = &rest[start + 1..end];

            let value = args
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    HubSpotError::RequestBuild(format!("{}: missing value for {{{}}}", self.name, name))
                })?;

            path.push_str(&rest[..start]);
            path.push_str(&urlencoding::encode(value));
            rest = &rest[end + 1..];
        }

        path.push_str(rest);
        Ok(path)
    }

    /// Drop parameters outside the whitelist
    pub fn filter(&self, params: Params) -> Params {
        match self.whitelist {
            Some(allowed) => params
                .into_iter()
                .filter(|(key, _)| allowed.contains(&key.as_str()))
                .collect(),
            None => params,
        }
    }

    /// Resolve into a request for the executor
    pub fn request(&self, args: &[(&str, &str)], params: Params) -> Result<OperationRequest> {
        Ok(OperationRequest {
            verb: self.verb,
            path: self.render_path(args)?,
            params: self.filter(params),
            encoding: self.encoding,
        })
    }
}

/// Set-union of `defaults` and whatever the caller put under `key`.
///
/// Defaults come first; caller values keep their order; duplicates are
/// dropped. A scalar caller value counts as a one-element list.
pub fn merge_unique(params: &mut Params, key: &str, defaults: &[&str]) {
    let supplied = match params.remove(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    };

    let mut merged: Vec<Value> = Vec::with_capacity(defaults.len() + supplied.len());
    let candidates = defaults
        .iter()
        .map(|name| Value::String((*name).to_string()))
        .chain(supplied);
    for candidate in candidates {
        if !merged.contains(&candidate) {
            merged.push(candidate);
        }
    }

    params.insert(key.to_string(), Value::Array(merged));
}

impl HubSpot {
    /// Invoke a catalog endpoint with serializable parameters
    pub fn invoke<P>(&self, endpoint: &Endpoint, args: &[(&str, &str)], param: P) -> Result<Response>
    where
        P: Serialize,
    {
        self.invoke_params(endpoint, args, to_params(param)?)
    }

    pub(crate) fn invoke_params(
        &self,
        endpoint: &Endpoint,
        args: &[(&str, &str)],
        params: Params,
    ) -> Result<Response> {
        let request = endpoint.request(args, params)?;
        if endpoint.refresh_on_unauthorized {
            self.execute_with_refresh(&request)
        } else {
            self.execute(&request)
        }
    }

    /// Application id for app-scoped endpoints
    pub(crate) fn require_application_id(&self) -> Result<&str> {
        self.config()
            .application_id
            .as_deref()
            .ok_or_else(|| HubSpotError::Config("application_id is required for this operation".to_string()))
    }

    pub fn contacts(&self) -> contacts::Contacts<'_> {
        contacts::Contacts { client: self }
    }

    pub fn lists(&self) -> lists::Lists<'_> {
        lists::Lists { client: self }
    }

    pub fn companies(&self) -> companies::Companies<'_> {
        companies::Companies { client: self }
    }

    pub fn deals(&self) -> deals::Deals<'_> {
        deals::Deals { client: self }
    }

    pub fn engagements(&self) -> engagements::Engagements<'_> {
        engagements::Engagements { client: self }
    }

    pub fn owners(&self) -> owners::Owners<'_> {
        owners::Owners { client: self }
    }

    pub fn workflows(&self) -> workflows::Workflows<'_> {
        workflows::Workflows { client: self }
    }

    pub fn timelines(&self) -> timelines::Timelines<'_> {
        timelines::Timelines { client: self }
    }

    pub fn settings(&self) -> settings::Settings<'_> {
        settings::Settings { client: self }
    }

    pub fn marketing(&self) -> marketing::Marketing<'_> {
        marketing::Marketing { client: self }
    }

    pub fn integrations(&self) -> integrations::Integrations<'_> {
        integrations::Integrations { client: self }
    }

    pub fn oauth(&self) -> oauth::OAuth<'_> {
        oauth::OAuth { client: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PROFILE: Endpoint = Endpoint::get("contacts.getByEmail", "contacts/v1/contact/email/{email}/profile")
        .whitelist(&["property", "showListMemberships"]);

    fn params(value: Value) -> Params {
        to_params(value).unwrap()
    }

    #[test]
    fn test_render_path_encodes_values() {
        let path = PROFILE.render_path(&[("email", "jane+doe@example.com")]).unwrap();
        assert_eq!(path, "contacts/v1/contact/email/jane%2Bdoe%40example.com/profile");
    }

    #[test]
    fn test_render_path_missing_value() {
        assert!(PROFILE.render_path(&[]).is_err());
        assert!(PROFILE.render_path(&[("email", "")]).is_err());

        let broken = Endpoint::get("broken", "contacts/{vid");
        assert!(broken.render_path(&[("vid", "1")]).is_err());
    }

    #[test]
    fn test_render_path_multiple_variables() {
        let endpoint = Endpoint::put("companies.addContact", "companies/v2/companies/{company}/contacts/{vid}");
        let path = endpoint.render_path(&[("vid", "51"), ("company", "9")]).unwrap();
        assert_eq!(path, "companies/v2/companies/9/contacts/51");
    }

    #[test]
    fn test_whitelist_drops_unknown_params() {
        let request = PROFILE
            .request(
                &[("email", "a@b.c")],
                params(json!({"property": ["email"], "hapikey": "x", "junk": 1})),
            )
            .unwrap();

        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.params, params(json!({"property": ["email"]})));
    }

    #[test]
    fn test_no_whitelist_keeps_everything() {
        let endpoint = Endpoint::post("contacts.create", "contacts/v1/contact").json();
        let bag = params(json!({"properties": [{"property": "email", "value": "a@b.c"}]}));
        let request = endpoint.request(&[], bag.clone()).unwrap();

        assert_eq!(request.params, bag);
        assert_eq!(request.encoding, Some(Encoding::Json));
        assert!(!endpoint.refresh_on_unauthorized);
        assert!(endpoint.refresh_on_unauthorized().refresh_on_unauthorized);
    }

    #[test]
    fn test_merge_unique() {
        let mut bag = params(json!({"property": ["phone", "email", "phone", "website"]}));
        merge_unique(&mut bag, "property", &["email", "firstname"]);
        assert_eq!(bag["property"], json!(["email", "firstname", "phone", "website"]));

        let mut bag = params(json!({"property": "lastname"}));
        merge_unique(&mut bag, "property", &["email"]);
        assert_eq!(bag["property"], json!(["email", "lastname"]));

        let mut bag = Params::new();
        merge_unique(&mut bag, "property", &["email", "email"]);
        assert_eq!(bag["property"], json!(["email"]));
    }
}
