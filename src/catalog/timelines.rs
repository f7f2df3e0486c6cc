use super::Endpoint;
use crate::error::Result;
use crate::request::to_params;
use crate::response::Response;
use crate::rest::HubSpot;
use crate::time::Time;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const CREATE_EVENT_TYPE: Endpoint = Endpoint::post(
    "timelines.createEventType",
    "integrations/v1/{app}/timeline/event-types?userId={user}",
)
.json();
pub const UPDATE_EVENT_TYPE: Endpoint = Endpoint::put(
    "timelines.updateEventType",
    "integrations/v1/{app}/timeline/event-types/{event_type}",
);
pub const CREATE_EVENT_TYPE_PROPERTY: Endpoint = Endpoint::post(
    "timelines.createEventTypeProperty",
    "integrations/v1/{app}/timeline/event-types/{event_type}/properties?userId={user}",
)
.json();
pub const UPDATE_EVENT_TYPE_PROPERTY: Endpoint = Endpoint::put(
    "timelines.updateEventTypeProperty",
    "integrations/v1/{app}/timeline/event-types/{event_type}/properties",
);
pub const CREATE_EVENT: Endpoint =
    Endpoint::put("timelines.createTimelineEvent", "integrations/v1/{app}/timeline/event")
        .refresh_on_unauthorized();

/// Timeline operations, scoped to the configured `application_id`
pub struct Timelines<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Timelines<'_> {
    pub fn create_event_type<P: Serialize>(&self, user: u64, data: P) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client.invoke(
            &CREATE_EVENT_TYPE,
            &[("app", app), ("user", &user.to_string())],
            data,
        )
    }

    pub fn update_event_type<P: Serialize>(&self, event_type: u64, data: P) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client.invoke(
            &UPDATE_EVENT_TYPE,
            &[("app", app), ("event_type", &event_type.to_string())],
            data,
        )
    }

    pub fn create_event_type_property<P: Serialize>(
        &self,
        event_type: u64,
        user: u64,
        data: P,
    ) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client.invoke(
            &CREATE_EVENT_TYPE_PROPERTY,
            &[
                ("app", app),
                ("event_type", &event_type.to_string()),
                ("user", &user.to_string()),
            ],
            data,
        )
    }

    pub fn update_event_type_property<P: Serialize>(&self, event_type: u64, data: P) -> Result<Response> {
        let app = self.client.require_application_id()?;
        self.client.invoke(
            &UPDATE_EVENT_TYPE_PROPERTY,
            &[("app", app), ("event_type", &event_type.to_string())],
            data,
        )
    }

    /// Create or update a timeline event.
    ///
    /// `data` identifies the object (`objectId`, `email` or `utk`) and may
    /// carry `extraData`; `id` defaults to a fresh UUID and `timestamp` to
    /// now. An expired access token is refreshed once and the call retried.
    pub fn create_event<P: Serialize>(&self, event_type: u64, data: P) -> Result<Response> {
        let app = self.client.require_application_id()?;

        let mut params = to_params(data)?;
        params.insert("eventTypeId".to_string(), Value::from(event_type));
        params
            .entry("id")
            .or_insert_with(|| Value::from(Uuid::new_v4().to_string()));
        params
            .entry("timestamp")
            .or_insert_with(|| Value::from(Time::now().unix_milli()));

        self.client
            .invoke_params(&CREATE_EVENT, &[("app", app)], params)
    }
}
