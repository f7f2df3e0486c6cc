use super::Endpoint;
use crate::error::Result;
use crate::response::Response;
use crate::rest::HubSpot;
use serde::Serialize;

pub const GET_ALL: Endpoint = Endpoint::get("workflows.getAll", "automation/v3/workflows");
pub const GET: Endpoint = Endpoint::get("workflows.get", "automation/v3/workflows/{workflow}");
pub const CREATE: Endpoint = Endpoint::post("workflows.create", "automation/v3/workflows").json();
pub const DELETE: Endpoint = Endpoint::delete("workflows.delete", "automation/v3/workflows/{workflow}");
pub const ENROLL: Endpoint = Endpoint::post(
    "workflows.enroll",
    "automation/v2/workflows/{workflow}/enrollments/contacts/{email}",
);
pub const UNENROLL: Endpoint = Endpoint::delete(
    "workflows.unenroll",
    "automation/v2/workflows/{workflow}/enrollments/contacts/{email}",
);
pub const CURRENT: Endpoint =
    Endpoint::get("workflows.current", "automation/v2/workflows/enrollments/contacts/{vid}");

/// Workflow operations
pub struct Workflows<'a> {
    pub(crate) client: &'a HubSpot,
}

impl Workflows<'_> {
    pub fn get_all(&self) -> Result<Response> {
        self.client.invoke(&GET_ALL, &[], ())
    }

    pub fn get(&self, workflow: u64) -> Result<Response> {
        self.client.invoke(&GET, &[("workflow", &workflow.to_string())], ())
    }

    pub fn create<P: Serialize>(&self, data: P) -> Result<Response> {
        self.client.invoke(&CREATE, &[], data)
    }

    pub fn delete(&self, workflow: u64) -> Result<Response> {
        self.client
            .invoke(&DELETE, &[("workflow", &workflow.to_string())], ())
    }

    pub fn enroll(&self, workflow: u64, email: &str) -> Result<Response> {
        self.client.invoke(
            &ENROLL,
            &[("workflow", &workflow.to_string()), ("email", email)],
            (),
        )
    }

    pub fn unenroll(&self, workflow: u64, email: &str) -> Result<Response> {
        self.client.invoke(
            &UNENROLL,
            &[("workflow", &workflow.to_string()), ("email", email)],
            (),
        )
    }

    /// Workflows a contact is currently enrolled in
    pub fn current(&self, vid: u64) -> Result<Response> {
        self.client.invoke(&CURRENT, &[("vid", &vid.to_string())], ())
    }
}
