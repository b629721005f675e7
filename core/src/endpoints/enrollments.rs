//! Enrollments, listed per course, section or user.

use crate::endpoint::{Context, Endpoint};
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Enrollment;
use crate::validation::{ValidationError, Validator};

pub const ENROLLMENT_CONTEXTS: &[&str] = &["courses", "sections", "users"];

pub const ENROLLMENT_TYPES: &[&str] = &[
    "StudentEnrollment",
    "TeacherEnrollment",
    "TaEnrollment",
    "DesignerEnrollment",
    "ObserverEnrollment",
];

pub const ENROLLMENT_STATES: &[&str] = &[
    "active",
    "invited",
    "creation_pending",
    "deleted",
    "rejected",
    "completed",
    "inactive",
    "current_and_invited",
    "current_and_future",
    "current_and_concluded",
];

/// `GET {courses|sections|users}/{context_id}/enrollments`
#[derive(Debug, Clone)]
pub struct ListEnrollments {
    pub context: Context,
    pub query: ListEnrollmentsQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListEnrollmentsQuery {
    pub enrollment_type: Vec<String>,
    pub role: Vec<String>,
    pub state: Vec<String>,
    pub user_id: Option<String>,
    pub per_page: Option<u32>,
}

impl ListEnrollments {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            query: ListEnrollmentsQuery::default(),
        }
    }
}

impl Endpoint for ListEnrollments {
    type Output = Vec<Enrollment>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/enrollments"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        self.context.path_params()
    }

    fn query(&self) -> Params {
        let q = &self.query;
        let mut params = Params::new();
        params
            .push_all("type[]", &q.enrollment_type)
            .push_all("role[]", &q.role)
            .push_all("state[]", &q.state)
            .push_opt("user_id", q.user_id.as_ref())
            .push_opt("per_page", q.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let q = &self.query;
        Validator::new()
            .one_of("context", self.context.segment(), ENROLLMENT_CONTEXTS)
            .require("context_id", self.context.id())
            .each_one_of("type", &q.enrollment_type, ENROLLMENT_TYPES)
            .each_one_of("state", &q.state, ENROLLMENT_STATES)
            .finish()
    }
}
