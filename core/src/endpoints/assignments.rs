//! Assignments.

use serde::Serialize;

use crate::endpoint::{Body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Assignment;
use crate::validation::{ValidationError, Validator};

pub const ASSIGNMENT_BUCKETS: &[&str] = &[
    "past",
    "overdue",
    "undated",
    "ungraded",
    "unsubmitted",
    "upcoming",
    "future",
];

pub const ASSIGNMENT_ORDER_BY: &[&str] = &["position", "name", "due_at"];

pub const ASSIGNMENT_INCLUDES: &[&str] = &[
    "submission",
    "assignment_visibility",
    "all_dates",
    "overrides",
    "observed_users",
    "can_edit",
    "score_statistics",
];

pub const SUBMISSION_TYPES: &[&str] = &[
    "online_quiz",
    "none",
    "on_paper",
    "discussion_topic",
    "external_tool",
    "online_upload",
    "online_text_entry",
    "online_url",
    "media_recording",
    "student_annotation",
];

pub const GRADING_TYPES: &[&str] = &[
    "pass_fail",
    "percent",
    "letter_grade",
    "gpa_scale",
    "points",
    "not_graded",
];

/// `GET courses/{course_id}/assignments`
#[derive(Debug, Clone, Default)]
pub struct ListAssignments {
    pub course_id: String,
    pub query: ListAssignmentsQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListAssignmentsQuery {
    pub include: Vec<String>,
    pub search_term: Option<String>,
    pub bucket: Option<String>,
    pub order_by: Option<String>,
    pub assignment_ids: Vec<String>,
    pub per_page: Option<u32>,
}

impl ListAssignments {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListAssignments {
    type Output = Vec<Assignment>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/assignments"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("course_id", self.course_id.clone())]
    }

    fn query(&self) -> Params {
        let q = &self.query;
        let mut params = Params::new();
        params
            .push_all("include[]", &q.include)
            .push_opt("search_term", q.search_term.as_ref())
            .push_opt("bucket", q.bucket.as_ref())
            .push_opt("order_by", q.order_by.as_ref())
            .push_all("assignment_ids[]", &q.assignment_ids)
            .push_opt("per_page", q.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let q = &self.query;
        Validator::new()
            .require("course_id", &self.course_id)
            .each_one_of("include", &q.include, ASSIGNMENT_INCLUDES)
            .one_of_opt("bucket", q.bucket.as_deref(), ASSIGNMENT_BUCKETS)
            .one_of_opt("order_by", q.order_by.as_deref(), ASSIGNMENT_ORDER_BY)
            .finish()
    }
}

/// `GET courses/{course_id}/assignments/{id}`
#[derive(Debug, Clone, Default)]
pub struct GetAssignment {
    pub course_id: String,
    pub id: String,
    pub include: Vec<String>,
}

impl Endpoint for GetAssignment {
    type Output = Assignment;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/assignments/{id}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("course_id", self.course_id.clone()), ("id", self.id.clone())]
    }

    fn query(&self) -> Params {
        let mut params = Params::new();
        params.push_all("include[]", &self.include);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("course_id", &self.course_id)
            .require("id", &self.id)
            .each_one_of("include", &self.include, ASSIGNMENT_INCLUDES)
            .finish()
    }
}

/// `POST courses/{course_id}/assignments`, sent as a JSON body
/// `{"assignment": {...}}`.
#[derive(Debug, Clone, Default)]
pub struct CreateAssignment {
    pub course_id: String,
    pub assignment: AssignmentForm,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submission_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[derive(Serialize)]
struct AssignmentEnvelope<'a> {
    assignment: &'a AssignmentForm,
}

impl Endpoint for CreateAssignment {
    type Output = Assignment;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/assignments"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("course_id", self.course_id.clone())]
    }

    fn body(&self) -> Result<Body, ApiError> {
        Body::json(&AssignmentEnvelope {
            assignment: &self.assignment,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let a = &self.assignment;
        Validator::new()
            .require("course_id", &self.course_id)
            .require("assignment[name]", &a.name)
            .each_one_of("assignment[submission_types]", &a.submission_types, SUBMISSION_TYPES)
            .one_of_opt("assignment[grading_type]", a.grading_type.as_deref(), GRADING_TYPES)
            .finish()
    }
}
