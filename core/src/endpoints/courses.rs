//! Courses.

use crate::endpoint::{Body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Course;
use crate::validation::{ValidationError, Validator};

pub const ENROLLMENT_TYPES: &[&str] = &["teacher", "student", "ta", "observer", "designer"];

pub const ENROLLMENT_STATES: &[&str] = &["active", "invited_or_pending", "completed"];

pub const COURSE_STATES: &[&str] = &["unpublished", "available", "completed", "deleted"];

pub const COURSE_INCLUDES: &[&str] = &[
    "needs_grading_count",
    "syllabus_body",
    "public_description",
    "total_scores",
    "current_grading_period_scores",
    "grading_periods",
    "term",
    "account",
    "course_progress",
    "sections",
    "storage_quota_used_mb",
    "total_students",
    "passback_status",
    "favorites",
    "teachers",
    "observed_users",
    "course_image",
    "banner_image",
    "concluded",
    "post_manually",
];

pub const DEFAULT_VIEWS: &[&str] = &["feed", "wiki", "modules", "syllabus", "assignments"];

/// `GET courses` — courses the current user is enrolled in.
#[derive(Debug, Clone, Default)]
pub struct ListYourCourses {
    pub query: ListYourCoursesQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListYourCoursesQuery {
    pub enrollment_type: Option<String>,
    pub enrollment_role_id: Option<u64>,
    pub enrollment_state: Option<String>,
    pub exclude_blueprint_courses: Option<bool>,
    pub include: Vec<String>,
    pub state: Vec<String>,
    pub per_page: Option<u32>,
}

impl Endpoint for ListYourCourses {
    type Output = Vec<Course>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses"
    }

    fn query(&self) -> Params {
        let q = &self.query;
        let mut params = Params::new();
        params
            .push_opt("enrollment_type", q.enrollment_type.as_ref())
            .push_opt("enrollment_role_id", q.enrollment_role_id)
            .push_opt("enrollment_state", q.enrollment_state.as_ref())
            .push_opt("exclude_blueprint_courses", q.exclude_blueprint_courses)
            .push_all("include[]", &q.include)
            .push_all("state[]", &q.state)
            .push_opt("per_page", q.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let q = &self.query;
        Validator::new()
            .one_of_opt("enrollment_type", q.enrollment_type.as_deref(), ENROLLMENT_TYPES)
            .one_of_opt("enrollment_state", q.enrollment_state.as_deref(), ENROLLMENT_STATES)
            .each_one_of("include", &q.include, COURSE_INCLUDES)
            .each_one_of("state", &q.state, COURSE_STATES)
            .finish()
    }
}

/// `GET courses/{id}`
#[derive(Debug, Clone, Default)]
pub struct GetCourse {
    pub id: String,
    pub include: Vec<String>,
}

impl GetCourse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            include: Vec::new(),
        }
    }
}

impl Endpoint for GetCourse {
    type Output = Course;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses/{id}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn query(&self) -> Params {
        let mut params = Params::new();
        params.push_all("include[]", &self.include);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("id", &self.id)
            .each_one_of("include", &self.include, COURSE_INCLUDES)
            .finish()
    }
}

/// `POST accounts/{account_id}/courses`
#[derive(Debug, Clone, Default)]
pub struct CreateCourse {
    pub account_id: String,
    pub form: CourseForm,
    pub offer: Option<bool>,
    pub enroll_me: Option<bool>,
}

/// Writable course attributes, sent as `course[...]`.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub name: Option<String>,
    pub course_code: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub license: Option<String>,
    pub is_public: Option<bool>,
    pub public_description: Option<String>,
    pub syllabus_body: Option<String>,
    pub default_view: Option<String>,
    pub term_id: Option<String>,
    pub sis_course_id: Option<String>,
    pub time_zone: Option<String>,
}

impl Endpoint for CreateCourse {
    type Output = Course;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path_template(&self) -> &'static str {
        "accounts/{account_id}/courses"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("account_id", self.account_id.clone())]
    }

    fn body(&self) -> Result<Body, ApiError> {
        let f = &self.form;
        let mut params = Params::new();
        params
            .push_opt("course[name]", f.name.as_ref())
            .push_opt("course[course_code]", f.course_code.as_ref())
            .push_opt("course[start_at]", f.start_at.as_ref())
            .push_opt("course[end_at]", f.end_at.as_ref())
            .push_opt("course[license]", f.license.as_ref())
            .push_opt("course[is_public]", f.is_public)
            .push_opt("course[public_description]", f.public_description.as_ref())
            .push_opt("course[syllabus_body]", f.syllabus_body.as_ref())
            .push_opt("course[default_view]", f.default_view.as_ref())
            .push_opt("course[term_id]", f.term_id.as_ref())
            .push_opt("course[sis_course_id]", f.sis_course_id.as_ref())
            .push_opt("course[time_zone]", f.time_zone.as_ref())
            .push_opt("offer", self.offer)
            .push_opt("enroll_me", self.enroll_me);
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("account_id", &self.account_id)
            .one_of_opt(
                "course[default_view]",
                self.form.default_view.as_deref(),
                DEFAULT_VIEWS,
            )
            .finish()
    }
}
