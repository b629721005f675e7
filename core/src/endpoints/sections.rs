//! Course sections.

use crate::endpoint::{Body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Section;
use crate::validation::{ValidationError, Validator};

pub const SECTION_INCLUDES: &[&str] = &[
    "students",
    "avatar_url",
    "enrollments",
    "total_students",
    "passback_status",
    "permissions",
];

/// `GET courses/{course_id}/sections`
#[derive(Debug, Clone, Default)]
pub struct ListCourseSections {
    pub course_id: String,
    pub query: ListCourseSectionsQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListCourseSectionsQuery {
    pub include: Vec<String>,
    pub search_term: Option<String>,
    pub per_page: Option<u32>,
}

impl ListCourseSections {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListCourseSections {
    type Output = Vec<Section>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/sections"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("course_id", self.course_id.clone())]
    }

    fn query(&self) -> Params {
        let mut params = Params::new();
        params
            .push_all("include[]", &self.query.include)
            .push_opt("search_term", self.query.search_term.as_ref())
            .push_opt("per_page", self.query.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("course_id", &self.course_id)
            .each_one_of("include", &self.query.include, SECTION_INCLUDES)
            .finish()
    }
}

/// `POST courses/{course_id}/sections`
#[derive(Debug, Clone, Default)]
pub struct CreateCourseSection {
    pub course_id: String,
    pub form: SectionForm,
    pub enable_sis_reactivation: Option<bool>,
}

/// Writable section attributes, sent as `course_section[...]`.
#[derive(Debug, Clone, Default)]
pub struct SectionForm {
    pub name: Option<String>,
    pub sis_section_id: Option<String>,
    pub integration_id: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub restrict_enrollments_to_section_dates: Option<bool>,
}

impl SectionForm {
    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push_opt("course_section[name]", self.name.as_ref())
            .push_opt("course_section[sis_section_id]", self.sis_section_id.as_ref())
            .push_opt("course_section[integration_id]", self.integration_id.as_ref())
            .push_opt("course_section[start_at]", self.start_at.as_ref())
            .push_opt("course_section[end_at]", self.end_at.as_ref())
            .push_opt(
                "course_section[restrict_enrollments_to_section_dates]",
                self.restrict_enrollments_to_section_dates,
            );
        params
    }
}

impl CreateCourseSection {
    pub fn new(course_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            form: SectionForm {
                name: Some(name.into()),
                ..SectionForm::default()
            },
            enable_sis_reactivation: None,
        }
    }
}

impl Endpoint for CreateCourseSection {
    type Output = Section;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/sections"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("course_id", self.course_id.clone())]
    }

    fn body(&self) -> Result<Body, ApiError> {
        let mut params = self.form.params();
        params.push_opt("enable_sis_reactivation", self.enable_sis_reactivation);
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("course_id", &self.course_id)
            .require("course_section[name]", self.form.name.as_deref().unwrap_or(""))
            .finish()
    }
}

/// `GET sections/{id}`
#[derive(Debug, Clone, Default)]
pub struct GetSection {
    pub id: String,
    pub include: Vec<String>,
}

impl GetSection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            include: Vec::new(),
        }
    }
}

impl Endpoint for GetSection {
    type Output = Section;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "sections/{id}"
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
            .each_one_of("include", &self.include, SECTION_INCLUDES)
            .finish()
    }
}

/// `PUT sections/{id}`
#[derive(Debug, Clone, Default)]
pub struct EditSection {
    pub id: String,
    pub form: SectionForm,
    pub override_sis_stickiness: Option<bool>,
}

impl Endpoint for EditSection {
    type Output = Section;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path_template(&self) -> &'static str {
        "sections/{id}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn body(&self) -> Result<Body, ApiError> {
        let mut params = self.form.params();
        params.push_opt("override_sis_stickiness", self.override_sis_stickiness);
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().require("id", &self.id).finish()
    }
}

/// `DELETE sections/{id}`; Canvas answers with the deleted section.
#[derive(Debug, Clone, Default)]
pub struct DeleteSection {
    pub id: String,
}

impl Endpoint for DeleteSection {
    type Output = Section;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path_template(&self) -> &'static str {
        "sections/{id}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().require("id", &self.id).finish()
    }
}
