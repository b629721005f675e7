//! Assignment submissions.

use crate::endpoint::{Body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Submission;
use crate::validation::{ValidationError, Validator};

pub const SUBMISSION_INCLUDES: &[&str] = &[
    "submission_history",
    "submission_comments",
    "rubric_assessment",
    "assignment",
    "visibility",
    "course",
    "user",
    "group",
    "read_status",
];

/// `GET courses/{course_id}/assignments/{assignment_id}/submissions`
#[derive(Debug, Clone, Default)]
pub struct ListAssignmentSubmissions {
    pub course_id: String,
    pub assignment_id: String,
    pub include: Vec<String>,
    pub grouped: Option<bool>,
    pub per_page: Option<u32>,
}

impl Endpoint for ListAssignmentSubmissions {
    type Output = Vec<Submission>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/assignments/{assignment_id}/submissions"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("course_id", self.course_id.clone()),
            ("assignment_id", self.assignment_id.clone()),
        ]
    }

    fn query(&self) -> Params {
        let mut params = Params::new();
        params
            .push_all("include[]", &self.include)
            .push_opt("grouped", self.grouped)
            .push_opt("per_page", self.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("course_id", &self.course_id)
            .require("assignment_id", &self.assignment_id)
            .each_one_of("include", &self.include, SUBMISSION_INCLUDES)
            .finish()
    }
}

/// `PUT courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}`
///
/// Grades a submission and/or attaches a comment to it.
#[derive(Debug, Clone, Default)]
pub struct GradeSubmission {
    pub course_id: String,
    pub assignment_id: String,
    pub user_id: String,
    pub form: GradeForm,
}

#[derive(Debug, Clone, Default)]
pub struct GradeForm {
    /// Points, a percentage (`"85%"`), a letter grade, or `pass`/`fail`.
    pub posted_grade: Option<String>,
    pub excuse: Option<bool>,
    pub late_policy_status: Option<String>,
    pub comment: Option<String>,
    pub group_comment: Option<bool>,
}

pub const LATE_POLICY_STATUSES: &[&str] = &["late", "missing", "extended", "none"];

impl Endpoint for GradeSubmission {
    type Output = Submission;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path_template(&self) -> &'static str {
        "courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("course_id", self.course_id.clone()),
            ("assignment_id", self.assignment_id.clone()),
            ("user_id", self.user_id.clone()),
        ]
    }

    fn body(&self) -> Result<Body, ApiError> {
        let f = &self.form;
        let mut params = Params::new();
        params
            .push_opt("submission[posted_grade]", f.posted_grade.as_ref())
            .push_opt("submission[excuse]", f.excuse)
            .push_opt("submission[late_policy_status]", f.late_policy_status.as_ref())
            .push_opt("comment[text_comment]", f.comment.as_ref())
            .push_opt("comment[group_comment]", f.group_comment);
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("course_id", &self.course_id)
            .require("assignment_id", &self.assignment_id)
            .require("user_id", &self.user_id)
            .one_of_opt(
                "submission[late_policy_status]",
                self.form.late_policy_status.as_deref(),
                LATE_POLICY_STATUSES,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_submission_path_and_form() {
        let grade = GradeSubmission {
            course_id: "1".to_string(),
            assignment_id: "2".to_string(),
            user_id: "self".to_string(),
            form: GradeForm {
                posted_grade: Some("85%".to_string()),
                comment: Some("Nice work".to_string()),
                ..GradeForm::default()
            },
        };
        assert!(grade.validate().is_ok());
        assert_eq!(grade.path(), "courses/1/assignments/2/submissions/self");
        let Body::Form(params) = grade.body().unwrap() else {
            panic!("expected form body");
        };
        assert_eq!(
            params.encode(),
            "submission%5Bposted_grade%5D=85%25&comment%5Btext_comment%5D=Nice+work"
        );
    }

    #[test]
    fn grade_submission_names_missing_path_params() {
        let err = GradeSubmission::default().validate().unwrap_err();
        assert!(err.names_field("course_id"));
        assert!(err.names_field("assignment_id"));
        assert!(err.names_field("user_id"));
    }

    #[test]
    fn late_policy_status_is_constrained() {
        let mut grade = GradeSubmission {
            course_id: "1".to_string(),
            assignment_id: "2".to_string(),
            user_id: "3".to_string(),
            form: GradeForm {
                late_policy_status: Some("tardy".to_string()),
                ..GradeForm::default()
            },
        };
        let err = grade.validate().unwrap_err();
        assert!(err.to_string().contains("[late, missing, extended, none]"));
        grade.form.late_policy_status = Some("missing".to_string());
        assert!(grade.validate().is_ok());
    }

    #[test]
    fn list_submissions_query() {
        let list = ListAssignmentSubmissions {
            course_id: "1".to_string(),
            assignment_id: "2".to_string(),
            include: vec!["user".to_string()],
            grouped: Some(true),
            per_page: None,
        };
        assert!(list.validate().is_ok());
        assert_eq!(list.query().encode(), "include%5B%5D=user&grouped=true");
    }
}
