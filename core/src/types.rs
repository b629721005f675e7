//! Canvas resource models.
//!
//! # Design
//! Each struct mirrors one JSON object returned by the Canvas REST API. Only
//! `id` is guaranteed; Canvas omits or nulls most other attributes depending
//! on permissions and `include[]` options, so they are `Option`. Unknown
//! attributes are ignored, which keeps decoding stable as Canvas adds fields.

use serde::{Deserialize, Deserializer, Serialize};

/// Canvas sends `null` for some lists it would otherwise omit.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A course. `term`, `teachers` and similar extras are only present when
/// requested via `include[]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    pub name: Option<String>,
    pub course_code: Option<String>,
    pub workflow_state: Option<String>,
    pub account_id: Option<u64>,
    pub enrollment_term_id: Option<u64>,
    pub sis_course_id: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub default_view: Option<String>,
    pub is_public: Option<bool>,
    pub time_zone: Option<String>,
    pub syllabus_body: Option<String>,
    pub total_students: Option<u64>,
    pub term: Option<Term>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enrollments: Vec<CourseEnrollment>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teachers: Vec<UserDisplay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: u64,
    pub name: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

/// Abbreviated enrollment embedded in a course listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseEnrollment {
    #[serde(rename = "type")]
    pub enrollment_type: String,
    pub role: Option<String>,
    pub role_id: Option<u64>,
    pub user_id: Option<u64>,
    pub enrollment_state: Option<String>,
}

/// Minimal user representation used wherever Canvas embeds a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDisplay {
    pub id: u64,
    pub display_name: Option<String>,
    pub avatar_image_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: Option<String>,
    pub sortable_name: Option<String>,
    pub short_name: Option<String>,
    pub sis_user_id: Option<String>,
    pub login_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub id: u64,
    pub name: Option<String>,
    pub sis_section_id: Option<String>,
    pub integration_id: Option<String>,
    pub course_id: Option<u64>,
    pub nonxlist_course_id: Option<u64>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub restrict_enrollments_to_section_dates: Option<bool>,
    pub total_students: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<u64>,
    pub assignment_group_id: Option<u64>,
    pub due_at: Option<String>,
    pub lock_at: Option<String>,
    pub unlock_at: Option<String>,
    pub points_possible: Option<f64>,
    pub grading_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submission_types: Vec<String>,
    pub position: Option<u64>,
    pub published: Option<bool>,
    pub muted: Option<bool>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: u64,
    pub assignment_id: Option<u64>,
    pub user_id: Option<u64>,
    pub attempt: Option<u64>,
    pub body: Option<String>,
    pub grade: Option<String>,
    pub score: Option<f64>,
    pub submitted_at: Option<String>,
    pub graded_at: Option<String>,
    pub submission_type: Option<String>,
    pub workflow_state: Option<String>,
    pub late: Option<bool>,
    pub missing: Option<bool>,
    pub excused: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submission_comments: Vec<SubmissionComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionComment {
    pub id: u64,
    pub author_id: Option<u64>,
    pub author_name: Option<String>,
    pub comment: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: u64,
    pub course_id: Option<u64>,
    pub course_section_id: Option<u64>,
    pub user_id: Option<u64>,
    #[serde(rename = "type")]
    pub enrollment_type: Option<String>,
    pub role: Option<String>,
    pub enrollment_state: Option<String>,
    pub user: Option<User>,
    pub grades: Option<Grades>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grades {
    pub html_url: Option<String>,
    pub current_score: Option<f64>,
    pub final_score: Option<f64>,
    pub current_grade: Option<String>,
    pub final_grade: Option<String>,
}

/// A wiki page. Pages are addressed by `url` (their slug), not by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WikiPage {
    pub page_id: Option<u64>,
    pub url: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub editing_roles: Option<String>,
    pub published: Option<bool>,
    pub front_page: Option<bool>,
    pub last_edited_by: Option<UserDisplay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    pub id: u64,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub context_type: Option<String>,
    pub context_id: Option<u64>,
    pub parent_folder_id: Option<u64>,
    pub files_count: Option<u64>,
    pub folders_count: Option<u64>,
    pub position: Option<u64>,
    pub locked: Option<bool>,
    pub hidden: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
