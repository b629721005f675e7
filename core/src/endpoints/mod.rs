//! Endpoint descriptors, grouped by Canvas resource.
//!
//! Every descriptor has the same shape: path parameters as plain fields,
//! then an optional `query` group and an optional `form` (or JSON) group.
//! Endpoints that only differ by owning context take a [`Context`] instead
//! of existing once per context type.
//!
//! [`Context`]: crate::endpoint::Context

pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod folders;
pub mod pages;
pub mod sections;
pub mod submissions;

pub use assignments::{AssignmentForm, CreateAssignment, GetAssignment, ListAssignments};
pub use courses::{CourseForm, CreateCourse, GetCourse, ListYourCourses};
pub use enrollments::ListEnrollments;
pub use folders::{CreateFolder, FolderForm, ListFolders};
pub use pages::{CreatePage, ListPages, PageForm, ShowPage};
pub use sections::{
    CreateCourseSection, DeleteSection, EditSection, GetSection, ListCourseSections, SectionForm,
};
pub use submissions::{GradeForm, GradeSubmission, ListAssignmentSubmissions};
