//! File folders of courses, groups and users.

use crate::endpoint::{Body, Context, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::Folder;
use crate::validation::{ValidationError, Validator};

pub const FOLDER_CONTEXTS: &[&str] = &["courses", "groups", "users"];

/// `GET {courses|groups|users}/{context_id}/folders` — every folder in the
/// context, flattened.
#[derive(Debug, Clone)]
pub struct ListFolders {
    pub context: Context,
    pub per_page: Option<u32>,
}

impl ListFolders {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            per_page: None,
        }
    }
}

impl Endpoint for ListFolders {
    type Output = Vec<Folder>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/folders"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        self.context.path_params()
    }

    fn query(&self) -> Params {
        let mut params = Params::new();
        params.push_opt("per_page", self.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .one_of("context", self.context.segment(), FOLDER_CONTEXTS)
            .require("context_id", self.context.id())
            .finish()
    }
}

/// `POST {courses|groups|users}/{context_id}/folders`
#[derive(Debug, Clone)]
pub struct CreateFolder {
    pub context: Context,
    pub form: FolderForm,
}

#[derive(Debug, Clone, Default)]
pub struct FolderForm {
    pub name: String,
    /// Either this or `parent_folder_path` places the folder; neither means
    /// the context's root folder.
    pub parent_folder_id: Option<String>,
    pub parent_folder_path: Option<String>,
    pub lock_at: Option<String>,
    pub unlock_at: Option<String>,
    pub locked: Option<bool>,
    pub hidden: Option<bool>,
    pub position: Option<u32>,
}

impl CreateFolder {
    pub fn new(context: Context, name: impl Into<String>) -> Self {
        Self {
            context,
            form: FolderForm {
                name: name.into(),
                ..FolderForm::default()
            },
        }
    }
}

impl Endpoint for CreateFolder {
    type Output = Folder;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/folders"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        self.context.path_params()
    }

    fn body(&self) -> Result<Body, ApiError> {
        let f = &self.form;
        let mut params = Params::new();
        params
            .push("name", &f.name)
            .push_opt("parent_folder_id", f.parent_folder_id.as_ref())
            .push_opt("parent_folder_path", f.parent_folder_path.as_ref())
            .push_opt("lock_at", f.lock_at.as_ref())
            .push_opt("unlock_at", f.unlock_at.as_ref())
            .push_opt("locked", f.locked)
            .push_opt("hidden", f.hidden)
            .push_opt("position", f.position);
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .one_of("context", self.context.segment(), FOLDER_CONTEXTS)
            .require("context_id", self.context.id())
            .require("name", &self.form.name)
            .finish()
    }
}
