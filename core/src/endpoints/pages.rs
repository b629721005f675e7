//! Wiki pages of courses and groups.

use crate::endpoint::{Body, Context, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::types::WikiPage;
use crate::validation::{ValidationError, Validator};

pub const PAGE_CONTEXTS: &[&str] = &["courses", "groups"];

pub const PAGE_SORTS: &[&str] = &["title", "created_at", "updated_at"];

pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// Roles allowed to edit a page; Canvas accepts a comma-separated mix.
pub const EDITING_ROLES: &[&str] = &["teachers", "students", "members", "public"];

/// `GET {courses|groups}/{context_id}/pages`
#[derive(Debug, Clone)]
pub struct ListPages {
    pub context: Context,
    pub query: ListPagesQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListPagesQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub search_term: Option<String>,
    pub published: Option<bool>,
    pub per_page: Option<u32>,
}

impl ListPages {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            query: ListPagesQuery::default(),
        }
    }
}

impl Endpoint for ListPages {
    type Output = Vec<WikiPage>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/pages"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        self.context.path_params()
    }

    fn query(&self) -> Params {
        let q = &self.query;
        let mut params = Params::new();
        params
            .push_opt("sort", q.sort.as_ref())
            .push_opt("order", q.order.as_ref())
            .push_opt("search_term", q.search_term.as_ref())
            .push_opt("published", q.published)
            .push_opt("per_page", q.per_page);
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .one_of("context", self.context.segment(), PAGE_CONTEXTS)
            .require("context_id", self.context.id())
            .one_of_opt("sort", self.query.sort.as_deref(), PAGE_SORTS)
            .one_of_opt("order", self.query.order.as_deref(), SORT_ORDERS)
            .finish()
    }
}

/// `GET {courses|groups}/{context_id}/pages/{url}`; `url` is the page slug
/// or `page_id:<id>`.
#[derive(Debug, Clone)]
pub struct ShowPage {
    pub context: Context,
    pub url: String,
}

impl Endpoint for ShowPage {
    type Output = WikiPage;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/pages/{url}"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.context.path_params();
        params.push(("url", self.url.clone()));
        params
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .one_of("context", self.context.segment(), PAGE_CONTEXTS)
            .require("context_id", self.context.id())
            .require("url", &self.url)
            .finish()
    }
}

/// `POST {courses|groups}/{context_id}/pages`
#[derive(Debug, Clone)]
pub struct CreatePage {
    pub context: Context,
    pub form: PageForm,
}

/// Writable page attributes, sent as `wiki_page[...]`.
#[derive(Debug, Clone, Default)]
pub struct PageForm {
    pub title: String,
    pub body: Option<String>,
    pub editing_roles: Option<String>,
    pub notify_of_update: Option<bool>,
    pub published: Option<bool>,
    pub front_page: Option<bool>,
    pub publish_at: Option<String>,
}

impl CreatePage {
    pub fn new(context: Context, title: impl Into<String>) -> Self {
        Self {
            context,
            form: PageForm {
                title: title.into(),
                ..PageForm::default()
            },
        }
    }
}

impl Endpoint for CreatePage {
    type Output = WikiPage;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path_template(&self) -> &'static str {
        "{context}/{context_id}/pages"
    }

    fn path_params(&self) -> Vec<(&'static str, String)> {
        self.context.path_params()
    }

    fn body(&self) -> Result<Body, ApiError> {
        let f = &self.form;
        let mut params = Params::new();
        params
            .push("wiki_page[title]", &f.title)
            .push_opt("wiki_page[body]", f.body.as_ref())
            .push_opt("wiki_page[editing_roles]", f.editing_roles.as_ref())
            .push_opt("wiki_page[notify_of_update]", f.notify_of_update)
            .push_opt("wiki_page[published]", f.published)
            .push_opt("wiki_page[front_page]", f.front_page)
            .push_opt("wiki_page[publish_at]", f.publish_at.as_ref());
        Ok(Body::Form(params))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let roles: Vec<&str> = self
            .form
            .editing_roles
            .as_deref()
            .map(|roles| roles.split(',').map(str::trim).collect())
            .unwrap_or_default();
        Validator::new()
            .one_of("context", self.context.segment(), PAGE_CONTEXTS)
            .require("context_id", self.context.id())
            .require("wiki_page[title]", &self.form.title)
            .each_one_of("wiki_page[editing_roles]", &roles, EDITING_ROLES)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_collapse_course_and_group_contexts() {
        let course = ListPages::new(Context::Course("5".into()));
        let group = ListPages::new(Context::Group("9".into()));
        assert_eq!(course.path(), "courses/5/pages");
        assert_eq!(group.path(), "groups/9/pages");
        assert!(ListPages::new(Context::User("1".into())).validate().is_err());
    }

    #[test]
    fn show_page_uses_slug() {
        let show = ShowPage {
            context: Context::Course("5".into()),
            url: "syllabus-notes".into(),
        };
        assert_eq!(show.path(), "courses/5/pages/syllabus-notes");
    }

    #[test]
    fn create_page_checks_title_and_each_role() {
        let mut create = CreatePage::new(Context::Group("9".into()), "");
        create.form.editing_roles = Some("students, robots".into());
        let err = create.validate().unwrap_err();
        assert!(err.names_field("wiki_page[title]"));
        assert!(err.to_string().contains("got \"robots\""));

        create.form.title = "Group charter".into();
        create.form.editing_roles = Some("teachers,students".into());
        assert!(create.validate().is_ok());
        let Body::Form(params) = create.body().unwrap() else {
            panic!("expected form body");
        };
        assert_eq!(params.get("wiki_page[title]"), Some("Group charter"));
        assert_eq!(params.get("wiki_page[editing_roles]"), Some("teachers,students"));
    }

    #[test]
    fn list_pages_sort_is_constrained() {
        let mut list = ListPages::new(Context::Course("5".into()));
        list.query.sort = Some("title".into());
        list.query.order = Some("sideways".into());
        let err = list.validate().unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.names_field("order"));
    }
}
