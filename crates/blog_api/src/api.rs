use blog_core::validation::{
    validate_article_input, validate_comment_input, validate_search_query,
};
use blog_core::{
    ArticleDraft, ArticleRepository, ArticleService, ArticleServiceError, CommentDraft,
};
use log::{error, warn};
use serde::Serialize;
use serde_json::{json, Value};

pub const WELCOME_MESSAGE: &str = "Welcome to the Blog-Clean-Code Application";

const CREATE_FAILED: &str = "Failed to create article";
const COMMENT_FAILED: &str = "Failed to add comment";
const LIKE_FAILED: &str = "Failed to like article";
const LIST_FAILED: &str = "Failed to fetch articles";
const SEARCH_FAILED: &str = "Failed to search articles";
const NOT_FOUND: &str = "Article not found";
const INVALID_BODY: &str = "Request body must be a valid JSON object";

/// Status class of a boundary response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalError,
}

impl ApiStatus {
    /// HTTP status code for this class.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created)
    }
}

/// Response envelope: status class plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: ApiStatus,
    pub body: Value,
}

impl ApiResponse {
    fn rejected(message: &str) -> Self {
        Self {
            status: ApiStatus::BadRequest,
            body: json!({ "error": message }),
        }
    }

    fn failure(status: ApiStatus, message: &str, details: String) -> Self {
        Self {
            status,
            body: json!({ "error": message, "details": details }),
        }
    }

    fn payload(status: ApiStatus, value: &impl Serialize, failure_message: &str) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!(
                    "event=api_response module=api status=error error_code=encode_failed error={err}"
                );
                Self::failure(ApiStatus::InternalError, failure_message, err.to_string())
            }
        }
    }
}

/// Boundary facade over the article access service.
pub struct BlogApi<R: ArticleRepository> {
    service: ArticleService<R>,
}

impl<R: ArticleRepository> BlogApi<R> {
    pub fn new(service: ArticleService<R>) -> Self {
        Self { service }
    }

    /// Root greeting.
    pub fn welcome(&self) -> ApiResponse {
        ApiResponse {
            status: ApiStatus::Ok,
            body: Value::String(WELCOME_MESSAGE.to_string()),
        }
    }

    /// Creates an article. `201` with the stored article on success.
    pub fn create_article(&self, draft: &ArticleDraft) -> ApiResponse {
        if let Some(message) = validate_article_input(draft) {
            return reject("article_create", message);
        }

        let result = self.service.create_article(
            draft.title.as_deref().unwrap_or_default(),
            draft.content.as_deref().unwrap_or_default(),
            draft.author.as_deref().unwrap_or_default(),
        );
        match result {
            Ok(article) => ApiResponse::payload(ApiStatus::Created, &article, CREATE_FAILED),
            Err(err) => map_service_error("article_create", CREATE_FAILED, err),
        }
    }

    /// Parses a raw JSON body and creates an article from it.
    pub fn create_article_json(&self, body: &str) -> ApiResponse {
        match serde_json::from_str::<ArticleDraft>(body) {
            Ok(draft) => self.create_article(&draft),
            Err(_) => reject("article_create", INVALID_BODY),
        }
    }

    /// Appends a comment. `201` with the updated article on success.
    pub fn add_comment(&self, article_id: &str, draft: &CommentDraft) -> ApiResponse {
        if let Some(message) = validate_comment_input(draft) {
            return reject("article_comment", message);
        }

        let result = self.service.add_comment(
            article_id,
            draft.author.as_deref().unwrap_or_default(),
            draft.content.as_deref().unwrap_or_default(),
        );
        match result {
            Ok(article) => ApiResponse::payload(ApiStatus::Created, &article, COMMENT_FAILED),
            Err(err) => map_service_error("article_comment", COMMENT_FAILED, err),
        }
    }

    /// Parses a raw JSON body and appends a comment from it.
    pub fn add_comment_json(&self, article_id: &str, body: &str) -> ApiResponse {
        match serde_json::from_str::<CommentDraft>(body) {
            Ok(draft) => self.add_comment(article_id, &draft),
            Err(_) => reject("article_comment", INVALID_BODY),
        }
    }

    /// Likes an article. `200` with the updated article on success.
    pub fn like_article(&self, article_id: &str) -> ApiResponse {
        match self.service.like_article(article_id) {
            Ok(article) => ApiResponse::payload(ApiStatus::Ok, &article, LIKE_FAILED),
            Err(err) => map_service_error("article_like", LIKE_FAILED, err),
        }
    }

    /// Lists all articles, newest first.
    pub fn list_articles(&self) -> ApiResponse {
        match self.service.get_all_articles() {
            Ok(articles) => ApiResponse::payload(ApiStatus::Ok, &articles, LIST_FAILED),
            Err(err) => map_service_error("article_list", LIST_FAILED, err),
        }
    }

    /// Searches articles. A missing or blank query is rejected with `400`.
    pub fn search_articles(&self, query: Option<&str>) -> ApiResponse {
        if let Some(message) = validate_search_query(query) {
            return reject("article_search", message);
        }

        match self.service.search_articles(query.unwrap_or_default()) {
            Ok(articles) => ApiResponse::payload(ApiStatus::Ok, &articles, SEARCH_FAILED),
            Err(err) => map_service_error("article_search", SEARCH_FAILED, err),
        }
    }
}

fn reject(operation: &str, message: &'static str) -> ApiResponse {
    warn!("event=api_request module=api status=rejected operation={operation} reason={message:?}");
    ApiResponse::rejected(message)
}

fn map_service_error(operation: &str, message: &str, err: ArticleServiceError) -> ApiResponse {
    match err {
        ArticleServiceError::ArticleNotFound(_) => {
            warn!("event=api_request module=api status=not_found operation={operation}");
            ApiResponse::failure(ApiStatus::NotFound, NOT_FOUND, err.to_string())
        }
        ArticleServiceError::Validation(_) => {
            warn!("event=api_request module=api status=rejected operation={operation} error={err}");
            ApiResponse::failure(ApiStatus::BadRequest, message, err.to_string())
        }
        ArticleServiceError::Store(_) => {
            error!("event=api_request module=api status=error operation={operation} error={err}");
            ApiResponse::failure(ApiStatus::InternalError, message, err.to_string())
        }
    }
}
