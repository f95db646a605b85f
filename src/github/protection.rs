//! Branch protection gateway
//!
//! The typed client does not model branch protection, so requests go through
//! the raw [`HttpTransport`] with the preview media type GitHub requires for
//! this API. Responses are returned as-is; a 404 from `GET .../protection`
//! means "not protected" and it is up to the caller to treat it that way.

use super::types::ProtectionPayload;
use crate::constants::github::{ENFORCE_ADMINS_POSTFIX, PROTECTION_PREVIEW_MEDIA_TYPE};
use ghutils_github::{
    HttpTransport, Method, RawRequest, RawResponse, RepoHandle, Result, branch_path,
};
use serde_json::Value;

pub struct BranchProtectionGateway<'a> {
    transport: &'a dyn HttpTransport,
    api_base: String,
    repo: RepoHandle,
}

impl<'a> BranchProtectionGateway<'a> {
    pub fn new(transport: &'a dyn HttpTransport, api_base: &str, repo: RepoHandle) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
        }
    }

    /// URL of `branch`'s protection resource followed by `postfix`
    pub fn url(&self, branch: &str, postfix: &str) -> String {
        format!(
            "{}/branches/{}/protection{}",
            self.repo.api_url(&self.api_base),
            branch_path(branch),
            postfix
        )
    }

    /// Perform `method` against the protection resource of `branch`
    pub async fn request(
        &self,
        branch: &str,
        method: Method,
        postfix: &str,
        body: Option<Value>,
    ) -> Result<RawResponse> {
        let mut request = RawRequest::new(method, self.url(branch, postfix))
            .with_header("Accept", PROTECTION_PREVIEW_MEDIA_TYPE);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.transport.send(request).await
    }

    pub async fn get(&self, branch: &str) -> Result<RawResponse> {
        self.request(branch, Method::GET, "", None).await
    }

    pub async fn remove(&self, branch: &str) -> Result<RawResponse> {
        self.request(branch, Method::DELETE, "", None).await
    }

    pub async fn apply(&self, branch: &str, payload: &ProtectionPayload) -> Result<RawResponse> {
        let body = serde_json::to_value(payload)?;
        self.request(branch, Method::PUT, "", Some(body)).await
    }

    /// `GET` reads, `POST` enables and `DELETE` disables admin enforcement
    pub async fn admin_enforcement(&self, branch: &str, method: Method) -> Result<RawResponse> {
        self.request(branch, method, ENFORCE_ADMINS_POSTFIX, None)
            .await
    }
}
