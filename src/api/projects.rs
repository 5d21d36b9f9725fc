use serde_json::Value;

use crate::api::{ApiClient, ApiError};

const PATH: &str = "projects";

/// API version the projects resource defaults to.
pub const DEFAULT_API_VERSION: &str = "next";

/// Options for a deploy request. `new_sync` defaults to on; `dry_run` asks
/// the server to compute the diff without applying it.
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions {
    pub dry_run: bool,
    pub new_sync: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            new_sync: true,
        }
    }
}

/// Client for the projects resource.
///
/// Results and errors pass through from [`ApiClient`] unmodified; the project
/// schema is owned by the remote API and not validated here.
pub struct ProjectsApi<'a> {
    api: &'a ApiClient,
    api_version: String,
}

impl<'a> ProjectsApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self::with_version(api, DEFAULT_API_VERSION)
    }

    pub fn with_version<V: Into<String>>(api: &'a ApiClient, api_version: V) -> Self {
        Self {
            api,
            api_version: api_version.into(),
        }
    }

    pub async fn get_all(&self) -> Result<Value, ApiError> {
        self.api
            .get(&format!("/{}/{}", self.api_version, PATH))
            .await
    }

    pub async fn create(&self, project: &Value) -> Result<Value, ApiError> {
        self.api
            .post(&format!("/{}/{}", self.api_version, PATH), project)
            .await
    }

    /// Delete a project by id. `newSync=true` is part of the contract and
    /// not overridable by callers.
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.api
            .delete(&format!("/{}/{}/{}?newSync=true", self.api_version, PATH, id))
            .await
    }

    /// Deploy a synthesized construct graph in one request.
    ///
    /// The body is the resource array, unmodified. Batching, retries and
    /// partial-failure handling all live server-side; this call surfaces a
    /// single success or failure outcome.
    pub async fn deploy(
        &self,
        resources: &[Value],
        options: DeployOptions,
    ) -> Result<Value, ApiError> {
        let path = format!(
            "/{}/{}/deploy?dryRun={}&newSync={}",
            self.api_version, PATH, options.dry_run, options.new_sync
        );
        self.api.post(&path, resources).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_all_hits_collection_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/next/projects")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        let projects = ProjectsApi::new(&client).get_all().await.unwrap();

        mock.assert_async().await;
        assert_eq!(projects, json!([]));
    }

    #[tokio::test]
    async fn test_create_posts_project_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/next/projects")
            .match_body(Matcher::Json(json!({"name": "Demo", "logicalId": "demo"})))
            .with_status(200)
            .with_body("{\"id\": \"p-1\"}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        let created = ProjectsApi::new(&client)
            .create(&json!({"name": "Demo", "logicalId": "demo"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created["id"], "p-1");
    }

    #[tokio::test]
    async fn test_delete_always_sends_new_sync() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/next/projects/abc")
            .match_query(Matcher::UrlEncoded("newSync".into(), "true".into()))
            .with_status(204)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        ProjectsApi::new(&client).delete("abc").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_deploy_default_flags() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/next/projects/deploy")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("dryRun".into(), "false".into()),
                Matcher::UrlEncoded("newSync".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        ProjectsApi::new(&client)
            .deploy(&[], DeployOptions::default())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_deploy_dry_run_sends_body_unmodified() {
        let resources = vec![
            json!({"type": "check", "logicalId": "home", "name": "Home"}),
            json!({"type": "check-group", "logicalId": "critical", "name": "Critical"}),
        ];

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/next/projects/deploy")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("dryRun".into(), "true".into()),
                Matcher::UrlEncoded("newSync".into(), "true".into()),
            ]))
            .match_body(Matcher::Json(json!(resources)))
            .with_status(200)
            .with_body("{\"diff\": []}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        let outcome = ProjectsApi::new(&client)
            .deploy(
                &resources,
                DeployOptions {
                    dry_run: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome["diff"], json!([]));
    }

    #[tokio::test]
    async fn test_custom_api_version_in_paths() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/projects")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), "k", None);
        ProjectsApi::with_version(&client, "v1")
            .get_all()
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
