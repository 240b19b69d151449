use super::AdminClient;
use crate::error::ApiResult;
use crate::model::GraphQlStub;
use reqwest::Method;

impl AdminClient {
    pub async fn list_graphql_stubs(&self) -> ApiResult<Vec<GraphQlStub>> {
        self.get_json("/graphql-stubs", "Failed to fetch GraphQL stubs")
            .await
    }

    pub async fn get_graphql_stub(&self, id: &str) -> ApiResult<GraphQlStub> {
        self.get_json(
            &format!("/graphql-stubs/{id}"),
            "Failed to fetch GraphQL stub",
        )
        .await
    }

    pub async fn create_graphql_stub(&self, stub: &GraphQlStub) -> ApiResult<GraphQlStub> {
        self.send_json(
            Method::POST,
            "/graphql-stubs",
            stub,
            "Failed to create GraphQL stub",
        )
        .await
    }

    pub async fn update_graphql_stub(
        &self,
        id: &str,
        stub: &GraphQlStub,
    ) -> ApiResult<GraphQlStub> {
        self.send_json(
            Method::PUT,
            &format!("/graphql-stubs/{id}"),
            stub,
            "Failed to update GraphQL stub",
        )
        .await
    }

    pub async fn delete_graphql_stub(&self, id: &str) -> ApiResult<()> {
        self.send_empty(
            Method::DELETE,
            &format!("/graphql-stubs/{id}"),
            "Failed to delete GraphQL stub",
        )
        .await
    }
}
