/*
[INPUT]:  Resource paths for related-entity lookups
[OUTPUT]: Raw collection items for related-entity selects
[POS]:    HTTP layer - generic collection endpoints such as /auth/users/
[UPDATE]: When adding new lookup endpoints
*/

use reqwest::Method;
use serde_json::Value;

use crate::http::{AgrisyncClient, Result, endpoints};
use crate::types::ListResponse;

impl AgrisyncClient {
    /// Fetch any collection endpoint as untyped items, accepting both the
    /// bare-array and `results` envelope shapes
    pub async fn fetch_collection(&self, endpoint: &str) -> Result<Vec<Value>> {
        let builder = self.request(Method::GET, endpoint)?;
        let response: ListResponse<Value> = self.send_json(builder).await?;
        Ok(response.into_items())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{AgrisyncClient, endpoints};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_collection_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "username": "root", "email": "root@farm.test", "role": "admin"},
                {"id": 2, "username": "ana", "role": "worker"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = AgrisyncClient::new(&server.uri()).expect("client init");
        let users = client
            .fetch_collection(endpoints::USERS)
            .await
            .expect("fetch_collection failed");

        assert_eq!(users.len(), 2);
        assert_eq!(users[1]["username"], "ana");
        assert!(users[1].get("email").is_none());
    }

    #[tokio::test]
    async fn test_fetch_collection_unwraps_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 5, "username": "leo"}],
            })))
            .mount(&server)
            .await;

        let client = AgrisyncClient::new(&server.uri()).expect("client init");
        let items = client
            .fetch_collection("/auth/users/")
            .await
            .expect("fetch_collection failed");

        assert_eq!(items, vec![json!({"id": 5, "username": "leo"})]);
    }
}
