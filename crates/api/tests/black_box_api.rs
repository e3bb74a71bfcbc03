use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use opsdesk_auth::{JwtClaims, PrincipalId, Role};
use opsdesk_core::TenantId;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = opsdesk_api::app::build_app(jwt_secret.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, tenant_id: TenantId, roles: Vec<Role>) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: PrincipalId::new(),
        tenant_id,
        roles,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tenant_context_is_derived_from_token() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let tenant_id = TenantId::new();
    let token = mint_jwt(jwt_secret, tenant_id, vec![Role::new("admin")]);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant_id"].as_str().unwrap(), tenant_id.to_string());
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn create_variants_builds_the_option_cartesian_product() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let tenant_id = TenantId::new();
    let token = mint_jwt(jwt_secret, tenant_id, vec![Role::new("admin")]);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/create-variants", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "T-Shirt",
            "code": "TSHIRT",
            "option_groups": [
                { "name": "size", "options": ["S", "M", "L"] },
                { "name": "color", "options": ["black", "white"] }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let variants: serde_json::Value = res.json().await.unwrap();
    let variants = variants.as_array().unwrap();
    assert_eq!(variants.len(), 6);

    for variant in variants {
        let options = variant["options"].as_array().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0]["group"], "size");
        assert_eq!(options[1]["group"], "color");
    }

    // Persisted and queryable afterwards.
    let res = client
        .get(format!("{}/product-variants", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn create_variants_without_groups_yields_one_base_variant() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let token = mint_jwt(jwt_secret, TenantId::new(), vec![Role::new("admin")]);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/create-variants", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Plain Mug", "code": "MUG" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let variants: serde_json::Value = res.json().await.unwrap();
    let variants = variants.as_array().unwrap();
    assert_eq!(variants.len(), 1);
    assert!(variants[0]["options"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_variants_rejects_an_invalid_product() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let token = mint_jwt(jwt_secret, TenantId::new(), vec![Role::new("admin")]);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/create-variants", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "",
            "code": "TSHIRT",
            "option_groups": [{ "name": "size", "options": ["S"] }]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn create_variants_requires_the_permission() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    // Not admin => permission mapping returns empty => forbidden for commands.
    let token = mint_jwt(jwt_secret, TenantId::new(), vec![Role::new("viewer")]);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/create-variants", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "T-Shirt", "code": "TSHIRT" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn organization_edit_is_permission_gated() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let tenant_id = TenantId::new();
    let admin = mint_jwt(jwt_secret, tenant_id, vec![Role::new("admin")]);
    let viewer = mint_jwt(jwt_secret, tenant_id, vec![Role::new("viewer")]);

    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/organizations", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Acme Corp", "profile_link": "acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    // Viewer can read, but not edit.
    let res = client
        .get(format!("{}/organizations/{}", srv.base_url, id))
        .bearer_auth(&viewer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(format!("{}/organizations/{}", srv.base_url, id))
        .bearer_auth(&viewer)
        .json(&json!({ "name": "Evil Corp" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Admin edit goes through and the change is visible.
    let res = client
        .put(format!("{}/organizations/{}", srv.base_url, id))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Acme International" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Acme International");
    assert_eq!(body["profile_link"], "acme");
}

#[tokio::test]
async fn employee_count_is_scoped_to_the_organization() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let tenant_id = TenantId::new();
    let token = mint_jwt(jwt_secret, tenant_id, vec![Role::new("admin")]);

    let client = reqwest::Client::new();

    let mut org_ids = Vec::new();
    for (name, link) in [("Acme", "acme"), ("Globex", "globex")] {
        let res = client
            .post(format!("{}/organizations", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({ "name": name, "profile_link": link }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: serde_json::Value = res.json().await.unwrap();
        org_ids.push(created["id"].as_str().unwrap().to_string());
    }

    for (org, name, email) in [
        (&org_ids[0], "Alice", "alice@acme.test"),
        (&org_ids[0], "Bob", "bob@acme.test"),
        (&org_ids[1], "Carol", "carol@globex.test"),
    ] {
        let res = client
            .post(format!("{}/employees", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({ "organization_id": org, "name": name, "email": email }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!(
            "{}/employees/count?organization_id={}",
            srv.base_url, org_ids[0]
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 2);

    let res = client
        .get(format!(
            "{}/employees?organization_id={}",
            srv.base_url, org_ids[1]
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Carol");
}

#[tokio::test]
async fn tenant_isolation_blocks_cross_tenant_reads() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let token1 = mint_jwt(jwt_secret, TenantId::new(), vec![Role::new("admin")]);
    let token2 = mint_jwt(jwt_secret, TenantId::new(), vec![Role::new("admin")]);

    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/create-variants", srv.base_url))
        .bearer_auth(&token1)
        .json(&json!({
            "name": "T-Shirt",
            "code": "TSHIRT",
            "option_groups": [{ "name": "size", "options": ["S"] }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let variants: serde_json::Value = res.json().await.unwrap();
    let id = variants[0]["id"].as_str().unwrap().to_string();

    // The other tenant cannot see the variant.
    let res = client
        .get(format!("{}/product-variants/{}", srv.base_url, id))
        .bearer_auth(&token2)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
