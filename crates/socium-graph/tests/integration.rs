//! Integration tests for socium-graph against a live Neo4j instance.
//!
//! Run with: cargo test --package socium-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use socium_graph::{GraphClient, GraphConfig, Label, NewNode, UserAttributes};

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig {
        uri: std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
        user: std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
        password: std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "neo4j".to_string()),
        ..GraphConfig::default()
    };
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

async fn cleanup(client: &GraphClient, ids: &[i64]) {
    let q = neo4rs::query("MATCH (n) WHERE n.id IN $ids DETACH DELETE n").param("ids", ids.to_vec());
    let _ = client.run(q).await;
}

fn make_user(id: i64, name: &str) -> NewNode {
    NewNode {
        label: Label::default(),
        id,
        name: name.to_string(),
        sex: 1,
        city: "la".to_string(),
        screen_name: name.to_lowercase(),
        follows: Vec::new(),
        subscribes: Vec::new(),
    }
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_create_and_fetch_user() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_001];
    cleanup(&client, &ids).await;

    client.create_node(&make_user(910_001, "John Doe")).await.unwrap();

    let profile = client.fetch_user(910_001).await.unwrap().unwrap();
    assert_eq!(profile.id, 910_001);
    assert_eq!(profile.name.as_deref(), Some("John Doe"));
    assert_eq!(profile.screen_name.as_deref(), Some("john doe"));
    assert_eq!(profile.sex, Some(1));
    assert_eq!(profile.city.as_deref(), Some("la"));

    cleanup(&client, &ids).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_fetch_missing_user_is_none() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    assert!(client.fetch_user(-999_999).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_upsert_user_is_idempotent() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_002];
    cleanup(&client, &ids).await;

    let user = UserAttributes {
        id: 910_002,
        name: "Jane".to_string(),
        screen_name: "jane".to_string(),
        sex: 2,
        city: "spb".to_string(),
    };
    client.upsert_user(&user).await.unwrap();
    client.upsert_user(&user).await.unwrap();

    let q = neo4rs::query("MATCH (u:User {id: $id}) RETURN count(u) AS count")
        .param("id", 910_002_i64);
    let row = client.query_one(q).await.unwrap().unwrap();
    assert_eq!(row.get::<i64>("count").unwrap(), 1);

    cleanup(&client, &ids).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_relations_match_edges_created() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_010, 910_011, 910_012];
    cleanup(&client, &ids).await;

    client.create_node(&make_user(910_011, "Alice")).await.unwrap();
    client.create_node(&make_user(910_012, "Bob")).await.unwrap();

    let mut node = make_user(910_010, "Carol");
    node.follows = vec![910_011, 910_012];
    client.create_node(&node).await.unwrap();

    let label = Label::parse("User").unwrap();
    let detail = client
        .fetch_node_with_relations(&label, 910_010)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.node.label, "User");
    assert_eq!(detail.relations.len(), 2);
    for entry in &detail.relations {
        assert_eq!(entry.relationship.typ, "FOLLOWS");
        assert_eq!(entry.related_node.label, "User");
    }

    // A node with no outbound edges has an empty relations list.
    let lonely = client
        .fetch_node_with_relations(&label, 910_011)
        .await
        .unwrap()
        .unwrap();
    assert!(lonely.relations.is_empty());

    cleanup(&client, &ids).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_follow_edge_to_missing_user_is_skipped() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_020];
    cleanup(&client, &ids).await;

    let mut node = make_user(910_020, "Dave");
    node.follows = vec![-1]; // no such user
    client.create_node(&node).await.unwrap();

    let label = Label::parse("User").unwrap();
    let detail = client
        .fetch_node_with_relations(&label, 910_020)
        .await
        .unwrap()
        .unwrap();
    assert!(detail.relations.is_empty());

    cleanup(&client, &ids).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_delete_removes_node_and_edges() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_030, 910_031];
    cleanup(&client, &ids).await;

    client.create_node(&make_user(910_031, "Erin")).await.unwrap();
    let mut node = make_user(910_030, "Frank");
    node.follows = vec![910_031];
    client.create_node(&node).await.unwrap();

    let label = Label::parse("User").unwrap();
    client.delete_node(&label, 910_030).await.unwrap();

    assert!(client.fetch_user(910_030).await.unwrap().is_none());

    // The surviving node no longer sees the deleted one anywhere.
    let q = neo4rs::query("MATCH (n {id: $id})-[r]-() RETURN count(r) AS count")
        .param("id", 910_031_i64);
    let row = client.query_one(q).await.unwrap().unwrap();
    assert_eq!(row.get::<i64>("count").unwrap(), 0);

    // Deleting again still succeeds.
    client.delete_node(&label, 910_030).await.unwrap();

    cleanup(&client, &ids).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_top_users_bounded_and_sorted() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let top = client.top_users().await.unwrap();
    assert!(top.len() <= 5);
    for pair in top.windows(2) {
        assert!(pair[0].followers_count >= pair[1].followers_count);
    }
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_counts_and_listing() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ids = [910_040];
    cleanup(&client, &ids).await;

    let before = client.count_users().await.unwrap();
    client.create_node(&make_user(910_040, "Grace")).await.unwrap();
    assert_eq!(client.count_users().await.unwrap(), before + 1);

    let nodes = client.list_nodes().await.unwrap();
    assert!(nodes
        .iter()
        .any(|n| n.id == Some(910_040) && n.label == "User"));

    cleanup(&client, &ids).await;
}
