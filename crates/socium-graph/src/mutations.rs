//! Write operations for the social graph.

use neo4rs::query;
use serde::Deserialize;

use crate::client::{GraphClient, GraphError};
use crate::label::Label;

/// Attribute set for the idempotent user merge-write.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAttributes {
    pub id: i64,
    pub name: String,
    pub screen_name: String,
    pub sex: i64,
    pub city: String,
}

/// Request body for node creation.
///
/// `label` defaults to User; `follows` and `subscribes` list external
/// ids of nodes the new node should point at. Both the presence check
/// and the iteration use the same field name (the original service
/// read `follows` but iterated `subscribed`; that mismatch is fixed
/// here, see DESIGN.md).
#[derive(Debug, Clone, Deserialize)]
pub struct NewNode {
    #[serde(default)]
    pub label: Label,
    pub id: i64,
    pub name: String,
    pub sex: i64,
    pub city: String,
    pub screen_name: String,
    #[serde(default)]
    pub follows: Vec<i64>,
    #[serde(default)]
    pub subscribes: Vec<i64>,
}

impl GraphClient {
    /// Idempotent merge-write: create-or-update a User by external id.
    pub async fn upsert_user(&self, user: &UserAttributes) -> Result<(), GraphError> {
        let q = query(
            "MERGE (u:User {id: $id})
             SET u.name = $name, u.screen_name = $screen_name,
                 u.sex = $sex, u.city = $city",
        )
        .param("id", user.id)
        .param("name", user.name.as_str())
        .param("screen_name", user.screen_name.as_str())
        .param("sex", user.sex)
        .param("city", user.city.as_str());

        self.run(q).await
    }

    /// Create a node, then a FOLLOWS edge for each followed user and a
    /// SUBSCRIBED edge for each subscription target that exists.
    ///
    /// Edge targets that do not exist are skipped silently (the MATCH
    /// finds nothing and the CREATE never fires).
    pub async fn create_node(&self, node: &NewNode) -> Result<(), GraphError> {
        let cypher = format!(
            "CREATE (u:{label} {{id: $id, label: $label, name: $name,
                                 sex: $sex, city: $city, screen_name: $screen_name}})",
            label = node.label
        );
        let q = query(&cypher)
            .param("id", node.id)
            .param("label", node.label.as_str())
            .param("name", node.name.as_str())
            .param("sex", node.sex)
            .param("city", node.city.as_str())
            .param("screen_name", node.screen_name.as_str());
        self.run(q).await?;

        for follow_id in &node.follows {
            let cypher = format!(
                "MATCH (u:{label} {{id: $id}}), (f:User {{id: $follow_id}})
                 CREATE (u)-[:FOLLOWS]->(f)",
                label = node.label
            );
            let q = query(&cypher)
                .param("id", node.id)
                .param("follow_id", *follow_id);
            self.run(q).await?;
        }

        for subscribe_id in &node.subscribes {
            let cypher = format!(
                "MATCH (u:{label} {{id: $id}}), (s {{id: $subscribe_id}})
                 CREATE (u)-[:SUBSCRIBED]->(s)",
                label = node.label
            );
            let q = query(&cypher)
                .param("id", node.id)
                .param("subscribe_id", *subscribe_id);
            self.run(q).await?;
        }

        Ok(())
    }

    /// Delete a node's outbound edges, inbound edges, and the node
    /// itself, as one transaction.
    ///
    /// Succeeds even when nothing matched.
    pub async fn delete_node(&self, label: &Label, node_id: i64) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;

        let outbound = format!("MATCH (n:{label} {{id: $node_id}})-[r]->() DELETE r");
        txn.run(query(&outbound).param("node_id", node_id)).await?;

        let inbound = format!("MATCH (n:{label} {{id: $node_id}})<-[r]-() DELETE r");
        txn.run(query(&inbound).param("node_id", node_id)).await?;

        let node = format!("MATCH (n:{label} {{id: $node_id}}) DELETE n");
        txn.run(query(&node).param("node_id", node_id)).await?;

        txn.commit().await?;
        Ok(())
    }
}
