//! Read operations over the social graph.
//!
//! Every operation is a single parameterized Cypher query; results are
//! reshaped into lightweight Serialize records keyed the way the HTTP
//! layer exposes them.

use neo4rs::query;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{GraphClient, GraphError};
use crate::label::Label;

/// The fixed attribute projection returned for a single user lookup.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub sex: Option<i64>,
    pub city: Option<String>,
}

/// A user ranked by inbound FOLLOWS edges.
#[derive(Debug, Clone, Serialize)]
pub struct RankedUser {
    pub id: i64,
    pub name: Option<String>,
    pub followers_count: i64,
}

/// A group ranked by inbound SUBSCRIBED edges.
#[derive(Debug, Clone, Serialize)]
pub struct RankedGroup {
    pub id: i64,
    pub name: Option<String>,
    pub subscribers_count: i64,
}

/// One entry of the full node listing.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: Option<i64>,
    pub label: String,
}

/// A node together with its outbound relationships.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetail {
    pub node: NodeBody,
    pub relations: Vec<RelationEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeBody {
    pub label: String,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationEntry {
    pub relationship: RelationshipBody,
    pub related_node: RelatedNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipBody {
    #[serde(rename = "type")]
    pub typ: String,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedNode {
    pub id: Option<i64>,
    pub label: String,
    pub attributes: Map<String, Value>,
}

impl GraphClient {
    /// Look up a single user by external id.
    pub async fn fetch_user(&self, user_id: i64) -> Result<Option<UserProfile>, GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})
             RETURN u.id AS id, u.name AS name, u.screen_name AS screen_name,
                    u.sex AS sex, u.city AS city",
        )
        .param("user_id", user_id);

        match self.query_one(q).await? {
            Some(row) => Ok(Some(UserProfile {
                id: row
                    .get("id")
                    .map_err(|e| GraphError::Malformed(format!("user id column: {e}")))?,
                name: row.get("name").unwrap_or_default(),
                screen_name: row.get("screen_name").unwrap_or_default(),
                sex: row.get("sex").unwrap_or_default(),
                city: row.get("city").unwrap_or_default(),
            })),
            None => Ok(None),
        }
    }

    /// The five users with the most inbound FOLLOWS edges.
    pub async fn top_users(&self) -> Result<Vec<RankedUser>, GraphError> {
        let q = query(
            "MATCH (u:User)<-[:FOLLOWS]-()
             RETURN u.id AS id, u.name AS name, count(*) AS followers_count
             ORDER BY followers_count DESC LIMIT 5",
        );

        let rows = self.query_rows(q).await?;
        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(RankedUser {
                id: row
                    .get("id")
                    .map_err(|e| GraphError::Malformed(format!("top-users id column: {e}")))?,
                name: row.get("name").unwrap_or_default(),
                followers_count: row.get("followers_count").unwrap_or_default(),
            });
        }
        Ok(users)
    }

    /// The five groups with the most inbound SUBSCRIBED edges.
    pub async fn top_groups(&self) -> Result<Vec<RankedGroup>, GraphError> {
        let q = query(
            "MATCH (g:Group)<-[:SUBSCRIBED]-()
             RETURN g.id AS id, g.name AS name, count(*) AS subscribers_count
             ORDER BY subscribers_count DESC LIMIT 5",
        );

        let rows = self.query_rows(q).await?;
        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            groups.push(RankedGroup {
                id: row
                    .get("id")
                    .map_err(|e| GraphError::Malformed(format!("top-groups id column: {e}")))?,
                name: row.get("name").unwrap_or_default(),
                subscribers_count: row.get("subscribers_count").unwrap_or_default(),
            });
        }
        Ok(groups)
    }

    /// Count nodes with label User.
    pub async fn count_users(&self) -> Result<i64, GraphError> {
        let q = query("MATCH (u:User) RETURN count(u) AS count");
        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("count").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count nodes with label Group.
    pub async fn count_groups(&self) -> Result<i64, GraphError> {
        let q = query("MATCH (g:Group) RETURN count(g) AS count");
        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("count").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Every node in the store, id plus first label.
    pub async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError> {
        let q = query("MATCH (n) RETURN n.id AS id, labels(n) AS labels");

        let rows = self.query_rows(q).await?;
        let mut nodes = Vec::with_capacity(rows.len());
        for row in rows {
            let labels: Vec<String> = row.get("labels").unwrap_or_default();
            nodes.push(NodeSummary {
                id: row.get("id").unwrap_or_default(),
                label: labels.into_iter().next().unwrap_or_default(),
            });
        }
        Ok(nodes)
    }

    /// Look up a node by label and id, together with its outbound
    /// relationships and their target nodes.
    ///
    /// Returns `None` when the node itself does not exist; a node with
    /// no outbound edges comes back with an empty `relations` list.
    pub async fn fetch_node_with_relations(
        &self,
        label: &Label,
        node_id: i64,
    ) -> Result<Option<NodeDetail>, GraphError> {
        let cypher = format!(
            "MATCH (n:{label} {{id: $node_id}})
             OPTIONAL MATCH (n)-[r]->(m)
             RETURN n, r, m"
        );
        let q = query(&cypher).param("node_id", node_id);

        let rows = self.query_rows(q).await?;
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let node: neo4rs::Node = first
            .get("n")
            .map_err(|e| GraphError::Malformed(format!("node column: {e}")))?;
        let body = NodeBody {
            label: label.as_str().to_string(),
            attributes: node_attributes(&node),
        };

        let mut relations = Vec::new();
        for row in &rows {
            let rel: Option<neo4rs::Relation> = row.get("r").unwrap_or_default();
            let target: Option<neo4rs::Node> = row.get("m").unwrap_or_default();
            let (Some(rel), Some(target)) = (rel, target) else {
                continue;
            };

            let target_labels = target.labels();
            relations.push(RelationEntry {
                relationship: RelationshipBody {
                    typ: rel.typ().to_string(),
                    attributes: relation_attributes(&rel),
                },
                related_node: RelatedNode {
                    id: target.get("id").ok(),
                    label: target_labels
                        .first()
                        .map_or_else(|| "No Label".to_string(), ToString::to_string),
                    attributes: node_attributes(&target),
                },
            });
        }

        Ok(Some(NodeDetail {
            node: body,
            relations,
        }))
    }
}

/// Collect a driver node's properties into an open JSON map.
fn node_attributes(node: &neo4rs::Node) -> Map<String, Value> {
    let mut attrs = Map::new();
    for key in node.keys() {
        if let Ok(value) = node.get::<Value>(key) {
            attrs.insert(key.to_string(), value);
        }
    }
    attrs
}

fn relation_attributes(rel: &neo4rs::Relation) -> Map<String, Value> {
    let mut attrs = Map::new();
    for key in rel.keys() {
        if let Ok(value) = rel.get::<Value>(key) {
            attrs.insert(key.to_string(), value);
        }
    }
    attrs
}
