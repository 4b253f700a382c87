// GraphQL wire types.
// Request envelope, response envelope, and the post payloads.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Post as listed in the posts collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub title: String,
}

/// Full post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Body of a GraphQL POST request.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the posts list query.
#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub posts: PostsPage,
}

/// Paged collection wrapper used by the API.
#[derive(Debug, Deserialize)]
pub struct PostsPage {
    pub data: Vec<PostSummary>,
}

/// `data` of the single post query.
#[derive(Debug, Deserialize)]
pub struct PostData {
    pub post: Option<PostDetail>,
}

/// GraphQL `ID` values arrive as strings; accept numbers too.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid id: {:?}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_string_or_number() {
        let from_text: PostSummary =
            serde_json::from_value(json!({ "id": "12", "title": "t" })).unwrap();
        let from_number: PostSummary =
            serde_json::from_value(json!({ "id": 12, "title": "t" })).unwrap();
        assert_eq!(from_text.id, 12);
        assert_eq!(from_text, from_number);
    }

    #[test]
    fn test_invalid_id_rejected() {
        let result = serde_json::from_value::<PostSummary>(json!({ "id": "abc", "title": "t" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_posts_payload() {
        let data: PostsData = serde_json::from_value(json!({
            "posts": { "data": [
                { "id": "1", "title": "A" },
                { "id": "2", "title": "B" }
            ]}
        }))
        .unwrap();
        let titles: Vec<&str> = data.posts.data.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn test_request_omits_missing_variables() {
        let request = GraphQlRequest {
            query: "query { x }",
            variables: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "query { x }" })
        );
    }
}
