use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub likes_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_count() {
        let json = serde_json::to_string(&LikeResponse {
            message: "post liked".into(),
            likes_count: 1,
        })
        .unwrap();
        assert!(json.contains("\"likes_count\":1"));
    }
}
