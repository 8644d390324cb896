use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A GitHub repository. Identity is the upstream `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub owner: Owner,
    #[serde(default)]
    pub description: Option<String>,
}

impl Repository {
    /// `<owner>/<name>`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }

    pub fn matches(&self, owner: &str, name: &str) -> bool {
        self.owner.login == owner && self.name == name
    }
}

/// Splits an `<owner>/<repo>` argument. Both parts must be non-empty.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = full_name.split('/').collect();
    match parts.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => Some((*owner, *name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let repo = Repository {
            id: 1,
            name: "gh-kanban".to_string(),
            owner: Owner {
                login: "inqbarna".to_string(),
            },
            description: None,
        };
        assert_eq!(repo.full_name(), "inqbarna/gh-kanban");
        assert!(repo.matches("inqbarna", "gh-kanban"));
        assert!(!repo.matches("inqbarna", "other"));
    }

    #[test]
    fn test_decode_null_and_missing_description() {
        let with_null = r#"{"id":1,"name":"a","owner":{"login":"o"},"description":null}"#;
        let missing = r#"{"id":2,"name":"b","owner":{"login":"o"}}"#;

        let a: Repository = serde_json::from_str(with_null).unwrap();
        let b: Repository = serde_json::from_str(missing).unwrap();

        assert_eq!(a.description, None);
        assert_eq!(b.description, None);
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(split_full_name("owner/repo"), Some(("owner", "repo")));
        assert_eq!(split_full_name("ownerrepo"), None);
        assert_eq!(split_full_name("/repo"), None);
        assert_eq!(split_full_name("owner/"), None);
        assert_eq!(split_full_name("owner/repo/extra"), None);
    }
}
