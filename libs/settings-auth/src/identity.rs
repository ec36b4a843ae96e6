use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Authenticated caller as seen by the handlers.
///
/// `subject` owns private records (`created_by_sub`); `name` is the display
/// name stored as `created_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: String,
    pub name: String,
    pub preferred_username: Option<String>,
    pub audience: Vec<String>,
    pub realm_roles: Vec<String>,
    pub client_roles: BTreeMap<String, Vec<String>>,
    pub groups: Vec<String>,
}

/// Roles carrying this prefix are rendered as permissions.
const PERMISSION_ROLE_PREFIX: &str = "__";

impl Identity {
    /// Identity used when authentication is disabled.
    #[must_use]
    pub fn anonymous(admin_role: &str) -> Self {
        Self {
            subject: String::new(),
            name: "Anonymous".to_owned(),
            preferred_username: None,
            audience: Vec::new(),
            realm_roles: vec![admin_role.to_owned()],
            client_roles: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// Owner of records provisioned by other services over gRPC.
    #[must_use]
    pub fn system() -> Self {
        Self {
            subject: String::new(),
            name: String::new(),
            preferred_username: None,
            audience: Vec::new(),
            realm_roles: Vec::new(),
            client_roles: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// Build an identity from decoded (and possibly userinfo-enriched) claims.
    #[must_use]
    pub fn from_claims(claims: &Value) -> Self {
        let preferred_username = string_claim(claims, "preferred_username");
        let full_name = format!(
            "{} {}",
            string_claim(claims, "given_name").unwrap_or_default(),
            string_claim(claims, "family_name").unwrap_or_default()
        );
        let mut name = full_name.trim().to_owned();
        if name.is_empty() {
            name = preferred_username.clone().unwrap_or_default();
        }

        let client_roles = claims
            .get("resource_access")
            .and_then(Value::as_object)
            .map(|clients| {
                clients
                    .iter()
                    .map(|(client, access)| (client.clone(), string_list(access.get("roles"))))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            subject: string_claim(claims, "sub").unwrap_or_default(),
            name,
            preferred_username,
            audience: string_list(claims.get("aud")),
            realm_roles: string_list(claims.get("realm_access").and_then(|r| r.get("roles"))),
            client_roles,
            groups: string_list(claims.get("groups")),
        }
    }

    /// Permissions derived from `__`-prefixed roles: `realm_access.<role>` and `<client>.<role>`.
    #[must_use]
    pub fn permissions(&self) -> Vec<String> {
        let realm = self
            .realm_roles
            .iter()
            .filter(|role| role.starts_with(PERMISSION_ROLE_PREFIX))
            .map(|role| format!("realm_access.{role}"));
        let clients = self.client_roles.iter().flat_map(|(client, roles)| {
            roles
                .iter()
                .filter(|role| role.starts_with(PERMISSION_ROLE_PREFIX))
                .map(move |role| format!("{client}.{role}"))
        });
        realm.chain(clients).collect()
    }

    #[must_use]
    pub fn has_any_permission(&self, wanted: &[String]) -> bool {
        self.permissions().iter().any(|p| wanted.contains(p))
    }
}

fn string_claim(claims: &Value, key: &str) -> Option<String> {
    claims.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Accepts either a single string or an array of strings.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claims_are_mapped_to_identity() {
        let claims = json!({
            "sub": "b1c0",
            "given_name": "Ada",
            "family_name": "Lovelace",
            "preferred_username": "ada",
            "aud": "frontend",
            "realm_access": {"roles": ["__admin", "viewer"]},
            "resource_access": {"inventory": {"roles": ["__editor", "reader"]}},
            "groups": ["/ops"]
        });

        let identity = Identity::from_claims(&claims);
        assert_eq!(identity.subject, "b1c0");
        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.audience, vec!["frontend"]);
        assert_eq!(identity.groups, vec!["/ops"]);
        assert_eq!(
            identity.permissions(),
            vec!["realm_access.__admin", "inventory.__editor"]
        );
        assert!(identity.has_any_permission(&["realm_access.__admin".to_owned()]));
    }

    #[test]
    fn name_falls_back_to_username() {
        let identity = Identity::from_claims(&json!({"sub": "x", "preferred_username": "svc"}));
        assert_eq!(identity.name, "svc");
        assert!(identity.permissions().is_empty());
    }

    #[test]
    fn anonymous_identity_holds_admin_role() {
        let identity = Identity::anonymous("__admin");
        assert_eq!(identity.subject, "");
        assert_eq!(identity.name, "Anonymous");
        assert_eq!(identity.realm_roles, vec!["__admin"]);
    }
}
