// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The Cloud Storage JSON API resources returned by the fake.
//!
//! These types only cover the fields used by the registration helpers. They
//! serialize in the JSON API format: `camelCase` field names and 64-bit
//! integers as decimal strings.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// An object resource, as returned by `objects.get`, `objects.insert` or
/// `objects.patch`.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Object {
    pub kind: String,
    pub id: String,
    pub self_link: String,
    pub name: String,
    pub bucket: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub generation: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub metageneration: i64,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    pub storage_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_storage_class_updated: Option<DateTime<Utc>>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub size: u64,
    pub md5_hash: String,
    pub media_link: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<ObjectAccessControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    pub crc32c: String,
    pub etag: String,
}

/// One access control entry of an object.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectAccessControl {
    pub kind: String,
    pub id: String,
    pub self_link: String,
    pub bucket: String,
    pub object: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub generation: i64,
    pub entity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_id: String,
    pub role: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_team: Option<ProjectTeam>,
    pub etag: String,
}

/// The response of `objectAccessControls.list`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectAccessControls {
    pub kind: String,
    pub items: Vec<ObjectAccessControl>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectTeam {
    pub project_number: String,
    pub team: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Owner {
    pub entity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_id: String,
}

/// An access control rule, as a client library presents it to applications.
///
/// Use it to describe the entries of an ACL list response, see
/// [list_object_acl_ok_response()][crate::samples::list_object_acl_ok_response].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AclRule {
    /// For example `user-someone@example.com` or `project-owners-123`.
    pub entity: String,
    pub entity_id: String,
    /// One of `OWNER` or `READER`.
    pub role: String,
    pub domain: String,
    pub email: String,
    pub project_team: Option<ProjectTeam>,
}

impl AclRule {
    /// A rule granting `role` to `entity`.
    pub fn new<E: Into<String>, R: Into<String>>(entity: E, role: R) -> Self {
        Self {
            entity: entity.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_email<V: Into<String>>(mut self, v: V) -> Self {
        self.email = v.into();
        self
    }

    pub fn with_domain<V: Into<String>>(mut self, v: V) -> Self {
        self.domain = v.into();
        self
    }

    pub fn with_project_team<N, T>(mut self, number: N, team: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.project_team = Some(ProjectTeam {
            project_number: number.into(),
            team: team.into(),
        });
        self
    }
}

impl From<ObjectAccessControl> for AclRule {
    fn from(value: ObjectAccessControl) -> Self {
        Self {
            entity: value.entity,
            entity_id: value.entity_id,
            role: value.role,
            domain: value.domain,
            email: value.email,
            project_team: value.project_team,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn object_int64_as_string() -> anyhow::Result<()> {
        let object = Object {
            kind: "storage#object".into(),
            name: "hoge.txt".into(),
            bucket: "bucket".into(),
            generation: 1570087904014021,
            metageneration: 1,
            size: 24,
            ..Object::default()
        };
        let got = serde_json::to_value(&object)?;
        assert_eq!(got["generation"], json!("1570087904014021"));
        assert_eq!(got["metageneration"], json!("1"));
        assert_eq!(got["size"], json!("24"));
        assert_eq!(got["kind"], json!("storage#object"));
        assert!(got.get("acl").is_none(), "{got:?}");
        assert!(got.get("timeCreated").is_none(), "{got:?}");

        let roundtrip = serde_json::from_value::<Object>(got)?;
        assert_eq!(roundtrip, object);
        Ok(())
    }

    #[test]
    fn object_from_api() -> anyhow::Result<()> {
        let input = json!({
            "kind": "storage#object",
            "name": "post.txt",
            "bucket": "hoge",
            "generation": "1570087904014021",
            "metageneration": "1",
            "contentType": "text/plain; charset=utf-8",
            "timeCreated": "2019-10-03T07:31:44.013Z",
            "size": "24",
            "owner": {"entity": "user-faker@example.com"},
            "crc32c": "vOMu5Q=="
        });
        let got = serde_json::from_value::<Object>(input)?;
        assert_eq!(got.generation, 1570087904014021);
        assert_eq!(got.size, 24);
        assert_eq!(
            got.time_created.map(|t| t.timestamp_millis()),
            Some(1570087904013)
        );
        assert_eq!(got.owner.map(|o| o.entity).as_deref(), Some("user-faker@example.com"));
        Ok(())
    }

    #[test]
    fn acl_rule_from_access_control() {
        let input = ObjectAccessControl {
            kind: "storage#objectAccessControl".into(),
            entity: "project-owners-168610916801".into(),
            role: "OWNER".into(),
            project_team: Some(ProjectTeam {
                project_number: "168610916801".into(),
                team: "owners".into(),
            }),
            ..ObjectAccessControl::default()
        };
        let got = AclRule::from(input);
        let want = AclRule::new("project-owners-168610916801", "OWNER")
            .with_project_team("168610916801", "owners");
        assert_eq!(got, want);
    }

    #[test]
    fn acl_rule_builder() {
        let got = AclRule::new("domain-example.com", "READER")
            .with_domain("example.com")
            .with_email("someone@example.com");
        assert_eq!(got.entity, "domain-example.com");
        assert_eq!(got.role, "READER");
        assert_eq!(got.domain, "example.com");
        assert_eq!(got.email, "someone@example.com");
        assert_eq!(got.project_team, None);
    }
}
