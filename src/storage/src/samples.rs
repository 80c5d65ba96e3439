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

//! Realistic payloads for the most common Cloud Storage calls.
//!
//! Use these when the code under test needs a valid response, but the test
//! does not care about most of its contents.

use crate::model::{AclRule, Object, ObjectAccessControl, ObjectAccessControls, Owner, ProjectTeam};
use crate::{FakeResponse, Result};
use chrono::{DateTime, Utc};
use http::{HeaderName, HeaderValue};

const GENERATION: i64 = 1570087904014021;
const ETAG_VALUE: &str = "CMXdo57J/+QCEAE=";
const MD5_HASH: &str = "3fv0VXHjk3nCc3znVNrcRw==";
const CRC32C: &str = "vOMu5Q==";
const PROJECT_NUMBER: &str = "168610916801";
const OWNER_ENTITY: &str = "user-faker@example.com";
const OWNER_EMAIL: &str = "faker@example.com";
const STORAGE_CLASS: &str = "REGIONAL";

const ACL_GENERATION: i64 = 1570091215037603;
const ACL_ETAG: &str = "CKPJjMnV/+QCEAI=";

const API_BASE: &str = "https://www.googleapis.com";

/// An object resource for a successful upload of `object` into `bucket`.
///
/// Only the name, bucket, content type and size come from the arguments.
/// The timestamps are the current time, the remaining fields are fixed.
pub fn simple_insert_object_response(
    bucket: &str,
    object: &str,
    content_type: &str,
    size: u64,
) -> Object {
    let now = Utc::now();
    let owners = format!("project-owners-{PROJECT_NUMBER}");
    let access_control = ObjectAccessControl {
        kind: "storage#objectAccessControl".to_string(),
        id: format!("{bucket}/{object}/{GENERATION}/{owners}"),
        self_link: format!("{API_BASE}/storage/v1/b/{bucket}/o/{object}/acl/{owners}"),
        bucket: bucket.to_string(),
        object: object.to_string(),
        generation: GENERATION,
        entity: owners.clone(),
        role: "OWNER".to_string(),
        etag: ETAG_VALUE.to_string(),
        ..ObjectAccessControl::default()
    };
    let acl = vec![
        ObjectAccessControl {
            project_team: Some(ProjectTeam {
                project_number: PROJECT_NUMBER.to_string(),
                team: "owners".to_string(),
            }),
            ..access_control.clone()
        },
        ObjectAccessControl {
            email: OWNER_EMAIL.to_string(),
            ..access_control
        },
    ];
    Object {
        kind: "storage#object".to_string(),
        id: format!("{bucket}/{object}/{GENERATION}"),
        self_link: format!("{API_BASE}/storage/v1/b/{bucket}/o/{object}"),
        name: object.to_string(),
        bucket: bucket.to_string(),
        generation: GENERATION,
        metageneration: 1,
        content_type: content_type.to_string(),
        time_created: Some(now),
        updated: Some(now),
        storage_class: STORAGE_CLASS.to_string(),
        time_storage_class_updated: Some(now),
        size,
        md5_hash: MD5_HASH.to_string(),
        media_link: format!(
            "{API_BASE}/download/storage/v1/b/{bucket}/o/{object}?generation={GENERATION}&alt=media"
        ),
        acl,
        owner: Some(Owner {
            entity: OWNER_ENTITY.to_string(),
            ..Owner::default()
        }),
        crc32c: CRC32C.to_string(),
        etag: ETAG_VALUE.to_string(),
        ..Object::default()
    }
}

/// A `200 OK` response for a metadata update, when the test ignores the
/// resulting object.
pub fn simple_update_object_ok_response(bucket: &str, object: &str) -> Result<FakeResponse> {
    let object = simple_insert_object_response(bucket, object, "text/plain; charset=utf-8", 1);
    FakeResponse::json(&object)
}

/// A `200 OK` response listing `rules` as the ACL of `object`.
pub fn list_object_acl_ok_response(
    bucket: &str,
    object: &str,
    rules: &[AclRule],
) -> Result<FakeResponse> {
    let items = rules
        .iter()
        .map(|rule| ObjectAccessControl {
            kind: "storage#objectAccessControl".to_string(),
            id: format!("{bucket}/{object}/{ACL_GENERATION}/{}", rule.entity),
            self_link: format!("{API_BASE}/storage/v1/b/{bucket}/o/{object}/acl/{}", rule.entity),
            bucket: bucket.to_string(),
            object: object.to_string(),
            generation: ACL_GENERATION,
            entity: rule.entity.clone(),
            entity_id: rule.entity_id.clone(),
            role: rule.role.clone(),
            email: rule.email.clone(),
            domain: rule.domain.clone(),
            project_team: rule.project_team.clone(),
            etag: ACL_ETAG.to_string(),
        })
        .collect();
    FakeResponse::json(&ObjectAccessControls {
        kind: "storage#objectAccessControls".to_string(),
        items,
    })
}

/// A captured response for downloading a small text object.
///
/// The body is `{"message":"Hello Hoge"}`.
pub fn get_object_ok_response_sample() -> FakeResponse {
    const BODY: &str = r#"{"message":"Hello Hoge"}"#;
    let headers = [
        ("accept-ranges", "bytes"),
        ("age", "268"),
        (
            "alt-svc",
            r#"quic=":443"; ma=2592000; v="46,43",h3-Q046=":443"; ma=2592000,h3-Q043=":443"; ma=2592000"#,
        ),
        ("cache-control", "public"),
        ("cache-control", "max-age=3600"),
        ("content-length", "24"),
        ("content-type", "text/plain"),
        ("date", "Mon, 30 Sep 2019 10:23:16 GMT"),
        ("etag", "c4d22707e0d79bd01e33fe19a5e21487"),
        ("expires", "Mon, 30 Sep 2019 11:23:16 GMT"),
        ("last-modified", "Mon, 30 Sep 2019 10:01:47 GMT"),
        ("x-goog-generation", "1569837707444808"),
        ("x-goog-hash", "crc32c=CrEDEg== md5=xNInB+DXm9AeM/4ZpeIUhw=="),
        ("x-goog-metageneration", "2"),
        ("x-goog-storage-class", STORAGE_CLASS),
        ("x-goog-stored-content-encoding", "identity"),
        ("x-goog-stored-content-length", "24"),
        (
            "x-guploader-uploadid",
            "AEnB2UoygSa1dB8aXstLosALQoifLpXnQ5kIx_lyzTyIvk5bFuIcG7nqk-sR5GdihmWdTtHDuiKCtSgxyRJ9iLJmHnQ7RHmvoQ",
        ),
    ];
    headers
        .into_iter()
        .fold(FakeResponse::ok(), |response, (name, value)| {
            response.with_header(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .with_body(BODY)
}

/// A captured response for uploading `post.txt` into the `hoge` bucket.
///
/// The headers are the ones returned by the upload service, except for
/// `content-length`, which matches the body.
pub fn insert_object_ok_response_sample() -> Result<FakeResponse> {
    const BUCKET: &str = "hoge";
    const OBJECT: &str = "post.txt";
    let created = DateTime::from_timestamp_millis(1570087904013);
    let mut object = simple_insert_object_response(BUCKET, OBJECT, "text/plain; charset=utf-8", 24);
    object.time_created = created;
    object.updated = created;
    object.time_storage_class_updated = created;
    let template = object.acl[0].clone();
    object.acl = ["owners", "editors", "viewers"]
        .into_iter()
        .map(|team| {
            let entity = format!("project-{team}-{PROJECT_NUMBER}");
            ObjectAccessControl {
                id: format!("{BUCKET}/{OBJECT}/{GENERATION}/{entity}"),
                self_link: format!("{API_BASE}/storage/v1/b/{BUCKET}/o/{OBJECT}/acl/{entity}"),
                role: if team == "viewers" { "READER" } else { "OWNER" }.to_string(),
                project_team: Some(ProjectTeam {
                    project_number: PROJECT_NUMBER.to_string(),
                    team: team.to_string(),
                }),
                entity,
                ..template.clone()
            }
        })
        .chain(std::iter::once(ObjectAccessControl {
            id: format!("{BUCKET}/{OBJECT}/{GENERATION}/{OWNER_ENTITY}"),
            self_link: format!("{API_BASE}/storage/v1/b/{BUCKET}/o/{OBJECT}/acl/{OWNER_ENTITY}"),
            entity: OWNER_ENTITY.to_string(),
            email: OWNER_EMAIL.to_string(),
            project_team: None,
            ..template.clone()
        }))
        .collect();

    let body = serde_json::to_vec(&object)?;
    let headers = [
        ("server", "UploadServer"),
        (
            "alt-svc",
            r#"quic=":443"; ma=2592000; v="46,43",h3-Q048=":443"; ma=2592000,h3-Q046=":443"; ma=2592000,h3-Q043=":443"; ma=2592000"#,
        ),
        ("vary", "Origin"),
        ("vary", "X-Origin"),
        ("content-type", crate::JSON_CONTENT_TYPE),
        ("cache-control", "no-cache, no-store, max-age=0, must-revalidate"),
        ("date", "Thu, 03 Oct 2019 07:31:44 GMT"),
        (
            "x-guploader-uploadid",
            "AEnB2UpF0rRDJSlY8seVYqjxCchiX2GwvYwiGqkFfaduXRlzuNpGEDdlCsKtpvVe5gn0WMsW3HSeqFw4nqyNZ0v3apu9Il_VMw",
        ),
        ("etag", ETAG_VALUE),
        ("pragma", "no-cache"),
        ("expires", "Mon, 01 Jan 1990 00:00:00 GMT"),
    ];
    let response = headers
        .into_iter()
        .fold(FakeResponse::ok(), |response, (name, value)| {
            response.with_header(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .with_header(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()))
        .with_body(body);
    Ok(response)
}
