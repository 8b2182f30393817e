// Wire and domain types for the Masthead client API.
//
// All payloads are camelCase JSON. Entities are fully server-owned; these
// types only exist for the duration of a request/response round trip.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

// ── Users ────────────────────────────────────────────────────────────

/// Access role of a Masthead user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Owner,
    User,
}

/// A user account. The email address is the identity key -- there is no
/// synthetic ID on this resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub role: UserRole,
}

// ── Data domains ─────────────────────────────────────────────────────

/// Slack channel binding on a domain, resolved server-side from the
/// requested channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackChannel {
    #[serde(rename = "channelName")]
    pub name: String,
    #[serde(rename = "channelId")]
    pub id: String,
}

/// A data domain. `uuid` is server-assigned on create.
///
/// `slack_channel_name` is a write-only input; the server answers with the
/// resolved `slack_channel` pair instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slack_channel_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<SlackChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Data products ────────────────────────────────────────────────────

/// Kind of data asset inside a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Dataset,
    Table,
}

/// Alerting severity attached to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    Regular,
    Critical,
}

/// A data asset owned by a product. Assets have no lifecycle of their
/// own; a product update replaces the stored list wholesale.
///
/// `table` is only meaningful when `asset_type` is [`AssetType::Table`];
/// the server, not the client, enforces that pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProductAsset {
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    pub project: String,
    pub dataset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub alert_type: AlertType,
}

/// A data product: a named, ordered collection of data assets, optionally
/// attached to a domain by `data_domain_uuid`. The `domain` field is a
/// read-only snapshot the server may embed in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_domain_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub data_assets: Vec<DataProductAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Response envelopes ───────────────────────────────────────────────

/// Pagination block on list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: u32,
}

/// Application-level error details carried inside an envelope.
///
/// The service is loose about the shape of its `error` field: a string, an
/// object with `code`/`message`, occasionally a bare number or bool. All
/// non-null shapes decode into this one struct; `null` means no error and
/// is handled by the surrounding `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl<'de> Deserialize<'de> for ApiErrorDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DetailVisitor;

        impl<'de> Visitor<'de> for DetailVisitor {
            type Value = ApiErrorDetail;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, bool, or error object")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ApiErrorDetail {
                    code: None,
                    message: Some(v.to_owned()),
                })
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ApiErrorDetail {
                    code: None,
                    message: Some(v.to_string()),
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ApiErrorDetail {
                    code: Some(v.to_string()),
                    message: None,
                })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ApiErrorDetail {
                    code: Some(v.to_string()),
                    message: None,
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ApiErrorDetail {
                    code: Some(v.to_string()),
                    message: None,
                })
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items: Vec<serde_json::Value> = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }

                Ok(ApiErrorDetail {
                    code: None,
                    message: Some(serde_json::Value::Array(items).to_string()),
                })
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut code: Option<String> = None;
                let mut message: Option<String> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "code" => code = map.next_value::<Option<CodeField>>()?.map(|c| c.0),
                        "message" => message = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }

                Ok(ApiErrorDetail { code, message })
            }
        }

        deserializer.deserialize_any(DetailVisitor)
    }
}

/// `code` inside an error object may itself be a string or a number.
struct CodeField(String);

impl<'de> Deserialize<'de> for CodeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = CodeField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric error code")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CodeField(v.to_owned()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CodeField(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(CodeField(v.to_string()))
            }
        }

        deserializer.deserialize_any(CodeVisitor)
    }
}

/// Wire wrapper around a single-entity response.
///
/// The `error`/`message` pair can appear on any response, including an
/// HTTP 200 -- transport-level success never implies application-level
/// success.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    // Error responses routinely omit the value, so it must not be
    // required for the envelope itself to parse.
    #[serde(default)]
    pub value: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Run the application-error gate: a present `error` field wins over
    /// the payload, whatever the HTTP status said. An envelope with
    /// neither error nor value is a contract violation.
    pub fn into_result(self) -> Result<T, Error> {
        if let Some(detail) = self.error {
            return Err(api_error(detail, self.message));
        }

        self.value.ok_or_else(|| Error::Deserialization {
            message: "response envelope carried neither value nor error".to_owned(),
            body: String::new(),
        })
    }
}

/// Wire wrapper around a collection response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ListEnvelope<T> {
    #[serde(default)]
    pub values: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ListEnvelope<T> {
    pub fn into_result(self) -> Result<(Vec<T>, Option<Pagination>), Error> {
        match self.error {
            Some(detail) => Err(api_error(detail, self.message)),
            None => Ok((self.values, self.pagination)),
        }
    }
}

/// Fold an envelope's error detail and top-level message into one error,
/// preserving the server's wording.
fn api_error(detail: ApiErrorDetail, envelope_message: Option<String>) -> Error {
    let message = match (detail.message, envelope_message) {
        (Some(inner), Some(outer)) if inner != outer => format!("{inner}. {outer}"),
        (Some(inner), _) => inner,
        (None, Some(outer)) => outer,
        (None, None) => "unspecified error".to_owned(),
    };

    Error::Api {
        message,
        code: detail.code,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn error_detail_from_string() {
        let detail: ApiErrorDetail = serde_json::from_str(r#""domain not found""#).unwrap();
        assert_eq!(detail.message.as_deref(), Some("domain not found"));
        assert_eq!(detail.code, None);
    }

    #[test]
    fn error_detail_from_object() {
        let detail: ApiErrorDetail =
            serde_json::from_str(r#"{"code": "CONFLICT", "message": "duplicate email"}"#).unwrap();
        assert_eq!(detail.code.as_deref(), Some("CONFLICT"));
        assert_eq!(detail.message.as_deref(), Some("duplicate email"));
    }

    #[test]
    fn error_detail_from_numeric_code_object() {
        let detail: ApiErrorDetail =
            serde_json::from_str(r#"{"code": 409, "message": "duplicate email"}"#).unwrap();
        assert_eq!(detail.code.as_deref(), Some("409"));
    }

    #[test]
    fn error_detail_from_array() {
        let envelope: Envelope<User> = serde_json::from_str(
            r#"{"error": ["email is taken", "role is invalid"]}"#,
        )
        .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert!(err.to_string().contains("email is taken"));
        assert!(err.to_string().contains("role is invalid"));
    }

    #[test]
    fn null_error_field_means_absent() {
        let envelope: Envelope<User> = serde_json::from_str(
            r#"{"value": {"email": "a@x.com", "role": "USER"}, "error": null}"#,
        )
        .unwrap();
        let user = envelope.into_result().unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn envelope_error_wins_over_value() {
        let envelope: Envelope<User> = serde_json::from_str(
            r#"{"value": {"email": "a@x.com", "role": "USER"}, "error": "rejected", "message": "role not allowed"}"#,
        )
        .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("role not allowed"));
    }

    #[test]
    fn table_asset_round_trips() {
        let asset = DataProductAsset {
            asset_type: AssetType::Table,
            uuid: "5656f586-d9d5-3f7a-b9f2-06a44f72e5f2".into(),
            project: "analytics-prod".into(),
            dataset: "billing".into(),
            table: Some("invoices".into()),
            alert_type: AlertType::Critical,
        };

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "TABLE");
        assert_eq!(json["alertType"], "CRITICAL");
        assert_eq!(json["table"], "invoices");

        let back: DataProductAsset = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
    }

    #[test]
    fn domain_create_payload_omits_server_fields() {
        let domain = Domain {
            name: "Analytics".into(),
            email: "analytics@example.com".into(),
            slack_channel_name: "analytics-alerts".into(),
            ..Domain::default()
        };

        let json = serde_json::to_value(&domain).unwrap();
        assert!(json.get("uuid").is_none());
        assert!(json.get("slackChannel").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["slackChannelName"], "analytics-alerts");
    }

    #[test]
    fn domain_response_decodes_resolved_channel() {
        let domain: Domain = serde_json::from_str(
            r#"{
                "uuid": "0c3c2ca0-ffff-4f9e-9e17-9b8f0f8a2f61",
                "name": "Analytics",
                "email": "analytics@example.com",
                "slackChannel": {"channelName": "analytics-alerts", "channelId": "C0123"},
                "createdAt": "2025-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        let channel = domain.slack_channel.unwrap();
        assert_eq!(channel.name, "analytics-alerts");
        assert_eq!(channel.id, "C0123");
        assert!(domain.created_at.is_some());
        assert!(domain.slack_channel_name.is_empty());
    }
}
