//! Hypermedia link building.
//!
//! Links are computed fresh for every response and never persisted. The API
//! version is the only thing that changes the link set: from v2 on, a
//! `related` link is advertised. No handler serves `/related` yet, so
//! clients must treat it as a forward-declared affordance.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Key under which links are attached to a resource.
pub const LINKS_KEY: &str = "_links";

/// A mounted API version, ordered so later versions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// Route prefix the version is mounted under, e.g. `/api/v2`.
    pub fn prefix(self) -> String {
        format!("/api/{}", self.as_str())
    }

    /// Whether resources advertise the `related` link.
    pub fn has_related_link(self) -> bool {
        self >= ApiVersion::V2
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// One hypermedia link descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub method: LinkMethod,
    pub rel: String,
}

impl Link {
    fn new(href: String, method: LinkMethod, rel: &str) -> Self {
        Self {
            href,
            method,
            rel: rel.to_string(),
        }
    }
}

/// Relation name to link, in insertion order.
pub type Links = IndexMap<String, Link>;

/// Build the link set for one resource.
///
/// `kind` is the singular resource name; collection paths pluralise it with
/// a trailing `s` (`game` -> `/games`).
pub fn build_links(kind: &str, id: DbId, version: ApiVersion) -> Links {
    let collection = format!("{}/{kind}s", version.prefix());
    let item = format!("{collection}/{id}");

    let mut links = Links::new();
    links.insert("self".into(), Link::new(item.clone(), LinkMethod::Get, "self"));
    links.insert("update".into(), Link::new(item.clone(), LinkMethod::Patch, "update"));
    links.insert("delete".into(), Link::new(item.clone(), LinkMethod::Delete, "delete"));
    links.insert(
        "collection".into(),
        Link::new(collection, LinkMethod::Get, "collection"),
    );

    if version.has_related_link() {
        links.insert(
            "related".into(),
            Link::new(format!("{item}/related"), LinkMethod::Get, "related"),
        );
    }

    links
}

/// Serialize `resource` and attach its links under [`LINKS_KEY`].
///
/// The resource must serialize to a JSON object.
pub fn with_links<T: Serialize>(
    resource: &T,
    kind: &str,
    id: DbId,
    version: ApiVersion,
) -> Result<Value, CoreError> {
    let mut value = serde_json::to_value(resource)
        .map_err(|e| CoreError::Internal(format!("failed to serialize {kind}: {e}")))?;

    let Value::Object(map) = &mut value else {
        return Err(CoreError::Internal(format!("{kind} did not serialize to an object")));
    };

    let links = serde_json::to_value(build_links(kind, id, version))
        .map_err(|e| CoreError::Internal(format!("failed to serialize links: {e}")))?;
    map.insert(LINKS_KEY.to_string(), links);

    Ok(value)
}
