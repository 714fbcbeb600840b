//! Static provider descriptors.
//!
//! A [`ProviderSpec`] captures everything that differs between upstream
//! image APIs: endpoint, authentication, parameter names, page-size
//! ceiling and how response fields map onto an
//! [`ImageRecord`](crate::ImageRecord).

use crate::{OrderBy, Tier};

/// How a provider authenticates requests.
///
/// Secret names are environment keys looked up in
/// [`Config`](crate::Config).
#[derive(Debug, Clone, Copy)]
pub enum Auth {
    /// Public API.
    None,
    /// Secrets sent as query parameters: `(param, secret)`.
    Query(&'static [(&'static str, &'static str)]),
    /// Secret sent in a header, after an optional prefix.
    Header {
        name: &'static str,
        prefix: &'static str,
        secret: &'static str,
    },
    /// OAuth2 client-credentials grant; the bearer token is cached per adapter.
    ClientCredentials {
        /// Token endpoint, relative to the base URL.
        token_path: &'static str,
        client_id: &'static str,
        client_secret: &'static str,
    },
}

impl Auth {
    /// Returns the secret names this scheme needs.
    pub fn secrets(&self) -> Vec<&'static str> {
        match self {
            Self::None => Vec::new(),
            Self::Query(pairs) => pairs.iter().map(|(_, secret)| *secret).collect(),
            Self::Header { secret, .. } => vec![*secret],
            Self::ClientCredentials {
                client_id,
                client_secret,
                ..
            } => vec![*client_id, *client_secret],
        }
    }
}

/// `Authorization: Bearer <secret>`.
pub const fn bearer(secret: &'static str) -> Auth {
    Auth::Header {
        name: "Authorization",
        prefix: "Bearer ",
        secret,
    }
}

/// How a provider pages through results.
#[derive(Debug, Clone, Copy)]
pub enum Paging {
    /// Page number plus page size.
    Page {
        page: &'static str,
        size: &'static str,
    },
    /// 1-based start offset plus count.
    Offset {
        start: &'static str,
        count: &'static str,
    },
}

/// Provider parameter carrying the ordering hint.
///
/// A `None` value means the provider has no equivalent and the parameter
/// is left out.
#[derive(Debug, Clone, Copy)]
pub struct OrderParam {
    pub name: &'static str,
    pub relevant: Option<&'static str>,
    pub latest: Option<&'static str>,
    pub oldest: Option<&'static str>,
}

impl OrderParam {
    /// Returns the provider value for a hint.
    pub fn value(&self, order: OrderBy) -> Option<&'static str> {
        match order {
            OrderBy::Relevant => self.relevant,
            OrderBy::Latest => self.latest,
            OrderBy::Oldest => self.oldest,
        }
    }
}

/// Where one record field comes from in a response item.
#[derive(Debug, Clone, Copy)]
pub enum Field {
    /// Always absent.
    Null,
    /// JSON pointer into the item (e.g. `/urls/thumb`).
    Ptr(&'static str),
    /// Fixed text.
    Text(&'static str),
    /// Text with `{/pointer}` placeholders; absent if any placeholder is.
    Template(&'static str),
    /// Last path segment of the URL at the pointer.
    LastSegment(&'static str),
    /// The provider's base URL.
    BaseUrl,
    /// "Image from <provider name>".
    Placeholder,
    /// First alternative that yields a value.
    Or(&'static [Field]),
}

/// Field-mapping table from a response item to an image record.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub title: Field,
    pub description: Field,
    pub thumbnail_url: Field,
    pub regular_url: Field,
    pub raw_url: Field,
    pub photographer: Field,
    pub photographer_url: Field,
    pub source_url: Field,
    pub download_url: Field,
    pub image_id: Field,
}

impl FieldMap {
    /// A map where every field is absent, for struct-update syntax.
    pub const EMPTY: FieldMap = FieldMap {
        title: Field::Placeholder,
        description: Field::Null,
        thumbnail_url: Field::Null,
        regular_url: Field::Null,
        raw_url: Field::Null,
        photographer: Field::Null,
        photographer_url: Field::Null,
        source_url: Field::Null,
        download_url: Field::Null,
        image_id: Field::Ptr("/id"),
    };
}

/// How the record license is derived.
#[derive(Debug, Clone, Copy)]
pub enum LicenseRule {
    /// Same label for every record.
    Fixed(&'static str),
    /// Boolean flag at the pointer selects `paid` when true.
    Premium {
        flag: &'static str,
        free: &'static str,
        paid: &'static str,
    },
    /// Upstream Creative-Commons tag at the pointer, normalized to a label.
    CreativeCommons(&'static str),
}

/// How the record `source` tag is derived.
#[derive(Debug, Clone, Copy)]
pub enum SourceRule {
    /// The provider identifier.
    Provider,
    /// `prefix` followed by the value at `field`, or `default` when missing.
    Prefixed {
        prefix: &'static str,
        field: &'static str,
        default: &'static str,
    },
}

/// Descriptor of one upstream image API.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    /// Identifier used in requests and records.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub tier: Tier,
    /// Scheme and host, plus any fixed path prefix.
    pub base_url: &'static str,
    /// Search endpoint path appended to the base URL.
    pub path: &'static str,
    pub auth: Auth,
    /// Fixed request headers.
    pub headers: &'static [(&'static str, &'static str)],
    /// Parameter carrying the search terms.
    pub query_param: &'static str,
    pub paging: Paging,
    /// Smallest page size the provider accepts.
    pub min_per_page: u32,
    /// Largest page size the provider accepts.
    pub max_per_page: u32,
    /// Fixed query parameters.
    pub params: &'static [(&'static str, &'static str)],
    pub order: Option<OrderParam>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// JSON pointer to the result array in the response body.
    pub results: &'static str,
    pub fields: FieldMap,
    pub license: LicenseRule,
    pub source: SourceRule,
}

impl ProviderSpec {
    /// Clamps a caller page size into the provider's accepted range.
    pub fn clamp_per_page(&self, per_page: u32) -> u32 {
        per_page.clamp(self.min_per_page, self.max_per_page)
    }

    /// Returns the secret names required before the provider is usable.
    pub fn required_secrets(&self) -> Vec<&'static str> {
        self.auth.secrets()
    }
}
