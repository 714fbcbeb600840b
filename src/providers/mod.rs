//! Image provider implementations.
//!
//! Every provider is an [`Adapter`] configured by one entry of [`CATALOG`].
//! Catalog order is the canonical order in which results are assembled.

mod adapter;
pub mod mapping;
pub mod spec;
mod token;

pub use adapter::Adapter;
pub use spec::{Auth, Field, FieldMap, LicenseRule, OrderParam, Paging, ProviderSpec, SourceRule};
pub use token::{AccessToken, TokenCache};

use spec::bearer;
use spec::Field::{BaseUrl, Null, Or, Placeholder, Ptr, Template, Text};

use crate::Tier;

/// Sources searched when a request does not name any.
pub const DEFAULT_SOURCES: &[&str] = &["google", "unsplash", "pexels", "pixabay"];

const ACCEPT_JSON: &[(&str, &str)] = &[("Accept", "application/json")];

const fn page(page: &'static str, size: &'static str) -> Paging {
    Paging::Page { page, size }
}

/// Shape shared by the catalogs that only differ in names and field paths.
const BASE: ProviderSpec = ProviderSpec {
    id: "",
    name: "",
    tier: Tier::Paid,
    base_url: "",
    path: "/api/search",
    auth: Auth::None,
    headers: ACCEPT_JSON,
    query_param: "q",
    paging: page("page", "per_page"),
    min_per_page: 1,
    max_per_page: 50,
    params: &[],
    order: None,
    timeout_secs: 10,
    results: "/results",
    fields: FieldMap::EMPTY,
    license: LicenseRule::Fixed("paid"),
    source: SourceRule::Provider,
};

/// All known providers, free tier first.
pub static CATALOG: &[ProviderSpec] = &[
    ProviderSpec {
        id: "google",
        name: "Google Custom Search",
        tier: Tier::Free,
        base_url: "https://www.googleapis.com",
        path: "/customsearch/v1",
        auth: Auth::Query(&[("key", "GOOGLE_API_KEY"), ("cx", "GOOGLE_SEARCH_ENGINE_ID")]),
        headers: &[],
        paging: Paging::Offset {
            start: "start",
            count: "num",
        },
        max_per_page: 10,
        params: &[("searchType", "image")],
        results: "/items",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/snippet"),
            thumbnail_url: Ptr("/image/thumbnailLink"),
            regular_url: Ptr("/link"),
            source_url: Ptr("/image/contextLink"),
            download_url: Ptr("/link"),
            image_id: Or(&[Ptr("/cacheId"), Field::LastSegment("/link")]),
            ..FieldMap::EMPTY
        },
        license: LicenseRule::Fixed("various"),
        ..BASE
    },
    ProviderSpec {
        id: "unsplash",
        name: "Unsplash",
        tier: Tier::Free,
        base_url: "https://api.unsplash.com",
        path: "/search/photos",
        auth: Auth::Header {
            name: "Authorization",
            prefix: "Client-ID ",
            secret: "UNSPLASH_API_KEY",
        },
        headers: &[("Accept-Version", "v1")],
        query_param: "query",
        max_per_page: 20,
        order: Some(OrderParam {
            name: "order_by",
            relevant: Some("relevant"),
            latest: Some("latest"),
            oldest: None,
        }),
        fields: FieldMap {
            title: Or(&[Ptr("/description"), Ptr("/alt_description"), Placeholder]),
            description: Ptr("/alt_description"),
            thumbnail_url: Ptr("/urls/thumb"),
            regular_url: Ptr("/urls/regular"),
            raw_url: Ptr("/urls/raw"),
            photographer: Ptr("/user/name"),
            photographer_url: Ptr("/user/links/html"),
            source_url: Ptr("/links/html"),
            download_url: Ptr("/links/download_location"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("free"),
        ..BASE
    },
    ProviderSpec {
        id: "pexels",
        name: "Pexels",
        tier: Tier::Free,
        base_url: "https://api.pexels.com/v1",
        path: "/search",
        auth: Auth::Header {
            name: "Authorization",
            prefix: "",
            secret: "PEXELS_API_KEY",
        },
        headers: &[],
        query_param: "query",
        max_per_page: 80,
        results: "/photos",
        fields: FieldMap {
            title: Or(&[Template("Photo by {/photographer}"), Placeholder]),
            description: Ptr("/alt"),
            thumbnail_url: Ptr("/src/tiny"),
            regular_url: Ptr("/src/medium"),
            raw_url: Ptr("/src/original"),
            photographer: Ptr("/photographer"),
            photographer_url: Ptr("/photographer_url"),
            source_url: Ptr("/url"),
            download_url: Ptr("/src/original"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("free"),
        ..BASE
    },
    ProviderSpec {
        id: "pixabay",
        name: "Pixabay",
        tier: Tier::Free,
        base_url: "https://pixabay.com",
        path: "/api/",
        auth: Auth::Query(&[("key", "PIXABAY_API_KEY")]),
        headers: &[],
        min_per_page: 3,
        max_per_page: 200,
        params: &[("image_type", "photo")],
        order: Some(OrderParam {
            name: "order",
            relevant: Some("popular"),
            latest: Some("latest"),
            oldest: None,
        }),
        results: "/hits",
        fields: FieldMap {
            title: Or(&[Template("Photo by {/user}"), Placeholder]),
            description: Ptr("/tags"),
            thumbnail_url: Ptr("/previewURL"),
            regular_url: Ptr("/webformatURL"),
            raw_url: Ptr("/largeImageURL"),
            photographer: Ptr("/user"),
            photographer_url: Template("https://pixabay.com/users/{/user}-{/user_id}/"),
            source_url: Or(&[Ptr("/pageURL"), Template("https://pixabay.com/photos/{/id}/")]),
            download_url: Ptr("/largeImageURL"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("free"),
        ..BASE
    },
    ProviderSpec {
        id: "creative_commons",
        name: "Creative Commons",
        tier: Tier::Free,
        base_url: "https://api.openverse.org/v1",
        path: "/images/",
        headers: &[],
        paging: page("page", "page_size"),
        max_per_page: 500,
        params: &[("format", "json")],
        timeout_secs: 15,
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Or(&[Ptr("/thumbnail"), Ptr("/url")]),
            regular_url: Ptr("/url"),
            raw_url: Ptr("/url"),
            photographer: Ptr("/creator"),
            photographer_url: Ptr("/creator_url"),
            source_url: Ptr("/foreign_landing_url"),
            download_url: Ptr("/url"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::CreativeCommons("/license"),
        source: SourceRule::Prefixed {
            prefix: "cc_",
            field: "/source",
            default: "commons",
        },
        ..BASE
    },
    ProviderSpec {
        id: "freepik",
        name: "Freepik",
        tier: Tier::Free,
        base_url: "https://api.freepik.com/v1",
        path: "/resources",
        auth: Auth::Header {
            name: "x-freepik-api-key",
            prefix: "",
            secret: "FREEPIK_API_KEY",
        },
        query_param: "term",
        paging: page("page", "limit"),
        max_per_page: 100,
        order: Some(OrderParam {
            name: "order",
            relevant: Some("relevance"),
            latest: Some("recent"),
            oldest: None,
        }),
        results: "/data",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumbnail/url"),
            regular_url: Ptr("/image/url"),
            raw_url: Ptr("/image/source/url"),
            photographer: Ptr("/author/name"),
            photographer_url: Ptr("/author/url"),
            source_url: Ptr("/url"),
            download_url: Ptr("/url"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Premium {
            flag: "/premium",
            free: "free",
            paid: "paid",
        },
        ..BASE
    },
    ProviderSpec {
        id: "agencia_brasil",
        name: "Agência Brasil",
        tier: Tier::Free,
        base_url: "https://agenciabrasil.ebc.com.br",
        path: "/api/fotos",
        auth: bearer("AGENCIA_BRASIL_API_KEY"),
        timeout_secs: 15,
        results: "/fotos",
        fields: FieldMap {
            title: Or(&[Ptr("/titulo"), Placeholder]),
            description: Ptr("/descricao"),
            thumbnail_url: Ptr("/thumbnail"),
            regular_url: Ptr("/url_media"),
            raw_url: Ptr("/url_original"),
            photographer: Ptr("/fotografo"),
            photographer_url: Null,
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            download_url: Ptr("/url_download"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("public"),
        ..BASE
    },
    ProviderSpec {
        id: "ibge",
        name: "IBGE Cidades",
        tier: Tier::Free,
        base_url: "https://cidades.ibge.gov.br",
        path: "/api/fotos",
        auth: bearer("IBGE_API_KEY"),
        query_param: "cidade",
        paging: page("pagina", "quantidade"),
        timeout_secs: 15,
        results: "/fotos",
        fields: FieldMap {
            title: Or(&[Ptr("/titulo"), Placeholder]),
            description: Ptr("/descricao"),
            thumbnail_url: Ptr("/miniatura"),
            regular_url: Ptr("/media"),
            raw_url: Ptr("/alta"),
            photographer: Text("IBGE"),
            photographer_url: Text("https://www.ibge.gov.br"),
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            download_url: Ptr("/download"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("public"),
        ..BASE
    },
    ProviderSpec {
        id: "inpe",
        name: "INPE Image Catalog",
        tier: Tier::Free,
        base_url: "https://www.dgi.inpe.br/catalogo",
        path: "/api/images",
        auth: bearer("INPE_API_KEY"),
        query_param: "search",
        paging: page("page", "limit"),
        max_per_page: 100,
        timeout_secs: 15,
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumbnail_url"),
            regular_url: Ptr("/preview_url"),
            raw_url: Ptr("/full_url"),
            photographer: Text("INPE"),
            photographer_url: Text("https://www.inpe.br"),
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            download_url: Ptr("/download_url"),
            image_id: Ptr("/id"),
        },
        license: LicenseRule::Fixed("public"),
        ..BASE
    },
    ProviderSpec {
        id: "shutterstock",
        name: "Shutterstock",
        base_url: "https://api.shutterstock.com/v2",
        path: "/images/search",
        auth: Auth::ClientCredentials {
            token_path: "/oauth/access_token",
            client_id: "SHUTTERSTOCK_CLIENT_ID",
            client_secret: "SHUTTERSTOCK_CLIENT_SECRET",
        },
        query_param: "query",
        max_per_page: 100,
        params: &[("view", "minimal")],
        order: Some(OrderParam {
            name: "sort",
            relevant: Some("relevance"),
            latest: Some("newest"),
            oldest: None,
        }),
        results: "/data",
        fields: FieldMap {
            title: Or(&[Ptr("/description"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Or(&[Ptr("/assets/large_thumb/url"), Ptr("/assets/small_thumb/url")]),
            regular_url: Ptr("/assets/preview/url"),
            raw_url: Ptr("/assets/preview/url"),
            photographer: Ptr("/contributor/name"),
            source_url: Template("https://www.shutterstock.com/image-photo/{/id}"),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "getty_images",
        name: "Getty Images",
        base_url: "https://api.gettyimages.com/v3",
        path: "/search/images",
        auth: Auth::Header {
            name: "Api-Key",
            prefix: "",
            secret: "GETTY_IMAGES_API_KEY",
        },
        query_param: "phrase",
        paging: page("page", "page_size"),
        max_per_page: 100,
        params: &[("fields", "id,title,caption,thumb,preview")],
        order: Some(OrderParam {
            name: "sort_order",
            relevant: Some("best_match"),
            latest: Some("newest"),
            oldest: Some("oldest"),
        }),
        results: "/images",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/caption"),
            thumbnail_url: Ptr("/display_sizes/0/uri"),
            regular_url: Ptr("/display_sizes/0/uri"),
            raw_url: Ptr("/display_sizes/0/uri"),
            source_url: Template("https://www.gettyimages.com/detail/{/id}"),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "istock",
        name: "iStock",
        base_url: "https://api.gettyimages.com/v3",
        path: "/search/images",
        auth: Auth::Header {
            name: "Api-Key",
            prefix: "",
            secret: "ISTOCK_API_KEY",
        },
        query_param: "phrase",
        paging: page("page", "page_size"),
        max_per_page: 75,
        params: &[
            ("product_types", "easyaccess,editorialsubscription"),
            ("fields", "id,title,caption,thumb,preview"),
        ],
        order: Some(OrderParam {
            name: "sort_order",
            relevant: Some("best_match"),
            latest: Some("newest"),
            oldest: Some("oldest"),
        }),
        results: "/images",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/caption"),
            thumbnail_url: Ptr("/display_sizes/0/uri"),
            regular_url: Ptr("/display_sizes/0/uri"),
            raw_url: Ptr("/display_sizes/0/uri"),
            source_url: Template("https://www.istockphoto.com/photo/{/id}"),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "pulsar_imagens",
        name: "Pulsar Imagens",
        base_url: "https://www.pulsarimagens.com.br",
        auth: bearer("PULSAR_IMAGENS_API_KEY"),
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumbnail_url"),
            regular_url: Ptr("/preview_url"),
            raw_url: Ptr("/high_res_url"),
            photographer: Ptr("/photographer"),
            source_url: Or(&[Ptr("/image_url"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "fotoarena",
        name: "Foto Arena",
        base_url: "https://www.fotoarena.com.br",
        auth: bearer("FOTOARENA_API_KEY"),
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumbnail_url"),
            regular_url: Ptr("/preview_url"),
            raw_url: Ptr("/high_res_url"),
            photographer: Ptr("/photographer"),
            source_url: Or(&[Ptr("/image_url"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "usp_imagens",
        name: "USP Imagens",
        base_url: "https://imagens.usp.br",
        path: "/api/buscar",
        auth: bearer("USP_IMAGENS_API_KEY"),
        query_param: "busca",
        paging: page("pagina", "quantidade"),
        results: "/imagens",
        fields: FieldMap {
            title: Or(&[Ptr("/titulo"), Placeholder]),
            description: Ptr("/descricao"),
            thumbnail_url: Ptr("/miniatura"),
            regular_url: Ptr("/preview"),
            raw_url: Ptr("/original"),
            photographer: Ptr("/fotografo"),
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        license: LicenseRule::Fixed("academic"),
        ..BASE
    },
    ProviderSpec {
        id: "tyba",
        name: "Tyba",
        base_url: "https://tyba.com.br",
        auth: bearer("TYBA_API_KEY"),
        query_param: "query",
        paging: page("page", "limit"),
        results: "/images",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumb"),
            regular_url: Ptr("/preview"),
            raw_url: Ptr("/full"),
            photographer: Ptr("/author"),
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "natureza_brasileira",
        name: "Natureza Brasileira",
        base_url: "https://www.naturezabrasileira.com.br",
        auth: bearer("NATUREZA_BRASILEIRA_API_KEY"),
        query_param: "busca",
        paging: page("pagina", "itens"),
        results: "/fotos",
        fields: FieldMap {
            title: Or(&[Ptr("/titulo"), Placeholder]),
            description: Ptr("/descricao"),
            thumbnail_url: Ptr("/miniatura"),
            regular_url: Ptr("/media"),
            raw_url: Ptr("/alta"),
            photographer: Ptr("/fotografo"),
            source_url: Or(&[Ptr("/link"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
    ProviderSpec {
        id: "fabio_colombini",
        name: "Fabio Colombini",
        base_url: "https://www.fabiocolombini.com.br",
        auth: bearer("FABIO_COLOMBINI_API_KEY"),
        results: "/photos",
        fields: FieldMap {
            title: Or(&[Ptr("/title"), Placeholder]),
            description: Ptr("/description"),
            thumbnail_url: Ptr("/thumbnail"),
            regular_url: Ptr("/preview"),
            raw_url: Ptr("/full"),
            photographer: Text("Fabio Colombini"),
            photographer_url: BaseUrl,
            source_url: Or(&[Ptr("/url"), BaseUrl]),
            image_id: Ptr("/id"),
            ..FieldMap::EMPTY
        },
        ..BASE
    },
];

/// Looks up a provider descriptor by identifier.
pub fn find(id: &str) -> Option<&'static ProviderSpec> {
    CATALOG.iter().find(|spec| spec.id == id)
}

/// Every credential key referenced by the catalog, without repeats.
pub fn credential_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for key in CATALOG.iter().flat_map(|spec| spec.required_secrets()) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
